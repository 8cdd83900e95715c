/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type, the [`ParseResult`] it produces, and the
/// top-level parse loop.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single "god file".
/// - Productions return `Option<node>`: `None` is the explicit no-node sentinel, with
///   the diagnostic already appended to the shared error list. No parse error ever
///   unwinds.

/// Outcome of a parse: the root block built from every statement that parsed, plus the
/// ordered error list.
///
/// The tree is handed back even when errors were recorded so tooling can inspect the
/// recoverable part; callers must check [`ParseResult::has_errors`] before trusting it
/// for instruction generation.
#[derive(Debug)]
pub struct ParseResult {
    pub program: FunctionBlock,
    pub errors: Vec<SyntaxError>,
}

impl ParseResult {
    /// Whether any syntax error was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parser state.
///
/// ## Notes
/// - Single pass; recovers from errors by synchronizing at line boundaries.
/// - Most parsing helpers are implemented on `Parser` but split across multiple files.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<SyntaxError>,
    /// Nesting depth of `DEF` program frames (0 or 1 in well-formed input).
    def_depth: u32,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `mova_syntax::lexer` (must end with `Eof`,
    ///   which `tokenize` guarantees).
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            def_depth: 0,
        }
    }

    /// Parse the entire token stream into a [`ParseResult`].
    pub fn parse(mut self) -> ParseResult {
        let mut statements = Vec::new();

        self.skip_newlines();
        while !self.is_at_end() {
            // `END` closes a `DEF` frame and produces no node of its own.
            if self.check_keyword(KeywordId::End) {
                let pos = self.peek_pos();
                self.advance();
                if self.def_depth == 0 {
                    self.error_at(pos, "END without a matching DEF");
                } else {
                    self.def_depth -= 1;
                }
                self.end_of_statement();
                self.skip_newlines();
                continue;
            }

            let before = self.pos;
            match self.statement() {
                Some(stmt) => {
                    statements.push(stmt);
                    if !self.end_of_statement() {
                        self.synchronize();
                    }
                }
                None => {
                    // The failing production recorded the diagnostic. Guarantee progress
                    // even if it consumed nothing, then resynchronize at the next line.
                    if self.pos == before {
                        self.advance();
                    }
                    self.synchronize();
                }
            }
            self.skip_newlines();
        }

        if self.def_depth > 0 {
            self.error_at_previous("Expected END before end of file");
        }

        ParseResult {
            program: FunctionBlock { statements },
            errors: self.errors,
        }
    }
}
