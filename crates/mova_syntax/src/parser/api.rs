/// Parse a token stream into a [`ParseResult`].
///
/// This is the main public entrypoint for parsing. The result carries the root
/// [`FunctionBlock`] built from every statement that parsed plus the ordered error list;
/// check [`ParseResult::has_errors`] before handing the tree to the instruction
/// generator.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `mova_syntax::lexer::tokenize`.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> ParseResult {
    if tokens.is_empty() {
        // `tokenize` always ends the stream with Eof; an empty slice can only come from
        // a caller bypassing the lexer. Treat it as an empty program.
        return ParseResult {
            program: FunctionBlock::default(),
            errors: Vec::new(),
        };
    }
    Parser::new(tokens).parse()
}
