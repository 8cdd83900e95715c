//! Lexer for the Mova language.
//!
//! Handles tokenization including:
//! - Keywords, motion verbs, and data-type keywords (upper-case, registry-backed)
//! - Identifiers and literals (int, float, `'...'` strings)
//! - Operators and punctuation (`:=`, `<>`, `<=`, `->`, braces, ...)
//! - `;` comments (to end of line) and `&` line continuations
//!
//! ## Notes
//! - Tokenization is **total**: malformed input becomes `Invalid` tokens that the parser
//!   reports when it consumes them. [`tokenize`] therefore returns a plain `Vec<Token>`.
//! - The language is line-oriented: one `Newline` token separates logical lines; blank
//!   lines, comment-only lines, and `&`-continued lines produce no separator.

pub mod tokens;

pub use tokens::{word_token, Token, TokenKind};

use std::iter::Peekable;
use std::str::Chars;

use crate::ast::{SourcePos, Span};
use mova_core::lang::operators::OperatorId;
use mova_core::lang::punctuation::PunctuationId;

/// Lexer state: a char cursor plus the 1-based position of the next character.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: u32,
    column: u32,
    /// Delimiter depth for implicit line continuation (parens and braces).
    bracket_depth: usize,
    tokens: Vec<Token>,
}

/// Tokenize Mova source text.
///
/// The returned stream always ends with an `Eof` token. Invalid character sequences are
/// represented as `Invalid` tokens rather than errors.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).run()
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
            bracket_depth: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while self.peek().is_some() {
            self.scan_token();
        }
        let end = self.pos();
        self.tokens.push(Token::new(TokenKind::Eof, Span::at(end)));
        self.tokens
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn pos(&self) -> SourcePos {
        SourcePos::new(self.line, self.column)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume the next char if it equals `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn push(&mut self, kind: TokenKind, start: SourcePos) {
        let end = self.pos();
        self.tokens.push(Token::new(kind, Span::new(start, end)));
    }

    fn push_op(&mut self, id: OperatorId, start: SourcePos) {
        self.push(TokenKind::Operator(id), start);
    }

    fn push_punct(&mut self, id: PunctuationId, start: SourcePos) {
        self.push(TokenKind::Punctuation(id), start);
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.pos();
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            ' ' | '\t' | '\r' => {}

            // Comments run to end of line; the newline itself is handled normally.
            ';' => {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            }

            // Line continuation: swallow trailing whitespace and the newline so the
            // logical line keeps going.
            '&' => {
                while let Some(c) = self.peek() {
                    self.advance();
                    if c == '\n' {
                        break;
                    }
                    if c != ' ' && c != '\t' && c != '\r' {
                        self.push(TokenKind::Invalid("&".into()), start);
                        break;
                    }
                }
            }

            '\n' => self.emit_newline(start),

            '\'' => self.scan_string(start),

            '(' | '{' => {
                self.bracket_depth += 1;
                self.push_punct(
                    if c == '(' { PunctuationId::LParen } else { PunctuationId::LBrace },
                    start,
                );
            }
            ')' | '}' => {
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
                self.push_punct(
                    if c == ')' { PunctuationId::RParen } else { PunctuationId::RBrace },
                    start,
                );
            }
            ',' => self.push_punct(PunctuationId::Comma, start),
            '.' => self.push_punct(PunctuationId::Dot, start),

            '+' => self.push_op(OperatorId::Plus, start),
            '*' => self.push_op(OperatorId::Star, start),
            '/' => self.push_op(OperatorId::Slash, start),

            '-' => {
                if self.eat('>') {
                    self.push_punct(PunctuationId::Arrow, start);
                } else {
                    self.push_op(OperatorId::Minus, start);
                }
            }

            ':' => {
                if self.eat('=') {
                    self.push_op(OperatorId::Assign, start);
                } else {
                    self.push(TokenKind::Invalid(":".into()), start);
                }
            }

            '=' => {
                if self.eat('=') {
                    self.push_op(OperatorId::EqEq, start);
                } else {
                    self.push_op(OperatorId::Eq, start);
                }
            }

            '<' => {
                if self.eat('=') {
                    self.push_op(OperatorId::LtEq, start);
                } else if self.eat('>') {
                    self.push_op(OperatorId::NotEq, start);
                } else {
                    self.push_op(OperatorId::Lt, start);
                }
            }

            '>' => {
                if self.eat('=') {
                    self.push_op(OperatorId::GtEq, start);
                } else {
                    self.push_op(OperatorId::Gt, start);
                }
            }

            c if c.is_ascii_digit() => self.scan_number(c, start),
            c if c.is_ascii_alphabetic() || c == '_' => self.scan_word(c, start),

            other => self.push(TokenKind::Invalid(other.to_string()), start),
        }
    }

    /// Emit a `Newline` separator unless the line was empty (start of file, blank line,
    /// or comment-only line) or we are inside brackets (implicit continuation, so a
    /// declaration body can span multiple lines).
    fn emit_newline(&mut self, start: SourcePos) {
        if self.bracket_depth > 0 {
            return;
        }
        match self.tokens.last() {
            None => {}
            Some(t) if t.kind == TokenKind::Newline => {}
            _ => self.push(TokenKind::Newline, start),
        }
    }

    // ========================================================================
    // Literals and words
    // ========================================================================

    fn scan_number(&mut self, first: char, start: SourcePos) {
        let mut text = String::from(first);
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        // A '.' is part of the number only when a digit follows; otherwise it is left
        // for the member-access punctuation.
        let mut is_float = false;
        if self.peek() == Some('.') {
            let mut lookahead = self.chars.clone();
            lookahead.next();
            if lookahead.peek().is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                text.push('.');
                self.advance();
                while let Some(c) = self.peek() {
                    if c.is_ascii_digit() {
                        text.push(c);
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
        }

        let kind = if is_float {
            match text.parse::<f64>() {
                Ok(v) => TokenKind::Float(v),
                Err(_) => TokenKind::Invalid(text),
            }
        } else {
            match text.parse::<i64>() {
                Ok(v) => TokenKind::Int(v),
                Err(_) => TokenKind::Invalid(text),
            }
        };
        self.push(kind, start);
    }

    fn scan_string(&mut self, start: SourcePos) {
        let mut text = String::new();
        loop {
            match self.peek() {
                Some('\'') => {
                    self.advance();
                    self.push(TokenKind::Str(text), start);
                    return;
                }
                Some('\n') | None => {
                    // Unterminated literal: surface the consumed text for diagnostics.
                    self.push(TokenKind::Invalid(format!("'{text}")), start);
                    return;
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
    }

    fn scan_word(&mut self, first: char, start: SourcePos) {
        let mut text = String::from(first);
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = word_token(&text).unwrap_or(TokenKind::Ident(text));
        self.push(kind, start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mova_core::lang::keywords::KeywordId;
    use mova_core::lang::motion::MotionId;
    use mova_core::lang::types::TypeId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keywords_motions_types_dispatch() {
        assert_eq!(
            kinds("DECL POS P1"),
            vec![
                TokenKind::Keyword(KeywordId::Decl),
                TokenKind::TypeName(TypeId::Pos),
                TokenKind::Ident("P1".into()),
                TokenKind::Eof,
            ]
        );
        assert_eq!(kinds("PTP_REL")[0], TokenKind::Motion(MotionId::PtpRel));
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("X := 1 <> 2 <= 3"),
            vec![
                TokenKind::Ident("X".into()),
                TokenKind::Operator(OperatorId::Assign),
                TokenKind::Int(1),
                TokenKind::Operator(OperatorId::NotEq),
                TokenKind::Int(2),
                TokenKind::Operator(OperatorId::LtEq),
                TokenKind::Int(3),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_float_vs_member_dot() {
        assert_eq!(kinds("2.5")[0], TokenKind::Float(2.5));
        assert_eq!(
            kinds("P1.X"),
            vec![
                TokenKind::Ident("P1".into()),
                TokenKind::Punctuation(PunctuationId::Dot),
                TokenKind::Ident("X".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comment_and_blank_lines_emit_no_separator() {
        assert_eq!(
            kinds("; header comment\n\nWAIT 1\n"),
            vec![
                TokenKind::Keyword(KeywordId::Wait),
                TokenKind::Int(1),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_line_continuation() {
        assert_eq!(
            kinds("WAIT &\n2"),
            vec![TokenKind::Keyword(KeywordId::Wait), TokenKind::Int(2), TokenKind::Eof]
        );
    }

    #[test]
    fn test_invalid_input_is_total() {
        let toks = tokenize("WAIT ? 1");
        assert_eq!(toks[1].kind, TokenKind::Invalid("?".into()));
        assert_eq!(toks.last().map(|t| t.kind.clone()), Some(TokenKind::Eof));
    }

    #[test]
    fn test_unterminated_string() {
        let toks = tokenize("'HOME");
        assert!(matches!(&toks[0].kind, TokenKind::Invalid(s) if s.starts_with('\'')));
    }

    #[test]
    fn test_positions_are_one_based() {
        let toks = tokenize("WAIT 2.5");
        assert_eq!(toks[0].span.start, SourcePos::new(1, 1));
        assert_eq!(toks[1].span.start, SourcePos::new(1, 6));
    }

    #[test]
    fn test_lowercase_words_are_identifiers() {
        assert_eq!(kinds("wait")[0], TokenKind::Ident("wait".into()));
    }
}
