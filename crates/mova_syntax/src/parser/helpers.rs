/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`, `previous`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Error recording (`error_here`, `error_at_previous`)
/// - Error recovery (`synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &Token {
        if self.pos + 1 < self.tokens.len() {
            &self.tokens[self.pos + 1]
        } else {
            &self.tokens[self.tokens.len() - 1]
        }
    }

    /// Return the most recently consumed token.
    fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1).min(self.tokens.len() - 1)]
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous()
    }

    /// Start position of the current token.
    fn peek_pos(&self) -> SourcePos {
        self.peek().span.start
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        matches!(&self.peek().kind, TokenKind::Keyword(k) if *k == id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        matches!(&self.peek().kind, TokenKind::Operator(o) if *o == id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        matches!(&self.peek().kind, TokenKind::Punctuation(p) if *p == id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the expected keyword or record an error and return `None`.
    fn expect_keyword(&mut self, id: KeywordId, msg: &str) -> Option<()> {
        if self.match_keyword(id) {
            Some(())
        } else {
            self.error_here(format!("{}, found {:?}", msg, self.peek().kind));
            None
        }
    }

    fn expect_op(&mut self, id: OperatorId, msg: &str) -> Option<()> {
        if self.match_op(id) {
            Some(())
        } else {
            self.error_here(format!("{}, found {:?}", msg, self.peek().kind));
            None
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> Option<()> {
        if self.match_punct(id) {
            Some(())
        } else {
            self.error_here(format!("{}, found {:?}", msg, self.peek().kind));
            None
        }
    }

    /// Consume an identifier or record `msg` as an error and return `None`.
    fn expect_ident(&mut self, msg: &str) -> Option<(Ident, SourcePos)> {
        let pos = self.peek_pos();
        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            self.advance();
            Some((name, pos))
        } else {
            self.error_here(msg.to_string());
            None
        }
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek().kind, TokenKind::Newline) {
            self.advance();
        }
    }

    /// Require the current statement to end here (newline or end of file).
    fn end_of_statement(&mut self) -> bool {
        if self.is_at_end() {
            return true;
        }
        if matches!(self.peek().kind, TokenKind::Newline) {
            self.advance();
            return true;
        }
        self.error_here(format!(
            "Expected end of line after statement, found {:?}",
            self.peek().kind
        ));
        false
    }

    /// Skip to the start of the next logical line.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if matches!(self.peek().kind, TokenKind::Newline) {
                self.advance();
                return;
            }
            self.advance();
        }
    }

    // ========================================================================
    // Error recording
    // ========================================================================

    fn error_at(&mut self, pos: SourcePos, message: impl Into<String>) {
        self.errors.push(SyntaxError::syntax(message, pos));
    }

    /// Record an error at the current token's position.
    fn error_here(&mut self, message: impl Into<String>) {
        let pos = self.peek_pos();
        self.error_at(pos, message);
    }

    /// Record an error at the last consumed token's position.
    ///
    /// Used where the problem is something *missing* after that token (separators,
    /// closing braces), so the location points at known-good input.
    fn error_at_previous(&mut self, message: impl Into<String>) {
        let pos = self.previous().span.start;
        self.error_at(pos, message);
    }
}
