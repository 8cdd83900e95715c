/// Expression parsing methods.
///
/// This chunk implements the expression grammar as a precedence ladder:
/// `or` → `and` → equality (`==`, `<>`) → comparison (`<`, `>`, `<=`, `>=`) →
/// additive (`+`, `-`) → multiplicative (`*`, `/`) → unary (`-`, `NOT`) → primary.
///
/// ## Notes
/// - Every binary level is left-associative: the loop folds operands into a
///   left-leaning tree as it consumes same-precedence operators.
/// - All helpers return `Option<Spanned<Expr>>`; `None` means the diagnostic was
///   already recorded.
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> Option<Spanned<Expr>> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> Option<Spanned<Expr>> {
        let mut left = self.and_expr()?;
        while self.match_keyword(KeywordId::Or) {
            let right = self.and_expr()?;
            let span = left.span.merge(right.span);
            left = Spanned::new(Expr::Binary(Box::new(left), BinaryOp::Or, Box::new(right)), span);
        }
        Some(left)
    }

    fn and_expr(&mut self) -> Option<Spanned<Expr>> {
        let mut left = self.equality()?;
        while self.match_keyword(KeywordId::And) {
            let right = self.equality()?;
            let span = left.span.merge(right.span);
            left = Spanned::new(Expr::Binary(Box::new(left), BinaryOp::And, Box::new(right)), span);
        }
        Some(left)
    }

    fn equality(&mut self) -> Option<Spanned<Expr>> {
        let mut left = self.comparison()?;
        loop {
            let op = if self.match_op(OperatorId::EqEq) {
                BinaryOp::Eq
            } else if self.match_op(OperatorId::NotEq) {
                BinaryOp::NotEq
            } else {
                break;
            };
            let right = self.comparison()?;
            let span = left.span.merge(right.span);
            left = Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), span);
        }
        Some(left)
    }

    fn comparison(&mut self) -> Option<Spanned<Expr>> {
        let mut left = self.additive()?;
        loop {
            let op = if self.match_op(OperatorId::LtEq) {
                BinaryOp::LtEq
            } else if self.match_op(OperatorId::GtEq) {
                BinaryOp::GtEq
            } else if self.match_op(OperatorId::Lt) {
                BinaryOp::Lt
            } else if self.match_op(OperatorId::Gt) {
                BinaryOp::Gt
            } else {
                break;
            };
            let right = self.additive()?;
            let span = left.span.merge(right.span);
            left = Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), span);
        }
        Some(left)
    }

    fn additive(&mut self) -> Option<Spanned<Expr>> {
        let mut left = self.multiplicative()?;
        loop {
            let op = if self.match_op(OperatorId::Plus) {
                BinaryOp::Add
            } else if self.match_op(OperatorId::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let right = self.multiplicative()?;
            let span = left.span.merge(right.span);
            left = Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), span);
        }
        Some(left)
    }

    fn multiplicative(&mut self) -> Option<Spanned<Expr>> {
        let mut left = self.unary()?;
        loop {
            let op = if self.match_op(OperatorId::Star) {
                BinaryOp::Mul
            } else if self.match_op(OperatorId::Slash) {
                BinaryOp::Div
            } else {
                break;
            };
            let right = self.unary()?;
            let span = left.span.merge(right.span);
            left = Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), span);
        }
        Some(left)
    }

    fn unary(&mut self) -> Option<Spanned<Expr>> {
        let start = self.peek_pos();
        if self.match_op(OperatorId::Minus) {
            let operand = self.unary()?;
            let span = Span::new(start, operand.span.end);
            return Some(Spanned::new(Expr::Unary(UnaryOp::Neg, Box::new(operand)), span));
        }
        if self.match_keyword(KeywordId::Not) {
            let operand = self.unary()?;
            let span = Span::new(start, operand.span.end);
            return Some(Spanned::new(Expr::Unary(UnaryOp::Not, Box::new(operand)), span));
        }
        self.primary()
    }

    fn primary(&mut self) -> Option<Spanned<Expr>> {
        let span = self.peek().span;
        let kind = self.peek().kind.clone();

        match kind {
            TokenKind::Int(v) => {
                self.advance();
                Some(Spanned::new(Expr::Literal(Value::Int(v)), span))
            }
            TokenKind::Float(v) => {
                self.advance();
                Some(Spanned::new(Expr::Literal(Value::Real(v)), span))
            }
            TokenKind::Str(s) => {
                self.advance();
                Some(Spanned::new(Expr::Literal(Value::Str(s)), span))
            }
            TokenKind::Keyword(KeywordId::True) => {
                self.advance();
                Some(Spanned::new(Expr::Literal(Value::Bool(true)), span))
            }
            TokenKind::Keyword(KeywordId::False) => {
                self.advance();
                Some(Spanned::new(Expr::Literal(Value::Bool(false)), span))
            }
            TokenKind::Keyword(KeywordId::Pi) => {
                self.advance();
                Some(Spanned::new(Expr::Literal(Value::Real(std::f64::consts::PI)), span))
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.match_punct(PunctuationId::Dot) {
                    let (component, _) = self.expect_ident("Expected component name after '.'")?;
                    let end = self.previous().span.end;
                    return Some(Spanned::new(
                        Expr::Member(name, component),
                        Span::new(span.start, end),
                    ));
                }
                Some(Spanned::new(Expr::Variable(name), span))
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let inner = self.expression()?;
                self.expect_punct(PunctuationId::RParen, "Expected ')' after expression")?;
                let end = self.previous().span.end;
                Some(Spanned::new(inner.node, Span::new(span.start, end)))
            }
            TokenKind::Invalid(lexeme) => {
                self.advance();
                self.errors
                    .push(SyntaxError::lexical(format!("Invalid input '{lexeme}'"), span.start));
                None
            }
            other => {
                self.error_here(format!("Expected an expression, found {other:?}"));
                None
            }
        }
    }
}
