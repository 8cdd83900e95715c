/// Statement parsing methods.
///
/// This chunk dispatches on the leading token of a logical line and parses every
/// statement form: control flow (`IF`/`FOR`/`WHILE`/`REPEAT`/`SWITCH`), motion commands,
/// timing (`WAIT`/`DELAY`), digital I/O (`IN`/`OUT`), assignments, and terminal
/// statements (`HALT`/`RETURN`).
///
/// ## Notes
/// - Blocks are newline-separated statement lists ended by their closing keyword
///   (`ENDIF`, `ENDFOR`, ...); the closer is checked but consumed by the construct that
///   owns it.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self) -> Option<Statement> {
        let start = self.peek_pos();

        // Owned copy so the dispatch below can freely take `&mut self`.
        let kind = self.peek().kind.clone();
        match kind {
            TokenKind::Keyword(KeywordId::Def) => self.function_decl(),
            TokenKind::Keyword(KeywordId::Decl) => {
                self.advance();
                self.declaration(start)
            }
            TokenKind::TypeName(_) => self.declaration(start),
            TokenKind::Motion(verb) => self.motion_command(verb, start),
            TokenKind::Keyword(KeywordId::If) => self.if_statement(start),
            TokenKind::Keyword(KeywordId::For) => self.for_statement(start),
            TokenKind::Keyword(KeywordId::While) => self.while_statement(start),
            TokenKind::Keyword(KeywordId::Repeat) => self.repeat_statement(start),
            TokenKind::Keyword(KeywordId::Switch) => self.switch_statement(start),
            TokenKind::Keyword(KeywordId::Wait) => {
                self.advance();
                let duration = self.expression()?;
                Some(Statement::Wait(WaitStmt {
                    duration,
                    positions: vec![start],
                }))
            }
            TokenKind::Keyword(KeywordId::Delay) => {
                self.advance();
                let duration = self.expression()?;
                Some(Statement::Delay(DelayStmt {
                    duration,
                    positions: vec![start],
                }))
            }
            TokenKind::Keyword(KeywordId::In) => self.io_statement(IoDirection::In, start),
            TokenKind::Keyword(KeywordId::Out) => self.io_statement(IoDirection::Out, start),
            TokenKind::Keyword(KeywordId::Halt) => {
                self.advance();
                Some(Statement::Halt(HaltStmt { positions: vec![start] }))
            }
            TokenKind::Keyword(KeywordId::Return) => {
                self.advance();
                Some(Statement::Return(ReturnStmt { positions: vec![start] }))
            }
            TokenKind::Keyword(KeywordId::Goto) => {
                self.advance();
                self.error_at(start, "GOTO is reserved and not supported");
                None
            }
            TokenKind::Ident(_) => self.assignment_statement(start),
            TokenKind::Invalid(lexeme) => {
                self.advance();
                self.errors
                    .push(SyntaxError::lexical(format!("Invalid input '{lexeme}'"), start));
                None
            }
            other => {
                self.error_at(start, format!("Expected statement, found {other:?}"));
                None
            }
        }
    }

    /// Newline-separated statement list ended by one of `closers` (not consumed).
    fn block(&mut self, closers: &[KeywordId], context: &str) -> Option<Vec<Statement>> {
        let mut statements = Vec::new();
        self.skip_newlines();

        loop {
            if self.is_at_end() {
                self.error_at_previous(format!("Expected {context} before end of file"));
                return None;
            }
            if let TokenKind::Keyword(k) = &self.peek().kind {
                if closers.contains(k) {
                    return Some(statements);
                }
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
                    if self.pos == before {
                        self.advance();
                    }
                    self.synchronize();
                }
            }
            self.skip_newlines();
        }
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    fn if_statement(&mut self, start: SourcePos) -> Option<Statement> {
        self.advance(); // IF
        let condition = self.expression()?;
        self.expect_keyword(KeywordId::Then, "Expected THEN after IF condition")?;

        let then_body = self.block(&[KeywordId::Else, KeywordId::Endif], "ENDIF")?;
        let else_body = if self.match_keyword(KeywordId::Else) {
            Some(self.block(&[KeywordId::Endif], "ENDIF")?)
        } else {
            None
        };
        self.expect_keyword(KeywordId::Endif, "Expected ENDIF to close IF")?;

        Some(Statement::If(IfStmt {
            condition,
            then_body,
            else_body,
            positions: vec![start],
        }))
    }

    fn for_statement(&mut self, start: SourcePos) -> Option<Statement> {
        self.advance(); // FOR
        let (var, _) = self.expect_ident("Expected loop variable after FOR")?;
        self.expect_op(OperatorId::Assign, "Expected ':=' after FOR variable")?;
        let from = self.expression()?;
        self.expect_keyword(KeywordId::To, "Expected TO in FOR bounds")?;
        let to = self.expression()?;
        let step = if self.match_keyword(KeywordId::Step) {
            Some(self.expression()?)
        } else {
            None
        };

        let body = self.block(&[KeywordId::Endfor], "ENDFOR")?;
        self.expect_keyword(KeywordId::Endfor, "Expected ENDFOR to close FOR")?;

        Some(Statement::For(ForStmt {
            var,
            from,
            to,
            step,
            body,
            positions: vec![start],
        }))
    }

    fn while_statement(&mut self, start: SourcePos) -> Option<Statement> {
        self.advance(); // WHILE
        let condition = self.expression()?;

        let body = self.block(&[KeywordId::Endwhile], "ENDWHILE")?;
        self.expect_keyword(KeywordId::Endwhile, "Expected ENDWHILE to close WHILE")?;

        Some(Statement::While(WhileStmt {
            condition,
            body,
            positions: vec![start],
        }))
    }

    fn repeat_statement(&mut self, start: SourcePos) -> Option<Statement> {
        self.advance(); // REPEAT

        let body = self.block(&[KeywordId::Until], "UNTIL")?;
        self.expect_keyword(KeywordId::Until, "Expected UNTIL to close REPEAT")?;
        let until = self.expression()?;

        Some(Statement::Repeat(RepeatStmt {
            body,
            until,
            positions: vec![start],
        }))
    }

    fn switch_statement(&mut self, start: SourcePos) -> Option<Statement> {
        self.advance(); // SWITCH
        let selector = self.expression()?;
        if !self.end_of_statement() {
            return None;
        }
        self.skip_newlines();

        let mut cases = Vec::new();
        while self.match_keyword(KeywordId::Case) {
            let value = self.expression()?;
            let body = self.block(
                &[KeywordId::Case, KeywordId::Default, KeywordId::Endswitch],
                "ENDSWITCH",
            )?;
            cases.push(CaseArm { value, body });
        }

        if cases.is_empty() && !self.check_keyword(KeywordId::Default) {
            self.error_here("Expected CASE after SWITCH selector");
            return None;
        }

        let default = if self.match_keyword(KeywordId::Default) {
            Some(self.block(&[KeywordId::Endswitch], "ENDSWITCH")?)
        } else {
            None
        };
        self.expect_keyword(KeywordId::Endswitch, "Expected ENDSWITCH to close SWITCH")?;

        Some(Statement::Switch(SwitchStmt {
            selector,
            cases,
            default,
            positions: vec![start],
        }))
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// `PTP P1` / `LIN P2 {VEL 50, ACC 20}`.
    fn motion_command(&mut self, verb: MotionId, start: SourcePos) -> Option<Statement> {
        self.advance(); // the verb
        let label = motion::as_str(verb);
        let (target, _) = self.expect_ident(&format!("Expected target name after {label}"))?;

        let mut positions = vec![start];
        let args = if self.match_punct(PunctuationId::LBrace) {
            self.component_pairs(label, "{VEL, ACC, APO}", false, &mut positions)?
        } else {
            Vec::new()
        };

        Some(Statement::Motion(MotionCmd {
            verb,
            target,
            args,
            positions,
        }))
    }

    /// `OUT channel value` / `IN channel TARGET`.
    fn io_statement(&mut self, direction: IoDirection, start: SourcePos) -> Option<Statement> {
        self.advance(); // IN / OUT
        let channel = self.expression()?;

        let (value, into) = match direction {
            IoDirection::Out => (Some(self.expression()?), None),
            IoDirection::In => {
                let (name, _) = self.expect_ident("Expected target variable after IN channel")?;
                (None, Some(name))
            }
        };

        Some(Statement::Io(IoStmt {
            direction,
            channel,
            value,
            into,
            positions: vec![start],
        }))
    }

    /// `X := expr` or the inline coordinate override `P1.X := expr`.
    fn assignment_statement(&mut self, start: SourcePos) -> Option<Statement> {
        let (name, _) = self.expect_ident("Expected identifier")?;

        if self.match_punct(PunctuationId::Dot) {
            let (component, _) = self.expect_ident("Expected component name after '.'")?;
            self.expect_op(OperatorId::Assign, "Expected ':=' after component access")?;
            let value = self.expression()?;
            return Some(Statement::MemberAssign(MemberAssignStmt {
                entity: name,
                component,
                value,
                positions: vec![start],
            }));
        }

        self.expect_op(OperatorId::Assign, &format!("Expected ':=' after '{name}'"))?;
        let value = self.expression()?;
        Some(Statement::Assignment(AssignStmt {
            name,
            value,
            positions: vec![start],
        }))
    }
}
