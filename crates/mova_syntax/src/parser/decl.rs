/// Declaration parsing.
///
/// This chunk parses the `DEF name()` program header, scalar variable declarations, and
/// the coordinate-entity declarations (`POS`/`FRAME`/`AXIS`/`E6POS`/`E6AXIS`).
///
/// ## Notes
/// - All five entity forms share one routine, `entity_decl`, parametrized by a
///   [`DeclPolicy`] value. The only behavioral difference between them is the
///   component-name validation policy: Position/Frame abort the declaration on an
///   invalid component name (fatal), Axis records the error and keeps scanning the
///   rest of the body (lenient).

/// Per-kind configuration for the shared entity-declaration routine.
#[derive(Debug, Clone, Copy)]
struct DeclPolicy {
    kind: EntityKind,
    /// The spelling the user wrote (`POS`, `E6POS`, ...), echoed in diagnostics.
    label: &'static str,
    /// Component-name hint shown when an invalid name is found.
    hint: &'static str,
    /// `true`: an invalid component name is recorded and skipped. `false`: it aborts
    /// the whole declaration.
    lenient: bool,
}

fn decl_policy(ty: TypeId) -> DeclPolicy {
    let label = types::as_str(ty);
    match ty {
        TypeId::Pos | TypeId::E6Pos => DeclPolicy {
            kind: EntityKind::Position,
            label,
            hint: "{X, Y, Z, A, B, C}",
            lenient: false,
        },
        TypeId::Frame => DeclPolicy {
            kind: EntityKind::Frame,
            label,
            hint: "{X, Y, Z, A, B, C}",
            lenient: false,
        },
        TypeId::Axis | TypeId::E6Axis => DeclPolicy {
            kind: EntityKind::Axis,
            label,
            hint: "{A1, A2, A3, A4, A5, A6}",
            lenient: true,
        },
        // Scalars never reach entity_decl; `declaration` routes them to var_decl.
        _ => unreachable!("scalar type {label} has no entity policy"),
    }
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Declarations
    // ========================================================================

    /// `DEF name()`: the program header.
    fn function_decl(&mut self) -> Option<Statement> {
        let start = self.peek_pos();
        self.advance(); // DEF
        let (name, _) = self.expect_ident("Expected program name after DEF")?;
        self.expect_punct(PunctuationId::LParen, "Expected '(' after program name")?;
        self.expect_punct(PunctuationId::RParen, "Expected ')' after '('")?;
        self.def_depth += 1;
        Some(Statement::Function(FunctionDecl {
            name,
            positions: vec![start],
        }))
    }

    /// Dispatch a declaration after the optional `DECL` keyword.
    fn declaration(&mut self, start: SourcePos) -> Option<Statement> {
        let ty = match &self.peek().kind {
            TokenKind::TypeName(ty) => {
                let ty = *ty;
                self.advance();
                ty
            }
            other => {
                self.error_here(format!("Expected a data type after DECL, found {other:?}"));
                return None;
            }
        };

        if types::info_for(ty).aggregate {
            self.entity_decl(ty, start)
        } else {
            self.var_decl(ty, start)
        }
    }

    /// `INT X` / `REAL V := 1.5`: scalar declaration with optional initializer.
    fn var_decl(&mut self, ty: TypeId, start: SourcePos) -> Option<Statement> {
        let (name, _) = self.expect_ident(&format!("Expected variable name after {}", types::as_str(ty)))?;
        let initializer = if self.match_op(OperatorId::Assign) {
            Some(self.expression()?)
        } else {
            None
        };
        Some(Statement::VarDecl(VarDecl {
            ty,
            name,
            initializer,
            positions: vec![start],
        }))
    }

    /// Shared routine for the five coordinate-entity declarations.
    fn entity_decl(&mut self, ty: TypeId, start: SourcePos) -> Option<Statement> {
        let policy = decl_policy(ty);
        let mut positions = vec![start];

        let Some((name, _)) = self.expect_ident(&format!("Expected {} name", policy.label)) else {
            return None;
        };
        self.expect_op(OperatorId::Eq, &format!("Expected '=' after {} name", policy.label))?;
        self.expect_punct(
            PunctuationId::LBrace,
            &format!("Expected '{{' after {} assignment", policy.label),
        )?;

        let components = self.component_pairs(policy.label, policy.hint, policy.lenient, &mut positions)?;

        Some(Statement::EntityDecl(EntityDecl {
            kind: policy.kind,
            ty,
            name,
            components,
            positions,
        }))
    }

    /// Parse `NAME expr ("," NAME expr)* "}"`: the body shared by entity declarations
    /// and motion-command argument blocks. The opening `{` has already been consumed.
    ///
    /// Records one [`SourcePos`] per source line the body touches, so multi-line
    /// declarations keep a position for every contributing line.
    fn component_pairs(
        &mut self,
        label: &str,
        hint: &str,
        lenient: bool,
        positions: &mut Vec<SourcePos>,
    ) -> Option<Vec<(Ident, Spanned<Expr>)>> {
        let mut components = Vec::new();

        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            let name_pos = self.peek_pos();
            if positions.last().map(|p| p.line) != Some(name_pos.line) {
                positions.push(name_pos);
            }

            let name = match &self.peek().kind {
                TokenKind::Ident(name) => {
                    let name = name.clone();
                    self.advance();
                    Some(name)
                }
                other => {
                    self.error_at(
                        name_pos,
                        format!("Expected component name {hint} in {label}, found {other:?}"),
                    );
                    if !lenient {
                        return None;
                    }
                    // Lenient: skip the offending token, still parse the value so the
                    // scan stays aligned, and drop the pair.
                    self.advance();
                    None
                }
            };

            let value = self.expression()?;
            if let Some(name) = name {
                components.push((name, value));
            }

            if !self.match_punct(PunctuationId::Comma) && !self.check_punct(PunctuationId::RBrace) {
                self.error_at_previous(format!("Expected ',' or '}}' in {label} components"));
                return None;
            }
        }

        if !self.match_punct(PunctuationId::RBrace) {
            self.error_at_previous(format!("Expected '}}' after {label} components"));
            return None;
        }

        Some(components)
    }
}
