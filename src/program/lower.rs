//! AST → instruction lowering.
//!
//! [`InstructionGen`] walks a validated tree, registers declarations in the
//! [`DeclTable`], resolves every argument expression to a concrete [`Value`] (literal
//! folding plus lookups against the table), and emits one [`Instruction`] per
//! executable statement.
//!
//! # Lowering strategy
//!
//! Structured control flow becomes explicit jump/label records in the flat stream:
//! `LABEL {id}`, `JMP {label}`, `JMPF {cond, label}` (jump when the condition is
//! false). Because instruction arguments are fully resolved values, loop bodies cannot
//! be re-evaluated at run time; `FOR`/`WHILE`/`REPEAT` are therefore expanded at
//! generation time with the loop variable tracked in the table, bounded by
//! [`LOOP_ITERATION_CAP`]. `IF`/`SWITCH` emit constant-folded `JMPF`/`JMP` records the
//! executor acts on.
//!
//! # Failure policy
//!
//! An unresolved reference never defaults to zero. The generator records a [`GenError`],
//! skips the offending instruction, and keeps going, so one pass reports every
//! resolution failure; callers get either the complete program or the complete error
//! list.

use mova_core::lang::motion;
use mova_core::lang::types::{self, TypeId};
use mova_core::value::{self, BinOp, UnOp, Value};
use mova_syntax::ast::{
    AssignStmt, BinaryOp, EntityDecl, Expr, ForStmt, FunctionBlock, IfStmt, IoDirection, IoStmt,
    MemberAssignStmt, MotionCmd, RepeatStmt, SourcePos, Spanned, Statement, SwitchStmt, UnaryOp,
    VarDecl, WhileStmt,
};

use super::{DeclTable, GenError, GenErrors, Instruction, InstructionProgram, Symbol};

/// Upper bound on generation-time loop expansion. A program that exceeds it is
/// rejected with a generation error instead of hanging the compiler.
pub const LOOP_ITERATION_CAP: u64 = 65_536;

/// Generate the instruction program for a parsed tree.
///
/// ## Errors
/// Returns [`GenErrors`] with every resolution failure found in one pass. Callers must
/// not execute a program whose generation reported errors (they never receive one).
#[tracing::instrument(skip_all, fields(statement_count = program.statements.len()))]
pub fn generate(program: &FunctionBlock) -> Result<InstructionProgram, GenErrors> {
    InstructionGen::new().run(program)
}

/// Lowering context: the declaration table, the growing instruction stream, and the
/// collected errors.
pub struct InstructionGen {
    table: DeclTable,
    instructions: Vec<Instruction>,
    errors: Vec<GenError>,
    name: Option<String>,
    next_label: i64,
    loop_budget: u64,
}

impl InstructionGen {
    pub fn new() -> Self {
        Self {
            table: DeclTable::new(),
            instructions: Vec::new(),
            errors: Vec::new(),
            name: None,
            next_label: 0,
            loop_budget: 0,
        }
    }

    fn run(mut self, program: &FunctionBlock) -> Result<InstructionProgram, GenErrors> {
        for stmt in &program.statements {
            self.lower_statement(stmt);
        }

        if self.errors.is_empty() {
            Ok(InstructionProgram {
                name: self.name,
                instructions: self.instructions,
                declarations: self.table,
            })
        } else {
            Err(GenErrors(self.errors))
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn lower_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Function(f) => {
                if self.name.is_some() {
                    self.error(&f.positions, "multiple DEF headers in one program");
                } else {
                    self.name = Some(f.name.clone());
                }
            }
            Statement::VarDecl(d) => self.lower_var_decl(d),
            Statement::EntityDecl(d) => self.lower_entity_decl(d),
            Statement::Motion(m) => self.lower_motion(m),
            Statement::If(s) => self.lower_if(s),
            Statement::For(s) => self.lower_for(s),
            Statement::While(s) => self.lower_while(s),
            Statement::Repeat(s) => self.lower_repeat(s),
            Statement::Switch(s) => self.lower_switch(s),
            Statement::Assignment(s) => self.lower_assignment(s),
            Statement::MemberAssign(s) => self.lower_member_assign(s),
            Statement::Wait(s) => self.lower_duration("WAIT", &s.duration, &s.positions),
            Statement::Delay(s) => self.lower_duration("DELAY", &s.duration, &s.positions),
            Statement::Io(s) => self.lower_io(s),
            Statement::Halt(s) => self.emit(Instruction::new("HALT", s.positions.clone())),
            Statement::Return(s) => self.emit(Instruction::new("RET", s.positions.clone())),
        }
    }

    // ========================================================================
    // Declarations (table only, no instructions)
    // ========================================================================

    fn lower_var_decl(&mut self, decl: &VarDecl) {
        if self.table.contains(&decl.name) {
            self.error(&decl.positions, format!("'{}' is already declared", decl.name));
            return;
        }

        let mut value = None;
        if let Some(init) = &decl.initializer {
            let Some(v) = self.resolve(init) else { return };
            match v.coerce_to(decl.ty) {
                Some(stored) => value = Some(stored),
                None => {
                    self.error(
                        &decl.positions,
                        format!(
                            "cannot initialize {} variable '{}' with a {} value",
                            types::as_str(decl.ty),
                            decl.name,
                            v.type_name()
                        ),
                    );
                    return;
                }
            }
        }

        self.table.insert(
            decl.name.clone(),
            Symbol::Variable {
                ty: decl.ty,
                value,
                runtime: false,
            },
        );
    }

    fn lower_entity_decl(&mut self, decl: &EntityDecl) {
        if self.table.contains(&decl.name) {
            self.error(&decl.positions, format!("'{}' is already declared", decl.name));
            return;
        }

        let mut components: Vec<(String, Value)> = Vec::new();
        for (component, expr) in &decl.components {
            let Some(v) = self.resolve(expr) else { continue };
            if v.as_real().is_none() {
                self.expr_error(
                    expr,
                    format!(
                        "component '{component}' of {} '{}' must be numeric, got {}",
                        types::as_str(decl.ty),
                        decl.name,
                        v.type_name()
                    ),
                );
                continue;
            }
            upsert(&mut components, component, v);
        }

        self.table.insert(
            decl.name.clone(),
            Symbol::Entity {
                kind: decl.kind,
                ty: decl.ty,
                components,
            },
        );
    }

    // ========================================================================
    // Commands
    // ========================================================================

    fn lower_motion(&mut self, cmd: &MotionCmd) {
        let components = match self.table.get(&cmd.target) {
            Some(Symbol::Entity { components, .. }) => components.clone(),
            Some(Symbol::Variable { ty, .. }) => {
                let ty = *ty;
                self.error(
                    &cmd.positions,
                    format!(
                        "motion target '{}' is a {} variable, not a declared position",
                        cmd.target,
                        types::as_str(ty)
                    ),
                );
                return;
            }
            None => {
                self.error(
                    &cmd.positions,
                    format!("motion target '{}' is not declared", cmd.target),
                );
                return;
            }
        };

        let mut args = components;
        for (name, expr) in &cmd.args {
            let Some(v) = self.resolve(expr) else { continue };
            if v.as_real().is_none() {
                self.expr_error(
                    expr,
                    format!("motion argument '{name}' must be numeric, got {}", v.type_name()),
                );
                continue;
            }
            // Inline arguments override declared coordinates of the same name.
            upsert(&mut args, name, v);
        }

        let mut instruction = Instruction::new(motion::as_str(cmd.verb), cmd.positions.clone())
            .arg("target", Value::Str(cmd.target.clone()));
        instruction.args.extend(args);
        self.emit(instruction);
    }

    fn lower_duration(&mut self, command: &str, duration: &Spanned<Expr>, positions: &[SourcePos]) {
        let Some(seconds) = self.resolve_real(duration, command) else { return };
        if seconds < 0.0 {
            self.expr_error(duration, format!("{command} duration must not be negative"));
            return;
        }
        self.emit(Instruction::new(command, positions.to_vec()).arg("duration", Value::Real(seconds)));
    }

    fn lower_io(&mut self, stmt: &IoStmt) {
        let Some(channel) = self.resolve_int(&stmt.channel, "I/O channel") else { return };

        match stmt.direction {
            IoDirection::Out => {
                let Some(expr) = &stmt.value else { return };
                let Some(v) = self.resolve(expr) else { return };
                if matches!(v, Value::Str(_)) {
                    self.expr_error(expr, "cannot write a CHAR value to a digital output");
                    return;
                }
                self.emit(
                    Instruction::new("OUT", stmt.positions.clone())
                        .arg("channel", Value::Int(channel))
                        .arg("value", v),
                );
            }
            IoDirection::In => {
                let Some(name) = &stmt.into else { return };
                match self.table.get_mut(name) {
                    Some(Symbol::Variable { value, runtime, .. }) => {
                        // The variable now holds a run-time value; the generator can no
                        // longer resolve expressions that read it.
                        *value = None;
                        *runtime = true;
                    }
                    Some(Symbol::Entity { .. }) => {
                        self.error(
                            &stmt.positions,
                            format!("IN target '{name}' must be a scalar variable"),
                        );
                        return;
                    }
                    None => {
                        self.error(&stmt.positions, format!("IN target '{name}' is not declared"));
                        return;
                    }
                }
                self.emit(
                    Instruction::new("IN", stmt.positions.clone())
                        .arg("channel", Value::Int(channel))
                        .arg("into", Value::Str(name.clone())),
                );
            }
        }
    }

    fn lower_assignment(&mut self, stmt: &AssignStmt) {
        let ty = match self.table.get(&stmt.name) {
            Some(Symbol::Variable { ty, .. }) => *ty,
            Some(Symbol::Entity { .. }) => {
                self.error(
                    &stmt.positions,
                    format!(
                        "'{}' is a coordinate entity; assign a component instead ('{}.X := ...')",
                        stmt.name, stmt.name
                    ),
                );
                return;
            }
            None => {
                self.error(
                    &stmt.positions,
                    format!("assignment to undeclared variable '{}'", stmt.name),
                );
                return;
            }
        };

        let Some(v) = self.resolve(&stmt.value) else { return };
        let Some(stored) = v.coerce_to(ty) else {
            self.error(
                &stmt.positions,
                format!(
                    "cannot assign a {} value to {} variable '{}'",
                    v.type_name(),
                    types::as_str(ty),
                    stmt.name
                ),
            );
            return;
        };

        if let Some(Symbol::Variable { value, runtime, .. }) = self.table.get_mut(&stmt.name) {
            *value = Some(stored.clone());
            *runtime = false;
        }
        self.emit(
            Instruction::new("SET", stmt.positions.clone())
                .arg("name", Value::Str(stmt.name.clone()))
                .arg("value", stored),
        );
    }

    fn lower_member_assign(&mut self, stmt: &MemberAssignStmt) {
        let Some(v) = self.resolve(&stmt.value) else { return };
        if v.as_real().is_none() {
            self.expr_error(
                &stmt.value,
                format!(
                    "component '{}' of '{}' must be numeric, got {}",
                    stmt.component,
                    stmt.entity,
                    v.type_name()
                ),
            );
            return;
        }

        match self.table.get_mut(&stmt.entity) {
            Some(Symbol::Entity { components, .. }) => {
                upsert(components, &stmt.component, v.clone());
            }
            Some(Symbol::Variable { .. }) => {
                self.error(
                    &stmt.positions,
                    format!("'{}' is not a coordinate entity", stmt.entity),
                );
                return;
            }
            None => {
                self.error(
                    &stmt.positions,
                    format!("undeclared name '{}' in component assignment", stmt.entity),
                );
                return;
            }
        }

        self.emit(
            Instruction::new("SETM", stmt.positions.clone())
                .arg("target", Value::Str(stmt.entity.clone()))
                .arg("component", Value::Str(stmt.component.clone()))
                .arg("value", v),
        );
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    fn lower_if(&mut self, stmt: &IfStmt) {
        let Some(cond) = self.resolve_bool(&stmt.condition, "IF condition") else { return };

        let else_label = self.fresh_label();
        self.emit(
            Instruction::new("JMPF", stmt.positions.clone())
                .arg("cond", Value::Bool(cond))
                .arg("label", Value::Int(else_label)),
        );
        self.lower_branch(&stmt.then_body, cond);

        match &stmt.else_body {
            Some(else_body) => {
                let end_label = self.fresh_label();
                self.emit(
                    Instruction::new("JMP", stmt.positions.clone()).arg("label", Value::Int(end_label)),
                );
                self.emit_label(else_label, &stmt.positions);
                self.lower_branch(else_body, !cond);
                self.emit_label(end_label, &stmt.positions);
            }
            None => self.emit_label(else_label, &stmt.positions),
        }
    }

    /// Lower a branch body. Both sides of a branch are emitted so the stream keeps its
    /// shape, but only the path the (constant) condition selects may update
    /// generation-time state: table changes made by the other path are rolled back.
    fn lower_branch(&mut self, body: &[Statement], taken: bool) {
        if taken {
            for inner in body {
                self.lower_statement(inner);
            }
        } else {
            let saved = self.table.clone();
            for inner in body {
                self.lower_statement(inner);
            }
            self.table = saved;
        }
    }

    fn lower_for(&mut self, stmt: &ForStmt) {
        match self.table.get(&stmt.var) {
            Some(Symbol::Variable { ty: TypeId::Int, .. }) => {}
            Some(_) => {
                self.error(
                    &stmt.positions,
                    format!("FOR variable '{}' must be a declared INT variable", stmt.var),
                );
                return;
            }
            None => {
                self.error(&stmt.positions, format!("FOR variable '{}' is not declared", stmt.var));
                return;
            }
        }

        let Some(from) = self.resolve_int(&stmt.from, "FOR start bound") else { return };
        let Some(to) = self.resolve_int(&stmt.to, "FOR end bound") else { return };
        let step = match &stmt.step {
            Some(expr) => match self.resolve_int(expr, "FOR step") {
                Some(0) => {
                    self.expr_error(expr, "FOR step must not be zero");
                    return;
                }
                Some(s) => s,
                None => return,
            },
            None => 1,
        };

        let mut i = from;
        while (step > 0 && i <= to) || (step < 0 && i >= to) {
            if !self.tick_loop(&stmt.positions) {
                return;
            }

            if let Some(Symbol::Variable { value, runtime, .. }) = self.table.get_mut(&stmt.var) {
                *value = Some(Value::Int(i));
                *runtime = false;
            }
            self.emit(
                Instruction::new("SET", stmt.positions.clone())
                    .arg("name", Value::Str(stmt.var.clone()))
                    .arg("value", Value::Int(i)),
            );

            let errors_before = self.errors.len();
            for inner in &stmt.body {
                self.lower_statement(inner);
            }
            // Don't repeat the same diagnostics for every remaining iteration.
            if self.errors.len() > errors_before {
                return;
            }

            i = match i.checked_add(step) {
                Some(next) => next,
                None => {
                    self.error(&stmt.positions, "FOR bound overflows the INT range");
                    return;
                }
            };
        }
    }

    fn lower_while(&mut self, stmt: &WhileStmt) {
        loop {
            let Some(cond) = self.resolve_bool(&stmt.condition, "WHILE condition") else { return };
            if !cond {
                return;
            }
            if !self.tick_loop(&stmt.positions) {
                return;
            }

            let errors_before = self.errors.len();
            for inner in &stmt.body {
                self.lower_statement(inner);
            }
            if self.errors.len() > errors_before {
                return;
            }
        }
    }

    fn lower_repeat(&mut self, stmt: &RepeatStmt) {
        loop {
            if !self.tick_loop(&stmt.positions) {
                return;
            }

            let errors_before = self.errors.len();
            for inner in &stmt.body {
                self.lower_statement(inner);
            }
            if self.errors.len() > errors_before {
                return;
            }

            let Some(done) = self.resolve_bool(&stmt.until, "UNTIL condition") else { return };
            if done {
                return;
            }
        }
    }

    fn lower_switch(&mut self, stmt: &SwitchStmt) {
        let Some(selector) = self.resolve(&stmt.selector) else { return };

        let end_label = self.fresh_label();
        let mut matched = false;
        for arm in &stmt.cases {
            let Some(case_value) = self.resolve(&arm.value) else { continue };
            let matches = match value::apply_binary(BinOp::Eq, &selector, &case_value) {
                Ok(Value::Bool(b)) => b,
                Ok(_) | Err(_) => {
                    self.expr_error(
                        &arm.value,
                        format!(
                            "CASE value of type {} cannot be compared with a {} selector",
                            case_value.type_name(),
                            selector.type_name()
                        ),
                    );
                    continue;
                }
            };

            // Only the first matching arm runs; later arms are emitted untaken.
            let taken = matches && !matched;
            matched |= matches;

            let skip_label = self.fresh_label();
            self.emit(
                Instruction::new("JMPF", stmt.positions.clone())
                    .arg("cond", Value::Bool(matches))
                    .arg("label", Value::Int(skip_label)),
            );
            self.lower_branch(&arm.body, taken);
            self.emit(Instruction::new("JMP", stmt.positions.clone()).arg("label", Value::Int(end_label)));
            self.emit_label(skip_label, &stmt.positions);
        }

        if let Some(default) = &stmt.default {
            self.lower_branch(default, !matched);
        }
        self.emit_label(end_label, &stmt.positions);
    }

    // ========================================================================
    // Expression resolution
    // ========================================================================

    /// Resolve an expression to a concrete value against the declaration table.
    ///
    /// Returns `None` with a recorded [`GenError`] when the expression cannot be
    /// resolved at generation time; values never silently default.
    fn resolve(&mut self, expr: &Spanned<Expr>) -> Option<Value> {
        match &expr.node {
            Expr::Literal(v) => Some(v.clone()),

            Expr::Variable(name) => match self.table.get(name).cloned() {
                Some(Symbol::Variable {
                    value: Some(v),
                    runtime: false,
                    ..
                }) => Some(v),
                Some(Symbol::Variable { runtime: true, .. }) => {
                    self.expr_error(
                        expr,
                        format!("value of '{name}' comes from a digital input and is not known until run time"),
                    );
                    None
                }
                Some(Symbol::Variable { .. }) => {
                    self.expr_error(expr, format!("variable '{name}' is used before it is assigned"));
                    None
                }
                Some(Symbol::Entity { ty, .. }) => {
                    self.expr_error(
                        expr,
                        format!("'{name}' is a {} and cannot be used as a scalar value", types::as_str(ty)),
                    );
                    None
                }
                None => {
                    self.expr_error(expr, format!("undeclared variable '{name}'"));
                    None
                }
            },

            Expr::Member(entity, component) => match self.table.get(entity).cloned() {
                Some(Symbol::Entity { components, .. }) => {
                    match components.iter().find(|(n, _)| n == component) {
                        Some((_, v)) => Some(v.clone()),
                        None => {
                            self.expr_error(expr, format!("'{entity}' has no component '{component}'"));
                            None
                        }
                    }
                }
                Some(Symbol::Variable { .. }) => {
                    self.expr_error(expr, format!("'{entity}' is not a coordinate entity"));
                    None
                }
                None => {
                    self.expr_error(expr, format!("undeclared name '{entity}'"));
                    None
                }
            },

            Expr::Unary(op, inner) => {
                let v = self.resolve(inner)?;
                match value::apply_unary(map_unary(*op), &v) {
                    Ok(result) => Some(result),
                    Err(e) => {
                        self.expr_error(expr, e.to_string());
                        None
                    }
                }
            }

            Expr::Binary(lhs, op, rhs) => {
                let a = self.resolve(lhs)?;
                let b = self.resolve(rhs)?;
                match value::apply_binary(map_binary(*op), &a, &b) {
                    Ok(result) => Some(result),
                    Err(e) => {
                        self.expr_error(expr, e.to_string());
                        None
                    }
                }
            }
        }
    }

    fn resolve_real(&mut self, expr: &Spanned<Expr>, what: &str) -> Option<f64> {
        let v = self.resolve(expr)?;
        match v.as_real() {
            Some(r) => Some(r),
            None => {
                self.expr_error(expr, format!("{what} must be numeric, got {}", v.type_name()));
                None
            }
        }
    }

    fn resolve_int(&mut self, expr: &Spanned<Expr>, what: &str) -> Option<i64> {
        match self.resolve(expr)? {
            Value::Int(i) => Some(i),
            v => {
                self.expr_error(expr, format!("{what} must be an INT, got {}", v.type_name()));
                None
            }
        }
    }

    fn resolve_bool(&mut self, expr: &Spanned<Expr>, what: &str) -> Option<bool> {
        match self.resolve(expr)? {
            Value::Bool(b) => Some(b),
            v => {
                self.expr_error(expr, format!("{what} must be a BOOL, got {}", v.type_name()));
                None
            }
        }
    }

    // ========================================================================
    // Plumbing
    // ========================================================================

    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    fn emit_label(&mut self, id: i64, positions: &[SourcePos]) {
        self.emit(Instruction::new("LABEL", positions.to_vec()).arg("id", Value::Int(id)));
    }

    fn fresh_label(&mut self) -> i64 {
        let id = self.next_label;
        self.next_label += 1;
        id
    }

    /// Charge one generation-time loop iteration against the global budget.
    fn tick_loop(&mut self, positions: &[SourcePos]) -> bool {
        self.loop_budget += 1;
        if self.loop_budget > LOOP_ITERATION_CAP {
            self.error(
                positions,
                format!("loop expansion exceeded {LOOP_ITERATION_CAP} iterations"),
            );
            false
        } else {
            true
        }
    }

    fn error(&mut self, positions: &[SourcePos], message: impl Into<String>) {
        self.errors.push(GenError::new(message, positions.to_vec()));
    }

    fn expr_error(&mut self, expr: &Spanned<Expr>, message: impl Into<String>) {
        self.errors.push(GenError::new(message, vec![expr.span.start]));
    }
}

impl Default for InstructionGen {
    fn default() -> Self {
        Self::new()
    }
}

/// Insert or overwrite a named value, keeping first-occurrence order (duplicate names
/// resolve last-wins).
fn upsert(pairs: &mut Vec<(String, Value)>, name: &str, value: Value) {
    match pairs.iter_mut().find(|(n, _)| n == name) {
        Some((_, slot)) => *slot = value,
        None => pairs.push((name.to_string(), value)),
    }
}

fn map_binary(op: BinaryOp) -> BinOp {
    match op {
        BinaryOp::Add => BinOp::Add,
        BinaryOp::Sub => BinOp::Sub,
        BinaryOp::Mul => BinOp::Mul,
        BinaryOp::Div => BinOp::Div,
        BinaryOp::Eq => BinOp::Eq,
        BinaryOp::NotEq => BinOp::NotEq,
        BinaryOp::Lt => BinOp::Lt,
        BinaryOp::LtEq => BinOp::LtEq,
        BinaryOp::Gt => BinOp::Gt,
        BinaryOp::GtEq => BinOp::GtEq,
        BinaryOp::And => BinOp::And,
        BinaryOp::Or => BinOp::Or,
    }
}

fn map_unary(op: UnaryOp) -> UnOp {
    match op {
        UnaryOp::Neg => UnOp::Neg,
        UnaryOp::Not => UnOp::Not,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mova_syntax::{lexer, parser};

    fn generate_source(source: &str) -> Result<InstructionProgram, GenErrors> {
        let tokens = lexer::tokenize(source);
        let result = parser::parse(&tokens);
        assert!(!result.has_errors(), "parse errors: {:?}", result.errors);
        generate(&result.program)
    }

    /// The reference pipeline: one declaration, two instructions, the declaration
    /// contributes none.
    #[test]
    fn test_declarations_emit_no_instructions() {
        let program = generate_source("DECL POS P1 = {X 100, Y 200, Z 300}\nPTP P1\nWAIT 2.5\n").unwrap();

        assert_eq!(program.instructions.len(), 2);
        assert_eq!(program.declarations.len(), 1);

        let ptp = &program.instructions[0];
        assert_eq!(ptp.command, "PTP");
        assert_eq!(ptp.get("target"), Some(&Value::Str("P1".into())));
        assert_eq!(ptp.get("X"), Some(&Value::Int(100)));
        assert_eq!(ptp.positions, vec![SourcePos::new(2, 1)]);

        let wait = &program.instructions[1];
        assert_eq!(wait.command, "WAIT");
        assert_eq!(wait.get("duration"), Some(&Value::Real(2.5)));
    }

    #[test]
    fn test_wait_promotes_int_durations() {
        let program = generate_source("WAIT 2\n").unwrap();
        assert_eq!(program.instructions[0].get("duration"), Some(&Value::Real(2.0)));
    }

    #[test]
    fn test_undeclared_motion_target_is_an_error() {
        let errors = generate_source("PTP NOWHERE\n").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.0[0].message.contains("NOWHERE"));
        assert_eq!(errors.0[0].pos(), Some(SourcePos::new(1, 1)));
    }

    #[test]
    fn test_all_resolution_failures_reported_in_one_pass() {
        let errors = generate_source("PTP A\nLIN B\nWAIT TRUE\n").unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    /// Duplicate component names resolve last-wins in the declaration table.
    #[test]
    fn test_duplicate_components_last_wins() {
        let program = generate_source("POS P1 = {X 1, X 2, Y 3}\nPTP P1\n").unwrap();
        let Some(Symbol::Entity { components, .. }) = program.declarations.get("P1") else {
            panic!("expected entity");
        };
        assert_eq!(
            components,
            &[("X".to_string(), Value::Int(2)), ("Y".to_string(), Value::Int(3))]
        );
    }

    #[test]
    fn test_inline_motion_args_override_coordinates() {
        let program = generate_source("POS P1 = {X 1, Y 2}\nPTP P1 {X 99, VEL 50}\n").unwrap();
        let ptp = &program.instructions[0];
        assert_eq!(ptp.get("X"), Some(&Value::Int(99)));
        assert_eq!(ptp.get("Y"), Some(&Value::Int(2)));
        assert_eq!(ptp.get("VEL"), Some(&Value::Int(50)));
    }

    #[test]
    fn test_member_assignment_updates_table_and_emits() {
        let program = generate_source("POS P1 = {X 1}\nP1.X := 42\nPTP P1\n").unwrap();
        assert_eq!(program.instructions[0].command, "SETM");
        // The later motion sees the overridden coordinate.
        assert_eq!(program.instructions[1].get("X"), Some(&Value::Int(42)));
    }

    #[test]
    fn test_variable_folding_through_expressions() {
        let program = generate_source("DECL INT N := 4\nDECL REAL T := N * 0.5\nWAIT T + 1\n").unwrap();
        assert_eq!(program.instructions[0].get("duration"), Some(&Value::Real(3.0)));
    }

    // ------------------------------------------------------------------
    // Control-flow lowering
    // ------------------------------------------------------------------

    #[test]
    fn test_if_lowering_emits_jumps_and_labels() {
        let source = "DECL INT X := 2\nIF X > 1 THEN\nWAIT 1\nELSE\nWAIT 2\nENDIF\n";
        let program = generate_source(source).unwrap();
        let commands: Vec<&str> = program.instructions.iter().map(|i| i.command.as_str()).collect();
        // The declaration contributes nothing; the branch becomes jump/label records.
        assert_eq!(commands, ["JMPF", "WAIT", "JMP", "LABEL", "WAIT", "LABEL"]);

        let jmpf = &program.instructions[0];
        assert_eq!(jmpf.get("cond"), Some(&Value::Bool(true)));
        // JMPF targets the label opening the ELSE branch.
        assert_eq!(jmpf.get("label"), program.instructions[3].get("id"));
    }

    #[test]
    fn test_for_unrolls_at_generation_time() {
        let program = generate_source("DECL INT I\nFOR I := 1 TO 3\nWAIT 1\nENDFOR\n").unwrap();
        let commands: Vec<&str> = program.instructions.iter().map(|i| i.command.as_str()).collect();
        assert_eq!(commands, ["SET", "WAIT", "SET", "WAIT", "SET", "WAIT"]);
        assert_eq!(program.instructions[4].get("value"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_for_descending_step() {
        let program = generate_source("DECL INT I\nFOR I := 3 TO 1 STEP -1\nDELAY 1\nENDFOR\n").unwrap();
        let values: Vec<&Value> = program
            .instructions
            .iter()
            .filter(|i| i.command == "SET")
            .map(|i| i.get("value").unwrap())
            .collect();
        assert_eq!(values, [&Value::Int(3), &Value::Int(2), &Value::Int(1)]);
    }

    #[test]
    fn test_while_condition_tracks_assignments() {
        let source = "DECL INT N := 0\nWHILE N < 3\nN := N + 1\nENDWHILE\nWAIT 1\n";
        let program = generate_source(source).unwrap();
        let sets = program.instructions.iter().filter(|i| i.command == "SET").count();
        assert_eq!(sets, 3);
    }

    #[test]
    fn test_repeat_runs_body_at_least_once() {
        let source = "DECL INT N := 9\nREPEAT\nN := N + 1\nUNTIL N >= 3\n";
        let program = generate_source(source).unwrap();
        // N starts above the bound; the body still runs once.
        let sets = program.instructions.iter().filter(|i| i.command == "SET").count();
        assert_eq!(sets, 1);
    }

    #[test]
    fn test_runaway_loop_hits_the_cap() {
        let errors = generate_source("DECL BOOL GO := TRUE\nWHILE GO\nDELAY 1\nENDWHILE\n").unwrap_err();
        assert!(errors.0.iter().any(|e| e.message.contains("iterations")));
    }

    #[test]
    fn test_switch_lowering() {
        let source = "DECL INT MODE := 2\nSWITCH MODE\nCASE 1\nWAIT 1\nCASE 2\nWAIT 2\nDEFAULT\nHALT\nENDSWITCH\n";
        let program = generate_source(source).unwrap();
        let commands: Vec<&str> = program.instructions.iter().map(|i| i.command.as_str()).collect();
        assert_eq!(
            commands,
            ["JMPF", "WAIT", "JMP", "LABEL", "JMPF", "WAIT", "JMP", "LABEL", "HALT", "LABEL"]
        );
        // Only the second arm's JMPF has a true condition.
        assert_eq!(program.instructions[0].get("cond"), Some(&Value::Bool(false)));
        assert_eq!(program.instructions[4].get("cond"), Some(&Value::Bool(true)));
    }

    /// Both branches are emitted, but only the taken one may change the table.
    #[test]
    fn test_untaken_branch_does_not_touch_the_table() {
        let source = "DECL INT N := 0\nIF TRUE THEN\nN := 1\nELSE\nN := 2\nENDIF\nOUT 1 N\n";
        let program = generate_source(source).unwrap();
        let out = program.instructions.last().unwrap();
        assert_eq!(out.command, "OUT");
        assert_eq!(out.get("value"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_only_the_matching_arm_updates_state() {
        let source =
            "DECL INT N := 0\nSWITCH 2\nCASE 1\nN := 1\nCASE 2\nN := 2\nDEFAULT\nN := 9\nENDSWITCH\nOUT 1 N\n";
        let program = generate_source(source).unwrap();
        let out = program.instructions.last().unwrap();
        assert_eq!(out.get("value"), Some(&Value::Int(2)));
    }

    // ------------------------------------------------------------------
    // Scope and redeclaration policy
    // ------------------------------------------------------------------

    /// One flat program scope: a declaration inside a block is visible after it.
    #[test]
    fn test_block_declarations_land_in_program_scope() {
        let source = "DECL BOOL GO := TRUE\nIF GO THEN\nDECL INT N := 1\nENDIF\nWAIT N\n";
        let program = generate_source(source).unwrap();
        assert!(program.declarations.contains("N"));
    }

    /// No shadowing: redeclaring a name anywhere is a generation error.
    #[test]
    fn test_redeclaration_is_an_error() {
        let errors = generate_source("DECL INT X := 1\nDECL REAL X := 2.0\n").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.0[0].message.contains("already declared"));
    }

    #[test]
    fn test_assignment_to_undeclared_is_an_error() {
        let errors = generate_source("X := 1\n").unwrap_err();
        assert!(errors.0[0].message.contains("undeclared"));
    }

    #[test]
    fn test_declared_type_is_enforced() {
        let errors = generate_source("DECL INT X := 1\nX := 2.5\n").unwrap_err();
        assert!(errors.0[0].message.contains("INT"));
    }

    // ------------------------------------------------------------------
    // Runtime-valued variables
    // ------------------------------------------------------------------

    #[test]
    fn test_in_poisons_generation_time_reads() {
        let source = "DECL BOOL FLAG := FALSE\nIN 2 FLAG\nIF FLAG THEN\nWAIT 1\nENDIF\n";
        let errors = generate_source(source).unwrap_err();
        assert!(errors.0[0].message.contains("run time"));
    }

    #[test]
    fn test_reassignment_clears_runtime_taint() {
        let source = "DECL BOOL FLAG := FALSE\nIN 2 FLAG\nFLAG := TRUE\nIF FLAG THEN\nWAIT 1\nENDIF\n";
        let program = generate_source(source).unwrap();
        assert_eq!(program.instructions[0].command, "IN");
    }

    #[test]
    fn test_out_emits_channel_and_value() {
        let program = generate_source("OUT 3 TRUE\n").unwrap();
        let out = &program.instructions[0];
        assert_eq!(out.get("channel"), Some(&Value::Int(3)));
        assert_eq!(out.get("value"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_division_by_zero_is_reported_not_defaulted() {
        let errors = generate_source("DECL INT X := 1 / 0\n").unwrap_err();
        assert!(errors.0[0].message.contains("division by zero"));
    }

    #[test]
    fn test_def_header_names_the_program() {
        let program = generate_source("DEF PICKPLACE()\nHALT\nEND\n").unwrap();
        assert_eq!(program.name.as_deref(), Some("PICKPLACE"));
    }
}
