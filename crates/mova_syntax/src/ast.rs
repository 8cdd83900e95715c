//! Abstract Syntax Tree definitions for Mova.
//!
//! This module defines all AST node types for the language. The node set is closed:
//! statements and expressions are plain Rust enums, so every traversal in the parser and
//! the instruction generator pattern-matches exhaustively and the compiler flags any
//! site that misses a new kind.
//!
//! ## Notes
//! - Ownership is tree-shaped and exclusive: children are held by `Box`/`Vec`, never
//!   shared. The tree is built once by the parser and never mutated afterwards.
//! - Every statement node carries an ordered list of `(line, column)` source positions
//!   (multi-line declarations keep one position per contributing line); expression nodes
//!   carry a [`Span`] via [`Spanned`].

use std::fmt;

use mova_core::lang::motion::MotionId;
use mova_core::lang::types::TypeId;
use mova_core::value::Value;

/// A 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePos {
    pub line: u32,
    pub column: u32,
}

impl SourcePos {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for SourcePos {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source location span (inclusive start, exclusive end column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: SourcePos,
    pub end: SourcePos,
}

impl Span {
    pub fn new(start: SourcePos, end: SourcePos) -> Self {
        Self { start, end }
    }

    /// Span covering a single position.
    pub fn at(pos: SourcePos) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A node with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Identifier (plain string; the language has no interning needs at this scale).
pub type Ident = String;

/// Discriminant for every node kind in the tree.
///
/// The enums below are what traversals match on; `NodeKind` exists so tooling and tests
/// can talk about node identity without borrowing the full node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    FunctionBlock,
    FunctionDeclaration,
    VariableDeclaration,
    PositionDeclaration,
    FrameDeclaration,
    AxisDeclaration,
    MotionCommand,
    ExecutePosAndAxis,
    IfStatement,
    ForStatement,
    WhileStatement,
    RepeatStatement,
    SwitchStatement,
    Assignment,
    WaitStatement,
    DelayStatement,
    IoStatement,
    HaltStatement,
    ReturnStatement,
    BinaryExpression,
    UnaryExpression,
    LiteralExpression,
    VariableExpression,
    MemberExpression,
}

// ============================================================================
// Program root
// ============================================================================

/// The program root: an ordered block of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FunctionBlock {
    pub statements: Vec<Statement>,
}

impl FunctionBlock {
    pub fn kind(&self) -> NodeKind {
        NodeKind::FunctionBlock
    }
}

// ============================================================================
// Statements
// ============================================================================

/// All statement forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Function(FunctionDecl),
    VarDecl(VarDecl),
    EntityDecl(EntityDecl),
    Motion(MotionCmd),
    If(IfStmt),
    For(ForStmt),
    While(WhileStmt),
    Repeat(RepeatStmt),
    Switch(SwitchStmt),
    Assignment(AssignStmt),
    MemberAssign(MemberAssignStmt),
    Wait(WaitStmt),
    Delay(DelayStmt),
    Io(IoStmt),
    Halt(HaltStmt),
    Return(ReturnStmt),
}

impl Statement {
    /// Node-kind discriminant, mapping declaration subtypes to their own kinds.
    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::Function(_) => NodeKind::FunctionDeclaration,
            Statement::VarDecl(_) => NodeKind::VariableDeclaration,
            Statement::EntityDecl(d) => match d.kind {
                EntityKind::Position => NodeKind::PositionDeclaration,
                EntityKind::Frame => NodeKind::FrameDeclaration,
                EntityKind::Axis => NodeKind::AxisDeclaration,
            },
            Statement::Motion(_) => NodeKind::MotionCommand,
            Statement::If(_) => NodeKind::IfStatement,
            Statement::For(_) => NodeKind::ForStatement,
            Statement::While(_) => NodeKind::WhileStatement,
            Statement::Repeat(_) => NodeKind::RepeatStatement,
            Statement::Switch(_) => NodeKind::SwitchStatement,
            Statement::Assignment(_) => NodeKind::Assignment,
            Statement::MemberAssign(_) => NodeKind::ExecutePosAndAxis,
            Statement::Wait(_) => NodeKind::WaitStatement,
            Statement::Delay(_) => NodeKind::DelayStatement,
            Statement::Io(_) => NodeKind::IoStatement,
            Statement::Halt(_) => NodeKind::HaltStatement,
            Statement::Return(_) => NodeKind::ReturnStatement,
        }
    }

    /// Ordered source positions attached to this statement.
    pub fn positions(&self) -> &[SourcePos] {
        match self {
            Statement::Function(s) => &s.positions,
            Statement::VarDecl(s) => &s.positions,
            Statement::EntityDecl(s) => &s.positions,
            Statement::Motion(s) => &s.positions,
            Statement::If(s) => &s.positions,
            Statement::For(s) => &s.positions,
            Statement::While(s) => &s.positions,
            Statement::Repeat(s) => &s.positions,
            Statement::Switch(s) => &s.positions,
            Statement::Assignment(s) => &s.positions,
            Statement::MemberAssign(s) => &s.positions,
            Statement::Wait(s) => &s.positions,
            Statement::Delay(s) => &s.positions,
            Statement::Io(s) => &s.positions,
            Statement::Halt(s) => &s.positions,
            Statement::Return(s) => &s.positions,
        }
    }
}

/// `DEF name()` program header.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Ident,
    pub positions: Vec<SourcePos>,
}

/// `DECL INT X := 5`: scalar variable declaration with optional initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub ty: TypeId,
    pub name: Ident,
    pub initializer: Option<Spanned<Expr>>,
    pub positions: Vec<SourcePos>,
}

/// The validation family a coordinate declaration belongs to.
///
/// `E6POS`/`E6AXIS` parse under the same policies as their base kinds; the declared
/// spelling is preserved in [`EntityDecl::ty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Position,
    Frame,
    Axis,
}

/// `POS P1 = {X 100, Y 200, Z 300}` and its FRAME/AXIS/E6POS/E6AXIS siblings.
///
/// Component order is insertion order and is semantically meaningful. Duplicate
/// component names are retained here; resolution policy lives in the generator.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDecl {
    pub kind: EntityKind,
    pub ty: TypeId,
    pub name: Ident,
    pub components: Vec<(Ident, Spanned<Expr>)>,
    pub positions: Vec<SourcePos>,
}

/// `PTP P1` / `LIN_REL P2 {VEL 50}`: a motion command with optional inline args.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionCmd {
    pub verb: MotionId,
    pub target: Ident,
    pub args: Vec<(Ident, Spanned<Expr>)>,
    pub positions: Vec<SourcePos>,
}

/// `IF cond THEN ... (ELSE ...) ENDIF`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Spanned<Expr>,
    pub then_body: Vec<Statement>,
    pub else_body: Option<Vec<Statement>>,
    pub positions: Vec<SourcePos>,
}

/// `FOR I := 1 TO 10 (STEP 2) ... ENDFOR`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub var: Ident,
    pub from: Spanned<Expr>,
    pub to: Spanned<Expr>,
    pub step: Option<Spanned<Expr>>,
    pub body: Vec<Statement>,
    pub positions: Vec<SourcePos>,
}

/// `WHILE cond ... ENDWHILE`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Spanned<Expr>,
    pub body: Vec<Statement>,
    pub positions: Vec<SourcePos>,
}

/// `REPEAT ... UNTIL cond`
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStmt {
    pub body: Vec<Statement>,
    pub until: Spanned<Expr>,
    pub positions: Vec<SourcePos>,
}

/// One `CASE value ...` arm of a switch.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseArm {
    pub value: Spanned<Expr>,
    pub body: Vec<Statement>,
}

/// `SWITCH sel CASE 1 ... (DEFAULT ...) ENDSWITCH`
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub selector: Spanned<Expr>,
    pub cases: Vec<CaseArm>,
    pub default: Option<Vec<Statement>>,
    pub positions: Vec<SourcePos>,
}

/// `X := expr`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub name: Ident,
    pub value: Spanned<Expr>,
    pub positions: Vec<SourcePos>,
}

/// `P1.X := expr`: inline coordinate override of a declared entity.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberAssignStmt {
    pub entity: Ident,
    pub component: Ident,
    pub value: Spanned<Expr>,
    pub positions: Vec<SourcePos>,
}

/// `WAIT expr`: hold the program for the given time in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct WaitStmt {
    pub duration: Spanned<Expr>,
    pub positions: Vec<SourcePos>,
}

/// `DELAY expr`: unconditional pause in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayStmt {
    pub duration: Spanned<Expr>,
    pub positions: Vec<SourcePos>,
}

/// Direction of a digital I/O statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoDirection {
    In,
    Out,
}

/// `OUT channel value` / `IN channel TARGET_VAR`.
#[derive(Debug, Clone, PartialEq)]
pub struct IoStmt {
    pub direction: IoDirection,
    pub channel: Spanned<Expr>,
    /// `OUT`: the value expression to write. `IN`: absent.
    pub value: Option<Spanned<Expr>>,
    /// `IN`: the variable receiving the read. `OUT`: absent.
    pub into: Option<Ident>,
    pub positions: Vec<SourcePos>,
}

/// `HALT`
#[derive(Debug, Clone, PartialEq)]
pub struct HaltStmt {
    pub positions: Vec<SourcePos>,
}

/// `RETURN`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub positions: Vec<SourcePos>,
}

// ============================================================================
// Expressions
// ============================================================================

/// All expression forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Variable(Ident),
    /// `P1.X`: read access to a component of a declared entity.
    Member(Ident, Ident),
    Unary(UnaryOp, Box<Spanned<Expr>>),
    Binary(Box<Spanned<Expr>>, BinaryOp, Box<Spanned<Expr>>),
}

impl Expr {
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Literal(_) => NodeKind::LiteralExpression,
            Expr::Variable(_) => NodeKind::VariableExpression,
            Expr::Member(_, _) => NodeKind::MemberExpression,
            Expr::Unary(_, _) => NodeKind::UnaryExpression,
            Expr::Binary(_, _, _) => NodeKind::BinaryExpression,
        }
    }
}

/// Binary operators as they appear in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

/// Unary operators as they appear in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let a = Span::new(SourcePos::new(1, 1), SourcePos::new(1, 4));
        let b = Span::new(SourcePos::new(1, 6), SourcePos::new(2, 3));
        let merged = a.merge(b);
        assert_eq!(merged.start, SourcePos::new(1, 1));
        assert_eq!(merged.end, SourcePos::new(2, 3));
    }

    #[test]
    fn test_entity_kind_maps_to_node_kind() {
        let decl = EntityDecl {
            kind: EntityKind::Frame,
            ty: TypeId::Frame,
            name: "F1".into(),
            components: vec![],
            positions: vec![SourcePos::default()],
        };
        assert_eq!(Statement::EntityDecl(decl).kind(), NodeKind::FrameDeclaration);
    }
}
