//! Abstract Syntax Tree definitions for Adorad
//!
//! Every node is an [`AstNode`]: a [`Location`] plus a [`NodeKind`] that owns exactly the payload of one construct.
//! Children are owned (`Box<AstNode>` when required, `Option<Box<AstNode>>` when absent is meaningful, `Vec<AstNode>`
//! for lists), so a tree has no sharing, no cycles and no back-pointers.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::location::Location;

/// Owned child handle.
pub type Child = Box<AstNode>;

/// A syntax tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub loc: Location,
    pub kind: NodeKind,
}

impl AstNode {
    /// Create a fully-populated node.
    pub fn new(loc: Location, kind: impl Into<NodeKind>) -> Self {
        Self { loc, kind: kind.into() }
    }

    /// Fieldless tag of this node's construct.
    pub fn kind_tag(&self) -> AstNodeKind {
        self.kind.tag()
    }

    /// Return the identifier name if this node is a plain identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier(ident) => Some(&ident.name),
            _ => None,
        }
    }

    pub fn as_expr(&self) -> Option<&Expr> {
        match &self.kind {
            NodeKind::Expr(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn as_stmt(&self) -> Option<&Stmt> {
        match &self.kind {
            NodeKind::Stmt(stmt) => Some(stmt),
            _ => None,
        }
    }

    pub fn as_decl(&self) -> Option<&Decl> {
        match &self.kind {
            NodeKind::Decl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match &self.kind {
            NodeKind::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Identifier(Identifier),
    Literal(Literal),
    Decl(Decl),
    Expr(Expr),
    Stmt(Stmt),
    Type(TypeExpr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Visibility modifier for top-level items (`export`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

// ============================================================================
// Literals (compile-time values)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntWidth {
    I8,
    I16,
    #[default]
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl IntWidth {
    pub fn is_signed(self) -> bool {
        matches!(self, IntWidth::I8 | IntWidth::I16 | IntWidth::I32 | IntWidth::I64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatWidth {
    #[default]
    F32,
    F64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringStyle {
    #[default]
    Plain,
    /// `r"..."`
    Raw,
    /// `f"..."`
    Format,
}

/// Literal values keep their source text (without quotes or prefixes); evaluation happens later.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Byte(String),
    Float { value: String, width: FloatWidth },
    Integer { value: String, width: IntWidth },
    Char(String),
    String { value: String, style: StringStyle },
    Nil,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Func(FuncDecl),
    Enum(EnumDecl),
    Struct(StructDecl),
    Union(UnionDecl),
    Var(VarDecl),
    Const(ConstDecl),
    Global(GlobalDecl),
    Alias(AliasDecl),
    SumType(SumTypeDecl),
    Param(ParamDecl),
    Test(TestDecl),
}

/// Inlining request from `[inline]` / `[noinline]` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FuncInline {
    #[default]
    Auto,
    Inline,
    NoInline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: String,
    pub visibility: Visibility,
    pub attributes: Vec<String>,
    pub inline: FuncInline,
    pub is_noreturn: bool,
    /// `func main`.
    pub is_main: bool,
    /// `func test_*`.
    pub is_test: bool,
    /// Enclosing struct for methods.
    pub parent_type: Option<String>,
    /// [`ParamDecl`] nodes.
    pub params: Vec<AstNode>,
    pub is_variadic: bool,
    pub return_type: Option<Child>,
    /// A [`Block`] node.
    pub body: Child,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub loc: Location,
    pub name: String,
    pub value: Option<Child>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub visibility: Visibility,
    pub attributes: Vec<String>,
    pub variants: Vec<EnumVariant>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: String,
    pub visibility: Visibility,
    pub attributes: Vec<String>,
    /// [`VarDecl`] nodes.
    pub fields: Vec<AstNode>,
    /// [`FuncDecl`] nodes with `parent_type` set.
    pub methods: Vec<AstNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionDecl {
    pub name: String,
    pub visibility: Visibility,
    pub attributes: Vec<String>,
    pub fields: Vec<AstNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub visibility: Visibility,
    pub is_mutable: bool,
    pub ty: Option<Child>,
    pub value: Option<Child>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstField {
    pub loc: Location,
    pub name: String,
    pub ty: Option<Child>,
    pub value: Child,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub visibility: Visibility,
    /// `const ( ... )`.
    pub is_block: bool,
    pub fields: Vec<ConstField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalField {
    pub loc: Location,
    pub name: String,
    pub ty: Option<Child>,
    pub value: Option<Child>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalDecl {
    pub visibility: Visibility,
    /// `global ( ... )`.
    pub is_block: bool,
    pub fields: Vec<GlobalField>,
}

/// `use a.b.c as d;`
#[derive(Debug, Clone, PartialEq)]
pub struct AliasDecl {
    pub visibility: Visibility,
    pub path: Vec<String>,
    pub alias: Option<String>,
}

/// `type Number = Int | Float;`
#[derive(Debug, Clone, PartialEq)]
pub struct SumTypeDecl {
    pub name: String,
    pub visibility: Visibility,
    pub attributes: Vec<String>,
    pub variants: Vec<AstNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub name: String,
    pub ty: Child,
    pub is_mutable: bool,
    /// `name... T`.
    pub is_variadic: bool,
}

/// `test "name" { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct TestDecl {
    /// `None` for an unnamed `test { ... }`.
    pub name: Option<String>,
    pub body: Child,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    BinaryOp(BinaryOpExpr),
    PrefixOp(PrefixOpExpr),
    FieldAccess(FieldAccessExpr),
    FuncCall(FuncCallExpr),
    If(IfExpr),
    LoopWhile(LoopWhileExpr),
    LoopC(LoopCExpr),
    LoopIn(LoopInExpr),
    Match(MatchExpr),
    MatchBranch(MatchBranchExpr),
    Range(RangeExpr),
    Catch(CatchExpr),
    Cast(CastExpr),
    Slice(SliceExpr),
    ArrayAccess(ArrayAccessExpr),
    Lambda(LambdaExpr),
    Await(AwaitExpr),
    Set(SetExpr),
    TypeOf(TypeOfExpr),
    Init(InitExpr),
    Test(TestExpr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    BoolAnd,
    BoolOr,
    BitAnd,
    BitOr,
    BitXor,
    BitAndNot,
    Shl,
    Shr,
    In,
    NotIn,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::BoolAnd => "&&",
            BinaryOp::BoolOr => "||",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAndNot => "&^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::In => "in",
            BinaryOp::NotIn => "notin",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOpExpr {
    pub lhs: Child,
    pub op: BinaryOp,
    pub rhs: Child,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    /// `not`
    BoolNot,
    /// `!`
    Negation,
    /// `-`
    Minus,
    /// `&`
    AddrOf,
    /// `try`
    Try,
    /// `?`
    Optional,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixOpExpr {
    pub op: PrefixOp,
    pub expr: Child,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldAccessExpr {
    pub target: Child,
    pub field: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallModifier {
    #[default]
    None,
    AlwaysInline,
    NeverInline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncCallExpr {
    pub callee: Child,
    /// Positional arguments.
    pub args: Vec<AstNode>,
    /// `name = value` arguments, after every positional one.
    pub kwd_args: Vec<KeywordArg>,
    pub modifier: CallModifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordArg {
    pub name: String,
    pub value: AstNode,
}

/// `if cond { } elseif cond { } else { }`; an `elseif` chain nests as an `If` in `else_node`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub condition: Child,
    pub then_block: Child,
    pub else_node: Option<Child>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopWhileExpr {
    /// `None` for `while { }`.
    pub condition: Option<Child>,
    pub statements: Vec<AstNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopCExpr {
    pub init: Option<Child>,
    pub condition: Option<Child>,
    pub update: Option<Child>,
    pub statements: Vec<AstNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopInExpr {
    pub key_var: String,
    pub val_var: Option<String>,
    pub iterable: Child,
    /// Iterating over a `lo..hi` range.
    pub is_range: bool,
    pub statements: Vec<AstNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchExpr {
    pub scrutinee: Child,
    /// [`MatchBranchExpr`] nodes.
    pub branches: Vec<AstNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchBranchExpr {
    /// Empty for the `else` / `default` branch.
    pub patterns: Vec<AstNode>,
    pub is_default: bool,
    pub any_patterns_are_ranges: bool,
    pub body: Child,
}

/// `lo..hi`, with either end optional in match patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeExpr {
    pub start: Option<Child>,
    pub end: Option<Child>,
}

/// `lhs catch |err| rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct CatchExpr {
    pub lhs: Child,
    pub binding: Option<String>,
    pub rhs: Child,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastStyle {
    /// `expr as T`
    As,
    /// `cast(T) expr`
    Keyword,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CastExpr {
    pub style: CastStyle,
    pub expr: Child,
    pub ty: Child,
    /// Second operand of the keyword form, `cast(T, arg) expr`.
    pub arg: Option<Child>,
}

impl CastExpr {
    pub fn has_arg(&self) -> bool {
        self.arg.is_some()
    }
}

/// `target[lower..upper : sentinel]`
#[derive(Debug, Clone, PartialEq)]
pub struct SliceExpr {
    pub target: Child,
    pub lower: Option<Child>,
    pub upper: Option<Child>,
    pub sentinel: Option<Child>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAccessExpr {
    pub target: Child,
    pub index: Child,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpr {
    pub params: Vec<AstNode>,
    pub return_type: Option<Child>,
    /// An expression (`=> expr`) or a [`Block`].
    pub body: Child,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AwaitExpr {
    pub expr: Child,
}

/// `{a, b, c}`
#[derive(Debug, Clone, PartialEq)]
pub struct SetExpr {
    pub exprs: Vec<AstNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeOfExpr {
    pub expr: Child,
}

/// Array initializer `[a, b, c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct InitExpr {
    pub entries: Vec<AstNode>,
}

/// `if any symbol = target { } else { }`
#[derive(Debug, Clone, PartialEq)]
pub struct TestExpr {
    pub symbol: String,
    pub target: Child,
    pub then_node: Child,
    /// A block, a chained `if`, or nothing.
    pub else_node: Option<Child>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(Block),
    Assignment(AssignmentStmt),
    Branch(BranchStmt),
    Defer(DeferStmt),
    Return(ReturnStmt),
    Import(ImportStmt),
    Module(ModuleStmt),
    Empty,
    FuncPrototype(FuncPrototype),
    Unreachable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<AstNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Mod => "%=",
            AssignOp::BitAnd => "&=",
            AssignOp::BitOr => "|=",
            AssignOp::BitXor => "^=",
            AssignOp::Shl => "<<=",
            AssignOp::Shr => ">>=",
        };
        f.write_str(s)
    }
}

/// `a, b = 1, 2;` or `x += 1;`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub op: AssignOp,
    pub targets: Vec<AstNode>,
    pub values: Vec<AstNode>,
}

impl AssignmentStmt {
    pub fn is_compound(&self) -> bool {
        self.op != AssignOp::Assign
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Break,
    Continue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BranchStmt {
    pub kind: BranchKind,
    /// `break value;` (always `None` for `continue`).
    pub value: Option<Child>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeferStmt {
    pub body: Child,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    /// `return`
    Ok,
    /// `raise`
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub kind: ReturnKind,
    pub value: Option<Child>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportStmt {
    pub path: Vec<String>,
    pub alias: Option<String>,
}

impl ImportStmt {
    /// Dotted module name (`std.io`).
    pub fn module(&self) -> String {
        self.path.join(".")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleStmt {
    pub path: Vec<String>,
    pub visibility: Visibility,
}

impl ModuleStmt {
    pub fn name(&self) -> String {
        self.path.join(".")
    }

    /// Last path segment.
    pub fn short_name(&self) -> &str {
        self.path.last().map_or("", String::as_str)
    }
}

/// A function signature without a body (`extern func puts(s string) i32;`).
#[derive(Debug, Clone, PartialEq)]
pub struct FuncPrototype {
    pub name: String,
    pub visibility: Visibility,
    pub attributes: Vec<String>,
    pub inline: FuncInline,
    pub is_extern: bool,
    pub params: Vec<AstNode>,
    pub is_variadic: bool,
    pub return_type: Option<Child>,
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Array(ArrayType),
    InferredArray(InferredArrayType),
}

/// Qualifiers between `]` and the element type: `align(8)`, `const`, `volatile`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayQualifiers {
    pub align: Option<Child>,
    pub is_const: bool,
    pub is_volatile: bool,
}

/// `[size : sentinel] T`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub size: Child,
    pub sentinel: Option<Child>,
    pub qualifiers: ArrayQualifiers,
    pub child: Child,
}

/// `[] T` or `[: sentinel] T`
#[derive(Debug, Clone, PartialEq)]
pub struct InferredArrayType {
    pub sentinel: Option<Child>,
    pub qualifiers: ArrayQualifiers,
    pub child: Child,
}

// ============================================================================
// Node kind tag
// ============================================================================

/// Fieldless tag for every construct, derived from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AstNodeKind {
    Identifier,
    BoolLiteral,
    ByteLiteral,
    FloatLiteral,
    IntegerLiteral,
    CharLiteral,
    StringLiteral,
    NilLiteral,
    FuncDecl,
    EnumDecl,
    StructDecl,
    UnionDecl,
    VarDecl,
    ConstDecl,
    GlobalDecl,
    AliasDecl,
    SumTypeDecl,
    ParamDecl,
    TestDecl,
    BinaryOpExpr,
    PrefixOpExpr,
    FieldAccessExpr,
    FuncCallExpr,
    IfExpr,
    LoopWhileExpr,
    LoopCExpr,
    LoopInExpr,
    MatchExpr,
    MatchBranch,
    RangeExpr,
    CatchExpr,
    CastExpr,
    SliceExpr,
    ArrayAccessExpr,
    LambdaExpr,
    AwaitExpr,
    SetExpr,
    TypeOfExpr,
    InitExpr,
    TestExpr,
    Block,
    Assignment,
    Break,
    Continue,
    Defer,
    Return,
    Import,
    Module,
    Empty,
    FuncPrototype,
    Unreachable,
    ArrayType,
    InferredArrayType,
}

impl NodeKind {
    pub fn tag(&self) -> AstNodeKind {
        match self {
            NodeKind::Identifier(_) => AstNodeKind::Identifier,
            NodeKind::Literal(lit) => match lit {
                Literal::Bool(_) => AstNodeKind::BoolLiteral,
                Literal::Byte(_) => AstNodeKind::ByteLiteral,
                Literal::Float { .. } => AstNodeKind::FloatLiteral,
                Literal::Integer { .. } => AstNodeKind::IntegerLiteral,
                Literal::Char(_) => AstNodeKind::CharLiteral,
                Literal::String { .. } => AstNodeKind::StringLiteral,
                Literal::Nil => AstNodeKind::NilLiteral,
            },
            NodeKind::Decl(decl) => match decl {
                Decl::Func(_) => AstNodeKind::FuncDecl,
                Decl::Enum(_) => AstNodeKind::EnumDecl,
                Decl::Struct(_) => AstNodeKind::StructDecl,
                Decl::Union(_) => AstNodeKind::UnionDecl,
                Decl::Var(_) => AstNodeKind::VarDecl,
                Decl::Const(_) => AstNodeKind::ConstDecl,
                Decl::Global(_) => AstNodeKind::GlobalDecl,
                Decl::Alias(_) => AstNodeKind::AliasDecl,
                Decl::SumType(_) => AstNodeKind::SumTypeDecl,
                Decl::Param(_) => AstNodeKind::ParamDecl,
                Decl::Test(_) => AstNodeKind::TestDecl,
            },
            NodeKind::Expr(expr) => match expr {
                Expr::BinaryOp(_) => AstNodeKind::BinaryOpExpr,
                Expr::PrefixOp(_) => AstNodeKind::PrefixOpExpr,
                Expr::FieldAccess(_) => AstNodeKind::FieldAccessExpr,
                Expr::FuncCall(_) => AstNodeKind::FuncCallExpr,
                Expr::If(_) => AstNodeKind::IfExpr,
                Expr::LoopWhile(_) => AstNodeKind::LoopWhileExpr,
                Expr::LoopC(_) => AstNodeKind::LoopCExpr,
                Expr::LoopIn(_) => AstNodeKind::LoopInExpr,
                Expr::Match(_) => AstNodeKind::MatchExpr,
                Expr::MatchBranch(_) => AstNodeKind::MatchBranch,
                Expr::Range(_) => AstNodeKind::RangeExpr,
                Expr::Catch(_) => AstNodeKind::CatchExpr,
                Expr::Cast(_) => AstNodeKind::CastExpr,
                Expr::Slice(_) => AstNodeKind::SliceExpr,
                Expr::ArrayAccess(_) => AstNodeKind::ArrayAccessExpr,
                Expr::Lambda(_) => AstNodeKind::LambdaExpr,
                Expr::Await(_) => AstNodeKind::AwaitExpr,
                Expr::Set(_) => AstNodeKind::SetExpr,
                Expr::TypeOf(_) => AstNodeKind::TypeOfExpr,
                Expr::Init(_) => AstNodeKind::InitExpr,
                Expr::Test(_) => AstNodeKind::TestExpr,
            },
            NodeKind::Stmt(stmt) => match stmt {
                Stmt::Block(_) => AstNodeKind::Block,
                Stmt::Assignment(_) => AstNodeKind::Assignment,
                Stmt::Branch(b) => match b.kind {
                    BranchKind::Break => AstNodeKind::Break,
                    BranchKind::Continue => AstNodeKind::Continue,
                },
                Stmt::Defer(_) => AstNodeKind::Defer,
                Stmt::Return(_) => AstNodeKind::Return,
                Stmt::Import(_) => AstNodeKind::Import,
                Stmt::Module(_) => AstNodeKind::Module,
                Stmt::Empty => AstNodeKind::Empty,
                Stmt::FuncPrototype(_) => AstNodeKind::FuncPrototype,
                Stmt::Unreachable => AstNodeKind::Unreachable,
            },
            NodeKind::Type(ty) => match ty {
                TypeExpr::Array(_) => AstNodeKind::ArrayType,
                TypeExpr::InferredArray(_) => AstNodeKind::InferredArrayType,
            },
        }
    }
}

macro_rules! into_node_kind {
    ($($outer:ident($inner:ident) for [$($variant:ident($payload:ty)),* $(,)?];)*) => {
        $($(
            impl From<$payload> for NodeKind {
                fn from(payload: $payload) -> Self {
                    NodeKind::$outer($inner::$variant(payload))
                }
            }
        )*)*
    };
}

into_node_kind! {
    Decl(Decl) for [
        Func(FuncDecl), Enum(EnumDecl), Struct(StructDecl), Union(UnionDecl), Var(VarDecl), Const(ConstDecl),
        Global(GlobalDecl), Alias(AliasDecl), SumType(SumTypeDecl), Param(ParamDecl), Test(TestDecl),
    ];
    Expr(Expr) for [
        BinaryOp(BinaryOpExpr), PrefixOp(PrefixOpExpr), FieldAccess(FieldAccessExpr), FuncCall(FuncCallExpr),
        If(IfExpr), LoopWhile(LoopWhileExpr), LoopC(LoopCExpr), LoopIn(LoopInExpr), Match(MatchExpr),
        MatchBranch(MatchBranchExpr), Range(RangeExpr), Catch(CatchExpr), Cast(CastExpr), Slice(SliceExpr),
        ArrayAccess(ArrayAccessExpr), Lambda(LambdaExpr), Await(AwaitExpr), Set(SetExpr), TypeOf(TypeOfExpr),
        Init(InitExpr), Test(TestExpr),
    ];
    Stmt(Stmt) for [
        Block(Block), Assignment(AssignmentStmt), Branch(BranchStmt), Defer(DeferStmt), Return(ReturnStmt),
        Import(ImportStmt), Module(ModuleStmt), FuncPrototype(FuncPrototype),
    ];
    Type(TypeExpr) for [Array(ArrayType), InferredArray(InferredArrayType)];
}

impl From<Identifier> for NodeKind {
    fn from(ident: Identifier) -> Self {
        NodeKind::Identifier(ident)
    }
}

impl From<Literal> for NodeKind {
    fn from(lit: Literal) -> Self {
        NodeKind::Literal(lit)
    }
}

impl From<Decl> for NodeKind {
    fn from(decl: Decl) -> Self {
        NodeKind::Decl(decl)
    }
}

impl From<Expr> for NodeKind {
    fn from(expr: Expr) -> Self {
        NodeKind::Expr(expr)
    }
}

impl From<Stmt> for NodeKind {
    fn from(stmt: Stmt) -> Self {
        NodeKind::Stmt(stmt)
    }
}

impl From<TypeExpr> for NodeKind {
    fn from(ty: TypeExpr) -> Self {
        NodeKind::Type(ty)
    }
}

// ============================================================================
// Files
// ============================================================================

/// One parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct AstFile {
    pub path: PathBuf,
    /// Final path component (`main.ad`).
    pub display_name: String,
    pub num_lines: u32,
    pub num_bytes: u32,
    /// From the `module` statement, else the file stem.
    pub module: String,
    /// `test_*.ad` files.
    pub is_test: bool,
    pub items: Vec<AstNode>,
}

impl AstFile {
    /// Assemble file metadata around parsed items; `eof` is the end-of-input location.
    pub fn new(path: &Path, eof: &Location, items: Vec<AstNode>) -> Self {
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let module = items
            .iter()
            .find_map(|item| match &item.kind {
                NodeKind::Stmt(Stmt::Module(module)) => Some(module.name()),
                _ => None,
            })
            .or_else(|| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            is_test: display_name.starts_with("test_"),
            display_name,
            num_lines: eof.line,
            num_bytes: eof.offset,
            module,
            items,
        }
    }
}

// ============================================================================
// Visitor trait for AST traversal
// ============================================================================

/// Read-only traversal. Override the hooks you need; call the matching `walk_*` function to keep descending.
pub trait Visitor {
    fn visit_file(&mut self, file: &AstFile) {
        for item in &file.items {
            self.visit_node(item);
        }
    }

    fn visit_node(&mut self, node: &AstNode) {
        walk_node(self, node);
    }

    fn visit_identifier(&mut self, _ident: &Identifier, _loc: &Location) {}
    fn visit_literal(&mut self, _lit: &Literal, _loc: &Location) {}
    fn visit_decl(&mut self, _decl: &Decl, _loc: &Location) {}
    fn visit_expr(&mut self, _expr: &Expr, _loc: &Location) {}
    fn visit_stmt(&mut self, _stmt: &Stmt, _loc: &Location) {}
    fn visit_type(&mut self, _ty: &TypeExpr, _loc: &Location) {}
}

/// Call the per-category hook for `node`, then visit its children in source order.
pub fn walk_node<V: Visitor + ?Sized>(visitor: &mut V, node: &AstNode) {
    match &node.kind {
        NodeKind::Identifier(ident) => visitor.visit_identifier(ident, &node.loc),
        NodeKind::Literal(lit) => visitor.visit_literal(lit, &node.loc),
        NodeKind::Decl(decl) => visitor.visit_decl(decl, &node.loc),
        NodeKind::Expr(expr) => visitor.visit_expr(expr, &node.loc),
        NodeKind::Stmt(stmt) => visitor.visit_stmt(stmt, &node.loc),
        NodeKind::Type(ty) => visitor.visit_type(ty, &node.loc),
    }
    for child in node.kind.children() {
        visitor.visit_node(child);
    }
}

impl NodeKind {
    /// Direct children in source order.
    pub fn children(&self) -> Vec<&AstNode> {
        let mut out: Vec<&AstNode> = Vec::new();
        match self {
            NodeKind::Identifier(_) | NodeKind::Literal(_) => {}
            NodeKind::Decl(decl) => match decl {
                Decl::Func(f) => {
                    out.extend(&f.params);
                    out.extend(f.return_type.as_deref());
                    out.push(&f.body);
                }
                Decl::Enum(e) => out.extend(e.variants.iter().filter_map(|v| v.value.as_deref())),
                Decl::Struct(s) => {
                    out.extend(&s.fields);
                    out.extend(&s.methods);
                }
                Decl::Union(u) => out.extend(&u.fields),
                Decl::Var(v) => {
                    out.extend(v.ty.as_deref());
                    out.extend(v.value.as_deref());
                }
                Decl::Const(c) => {
                    for field in &c.fields {
                        out.extend(field.ty.as_deref());
                        out.push(&field.value);
                    }
                }
                Decl::Global(g) => {
                    for field in &g.fields {
                        out.extend(field.ty.as_deref());
                        out.extend(field.value.as_deref());
                    }
                }
                Decl::Alias(_) => {}
                Decl::SumType(s) => out.extend(&s.variants),
                Decl::Param(p) => out.push(&p.ty),
                Decl::Test(t) => out.push(&t.body),
            },
            NodeKind::Expr(expr) => match expr {
                Expr::BinaryOp(b) => {
                    out.push(&b.lhs);
                    out.push(&b.rhs);
                }
                Expr::PrefixOp(p) => out.push(&p.expr),
                Expr::FieldAccess(f) => out.push(&f.target),
                Expr::FuncCall(c) => {
                    out.push(&c.callee);
                    out.extend(&c.args);
                    out.extend(c.kwd_args.iter().map(|k| &k.value));
                }
                Expr::If(i) => {
                    out.push(&i.condition);
                    out.push(&i.then_block);
                    out.extend(i.else_node.as_deref());
                }
                Expr::LoopWhile(l) => {
                    out.extend(l.condition.as_deref());
                    out.extend(&l.statements);
                }
                Expr::LoopC(l) => {
                    out.extend(l.init.as_deref());
                    out.extend(l.condition.as_deref());
                    out.extend(l.update.as_deref());
                    out.extend(&l.statements);
                }
                Expr::LoopIn(l) => {
                    out.push(&l.iterable);
                    out.extend(&l.statements);
                }
                Expr::Match(m) => {
                    out.push(&m.scrutinee);
                    out.extend(&m.branches);
                }
                Expr::MatchBranch(b) => {
                    out.extend(&b.patterns);
                    out.push(&b.body);
                }
                Expr::Range(r) => {
                    out.extend(r.start.as_deref());
                    out.extend(r.end.as_deref());
                }
                Expr::Catch(c) => {
                    out.push(&c.lhs);
                    out.push(&c.rhs);
                }
                Expr::Cast(c) => match c.style {
                    CastStyle::As => {
                        out.push(&c.expr);
                        out.push(&c.ty);
                    }
                    CastStyle::Keyword => {
                        out.push(&c.ty);
                        out.extend(c.arg.as_deref());
                        out.push(&c.expr);
                    }
                },
                Expr::Slice(s) => {
                    out.push(&s.target);
                    out.extend(s.lower.as_deref());
                    out.extend(s.upper.as_deref());
                    out.extend(s.sentinel.as_deref());
                }
                Expr::ArrayAccess(a) => {
                    out.push(&a.target);
                    out.push(&a.index);
                }
                Expr::Lambda(l) => {
                    out.extend(&l.params);
                    out.extend(l.return_type.as_deref());
                    out.push(&l.body);
                }
                Expr::Await(a) => out.push(&a.expr),
                Expr::Set(s) => out.extend(&s.exprs),
                Expr::TypeOf(t) => out.push(&t.expr),
                Expr::Init(i) => out.extend(&i.entries),
                Expr::Test(t) => {
                    out.push(&t.target);
                    out.push(&t.then_node);
                    out.extend(t.else_node.as_deref());
                }
            },
            NodeKind::Stmt(stmt) => match stmt {
                Stmt::Block(b) => out.extend(&b.statements),
                Stmt::Assignment(a) => {
                    out.extend(&a.targets);
                    out.extend(&a.values);
                }
                Stmt::Branch(b) => out.extend(b.value.as_deref()),
                Stmt::Defer(d) => out.push(&d.body),
                Stmt::Return(r) => out.extend(r.value.as_deref()),
                Stmt::FuncPrototype(p) => {
                    out.extend(&p.params);
                    out.extend(p.return_type.as_deref());
                }
                Stmt::Import(_) | Stmt::Module(_) | Stmt::Empty | Stmt::Unreachable => {}
            },
            NodeKind::Type(ty) => {
                let (size, sentinel, qualifiers, child) = match ty {
                    TypeExpr::Array(a) => (Some(&*a.size), a.sentinel.as_deref(), &a.qualifiers, &*a.child),
                    TypeExpr::InferredArray(a) => (None, a.sentinel.as_deref(), &a.qualifiers, &*a.child),
                };
                out.extend(size);
                out.extend(sentinel);
                out.extend(qualifiers.align.as_deref());
                out.push(child);
            }
        }
        out
    }
}
