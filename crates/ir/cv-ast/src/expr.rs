//! Expressions, blocks and statements

use crate::{Ident, Item, Lifetime, LoopLabel, NodeId, Pat, Path, PathSegment, Ty};
use cv_span::FileSpan;

/// An expression
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// Id of the expression
    pub id: NodeId,
    /// Expression kind
    pub kind: ExprKind,
    /// Source location
    pub span: FileSpan,
}

/// Expression kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Literal value
    Literal(Lit),
    /// A lone identifier such as `x`
    Identifier(Ident),
    /// A path in expression position such as `a::b` or `Vec::<T>::new`
    Path(Path),
    /// Unary operation
    Unary(UnOp, Box<Expr>),
    /// Binary operation
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// Assignment `lhs = rhs` (also compound assignment)
    Assign(Box<Expr>, Box<Expr>),
    /// Function call
    Call(Box<Expr>, Vec<Expr>),
    /// Method call; the method name is resolved by the type checker
    MethodCall {
        /// Receiver expression
        receiver: Box<Expr>,
        /// Method name and turbofish arguments
        method: PathSegment,
        /// Arguments
        args: Vec<Expr>,
    },
    /// Field access; the field name is resolved by the type checker
    Field(Box<Expr>, Ident),
    /// Indexing
    Index(Box<Expr>, Box<Expr>),
    /// Tuple expression
    Tuple(Vec<Expr>),
    /// Array expression
    Array(Vec<Expr>),
    /// Borrow `&e` / `&mut e`
    AddrOf {
        /// Whether the borrow is mutable
        mutable: bool,
        /// Borrowed expression
        expr: Box<Expr>,
    },
    /// `e as T`
    Cast(Box<Expr>, Ty),
    /// Range `a..b`, `a..=b`, `..b`, `a..`
    Range {
        /// Lower bound
        start: Option<Box<Expr>>,
        /// Upper bound
        end: Option<Box<Expr>>,
        /// Whether the upper bound is inclusive
        inclusive: bool,
    },
    /// Block, optionally labeled: `'a: { .. }`
    Block(Block, Option<LoopLabel>),
    /// `if cond { .. } else ..`
    If {
        /// Condition
        cond: Box<Expr>,
        /// Then branch
        then: Block,
        /// Else branch
        else_: Option<Box<Expr>>,
    },
    /// `if let pat = scrutinee { .. } else ..`
    IfLet {
        /// Pattern
        pat: Pat,
        /// Scrutinee
        scrutinee: Box<Expr>,
        /// Then branch; sees the pattern's bindings
        then: Block,
        /// Else branch; does not see the pattern's bindings
        else_: Option<Box<Expr>>,
    },
    /// `match scrutinee { arms }`
    Match(Box<Expr>, Vec<Arm>),
    /// `'label: loop { .. }`
    Loop(Block, Option<LoopLabel>),
    /// `'label: while cond { .. }`
    While {
        /// Loop condition
        cond: Box<Expr>,
        /// Loop body
        body: Block,
        /// Optional label
        label: Option<LoopLabel>,
    },
    /// `'label: while let pat = scrutinee { .. }`
    WhileLet {
        /// Pattern
        pat: Pat,
        /// Scrutinee
        scrutinee: Box<Expr>,
        /// Loop body
        body: Block,
        /// Optional label
        label: Option<LoopLabel>,
    },
    /// `'label: for pat in iter { .. }`
    ForLoop {
        /// Pattern bound for each element
        pat: Pat,
        /// Iterated expression
        iter: Box<Expr>,
        /// Loop body
        body: Block,
        /// Optional label
        label: Option<LoopLabel>,
    },
    /// `break 'label value`
    Break(Option<Lifetime>, Option<Box<Expr>>),
    /// `continue 'label`
    Continue(Option<Lifetime>),
    /// `return value`
    Return(Option<Box<Expr>>),
    /// Closure `|params| -> T body`
    Closure(Closure),
    /// Struct literal
    Struct(StructExpr),
    /// Builtin macro invocation left after expansion, e.g. `println!(..)`
    MacroInvocation(MacCall),
}

/// Literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Lit {
    /// Integer literal
    Int(u128),
    /// Float literal (kept as written)
    Float(String),
    /// Boolean literal
    Bool(bool),
    /// Character literal
    Char(char),
    /// String literal
    Str(String),
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    /// `-e`
    Neg,
    /// `!e`
    Not,
    /// `*e`
    Deref,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

/// A `{ .. }` block
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Id of the block
    pub id: NodeId,
    /// Statements in order
    pub stmts: Vec<Stmt>,
    /// Trailing expression without a semicolon
    pub tail: Option<Box<Expr>>,
    /// Source location
    pub span: FileSpan,
}

impl Block {
    /// Items declared directly in this block
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.stmts.iter().filter_map(|stmt| match &stmt.kind {
            StmtKind::Item(item) => Some(&**item),
            _ => None,
        })
    }
}

/// A statement
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    /// Id of the statement
    pub id: NodeId,
    /// Statement kind
    pub kind: StmtKind,
    /// Source location
    pub span: FileSpan,
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `let pat: T = init else { .. };`
    Let(LetStmt),
    /// An item declared inside a block
    Item(Box<Item>),
    /// Expression followed by `;`
    Semi(Expr),
    /// Expression without `;` that is not the block's tail (e.g. `if`, `loop`)
    Expr(Expr),
    /// Lone `;`
    Empty,
}

/// `let` statement
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    /// Binding pattern
    pub pat: Pat,
    /// Declared type
    pub ty: Option<Ty>,
    /// Initializer
    pub init: Option<Box<Expr>>,
    /// Diverging `else` block of a let-else
    pub else_block: Option<Block>,
}

/// A `match` arm
#[derive(Debug, Clone, PartialEq)]
pub struct Arm {
    /// Id of the arm
    pub id: NodeId,
    /// Arm pattern
    pub pat: Pat,
    /// Guard expression
    pub guard: Option<Box<Expr>>,
    /// Arm body
    pub body: Box<Expr>,
    /// Source location
    pub span: FileSpan,
}

/// Closure expression
#[derive(Debug, Clone, PartialEq)]
pub struct Closure {
    /// Parameters
    pub params: Vec<ClosureParam>,
    /// Declared return type
    pub ret_ty: Option<Ty>,
    /// Body
    pub body: Box<Expr>,
}

/// Closure parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ClosureParam {
    /// Id of the parameter
    pub id: NodeId,
    /// Binding pattern
    pub pat: Pat,
    /// Declared type
    pub ty: Option<Ty>,
}

/// Struct literal `Path { fields, ..base }`
#[derive(Debug, Clone, PartialEq)]
pub struct StructExpr {
    /// Struct or variant path
    pub path: Path,
    /// Shape of the literal body
    pub body: StructExprBody,
}

/// The three shapes a struct literal body can take
#[derive(Debug, Clone, PartialEq)]
pub enum StructExprBody {
    /// `S {}`
    Empty,
    /// `S { a: e, b, ..base }`
    Fields {
        /// Field initializers
        fields: Vec<ExprField>,
        /// Functional update base
        base: Option<Box<Expr>>,
    },
    /// `S { ..base }`
    Base(Box<Expr>),
}

/// Field initializer inside a struct literal
#[derive(Debug, Clone, PartialEq)]
pub struct ExprField {
    /// Id of the field initializer; the field name resolves through it
    pub id: NodeId,
    /// Field name
    pub ident: Ident,
    /// Value; for shorthand fields this is an identifier expression
    pub expr: Expr,
    /// Whether the field was written as `a` instead of `a: a`
    pub is_shorthand: bool,
}

/// Macro invocation
#[derive(Debug, Clone, PartialEq)]
pub struct MacCall {
    /// Macro path
    pub path: Path,
    /// Parsed arguments
    pub args: Vec<Expr>,
}
