//! Statement and expression nodes recorded while parsing.
//!
//! These are a purely syntactic record: beyond the identifier-kind checks
//! the statement compiler performs, nothing here is type- or bound-checked.
//! They live apart from the parser so the printer can consume them without
//! depending on it.

/// How a parameter is passed to a subroutine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassMode {
    ByValue,
    ByReference,
}

/// The six comparators a condition may use, exactly one per condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparator {
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Neq => "<>",
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
        }
    }
}

/// Binary arithmetic operators, standard precedence (`*` `/` over `+` `-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Sign of a signed constant or a leading expression sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Number(i64),
    CharLit(char),
    /// Bare identifier factor — not resolved against the symbol table
    Ident(String),
    /// Identifier followed by call arguments. A factor takes either a call
    /// argument list or index brackets, never both.
    Call { name: String, args: Vec<Expr> },
    /// Identifier followed by one or more index brackets
    Index { name: String, indexes: Vec<Expr> },
    Unary { sign: Sign, operand: Box<Expr> },
    Binary {
        op: ArithOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// `expression comparator expression` — no chaining, no connectives.
#[derive(Debug, Clone)]
pub struct Condition {
    pub left: Expr,
    pub op: Comparator,
    pub right: Expr,
}

/// An assignment target: a resolved Variable or Parameter name plus any
/// index expressions (syntactic only).
#[derive(Debug, Clone)]
pub struct VarRef {
    pub name: String,
    pub indexes: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    /// One or more comma-separated targets, `:=`, one or more
    /// comma-separated values. The grammar never compares the two counts.
    Assign {
        targets: Vec<VarRef>,
        values: Vec<Expr>,
    },
    /// `CALL name (args)` — the callee is not resolved and arguments are
    /// not checked against its parameters
    Call { name: String, args: Vec<Expr> },
    Compound(Vec<Stmt>),
    If {
        cond: Condition,
        then_branch: Option<Box<Stmt>>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Condition,
        body: Option<Box<Stmt>>,
    },
    /// The loop variable is consumed syntactically but never looked up.
    For {
        var: String,
        from: Expr,
        to: Expr,
        body: Option<Box<Stmt>>,
    },
}
