//! Expression nodes for the Eightebed AST.

use super::refs::Ref;
use super::types::Type;

/// A binary operator.
///
/// All operators are integer-valued over integer operands. Note that `=` is
/// *equality* in Eightebed source (assignment is a statement form), and `&`
/// and `|` are logical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// Addition, `+`.
    Add,
    /// Subtraction, `-`.
    Sub,
    /// Multiplication, `*`.
    Mul,
    /// Division, `/`.
    Div,
    /// Equality, `=` in source, lowered to C `==`.
    Eq,
    /// Greater-than, `>`.
    Gt,
    /// Logical and, `&` in source, lowered to C `&&`.
    And,
    /// Logical or, `|` in source, lowered to C `||`.
    Or,
}

impl BinOp {
    /// Maps a source lexeme to its operator.
    pub fn from_lexeme(lexeme: &str) -> Option<BinOp> {
        match lexeme {
            "+" => Some(BinOp::Add),
            "-" => Some(BinOp::Sub),
            "*" => Some(BinOp::Mul),
            "/" => Some(BinOp::Div),
            "=" => Some(BinOp::Eq),
            ">" => Some(BinOp::Gt),
            "&" => Some(BinOp::And),
            "|" => Some(BinOp::Or),
            _ => None,
        }
    }

    /// The operator's source form.
    pub fn lexeme(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "=",
            BinOp::Gt => ">",
            BinOp::And => "&",
            BinOp::Or => "|",
        }
    }

    /// The operator's C form.
    pub fn c_op(&self) -> &'static str {
        match self {
            BinOp::Eq => "==",
            BinOp::And => "&&",
            BinOp::Or => "||",
            other => other.lexeme(),
        }
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An integer constant.
    IntConst(i64),
    /// A reference used as a value.
    Ref(Ref),
    /// A parenthesized binary operation `(lhs op rhs)`.
    BinOp {
        /// Left operand.
        lhs: Box<Expr>,
        /// The operator.
        op: BinOp,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Heap allocation `malloc T`, yielding a pointer to `T`.
    Malloc(Type),
    /// Validity test `valid e`, yielding an integer.
    Valid(Box<Expr>),
}

impl Expr {
    /// Creates a binary operation expression.
    pub fn binop(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        Expr::BinOp {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    /// Creates a validity test expression.
    pub fn valid(expr: Expr) -> Expr {
        Expr::Valid(Box::new(expr))
    }
}
