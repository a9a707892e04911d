//! Binding power table for the expression engine.
//!
//! Higher levels bind tighter. All general binary operators share one
//! right-associative level, so `a * b + c` groups as `a * (b + c)` and
//! `a = b AND c` as `a = (b AND c)`. Only unary operators, analytic windows
//! and `BETWEEN` sit above it.

use crate::SyntaxKind::{self, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precedence {
    pub level: u8,
    pub assoc: Assoc,
}

impl Precedence {
    pub const fn new(level: u8, assoc: Assoc) -> Self {
        Self { level, assoc }
    }

    /// Minimum level for the right-hand operand: equal for right-associative
    /// operators, one higher otherwise.
    pub fn next_min(self) -> u8 {
        match self.assoc {
            Assoc::Right => self.level,
            Assoc::Left | Assoc::None => self.level + 1,
        }
    }
}

/// `NOT`, unary `-`
pub const UNARY: Precedence = Precedence::new(4, Assoc::None);
/// `expr OVER (...)`, `expr WITHIN GROUP (...)`, `expr KEEP (...)`
pub const ANALYTIC: Precedence = Precedence::new(3, Assoc::None);
/// `expr BETWEEN low AND high`
pub const BETWEEN: Precedence = Precedence::new(2, Assoc::Right);
/// Every [`BinaryOp`]
pub const BINARY: Precedence = Precedence::new(1, Assoc::Right);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Concat,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    Is,
    IsNot,
    In,
    NotIn,
    Like,
    NotLike,
    MemberOf,
    NotMemberOf,
}

impl BinaryOp {
    /// Recognise an operator starting at `tokens[0]`. Returns the operator
    /// and how many tokens it spans (`NOT MEMBER OF` spans three).
    pub fn from_tokens(tokens: [SyntaxKind; 3]) -> Option<(BinaryOp, usize)> {
        let op = match tokens {
            [IS_KW, NOT_KW, _] => (BinaryOp::IsNot, 2),
            [NOT_KW, IN_KW, _] => (BinaryOp::NotIn, 2),
            [NOT_KW, LIKE_KW, _] => (BinaryOp::NotLike, 2),
            [NOT_KW, MEMBER_KW, OF_KW] => (BinaryOp::NotMemberOf, 3),
            [MEMBER_KW, OF_KW, _] => (BinaryOp::MemberOf, 2),
            [PLUS, ..] => (BinaryOp::Add, 1),
            [MINUS, ..] => (BinaryOp::Sub, 1),
            [STAR, ..] => (BinaryOp::Mul, 1),
            [SLASH, ..] => (BinaryOp::Div, 1),
            [CONCAT, ..] => (BinaryOp::Concat, 1),
            [EQ, ..] => (BinaryOp::Eq, 1),
            [NE, ..] => (BinaryOp::NotEq, 1),
            [LT, ..] => (BinaryOp::Lt, 1),
            [LE, ..] => (BinaryOp::LtEq, 1),
            [GT, ..] => (BinaryOp::Gt, 1),
            [GE, ..] => (BinaryOp::GtEq, 1),
            [AND_KW, ..] => (BinaryOp::And, 1),
            [OR_KW, ..] => (BinaryOp::Or, 1),
            [IS_KW, ..] => (BinaryOp::Is, 1),
            [IN_KW, ..] => (BinaryOp::In, 1),
            [LIKE_KW, ..] => (BinaryOp::Like, 1),
            _ => return None,
        };
        Some(op)
    }

    pub fn precedence(self) -> Precedence {
        binary_precedence(self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Concat => "||",
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Is => "IS",
            BinaryOp::IsNot => "IS NOT",
            BinaryOp::In => "IN",
            BinaryOp::NotIn => "NOT IN",
            BinaryOp::Like => "LIKE",
            BinaryOp::NotLike => "NOT LIKE",
            BinaryOp::MemberOf => "MEMBER OF",
            BinaryOp::NotMemberOf => "NOT MEMBER OF",
        }
    }
}

/// The flattened table: one shared level for every binary operator.
pub fn binary_precedence(_op: BinaryOp) -> Precedence {
    BINARY
}
