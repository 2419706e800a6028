//! Resolved abstract syntax tree of the script language.
//!
//! The host's parser and resolver produce this tree; every statement and
//! expression node is addressable through its `NodeId`, and names carry
//! resolved `IdentId`s into the host's identifier table.

use std::fmt;

use crate::diag::Span;
use crate::ident::{IdentId, IdentTable, Scope};
use crate::tree::NodeId;
use crate::types::Type;

/// A function or event handler. Handlers may have several bodies (one per
/// registration site); analyses pick a body explicitly rather than walking
/// all of them.
#[derive(Debug, Clone)]
pub struct Func {
    pub id: NodeId,
    pub name: String,
    pub module: String,
    pub arg_names: Vec<String>,
    pub scope: Scope,
    pub bodies: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Stmt {
    pub id: NodeId,
    pub span: Span,
    pub kind: StmtKind,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Print(Vec<Expr>),
    Event(Expr),
    When {
        cond: Expr,
        body: Box<Stmt>,
    },
    Expr(Expr),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Box<Stmt>,
    },
    Switch {
        subject: Expr,
        cases: Vec<SwitchCase>,
    },
    For {
        loop_vars: Vec<IdentId>,
        value_var: Option<IdentId>,
        iter: Expr,
        body: Box<Stmt>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    List(Vec<Stmt>),
    /// Declarations of locals; aggregate-typed ones are initialized here.
    Init(Vec<IdentId>),
    Return(Option<Expr>),
    Next,
    Break,
    Fallthrough,
    Add(Expr),
    Delete(Expr),
}

/// A `switch` case: value labels, type-binding labels, or neither (the
/// default case).
#[derive(Debug, Clone)]
pub struct SwitchCase {
    pub exprs: Vec<Expr>,
    pub type_ids: Vec<IdentId>,
    pub body: Stmt,
}

impl SwitchCase {
    pub fn is_default(&self) -> bool {
        self.exprs.is_empty() && self.type_ids.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub id: NodeId,
    pub span: Span,
    pub kind: ExprKind,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Name(IdentId),
    Const(Literal),
    Ref(Box<Expr>),
    Assign {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    AddTo {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    List(Vec<Expr>),
    Field {
        base: Box<Expr>,
        field: String,
    },
    HasField {
        base: Box<Expr>,
        field: String,
    },
    Index {
        base: Box<Expr>,
        indices: Vec<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Lambda,
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Bool(bool),
    Count(u64),
    Str(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(value) => write!(f, "{}", value),
            Literal::Count(value) => write!(f, "{}", value),
            Literal::Str(value) => write!(f, "\"{}\"", value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => write!(f, "!"),
            UnaryOp::Neg => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    In,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::In => "in",
        };
        write!(f, "{}", op)
    }
}

impl Expr {
    pub fn is_const(&self) -> bool {
        matches!(self.kind, ExprKind::Const(_))
    }

    pub fn as_name(&self) -> Option<IdentId> {
        match self.kind {
            ExprKind::Name(id) => Some(id),
            _ => None,
        }
    }

    /// Static type of the expression where the analyses need one. Names,
    /// literals and field chains resolve; anything else is dynamic.
    pub fn ty(&self, idents: &IdentTable) -> Type {
        match &self.kind {
            ExprKind::Name(id) => idents
                .get(*id)
                .map(|ident| ident.ty.clone())
                .unwrap_or(Type::Any),
            ExprKind::Const(Literal::Bool(_)) => Type::Bool,
            ExprKind::Const(Literal::Count(_)) => Type::Count,
            ExprKind::Const(Literal::Str(_)) => Type::Str,
            ExprKind::Ref(inner) => inner.ty(idents),
            ExprKind::Field { base, field } => base
                .ty(idents)
                .as_record()
                .and_then(|record| record.field_type_by_name(field).cloned())
                .unwrap_or(Type::Any),
            ExprKind::HasField { .. } => Type::Bool,
            ExprKind::Index { base, .. } => match base.ty(idents) {
                Type::Vector(elem) => *elem,
                Type::Table(_, value) => *value,
                _ => Type::Any,
            },
            _ => Type::Any,
        }
    }
}
