use std::fmt;

use crate::tree::NodeId;

/// The site attributed as the origin of a definition: a function entry, a
/// statement, or an expression. Two points are equal iff they name the same
/// site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefPoint {
    FuncEntry(NodeId),
    Stmt(NodeId),
    Expr(NodeId),
}

impl DefPoint {
    pub fn node(&self) -> NodeId {
        match self {
            DefPoint::FuncEntry(node) | DefPoint::Stmt(node) | DefPoint::Expr(node) => *node,
        }
    }
}

impl fmt::Display for DefPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefPoint::FuncEntry(node) => write!(f, "entry of func {}", node),
            DefPoint::Stmt(node) => write!(f, "stmt {}", node),
            DefPoint::Expr(node) => write!(f, "expr {}", node),
        }
    }
}
