use crate::tree::model::*;

/// Continuation token returned by traversal hooks.
///
/// `SkipChildren` prunes the node's subtree but still runs the node's leave
/// hook, so post-state installation stays uniform. `AbortAll` unwinds the
/// entire walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    SkipChildren,
    AbortAll,
}

/// Tree traversal with enter/leave hooks.
///
/// Implement the hooks you care about; the `walk_*` functions drive the
/// recursion and honor the returned [`Flow`] tokens. A hook that walks part
/// of a subtree itself returns `Flow::SkipChildren` to keep the generic
/// walker from revisiting it.
pub trait Traverser {
    fn enter_func(&mut self, _func: &Func) -> Flow {
        Flow::Continue
    }

    fn leave_func(&mut self, _func: &Func) -> Flow {
        Flow::Continue
    }

    fn enter_stmt(&mut self, _stmt: &Stmt) -> Flow {
        Flow::Continue
    }

    fn leave_stmt(&mut self, _stmt: &Stmt) -> Flow {
        Flow::Continue
    }

    fn enter_expr(&mut self, _expr: &Expr) -> Flow {
        Flow::Continue
    }

    fn leave_expr(&mut self, _expr: &Expr) -> Flow {
        Flow::Continue
    }
}

pub fn walk_func<V: Traverser + ?Sized>(v: &mut V, func: &Func) -> Flow {
    match v.enter_func(func) {
        Flow::AbortAll => return Flow::AbortAll,
        Flow::SkipChildren => {}
        Flow::Continue => {
            for body in &func.bodies {
                if walk_stmt(v, body) == Flow::AbortAll {
                    return Flow::AbortAll;
                }
            }
        }
    }
    match v.leave_func(func) {
        Flow::AbortAll => Flow::AbortAll,
        _ => Flow::Continue,
    }
}

pub fn walk_stmt<V: Traverser + ?Sized>(v: &mut V, stmt: &Stmt) -> Flow {
    match v.enter_stmt(stmt) {
        Flow::AbortAll => return Flow::AbortAll,
        Flow::SkipChildren => {}
        Flow::Continue => {
            if walk_stmt_children(v, stmt) == Flow::AbortAll {
                return Flow::AbortAll;
            }
        }
    }
    match v.leave_stmt(stmt) {
        Flow::AbortAll => Flow::AbortAll,
        _ => Flow::Continue,
    }
}

pub fn walk_stmt_children<V: Traverser + ?Sized>(v: &mut V, stmt: &Stmt) -> Flow {
    match &stmt.kind {
        StmtKind::Print(args) => {
            for arg in args {
                if walk_expr(v, arg) == Flow::AbortAll {
                    return Flow::AbortAll;
                }
            }
        }
        StmtKind::Event(expr) | StmtKind::Expr(expr) => {
            if walk_expr(v, expr) == Flow::AbortAll {
                return Flow::AbortAll;
            }
        }
        StmtKind::When { cond, body } => {
            if walk_expr(v, cond) == Flow::AbortAll {
                return Flow::AbortAll;
            }
            if walk_stmt(v, body) == Flow::AbortAll {
                return Flow::AbortAll;
            }
        }
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            if walk_expr(v, cond) == Flow::AbortAll {
                return Flow::AbortAll;
            }
            if walk_stmt(v, then_branch) == Flow::AbortAll {
                return Flow::AbortAll;
            }
            if walk_stmt(v, else_branch) == Flow::AbortAll {
                return Flow::AbortAll;
            }
        }
        StmtKind::Switch { subject, cases } => {
            if walk_expr(v, subject) == Flow::AbortAll {
                return Flow::AbortAll;
            }
            for case in cases {
                for expr in &case.exprs {
                    if walk_expr(v, expr) == Flow::AbortAll {
                        return Flow::AbortAll;
                    }
                }
                if walk_stmt(v, &case.body) == Flow::AbortAll {
                    return Flow::AbortAll;
                }
            }
        }
        StmtKind::For { iter, body, .. } => {
            if walk_expr(v, iter) == Flow::AbortAll {
                return Flow::AbortAll;
            }
            if walk_stmt(v, body) == Flow::AbortAll {
                return Flow::AbortAll;
            }
        }
        StmtKind::While { cond, body } => {
            if walk_expr(v, cond) == Flow::AbortAll {
                return Flow::AbortAll;
            }
            if walk_stmt(v, body) == Flow::AbortAll {
                return Flow::AbortAll;
            }
        }
        StmtKind::List(stmts) => {
            for stmt in stmts {
                if walk_stmt(v, stmt) == Flow::AbortAll {
                    return Flow::AbortAll;
                }
            }
        }
        StmtKind::Return(expr) => {
            if let Some(expr) = expr
                && walk_expr(v, expr) == Flow::AbortAll
            {
                return Flow::AbortAll;
            }
        }
        StmtKind::Add(expr) | StmtKind::Delete(expr) => {
            if walk_expr(v, expr) == Flow::AbortAll {
                return Flow::AbortAll;
            }
        }
        StmtKind::Init(_) | StmtKind::Next | StmtKind::Break | StmtKind::Fallthrough => {}
    }
    Flow::Continue
}

pub fn walk_expr<V: Traverser + ?Sized>(v: &mut V, expr: &Expr) -> Flow {
    match v.enter_expr(expr) {
        Flow::AbortAll => return Flow::AbortAll,
        Flow::SkipChildren => {}
        Flow::Continue => {
            if walk_expr_children(v, expr) == Flow::AbortAll {
                return Flow::AbortAll;
            }
        }
    }
    match v.leave_expr(expr) {
        Flow::AbortAll => Flow::AbortAll,
        _ => Flow::Continue,
    }
}

pub fn walk_expr_children<V: Traverser + ?Sized>(v: &mut V, expr: &Expr) -> Flow {
    match &expr.kind {
        ExprKind::Name(_) | ExprKind::Const(_) | ExprKind::Lambda => {}
        ExprKind::Ref(inner) => {
            if walk_expr(v, inner) == Flow::AbortAll {
                return Flow::AbortAll;
            }
        }
        ExprKind::Assign { lhs, rhs } | ExprKind::AddTo { lhs, rhs } => {
            if walk_expr(v, lhs) == Flow::AbortAll {
                return Flow::AbortAll;
            }
            if walk_expr(v, rhs) == Flow::AbortAll {
                return Flow::AbortAll;
            }
        }
        ExprKind::List(elems) => {
            for elem in elems {
                if walk_expr(v, elem) == Flow::AbortAll {
                    return Flow::AbortAll;
                }
            }
        }
        ExprKind::Field { base, .. } | ExprKind::HasField { base, .. } => {
            if walk_expr(v, base) == Flow::AbortAll {
                return Flow::AbortAll;
            }
        }
        ExprKind::Index { base, indices } => {
            if walk_expr(v, base) == Flow::AbortAll {
                return Flow::AbortAll;
            }
            for index in indices {
                if walk_expr(v, index) == Flow::AbortAll {
                    return Flow::AbortAll;
                }
            }
        }
        ExprKind::Call { callee, args } => {
            if walk_expr(v, callee) == Flow::AbortAll {
                return Flow::AbortAll;
            }
            for arg in args {
                if walk_expr(v, arg) == Flow::AbortAll {
                    return Flow::AbortAll;
                }
            }
        }
        ExprKind::Unary { operand, .. } => {
            if walk_expr(v, operand) == Flow::AbortAll {
                return Flow::AbortAll;
            }
        }
        ExprKind::Binary { lhs, rhs, .. } => {
            if walk_expr(v, lhs) == Flow::AbortAll {
                return Flow::AbortAll;
            }
            if walk_expr(v, rhs) == Flow::AbortAll {
                return Flow::AbortAll;
            }
        }
    }
    Flow::Continue
}

#[cfg(test)]
#[path = "../tests/t_visit.rs"]
mod tests;
