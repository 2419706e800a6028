//! Whether control may, or must, flow off the end of a statement.
//!
//! The may/must distinction drives join versus meet at control-flow merges.
//! While scanning statement lists the oracle also reports dead code: the
//! first statement preceded by a non-reaching one. Reports are deduplicated
//! by node so nested queries over the same list complain once.

use std::collections::HashSet;

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::ident::IdentTable;
use crate::tree::NodeId;
use crate::tree::format::describe_stmt;
use crate::tree::model::{Stmt, StmtKind};

pub struct ReachCtx<'a> {
    pub idents: &'a IdentTable,
    pub sink: &'a mut dyn DiagnosticSink,
    pub reported_dead: &'a mut HashSet<NodeId>,
}

pub fn reaches_end(
    stmt: &Stmt,
    is_definite: bool,
    ignore_break: bool,
    ctx: &mut ReachCtx<'_>,
) -> bool {
    match &stmt.kind {
        StmtKind::Next | StmtKind::Return(_) => false,

        StmtKind::Break => ignore_break,

        StmtKind::If {
            then_branch,
            else_branch,
            ..
        } => {
            let then_reaches = reaches_end(then_branch, is_definite, ignore_break, ctx);
            let else_reaches = reaches_end(else_branch, is_definite, ignore_break, ctx);
            if is_definite {
                then_reaches && else_reaches
            } else {
                then_reaches || else_reaches
            }
        }

        StmtKind::Switch { cases, .. } => {
            let mut reaches = is_definite;
            let mut default_seen = false;

            for case in cases {
                let body_reaches = reaches_end(&case.body, is_definite, true, ctx);

                if is_definite && !body_reaches {
                    reaches = false;
                }
                if !is_definite && body_reaches {
                    reaches = true;
                }
                if case.is_default() {
                    default_seen = true;
                }
            }

            // Without a default the fall-out path always exists for "may";
            // for "must" the switch cannot be shown to cover all values.
            if !is_definite && !default_seen {
                return true;
            }
            reaches
        }

        StmtKind::List(stmts) => {
            let mut reaches_so_far = true;
            for stmt in stmts {
                if !reaches_so_far {
                    if ctx.reported_dead.insert(stmt.id) {
                        ctx.sink.report(Diagnostic::DeadCode(
                            describe_stmt(stmt, ctx.idents),
                            stmt.span,
                        ));
                    }
                    return false;
                }
                if !reaches_end(stmt, is_definite, ignore_break, ctx) {
                    reaches_so_far = false;
                }
            }
            reaches_so_far
        }

        _ => true,
    }
}

#[cfg(test)]
#[path = "../tests/analysis/t_reachability.rs"]
mod tests;
