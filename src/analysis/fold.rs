//! Finds expressions whose operands are all constants, candidates for
//! folding by a later pass. Reporting only.

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::ident::IdentTable;
use crate::tree::format::describe_expr;
use crate::tree::model::{Expr, ExprKind, Stmt};
use crate::tree::visit::{Flow, Traverser, walk_stmt};

pub struct FoldableFinder<'a> {
    idents: &'a IdentTable,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> FoldableFinder<'a> {
    pub fn new(idents: &'a IdentTable, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self { idents, sink }
    }

    fn report(&mut self, kind: &'static str, expr: &Expr) {
        self.sink.report(Diagnostic::Foldable(
            kind,
            describe_expr(expr, self.idents),
            expr.span,
        ));
    }
}

impl Traverser for FoldableFinder<'_> {
    fn enter_expr(&mut self, expr: &Expr) -> Flow {
        match &expr.kind {
            ExprKind::Unary { operand, .. } if operand.is_const() => {
                self.report("unary", expr);
            }
            ExprKind::Binary { lhs, rhs, .. } if lhs.is_const() && rhs.is_const() => {
                self.report("binary", expr);
            }
            _ => {}
        }
        Flow::Continue
    }
}

pub fn find_foldable(body: &Stmt, idents: &IdentTable, sink: &mut dyn DiagnosticSink) {
    let mut finder = FoldableFinder::new(idents, sink);
    walk_stmt(&mut finder, body);
}

#[cfg(test)]
#[path = "../tests/analysis/t_fold.rs"]
mod tests;
