//! Compact one-line rendering of tree nodes for diagnostics and trace dumps.

use crate::ident::IdentTable;
use crate::tree::model::*;

pub fn describe_expr(expr: &Expr, idents: &IdentTable) -> String {
    match &expr.kind {
        ExprKind::Name(id) => idents
            .get(*id)
            .map(|ident| ident.name.clone())
            .unwrap_or_else(|| format!("<ident {}>", id)),
        ExprKind::Const(literal) => literal.to_string(),
        ExprKind::Ref(inner) => describe_expr(inner, idents),
        ExprKind::Assign { lhs, rhs } => format!(
            "{} = {}",
            describe_expr(lhs, idents),
            describe_expr(rhs, idents)
        ),
        ExprKind::AddTo { lhs, rhs } => format!(
            "{} += {}",
            describe_expr(lhs, idents),
            describe_expr(rhs, idents)
        ),
        ExprKind::List(elems) => format!("[{}]", describe_exprs(elems, idents)),
        ExprKind::Field { base, field } => format!("{}${}", describe_expr(base, idents), field),
        ExprKind::HasField { base, field } => {
            format!("{}?${}", describe_expr(base, idents), field)
        }
        ExprKind::Index { base, indices } => format!(
            "{}[{}]",
            describe_expr(base, idents),
            describe_exprs(indices, idents)
        ),
        ExprKind::Call { callee, args } => format!(
            "{}({})",
            describe_expr(callee, idents),
            describe_exprs(args, idents)
        ),
        ExprKind::Lambda => "function() { ... }".to_string(),
        ExprKind::Unary { op, operand } => format!("{}{}", op, describe_expr(operand, idents)),
        ExprKind::Binary { op, lhs, rhs } => format!(
            "{} {} {}",
            describe_expr(lhs, idents),
            op,
            describe_expr(rhs, idents)
        ),
    }
}

pub fn describe_stmt(stmt: &Stmt, idents: &IdentTable) -> String {
    match &stmt.kind {
        StmtKind::Print(args) => format!("print {}", describe_exprs(args, idents)),
        StmtKind::Event(expr) => format!("event {}", describe_expr(expr, idents)),
        StmtKind::When { cond, .. } => format!("when ({})", describe_expr(cond, idents)),
        StmtKind::Expr(expr) => describe_expr(expr, idents),
        StmtKind::If { cond, .. } => format!("if ({})", describe_expr(cond, idents)),
        StmtKind::Switch { subject, .. } => {
            format!("switch ({})", describe_expr(subject, idents))
        }
        StmtKind::For { loop_vars, iter, .. } => format!(
            "for ({} in {})",
            describe_idents(loop_vars, idents),
            describe_expr(iter, idents)
        ),
        StmtKind::While { cond, .. } => format!("while ({})", describe_expr(cond, idents)),
        StmtKind::List(_) => "{ ... }".to_string(),
        StmtKind::Init(ids) => format!("local {}", describe_idents(ids, idents)),
        StmtKind::Return(Some(expr)) => format!("return {}", describe_expr(expr, idents)),
        StmtKind::Return(None) => "return".to_string(),
        StmtKind::Next => "next".to_string(),
        StmtKind::Break => "break".to_string(),
        StmtKind::Fallthrough => "fallthrough".to_string(),
        StmtKind::Add(expr) => format!("add {}", describe_expr(expr, idents)),
        StmtKind::Delete(expr) => format!("delete {}", describe_expr(expr, idents)),
    }
}

fn describe_exprs(exprs: &[Expr], idents: &IdentTable) -> String {
    exprs
        .iter()
        .map(|expr| describe_expr(expr, idents))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_idents(ids: &[crate::ident::IdentId], idents: &IdentTable) -> String {
    ids.iter()
        .map(|id| {
            idents
                .get(*id)
                .map(|ident| ident.name.clone())
                .unwrap_or_else(|| format!("<ident {}>", id))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
