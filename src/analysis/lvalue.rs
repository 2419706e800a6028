//! What an assignment target defines.

use crate::analysis::def_point::DefPoint;
use crate::analysis::rd_walk::RdWalker;
use crate::analysis::reaching::ReachingDefs;
use crate::tree::model::{Expr, ExprKind};
use crate::tree::visit::{Flow, walk_expr};

impl RdWalker<'_> {
    /// Install into `rd` the definitions an assignment to `lhs` makes,
    /// attributed to the assignment expression itself. Returns false when
    /// the target is too complex to track concretely; the caller then
    /// analyzes the assignment as ordinary value uses.
    pub(super) fn check_lhs(&mut self, rd: &mut ReachingDefs, lhs: &Expr, assign: &Expr) -> bool {
        match &lhs.kind {
            ExprKind::Ref(inner) => self.check_lhs(rd, inner, assign),

            ExprKind::Name(id) => {
                let idents = self.idents;
                let Some(ident) = idents.get(*id) else {
                    return false;
                };
                let item = self.items.get_or_create_root(ident);
                self.items.add_with_init(
                    rd,
                    item,
                    DefPoint::Expr(assign.id),
                    false,
                    assign_rhs(assign),
                    idents,
                );
                true
            }

            ExprKind::List(elems) => {
                // Anything but plain names (table initializers, for example)
                // is out of reach.
                if !elems
                    .iter()
                    .all(|elem| matches!(elem.kind, ExprKind::Name(_)))
                {
                    return false;
                }
                let idents = self.idents;
                for elem in elems {
                    let Some(id) = elem.as_name() else { continue };
                    let Some(ident) = idents.get(id) else { continue };
                    // The RHS typing may be dynamic, so no inference of
                    // missing fields: each target counts as fully
                    // initialized.
                    let item = self.items.get_or_create_root(ident);
                    self.items.add_with_init(
                        rd,
                        item,
                        DefPoint::Expr(assign.id),
                        true,
                        None,
                        idents,
                    );
                }
                true
            }

            ExprKind::Field { base, field } => {
                if !matches!(base.kind, ExprKind::Name(_) | ExprKind::Field { .. }) {
                    return false;
                }
                // Walk the base so its own definitions and complaints land.
                if walk_expr(self, base) == Flow::AbortAll {
                    return true;
                }
                let idents = self.idents;
                let Some(base_item) = self.items.item_for_expr(base, idents) else {
                    // The base walk already complained; avoid a cascade.
                    return true;
                };
                let field_item = match self.items.find_field(base_item, field) {
                    Some(item) => item,
                    None => {
                        let field_ty = lhs.ty(idents);
                        self.items.create_field(base_item, field, &field_ty)
                    }
                };
                self.items.add_with_init(
                    rd,
                    field_item,
                    DefPoint::Expr(assign.id),
                    false,
                    assign_rhs(assign),
                    idents,
                );
                true
            }

            ExprKind::Index { base, indices } => {
                if let Some(base_id) = base.as_name() {
                    let idents = self.idents;
                    let Some(ident) = idents.get(base_id) else {
                        return false;
                    };
                    // Writing through an index initializes the container;
                    // the slot itself is not tracked. The index expression
                    // can still have problems of its own.
                    let item = self.items.get_or_create_root(ident);
                    rd.insert(item, DefPoint::Expr(assign.id));
                    for index in indices {
                        if walk_expr(self, index) == Flow::AbortAll {
                            break;
                        }
                    }
                    return true;
                }
                false
            }

            _ => false,
        }
    }
}

fn assign_rhs(assign: &Expr) -> Option<&Expr> {
    match &assign.kind {
        ExprKind::Assign { rhs, .. } => Some(rhs),
        _ => None,
    }
}
