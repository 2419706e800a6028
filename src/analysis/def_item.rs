//! Definition items: the things a definition can target.
//!
//! A root item wraps a resolved identifier; field items hang off a parent
//! item per record field, created lazily. Items live in an arena owned by
//! one analysis run; identity is the arena index, so path equality and item
//! equality coincide by construction.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use crate::analysis::def_point::DefPoint;
use crate::analysis::reaching::ReachingDefs;
use crate::ident::{Ident, IdentId, IdentTable};
use crate::tree::model::{Expr, ExprKind};
use crate::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefItemId(pub u32);

impl fmt::Display for DefItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
pub struct DefItem {
    pub id: DefItemId,
    /// Dotted path name, e.g. `conn$id$orig_h`.
    pub name: String,
    pub ty: Type,
    pub parent: Option<DefItemId>,
    fields: IndexMap<String, DefItemId>,
}

#[derive(Debug, Default)]
pub struct DefItemArena {
    items: Vec<DefItem>,
    roots: HashMap<IdentId, DefItemId>,
}

impl DefItemArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(&self, id: DefItemId) -> &DefItem {
        &self.items[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_or_create_root(&mut self, ident: &Ident) -> DefItemId {
        if let Some(&id) = self.roots.get(&ident.id) {
            return id;
        }
        let id = DefItemId(self.items.len() as u32);
        self.items.push(DefItem {
            id,
            name: ident.name.clone(),
            ty: ident.ty.clone(),
            parent: None,
            fields: IndexMap::new(),
        });
        self.roots.insert(ident.id, id);
        id
    }

    pub fn find_root(&self, ident: IdentId) -> Option<DefItemId> {
        self.roots.get(&ident).copied()
    }

    pub fn find_field(&self, parent: DefItemId, name: &str) -> Option<DefItemId> {
        self.item(parent).fields.get(name).copied()
    }

    /// Creates the field item under `parent`, or returns the existing one.
    /// Creation is structural; it records no definition.
    pub fn create_field(&mut self, parent: DefItemId, name: &str, ty: &Type) -> DefItemId {
        if let Some(existing) = self.find_field(parent, name) {
            return existing;
        }
        let id = DefItemId(self.items.len() as u32);
        let path = format!("{}${}", self.item(parent).name, name);
        self.items.push(DefItem {
            id,
            name: path,
            ty: ty.clone(),
            parent: Some(parent),
            fields: IndexMap::new(),
        });
        self.items[parent.0 as usize]
            .fields
            .insert(name.to_string(), id);
        id
    }

    /// Item for a name or a chain of field accesses over one; `None` for any
    /// other expression shape, or when a field of the chain was never
    /// created.
    pub fn item_for_expr(&mut self, expr: &Expr, idents: &IdentTable) -> Option<DefItemId> {
        match &expr.kind {
            ExprKind::Name(id) => {
                let ident = idents.get(*id)?;
                Some(self.get_or_create_root(ident))
            }
            ExprKind::Field { base, field } => {
                let base_item = self.item_for_expr(base, idents)?;
                self.find_field(base_item, field)
            }
            _ => None,
        }
    }

    /// Records `(item, point)` and, for record-typed items, populates
    /// field-granular definitions by inspecting the assignment RHS.
    ///
    /// A dynamic RHS, or one too complex to resolve to an item, makes the
    /// target count as fully initialized; otherwise a field is defined here
    /// iff the RHS item defines it or the field declaration has a default.
    pub fn add_with_init(
        &mut self,
        rd: &mut ReachingDefs,
        item: DefItemId,
        point: DefPoint,
        assume_full: bool,
        rhs: Option<&Expr>,
        idents: &IdentTable,
    ) {
        rd.insert(item, point);

        if !self.item(item).ty.is_record() {
            return;
        }

        let mut assume_full = assume_full;
        let mut rhs_item = None;
        if let Some(rhs) = rhs {
            if rhs.ty(idents) == Type::Any {
                // All bets are off.
                assume_full = true;
            } else {
                rhs_item = self.item_for_expr(rhs, idents);
                if rhs_item.is_none() {
                    // The RHS is more complicated than a name or a field
                    // chain; treat the value as fully initialized.
                    assume_full = true;
                }
            }
        }

        self.create_record_defs(rd, item, assume_full, point, rhs_item);
    }

    pub fn create_record_defs(
        &mut self,
        rd: &mut ReachingDefs,
        item: DefItemId,
        assume_full: bool,
        point: DefPoint,
        rhs_item: Option<DefItemId>,
    ) {
        let Some(record) = self.item(item).ty.as_record().cloned() else {
            return;
        };

        for index in 0..record.num_fields() {
            let name = record.field_name(index);
            let child_rhs = rhs_item.and_then(|rhs| self.find_field(rhs, name));

            let defined = assume_full || child_rhs.is_some() || record.field_has_default(index);
            if !defined {
                continue;
            }

            let field_ty = record.field_type(index);
            let child = self.create_field(item, name, field_ty);
            rd.insert(child, point);

            if field_ty.is_record() {
                self.create_record_defs(rd, child, assume_full, point, child_rhs);
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/analysis/t_def_item.rs"]
mod tests;
