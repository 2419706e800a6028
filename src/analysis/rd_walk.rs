//! Reaching-definitions traversal driver.
//!
//! Decorates every statement and expression of one function body with pre-
//! and post-execution reaching-definition sets, walking the tree in order.
//! Each node's pre-set comes from the most recently finished node (its post
//! if any, else its pre); construct-specific rules compute the post-set.
//! Uses of identifiers and record fields with no reaching definition are
//! reported, as is dead code behind non-reaching statements.

use std::collections::HashSet;

use crate::analysis::FuncAnalysis;
use crate::analysis::def_item::DefItemArena;
use crate::analysis::def_point::DefPoint;
use crate::analysis::facts::FlowFacts;
use crate::analysis::reachability::{ReachCtx, reaches_end};
use crate::analysis::reaching::ReachingDefs;
use crate::diag::{Diagnostic, DiagnosticSink};
use crate::ident::{IdentId, IdentTable, ScopeClass, make_full_name};
use crate::tree::NodeId;
use crate::tree::format::{describe_expr, describe_stmt};
use crate::tree::model::{Expr, ExprKind, Func, Stmt, StmtKind};
use crate::tree::visit::{Flow, Traverser, walk_expr, walk_stmt};

pub struct RdWalker<'a> {
    pub(super) idents: &'a IdentTable,
    pub(super) sink: &'a mut dyn DiagnosticSink,
    pub(super) items: DefItemArena,
    pub(super) facts: FlowFacts,
    /// The node we most recently finished installing facts for.
    last_node: Option<NodeId>,
    reported_dead: HashSet<NodeId>,
    trace: bool,
}

impl<'a> RdWalker<'a> {
    pub fn new(idents: &'a IdentTable, sink: &'a mut dyn DiagnosticSink, trace: bool) -> Self {
        Self {
            idents,
            sink,
            items: DefItemArena::new(),
            facts: FlowFacts::new(),
            last_node: None,
            reported_dead: HashSet::new(),
            trace,
        }
    }

    pub fn into_analysis(self) -> FuncAnalysis {
        FuncAnalysis {
            items: self.items,
            facts: self.facts,
        }
    }

    /// Install fully-initialized definitions for the formal parameters as
    /// the function node's post-state.
    pub fn enter_function(&mut self, func: &Func) {
        let idents = self.idents;
        let mut rd = ReachingDefs::new();

        for arg_name in &func.arg_names {
            let arg_id = func
                .scope
                .lookup(arg_name)
                .or_else(|| func.scope.lookup(&make_full_name(&func.module, arg_name)));
            let Some(arg_id) = arg_id else { continue };
            let Some(ident) = idents.get(arg_id) else {
                continue;
            };
            let item = self.items.get_or_create_root(ident);
            self.items.add_with_init(
                &mut rd,
                item,
                DefPoint::FuncEntry(func.id),
                true,
                None,
                idents,
            );
        }

        self.facts.add_post(func.id, rd);
        self.last_node = Some(func.id);

        if self.trace {
            eprintln!(
                "traversing function {}, post RDs:\n{}",
                func.name,
                self.facts.post(func.id).render(&self.items)
            );
        }
    }

    /// Aggregate-typed locals from the function's init list are initialized
    /// at entry, before the body runs.
    pub fn track_inits(&mut self, func: &Func, inits: &[IdentId]) {
        let idents = self.idents;
        let mut rd = ReachingDefs::new();

        for &init in inits {
            let Some(ident) = idents.get(init) else {
                continue;
            };
            if !ident.ty.is_aggregate() {
                continue;
            }
            let item = self.items.get_or_create_root(ident);
            self.items.add_with_init(
                &mut rd,
                item,
                DefPoint::FuncEntry(func.id),
                false,
                None,
                idents,
            );
        }

        self.facts.add_post(func.id, rd);
    }

    fn predecessor_rds(&self) -> ReachingDefs {
        let Some(last) = self.last_node else {
            return ReachingDefs::new();
        };
        let post = self.facts.post(last);
        if !post.is_empty() {
            post.clone()
        } else {
            // The post-state hasn't been produced yet.
            self.facts.pre(last).clone()
        }
    }

    /// Pre-state for a node: an explicit branch seed if one was installed,
    /// otherwise the predecessor's fact, recorded as the node's pre-set.
    fn install_pre(&mut self, node: NodeId) -> ReachingDefs {
        if self.facts.has_pre(node) {
            self.facts.pre(node).clone()
        } else {
            let rd = self.predecessor_rds();
            self.facts.add_pre(node, rd.clone());
            rd
        }
    }

    fn may_reach_end(&mut self, stmt: &Stmt) -> bool {
        let mut ctx = ReachCtx {
            idents: self.idents,
            sink: &mut *self.sink,
            reported_dead: &mut self.reported_dead,
        };
        reaches_end(stmt, false, false, &mut ctx)
    }

    fn is_aggr(&self, expr: &Expr) -> bool {
        let Some(id) = expr.as_name() else {
            return false;
        };
        self.idents
            .get(id)
            .is_some_and(|ident| ident.ty.is_aggregate())
    }
}

impl Traverser for RdWalker<'_> {
    fn enter_func(&mut self, func: &Func) -> Flow {
        self.enter_function(func);
        // Don't walk the bodies here: a handler can have several and the
        // caller picks one explicitly.
        Flow::AbortAll
    }

    fn enter_stmt(&mut self, stmt: &Stmt) -> Flow {
        let pre_rd = self.install_pre(stmt.id);

        if self.trace {
            eprintln!(
                "pre RDs for stmt {}:\n{}",
                describe_stmt(stmt, self.idents),
                pre_rd.render(&self.items)
            );
        }

        self.last_node = Some(stmt.id);

        match &stmt.kind {
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                // Walk the condition, then seed both branches with the same
                // fact so neither sees what the other defined.
                if walk_expr(self, cond) == Flow::AbortAll {
                    return Flow::AbortAll;
                }
                let branch_rd = self.predecessor_rds();
                self.facts.seed_pre(then_branch.id, branch_rd.clone());
                self.facts.seed_pre(else_branch.id, branch_rd);
                if walk_stmt(self, then_branch) == Flow::AbortAll {
                    return Flow::AbortAll;
                }
                if walk_stmt(self, else_branch) == Flow::AbortAll {
                    return Flow::AbortAll;
                }
                Flow::SkipChildren
            }

            StmtKind::Switch { cases, .. } => {
                let idents = self.idents;
                for case in cases {
                    let mut case_rd = pre_rd.clone();
                    // A type case binds its identifier, fully initialized.
                    for &type_id in &case.type_ids {
                        let Some(ident) = idents.get(type_id) else {
                            continue;
                        };
                        let item = self.items.get_or_create_root(ident);
                        self.items.add_with_init(
                            &mut case_rd,
                            item,
                            DefPoint::Stmt(stmt.id),
                            true,
                            None,
                            idents,
                        );
                    }
                    self.facts.seed_pre(case.body.id, case_rd);
                }
                Flow::Continue
            }

            StmtKind::For {
                loop_vars,
                value_var,
                iter,
                body,
            } => {
                let idents = self.idents;
                let mut rd = pre_rd.clone();
                for &var in loop_vars.iter().chain(value_var.iter()) {
                    let Some(ident) = idents.get(var) else { continue };
                    let item = self.items.get_or_create_root(ident);
                    self.items.add_with_init(
                        &mut rd,
                        item,
                        DefPoint::Stmt(stmt.id),
                        true,
                        None,
                        idents,
                    );
                }
                self.facts.seed_pre(iter.id, rd.clone());
                self.facts.seed_pre(body.id, rd);

                if matches!(iter.kind, ExprKind::Name(_)) {
                    // An uninitialized iterable just makes an empty loop;
                    // skip it and walk the body ourselves.
                    if walk_stmt(self, body) == Flow::AbortAll {
                        return Flow::AbortAll;
                    }
                    Flow::SkipChildren
                } else {
                    Flow::Continue
                }
            }

            // Returning an aggregate passes it by reference; don't ding it
            // for not being initialized.
            StmtKind::Return(Some(expr)) if self.is_aggr(expr) => Flow::SkipChildren,

            StmtKind::Add(expr) => {
                if let ExprKind::Index { base, indices } = &expr.kind
                    && self.is_aggr(base)
                {
                    // Count this as an initialization of the aggregate; only
                    // the index expression can have problems of its own.
                    for index in indices {
                        if walk_expr(self, index) == Flow::AbortAll {
                            return Flow::AbortAll;
                        }
                    }
                    let idents = self.idents;
                    if let Some(base_id) = base.as_name()
                        && let Some(ident) = idents.get(base_id)
                    {
                        let item = self.items.get_or_create_root(ident);
                        let mut rd = pre_rd.clone();
                        rd.insert(item, DefPoint::Stmt(stmt.id));
                        self.facts.add_post(stmt.id, rd);
                    }
                    return Flow::SkipChildren;
                }
                Flow::Continue
            }

            _ => Flow::Continue,
        }
    }

    fn leave_stmt(&mut self, stmt: &Stmt) -> Flow {
        let post_rds = match &stmt.kind {
            StmtKind::Print(_) | StmtKind::Event(_) | StmtKind::When { .. } => {
                self.facts.pre(stmt.id).clone()
            }

            StmtKind::Expr(expr) => self.facts.post(expr.id).clone(),

            StmtKind::If {
                then_branch,
                else_branch,
                ..
            } => {
                let then_reaches = self.may_reach_end(then_branch);
                let else_reaches = self.may_reach_end(else_branch);
                let then_rd = self.facts.post(then_branch.id);
                let else_rd = self.facts.post(else_branch.id);

                if then_reaches && else_reaches {
                    then_rd.intersect(else_rd)
                } else if then_reaches {
                    then_rd.clone()
                } else if else_reaches {
                    else_rd.clone()
                } else {
                    ReachingDefs::new()
                }
            }

            StmtKind::Switch { cases, .. } => {
                let mut post = ReachingDefs::new();
                let mut did_first = false;
                let mut default_seen = false;

                for case in cases {
                    if self.may_reach_end(&case.body) {
                        let case_rd = self.facts.post(case.body.id).clone();
                        post = if did_first {
                            post.intersect(&case_rd)
                        } else {
                            case_rd
                        };
                        did_first = true;
                    }
                    if case.is_default() {
                        default_seen = true;
                    }
                }

                if !default_seen {
                    // The fall-out path around the switch keeps the
                    // pre-state.
                    post = post.union(self.facts.pre(stmt.id));
                }
                post
            }

            StmtKind::For { body, .. } | StmtKind::While { body, .. } => {
                // The loop might not execute at all.
                self.facts.pre(stmt.id).intersect(self.facts.post(body.id))
            }

            StmtKind::List(stmts) => {
                if self.may_reach_end(stmt) {
                    match stmts.last() {
                        Some(last) => self.facts.post(last.id).clone(),
                        None => self.facts.pre(stmt.id).clone(),
                    }
                } else {
                    ReachingDefs::new()
                }
            }

            StmtKind::Init(ids) => {
                let idents = self.idents;
                let mut post = self.facts.pre(stmt.id).clone();
                for &id in ids {
                    let Some(ident) = idents.get(id) else { continue };
                    // Only aggregates get initialized by their declaration.
                    if !ident.ty.is_aggregate() {
                        continue;
                    }
                    let item = self.items.get_or_create_root(ident);
                    self.items.add_with_init(
                        &mut post,
                        item,
                        DefPoint::Stmt(stmt.id),
                        false,
                        None,
                        idents,
                    );
                }
                post
            }

            // No control flow past these statements, so nothing reaches out
            // of them. A fallthrough's definitions are not carried into the
            // next case.
            StmtKind::Return(_) | StmtKind::Next | StmtKind::Break | StmtKind::Fallthrough => {
                ReachingDefs::new()
            }

            StmtKind::Add(_) | StmtKind::Delete(_) => ReachingDefs::new(),
        };

        self.facts.add_post(stmt.id, post_rds);
        self.last_node = Some(stmt.id);

        if self.trace {
            eprintln!(
                "post RDs for stmt {}:\n{}",
                describe_stmt(stmt, self.idents),
                self.facts.post(stmt.id).render(&self.items)
            );
        }

        Flow::Continue
    }

    fn enter_expr(&mut self, expr: &Expr) -> Flow {
        let pre_rd = self.install_pre(expr.id);

        if self.trace {
            eprintln!(
                "pre RDs for expr {}:\n{}",
                describe_expr(expr, self.idents),
                pre_rd.render(&self.items)
            );
        }

        self.last_node = Some(expr.id);

        match &expr.kind {
            ExprKind::Name(id) => {
                let idents = self.idents;
                let Some(ident) = idents.get(*id) else {
                    return Flow::Continue;
                };
                let mut rd = pre_rd;

                if ident.scope == ScopeClass::Global {
                    // Globals count as fully initialized at first use.
                    let item = self.items.get_or_create_root(ident);
                    self.items.add_with_init(
                        &mut rd,
                        item,
                        DefPoint::Expr(expr.id),
                        true,
                        None,
                        idents,
                    );
                    self.facts.add_pre(expr.id, rd.clone());
                }

                let has_pre = self
                    .items
                    .find_root(*id)
                    .is_some_and(|item| self.facts.pre(expr.id).has_item(item));
                if !has_pre {
                    self.sink
                        .report(Diagnostic::NoPre(ident.name.clone(), expr.span));
                }

                if ident.ty.is_record() {
                    // Make the record's field items structurally present so
                    // later field queries resolve; only defaulted fields
                    // count as defined here.
                    let item = self.items.get_or_create_root(ident);
                    self.items
                        .create_record_defs(&mut rd, item, false, DefPoint::Expr(expr.id), None);
                    self.facts.add_post(expr.id, rd);
                }

                Flow::Continue
            }

            ExprKind::AddTo { lhs, rhs } => {
                let idents = self.idents;
                if let Some(lhs_id) = lhs.as_name()
                    && let Some(ident) = idents.get(lhs_id)
                    && ident.ty.is_aggregate()
                {
                    // Appending counts as an initialization of the aggregate.
                    let item = self.items.get_or_create_root(ident);
                    let mut rd = pre_rd;
                    rd.insert(item, DefPoint::Expr(expr.id));
                    self.facts.add_post(expr.id, rd);

                    if walk_expr(self, rhs) == Flow::AbortAll {
                        return Flow::AbortAll;
                    }
                    return Flow::SkipChildren;
                }
                Flow::Continue
            }

            ExprKind::Assign { lhs, rhs } => {
                let rhs_aggr = self.is_aggr(rhs);
                let mut rd = pre_rd;

                if self.check_lhs(&mut rd, lhs, expr) {
                    self.facts.add_post(expr.id, rd);
                    // An aggregate RHS is passed by reference; nothing to
                    // analyze there.
                    if !rhs_aggr && walk_expr(self, rhs) == Flow::AbortAll {
                        return Flow::AbortAll;
                    }
                    return Flow::SkipChildren;
                }

                if rhs_aggr {
                    if walk_expr(self, lhs) == Flow::AbortAll {
                        return Flow::AbortAll;
                    }
                    return Flow::SkipChildren;
                }

                // Too opaque to track as a definition; analyze it in terms
                // of the values it accesses.
                Flow::Continue
            }

            ExprKind::Field { base, field } => {
                if !matches!(base.kind, ExprKind::Name(_) | ExprKind::Field { .. }) {
                    return Flow::Continue;
                }
                if walk_expr(self, base) == Flow::AbortAll {
                    return Flow::AbortAll;
                }
                let idents = self.idents;
                if let Some(base_item) = self.items.item_for_expr(base, idents) {
                    let defined = self
                        .items
                        .find_field(base_item, field)
                        .is_some_and(|item| self.facts.post(base.id).has_item(item));
                    if !defined {
                        self.sink
                            .report(Diagnostic::NoReachingDef(describe_expr(expr, idents), expr.span));
                    }
                }
                // A missing base item already produced a complaint; avoid a
                // cascade.
                Flow::SkipChildren
            }

            ExprKind::HasField { base, field } => {
                let idents = self.idents;
                let Some(base_id) = base.as_name() else {
                    return Flow::Continue;
                };
                let Some(ident) = idents.get(base_id) else {
                    self.sink
                        .report(Diagnostic::NoIdReachingDef(describe_expr(base, idents)));
                    return Flow::Continue;
                };
                // Testing for the field assures it exists, so treat this as
                // a definition of base$field.
                let root = self.items.get_or_create_root(ident);
                if self.items.find_field(root, field).is_none()
                    && let Some(record) = ident.ty.as_record()
                    && let Some(field_ty) = record.field_type_by_name(field)
                {
                    let item = self.items.create_field(root, field, field_ty);
                    let mut rd = pre_rd;
                    rd.insert(item, DefPoint::Expr(expr.id));
                    self.facts.add_post(expr.id, rd);
                }
                Flow::Continue
            }

            ExprKind::Call { callee, args } => {
                if walk_expr(self, callee) == Flow::AbortAll {
                    return Flow::AbortAll;
                }
                let idents = self.idents;
                let mut rd = pre_rd;
                for arg in args {
                    if let Some(arg_id) = arg.as_name()
                        && let Some(ident) = idents.get(arg_id)
                        && ident.ty.is_aggregate()
                    {
                        // Passed by reference: skip analyzing it and consider
                        // it initialized after the call returns.
                        let item = self.items.get_or_create_root(ident);
                        rd.insert(item, DefPoint::Expr(expr.id));
                    } else if walk_expr(self, arg) == Flow::AbortAll {
                        return Flow::AbortAll;
                    }
                }
                self.facts.add_post(expr.id, rd);
                Flow::SkipChildren
            }

            ExprKind::Lambda => {
                // Closures are opaque to the analysis.
                self.facts.add_post(expr.id, pre_rd);
                Flow::SkipChildren
            }

            _ => Flow::Continue,
        }
    }

    fn leave_expr(&mut self, expr: &Expr) -> Flow {
        let pre = self.facts.pre(expr.id).clone();
        self.facts.add_post(expr.id, pre);
        Flow::Continue
    }
}

#[cfg(test)]
#[path = "../tests/analysis/t_rd_walk.rs"]
mod tests;
