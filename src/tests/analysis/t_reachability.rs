use std::collections::HashSet;

use super::*;
use crate::tree_test_utils::TestAst;
use crate::types::Type;

fn may_reach(ast: &TestAst, stmt: &Stmt) -> (bool, Vec<Diagnostic>) {
    reach(ast, stmt, false, false)
}

fn must_reach(ast: &TestAst, stmt: &Stmt) -> (bool, Vec<Diagnostic>) {
    reach(ast, stmt, true, false)
}

fn reach(
    ast: &TestAst,
    stmt: &Stmt,
    is_definite: bool,
    ignore_break: bool,
) -> (bool, Vec<Diagnostic>) {
    let mut sink: Vec<Diagnostic> = Vec::new();
    let mut reported = HashSet::new();
    let mut ctx = ReachCtx {
        idents: &ast.idents,
        sink: &mut sink,
        reported_dead: &mut reported,
    };
    let result = reaches_end(stmt, is_definite, ignore_break, &mut ctx);
    (result, sink)
}

#[test]
fn plain_statements_reach_end() {
    let mut ast = TestAst::new();
    let one = ast.count(1);
    let print = ast.print1(one);

    assert!(may_reach(&ast, &print).0);
    assert!(must_reach(&ast, &print).0);
}

#[test]
fn return_and_next_do_not_reach_end() {
    let mut ast = TestAst::new();
    let ret = ast.ret(None);
    let next = ast.next_stmt();

    assert!(!may_reach(&ast, &ret).0);
    assert!(!may_reach(&ast, &next).0);
    assert!(!must_reach(&ast, &ret).0);
}

#[test]
fn break_depends_on_context() {
    let mut ast = TestAst::new();
    let brk = ast.brk();

    assert!(!reach(&ast, &brk, false, false).0);
    assert!(reach(&ast, &brk, false, true).0);
}

#[test]
fn if_combines_branches_by_may_or_must() {
    let mut ast = TestAst::new();
    let c = ast.param("c", Type::Bool);

    let cond = ast.name(c);
    let then_ret = ast.ret(None);
    let then_branch = ast.stmts(vec![then_ret]);
    let else_branch = ast.empty();
    let only_then_returns = ast.iff(cond, then_branch, else_branch);

    assert!(may_reach(&ast, &only_then_returns).0);
    assert!(!must_reach(&ast, &only_then_returns).0);

    let cond = ast.name(c);
    let then_ret = ast.ret(None);
    let else_ret = ast.ret(None);
    let both_return = ast.iff(cond, then_ret, else_ret);

    assert!(!may_reach(&ast, &both_return).0);
}

#[test]
fn switch_without_default_always_may_fall_out() {
    let mut ast = TestAst::new();
    let x = ast.param("x", Type::Count);

    let subject = ast.name(x);
    let one = ast.count(1);
    let ret = ast.ret(None);
    let body = ast.stmts(vec![ret]);
    let case = ast.case(vec![one], body);
    let switch = ast.switch(subject, vec![case]);

    assert!(may_reach(&ast, &switch).0);
}

#[test]
fn switch_with_default_requires_a_reaching_body() {
    let mut ast = TestAst::new();
    let x = ast.param("x", Type::Count);

    let subject = ast.name(x);
    let one = ast.count(1);
    let ret = ast.ret(None);
    let case_body = ast.stmts(vec![ret]);
    let case = ast.case(vec![one], case_body);
    let default_ret = ast.ret(None);
    let default_body = ast.stmts(vec![default_ret]);
    let default = ast.default_case(default_body);
    let switch = ast.switch(subject, vec![case, default]);

    assert!(!may_reach(&ast, &switch).0);
}

#[test]
fn switch_case_bodies_ignore_break() {
    let mut ast = TestAst::new();
    let x = ast.param("x", Type::Count);

    let subject = ast.name(x);
    let one = ast.count(1);
    let brk = ast.brk();
    let body = ast.stmts(vec![brk]);
    let case = ast.case(vec![one], body);
    let empty = ast.empty();
    let default = ast.default_case(empty);
    let switch = ast.switch(subject, vec![case, default]);

    assert!(may_reach(&ast, &switch).0);
    assert!(must_reach(&ast, &switch).0);
}

#[test]
fn definite_switch_without_default_does_not_cover() {
    let mut ast = TestAst::new();
    let x = ast.param("x", Type::Count);

    let subject = ast.name(x);
    let one = ast.count(1);
    let body = ast.empty();
    let case = ast.case(vec![one], body);
    let switch = ast.switch(subject, vec![case]);

    // The switch itself cannot be shown to cover all values.
    assert!(!must_reach(&ast, &switch).0);
}

#[test]
fn list_reports_dead_code_once() {
    let mut ast = TestAst::new();
    let ret = ast.ret(None);
    let one = ast.count(1);
    let print = ast.print1(one);
    let two = ast.count(2);
    let unreached_too = ast.print1(two);
    let list = ast.stmts(vec![ret, print, unreached_too]);

    let mut sink: Vec<Diagnostic> = Vec::new();
    let mut reported = HashSet::new();
    let mut ctx = ReachCtx {
        idents: &ast.idents,
        sink: &mut sink,
        reported_dead: &mut reported,
    };

    assert!(!reaches_end(&list, false, false, &mut ctx));
    // A repeated query over the same list stays quiet.
    assert!(!reaches_end(&list, false, false, &mut ctx));

    assert_eq!(sink.len(), 1);
    assert!(matches!(&sink[0], Diagnostic::DeadCode(desc, _) if desc == "print 1"));
}
