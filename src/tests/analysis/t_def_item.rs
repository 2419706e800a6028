use super::*;
use crate::tree::NodeId;
use crate::tree_test_utils::TestAst;

#[test]
fn root_creation_is_idempotent() {
    let mut ast = TestAst::new();
    let x = ast.local("x", Type::Count);

    let mut arena = DefItemArena::new();
    let ident = ast.idents.get(x).unwrap().clone();

    let first = arena.get_or_create_root(&ident);
    let second = arena.get_or_create_root(&ident);

    assert_eq!(first, second);
    assert_eq!(arena.len(), 1);
    assert_eq!(arena.item(first).name, "x");
    assert_eq!(arena.find_root(x), Some(first));
}

#[test]
fn field_creation_is_idempotent_and_paths_nest() {
    let mut ast = TestAst::new();
    let inner = TestAst::record("Inner", &[("n", Type::Count, false)]);
    let outer = TestAst::record("Outer", &[("inner", inner.clone(), false)]);
    let r = ast.local("r", outer);

    let mut arena = DefItemArena::new();
    let ident = ast.idents.get(r).unwrap().clone();
    let root = arena.get_or_create_root(&ident);

    let field = arena.create_field(root, "inner", &inner);
    assert_eq!(arena.create_field(root, "inner", &inner), field);
    assert_eq!(arena.find_field(root, "inner"), Some(field));
    assert_eq!(arena.item(field).name, "r$inner");
    assert_eq!(arena.item(field).parent, Some(root));

    let nested = arena.create_field(field, "n", &Type::Count);
    assert_eq!(arena.item(nested).name, "r$inner$n");
    assert!(arena.find_field(root, "n").is_none());
}

#[test]
fn item_for_expr_resolves_field_chains() {
    let mut ast = TestAst::new();
    let inner = TestAst::record("Inner", &[("n", Type::Count, false)]);
    let outer = TestAst::record("Outer", &[("inner", inner.clone(), false)]);
    let r = ast.local("r", outer);

    let name = ast.name(r);
    let chain_base = ast.name(r);
    let chain = ast.field(chain_base, "inner");

    let mut arena = DefItemArena::new();

    // A bare name creates its root on demand.
    let root = arena.item_for_expr(&name, &ast.idents).unwrap();
    assert_eq!(arena.find_root(r), Some(root));

    // A field chain resolves only if the field item exists.
    assert!(arena.item_for_expr(&chain, &ast.idents).is_none());
    let field = arena.create_field(root, "inner", &inner);
    assert_eq!(arena.item_for_expr(&chain, &ast.idents), Some(field));
}

#[test]
fn full_init_defines_fields_transitively() {
    let mut ast = TestAst::new();
    let inner = TestAst::record("Inner", &[("n", Type::Count, false)]);
    let outer = TestAst::record("Outer", &[("inner", inner, false), ("m", Type::Count, false)]);
    let r = ast.local("r", outer);

    let mut arena = DefItemArena::new();
    let ident = ast.idents.get(r).unwrap().clone();
    let root = arena.get_or_create_root(&ident);

    let mut rds = ReachingDefs::new();
    let point = DefPoint::FuncEntry(NodeId(1));
    arena.add_with_init(&mut rds, root, point, true, None, &ast.idents);

    let inner_item = arena.find_field(root, "inner").unwrap();
    let n_item = arena.find_field(inner_item, "n").unwrap();
    let m_item = arena.find_field(root, "m").unwrap();

    assert!(rds.has_pair(root, point));
    assert!(rds.has_pair(inner_item, point));
    assert!(rds.has_pair(n_item, point));
    assert!(rds.has_pair(m_item, point));
}

#[test]
fn partial_init_defines_only_defaulted_fields() {
    let mut ast = TestAst::new();
    let record = TestAst::record("R", &[("a", Type::Count, false), ("b", Type::Count, true)]);
    let r = ast.local("r", record);

    let mut arena = DefItemArena::new();
    let ident = ast.idents.get(r).unwrap().clone();
    let root = arena.get_or_create_root(&ident);

    let mut rds = ReachingDefs::new();
    let point = DefPoint::Stmt(NodeId(1));
    arena.add_with_init(&mut rds, root, point, false, None, &ast.idents);

    assert!(rds.has_item(root));
    assert!(arena.find_field(root, "a").is_none(), "undefined field not created");
    let b_item = arena.find_field(root, "b").unwrap();
    assert!(rds.has_pair(b_item, point));
}

#[test]
fn rhs_item_drives_field_definitions() {
    let mut ast = TestAst::new();
    let record = TestAst::record("R", &[("a", Type::Count, false), ("b", Type::Count, false)]);
    let src = ast.local("src", record.clone());
    let dst = ast.local("dst", record);
    let rhs = ast.name(src);

    let mut arena = DefItemArena::new();
    let src_ident = ast.idents.get(src).unwrap().clone();
    let dst_ident = ast.idents.get(dst).unwrap().clone();

    // src has only its field `a` defined.
    let src_root = arena.get_or_create_root(&src_ident);
    arena.create_field(src_root, "a", &Type::Count);

    let dst_root = arena.get_or_create_root(&dst_ident);
    let mut rds = ReachingDefs::new();
    let point = DefPoint::Expr(NodeId(9));
    arena.add_with_init(&mut rds, dst_root, point, false, Some(&rhs), &ast.idents);

    let a_item = arena.find_field(dst_root, "a").unwrap();
    assert!(rds.has_pair(a_item, point));
    assert!(arena.find_field(dst_root, "b").is_none());
}

#[test]
fn dynamic_rhs_assumes_full_initialization() {
    let mut ast = TestAst::new();
    let record = TestAst::record("R", &[("a", Type::Count, false)]);
    let r = ast.local("r", record);
    let opaque = ast.local("opaque", Type::Any);
    let rhs = ast.name(opaque);

    let mut arena = DefItemArena::new();
    let ident = ast.idents.get(r).unwrap().clone();
    let root = arena.get_or_create_root(&ident);

    let mut rds = ReachingDefs::new();
    let point = DefPoint::Expr(NodeId(4));
    arena.add_with_init(&mut rds, root, point, false, Some(&rhs), &ast.idents);

    let a_item = arena.find_field(root, "a").unwrap();
    assert!(rds.has_pair(a_item, point));
}

#[test]
fn complex_rhs_assumes_full_initialization() {
    let mut ast = TestAst::new();
    let record = TestAst::record("R", &[("a", Type::Count, false)]);
    let r = ast.local("r", record.clone());
    // An index expression types as R but resolves to no item.
    let v = ast.local("v", Type::Vector(Box::new(record)));
    let v_name = ast.name(v);
    let zero = ast.count(0);
    let rhs = ast.index(v_name, zero);

    let mut arena = DefItemArena::new();
    let ident = ast.idents.get(r).unwrap().clone();
    let root = arena.get_or_create_root(&ident);

    let mut rds = ReachingDefs::new();
    let point = DefPoint::Expr(NodeId(4));
    arena.add_with_init(&mut rds, root, point, false, Some(&rhs), &ast.idents);

    let a_item = arena.find_field(root, "a").unwrap();
    assert!(rds.has_pair(a_item, point));
}
