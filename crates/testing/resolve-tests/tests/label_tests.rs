//! Labels, `break` and `continue`
#![allow(
    clippy::tests_outside_test_module,
    clippy::min_ident_chars,
    clippy::single_char_lifetime_names,
    clippy::unwrap_used,
    clippy::panic,
    clippy::unreachable,
    reason = "Integration tests use short fixture names and fail loudly"
)]

use cv_ast::{AstBuilder, Expr, ExprKind, Lit, NodeId};
use cv_intern::Interner;
use cv_resolve::Namespace;
use expect_test::expect;
use resolve_tests::{fn_with_body, render_errors, resolve, resolve_with};

fn label_id(expr: &Expr) -> NodeId {
    match &expr.kind {
        ExprKind::Loop(_, Some(label)) | ExprKind::Block(_, Some(label)) => label.id,
        ExprKind::While { label: Some(label), .. }
        | ExprKind::ForLoop { label: Some(label), .. } => label.id,
        other => panic!("no label on {other:?}"),
    }
}

fn break_label_id(expr: &Expr) -> NodeId {
    match &expr.kind {
        ExprKind::Break(Some(label), _) | ExprKind::Continue(Some(label)) => label.id,
        other => panic!("no label on {other:?}"),
    }
}

#[test]
fn test_label_and_variable_with_same_name() {
    // 'a: loop { let a = 1; a; break 'a; }
    let interner = Interner::new();
    let b = AstBuilder::new(&interner);
    let local = b.ident_pat("a");
    let local_id = local.id;
    let var_use = b.ident_expr("a");
    let var_use_id = var_use.id;
    let brk = b.break_expr(Some("a"), None);
    let brk_label = break_label_id(&brk);
    let lp = b.loop_expr(
        Some("a"),
        b.block(
            vec![
                b.let_stmt(local, None, Some(b.int(1))),
                b.semi(var_use),
                b.semi(brk),
            ],
            None,
        ),
    );
    let lp_label = label_id(&lp);
    let main = fn_with_body(&b, "main", vec![b.semi(lp)], None);
    let krate = b.finish(vec![main]);

    let result = resolve(&interner, &krate);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.resolution(brk_label, Namespace::Label), Some(lp_label));
    assert_eq!(result.resolution(var_use_id, Namespace::Value), Some(local_id));
    assert_eq!(result.resolution(brk_label, Namespace::Value), None);
}

#[test]
fn test_inner_label_shadows_outer() {
    // 'l: loop { 'l: while true { continue 'l; } }
    let interner = Interner::new();
    let b = AstBuilder::new(&interner);
    let cont = b.continue_expr(Some("l"));
    let cont_label = break_label_id(&cont);
    let inner = b.while_expr(
        Some("l"),
        b.expr(ExprKind::Literal(Lit::Bool(true))),
        b.block(vec![b.semi(cont)], None),
    );
    let inner_label = label_id(&inner);
    let outer = b.loop_expr(Some("l"), b.block(vec![b.semi(inner)], None));
    let main = fn_with_body(&b, "main", vec![b.semi(outer)], None);
    let krate = b.finish(vec![main]);

    let result = resolve(&interner, &krate);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.resolution(cont_label, Namespace::Label), Some(inner_label));
}

#[test]
fn test_closure_hides_enclosing_labels_and_loops() {
    // 'a: loop { let f = || { break 'a; }; let g = || { break; }; }
    let interner = Interner::new();
    let b = AstBuilder::new(&interner);
    let labeled = b.closure(
        vec![],
        b.block_expr(b.block(vec![b.semi(b.break_expr(Some("a"), None))], None)),
    );
    let unlabeled = b.closure(
        vec![],
        b.block_expr(b.block(vec![b.semi(b.break_expr(None, None))], None)),
    );
    let lp = b.loop_expr(
        Some("a"),
        b.block(
            vec![
                b.let_stmt(b.ident_pat("f"), None, Some(labeled)),
                b.let_stmt(b.ident_pat("g"), None, Some(unlabeled)),
            ],
            None,
        ),
    );
    let main = fn_with_body(&b, "main", vec![b.semi(lp)], None);
    let krate = b.finish(vec![main]);

    let result = resolve(&interner, &krate);
    expect![[r#"
        use of undeclared label `'a`
        `break` outside of a loop
    "#]]
    .assert_eq(&render_errors(&result));
}

#[test]
fn test_nested_function_hides_enclosing_loop() {
    // loop { fn g() { continue; } }
    let interner = Interner::new();
    let b = AstBuilder::new(&interner);
    let g = fn_with_body(&b, "g", vec![b.semi(b.continue_expr(None))], None);
    let lp = b.loop_expr(None, b.block(vec![b.item_stmt(g)], None));
    let main = fn_with_body(&b, "main", vec![b.semi(lp)], None);
    let krate = b.finish(vec![main]);

    let result = resolve(&interner, &krate);
    expect![[r#"
        `continue` outside of a loop
    "#]]
    .assert_eq(&render_errors(&result));
}

#[test]
fn test_labeled_block() {
    // 'blk: { break 'blk; continue 'blk; }
    let interner = Interner::new();
    let b = AstBuilder::new(&interner);
    let brk = b.break_expr(Some("blk"), None);
    let brk_label = break_label_id(&brk);
    let cont = b.continue_expr(Some("blk"));
    let cont_label = break_label_id(&cont);
    let blk = b.labeled_block("blk", b.block(vec![b.semi(brk), b.semi(cont)], None));
    let blk_label = label_id(&blk);
    let main = fn_with_body(&b, "main", vec![b.semi(blk)], None);
    let krate = b.finish(vec![main]);

    let result = resolve(&interner, &krate);
    assert_eq!(result.resolution(brk_label, Namespace::Label), Some(blk_label));
    assert_eq!(result.resolution(cont_label, Namespace::Label), Some(blk_label));
    expect![[r#"
        `continue` pointing to a labeled block `'blk`
    "#]]
    .assert_eq(&render_errors(&result));
}

#[test]
fn test_unlabeled_break_inside_labeled_block_inside_loop() {
    // loop { 'blk: { break; } }
    let interner = Interner::new();
    let b = AstBuilder::new(&interner);
    let blk = b.labeled_block("blk", b.block(vec![b.semi(b.break_expr(None, None))], None));
    let lp = b.loop_expr(None, b.block(vec![b.semi(blk)], None));
    let main = fn_with_body(&b, "main", vec![b.semi(lp)], None);
    let krate = b.finish(vec![main]);

    let result = resolve(&interner, &krate);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
}

#[test]
fn test_loop_control_checks_can_be_disabled() {
    // fn main() { break; }
    let interner = Interner::new();
    let b = AstBuilder::new(&interner);
    let main = fn_with_body(&b, "main", vec![b.semi(b.break_expr(None, None))], None);
    let krate = b.finish(vec![main]);

    assert_eq!(resolve(&interner, &krate).errors.len(), 1);
    let relaxed = resolve_with(&interner, &krate, "check_loop_control = false");
    assert!(relaxed.errors.is_empty(), "{:?}", relaxed.errors);
}

#[test]
fn test_for_loop_label_and_iterator_scope() {
    // let items = 0; 'each: for item in items { item; break 'each; }
    let interner = Interner::new();
    let b = AstBuilder::new(&interner);
    let items = b.ident_pat("items");
    let items_id = items.id;
    let iter = b.ident_expr("items");
    let iter_id = iter.id;
    let item = b.ident_pat("item");
    let item_id = item.id;
    let item_use = b.ident_expr("item");
    let item_use_id = item_use.id;
    let brk = b.break_expr(Some("each"), None);
    let brk_label = break_label_id(&brk);
    let each = b.for_loop(
        Some("each"),
        item,
        iter,
        b.block(vec![b.semi(item_use), b.semi(brk)], None),
    );
    let each_label = label_id(&each);
    let main = fn_with_body(
        &b,
        "main",
        vec![b.let_stmt(items, None, Some(b.int(0))), b.semi(each)],
        None,
    );
    let krate = b.finish(vec![main]);

    let result = resolve(&interner, &krate);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.resolution(iter_id, Namespace::Value), Some(items_id));
    assert_eq!(result.resolution(item_use_id, Namespace::Value), Some(item_id));
    assert_eq!(result.resolution(brk_label, Namespace::Label), Some(each_label));
}

#[test]
fn test_unlabeled_break_in_while_condition() {
    // loop { while break {} ; while { loop { break; } } {} ; 'w: while break 'w {} }
    let interner = Interner::new();
    let b = AstBuilder::new(&interner);
    let bare = b.while_expr(None, b.break_expr(None, None), b.block(vec![], None));
    let inner_loop = b.loop_expr(None, b.block(vec![b.semi(b.break_expr(None, None))], None));
    let nested = b.while_expr(
        None,
        b.expr(ExprKind::Block(b.block(vec![b.semi(inner_loop)], None), None)),
        b.block(vec![], None),
    );
    let own_label = b.break_expr(Some("w"), None);
    let own_label_id = break_label_id(&own_label);
    let labeled = b.while_expr(Some("w"), own_label, b.block(vec![], None));
    let labeled_id = label_id(&labeled);
    let lp = b.loop_expr(
        None,
        b.block(vec![b.semi(bare), b.semi(nested), b.semi(labeled)], None),
    );
    let main = fn_with_body(&b, "main", vec![b.semi(lp)], None);
    let krate = b.finish(vec![main]);

    let result = resolve(&interner, &krate);
    expect![[r#"
        `break` with no label in the condition of a `while` loop
    "#]]
    .assert_eq(&render_errors(&result));
    assert_eq!(result.resolution(own_label_id, Namespace::Label), Some(labeled_id));
}
