//! Whole-crate resolution and diagnostics
#![allow(
    clippy::tests_outside_test_module,
    clippy::min_ident_chars,
    clippy::single_char_lifetime_names,
    clippy::unwrap_used,
    clippy::panic,
    clippy::unreachable,
    reason = "Integration tests use short fixture names and fail loudly"
)]

use codespan_reporting::diagnostic::{LabelStyle, Severity};
use cv_ast::{AstBuilder, BinOp, VariantData};
use cv_intern::Interner;
use cv_resolve::{Namespace, ResolutionErrorKind};
use expect_test::expect;
use resolve_tests::{callee_id, fn_with_body, render_errors, resolve, resolve_with, ty_path_id};

#[test]
fn test_generic_program() {
    // struct Stack<T> { items: Vec<T> }
    // impl<T: Clone> Stack<T> {
    //     fn push(&mut self, item: T) { let items = self.items; items; }
    //     fn peek<'a>(&'a self) -> Option<&'a T> { None }
    // }
    // fn main() {
    //     let stack = Stack { items: Vec::new() };
    //     let double = |n| n * 2;
    //     println!(double(stack));
    // }
    let interner = Interner::new();
    let b = AstBuilder::new(&interner);

    let stack_t = b.type_param("T", vec![]);
    let stack_t_id = stack_t.id;
    let items_ty = b.ty(cv_ast::TyKind::Path(b.path_from_segments(
        false,
        vec![b.segment_with_args("Vec", vec![cv_ast::GenericArg::Type(b.ty_path(&["T"]))])],
    )));
    let stack = b.struct_item(
        "Stack",
        b.generics(vec![stack_t]),
        VariantData::Struct(vec![b.field_def("items", items_ty)]),
    );
    let stack_id = stack.id;

    let impl_t = b.type_param("T", vec![b.trait_bound(&["Clone"])]);
    let impl_t_id = impl_t.id;
    let item_ty = b.ty_path(&["T"]);
    let item_ty_path = ty_path_id(&item_ty);
    let push = b.method(
        "push",
        b.generics(vec![]),
        Some(b.self_ref()),
        vec![b.param(b.ident_pat("item"), item_ty)],
        None,
        Some(b.block(
            vec![
                b.let_stmt(
                    b.ident_pat("items"),
                    None,
                    Some(b.field(b.ident_expr("self"), "items")),
                ),
                b.semi(b.ident_expr("items")),
            ],
            None,
        )),
    );
    let lifetime_use = b.lifetime("a");
    let lifetime_use_id = lifetime_use.id;
    let a_param = b.lifetime_param("a");
    let a_param_id = a_param.id;
    let peek_ret = b.ty(cv_ast::TyKind::Path(b.path_from_segments(
        false,
        vec![b.segment_with_args(
            "Option",
            vec![cv_ast::GenericArg::Type(b.ty_ref(Some(lifetime_use), b.ty_path(&["T"])))],
        )],
    )));
    let peek = b.method(
        "peek",
        b.generics(vec![a_param]),
        Some(b.self_ref()),
        vec![],
        Some(peek_ret),
        Some(b.block(vec![], Some(b.ident_expr("None")))),
    );
    let imp = b.inherent_impl(
        b.generics(vec![impl_t]),
        b.ty(cv_ast::TyKind::Path(b.path_from_segments(
            false,
            vec![b.segment_with_args("Stack", vec![cv_ast::GenericArg::Type(b.ty_path(&["T"]))])],
        ))),
        vec![push, peek],
    );

    let stack_local = b.ident_pat("stack");
    let stack_local_id = stack_local.id;
    let literal = b.struct_expr(
        b.path(&["Stack"]),
        vec![b.expr_field("items", b.call(b.path_expr(&["Vec", "new"]), vec![]))],
        None,
    );
    let n = b.ident_pat("n");
    let n_id = n.id;
    let n_use = b.ident_expr("n");
    let n_use_id = n_use.id;
    let closure = b.closure(vec![n], b.binary(BinOp::Mul, n_use, b.int(2)));
    let stack_use = b.ident_expr("stack");
    let stack_use_id = stack_use.id;
    let call = b.call(b.ident_expr("double"), vec![stack_use]);
    let main = fn_with_body(
        &b,
        "main",
        vec![
            b.let_stmt(stack_local, None, Some(literal)),
            b.let_stmt(b.ident_pat("double"), None, Some(closure)),
            b.semi(b.macro_call("println", vec![call])),
        ],
        None,
    );
    let krate = b.finish(vec![stack, imp, main]);

    let result = resolve(&interner, &krate);
    assert!(!result.has_errors(), "{:?}", result.errors);
    assert_ne!(stack_t_id, impl_t_id);
    assert_eq!(result.resolution(item_ty_path, Namespace::Type), Some(impl_t_id));
    assert_eq!(result.resolution(lifetime_use_id, Namespace::Lifetime), Some(a_param_id));
    assert_eq!(result.resolution(n_use_id, Namespace::Value), Some(n_id));
    assert_eq!(result.resolution(stack_use_id, Namespace::Value), Some(stack_local_id));
    assert!(result.resolutions.values().any(|&decl| decl == stack_id));
    assert_eq!(result.stats.pushes, result.stats.pops);
}

#[test]
fn test_errors_do_not_stop_resolution() {
    // fn main() { missing(1); let ok = 1; ok; 'gone: loop {} break 'nowhere; }
    let interner = Interner::new();
    let b = AstBuilder::new(&interner);
    let ok = b.ident_pat("ok");
    let ok_id = ok.id;
    let ok_use = b.ident_expr("ok");
    let ok_use_id = ok_use.id;
    let main = fn_with_body(
        &b,
        "main",
        vec![
            b.semi(b.call(b.ident_expr("missing"), vec![b.int(1)])),
            b.let_stmt(ok, None, Some(b.int(1))),
            b.semi(ok_use),
            b.semi(b.loop_expr(Some("gone"), b.block(vec![], None))),
            b.semi(b.break_expr(Some("nowhere"), None)),
        ],
        None,
    );
    let krate = b.finish(vec![main]);

    let result = resolve(&interner, &krate);
    assert_eq!(result.resolution(ok_use_id, Namespace::Value), Some(ok_id));
    expect![[r#"
        cannot find value `missing` in this scope
        use of undeclared label `'nowhere`
    "#]]
    .assert_eq(&render_errors(&result));
}

#[test]
fn test_unresolved_name_diagnostic() {
    // fn main() { let counter = 1; countr; }
    let interner = Interner::new();
    let b = AstBuilder::new(&interner);
    let typo = b.ident_expr("countr");
    let typo_span = typo.span;
    let main = fn_with_body(
        &b,
        "main",
        vec![
            b.let_stmt(b.ident_pat("counter"), None, Some(b.int(1))),
            b.semi(typo),
        ],
        None,
    );
    let krate = b.finish(vec![main]);

    let result = resolve(&interner, &krate);
    assert!(result.has_errors());
    let diagnostic = result.errors[0].to_codespan_diagnostic();
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(diagnostic.message, "cannot find value `countr` in this scope");
    assert_eq!(diagnostic.labels.len(), 1);
    assert_eq!(diagnostic.labels[0].style, LabelStyle::Primary);
    assert_eq!(diagnostic.labels[0].file_id, 0);
    assert_eq!(diagnostic.labels[0].range, typo_span.range());
    assert_eq!(diagnostic.notes, vec!["help: did you mean `counter`?".to_string()]);
}

#[test]
fn test_suggestions_can_be_disabled() {
    let interner = Interner::new();
    let b = AstBuilder::new(&interner);
    let main = fn_with_body(
        &b,
        "main",
        vec![
            b.let_stmt(b.ident_pat("counter"), None, Some(b.int(1))),
            b.semi(b.ident_expr("countr")),
        ],
        None,
    );
    let krate = b.finish(vec![main]);

    let result = resolve_with(&interner, &krate, "suggest_similar_names = false");
    match &result.errors[0].kind {
        ResolutionErrorKind::UnresolvedName { suggestions, .. } => assert!(suggestions.is_empty()),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(result.errors[0].to_codespan_diagnostic().notes.is_empty());
}

#[test]
fn test_duplicate_definition_diagnostic_points_at_both() {
    // fn twice() {} fn twice() {}
    let interner = Interner::new();
    let b = AstBuilder::new(&interner);
    let first = fn_with_body(&b, "twice", vec![], None);
    let second = fn_with_body(&b, "twice", vec![], None);
    let krate = b.finish(vec![first, second]);

    let result = resolve(&interner, &krate);
    assert_eq!(result.errors.len(), 1);
    let diagnostic = result.errors[0].to_codespan_diagnostic();
    assert_eq!(diagnostic.labels.len(), 2);
    assert_eq!(diagnostic.labels[1].style, LabelStyle::Secondary);
    assert_eq!(diagnostic.labels[1].message, "first defined here");
}

#[test]
fn test_macro_scope() {
    // macro_rules! square { .. }
    // fn main() { square!(2); undefined!(); }
    let interner = Interner::new();
    let b = AstBuilder::new(&interner);
    let square = b.macro_rules("square");
    let main = fn_with_body(
        &b,
        "main",
        vec![
            b.semi(b.macro_call("square", vec![b.int(2)])),
            b.semi(b.macro_call("undefined", vec![])),
        ],
        None,
    );
    let krate = b.finish(vec![square, main]);

    let result = resolve(&interner, &krate);
    expect![[r#"
        cannot find macro `undefined` in this scope
    "#]]
    .assert_eq(&render_errors(&result));
}

#[test]
fn test_function_call_resolves_to_item() {
    // fn helper() {} fn main() { helper(); }
    let interner = Interner::new();
    let b = AstBuilder::new(&interner);
    let helper = fn_with_body(&b, "helper", vec![], None);
    let helper_id = helper.id;
    let call = b.call(b.ident_expr("helper"), vec![]);
    let callee = callee_id(&call);
    let main = fn_with_body(&b, "main", vec![b.semi(call)], None);
    let krate = b.finish(vec![main, helper]);

    let result = resolve(&interner, &krate);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.resolution(callee, Namespace::Value), Some(helper_id));
}
