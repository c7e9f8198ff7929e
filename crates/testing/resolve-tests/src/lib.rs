//! Test utilities for name resolution
//!
//! Crates are put together with [`AstBuilder`]; these helpers run the
//! resolver over them and dig ids out of the built nodes.
#![allow(
    clippy::panic,
    clippy::min_ident_chars,
    reason = "Helpers panic on a malformed test fixture; `b` is the conventional builder name"
)]

use cv_ast::{AstBuilder, Crate, Expr, ExprKind, Item, NodeId, Stmt, Ty, TyKind};
use cv_intern::Interner;
use cv_resolve::{ResolutionResult, ResolveOptions, resolve_crate};

/// Resolve `krate` with default options
pub fn resolve(interner: &Interner, krate: &Crate) -> ResolutionResult {
    resolve_crate(krate, interner, &ResolveOptions::default())
}

/// Resolve `krate` with the options parsed from `toml`
///
/// # Panics
///
/// Panics if `toml` is not a valid options table
pub fn resolve_with(interner: &Interner, krate: &Crate, toml: &str) -> ResolutionResult {
    let options = match ResolveOptions::from_toml_str(toml) {
        Ok(options) => options,
        Err(error) => panic!("bad test options: {error}"),
    };
    resolve_crate(krate, interner, &options)
}

/// Error messages in report order, one per line, without locations
pub fn render_errors(result: &ResolutionResult) -> String {
    result
        .errors
        .iter()
        .map(|error| format!("{}\n", error.kind))
        .collect()
}

/// `fn name() { stmts; tail }`
pub fn fn_with_body(b: &AstBuilder, name: &str, stmts: Vec<Stmt>, tail: Option<Expr>) -> Item {
    b.func(
        name,
        b.generics(vec![]),
        vec![],
        None,
        Some(b.block(stmts, tail)),
    )
}

/// Id of the path in a path type
///
/// # Panics
///
/// Panics if `ty` is not a path type
pub fn ty_path_id(ty: &Ty) -> NodeId {
    match &ty.kind {
        TyKind::Path(path) => path.id,
        other => panic!("not a path type: {other:?}"),
    }
}

/// Id of the path in a path expression
///
/// # Panics
///
/// Panics if `expr` is not a path expression
pub fn path_expr_id(expr: &Expr) -> NodeId {
    match &expr.kind {
        ExprKind::Path(path) => path.id,
        other => panic!("not a path expression: {other:?}"),
    }
}

/// Id of the callee of a call expression
///
/// # Panics
///
/// Panics if `expr` is not a call
pub fn callee_id(expr: &Expr) -> NodeId {
    match &expr.kind {
        ExprKind::Call(callee, _) => callee.id,
        other => panic!("not a call: {other:?}"),
    }
}
