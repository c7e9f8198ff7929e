//! Late name resolution
//!
//! Runs after parsing and macro expansion and binds every name use in the
//! crate to the declaration it denotes: locals, generic parameters, items,
//! labels, lifetimes and builtins.
//!
//! # Architecture
//!
//! - **Ribs**: a stack of lexical scope frames, one per block, function,
//!   closure, pattern, loop or item boundary
//! - **Top-level collection**: module-level items are entered into item
//!   scopes before anything is resolved, so items are visible in any order
//! - **Late resolver**: walks the crate, opens ribs and records resolutions
//! - **Pattern resolver**: gathers the names a pattern binds and checks
//!   duplicates and or-pattern consistency
//!
//! Resolution never stops at the first error. Every failure is recorded as a
//! [`ResolutionError`] and the walk continues.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cv_resolve::{ResolveOptions, resolve_crate};
//!
//! let result = resolve_crate(&krate, &interner, &ResolveOptions::default());
//! for error in &result.errors {
//!     emit(error.to_codespan_diagnostic());
//! }
//! ```
#![allow(
    clippy::single_char_lifetime_names,
    clippy::min_ident_chars,
    reason = "'a/'r lifetimes and x/f names are conventional in resolver code and its tests"
)]
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::unreachable,
        clippy::panic,
        reason = "Tests fail loudly on an unexpected shape"
    )
)]

pub mod builtins;
pub mod context;
pub mod error;
pub mod late;
pub mod namespace;
pub mod options;
pub mod path;
pub mod pattern;
pub mod rib;
pub mod toplevel;

pub use builtins::{Builtins, setup_builtin_types};
pub use context::{
    DefInfo, DefKind, ItemScope, LabelLookup, Lookup, NameResolutionContext, PartialResolution,
    ResolutionResult, RibStats, ScopeKind,
};
pub use error::{ResolutionError, ResolutionErrorKind};
pub use late::Late;
pub use namespace::Namespace;
pub use options::{OptionsError, ResolveOptions};
pub use path::PathResolution;
pub use pattern::{LatePattern, PatternBindings, PatternSource};
pub use rib::{Binding, BindingKind, Rib, RibKind};
pub use toplevel::{TopLevel, item_namespaces};

use cv_ast::Crate;
use cv_intern::Interner;

/// Resolve every name in `krate`
///
/// Builtin declarations get ids starting at `krate.next_node_id`; they are
/// returned alongside the resolutions so callers can tell them apart.
#[tracing::instrument(skip_all, fields(items = krate.items.len()))]
pub fn resolve_crate(
    krate: &Crate,
    interner: &Interner,
    options: &ResolveOptions,
) -> ResolutionResult {
    let builtins = setup_builtin_types(interner, krate.next_node_id);
    let mut ctx = NameResolutionContext::new(interner, options.clone(), builtins);

    TopLevel::new(&mut ctx).go(krate);
    Late::new(&mut ctx).go(krate);

    let result = ctx.finish();
    tracing::debug!(
        resolutions = result.resolutions.len(),
        errors = result.errors.len(),
        "name resolution finished"
    );
    result
}
