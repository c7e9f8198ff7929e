//! The name resolution context
//!
//! Owns the rib stack, the item scopes registered for modules and enums, the
//! builtin table, and everything the pass records: resolutions, field
//! resolutions, partial resolutions and errors.

use crate::{
    Binding, BindingKind, Builtins, Namespace, ResolutionError, ResolutionErrorKind,
    ResolveOptions, Rib, RibKind,
};
use cv_ast::{Ident, NodeId};
use cv_intern::{Interner, Symbol};
use cv_span::FileSpan;
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// Kind of an item scope
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ScopeKind {
    /// The crate root or a `mod`
    Module,
    /// The variants of an enum
    Enum,
}

/// Names declared directly in a module or enum
#[derive(Debug, Clone)]
pub struct ItemScope {
    /// Enclosing module; `None` for the crate root
    pub parent: Option<NodeId>,
    /// Module or enum
    pub kind: ScopeKind,
    /// Declared names, in declaration order
    pub bindings: IndexMap<(Symbol, Namespace), Binding>,
}

/// What a declaration is
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DefKind {
    /// `mod`
    Module,
    /// `struct`
    Struct,
    /// `enum`
    Enum,
    /// Enum variant
    Variant,
    /// `fn`
    Fn,
    /// `trait`
    Trait,
    /// `const`
    Const,
    /// `static`
    Static,
    /// `type`
    TypeAlias,
    /// `macro_rules!`
    Macro,
}

impl DefKind {
    /// Whether path resolution continues inside the declaration's item scope
    pub fn has_item_scope(self) -> bool {
        matches!(self, Self::Module | Self::Enum)
    }
}

/// A registered declaration
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DefInfo {
    /// What the declaration is
    pub kind: DefKind,
    /// Declared name
    pub name: Symbol,
    /// Where the name was declared
    pub span: FileSpan,
}

/// A path whose trailing segments depend on type information
///
/// `Vec::new` resolves `Vec` and leaves `new` to the type checker.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PartialResolution {
    /// Declaration the resolved prefix denotes
    pub base: NodeId,
    /// Number of trailing segments left unresolved
    pub unresolved_segments: usize,
}

/// Rib bookkeeping counters
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RibStats {
    /// Ribs pushed
    pub pushes: usize,
    /// Ribs popped
    pub pops: usize,
    /// Deepest rib stack seen
    pub max_depth: usize,
}

/// Outcome of a lexical lookup
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Lookup {
    /// The name is visible
    Found(Binding),
    /// The name is bound outside an enclosing item and cannot be used here
    Outer(Binding),
    /// Nothing visible has the name
    NotFound,
}

/// Outcome of a label lookup
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LabelLookup {
    /// The label was declared by a rib of `kind`
    Found {
        /// Label declaration
        id: NodeId,
        /// Loop or labeled block
        kind: RibKind,
    },
    /// No reachable label has the name
    NotFound,
}

/// Everything the pass produced
#[derive(Debug, Clone)]
pub struct ResolutionResult {
    /// `(use, namespace) -> declaration`
    pub resolutions: FxHashMap<(NodeId, Namespace), NodeId>,
    /// Field use (struct literal or pattern field) -> field declaration
    pub field_resolutions: FxHashMap<NodeId, NodeId>,
    /// Path id -> resolved prefix of a type-relative path
    pub partial_resolutions: FxHashMap<NodeId, PartialResolution>,
    /// Errors in the order they were found
    pub errors: Vec<ResolutionError>,
    /// Rib counters
    pub stats: RibStats,
    /// The builtin table the pass resolved against
    pub builtins: Builtins,
}

impl ResolutionResult {
    /// Declaration `use_id` resolved to in `ns`
    pub fn resolution(&self, use_id: NodeId, ns: Namespace) -> Option<NodeId> {
        self.resolutions.get(&(use_id, ns)).copied()
    }

    /// Whether any error was reported
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// State shared by the collector, the late resolver and the pattern resolver
#[derive(Debug)]
pub struct NameResolutionContext<'a> {
    interner: &'a Interner,
    options: ResolveOptions,
    builtins: Builtins,
    ribs: Vec<Rib>,
    scopes: FxHashMap<NodeId, ItemScope>,
    defs: FxHashMap<NodeId, DefInfo>,
    fields: FxHashMap<NodeId, IndexMap<Symbol, NodeId>>,
    resolutions: FxHashMap<(NodeId, Namespace), NodeId>,
    field_resolutions: FxHashMap<NodeId, NodeId>,
    partial_resolutions: FxHashMap<NodeId, PartialResolution>,
    errors: Vec<ResolutionError>,
    stats: RibStats,
}

impl<'a> NameResolutionContext<'a> {
    /// A context with an empty rib stack and only the crate root scope
    pub fn new(interner: &'a Interner, options: ResolveOptions, builtins: Builtins) -> Self {
        let mut ctx = Self {
            interner,
            options,
            builtins,
            ribs: Vec::new(),
            scopes: FxHashMap::default(),
            defs: FxHashMap::default(),
            fields: FxHashMap::default(),
            resolutions: FxHashMap::default(),
            field_resolutions: FxHashMap::default(),
            partial_resolutions: FxHashMap::default(),
            errors: Vec::new(),
            stats: RibStats::default(),
        };
        ctx.add_scope(NodeId::CRATE, None, ScopeKind::Module);
        ctx
    }

    /// The interner names come from
    pub fn interner(&self) -> &'a Interner {
        self.interner
    }

    /// Pass configuration
    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// The builtin table
    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    /// Text of a symbol
    pub fn name(&self, sym: Symbol) -> String {
        self.interner.resolve(&sym)
    }

    // Ribs

    /// Open a rib
    pub fn push_rib(&mut self, kind: RibKind) {
        self.ribs.push(Rib::new(kind));
        self.stats.pushes += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.ribs.len());
        tracing::trace!(%kind, depth = self.ribs.len(), "push rib");
    }

    /// Close the innermost rib, which must be of kind `expected`
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty or the innermost rib has another kind.
    #[allow(clippy::panic, reason = "An unbalanced rib stack is a resolver bug")]
    pub fn pop_rib(&mut self, expected: RibKind) -> Rib {
        let Some(rib) = self.ribs.pop() else {
            panic!("popped a {expected} rib from an empty rib stack");
        };
        assert_eq!(rib.kind, expected, "rib stack out of balance");
        self.stats.pops += 1;
        tracing::trace!(kind = %expected, depth = self.ribs.len(), "pop rib");
        rib
    }

    /// Number of open ribs
    pub fn depth(&self) -> usize {
        self.ribs.len()
    }

    /// The innermost rib
    ///
    /// # Panics
    ///
    /// Panics if no rib is open.
    #[allow(clippy::panic, reason = "An empty rib stack is a resolver bug")]
    pub fn innermost_rib(&self) -> &Rib {
        match self.ribs.last() {
            Some(rib) => rib,
            None => panic!("no rib is open"),
        }
    }

    /// Bind `ident` in the innermost rib, returning the binding it shadows there
    ///
    /// # Panics
    ///
    /// Panics if no rib is open.
    #[allow(clippy::panic, reason = "An empty rib stack is a resolver bug")]
    pub fn insert_binding(
        &mut self,
        ident: Ident,
        ns: Namespace,
        id: NodeId,
        kind: BindingKind,
    ) -> Option<Binding> {
        let Some(rib) = self.ribs.last_mut() else {
            panic!("binding inserted with no rib open");
        };
        tracing::trace!(name = %self.interner.resolve(&ident.name), %ns, id = id.0, %kind, "bind");
        rib.insert(
            ident.name,
            ns,
            Binding {
                id,
                kind,
                span: ident.span,
            },
        )
    }

    // Lookup

    /// Declaration `name` denotes in `ns` at the current point
    pub fn lookup(&self, name: Symbol, ns: Namespace) -> Option<NodeId> {
        match self.lookup_binding(name, ns) {
            Lookup::Found(binding) => Some(binding.id),
            Lookup::Outer(_) | Lookup::NotFound => None,
        }
    }

    /// Search the ribs innermost first, then the current module, then builtins
    ///
    /// Past an item barrier only item bindings are usable; a non-item binding
    /// found there is reported back as [`Lookup::Outer`].
    pub fn lookup_binding(&self, name: Symbol, ns: Namespace) -> Lookup {
        let mut crossed_item = false;
        for rib in self.ribs.iter().rev() {
            if let RibKind::Module(module) = rib.kind {
                return self.lookup_module_then_builtins(module, name, ns);
            }
            if let Some(binding) = rib.get(name, ns) {
                return if crossed_item && !binding.kind.crosses_items() {
                    Lookup::Outer(*binding)
                } else {
                    Lookup::Found(*binding)
                };
            }
            crossed_item |= rib.kind.is_item_barrier();
        }
        self.lookup_module_then_builtins(NodeId::CRATE, name, ns)
    }

    fn lookup_module_then_builtins(&self, module: NodeId, name: Symbol, ns: Namespace) -> Lookup {
        if let Some(binding) = self.lookup_in_scope(module, name, ns) {
            return Lookup::Found(binding);
        }
        match self.builtins.lookup(name, ns) {
            Some(id) => Lookup::Found(Binding {
                id,
                kind: BindingKind::Item,
                span: FileSpan::BUILTIN,
            }),
            None => Lookup::NotFound,
        }
    }

    /// Binding of `name` declared directly in the item scope `scope`
    pub fn lookup_in_scope(&self, scope: NodeId, name: Symbol, ns: Namespace) -> Option<Binding> {
        self.scopes
            .get(&scope)
            .and_then(|scope| scope.bindings.get(&(name, ns)))
            .copied()
    }

    /// Find the label `name`, stopping at function, closure, item and module ribs
    pub fn lookup_label(&self, name: Symbol) -> LabelLookup {
        for rib in self.ribs.iter().rev() {
            if rib.kind.is_label_rib() {
                if let Some(binding) = rib.get(name, Namespace::Label) {
                    return LabelLookup::Found {
                        id: binding.id,
                        kind: rib.kind,
                    };
                }
            }
            if rib.kind.is_label_barrier() {
                break;
            }
        }
        LabelLookup::NotFound
    }

    /// Whether an unlabeled `break` here would sit in the condition of the
    /// innermost loop
    pub fn in_loop_condition(&self) -> bool {
        for rib in self.ribs.iter().rev() {
            if rib.kind == RibKind::LoopCondition {
                return true;
            }
            if rib.kind == RibKind::Loop || rib.kind.is_label_barrier() {
                return false;
            }
        }
        false
    }

    /// Whether an unlabeled `break` would have a loop to leave
    pub fn in_loop(&self) -> bool {
        for rib in self.ribs.iter().rev() {
            if rib.kind == RibKind::Loop {
                return true;
            }
            if rib.kind.is_label_barrier() {
                return false;
            }
        }
        false
    }

    /// Module whose item scope applies at the current point
    pub fn current_module(&self) -> NodeId {
        self.ribs
            .iter()
            .rev()
            .find_map(|rib| match rib.kind {
                RibKind::Module(module) => Some(module),
                _ => None,
            })
            .unwrap_or(NodeId::CRATE)
    }

    /// Names usable in `ns` at the current point, innermost first
    pub fn visible_names(&self, ns: Namespace) -> Vec<Symbol> {
        let mut names = Vec::new();
        let mut crossed_item = false;
        let mut module = NodeId::CRATE;
        for rib in self.ribs.iter().rev() {
            if let RibKind::Module(id) = rib.kind {
                module = id;
                break;
            }
            names.extend(
                rib.bindings
                    .iter()
                    .filter(|((_, bound_ns), binding)| {
                        *bound_ns == ns && (!crossed_item || binding.kind.crosses_items())
                    })
                    .map(|((name, _), _)| *name),
            );
            crossed_item |= rib.kind.is_item_barrier();
        }
        names.extend(self.scope_names(module, ns));
        names.extend(self.builtins.names(ns));

        let mut seen = FxHashSet::default();
        names.retain(|name| seen.insert(*name));
        names
    }

    /// Names declared in the item scope `scope` in `ns`
    pub fn scope_names(&self, scope: NodeId, ns: Namespace) -> Vec<Symbol> {
        self.scopes
            .get(&scope)
            .map(|scope| {
                scope
                    .bindings
                    .keys()
                    .filter(|(_, bound_ns)| *bound_ns == ns)
                    .map(|(name, _)| *name)
                    .collect()
            })
            .unwrap_or_default()
    }

    // Item scopes and declarations

    /// Register the item scope of a module or enum
    pub fn add_scope(&mut self, id: NodeId, parent: Option<NodeId>, kind: ScopeKind) {
        self.scopes.insert(
            id,
            ItemScope {
                parent,
                kind,
                bindings: IndexMap::new(),
            },
        );
    }

    /// The item scope registered for `id`
    pub fn scope(&self, id: NodeId) -> Option<&ItemScope> {
        self.scopes.get(&id)
    }

    /// Declare an item in an item scope, reporting clashes in the same namespace
    ///
    /// # Panics
    ///
    /// Panics if `scope` was never registered.
    #[allow(clippy::panic, reason = "Scopes are registered before items are defined in them")]
    pub fn define_item(&mut self, scope: NodeId, ident: Ident, ns: Namespace, id: NodeId) {
        let Some(item_scope) = self.scopes.get_mut(&scope) else {
            panic!("item defined in unregistered scope {}", scope.0);
        };
        let binding = Binding {
            id,
            kind: BindingKind::Item,
            span: ident.span,
        };
        match item_scope.bindings.get(&(ident.name, ns)) {
            Some(first) => {
                let first = first.span;
                self.report_error(
                    ident.span,
                    ResolutionErrorKind::DuplicateDefinition {
                        name: self.name(ident.name),
                        namespace: ns,
                        first,
                    },
                );
            }
            None => {
                item_scope.bindings.insert((ident.name, ns), binding);
                tracing::debug!(
                    name = %self.interner.resolve(&ident.name),
                    %ns,
                    id = id.0,
                    scope = scope.0,
                    "define item"
                );
            }
        }
    }

    /// Remember what the declaration `id` is
    pub fn set_def(&mut self, id: NodeId, kind: DefKind, ident: Ident) {
        self.defs.insert(
            id,
            DefInfo {
                kind,
                name: ident.name,
                span: ident.span,
            },
        );
    }

    /// What the declaration `id` is, if it is a registered item
    pub fn def(&self, id: NodeId) -> Option<DefInfo> {
        self.defs.get(&id).copied()
    }

    /// Register the named fields of a struct or variant
    pub fn set_fields(&mut self, owner: NodeId, fields: IndexMap<Symbol, NodeId>) {
        self.fields.insert(owner, fields);
    }

    /// Field table of a struct or variant
    pub fn fields(&self, owner: NodeId) -> Option<&IndexMap<Symbol, NodeId>> {
        self.fields.get(&owner)
    }

    // Recording

    /// Record that `use_id` denotes `decl` in `ns`
    ///
    /// # Panics
    ///
    /// Panics if `use_id` was already recorded in `ns` with a different
    /// declaration.
    pub fn record_resolution(&mut self, use_id: NodeId, ns: Namespace, decl: NodeId) {
        if let Some(previous) = self.resolutions.insert((use_id, ns), decl) {
            assert_eq!(
                previous, decl,
                "conflicting resolutions for node {} in the {ns} namespace",
                use_id.0
            );
        }
        tracing::trace!(use_id = use_id.0, %ns, decl = decl.0, "resolved");
    }

    /// Declaration already recorded for `use_id` in `ns`
    pub fn resolution(&self, use_id: NodeId, ns: Namespace) -> Option<NodeId> {
        self.resolutions.get(&(use_id, ns)).copied()
    }

    /// Record that a field use denotes the field declaration `field`
    pub fn record_field(&mut self, use_id: NodeId, field: NodeId) {
        self.field_resolutions.insert(use_id, field);
    }

    /// Record a type-relative path
    pub fn record_partial(&mut self, path_id: NodeId, base: NodeId, unresolved_segments: usize) {
        tracing::trace!(path = path_id.0, base = base.0, unresolved_segments, "partial");
        self.partial_resolutions.insert(
            path_id,
            PartialResolution {
                base,
                unresolved_segments,
            },
        );
    }

    /// Report a recoverable error
    pub fn report_error(&mut self, span: FileSpan, kind: ResolutionErrorKind) {
        tracing::debug!(%span, error = %kind, "resolution error");
        self.errors.push(ResolutionError::new(kind, span));
    }

    /// Report `ident` as unresolved in `ns`, suggesting near names from `candidates`
    pub fn report_unresolved(&mut self, ident: Ident, ns: Namespace, candidates: &[Symbol]) {
        let suggestions =
            ResolutionError::compute_suggestions(ident.name, self.interner, candidates, &self.options);
        self.report_error(
            ident.span,
            ResolutionErrorKind::UnresolvedName {
                name: self.name(ident.name),
                namespace: ns,
                suggestions,
            },
        );
    }

    /// Errors reported so far
    pub fn errors(&self) -> &[ResolutionError] {
        &self.errors
    }

    /// Hand over the recorded results
    ///
    /// # Panics
    ///
    /// Panics if ribs are still open.
    pub fn finish(self) -> ResolutionResult {
        assert!(
            self.ribs.is_empty(),
            "{} ribs left open at the end of resolution",
            self.ribs.len()
        );
        ResolutionResult {
            resolutions: self.resolutions,
            field_resolutions: self.field_resolutions,
            partial_resolutions: self.partial_resolutions,
            errors: self.errors,
            stats: self.stats,
            builtins: self.builtins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup_builtin_types;
    use cv_span::{FileId, Span};

    fn ident(interner: &Interner, name: &str, at: u32) -> Ident {
        Ident::new(
            interner.intern(name),
            FileSpan::new(FileId::new(0), Span::new(at, at + 1)),
        )
    }

    fn context(interner: &Interner) -> NameResolutionContext<'_> {
        let builtins = setup_builtin_types(interner, NodeId(1000));
        NameResolutionContext::new(interner, ResolveOptions::default(), builtins)
    }

    #[test]
    fn test_innermost_binding_wins() {
        let interner = Interner::new();
        let mut ctx = context(&interner);
        let x = ident(&interner, "x", 0);
        ctx.push_rib(RibKind::Normal);
        ctx.insert_binding(x, Namespace::Value, NodeId(1), BindingKind::Local);
        ctx.push_rib(RibKind::Normal);
        ctx.insert_binding(x, Namespace::Value, NodeId(2), BindingKind::Local);
        assert_eq!(ctx.depth(), 2);
        assert_eq!(ctx.lookup(x.name, Namespace::Value), Some(NodeId(2)));
        ctx.pop_rib(RibKind::Normal);
        assert_eq!(ctx.lookup(x.name, Namespace::Value), Some(NodeId(1)));
        assert_eq!(ctx.lookup(x.name, Namespace::Type), None);
        ctx.pop_rib(RibKind::Normal);

        let result = ctx.finish();
        assert_eq!(result.stats.pushes, 2);
        assert_eq!(result.stats.pops, 2);
        assert_eq!(result.stats.max_depth, 2);
    }

    #[test]
    fn test_item_barrier_hides_locals() {
        let interner = Interner::new();
        let mut ctx = context(&interner);
        let x = ident(&interner, "x", 0);
        let helper = ident(&interner, "helper", 2);
        ctx.push_rib(RibKind::Normal);
        ctx.insert_binding(x, Namespace::Value, NodeId(1), BindingKind::Local);
        ctx.insert_binding(helper, Namespace::Value, NodeId(2), BindingKind::Item);
        ctx.push_rib(RibKind::Item);
        assert!(matches!(
            ctx.lookup_binding(x.name, Namespace::Value),
            Lookup::Outer(Binding { id: NodeId(1), .. })
        ));
        assert_eq!(ctx.lookup(helper.name, Namespace::Value), Some(NodeId(2)));
        ctx.pop_rib(RibKind::Item);
        ctx.pop_rib(RibKind::Normal);
    }

    #[test]
    fn test_module_scope_then_builtins() {
        let interner = Interner::new();
        let mut ctx = context(&interner);
        let answer = ident(&interner, "answer", 0);
        ctx.define_item(NodeId::CRATE, answer, Namespace::Value, NodeId(5));
        ctx.push_rib(RibKind::Module(NodeId::CRATE));
        assert_eq!(ctx.lookup(answer.name, Namespace::Value), Some(NodeId(5)));
        let i32_sym = interner.intern("i32");
        assert_eq!(
            ctx.lookup(i32_sym, Namespace::Type),
            ctx.builtins().lookup(i32_sym, Namespace::Type)
        );
        ctx.pop_rib(RibKind::Module(NodeId::CRATE));
    }

    #[test]
    fn test_duplicate_item_is_reported_once() {
        let interner = Interner::new();
        let mut ctx = context(&interner);
        ctx.define_item(NodeId::CRATE, ident(&interner, "f", 0), Namespace::Value, NodeId(1));
        ctx.define_item(NodeId::CRATE, ident(&interner, "f", 4), Namespace::Value, NodeId(2));
        ctx.define_item(NodeId::CRATE, ident(&interner, "f", 8), Namespace::Type, NodeId(3));
        assert_eq!(ctx.errors().len(), 1);
        assert!(matches!(
            ctx.errors()[0].kind,
            ResolutionErrorKind::DuplicateDefinition {
                namespace: Namespace::Value,
                ..
            }
        ));
        assert_eq!(
            ctx.lookup_in_scope(NodeId::CRATE, interner.intern("f"), Namespace::Value)
                .map(|binding| binding.id),
            Some(NodeId(1))
        );
    }

    #[test]
    fn test_labels_stop_at_closures() {
        let interner = Interner::new();
        let mut ctx = context(&interner);
        let outer = ident(&interner, "outer", 0);
        ctx.push_rib(RibKind::Loop);
        ctx.insert_binding(outer, Namespace::Label, NodeId(1), BindingKind::Label);
        assert!(ctx.in_loop());
        assert_eq!(
            ctx.lookup_label(outer.name),
            LabelLookup::Found {
                id: NodeId(1),
                kind: RibKind::Loop
            }
        );
        ctx.push_rib(RibKind::Closure);
        assert_eq!(ctx.lookup_label(outer.name), LabelLookup::NotFound);
        assert!(!ctx.in_loop());
        ctx.pop_rib(RibKind::Closure);
        ctx.pop_rib(RibKind::Loop);
    }

    #[test]
    fn test_loop_condition_is_not_the_loop_body() {
        let interner = Interner::new();
        let mut ctx = context(&interner);
        ctx.push_rib(RibKind::Loop);
        ctx.push_rib(RibKind::LoopCondition);
        assert!(ctx.in_loop_condition());
        ctx.push_rib(RibKind::Loop);
        assert!(!ctx.in_loop_condition());
        ctx.pop_rib(RibKind::Loop);
        ctx.pop_rib(RibKind::LoopCondition);
        assert!(!ctx.in_loop_condition());
        ctx.pop_rib(RibKind::Loop);
    }

    #[test]
    fn test_rewriting_same_resolution_is_allowed() {
        let interner = Interner::new();
        let mut ctx = context(&interner);
        ctx.record_resolution(NodeId(3), Namespace::Value, NodeId(1));
        ctx.record_resolution(NodeId(3), Namespace::Value, NodeId(1));
        ctx.record_resolution(NodeId(3), Namespace::Type, NodeId(2));
        assert_eq!(ctx.resolution(NodeId(3), Namespace::Value), Some(NodeId(1)));
        assert_eq!(ctx.resolution(NodeId(3), Namespace::Type), Some(NodeId(2)));
    }

    #[test]
    #[should_panic(expected = "conflicting resolutions")]
    fn test_conflicting_resolution_panics() {
        let interner = Interner::new();
        let mut ctx = context(&interner);
        ctx.record_resolution(NodeId(3), Namespace::Value, NodeId(1));
        ctx.record_resolution(NodeId(3), Namespace::Value, NodeId(2));
    }

    #[test]
    #[should_panic(expected = "rib stack out of balance")]
    fn test_mismatched_pop_panics() {
        let interner = Interner::new();
        let mut ctx = context(&interner);
        ctx.push_rib(RibKind::Normal);
        ctx.pop_rib(RibKind::Function);
    }

    #[test]
    #[should_panic(expected = "empty rib stack")]
    fn test_pop_of_empty_stack_panics() {
        let interner = Interner::new();
        let mut ctx = context(&interner);
        ctx.pop_rib(RibKind::Normal);
    }
}
