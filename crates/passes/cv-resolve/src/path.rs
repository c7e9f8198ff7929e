//! Identifier and path resolution against the context

use crate::{Lookup, NameResolutionContext, Namespace, PartialResolution, ResolutionErrorKind};
use cv_ast::{Ident, NodeId, Path};
use cv_intern::{Interner, Symbol};

/// How far a path resolved
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PathResolution {
    /// Every segment resolved; the path denotes this declaration
    Full(NodeId),
    /// A prefix resolved; the rest is type-relative
    Partial(PartialResolution),
}

impl PathResolution {
    /// Declaration of the full path or of the resolved prefix
    pub fn base(self) -> NodeId {
        match self {
            Self::Full(id) => id,
            Self::Partial(partial) => partial.base,
        }
    }

    /// Declaration of the full path, if every segment resolved
    pub fn full(self) -> Option<NodeId> {
        match self {
            Self::Full(id) => Some(id),
            Self::Partial(_) => None,
        }
    }
}

struct Keywords {
    krate: Symbol,
    super_: Symbol,
    self_lower: Symbol,
    self_upper: Symbol,
}

impl Keywords {
    fn new(interner: &Interner) -> Self {
        Self {
            krate: interner.intern("crate"),
            super_: interner.intern("super"),
            self_lower: interner.intern("self"),
            self_upper: interner.intern("Self"),
        }
    }
}

impl NameResolutionContext<'_> {
    /// Resolve a lone identifier lexically, reporting failures
    ///
    /// `Self` used as a value (a unit or tuple struct constructor) falls back
    /// to the `Self` type binding.
    pub fn resolve_ident(&mut self, ident: Ident, ns: Namespace) -> Option<NodeId> {
        match self.lookup_binding(ident.name, ns) {
            Lookup::Found(binding) => Some(binding.id),
            Lookup::Outer(binding) => {
                self.report_error(
                    ident.span,
                    ResolutionErrorKind::OuterItemBinding {
                        name: self.name(ident.name),
                        binding: binding.kind,
                        declared: binding.span,
                    },
                );
                None
            }
            Lookup::NotFound => {
                let self_upper = Keywords::new(self.interner()).self_upper;
                if ns == Namespace::Value && ident.name == self_upper {
                    if let Lookup::Found(binding) = self.lookup_binding(ident.name, Namespace::Type) {
                        return Some(binding.id);
                    }
                }
                let candidates = self.visible_names(ns);
                self.report_unresolved(ident, ns, &candidates);
                None
            }
        }
    }

    /// Resolve a name declared directly in the item scope `scope`
    fn resolve_in_scope(&mut self, scope: NodeId, ident: Ident, ns: Namespace) -> Option<NodeId> {
        if let Some(binding) = self.lookup_in_scope(scope, ident.name, ns) {
            return Some(binding.id);
        }
        let candidates = self.scope_names(scope, ns);
        self.report_unresolved(ident, ns, &candidates);
        None
    }

    /// Resolve `path` in `ns` segment by segment
    ///
    /// Every resolved segment is recorded (non-final segments in the type
    /// namespace). A fully resolved path is also recorded under its own id;
    /// a path that steps into something other than a module or enum is
    /// recorded as partial. Returns `None` after reporting an error.
    pub fn resolve_path(&mut self, path: &Path, ns: Namespace) -> Option<PathResolution> {
        let kw = Keywords::new(self.interner());
        let segments = &path.segments;
        let last = segments.len().checked_sub(1)?;
        let ns_at = |idx: usize| if idx == last { ns } else { Namespace::Type };

        for (idx, segment) in segments.iter().enumerate() {
            let name = segment.ident.name;
            let error = if name == kw.krate && (idx > 0 || path.global) {
                Some(ResolutionErrorKind::CrateInNonStartPosition)
            } else if name == kw.self_lower && (idx > 0 || path.global) {
                Some(ResolutionErrorKind::SelfInNonStartPosition)
            } else if name == kw.super_ && idx > 0 {
                let previous = segments[idx - 1].ident.name;
                let allowed = previous == kw.super_ || (idx == 1 && previous == kw.self_lower);
                (!allowed).then_some(ResolutionErrorKind::SuperInNonStartPosition)
            } else {
                None
            };
            if let Some(error) = error {
                self.report_error(segment.ident.span, error);
                return None;
            }
        }

        // Leading `::`, `crate`, `self` and `super` pick the starting module
        let mut idx = 0;
        let mut scope = path.global.then_some(NodeId::CRATE);
        if segments[0].ident.name == kw.krate {
            scope = Some(NodeId::CRATE);
            idx = 1;
        } else if segments[0].ident.name == kw.self_lower && last > 0 {
            scope = Some(self.current_module());
            idx = 1;
        }
        if let Some(scope) = scope.filter(|_| idx == 1) {
            self.record_resolution(segments[0].id, Namespace::Type, scope);
        }
        while idx <= last && segments[idx].ident.name == kw.super_ {
            let from = scope.unwrap_or_else(|| self.current_module());
            let Some(parent) = self.scope(from).and_then(|item_scope| item_scope.parent) else {
                self.report_error(
                    segments[idx].ident.span,
                    ResolutionErrorKind::TooManyLeadingSuper,
                );
                return None;
            };
            self.record_resolution(segments[idx].id, Namespace::Type, parent);
            scope = Some(parent);
            idx += 1;
        }

        if idx > last {
            // the path is nothing but keywords, e.g. `super`
            let module = scope?;
            self.record_resolution(path.id, ns, module);
            return Some(PathResolution::Full(module));
        }

        let first = &segments[idx];
        let mut decl = match scope {
            None => self.resolve_ident(first.ident, ns_at(idx))?,
            Some(scope) => self.resolve_in_scope(scope, first.ident, ns_at(idx))?,
        };
        self.record_resolution(first.id, ns_at(idx), decl);
        idx += 1;

        while idx <= last {
            let steps_into_scope = self
                .def(decl)
                .is_some_and(|def| def.kind.has_item_scope());
            if !steps_into_scope {
                let unresolved_segments = last + 1 - idx;
                self.record_partial(path.id, decl, unresolved_segments);
                return Some(PathResolution::Partial(PartialResolution {
                    base: decl,
                    unresolved_segments,
                }));
            }
            let segment = &segments[idx];
            decl = self.resolve_in_scope(decl, segment.ident, ns_at(idx))?;
            self.record_resolution(segment.id, ns_at(idx), decl);
            idx += 1;
        }

        self.record_resolution(path.id, ns, decl);
        Some(PathResolution::Full(decl))
    }
}
