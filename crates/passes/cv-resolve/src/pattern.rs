//! Binding collection for patterns
//!
//! A [`LatePattern`] walks one pattern, gathers the names it binds and checks
//! them for duplicates and or-pattern consistency. The names are only made
//! visible once the whole pattern has been walked, so a pattern can never
//! refer to its own bindings.

use crate::late::Late;
use crate::{BindingKind, Namespace, ResolutionErrorKind};
use cv_ast::visit::{self, Visitor};
use cv_ast::*;
use cv_intern::Symbol;
use cv_span::FileSpan;
use derive_more::Display;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::mem;

/// Where a pattern appears
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
pub enum PatternSource {
    /// `let` statement
    #[display("let binding")]
    Let,
    /// Function parameter
    #[display("function parameter")]
    FnParam,
    /// `match` arm
    #[display("match binding")]
    Match,
    /// `if let`
    #[display("if let binding")]
    IfLet,
    /// `while let`
    #[display("while let binding")]
    WhileLet,
    /// `for` loop
    #[display("for binding")]
    For,
    /// Closure parameter
    #[display("closure parameter")]
    Closure,
}

impl PatternSource {
    /// Whether patterns from this source share one parameter list
    pub fn is_parameter_list(self) -> bool {
        matches!(self, Self::FnParam | Self::Closure)
    }
}

/// Names bound by a pattern with their binding site, in binding order
pub type PatternBindings = IndexMap<Symbol, (FileSpan, NodeId)>;

/// Collects the bindings of a single pattern
///
/// Paths inside the pattern (tuple-struct and struct constructors, constants,
/// range bounds) are resolved through the owning [`Late`] resolver.
pub struct LatePattern<'p, 'r, 'a> {
    late: &'p mut Late<'r, 'a>,
    source: PatternSource,
    bindings: PatternBindings,
    /// First occurrence of an or-pattern name -> its later occurrences
    merged: FxHashMap<NodeId, Vec<NodeId>>,
}

impl<'p, 'r, 'a> LatePattern<'p, 'r, 'a> {
    /// Resolve `pat` and bind its names as locals in the innermost rib
    #[tracing::instrument(level = "trace", skip_all, fields(pat = pat.id.0, %source))]
    pub fn go(late: &'p mut Late<'r, 'a>, pat: &Pat, source: PatternSource) {
        let mut this = Self {
            late,
            source,
            bindings: IndexMap::new(),
            merged: FxHashMap::default(),
        };
        let bindings = this.go_inner(pat);
        for (first, later) in mem::take(&mut this.merged) {
            for id in later {
                this.late.ctx.record_resolution(id, Namespace::Value, first);
            }
        }
        for (name, (span, id)) in bindings {
            this.late.ctx.insert_binding(
                Ident::new(name, span),
                Namespace::Value,
                id,
                BindingKind::Local,
            );
        }
    }

    /// Walk `pat` and hand back the names it binds without binding them
    fn go_inner(&mut self, pat: &Pat) -> PatternBindings {
        self.visit_pat(pat);
        mem::take(&mut self.bindings)
    }

    fn handle_ident(&mut self, ident: Ident, id: NodeId) {
        if self.source.is_parameter_list()
            && self
                .late
                .ctx
                .innermost_rib()
                .get(ident.name, Namespace::Value)
                .is_some_and(|binding| binding.kind == BindingKind::Local)
        {
            self.late.ctx.report_error(
                ident.span,
                ResolutionErrorKind::IdentifierBoundMoreThanOnceInParameterList {
                    name: self.late.ctx.name(ident.name),
                },
            );
            return;
        }
        if self.bindings.contains_key(&ident.name) {
            self.late.ctx.report_error(
                ident.span,
                ResolutionErrorKind::IdentifierBoundMoreThanOnceInSamePattern {
                    name: self.late.ctx.name(ident.name),
                },
            );
            return;
        }
        self.bindings.insert(ident.name, (ident.span, id));
    }
}

impl Visitor for LatePattern<'_, '_, '_> {
    fn visit_identifier_pattern(&mut self, pat: &Pat, ident: &IdentPat) {
        self.handle_ident(ident.ident, pat.id);
        visit::walk_identifier_pattern(self, ident);
    }

    fn visit_struct_pattern(&mut self, _pat: &Pat, strukt: &StructPat) {
        let owner = self.late.resolve_struct_path(&strukt.path);
        for field in &strukt.fields {
            self.late.resolve_field(owner, field.id, field.ident);
            self.visit_pat(&field.pat);
        }
    }

    /// Every alternative must bind the same names
    ///
    /// Each alternative starts from the bindings made before the or-pattern.
    /// Afterwards the union of the new names is kept, each mapped to its first
    /// occurrence; later occurrences resolve to that first one. Occurrences
    /// already merged by a nested or-pattern move along with their first one.
    fn visit_alt_pattern(&mut self, pat: &Pat, alts: &[Pat]) {
        let outer = mem::take(&mut self.bindings);
        let mut per_alt: Vec<PatternBindings> = Vec::with_capacity(alts.len());
        for alt in alts {
            self.bindings = outer.clone();
            self.visit_pat(alt);
            let fresh = mem::take(&mut self.bindings)
                .into_iter()
                .filter(|(name, _)| !outer.contains_key(name))
                .collect();
            per_alt.push(fresh);
        }

        let mut union = PatternBindings::new();
        for bindings in &per_alt {
            for (&name, &site) in bindings {
                union.entry(name).or_insert(site);
            }
        }

        for &name in union.keys() {
            if per_alt.iter().any(|bindings| !bindings.contains_key(&name)) {
                self.late.ctx.report_error(
                    pat.span,
                    ResolutionErrorKind::VariableNotBoundInPattern {
                        name: self.late.ctx.name(name),
                    },
                );
            }
        }

        for bindings in &per_alt {
            for (name, &(_, id)) in bindings {
                let (_, first) = union[name];
                if id != first {
                    let mut later = self.merged.remove(&id).unwrap_or_default();
                    later.push(id);
                    self.merged.entry(first).or_default().extend(later);
                }
            }
        }

        self.bindings = outer;
        self.bindings.extend(union);
    }

    fn visit_path_in_expression(&mut self, path: &Path) {
        self.late.visit_path_in_expression(path);
    }

    fn visit_type_path(&mut self, path: &Path) {
        self.late.visit_type_path(path);
    }

    fn visit_generic_args(&mut self, args: &GenericArgs) {
        self.late.visit_generic_args(args);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        self.late.visit_expr(expr);
    }

    fn visit_ty(&mut self, ty: &Ty) {
        self.late.visit_ty(ty);
    }
}
