//! The late resolver
//!
//! Walks the whole crate after expansion, opening ribs as it enters scopes and
//! recording a declaration for every name use it meets. Patterns are handed
//! to [`LatePattern`], which returns the names they bind.

use crate::pattern::{LatePattern, PatternSource};
use crate::toplevel::{TopLevel, item_namespaces};
use crate::{
    BindingKind, LabelLookup, Lookup, NameResolutionContext, Namespace, PathResolution,
    ResolutionErrorKind, RibKind,
};
use cv_ast::visit::{self, Visitor};
use cv_ast::*;
use cv_intern::Symbol;
use cv_span::FileSpan;
use rustc_hash::FxHashMap;
use tracing::instrument;

/// Resolver for everything below the module level
pub struct Late<'r, 'a> {
    pub(crate) ctx: &'r mut NameResolutionContext<'a>,
    self_lower: Symbol,
    self_upper: Symbol,
}

impl<'r, 'a> Late<'r, 'a> {
    /// A resolver recording into `ctx`
    pub fn new(ctx: &'r mut NameResolutionContext<'a>) -> Self {
        let interner = ctx.interner();
        Self {
            self_lower: interner.intern("self"),
            self_upper: interner.intern("Self"),
            ctx,
        }
    }

    /// Resolve every name in the crate
    ///
    /// Module-level items must already be collected into the context. The
    /// rib stack is empty again when this returns.
    #[instrument(level = "debug", skip_all, fields(items = krate.items.len()))]
    pub fn go(&mut self, krate: &Crate) {
        self.with_rib(RibKind::Module(NodeId::CRATE), |this| {
            visit::walk_crate(this, krate);
        });
    }

    /// Run `f` inside a fresh rib of `kind`
    pub fn with_rib<T>(&mut self, kind: RibKind, f: impl FnOnce(&mut Self) -> T) -> T {
        self.ctx.push_rib(kind);
        let result = f(self);
        self.ctx.pop_rib(kind);
        result
    }

    /// Open a `Generics` rib holding `Self` (when given) and the parameters,
    /// resolve the bounds and where clause, then run `f` inside it
    fn with_generics<T>(
        &mut self,
        generics: &Generics,
        self_ty: Option<(NodeId, FileSpan)>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.with_rib(RibKind::Generics, |this| {
            if let Some((id, span)) = self_ty {
                let ident = Ident::new(this.self_upper, span);
                this.ctx
                    .insert_binding(ident, Namespace::Type, id, BindingKind::SelfType);
            }
            this.declare_generic_params(generics);
            visit::walk_generics(this, generics);
            f(this)
        })
    }

    /// Bind every parameter before any bound is resolved so that bounds may
    /// refer to later parameters
    ///
    /// Lifetimes are checked for duplicates among themselves; type and const
    /// parameters share one list.
    fn declare_generic_params(&mut self, generics: &Generics) {
        let mut seen: FxHashMap<(Symbol, Namespace), FileSpan> = FxHashMap::default();
        for param in &generics.params {
            let ns = match param.kind {
                GenericParamKind::Lifetime { .. } => Namespace::Lifetime,
                GenericParamKind::Type { .. } => Namespace::Type,
                GenericParamKind::Const { .. } => Namespace::Value,
            };
            let list = if ns == Namespace::Lifetime {
                Namespace::Lifetime
            } else {
                Namespace::Type
            };
            if let Some(&first) = seen.get(&(param.ident.name, list)) {
                self.ctx.report_error(
                    param.ident.span,
                    ResolutionErrorKind::DuplicateGenericParam {
                        name: self.ctx.name(param.ident.name),
                        first,
                    },
                );
                continue;
            }
            seen.insert((param.ident.name, list), param.ident.span);
            self.ctx
                .insert_binding(param.ident, ns, param.id, BindingKind::GenericParam);
        }
    }

    /// Trait and impl members see the enclosing generics and `Self`
    fn resolve_assoc_items(&mut self, items: &[Item]) {
        for item in items {
            tracing::debug!(id = item.id.0, "resolve associated item");
            self.with_rib(RibKind::AssocItem, |this| visit::walk_item(this, item));
        }
    }

    /// Bind an item declared inside a block in the block's rib
    fn predeclare_block_item(&mut self, item: &Item) {
        let module = self.ctx.current_module();
        TopLevel::in_module(&mut *self.ctx, module).register_details(item);
        let Some(ident) = item.ident() else {
            return;
        };
        for &ns in item_namespaces(item) {
            let clash = self
                .ctx
                .innermost_rib()
                .get(ident.name, ns)
                .filter(|binding| binding.kind == BindingKind::Item)
                .copied();
            if let Some(first) = clash {
                self.ctx.report_error(
                    ident.span,
                    ResolutionErrorKind::DuplicateDefinition {
                        name: self.ctx.name(ident.name),
                        namespace: ns,
                        first: first.span,
                    },
                );
                continue;
            }
            self.ctx
                .insert_binding(ident, ns, item.id, BindingKind::Item);
        }
    }

    /// Resolve the path of a struct literal or struct pattern, returning the
    /// struct or variant when it resolved completely
    pub(crate) fn resolve_struct_path(&mut self, path: &Path) -> Option<NodeId> {
        let resolution = self.ctx.resolve_path(path, Namespace::Type);
        visit::walk_path(self, path);
        resolution.and_then(PathResolution::full)
    }

    /// Check a field name against the field table of `owner`
    ///
    /// Owners without a field table (aliases, `Self`, type parameters) are
    /// left to the type checker.
    pub(crate) fn resolve_field(&mut self, owner: Option<NodeId>, use_id: NodeId, ident: Ident) {
        let Some(owner) = owner else {
            return;
        };
        let Some(fields) = self.ctx.fields(owner) else {
            return;
        };
        match fields.get(&ident.name).copied() {
            Some(field) => self.ctx.record_field(use_id, field),
            None => {
                let parent = self
                    .ctx
                    .def(owner)
                    .map(|def| self.ctx.name(def.name))
                    .unwrap_or_default();
                self.ctx.report_error(
                    ident.span,
                    ResolutionErrorKind::NoSuchField {
                        name: self.ctx.name(ident.name),
                        parent,
                    },
                );
            }
        }
    }

    /// Declare a loop or block label in the innermost rib
    pub fn new_label(&mut self, name: Ident, id: NodeId) {
        self.ctx
            .insert_binding(name, Namespace::Label, id, BindingKind::Label);
    }

    fn resolve_label(&mut self, label: &Lifetime, is_continue: bool) {
        match self.ctx.lookup_label(label.ident.name) {
            LabelLookup::Found { id, kind } => {
                self.ctx.record_resolution(label.id, Namespace::Label, id);
                if is_continue
                    && kind == RibKind::LabeledBlock
                    && self.ctx.options().check_loop_control
                {
                    self.ctx.report_error(
                        label.ident.span,
                        ResolutionErrorKind::ContinueToLabeledBlock {
                            name: self.ctx.name(label.ident.name),
                        },
                    );
                }
            }
            LabelLookup::NotFound => self.ctx.report_error(
                label.ident.span,
                ResolutionErrorKind::UndeclaredLabel {
                    name: self.ctx.name(label.ident.name),
                },
            ),
        }
    }

    fn check_in_loop(&mut self, expr: &Expr, keyword: &'static str) {
        if !self.ctx.options().check_loop_control {
            return;
        }
        if self.ctx.in_loop_condition() {
            self.ctx.report_error(
                expr.span,
                ResolutionErrorKind::BreakInLoopCondition { keyword },
            );
        } else if !self.ctx.in_loop() {
            self.ctx
                .report_error(expr.span, ResolutionErrorKind::BreakOutsideLoop { keyword });
        }
    }
}

impl Visitor for Late<'_, '_> {
    fn visit_item(&mut self, item: &Item) {
        tracing::debug!(id = item.id.0, "resolve item");
        self.with_rib(RibKind::Item, |this| visit::walk_item(this, item));
    }

    fn visit_function(&mut self, _item: &Item, func: &Function) {
        self.with_generics(&func.generics, None, |this| {
            this.with_rib(RibKind::Function, |this| {
                visit::walk_fn_signature(this, func);
                if let Some(body) = &func.body {
                    this.visit_block(body);
                }
            });
        });
    }

    fn visit_struct_struct(&mut self, item: &Item, def: &StructDef) {
        self.with_generics(&def.generics, Some((item.id, def.ident.span)), |this| {
            for field in def.data.fields() {
                this.visit_field_def(field);
            }
        });
    }

    fn visit_tuple_struct(&mut self, item: &Item, def: &StructDef) {
        self.visit_struct_struct(item, def);
    }

    fn visit_enum(&mut self, item: &Item, def: &EnumDef) {
        self.with_generics(&def.generics, Some((item.id, def.ident.span)), |this| {
            for variant in &def.variants {
                this.visit_variant(variant);
            }
        });
    }

    fn visit_trait(&mut self, item: &Item, def: &TraitDef) {
        self.with_generics(&def.generics, Some((item.id, def.ident.span)), |this| {
            for bound in &def.supertraits {
                this.visit_generic_bound(bound);
            }
            this.resolve_assoc_items(&def.items);
        });
    }

    fn visit_inherent_impl(&mut self, item: &Item, imp: &InherentImpl) {
        self.with_generics(&imp.generics, Some((item.id, imp.self_ty.span)), |this| {
            this.visit_ty(&imp.self_ty);
            this.resolve_assoc_items(&imp.items);
        });
    }

    fn visit_trait_impl(&mut self, item: &Item, imp: &TraitImpl) {
        self.with_generics(&imp.generics, Some((item.id, imp.self_ty.span)), |this| {
            this.visit_type_path(&imp.trait_ref);
            this.visit_ty(&imp.self_ty);
            this.resolve_assoc_items(&imp.items);
        });
    }

    fn visit_type_alias(&mut self, _item: &Item, def: &TypeAlias) {
        self.with_generics(&def.generics, None, |this| {
            for bound in &def.bounds {
                this.visit_generic_bound(bound);
            }
            if let Some(ty) = &def.ty {
                this.visit_ty(ty);
            }
        });
    }

    fn visit_module(&mut self, item: &Item, module: &Module) {
        tracing::debug!(module = item.id.0, "enter module");
        self.with_rib(RibKind::Module(item.id), |this| {
            visit::walk_module(this, module);
        });
    }

    // The generics rib is filled by `with_generics`; the default walk of a
    // parameter only resolves its bounds and defaults.

    fn visit_self_param(&mut self, param: &SelfParam) {
        let ident = Ident::new(self.self_lower, param.span);
        self.ctx
            .insert_binding(ident, Namespace::Value, param.id, BindingKind::SelfParam);
        visit::walk_self_param(self, param);
    }

    fn visit_param(&mut self, param: &Param) {
        self.visit_ty(&param.ty);
        LatePattern::go(self, &param.pat, PatternSource::FnParam);
    }

    fn visit_block(&mut self, block: &Block) {
        self.with_rib(RibKind::Normal, |this| {
            for item in block.items() {
                this.predeclare_block_item(item);
            }
            for stmt in &block.stmts {
                this.visit_stmt(stmt);
            }
            if let Some(tail) = &block.tail {
                this.visit_expr(tail);
            }
        });
    }

    fn visit_let_stmt(&mut self, local: &LetStmt) {
        if let Some(ty) = &local.ty {
            self.visit_ty(ty);
        }
        if let Some(init) = &local.init {
            self.visit_expr(init);
        }
        if let Some(else_block) = &local.else_block {
            self.visit_block(else_block);
        }
        LatePattern::go(self, &local.pat, PatternSource::Let);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Block(block, Some(label)) => {
                self.with_rib(RibKind::LabeledBlock, |this| {
                    this.visit_loop_label(label);
                    this.visit_block(block);
                });
            }
            ExprKind::Loop(body, label) => {
                self.with_rib(RibKind::Loop, |this| {
                    if let Some(label) = label {
                        this.visit_loop_label(label);
                    }
                    this.visit_block(body);
                });
            }
            ExprKind::While { cond, body, label } => {
                self.with_rib(RibKind::Loop, |this| {
                    if let Some(label) = label {
                        this.visit_loop_label(label);
                    }
                    this.with_rib(RibKind::LoopCondition, |this| this.visit_expr(cond));
                    this.visit_block(body);
                });
            }
            ExprKind::WhileLet {
                pat,
                scrutinee,
                body,
                label,
            } => {
                self.with_rib(RibKind::Loop, |this| {
                    if let Some(label) = label {
                        this.visit_loop_label(label);
                    }
                    this.with_rib(RibKind::LoopCondition, |this| this.visit_expr(scrutinee));
                    this.with_rib(RibKind::Pattern, |this| {
                        LatePattern::go(this, pat, PatternSource::WhileLet);
                        this.visit_block(body);
                    });
                });
            }
            ExprKind::ForLoop {
                pat,
                iter,
                body,
                label,
            } => {
                self.visit_expr(iter);
                self.with_rib(RibKind::Loop, |this| {
                    if let Some(label) = label {
                        this.visit_loop_label(label);
                    }
                    this.with_rib(RibKind::Pattern, |this| {
                        LatePattern::go(this, pat, PatternSource::For);
                        this.visit_block(body);
                    });
                });
            }
            ExprKind::IfLet {
                pat,
                scrutinee,
                then,
                else_,
            } => {
                self.visit_expr(scrutinee);
                self.with_rib(RibKind::Pattern, |this| {
                    LatePattern::go(this, pat, PatternSource::IfLet);
                    this.visit_block(then);
                });
                if let Some(else_) = else_ {
                    self.visit_expr(else_);
                }
            }
            _ => visit::walk_expr(self, expr),
        }
    }

    fn visit_identifier_expr(&mut self, expr: &Expr, ident: &Ident) {
        if let Some(decl) = self.ctx.resolve_ident(*ident, Namespace::Value) {
            self.ctx.record_resolution(expr.id, Namespace::Value, decl);
        }
    }

    fn visit_path_in_expression(&mut self, path: &Path) {
        self.ctx.resolve_path(path, Namespace::Value);
        visit::walk_path(self, path);
    }

    fn visit_struct_expr_struct(&mut self, expr: &StructExpr) {
        self.resolve_struct_path(&expr.path);
    }

    fn visit_struct_expr_struct_fields(
        &mut self,
        expr: &StructExpr,
        fields: &[ExprField],
        base: Option<&Expr>,
    ) {
        let owner = self.resolve_struct_path(&expr.path);
        for field in fields {
            self.resolve_field(owner, field.id, field.ident);
            self.visit_expr(&field.expr);
            if field.is_shorthand {
                if let Some(decl) = self.ctx.resolution(field.expr.id, Namespace::Value) {
                    self.ctx.record_resolution(field.id, Namespace::Value, decl);
                }
            }
        }
        if let Some(base) = base {
            self.visit_expr(base);
        }
    }

    fn visit_struct_expr_struct_base(&mut self, expr: &StructExpr, base: &Expr) {
        self.resolve_struct_path(&expr.path);
        self.visit_expr(base);
    }

    fn visit_loop_label(&mut self, label: &LoopLabel) {
        self.new_label(label.ident, label.id);
    }

    fn visit_break(&mut self, expr: &Expr, label: Option<&Lifetime>, value: Option<&Expr>) {
        match label {
            Some(label) => self.resolve_label(label, false),
            None => self.check_in_loop(expr, "break"),
        }
        if let Some(value) = value {
            self.visit_expr(value);
        }
    }

    fn visit_continue(&mut self, expr: &Expr, label: Option<&Lifetime>) {
        match label {
            Some(label) => self.resolve_label(label, true),
            None => self.check_in_loop(expr, "continue"),
        }
    }

    fn visit_closure(&mut self, closure: &Closure) {
        self.with_rib(RibKind::Closure, |this| {
            for param in &closure.params {
                if let Some(ty) = &param.ty {
                    this.visit_ty(ty);
                }
                LatePattern::go(this, &param.pat, PatternSource::Closure);
            }
            if let Some(ret) = &closure.ret_ty {
                this.visit_ty(ret);
            }
            this.visit_expr(&closure.body);
        });
    }

    fn visit_arm(&mut self, arm: &Arm) {
        self.with_rib(RibKind::Pattern, |this| {
            LatePattern::go(this, &arm.pat, PatternSource::Match);
            if let Some(guard) = &arm.guard {
                this.visit_expr(guard);
            }
            this.visit_expr(&arm.body);
        });
    }

    fn visit_macro_invocation(&mut self, mac: &MacCall) {
        self.ctx.resolve_path(&mac.path, Namespace::Macro);
        visit::walk_path(self, &mac.path);
        for arg in &mac.args {
            self.visit_expr(arg);
        }
    }

    /// Patterns outside the contexts handled above bind like `let`
    fn visit_pat(&mut self, pat: &Pat) {
        LatePattern::go(self, pat, PatternSource::Let);
    }

    fn visit_type_path(&mut self, path: &Path) {
        self.ctx.resolve_path(path, Namespace::Type);
        visit::walk_path(self, path);
    }

    fn visit_lang_item_path(&mut self, path: &LangItemPath) {
        if let Some(decl) = self.ctx.builtins().lang_item(path.item) {
            self.ctx.record_resolution(path.id, Namespace::Type, decl);
        }
    }

    fn visit_lifetime(&mut self, lifetime: &Lifetime) {
        let name = lifetime.ident.name;
        match self.ctx.lookup_binding(name, Namespace::Lifetime) {
            Lookup::Found(binding) => {
                self.ctx
                    .record_resolution(lifetime.id, Namespace::Lifetime, binding.id);
            }
            Lookup::Outer(binding) => self.ctx.report_error(
                lifetime.ident.span,
                ResolutionErrorKind::OuterItemBinding {
                    name: self.ctx.name(name),
                    binding: binding.kind,
                    declared: binding.span,
                },
            ),
            Lookup::NotFound => self.ctx.report_error(
                lifetime.ident.span,
                ResolutionErrorKind::UndeclaredLifetime {
                    name: self.ctx.name(name),
                },
            ),
        }
    }

    fn visit_generic_arg(&mut self, arg: &GenericArg) {
        let GenericArg::Either(path) = arg else {
            visit::walk_generic_arg(self, arg);
            return;
        };
        // `N` in `foo::<N>` may be a type or a const; a type wins
        if path.is_single_ident() {
            let segment = &path.segments[0];
            let name = segment.ident.name;
            if self.ctx.lookup_binding(name, Namespace::Type) == Lookup::NotFound {
                if let Lookup::Found(binding) = self.ctx.lookup_binding(name, Namespace::Value) {
                    self.ctx
                        .record_resolution(segment.id, Namespace::Value, binding.id);
                    self.ctx
                        .record_resolution(path.id, Namespace::Value, binding.id);
                    return;
                }
            }
        }
        self.visit_type_path(path);
    }
}
