//! Collection of module-level items ahead of the late pass

use crate::{DefKind, NameResolutionContext, Namespace, ScopeKind};
use cv_ast::{Crate, Item, ItemKind, NodeId, VariantData};
use indexmap::IndexMap;
use std::mem;

/// Namespaces an item's name is declared in
pub fn item_namespaces(item: &Item) -> &'static [Namespace] {
    match &item.kind {
        ItemKind::Fn(_) | ItemKind::Const(_) | ItemKind::Static(_) => &[Namespace::Value],
        ItemKind::Struct(def) if def.data.has_value_ctor() => &[Namespace::Type, Namespace::Value],
        ItemKind::Struct(_)
        | ItemKind::Enum(_)
        | ItemKind::Trait(_)
        | ItemKind::TypeAlias(_)
        | ItemKind::Module(_) => &[Namespace::Type],
        ItemKind::MacroRules(_) => &[Namespace::Macro],
        ItemKind::InherentImpl(_) | ItemKind::TraitImpl(_) => &[],
    }
}

/// Registers items, item scopes and field tables in the context
pub struct TopLevel<'r, 'a> {
    ctx: &'r mut NameResolutionContext<'a>,
    module: NodeId,
}

impl<'r, 'a> TopLevel<'r, 'a> {
    /// Collector that declares into the crate root
    pub fn new(ctx: &'r mut NameResolutionContext<'a>) -> Self {
        Self::in_module(ctx, NodeId::CRATE)
    }

    /// Collector whose enclosing module is `module`
    pub fn in_module(ctx: &'r mut NameResolutionContext<'a>, module: NodeId) -> Self {
        Self { ctx, module }
    }

    /// Declare every module-level item of the crate
    #[tracing::instrument(level = "debug", skip_all, fields(items = krate.items.len()))]
    pub fn go(mut self, krate: &Crate) {
        for item in &krate.items {
            self.collect(item);
        }
    }

    /// Declare `item` in the current module and register what it contains
    fn collect(&mut self, item: &Item) {
        if let Some(ident) = item.ident() {
            for &ns in item_namespaces(item) {
                self.ctx.define_item(self.module, ident, ns, item.id);
            }
        }
        self.register_details(item);
    }

    /// Register the def kind, fields, variants and nested module of `item`
    /// without declaring its own name
    pub fn register_details(&mut self, item: &Item) {
        let Some(ident) = item.ident() else {
            return;
        };
        match &item.kind {
            ItemKind::Fn(_) => self.ctx.set_def(item.id, DefKind::Fn, ident),
            ItemKind::Struct(def) => {
                self.ctx.set_def(item.id, DefKind::Struct, ident);
                self.register_fields(item.id, &def.data);
            }
            ItemKind::Enum(def) => {
                self.ctx.set_def(item.id, DefKind::Enum, ident);
                self.ctx
                    .add_scope(item.id, Some(self.module), ScopeKind::Enum);
                for variant in &def.variants {
                    self.ctx.set_def(variant.id, DefKind::Variant, variant.ident);
                    self.ctx
                        .define_item(item.id, variant.ident, Namespace::Type, variant.id);
                    if variant.data.has_value_ctor() {
                        self.ctx
                            .define_item(item.id, variant.ident, Namespace::Value, variant.id);
                    }
                    self.register_fields(variant.id, &variant.data);
                }
            }
            ItemKind::Trait(_) => self.ctx.set_def(item.id, DefKind::Trait, ident),
            ItemKind::Const(_) => self.ctx.set_def(item.id, DefKind::Const, ident),
            ItemKind::Static(_) => self.ctx.set_def(item.id, DefKind::Static, ident),
            ItemKind::TypeAlias(_) => self.ctx.set_def(item.id, DefKind::TypeAlias, ident),
            ItemKind::MacroRules(_) => self.ctx.set_def(item.id, DefKind::Macro, ident),
            ItemKind::Module(module) => {
                self.ctx.set_def(item.id, DefKind::Module, ident);
                self.ctx
                    .add_scope(item.id, Some(self.module), ScopeKind::Module);
                tracing::debug!(module = item.id.0, parent = self.module.0, "collect module");
                let parent = mem::replace(&mut self.module, item.id);
                for child in &module.items {
                    self.collect(child);
                }
                self.module = parent;
            }
            ItemKind::InherentImpl(_) | ItemKind::TraitImpl(_) => {}
        }
    }

    /// Named fields by name, positional fields by their index
    fn register_fields(&mut self, owner: NodeId, data: &VariantData) {
        let interner = self.ctx.interner();
        let fields: IndexMap<_, _> = data
            .fields()
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let name = match field.ident {
                    Some(ident) => ident.name,
                    None => interner.intern(&index.to_string()),
                };
                (name, field.id)
            })
            .collect();
        self.ctx.set_fields(owner, fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ResolutionErrorKind, ResolveOptions, setup_builtin_types};
    use cv_ast::AstBuilder;
    use cv_intern::Interner;

    #[test]
    fn test_items_land_in_their_namespaces() {
        let interner = Interner::new();
        let b = AstBuilder::new(&interner);
        let unit = b.struct_item("Unit", b.generics(vec![]), VariantData::Unit);
        let named = b.struct_item(
            "Named",
            b.generics(vec![]),
            VariantData::Struct(vec![b.field_def("x", b.ty_path(&["i32"]))]),
        );
        let macro_item = b.macro_rules("my_macro");
        let (unit_id, named_id, macro_id) = (unit.id, named.id, macro_item.id);
        let krate = b.finish(vec![unit, named, macro_item]);

        let builtins = setup_builtin_types(&interner, krate.next_node_id);
        let mut ctx = NameResolutionContext::new(&interner, ResolveOptions::default(), builtins);
        TopLevel::new(&mut ctx).go(&krate);

        let unit_sym = interner.intern("Unit");
        let named_sym = interner.intern("Named");
        let lookup = |sym, ns| {
            ctx.lookup_in_scope(NodeId::CRATE, sym, ns)
                .map(|binding| binding.id)
        };
        assert_eq!(lookup(unit_sym, Namespace::Type), Some(unit_id));
        assert_eq!(lookup(unit_sym, Namespace::Value), Some(unit_id));
        assert_eq!(lookup(named_sym, Namespace::Type), Some(named_id));
        assert_eq!(lookup(named_sym, Namespace::Value), None);
        assert_eq!(
            lookup(interner.intern("my_macro"), Namespace::Macro),
            Some(macro_id)
        );
        assert_eq!(ctx.fields(named_id).map(IndexMap::len), Some(1));
    }

    #[test]
    fn test_enum_variants_and_nested_modules() {
        let interner = Interner::new();
        let b = AstBuilder::new(&interner);
        let circle = b.variant("Circle", VariantData::Tuple(vec![b.tuple_field(b.ty_path(&["f64"]))]));
        let square = b.variant(
            "Square",
            VariantData::Struct(vec![b.field_def("side", b.ty_path(&["f64"]))]),
        );
        let (circle_id, square_id) = (circle.id, square.id);
        let shape = b.enum_item("Shape", b.generics(vec![]), vec![circle, square]);
        let shape_id = shape.id;
        let geometry = b.module("geometry", vec![shape]);
        let geometry_id = geometry.id;
        let krate = b.finish(vec![geometry]);

        let builtins = setup_builtin_types(&interner, krate.next_node_id);
        let mut ctx = NameResolutionContext::new(&interner, ResolveOptions::default(), builtins);
        TopLevel::new(&mut ctx).go(&krate);

        assert_eq!(ctx.scope(geometry_id).and_then(|scope| scope.parent), Some(NodeId::CRATE));
        assert_eq!(ctx.scope(shape_id).and_then(|scope| scope.parent), Some(geometry_id));
        assert_eq!(
            ctx.lookup_in_scope(geometry_id, interner.intern("Shape"), Namespace::Type)
                .map(|binding| binding.id),
            Some(shape_id)
        );
        let circle_sym = interner.intern("Circle");
        let square_sym = interner.intern("Square");
        assert!(ctx.lookup_in_scope(shape_id, circle_sym, Namespace::Value).is_some());
        assert!(ctx.lookup_in_scope(shape_id, square_sym, Namespace::Value).is_none());
        assert!(ctx.lookup_in_scope(shape_id, square_sym, Namespace::Type).is_some());
        assert!(ctx.fields(circle_id).unwrap().contains_key(&interner.intern("0")));
        assert!(ctx.fields(square_id).unwrap().contains_key(&interner.intern("side")));
        assert_eq!(ctx.def(circle_id).map(|def| def.kind), Some(DefKind::Variant));
    }

    #[test]
    fn test_duplicate_definitions() {
        let interner = Interner::new();
        let b = AstBuilder::new(&interner);
        let first = b.func("f", b.generics(vec![]), vec![], None, Some(b.block(vec![], None)));
        let second = b.func("f", b.generics(vec![]), vec![], None, Some(b.block(vec![], None)));
        // a type named `f` does not clash with the function
        let ty = b.struct_item("f", b.generics(vec![]), VariantData::Struct(vec![]));
        let second_span = match &second.kind {
            ItemKind::Fn(func) => func.ident.span,
            _ => unreachable!(),
        };
        let krate = b.finish(vec![first, second, ty]);

        let builtins = setup_builtin_types(&interner, krate.next_node_id);
        let mut ctx = NameResolutionContext::new(&interner, ResolveOptions::default(), builtins);
        TopLevel::new(&mut ctx).go(&krate);

        assert_eq!(ctx.errors().len(), 1);
        assert_eq!(ctx.errors()[0].span, second_span);
        assert!(matches!(
            ctx.errors()[0].kind,
            ResolutionErrorKind::DuplicateDefinition { .. }
        ));
    }
}
