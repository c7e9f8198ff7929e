//! Default traversal of the AST
//!
//! Every `visit_*` method defaults to the matching `walk_*` function, which
//! visits all children of the node. Implementors override the node kinds they
//! handle and call the `walk_*` function when they want the default behavior
//! for the children.

use crate::*;

/// AST visitor with default traversal for every node kind
pub trait Visitor: Sized {
    /// Visit the crate root
    fn visit_crate(&mut self, krate: &Crate) {
        walk_crate(self, krate);
    }

    // Items

    /// Visit any item; dispatches on the item kind
    fn visit_item(&mut self, item: &Item) {
        walk_item(self, item);
    }

    /// Visit a function or method
    fn visit_function(&mut self, _item: &Item, func: &Function) {
        walk_function(self, func);
    }

    /// Visit a struct with named fields
    fn visit_struct_struct(&mut self, _item: &Item, def: &StructDef) {
        walk_struct(self, def);
    }

    /// Visit a tuple or unit struct
    fn visit_tuple_struct(&mut self, _item: &Item, def: &StructDef) {
        walk_struct(self, def);
    }

    /// Visit an enum
    fn visit_enum(&mut self, _item: &Item, def: &EnumDef) {
        walk_enum(self, def);
    }

    /// Visit a trait definition
    fn visit_trait(&mut self, _item: &Item, def: &TraitDef) {
        walk_trait(self, def);
    }

    /// Visit an inherent impl block
    fn visit_inherent_impl(&mut self, _item: &Item, imp: &InherentImpl) {
        walk_inherent_impl(self, imp);
    }

    /// Visit a trait impl block
    fn visit_trait_impl(&mut self, _item: &Item, imp: &TraitImpl) {
        walk_trait_impl(self, imp);
    }

    /// Visit a `const` or `static` item
    fn visit_const(&mut self, _item: &Item, def: &ConstDef) {
        walk_const(self, def);
    }

    /// Visit a type alias or associated type
    fn visit_type_alias(&mut self, _item: &Item, def: &TypeAlias) {
        walk_type_alias(self, def);
    }

    /// Visit an inline module
    fn visit_module(&mut self, _item: &Item, module: &Module) {
        walk_module(self, module);
    }

    /// Visit a `macro_rules!` definition
    fn visit_macro_rules(&mut self, _item: &Item, _def: &MacroRulesDef) {}

    /// Visit a struct or variant field declaration
    fn visit_field_def(&mut self, field: &FieldDef) {
        self.visit_ty(&field.ty);
    }

    /// Visit an enum variant
    fn visit_variant(&mut self, variant: &Variant) {
        walk_variant(self, variant);
    }

    // Generics

    /// Visit a generic parameter list and its where clause
    fn visit_generics(&mut self, generics: &Generics) {
        walk_generics(self, generics);
    }

    /// Visit a generic parameter; dispatches on the parameter kind
    fn visit_generic_param(&mut self, param: &GenericParam) {
        walk_generic_param(self, param);
    }

    /// Visit a lifetime parameter
    fn visit_lifetime_param(&mut self, param: &GenericParam) {
        walk_generic_param_children(self, param);
    }

    /// Visit a type parameter
    fn visit_type_param(&mut self, param: &GenericParam) {
        walk_generic_param_children(self, param);
    }

    /// Visit a const parameter
    fn visit_const_param(&mut self, param: &GenericParam) {
        walk_generic_param_children(self, param);
    }

    /// Visit a where-clause predicate
    fn visit_where_predicate(&mut self, predicate: &WherePredicate) {
        self.visit_ty(&predicate.bounded_ty);
        for bound in &predicate.bounds {
            self.visit_generic_bound(bound);
        }
    }

    /// Visit a trait or lifetime bound
    fn visit_generic_bound(&mut self, bound: &GenericBound) {
        walk_generic_bound(self, bound);
    }

    // Function signatures

    /// Visit a method receiver
    fn visit_self_param(&mut self, param: &SelfParam) {
        walk_self_param(self, param);
    }

    /// Visit an ordinary parameter
    fn visit_param(&mut self, param: &Param) {
        self.visit_pat(&param.pat);
        self.visit_ty(&param.ty);
    }

    // Statements

    /// Visit a block
    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block);
    }

    /// Visit a statement; dispatches on the statement kind
    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    /// Visit a `let` statement
    fn visit_let_stmt(&mut self, local: &LetStmt) {
        walk_let_stmt(self, local);
    }

    // Expressions

    /// Visit any expression; dispatches on the expression kind
    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    /// Visit a lone identifier in expression position
    fn visit_identifier_expr(&mut self, _expr: &Expr, _ident: &Ident) {}

    /// Visit a path in expression position
    fn visit_path_in_expression(&mut self, path: &Path) {
        walk_path(self, path);
    }

    /// Visit `S {}`
    fn visit_struct_expr_struct(&mut self, expr: &StructExpr) {
        self.visit_type_path(&expr.path);
    }

    /// Visit `S { a: e, b, ..base }`
    fn visit_struct_expr_struct_fields(
        &mut self,
        expr: &StructExpr,
        fields: &[ExprField],
        base: Option<&Expr>,
    ) {
        walk_struct_expr_struct_fields(self, expr, fields, base);
    }

    /// Visit `S { ..base }`
    fn visit_struct_expr_struct_base(&mut self, expr: &StructExpr, base: &Expr) {
        self.visit_type_path(&expr.path);
        self.visit_expr(base);
    }

    /// Visit a loop or block label declaration
    fn visit_loop_label(&mut self, _label: &LoopLabel) {}

    /// Visit `break 'label value`
    fn visit_break(&mut self, _expr: &Expr, label: Option<&Lifetime>, value: Option<&Expr>) {
        if let Some(label) = label {
            self.visit_lifetime(label);
        }
        if let Some(value) = value {
            self.visit_expr(value);
        }
    }

    /// Visit `continue 'label`
    fn visit_continue(&mut self, _expr: &Expr, label: Option<&Lifetime>) {
        if let Some(label) = label {
            self.visit_lifetime(label);
        }
    }

    /// Visit a closure
    fn visit_closure(&mut self, closure: &Closure) {
        walk_closure(self, closure);
    }

    /// Visit a `match` arm
    fn visit_arm(&mut self, arm: &Arm) {
        walk_arm(self, arm);
    }

    /// Visit a macro invocation
    fn visit_macro_invocation(&mut self, mac: &MacCall) {
        walk_path(self, &mac.path);
        for arg in &mac.args {
            self.visit_expr(arg);
        }
    }

    // Patterns

    /// Visit any pattern; dispatches on the pattern kind
    fn visit_pat(&mut self, pat: &Pat) {
        walk_pat(self, pat);
    }

    /// Visit an identifier pattern
    fn visit_identifier_pattern(&mut self, _pat: &Pat, ident: &IdentPat) {
        walk_identifier_pattern(self, ident);
    }

    /// Visit a range pattern
    fn visit_range_pattern(&mut self, _pat: &Pat, range: &RangePat) {
        walk_range_pattern(self, range);
    }

    /// Visit a reference pattern
    fn visit_reference_pattern(&mut self, _pat: &Pat, inner: &Pat) {
        self.visit_pat(inner);
    }

    /// Visit a struct pattern
    fn visit_struct_pattern(&mut self, _pat: &Pat, strukt: &StructPat) {
        walk_struct_pattern(self, strukt);
    }

    /// Visit a tuple-struct pattern
    fn visit_tuple_struct_pattern(&mut self, _pat: &Pat, path: &Path, pats: &[Pat]) {
        self.visit_path_in_expression(path);
        for sub in pats {
            self.visit_pat(sub);
        }
    }

    /// Visit a tuple pattern
    fn visit_tuple_pattern(&mut self, _pat: &Pat, pats: &[Pat]) {
        for sub in pats {
            self.visit_pat(sub);
        }
    }

    /// Visit a parenthesized pattern
    fn visit_grouped_pattern(&mut self, _pat: &Pat, inner: &Pat) {
        self.visit_pat(inner);
    }

    /// Visit a slice pattern
    fn visit_slice_pattern(&mut self, _pat: &Pat, pats: &[Pat]) {
        for sub in pats {
            self.visit_pat(sub);
        }
    }

    /// Visit an or-pattern
    fn visit_alt_pattern(&mut self, _pat: &Pat, alts: &[Pat]) {
        for alt in alts {
            self.visit_pat(alt);
        }
    }

    /// Visit a path pattern
    fn visit_path_pattern(&mut self, _pat: &Pat, path: &Path) {
        self.visit_path_in_expression(path);
    }

    // Types and paths

    /// Visit any type; dispatches on the type kind
    fn visit_ty(&mut self, ty: &Ty) {
        walk_ty(self, ty);
    }

    /// Visit a path in type position (also trait references)
    fn visit_type_path(&mut self, path: &Path) {
        walk_path(self, path);
    }

    /// Visit a lang-item reference
    fn visit_lang_item_path(&mut self, _path: &LangItemPath) {}

    /// Visit a lifetime use
    fn visit_lifetime(&mut self, _lifetime: &Lifetime) {}

    /// Visit a generic argument list
    fn visit_generic_args(&mut self, args: &GenericArgs) {
        for arg in &args.args {
            self.visit_generic_arg(arg);
        }
    }

    /// Visit a single generic argument
    fn visit_generic_arg(&mut self, arg: &GenericArg) {
        walk_generic_arg(self, arg);
    }
}

/// Visit every top-level item
pub fn walk_crate<V: Visitor>(visitor: &mut V, krate: &Crate) {
    for item in &krate.items {
        visitor.visit_item(item);
    }
}

/// Dispatch an item to its kind-specific visit method
pub fn walk_item<V: Visitor>(visitor: &mut V, item: &Item) {
    match &item.kind {
        ItemKind::Fn(func) => visitor.visit_function(item, func),
        ItemKind::Struct(def) => match def.data {
            VariantData::Struct(_) => visitor.visit_struct_struct(item, def),
            VariantData::Tuple(_) | VariantData::Unit => visitor.visit_tuple_struct(item, def),
        },
        ItemKind::Enum(def) => visitor.visit_enum(item, def),
        ItemKind::Trait(def) => visitor.visit_trait(item, def),
        ItemKind::InherentImpl(imp) => visitor.visit_inherent_impl(item, imp),
        ItemKind::TraitImpl(imp) => visitor.visit_trait_impl(item, imp),
        ItemKind::Const(def) | ItemKind::Static(def) => visitor.visit_const(item, def),
        ItemKind::TypeAlias(def) => visitor.visit_type_alias(item, def),
        ItemKind::Module(module) => visitor.visit_module(item, module),
        ItemKind::MacroRules(def) => visitor.visit_macro_rules(item, def),
    }
}

/// Generics, receiver, parameters, return type, then body
pub fn walk_function<V: Visitor>(visitor: &mut V, func: &Function) {
    visitor.visit_generics(&func.generics);
    walk_fn_signature(visitor, func);
    if let Some(body) = &func.body {
        visitor.visit_block(body);
    }
}

/// Receiver, parameters and return type of a function
pub fn walk_fn_signature<V: Visitor>(visitor: &mut V, func: &Function) {
    if let Some(self_param) = &func.self_param {
        visitor.visit_self_param(self_param);
    }
    for param in &func.params {
        visitor.visit_param(param);
    }
    if let Some(ret) = &func.ret_ty {
        visitor.visit_ty(ret);
    }
}

/// Generics, then field types
pub fn walk_struct<V: Visitor>(visitor: &mut V, def: &StructDef) {
    visitor.visit_generics(&def.generics);
    for field in def.data.fields() {
        visitor.visit_field_def(field);
    }
}

/// Generics, then variants
pub fn walk_enum<V: Visitor>(visitor: &mut V, def: &EnumDef) {
    visitor.visit_generics(&def.generics);
    for variant in &def.variants {
        visitor.visit_variant(variant);
    }
}

/// Field types, then the discriminant
pub fn walk_variant<V: Visitor>(visitor: &mut V, variant: &Variant) {
    for field in variant.data.fields() {
        visitor.visit_field_def(field);
    }
    if let Some(discriminant) = &variant.discriminant {
        visitor.visit_expr(discriminant);
    }
}

/// Generics, supertraits, then associated items
pub fn walk_trait<V: Visitor>(visitor: &mut V, def: &TraitDef) {
    visitor.visit_generics(&def.generics);
    for bound in &def.supertraits {
        visitor.visit_generic_bound(bound);
    }
    for item in &def.items {
        visitor.visit_item(item);
    }
}

/// Generics, self type, then associated items
pub fn walk_inherent_impl<V: Visitor>(visitor: &mut V, imp: &InherentImpl) {
    visitor.visit_generics(&imp.generics);
    visitor.visit_ty(&imp.self_ty);
    for item in &imp.items {
        visitor.visit_item(item);
    }
}

/// Generics, trait reference, self type, then associated items
pub fn walk_trait_impl<V: Visitor>(visitor: &mut V, imp: &TraitImpl) {
    visitor.visit_generics(&imp.generics);
    visitor.visit_type_path(&imp.trait_ref);
    visitor.visit_ty(&imp.self_ty);
    for item in &imp.items {
        visitor.visit_item(item);
    }
}

/// Type, then value
pub fn walk_const<V: Visitor>(visitor: &mut V, def: &ConstDef) {
    visitor.visit_ty(&def.ty);
    if let Some(value) = &def.value {
        visitor.visit_expr(value);
    }
}

/// Generics, bounds, then the aliased type
pub fn walk_type_alias<V: Visitor>(visitor: &mut V, def: &TypeAlias) {
    visitor.visit_generics(&def.generics);
    for bound in &def.bounds {
        visitor.visit_generic_bound(bound);
    }
    if let Some(ty) = &def.ty {
        visitor.visit_ty(ty);
    }
}

/// Every item of the module
pub fn walk_module<V: Visitor>(visitor: &mut V, module: &Module) {
    for item in &module.items {
        visitor.visit_item(item);
    }
}

/// Parameters, then where-clause predicates
pub fn walk_generics<V: Visitor>(visitor: &mut V, generics: &Generics) {
    for param in &generics.params {
        visitor.visit_generic_param(param);
    }
    for predicate in &generics.where_clause {
        visitor.visit_where_predicate(predicate);
    }
}

/// Dispatch a generic parameter to its kind-specific visit method
pub fn walk_generic_param<V: Visitor>(visitor: &mut V, param: &GenericParam) {
    match param.kind {
        GenericParamKind::Lifetime { .. } => visitor.visit_lifetime_param(param),
        GenericParamKind::Type { .. } => visitor.visit_type_param(param),
        GenericParamKind::Const { .. } => visitor.visit_const_param(param),
    }
}

/// Bounds, types and defaults of a generic parameter
pub fn walk_generic_param_children<V: Visitor>(visitor: &mut V, param: &GenericParam) {
    match &param.kind {
        GenericParamKind::Lifetime { bounds } => {
            for bound in bounds {
                visitor.visit_lifetime(bound);
            }
        }
        GenericParamKind::Type { bounds, default } => {
            for bound in bounds {
                visitor.visit_generic_bound(bound);
            }
            if let Some(default) = default {
                visitor.visit_ty(default);
            }
        }
        GenericParamKind::Const { ty, default } => {
            visitor.visit_ty(ty);
            if let Some(default) = default {
                visitor.visit_expr(default);
            }
        }
    }
}

/// Visit the path, lang item or lifetime of a bound
pub fn walk_generic_bound<V: Visitor>(visitor: &mut V, bound: &GenericBound) {
    match bound {
        GenericBound::Trait(path) => visitor.visit_type_path(path),
        GenericBound::LangItem(path) => visitor.visit_lang_item_path(path),
        GenericBound::Outlives(lifetime) => visitor.visit_lifetime(lifetime),
    }
}

/// Lifetime or explicit type of a receiver
pub fn walk_self_param<V: Visitor>(visitor: &mut V, param: &SelfParam) {
    match &param.kind {
        SelfKind::Value { .. } => {}
        SelfKind::Ref { lifetime, .. } => {
            if let Some(lifetime) = lifetime {
                visitor.visit_lifetime(lifetime);
            }
        }
        SelfKind::Explicit(ty) => visitor.visit_ty(ty),
    }
}

/// Statements, then the tail expression
pub fn walk_block<V: Visitor>(visitor: &mut V, block: &Block) {
    for stmt in &block.stmts {
        visitor.visit_stmt(stmt);
    }
    if let Some(tail) = &block.tail {
        visitor.visit_expr(tail);
    }
}

/// Dispatch a statement to its kind-specific visit method
pub fn walk_stmt<V: Visitor>(visitor: &mut V, stmt: &Stmt) {
    match &stmt.kind {
        StmtKind::Let(local) => visitor.visit_let_stmt(local),
        StmtKind::Item(item) => visitor.visit_item(item),
        StmtKind::Semi(expr) | StmtKind::Expr(expr) => visitor.visit_expr(expr),
        StmtKind::Empty => {}
    }
}

/// Type, initializer, else block, then the pattern
pub fn walk_let_stmt<V: Visitor>(visitor: &mut V, local: &LetStmt) {
    if let Some(ty) = &local.ty {
        visitor.visit_ty(ty);
    }
    if let Some(init) = &local.init {
        visitor.visit_expr(init);
    }
    if let Some(else_block) = &local.else_block {
        visitor.visit_block(else_block);
    }
    visitor.visit_pat(&local.pat);
}

/// Dispatch an expression to its kind-specific visit method or walk its children
pub fn walk_expr<V: Visitor>(visitor: &mut V, expr: &Expr) {
    match &expr.kind {
        ExprKind::Literal(_) => {}
        ExprKind::Identifier(ident) => visitor.visit_identifier_expr(expr, ident),
        ExprKind::Path(path) => visitor.visit_path_in_expression(path),
        ExprKind::Unary(_, operand) => visitor.visit_expr(operand),
        ExprKind::Binary(_, lhs, rhs) | ExprKind::Assign(lhs, rhs) | ExprKind::Index(lhs, rhs) => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        ExprKind::Call(callee, args) => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::MethodCall {
            receiver,
            method,
            args,
        } => {
            visitor.visit_expr(receiver);
            if let Some(generic_args) = &method.args {
                visitor.visit_generic_args(generic_args);
            }
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Field(base, _) => visitor.visit_expr(base),
        ExprKind::Tuple(elems) | ExprKind::Array(elems) => {
            for elem in elems {
                visitor.visit_expr(elem);
            }
        }
        ExprKind::AddrOf { expr: inner, .. } => visitor.visit_expr(inner),
        ExprKind::Cast(inner, ty) => {
            visitor.visit_expr(inner);
            visitor.visit_ty(ty);
        }
        ExprKind::Range { start, end, .. } => {
            if let Some(start) = start {
                visitor.visit_expr(start);
            }
            if let Some(end) = end {
                visitor.visit_expr(end);
            }
        }
        ExprKind::Block(block, label) => {
            if let Some(label) = label {
                visitor.visit_loop_label(label);
            }
            visitor.visit_block(block);
        }
        ExprKind::If { cond, then, else_ } => {
            visitor.visit_expr(cond);
            visitor.visit_block(then);
            if let Some(else_) = else_ {
                visitor.visit_expr(else_);
            }
        }
        ExprKind::IfLet {
            pat,
            scrutinee,
            then,
            else_,
        } => {
            visitor.visit_expr(scrutinee);
            visitor.visit_pat(pat);
            visitor.visit_block(then);
            if let Some(else_) = else_ {
                visitor.visit_expr(else_);
            }
        }
        ExprKind::Match(scrutinee, arms) => {
            visitor.visit_expr(scrutinee);
            for arm in arms {
                visitor.visit_arm(arm);
            }
        }
        ExprKind::Loop(body, label) => {
            if let Some(label) = label {
                visitor.visit_loop_label(label);
            }
            visitor.visit_block(body);
        }
        ExprKind::While { cond, body, label } => {
            if let Some(label) = label {
                visitor.visit_loop_label(label);
            }
            visitor.visit_expr(cond);
            visitor.visit_block(body);
        }
        ExprKind::WhileLet {
            pat,
            scrutinee,
            body,
            label,
        } => {
            if let Some(label) = label {
                visitor.visit_loop_label(label);
            }
            visitor.visit_expr(scrutinee);
            visitor.visit_pat(pat);
            visitor.visit_block(body);
        }
        ExprKind::ForLoop {
            pat,
            iter,
            body,
            label,
        } => {
            visitor.visit_expr(iter);
            if let Some(label) = label {
                visitor.visit_loop_label(label);
            }
            visitor.visit_pat(pat);
            visitor.visit_block(body);
        }
        ExprKind::Break(label, value) => {
            visitor.visit_break(expr, label.as_ref(), value.as_deref());
        }
        ExprKind::Continue(label) => visitor.visit_continue(expr, label.as_ref()),
        ExprKind::Return(value) => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        ExprKind::Closure(closure) => visitor.visit_closure(closure),
        ExprKind::Struct(strukt) => match &strukt.body {
            StructExprBody::Empty => visitor.visit_struct_expr_struct(strukt),
            StructExprBody::Fields { fields, base } => {
                visitor.visit_struct_expr_struct_fields(strukt, fields, base.as_deref());
            }
            StructExprBody::Base(base) => visitor.visit_struct_expr_struct_base(strukt, base),
        },
        ExprKind::MacroInvocation(mac) => visitor.visit_macro_invocation(mac),
    }
}

/// Struct path, field values, then the base
pub fn walk_struct_expr_struct_fields<V: Visitor>(
    visitor: &mut V,
    expr: &StructExpr,
    fields: &[ExprField],
    base: Option<&Expr>,
) {
    visitor.visit_type_path(&expr.path);
    for field in fields {
        visitor.visit_expr(&field.expr);
    }
    if let Some(base) = base {
        visitor.visit_expr(base);
    }
}

/// Parameters, return type, then body
pub fn walk_closure<V: Visitor>(visitor: &mut V, closure: &Closure) {
    for param in &closure.params {
        visitor.visit_pat(&param.pat);
        if let Some(ty) = &param.ty {
            visitor.visit_ty(ty);
        }
    }
    if let Some(ret) = &closure.ret_ty {
        visitor.visit_ty(ret);
    }
    visitor.visit_expr(&closure.body);
}

/// Pattern, guard, then body
pub fn walk_arm<V: Visitor>(visitor: &mut V, arm: &Arm) {
    visitor.visit_pat(&arm.pat);
    if let Some(guard) = &arm.guard {
        visitor.visit_expr(guard);
    }
    visitor.visit_expr(&arm.body);
}

/// Dispatch a pattern to its kind-specific visit method
pub fn walk_pat<V: Visitor>(visitor: &mut V, pat: &Pat) {
    match &pat.kind {
        PatKind::Wildcard | PatKind::Rest | PatKind::Literal(_) => {}
        PatKind::Identifier(ident) => visitor.visit_identifier_pattern(pat, ident),
        PatKind::Range(range) => visitor.visit_range_pattern(pat, range),
        PatKind::Reference { pat: inner, .. } => visitor.visit_reference_pattern(pat, inner),
        PatKind::Struct(strukt) => visitor.visit_struct_pattern(pat, strukt),
        PatKind::TupleStruct(path, pats) => visitor.visit_tuple_struct_pattern(pat, path, pats),
        PatKind::Tuple(pats) => visitor.visit_tuple_pattern(pat, pats),
        PatKind::Grouped(inner) => visitor.visit_grouped_pattern(pat, inner),
        PatKind::Slice(pats) => visitor.visit_slice_pattern(pat, pats),
        PatKind::Alt(alts) => visitor.visit_alt_pattern(pat, alts),
        PatKind::Path(path) => visitor.visit_path_pattern(pat, path),
    }
}

/// The sub-pattern after `@`
pub fn walk_identifier_pattern<V: Visitor>(visitor: &mut V, ident: &IdentPat) {
    if let Some(sub) = &ident.sub {
        visitor.visit_pat(sub);
    }
}

/// Path bounds of a range pattern
pub fn walk_range_pattern<V: Visitor>(visitor: &mut V, range: &RangePat) {
    for bound in [&range.start, &range.end].into_iter().flatten() {
        if let RangeBound::Path(path) = bound {
            visitor.visit_path_in_expression(path);
        }
    }
}

/// Struct path, then field patterns
pub fn walk_struct_pattern<V: Visitor>(visitor: &mut V, strukt: &StructPat) {
    visitor.visit_type_path(&strukt.path);
    for field in &strukt.fields {
        visitor.visit_pat(&field.pat);
    }
}

/// Dispatch a type to its kind-specific visit method or walk its children
pub fn walk_ty<V: Visitor>(visitor: &mut V, ty: &Ty) {
    match &ty.kind {
        TyKind::Path(path) => visitor.visit_type_path(path),
        TyKind::LangItem(path) => visitor.visit_lang_item_path(path),
        TyKind::Ref {
            lifetime, inner, ..
        } => {
            if let Some(lifetime) = lifetime {
                visitor.visit_lifetime(lifetime);
            }
            visitor.visit_ty(inner);
        }
        TyKind::Ptr { inner, .. } | TyKind::Slice(inner) => visitor.visit_ty(inner),
        TyKind::Tuple(elems) => {
            for elem in elems {
                visitor.visit_ty(elem);
            }
        }
        TyKind::Array(elem, len) => {
            visitor.visit_ty(elem);
            visitor.visit_expr(len);
        }
        TyKind::FnPtr { params, ret } => {
            for param in params {
                visitor.visit_ty(param);
            }
            if let Some(ret) = ret {
                visitor.visit_ty(ret);
            }
        }
        TyKind::ImplTrait(bounds) | TyKind::TraitObject(bounds) => {
            for bound in bounds {
                visitor.visit_generic_bound(bound);
            }
        }
        TyKind::Never | TyKind::Infer => {}
    }
}

/// Generic arguments of every segment
pub fn walk_path<V: Visitor>(visitor: &mut V, path: &Path) {
    for segment in &path.segments {
        if let Some(args) = &segment.args {
            visitor.visit_generic_args(args);
        }
    }
}

/// Visit the lifetime, type, expression or path inside a generic argument
pub fn walk_generic_arg<V: Visitor>(visitor: &mut V, arg: &GenericArg) {
    match arg {
        GenericArg::Lifetime(lifetime) => visitor.visit_lifetime(lifetime),
        GenericArg::Type(ty) => visitor.visit_ty(ty),
        GenericArg::Const(expr) => visitor.visit_expr(expr),
        GenericArg::Either(path) => walk_path(visitor, path),
        GenericArg::Constraint(constraint) => visitor.visit_ty(&constraint.ty),
    }
}
