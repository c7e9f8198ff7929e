//! Programmatic construction of ASTs
//!
//! The builder hands out fresh [`NodeId`]s and distinct synthetic spans for
//! every node it creates. All methods take `&self`, so calls can be nested
//! freely: `b.let_stmt(b.ident_pat("x"), None, Some(b.int(1)))`.

use crate::*;
use cv_intern::{Interner, Symbol};
use cv_span::{FileId, FileSpan, Span};
use std::cell::Cell;

/// Builds AST nodes with unique ids and spans
#[derive(Debug)]
pub struct AstBuilder {
    ids: NodeIdGen,
    interner: Interner,
    file: FileId,
    offset: Cell<u32>,
}

impl AstBuilder {
    /// Builder for file 0 that interns into `interner`
    pub fn new(interner: &Interner) -> Self {
        Self::with_file(interner, FileId::new(0))
    }

    /// Builder whose spans point into `file`
    pub fn with_file(interner: &Interner, file: FileId) -> Self {
        let ids = NodeIdGen::new();
        // reserved for the crate root
        ids.next_id();
        Self {
            ids,
            interner: interner.clone(),
            file,
            offset: Cell::new(0),
        }
    }

    /// The interner identifiers are interned into
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Wrap up the top-level items into a crate
    pub fn finish(self, items: Vec<Item>) -> Crate {
        let end = self.offset.get();
        Crate {
            id: NodeId::CRATE,
            items,
            span: FileSpan::new(self.file, Span::new(0, end)),
            next_node_id: self.ids.peek(),
        }
    }

    /// A fresh node id
    pub fn id(&self) -> NodeId {
        self.ids.next_id()
    }

    /// A fresh span not overlapping any other span from this builder
    pub fn span(&self) -> FileSpan {
        let start = self.offset.get();
        self.offset.set(start + 2);
        FileSpan::new(self.file, Span::new(start, start + 1))
    }

    /// Intern a name
    pub fn sym(&self, name: &str) -> Symbol {
        self.interner.intern(name)
    }

    /// An identifier with a fresh span
    pub fn ident(&self, name: &str) -> Ident {
        Ident::new(self.sym(name), self.span())
    }

    // Paths

    /// A path segment without generic arguments
    pub fn segment(&self, name: &str) -> PathSegment {
        PathSegment {
            id: self.id(),
            ident: self.ident(name),
            args: None,
        }
    }

    /// A path segment with generic arguments
    pub fn segment_with_args(&self, name: &str, args: Vec<GenericArg>) -> PathSegment {
        PathSegment {
            id: self.id(),
            ident: self.ident(name),
            args: Some(self.generic_args(args)),
        }
    }

    /// A relative path made of plain segments
    pub fn path(&self, segments: &[&str]) -> Path {
        let segments = segments.iter().map(|name| self.segment(name)).collect();
        self.path_from_segments(false, segments)
    }

    /// A path starting with `::`
    pub fn global_path(&self, segments: &[&str]) -> Path {
        let segments = segments.iter().map(|name| self.segment(name)).collect();
        self.path_from_segments(true, segments)
    }

    /// A path from prepared segments
    pub fn path_from_segments(&self, global: bool, segments: Vec<PathSegment>) -> Path {
        Path {
            id: self.id(),
            global,
            segments,
            span: self.span(),
        }
    }

    /// A generic argument list
    pub fn generic_args(&self, args: Vec<GenericArg>) -> GenericArgs {
        GenericArgs {
            id: self.id(),
            args,
            span: self.span(),
        }
    }

    /// A bare identifier argument that may be a type or a const
    pub fn either_arg(&self, name: &str) -> GenericArg {
        GenericArg::Either(self.path(&[name]))
    }

    /// `Name = Ty` inside generic arguments
    pub fn assoc_constraint(&self, name: &str, ty: Ty) -> GenericArg {
        GenericArg::Constraint(AssocConstraint {
            id: self.id(),
            ident: self.ident(name),
            ty,
        })
    }

    /// A lifetime use; `name` excludes the quote
    pub fn lifetime(&self, name: &str) -> Lifetime {
        Lifetime {
            id: self.id(),
            ident: self.ident(name),
        }
    }

    /// A label declaration; `name` excludes the quote
    pub fn label(&self, name: &str) -> LoopLabel {
        LoopLabel {
            id: self.id(),
            ident: self.ident(name),
        }
    }

    // Types

    /// A type of the given kind
    pub fn ty(&self, kind: TyKind) -> Ty {
        Ty {
            id: self.id(),
            kind,
            span: self.span(),
        }
    }

    /// A path type
    pub fn ty_path(&self, segments: &[&str]) -> Ty {
        self.ty(TyKind::Path(self.path(segments)))
    }

    /// `&'lt inner`
    pub fn ty_ref(&self, lifetime: Option<Lifetime>, inner: Ty) -> Ty {
        self.ty(TyKind::Ref {
            lifetime,
            mutable: false,
            inner: Box::new(inner),
        })
    }

    /// A lang-item reference
    pub fn lang_item(&self, item: LangItem) -> LangItemPath {
        LangItemPath {
            id: self.id(),
            item,
            span: self.span(),
        }
    }

    /// A trait bound
    pub fn trait_bound(&self, segments: &[&str]) -> GenericBound {
        GenericBound::Trait(self.path(segments))
    }

    // Expressions

    /// An expression of the given kind
    pub fn expr(&self, kind: ExprKind) -> Expr {
        Expr {
            id: self.id(),
            kind,
            span: self.span(),
        }
    }

    /// Integer literal
    pub fn int(&self, value: u128) -> Expr {
        self.expr(ExprKind::Literal(Lit::Int(value)))
    }

    /// A lone identifier expression
    pub fn ident_expr(&self, name: &str) -> Expr {
        self.expr(ExprKind::Identifier(self.ident(name)))
    }

    /// A path expression
    pub fn path_expr(&self, segments: &[&str]) -> Expr {
        self.expr(ExprKind::Path(self.path(segments)))
    }

    /// `lhs op rhs`
    pub fn binary(&self, op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
        self.expr(ExprKind::Binary(op, Box::new(lhs), Box::new(rhs)))
    }

    /// `callee(args)`
    pub fn call(&self, callee: Expr, args: Vec<Expr>) -> Expr {
        self.expr(ExprKind::Call(Box::new(callee), args))
    }

    /// `receiver.method(args)`
    pub fn method_call(&self, receiver: Expr, method: &str, args: Vec<Expr>) -> Expr {
        self.expr(ExprKind::MethodCall {
            receiver: Box::new(receiver),
            method: self.segment(method),
            args,
        })
    }

    /// `base.field`
    pub fn field(&self, base: Expr, name: &str) -> Expr {
        self.expr(ExprKind::Field(Box::new(base), self.ident(name)))
    }

    /// A block in expression position
    pub fn block_expr(&self, block: Block) -> Expr {
        self.expr(ExprKind::Block(block, None))
    }

    /// `'label: { .. }`
    pub fn labeled_block(&self, label: &str, block: Block) -> Expr {
        self.expr(ExprKind::Block(block, Some(self.label(label))))
    }

    /// `'label: loop { .. }`
    pub fn loop_expr(&self, label: Option<&str>, body: Block) -> Expr {
        self.expr(ExprKind::Loop(body, label.map(|name| self.label(name))))
    }

    /// `'label: while cond { .. }`
    pub fn while_expr(&self, label: Option<&str>, cond: Expr, body: Block) -> Expr {
        self.expr(ExprKind::While {
            cond: Box::new(cond),
            body,
            label: label.map(|name| self.label(name)),
        })
    }

    /// `'label: while let pat = scrutinee { .. }`
    pub fn while_let(&self, label: Option<&str>, pat: Pat, scrutinee: Expr, body: Block) -> Expr {
        self.expr(ExprKind::WhileLet {
            pat,
            scrutinee: Box::new(scrutinee),
            body,
            label: label.map(|name| self.label(name)),
        })
    }

    /// `'label: for pat in iter { .. }`
    pub fn for_loop(&self, label: Option<&str>, pat: Pat, iter: Expr, body: Block) -> Expr {
        self.expr(ExprKind::ForLoop {
            pat,
            iter: Box::new(iter),
            body,
            label: label.map(|name| self.label(name)),
        })
    }

    /// `if cond { .. } else ..`
    pub fn if_expr(&self, cond: Expr, then: Block, else_: Option<Expr>) -> Expr {
        self.expr(ExprKind::If {
            cond: Box::new(cond),
            then,
            else_: else_.map(Box::new),
        })
    }

    /// `if let pat = scrutinee { .. } else ..`
    pub fn if_let(&self, pat: Pat, scrutinee: Expr, then: Block, else_: Option<Expr>) -> Expr {
        self.expr(ExprKind::IfLet {
            pat,
            scrutinee: Box::new(scrutinee),
            then,
            else_: else_.map(Box::new),
        })
    }

    /// `match scrutinee { arms }`
    pub fn match_expr(&self, scrutinee: Expr, arms: Vec<Arm>) -> Expr {
        self.expr(ExprKind::Match(Box::new(scrutinee), arms))
    }

    /// `pat if guard => body`
    pub fn arm(&self, pat: Pat, guard: Option<Expr>, body: Expr) -> Arm {
        Arm {
            id: self.id(),
            pat,
            guard: guard.map(Box::new),
            body: Box::new(body),
            span: self.span(),
        }
    }

    /// `break 'label value`
    pub fn break_expr(&self, label: Option<&str>, value: Option<Expr>) -> Expr {
        self.expr(ExprKind::Break(
            label.map(|name| self.lifetime(name)),
            value.map(Box::new),
        ))
    }

    /// `continue 'label`
    pub fn continue_expr(&self, label: Option<&str>) -> Expr {
        self.expr(ExprKind::Continue(label.map(|name| self.lifetime(name))))
    }

    /// `return value`
    pub fn return_expr(&self, value: Option<Expr>) -> Expr {
        self.expr(ExprKind::Return(value.map(Box::new)))
    }

    /// `|params| body`
    pub fn closure(&self, params: Vec<Pat>, body: Expr) -> Expr {
        let params = params
            .into_iter()
            .map(|pat| ClosureParam {
                id: self.id(),
                pat,
                ty: None,
            })
            .collect();
        self.expr(ExprKind::Closure(Closure {
            params,
            ret_ty: None,
            body: Box::new(body),
        }))
    }

    /// `Path { fields, ..base }`; an empty field list without base builds `Path {}`
    pub fn struct_expr(&self, path: Path, fields: Vec<ExprField>, base: Option<Expr>) -> Expr {
        let body = match (fields.is_empty(), base) {
            (true, None) => StructExprBody::Empty,
            (true, Some(base)) => StructExprBody::Base(Box::new(base)),
            (false, base) => StructExprBody::Fields {
                fields,
                base: base.map(Box::new),
            },
        };
        self.expr(ExprKind::Struct(StructExpr { path, body }))
    }

    /// `name: expr` inside a struct literal
    pub fn expr_field(&self, name: &str, expr: Expr) -> ExprField {
        ExprField {
            id: self.id(),
            ident: self.ident(name),
            expr,
            is_shorthand: false,
        }
    }

    /// Shorthand `name` inside a struct literal
    pub fn shorthand_field(&self, name: &str) -> ExprField {
        ExprField {
            id: self.id(),
            ident: self.ident(name),
            expr: self.ident_expr(name),
            is_shorthand: true,
        }
    }

    /// `name!(args)`
    pub fn macro_call(&self, name: &str, args: Vec<Expr>) -> Expr {
        self.expr(ExprKind::MacroInvocation(MacCall {
            path: self.path(&[name]),
            args,
        }))
    }

    // Blocks and statements

    /// `{ stmts tail }`
    pub fn block(&self, stmts: Vec<Stmt>, tail: Option<Expr>) -> Block {
        Block {
            id: self.id(),
            stmts,
            tail: tail.map(Box::new),
            span: self.span(),
        }
    }

    /// A statement of the given kind
    pub fn stmt(&self, kind: StmtKind) -> Stmt {
        Stmt {
            id: self.id(),
            kind,
            span: self.span(),
        }
    }

    /// `let pat: ty = init;`
    pub fn let_stmt(&self, pat: Pat, ty: Option<Ty>, init: Option<Expr>) -> Stmt {
        self.stmt(StmtKind::Let(LetStmt {
            pat,
            ty,
            init: init.map(Box::new),
            else_block: None,
        }))
    }

    /// `let pat = init else { .. };`
    pub fn let_else(&self, pat: Pat, init: Expr, else_block: Block) -> Stmt {
        self.stmt(StmtKind::Let(LetStmt {
            pat,
            ty: None,
            init: Some(Box::new(init)),
            else_block: Some(else_block),
        }))
    }

    /// `expr;`
    pub fn semi(&self, expr: Expr) -> Stmt {
        self.stmt(StmtKind::Semi(expr))
    }

    /// An item inside a block
    pub fn item_stmt(&self, item: Item) -> Stmt {
        self.stmt(StmtKind::Item(Box::new(item)))
    }

    // Patterns

    /// A pattern of the given kind
    pub fn pat(&self, kind: PatKind) -> Pat {
        Pat {
            id: self.id(),
            kind,
            span: self.span(),
        }
    }

    /// `_`
    pub fn wildcard(&self) -> Pat {
        self.pat(PatKind::Wildcard)
    }

    /// Plain binding `name`
    pub fn ident_pat(&self, name: &str) -> Pat {
        self.pat(PatKind::Identifier(IdentPat {
            ident: self.ident(name),
            by_ref: false,
            mutable: false,
            sub: None,
        }))
    }

    /// `name @ sub`
    pub fn ident_pat_at(&self, name: &str, sub: Pat) -> Pat {
        self.pat(PatKind::Identifier(IdentPat {
            ident: self.ident(name),
            by_ref: false,
            mutable: false,
            sub: Some(Box::new(sub)),
        }))
    }

    /// `(pats)`
    pub fn tuple_pat(&self, pats: Vec<Pat>) -> Pat {
        self.pat(PatKind::Tuple(pats))
    }

    /// `Path(pats)`
    pub fn tuple_struct_pat(&self, path: Path, pats: Vec<Pat>) -> Pat {
        self.pat(PatKind::TupleStruct(path, pats))
    }

    /// `Path { fields, .. }`
    pub fn struct_pat(&self, path: Path, fields: Vec<PatField>, has_rest: bool) -> Pat {
        self.pat(PatKind::Struct(StructPat {
            path,
            fields,
            has_rest,
        }))
    }

    /// `name: pat` inside a struct pattern
    pub fn pat_field(&self, name: &str, pat: Pat) -> PatField {
        PatField {
            id: self.id(),
            ident: self.ident(name),
            pat,
            is_shorthand: false,
        }
    }

    /// Shorthand `name` inside a struct pattern
    pub fn shorthand_pat_field(&self, name: &str) -> PatField {
        PatField {
            id: self.id(),
            ident: self.ident(name),
            pat: self.ident_pat(name),
            is_shorthand: true,
        }
    }

    /// `pat | pat | ..`
    pub fn alt_pat(&self, alts: Vec<Pat>) -> Pat {
        self.pat(PatKind::Alt(alts))
    }

    /// A path pattern such as `None`
    pub fn path_pat(&self, segments: &[&str]) -> Pat {
        self.pat(PatKind::Path(self.path(segments)))
    }

    /// `&pat`
    pub fn ref_pat(&self, pat: Pat) -> Pat {
        self.pat(PatKind::Reference {
            mutable: false,
            pat: Box::new(pat),
        })
    }

    // Items

    /// An item of the given kind
    pub fn item(&self, kind: ItemKind) -> Item {
        Item {
            id: self.id(),
            kind,
            span: self.span(),
        }
    }

    /// A generic parameter list without where clause
    pub fn generics(&self, params: Vec<GenericParam>) -> Generics {
        Generics {
            params,
            where_clause: Vec::new(),
        }
    }

    /// `T: bounds`
    pub fn type_param(&self, name: &str, bounds: Vec<GenericBound>) -> GenericParam {
        GenericParam {
            id: self.id(),
            ident: self.ident(name),
            kind: GenericParamKind::Type {
                bounds,
                default: None,
            },
        }
    }

    /// `'name`
    pub fn lifetime_param(&self, name: &str) -> GenericParam {
        GenericParam {
            id: self.id(),
            ident: self.ident(name),
            kind: GenericParamKind::Lifetime { bounds: Vec::new() },
        }
    }

    /// `const NAME: ty`
    pub fn const_param(&self, name: &str, ty: Ty) -> GenericParam {
        GenericParam {
            id: self.id(),
            ident: self.ident(name),
            kind: GenericParamKind::Const { ty, default: None },
        }
    }

    /// `bounded_ty: bounds` in a where clause
    pub fn where_predicate(&self, bounded_ty: Ty, bounds: Vec<GenericBound>) -> WherePredicate {
        WherePredicate {
            id: self.id(),
            bounded_ty,
            bounds,
        }
    }

    /// `pat: ty`
    pub fn param(&self, pat: Pat, ty: Ty) -> Param {
        Param {
            id: self.id(),
            pat,
            ty,
            span: self.span(),
        }
    }

    /// `&self`
    pub fn self_ref(&self) -> SelfParam {
        SelfParam {
            id: self.id(),
            kind: SelfKind::Ref {
                lifetime: None,
                mutable: false,
            },
            span: self.span(),
        }
    }

    /// A free function
    pub fn func(
        &self,
        name: &str,
        generics: Generics,
        params: Vec<Param>,
        ret_ty: Option<Ty>,
        body: Option<Block>,
    ) -> Item {
        self.method(name, generics, None, params, ret_ty, body)
    }

    /// A function with an optional receiver
    pub fn method(
        &self,
        name: &str,
        generics: Generics,
        self_param: Option<SelfParam>,
        params: Vec<Param>,
        ret_ty: Option<Ty>,
        body: Option<Block>,
    ) -> Item {
        self.item(ItemKind::Fn(Function {
            ident: self.ident(name),
            generics,
            self_param,
            params,
            ret_ty,
            body,
        }))
    }

    /// `name: ty` field declaration
    pub fn field_def(&self, name: &str, ty: Ty) -> FieldDef {
        FieldDef {
            id: self.id(),
            ident: Some(self.ident(name)),
            ty,
            span: self.span(),
        }
    }

    /// Positional field declaration
    pub fn tuple_field(&self, ty: Ty) -> FieldDef {
        FieldDef {
            id: self.id(),
            ident: None,
            ty,
            span: self.span(),
        }
    }

    /// `struct name<..> data`
    pub fn struct_item(&self, name: &str, generics: Generics, data: VariantData) -> Item {
        self.item(ItemKind::Struct(StructDef {
            ident: self.ident(name),
            generics,
            data,
        }))
    }

    /// Enum variant
    pub fn variant(&self, name: &str, data: VariantData) -> Variant {
        Variant {
            id: self.id(),
            ident: self.ident(name),
            data,
            discriminant: None,
            span: self.span(),
        }
    }

    /// `enum name<..> { variants }`
    pub fn enum_item(&self, name: &str, generics: Generics, variants: Vec<Variant>) -> Item {
        self.item(ItemKind::Enum(EnumDef {
            ident: self.ident(name),
            generics,
            variants,
        }))
    }

    /// `trait name<..> { items }`
    pub fn trait_item(&self, name: &str, generics: Generics, items: Vec<Item>) -> Item {
        self.item(ItemKind::Trait(TraitDef {
            ident: self.ident(name),
            generics,
            supertraits: Vec::new(),
            items,
        }))
    }

    /// `impl<..> self_ty { items }`
    pub fn inherent_impl(&self, generics: Generics, self_ty: Ty, items: Vec<Item>) -> Item {
        self.item(ItemKind::InherentImpl(InherentImpl {
            generics,
            self_ty,
            items,
        }))
    }

    /// `impl<..> trait_ref for self_ty { items }`
    pub fn trait_impl(
        &self,
        generics: Generics,
        trait_ref: Path,
        self_ty: Ty,
        items: Vec<Item>,
    ) -> Item {
        self.item(ItemKind::TraitImpl(TraitImpl {
            generics,
            trait_ref,
            self_ty,
            items,
        }))
    }

    /// `const name: ty = value;`
    pub fn const_item(&self, name: &str, ty: Ty, value: Option<Expr>) -> Item {
        self.item(ItemKind::Const(ConstDef {
            ident: self.ident(name),
            ty,
            value,
        }))
    }

    /// `static name: ty = value;`
    pub fn static_item(&self, name: &str, ty: Ty, value: Expr) -> Item {
        self.item(ItemKind::Static(ConstDef {
            ident: self.ident(name),
            ty,
            value: Some(value),
        }))
    }

    /// `type name<..> = ty;`
    pub fn type_alias(&self, name: &str, generics: Generics, ty: Option<Ty>) -> Item {
        self.item(ItemKind::TypeAlias(TypeAlias {
            ident: self.ident(name),
            generics,
            bounds: Vec::new(),
            ty,
        }))
    }

    /// `mod name { items }`
    pub fn module(&self, name: &str, items: Vec<Item>) -> Item {
        self.item(ItemKind::Module(Module {
            ident: self.ident(name),
            items,
        }))
    }

    /// `macro_rules! name { .. }`
    pub fn macro_rules(&self, name: &str) -> Item {
        self.item(ItemKind::MacroRules(MacroRulesDef {
            ident: self.ident(name),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_after_crate() {
        let interner = Interner::new();
        let ast = AstBuilder::new(&interner);
        let first = ast.ident_pat("x");
        let second = ast.ident_pat("x");
        assert_ne!(first.id, second.id);
        assert!(first.id > NodeId::CRATE);

        let krate = ast.finish(vec![]);
        assert_eq!(krate.id, NodeId::CRATE);
        assert!(krate.next_node_id > second.id);
    }

    #[test]
    fn test_spans_do_not_overlap() {
        let interner = Interner::new();
        let ast = AstBuilder::new(&interner);
        let left = ast.ident("a");
        let right = ast.ident("a");
        assert_eq!(left.name, right.name);
        assert!(left.span.span.end <= right.span.span.start);
    }

    #[test]
    fn test_struct_expr_shapes() {
        let interner = Interner::new();
        let ast = AstBuilder::new(&interner);
        let empty = ast.struct_expr(ast.path(&["S"]), vec![], None);
        assert!(matches!(
            empty.kind,
            ExprKind::Struct(StructExpr {
                body: StructExprBody::Empty,
                ..
            })
        ));
        let base = ast.struct_expr(ast.path(&["S"]), vec![], Some(ast.ident_expr("s")));
        assert!(matches!(
            base.kind,
            ExprKind::Struct(StructExpr {
                body: StructExprBody::Base(_),
                ..
            })
        ));
    }
}
