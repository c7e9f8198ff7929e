//! Items: functions, structs, enums, traits, impls, modules

use crate::{Block, Expr, GenericBound, Ident, Lifetime, NodeId, Pat, Path, Ty};
use cv_span::FileSpan;

/// An item at module, block, trait or impl level
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Id of the item; this is the declaration id names resolve to
    pub id: NodeId,
    /// What kind of item this is
    pub kind: ItemKind,
    /// Source location
    pub span: FileSpan,
}

impl Item {
    /// Name the item declares, if it declares one
    pub fn ident(&self) -> Option<Ident> {
        match &self.kind {
            ItemKind::Fn(func) => Some(func.ident),
            ItemKind::Struct(def) => Some(def.ident),
            ItemKind::Enum(def) => Some(def.ident),
            ItemKind::Trait(def) => Some(def.ident),
            ItemKind::Const(def) => Some(def.ident),
            ItemKind::Static(def) => Some(def.ident),
            ItemKind::TypeAlias(def) => Some(def.ident),
            ItemKind::Module(def) => Some(def.ident),
            ItemKind::MacroRules(def) => Some(def.ident),
            ItemKind::InherentImpl(_) | ItemKind::TraitImpl(_) => None,
        }
    }
}

/// Item kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// `fn name<..>(..) -> T { .. }`
    Fn(Function),
    /// `struct S { .. }`, `struct S(..);` or `struct S;`
    Struct(StructDef),
    /// `enum E { .. }`
    Enum(EnumDef),
    /// `trait Tr: Bounds { .. }`
    Trait(TraitDef),
    /// `impl<..> Ty { .. }`
    InherentImpl(InherentImpl),
    /// `impl<..> Trait for Ty { .. }`
    TraitImpl(TraitImpl),
    /// `const NAME: T = expr;`
    Const(ConstDef),
    /// `static NAME: T = expr;`
    Static(ConstDef),
    /// `type Name<..> = T;` (or an associated type declaration without a value)
    TypeAlias(TypeAlias),
    /// `mod name { .. }`
    Module(Module),
    /// `macro_rules! name { .. }`; only the name survives expansion
    MacroRules(MacroRulesDef),
}

/// Function or method
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Function name
    pub ident: Ident,
    /// Generic parameter list and where clause
    pub generics: Generics,
    /// Method receiver, if any
    pub self_param: Option<SelfParam>,
    /// Ordinary parameters
    pub params: Vec<Param>,
    /// Declared return type
    pub ret_ty: Option<Ty>,
    /// Body; `None` for required trait methods
    pub body: Option<Block>,
}

/// Method receiver
#[derive(Debug, Clone, PartialEq)]
pub struct SelfParam {
    /// Id of the receiver; `self` in the body resolves to it
    pub id: NodeId,
    /// How `self` is taken
    pub kind: SelfKind,
    /// Source location
    pub span: FileSpan,
}

/// Forms a receiver can take
#[derive(Debug, Clone, PartialEq)]
pub enum SelfKind {
    /// `self` or `mut self`
    Value {
        /// Whether the receiver is `mut self`
        mutable: bool,
    },
    /// `&self`, `&'a mut self`, ...
    Ref {
        /// Optional explicit lifetime
        lifetime: Option<Lifetime>,
        /// Whether the reference is mutable
        mutable: bool,
    },
    /// `self: Ty`
    Explicit(Ty),
}

/// Ordinary function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Id of the parameter
    pub id: NodeId,
    /// Binding pattern
    pub pat: Pat,
    /// Declared type
    pub ty: Ty,
    /// Source location
    pub span: FileSpan,
}

/// Generic parameter list and where clause
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Generics {
    /// Parameters in declaration order
    pub params: Vec<GenericParam>,
    /// Where-clause predicates
    pub where_clause: Vec<WherePredicate>,
}

/// A single generic parameter
#[derive(Debug, Clone, PartialEq)]
pub struct GenericParam {
    /// Declaration id of the parameter
    pub id: NodeId,
    /// Parameter name (lifetimes without the quote)
    pub ident: Ident,
    /// Parameter kind
    pub kind: GenericParamKind,
}

/// Kinds of generic parameters
#[derive(Debug, Clone, PartialEq)]
pub enum GenericParamKind {
    /// `'a: 'b`
    Lifetime {
        /// Outlives bounds
        bounds: Vec<Lifetime>,
    },
    /// `T: Bound = Default`
    Type {
        /// Trait and lifetime bounds
        bounds: Vec<GenericBound>,
        /// Default type
        default: Option<Ty>,
    },
    /// `const N: usize = 3`
    Const {
        /// Type of the const parameter
        ty: Ty,
        /// Default value
        default: Option<Expr>,
    },
}

/// `Ty: Bounds` in a where clause
#[derive(Debug, Clone, PartialEq)]
pub struct WherePredicate {
    /// Id of the predicate
    pub id: NodeId,
    /// Constrained type
    pub bounded_ty: Ty,
    /// Bounds placed on it
    pub bounds: Vec<GenericBound>,
}

/// Struct definition
#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    /// Struct name
    pub ident: Ident,
    /// Generic parameters
    pub generics: Generics,
    /// Fields
    pub data: VariantData,
}

/// Field layout shared by structs and enum variants
#[derive(Debug, Clone, PartialEq)]
pub enum VariantData {
    /// Named fields: `{ a: T, b: U }`
    Struct(Vec<FieldDef>),
    /// Positional fields: `(T, U)`
    Tuple(Vec<FieldDef>),
    /// No fields
    Unit,
}

impl VariantData {
    /// All fields regardless of layout
    pub fn fields(&self) -> &[FieldDef] {
        match self {
            Self::Struct(fields) | Self::Tuple(fields) => fields,
            Self::Unit => &[],
        }
    }

    /// Whether the constructor lives in the value namespace
    pub fn has_value_ctor(&self) -> bool {
        !matches!(self, Self::Struct(_))
    }
}

/// A field declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Declaration id of the field
    pub id: NodeId,
    /// Field name; `None` for positional fields
    pub ident: Option<Ident>,
    /// Field type
    pub ty: Ty,
    /// Source location
    pub span: FileSpan,
}

/// Enum definition
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDef {
    /// Enum name
    pub ident: Ident,
    /// Generic parameters
    pub generics: Generics,
    /// Variants
    pub variants: Vec<Variant>,
}

/// Enum variant
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    /// Declaration id of the variant
    pub id: NodeId,
    /// Variant name
    pub ident: Ident,
    /// Variant fields
    pub data: VariantData,
    /// Explicit discriminant
    pub discriminant: Option<Expr>,
    /// Source location
    pub span: FileSpan,
}

/// Trait definition
#[derive(Debug, Clone, PartialEq)]
pub struct TraitDef {
    /// Trait name
    pub ident: Ident,
    /// Generic parameters
    pub generics: Generics,
    /// Supertrait bounds
    pub supertraits: Vec<GenericBound>,
    /// Associated items
    pub items: Vec<Item>,
}

/// Inherent impl block
#[derive(Debug, Clone, PartialEq)]
pub struct InherentImpl {
    /// Generic parameters of the impl
    pub generics: Generics,
    /// Implementing type
    pub self_ty: Ty,
    /// Associated items
    pub items: Vec<Item>,
}

/// Trait impl block
#[derive(Debug, Clone, PartialEq)]
pub struct TraitImpl {
    /// Generic parameters of the impl
    pub generics: Generics,
    /// Implemented trait
    pub trait_ref: Path,
    /// Implementing type
    pub self_ty: Ty,
    /// Associated items
    pub items: Vec<Item>,
}

/// `const` or `static` item
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDef {
    /// Item name
    pub ident: Ident,
    /// Declared type
    pub ty: Ty,
    /// Value; `None` for required associated consts
    pub value: Option<Expr>,
}

/// Type alias or associated type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    /// Alias name
    pub ident: Ident,
    /// Generic parameters
    pub generics: Generics,
    /// Bounds (associated type declarations only)
    pub bounds: Vec<GenericBound>,
    /// Aliased type; `None` for associated type declarations
    pub ty: Option<Ty>,
}

/// Inline module
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// Module name
    pub ident: Ident,
    /// Items in the module
    pub items: Vec<Item>,
}

/// Definition of a declarative macro
#[derive(Debug, Clone, PartialEq)]
pub struct MacroRulesDef {
    /// Macro name
    pub ident: Ident,
}
