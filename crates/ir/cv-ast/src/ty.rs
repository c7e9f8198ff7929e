//! Types and bounds

use crate::{Expr, Lifetime, NodeId, Path};
use cv_span::FileSpan;

/// A type
#[derive(Debug, Clone, PartialEq)]
pub struct Ty {
    /// Id of the type node
    pub id: NodeId,
    /// Type kind
    pub kind: TyKind,
    /// Source location
    pub span: FileSpan,
}

/// Type kinds
#[derive(Debug, Clone, PartialEq)]
pub enum TyKind {
    /// A path type such as `i32`, `Vec<T>` or `Self::Item`
    Path(Path),
    /// A compiler-known item produced by desugaring, e.g. `Range`
    LangItem(LangItemPath),
    /// `&'a mut T`
    Ref {
        /// Optional lifetime
        lifetime: Option<Lifetime>,
        /// Whether the reference is mutable
        mutable: bool,
        /// Referenced type
        inner: Box<Ty>,
    },
    /// `*const T` / `*mut T`
    Ptr {
        /// Whether the pointer is mutable
        mutable: bool,
        /// Pointee type
        inner: Box<Ty>,
    },
    /// `(A, B)`
    Tuple(Vec<Ty>),
    /// `[T]`
    Slice(Box<Ty>),
    /// `[T; N]`
    Array(Box<Ty>, Box<Expr>),
    /// `fn(A) -> R`
    FnPtr {
        /// Parameter types
        params: Vec<Ty>,
        /// Return type
        ret: Option<Box<Ty>>,
    },
    /// `impl Bounds`
    ImplTrait(Vec<GenericBound>),
    /// `dyn Bounds`
    TraitObject(Vec<GenericBound>),
    /// `!`
    Never,
    /// `_`
    Infer,
}

/// A trait or lifetime bound
#[derive(Debug, Clone, PartialEq)]
pub enum GenericBound {
    /// `Trait<Args>`
    Trait(Path),
    /// Lang-item trait such as `Sized`
    LangItem(LangItemPath),
    /// `'a`
    Outlives(Lifetime),
}

/// Reference to a lang item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LangItemPath {
    /// Id of the reference
    pub id: NodeId,
    /// The referenced lang item
    pub item: LangItem,
    /// Source location of the construct that produced the reference
    pub span: FileSpan,
}

macro_rules! lang_items {
    ($($variant:ident => $name:literal,)*) => {
        /// Compiler-known items that desugaring refers to directly
        #[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
        pub enum LangItem {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        impl LangItem {
            /// Every lang item
            pub const ALL: &'static [LangItem] = &[$(LangItem::$variant,)*];

            /// Source-level name of the item
            pub fn name(self) -> &'static str {
                match self {
                    $(LangItem::$variant => $name,)*
                }
            }
        }
    };
}

lang_items! {
    Sized => "Sized",
    Copy => "Copy",
    Clone => "Clone",
    Add => "Add",
    Sub => "Sub",
    Mul => "Mul",
    Div => "Div",
    Rem => "Rem",
    Neg => "Neg",
    Not => "Not",
    Deref => "Deref",
    Fn => "Fn",
    FnMut => "FnMut",
    FnOnce => "FnOnce",
    Iterator => "Iterator",
    IntoIterator => "IntoIterator",
    Range => "Range",
    RangeFrom => "RangeFrom",
    RangeTo => "RangeTo",
    RangeFull => "RangeFull",
    RangeInclusive => "RangeInclusive",
    RangeToInclusive => "RangeToInclusive",
}
