//! Abstract syntax tree consumed by late name resolution
//!
//! The tree is already parsed and macro-expanded. Every node that can take
//! part in name resolution carries a [`NodeId`]; ids are dense and unique for
//! the lifetime of a [`Crate`].
//!
//! Traversal goes through the [`visit::Visitor`] trait, whose default methods
//! walk into every child. Passes override the handful of node kinds they care
//! about and fall back to the `walk_*` functions for the rest.

pub mod builder;
pub mod expr;
pub mod item;
pub mod pat;
pub mod ty;
pub mod visit;

pub use builder::AstBuilder;
pub use expr::*;
pub use item::*;
pub use pat::*;
pub use ty::*;

use cv_intern::Symbol;
use cv_span::FileSpan;
use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Unique id of an AST node
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Id of the crate root
    pub const CRATE: Self = Self(0);

    /// Raw index of this id
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Dense allocator of [`NodeId`]s
///
/// Allocation only needs a shared reference so that nested builder calls can
/// hand out ids while other nodes are still being assembled.
#[derive(Debug)]
pub struct NodeIdGen {
    next: Cell<u32>,
}

impl NodeIdGen {
    /// Allocator whose first id is [`NodeId::CRATE`]
    pub fn new() -> Self {
        Self::starting_at(NodeId::CRATE)
    }

    /// Allocator whose first id is `first`
    pub fn starting_at(first: NodeId) -> Self {
        Self {
            next: Cell::new(first.0),
        }
    }

    /// Allocate the next id
    pub fn next_id(&self) -> NodeId {
        let id = self.next.get();
        self.next.set(id + 1);
        NodeId(id)
    }

    /// The id that the next call to [`NodeIdGen::next_id`] will return
    pub fn peek(&self) -> NodeId {
        NodeId(self.next.get())
    }
}

impl Default for NodeIdGen {
    fn default() -> Self {
        Self::new()
    }
}

/// An identifier occurrence
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct Ident {
    /// Interned name
    pub name: Symbol,
    /// Where the identifier was written
    pub span: FileSpan,
}

impl Ident {
    /// Create an identifier
    pub fn new(name: Symbol, span: FileSpan) -> Self {
        Self { name, span }
    }
}

/// Root of a parsed, macro-expanded crate
#[derive(Debug, Clone, PartialEq)]
pub struct Crate {
    /// Always [`NodeId::CRATE`] for trees produced by [`AstBuilder`]
    pub id: NodeId,
    /// Top-level items
    pub items: Vec<Item>,
    /// Whole-crate location
    pub span: FileSpan,
    /// One past the largest id used in the tree
    pub next_node_id: NodeId,
}

/// A path such as `a::b::<T>::c`
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Id of the path as a whole
    pub id: NodeId,
    /// Whether the path starts with `::`
    pub global: bool,
    /// Path segments, never empty
    pub segments: Vec<PathSegment>,
    /// Source location
    pub span: FileSpan,
}

impl Path {
    /// Whether the path is a single identifier without generic arguments
    pub fn is_single_ident(&self) -> bool {
        !self.global && self.segments.len() == 1 && self.segments[0].args.is_none()
    }
}

/// One segment of a [`Path`]
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    /// Id of this segment
    pub id: NodeId,
    /// Segment name (may be a keyword such as `self`, `super`, `crate`, `Self`)
    pub ident: Ident,
    /// Generic arguments written on this segment
    pub args: Option<GenericArgs>,
}

/// Generic arguments: `<T, 'a, N, Item = U>`
#[derive(Debug, Clone, PartialEq)]
pub struct GenericArgs {
    /// Id of the argument list
    pub id: NodeId,
    /// Arguments in source order
    pub args: Vec<GenericArg>,
    /// Source location
    pub span: FileSpan,
}

/// A single generic argument
#[derive(Debug, Clone, PartialEq)]
pub enum GenericArg {
    /// A lifetime argument
    Lifetime(Lifetime),
    /// An unambiguous type argument
    Type(Ty),
    /// A const argument written as an expression or block
    Const(Expr),
    /// A bare identifier that may name either a type or a const
    Either(Path),
    /// An associated type constraint such as `Item = T`
    Constraint(AssocConstraint),
}

/// `Name = Ty` inside generic arguments
#[derive(Debug, Clone, PartialEq)]
pub struct AssocConstraint {
    /// Id of the constraint
    pub id: NodeId,
    /// Associated item name; resolved relative to the trait by the type checker
    pub ident: Ident,
    /// The constrained type
    pub ty: Ty,
}

/// A lifetime use or label reference such as `'a`
///
/// The stored name excludes the leading quote.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lifetime {
    /// Id of the occurrence
    pub id: NodeId,
    /// Name without the leading quote
    pub ident: Ident,
}

/// A loop or block label declaration `'a:`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LoopLabel {
    /// Id of the label declaration
    pub id: NodeId,
    /// Label name without the leading quote
    pub ident: Ident,
}
