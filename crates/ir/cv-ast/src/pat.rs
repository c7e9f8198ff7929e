//! Patterns

use crate::{Ident, Lit, NodeId, Path};
use cv_span::FileSpan;

/// A pattern
#[derive(Debug, Clone, PartialEq)]
pub struct Pat {
    /// Id of the pattern
    pub id: NodeId,
    /// Pattern kind
    pub kind: PatKind,
    /// Source location
    pub span: FileSpan,
}

/// Pattern kinds
#[derive(Debug, Clone, PartialEq)]
pub enum PatKind {
    /// `_`
    Wildcard,
    /// `..` inside tuple and slice patterns
    Rest,
    /// Literal pattern
    Literal(Lit),
    /// Binding `ref mut name @ sub`
    Identifier(IdentPat),
    /// `lo..=hi`, `lo..`, `..=hi`
    Range(RangePat),
    /// `&pat` / `&mut pat`
    Reference {
        /// Whether the reference is mutable
        mutable: bool,
        /// Referenced pattern
        pat: Box<Pat>,
    },
    /// `Path { field: pat, .. }`
    Struct(StructPat),
    /// `Path(pats)`
    TupleStruct(Path, Vec<Pat>),
    /// `(pats)`
    Tuple(Vec<Pat>),
    /// `(pat)`
    Grouped(Box<Pat>),
    /// `[pats]`
    Slice(Vec<Pat>),
    /// `pat | pat | ..`
    Alt(Vec<Pat>),
    /// Unit struct, unit variant or constant: `None`, `E::A`, `MAX`
    Path(Path),
}

/// Identifier pattern
#[derive(Debug, Clone, PartialEq)]
pub struct IdentPat {
    /// Bound name
    pub ident: Ident,
    /// `ref` binding mode
    pub by_ref: bool,
    /// `mut` binding
    pub mutable: bool,
    /// Sub-pattern after `@`
    pub sub: Option<Box<Pat>>,
}

/// Range pattern
#[derive(Debug, Clone, PartialEq)]
pub struct RangePat {
    /// Lower bound
    pub start: Option<RangeBound>,
    /// Upper bound
    pub end: Option<RangeBound>,
    /// Whether the upper bound is inclusive
    pub inclusive: bool,
}

/// A bound of a range pattern
#[derive(Debug, Clone, PartialEq)]
pub enum RangeBound {
    /// Literal bound
    Literal(Lit),
    /// Path to a constant
    Path(Path),
}

/// Struct pattern
#[derive(Debug, Clone, PartialEq)]
pub struct StructPat {
    /// Struct or variant path
    pub path: Path,
    /// Field patterns
    pub fields: Vec<PatField>,
    /// Whether the pattern ends with `..`
    pub has_rest: bool,
}

/// Field inside a struct pattern
#[derive(Debug, Clone, PartialEq)]
pub struct PatField {
    /// Id of the field pattern; the field name resolves through it
    pub id: NodeId,
    /// Field name
    pub ident: Ident,
    /// Pattern for the field; an identifier pattern for shorthand fields
    pub pat: Pat,
    /// Whether the field was written as `a` instead of `a: a`
    pub is_shorthand: bool,
}
