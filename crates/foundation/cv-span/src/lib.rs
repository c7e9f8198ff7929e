//! Source file spans and locations

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A unique identifier for a source file
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[display("file#{_0}")]
pub struct FileId(pub u32);

impl FileId {
    /// Pseudo-file that compiler-provided entities (builtin types, lang items) live in.
    pub const BUILTIN: Self = Self(u32::MAX);

    /// Create a file id from its raw index
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// A byte offset span in a source file
#[derive(Copy, Clone, Debug, Display, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[display("{start}..{end}")]
pub struct Span {
    /// First byte covered by the span
    pub start: u32,
    /// One past the last byte covered by the span
    pub end: u32,
}

impl Span {
    /// Create a span from byte offsets
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// The byte range covered by this span
    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Length of the span in bytes
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`
    #[must_use]
    pub fn to(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A span with associated file
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[display("{file}@{span}")]
pub struct FileSpan {
    /// File the span points into
    pub file: FileId,
    /// Byte range inside the file
    pub span: Span,
}

impl FileSpan {
    /// Location used for entities that have no source text
    pub const BUILTIN: Self = Self {
        file: FileId::BUILTIN,
        span: Span { start: 0, end: 0 },
    };

    /// Create a file span
    pub fn new(file: FileId, span: Span) -> Self {
        Self { file, span }
    }

    /// The byte range covered by this span
    pub fn range(&self) -> Range<usize> {
        self.span.range()
    }

    /// Whether this location belongs to a compiler-provided entity
    pub fn is_builtin(&self) -> bool {
        self.file == FileId::BUILTIN
    }

    /// Smallest span covering both locations.
    ///
    /// Both spans must come from the same file; the file of `self` is kept.
    #[must_use]
    pub fn to(self, other: Self) -> Self {
        debug_assert_eq!(self.file, other.file, "joining spans from different files");
        Self {
            file: self.file,
            span: self.span.to(other.span),
        }
    }
}
