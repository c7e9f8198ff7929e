//! Namespaces names are bound in

use derive_more::Display;
use serde::Serialize;

/// Separate binding space: the same name may denote different things in each
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub enum Namespace {
    /// Types, traits, modules, type parameters
    #[display("type")]
    Type,
    /// Functions, constants, statics, locals, tuple/unit constructors
    #[display("value")]
    Value,
    /// Macros
    #[display("macro")]
    Macro,
    /// Loop and block labels
    #[display("label")]
    Label,
    /// Lifetime parameters
    #[display("lifetime")]
    Lifetime,
}

impl Namespace {
    /// Every namespace
    pub const ALL: [Self; 5] = [
        Self::Type,
        Self::Value,
        Self::Macro,
        Self::Label,
        Self::Lifetime,
    ];
}
