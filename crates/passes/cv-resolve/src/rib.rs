//! Ribs: the lexical scope frames of the late resolver

use crate::Namespace;
use cv_ast::NodeId;
use cv_intern::Symbol;
use cv_span::FileSpan;
use derive_more::Display;
use indexmap::IndexMap;

/// What opened a rib; decides which lookups may cross it
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq)]
pub enum RibKind {
    /// Block scope
    Normal,
    /// Function parameters and `self`
    Function,
    /// Closure parameters
    Closure,
    /// Generic parameters (and `Self` for traits, impls and ADTs)
    Generics,
    /// Entered for every non-associated item; hides outer locals and generics
    Item,
    /// Entered for trait and impl members; outer generics stay visible
    AssocItem,
    /// Inside a module; lookups consult its item scope and stop
    #[display("Module({})", _0.0)]
    Module(NodeId),
    /// Bindings of a match arm, `if let`, `while let` or `for` pattern
    Pattern,
    /// Label scope of a loop
    Loop,
    /// Condition of a `while` or `while let` loop, inside its `Loop` rib
    LoopCondition,
    /// Label scope of a labeled block
    LabeledBlock,
}

impl RibKind {
    /// Whether labels outside this rib are invisible inside it
    pub fn is_label_barrier(self) -> bool {
        matches!(
            self,
            Self::Function | Self::Closure | Self::Item | Self::Module(_)
        )
    }

    /// Whether only item bindings stay visible past this rib
    pub fn is_item_barrier(self) -> bool {
        matches!(self, Self::Item)
    }

    /// Whether this rib holds labels
    pub fn is_label_rib(self) -> bool {
        matches!(self, Self::Loop | Self::LabeledBlock)
    }
}

/// What a bound name denotes
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq)]
pub enum BindingKind {
    /// A pattern binding
    #[display("local variable")]
    Local,
    /// An item declared in a block or module
    #[display("item")]
    Item,
    /// A type, const or lifetime parameter
    #[display("generic parameter")]
    GenericParam,
    /// The `self` receiver
    #[display("`self` parameter")]
    SelfParam,
    /// `Self` inside a trait, impl or type definition
    #[display("`Self` type")]
    SelfType,
    /// A loop or block label
    #[display("label")]
    Label,
}

impl BindingKind {
    /// Whether the binding stays visible across item barriers
    pub fn crosses_items(self) -> bool {
        matches!(self, Self::Item)
    }
}

/// A name bound in a rib or item scope
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Binding {
    /// Declaring node
    pub id: NodeId,
    /// What kind of declaration it is
    pub kind: BindingKind,
    /// Where the name was declared
    pub span: FileSpan,
}

/// One scope frame
#[derive(Debug, Clone)]
pub struct Rib {
    /// What opened the rib
    pub kind: RibKind,
    /// Bound names, in insertion order
    pub bindings: IndexMap<(Symbol, Namespace), Binding>,
}

impl Rib {
    /// An empty rib
    pub fn new(kind: RibKind) -> Self {
        Self {
            kind,
            bindings: IndexMap::new(),
        }
    }

    /// Binding of `name` in `ns`, if bound in this rib
    pub fn get(&self, name: Symbol, ns: Namespace) -> Option<&Binding> {
        self.bindings.get(&(name, ns))
    }

    /// Bind a name, replacing (shadowing) any earlier binding of it
    pub fn insert(&mut self, name: Symbol, ns: Namespace, binding: Binding) -> Option<Binding> {
        self.bindings.insert((name, ns), binding)
    }

    /// Names bound in `ns`
    pub fn names(&self, ns: Namespace) -> impl Iterator<Item = Symbol> + '_ {
        self.bindings
            .keys()
            .filter(move |(_, bound_ns)| *bound_ns == ns)
            .map(|(name, _)| *name)
    }
}
