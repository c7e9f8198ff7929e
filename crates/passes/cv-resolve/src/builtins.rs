//! Compiler-provided names visible everywhere
//!
//! The table is built once, before traversal, and never changes afterwards.
//! Lookups fall back to it after every rib and item scope has been searched,
//! so user declarations shadow builtins.

use crate::Namespace;
use cv_ast::{LangItem, NodeId, NodeIdGen};
use cv_intern::{Interner, Symbol};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

/// Primitive types
const PRIMITIVE_TYPES: &[&str] = &[
    "bool", "char", "str", "u8", "u16", "u32", "u64", "u128", "i8", "i16", "i32", "i64", "i128",
    "usize", "isize", "f32", "f64", "!",
];

/// Prelude types and traits that are not lang items
const PRELUDE_TYPES: &[&str] = &["Option", "Result", "Vec", "String", "Box", "Default"];

/// Prelude values: the `Option` and `Result` constructors
const PRELUDE_VALUES: &[&str] = &["Some", "None", "Ok", "Err"];

/// Lang items reachable by name through the prelude
const PRELUDE_LANG_ITEMS: &[LangItem] = &[
    LangItem::Sized,
    LangItem::Copy,
    LangItem::Clone,
    LangItem::Fn,
    LangItem::FnMut,
    LangItem::FnOnce,
    LangItem::Iterator,
    LangItem::IntoIterator,
];

/// Macros that survive expansion as invocations
const BUILTIN_MACROS: &[&str] = &[
    "println",
    "print",
    "eprintln",
    "eprint",
    "format",
    "write",
    "writeln",
    "vec",
    "assert",
    "assert_eq",
    "assert_ne",
    "debug_assert",
    "panic",
    "unreachable",
    "todo",
    "unimplemented",
    "dbg",
];

/// Lifetimes that never need declaring
const BUILTIN_LIFETIMES: &[&str] = &["static", "_"];

/// Immutable table of builtin declarations
#[derive(Debug, Clone)]
pub struct Builtins {
    bindings: IndexMap<(Symbol, Namespace), NodeId>,
    lang_items: FxHashMap<LangItem, NodeId>,
    names: FxHashMap<NodeId, Symbol>,
    next_id: NodeId,
}

impl Builtins {
    /// Builtin bound to `name` in `ns`
    pub fn lookup(&self, name: Symbol, ns: Namespace) -> Option<NodeId> {
        self.bindings.get(&(name, ns)).copied()
    }

    /// Declaration id of a lang item
    pub fn lang_item(&self, item: LangItem) -> Option<NodeId> {
        self.lang_items.get(&item).copied()
    }

    /// Whether `id` is a builtin declaration
    pub fn is_builtin(&self, id: NodeId) -> bool {
        self.names.contains_key(&id)
    }

    /// Name of a builtin declaration
    pub fn name_of(&self, id: NodeId) -> Option<Symbol> {
        self.names.get(&id).copied()
    }

    /// Builtin names in `ns`
    pub fn names(&self, ns: Namespace) -> impl Iterator<Item = Symbol> + '_ {
        self.bindings
            .keys()
            .filter(move |(_, bound_ns)| *bound_ns == ns)
            .map(|(name, _)| *name)
    }

    /// First id not used by any builtin
    pub fn next_id(&self) -> NodeId {
        self.next_id
    }

    /// Number of builtin declarations
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

struct BuiltinsBuilder<'a> {
    interner: &'a Interner,
    ids: NodeIdGen,
    table: Builtins,
}

impl BuiltinsBuilder<'_> {
    fn declare(&mut self, name: &str, namespaces: &[Namespace]) -> NodeId {
        let sym = self.interner.intern(name);
        let id = self.ids.next_id();
        for &ns in namespaces {
            self.table.bindings.insert((sym, ns), id);
        }
        self.table.names.insert(id, sym);
        id
    }
}

/// Build the builtin table, allocating declaration ids from `first_id` upward
///
/// `first_id` must lie past every id of the crate being resolved, e.g.
/// [`cv_ast::Crate::next_node_id`].
pub fn setup_builtin_types(interner: &Interner, first_id: NodeId) -> Builtins {
    let mut builder = BuiltinsBuilder {
        interner,
        ids: NodeIdGen::starting_at(first_id),
        table: Builtins {
            bindings: IndexMap::new(),
            lang_items: FxHashMap::default(),
            names: FxHashMap::default(),
            next_id: first_id,
        },
    };

    for name in PRIMITIVE_TYPES.iter().chain(PRELUDE_TYPES) {
        builder.declare(name, &[Namespace::Type]);
    }
    for name in PRELUDE_VALUES {
        builder.declare(name, &[Namespace::Value]);
    }
    for &item in LangItem::ALL {
        let namespaces: &[Namespace] = if PRELUDE_LANG_ITEMS.contains(&item) {
            &[Namespace::Type]
        } else {
            &[]
        };
        let id = builder.declare(item.name(), namespaces);
        builder.table.lang_items.insert(item, id);
    }
    for name in BUILTIN_MACROS {
        builder.declare(name, &[Namespace::Macro]);
    }
    for name in BUILTIN_LIFETIMES {
        builder.declare(name, &[Namespace::Lifetime]);
    }

    let mut table = builder.table;
    table.next_id = builder.ids.peek();
    tracing::debug!(count = table.len(), first = first_id.0, "installed builtins");
    table
}
