//! Error types for name resolution

use crate::{BindingKind, Namespace, ResolveOptions};
use codespan_reporting::diagnostic::{Diagnostic, Label};
use cv_intern::{Interner, Symbol};
use cv_span::FileSpan;
use std::mem;

/// A recoverable resolution failure at a source location
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {span}")]
pub struct ResolutionError {
    /// What went wrong
    pub kind: ResolutionErrorKind,
    /// Where it went wrong
    pub span: FileSpan,
}

/// Kinds of resolution errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionErrorKind {
    /// No visible declaration has this name
    #[error("cannot find {namespace} `{name}` in this scope")]
    UnresolvedName {
        /// The name that was not found
        name: String,
        /// Namespace the name was looked up in
        namespace: Namespace,
        /// Visible names close to the one written
        suggestions: Vec<String>,
    },

    /// `break 'a` / `continue 'a` with no enclosing `'a`
    #[error("use of undeclared label `'{name}`")]
    UndeclaredLabel {
        /// Label name without the quote
        name: String,
    },

    /// A lifetime that is not a parameter in scope
    #[error("use of undeclared lifetime name `'{name}`")]
    UndeclaredLifetime {
        /// Lifetime name without the quote
        name: String,
    },

    /// Unlabeled `break` or `continue` with no enclosing loop
    #[error("`{keyword}` outside of a loop")]
    BreakOutsideLoop {
        /// `break` or `continue`
        keyword: &'static str,
    },

    /// Unlabeled `break` or `continue` in the condition of a `while` loop
    #[error("`{keyword}` with no label in the condition of a `while` loop")]
    BreakInLoopCondition {
        /// `break` or `continue`
        keyword: &'static str,
    },

    /// `continue 'a` where `'a` labels a block
    #[error("`continue` pointing to a labeled block `'{name}`")]
    ContinueToLabeledBlock {
        /// Label name without the quote
        name: String,
    },

    /// An or-pattern alternative does not bind a name the others bind
    #[error("variable `{name}` is not bound in all patterns")]
    VariableNotBoundInPattern {
        /// The inconsistently bound name
        name: String,
    },

    /// `(a, a)`
    #[error("identifier `{name}` is bound more than once in the same pattern")]
    IdentifierBoundMoreThanOnceInSamePattern {
        /// The repeated name
        name: String,
    },

    /// `fn f(a: i32, a: i32)`
    #[error("identifier `{name}` is bound more than once in this parameter list")]
    IdentifierBoundMoreThanOnceInParameterList {
        /// The repeated name
        name: String,
    },

    /// `fn f<T, T>()`
    #[error("the name `{name}` is already used for a generic parameter")]
    DuplicateGenericParam {
        /// The repeated name
        name: String,
        /// First declaration
        first: FileSpan,
    },

    /// Two items with the same name in one scope and namespace
    #[error("the name `{name}` is defined multiple times in the {namespace} namespace")]
    DuplicateDefinition {
        /// The repeated name
        name: String,
        /// Namespace of the clash
        namespace: Namespace,
        /// First definition
        first: FileSpan,
    },

    /// A local or generic parameter of an enclosing item used inside a nested item
    #[error("can't use {binding} `{name}` from outer item")]
    OuterItemBinding {
        /// The outer name
        name: String,
        /// What the outer name is
        binding: BindingKind,
        /// Where the outer name was declared
        declared: FileSpan,
    },

    /// `super::super::x` with not enough enclosing modules
    #[error("there are too many leading `super` keywords")]
    TooManyLeadingSuper,

    /// `a::crate::b`
    #[error("`crate` in paths can only be used in start position")]
    CrateInNonStartPosition,

    /// `a::super::b`
    #[error("`super` in paths can only be used in start position")]
    SuperInNonStartPosition,

    /// `a::self::b`
    #[error("`self` in paths can only be used in start position")]
    SelfInNonStartPosition,

    /// A struct literal or pattern names a field the struct does not have
    #[error("`{parent}` has no field named `{name}`")]
    NoSuchField {
        /// The field name written
        name: String,
        /// The struct or variant
        parent: String,
    },
}

impl ResolutionError {
    /// Create an error
    pub fn new(kind: ResolutionErrorKind, span: FileSpan) -> Self {
        Self { kind, span }
    }

    /// Compute suggestions for unresolved names using Levenshtein distance
    ///
    /// A candidate qualifies when it is within a third of the name's length
    /// (at least one edit, at most `max_suggestion_distance`) or when it is
    /// a permutation of the name's characters, such as `valeu` for `value`.
    pub fn compute_suggestions(
        name: Symbol,
        interner: &Interner,
        available_names: &[Symbol],
        options: &ResolveOptions,
    ) -> Vec<String> {
        if !options.suggest_similar_names {
            return Vec::new();
        }

        let target = interner.resolve(&name);
        let cutoff = (target.chars().count().max(3) / 3).min(options.max_suggestion_distance);
        let target_sorted = sorted_chars(&target);
        let mut suggestions: Vec<(String, usize)> = available_names
            .iter()
            .filter(|&&candidate| candidate != name)
            .map(|candidate| interner.resolve(candidate))
            .filter(|candidate| is_identifier(candidate))
            .filter_map(|candidate| {
                let distance = levenshtein_distance(&target, &candidate);
                (distance <= cutoff || sorted_chars(&candidate) == target_sorted)
                    .then_some((candidate, distance))
            })
            .collect();

        // stable: ties keep the innermost-first order of `available_names`
        suggestions.sort_by_key(|(_, distance)| *distance);
        suggestions.dedup_by(|(left, _), (right, _)| left == right);
        suggestions
            .into_iter()
            .take(options.max_suggestions)
            .map(|(name, _)| name)
            .collect()
    }

    /// Convert to codespan diagnostic for rustc-style output
    ///
    /// File ids are the raw [`cv_span::FileId`] indices, matching the ids
    /// handed out by `codespan_reporting::files::SimpleFiles`.
    pub fn to_codespan_diagnostic(&self) -> Diagnostic<usize> {
        let file_id = self.span.file.0 as usize;
        let primary = Label::primary(file_id, self.span.range());
        let diagnostic = Diagnostic::error().with_message(self.kind.to_string());

        match &self.kind {
            ResolutionErrorKind::UnresolvedName { suggestions, .. } => {
                let diagnostic =
                    diagnostic.with_labels(vec![primary.with_message("not found in this scope")]);
                match suggestions.as_slice() {
                    [] => diagnostic,
                    [only] => diagnostic.with_notes(vec![format!("help: did you mean `{only}`?")]),
                    many => diagnostic.with_notes(vec![format!(
                        "help: similarly named items exist: {}",
                        many.iter()
                            .map(|name| format!("`{name}`"))
                            .collect::<Vec<_>>()
                            .join(", ")
                    )]),
                }
            }
            ResolutionErrorKind::DuplicateGenericParam { first, .. }
            | ResolutionErrorKind::DuplicateDefinition { first, .. } => {
                diagnostic.with_labels(secondary_if_sourced(
                    primary.with_message("redefined here"),
                    *first,
                    "first defined here",
                ))
            }
            ResolutionErrorKind::OuterItemBinding { declared, .. } => {
                diagnostic.with_labels(secondary_if_sourced(
                    primary.with_message("use of outer binding"),
                    *declared,
                    "declared here",
                ))
            }
            ResolutionErrorKind::VariableNotBoundInPattern { name } => diagnostic
                .with_labels(vec![primary.with_message("pattern doesn't bind it in every alternative")])
                .with_notes(vec![format!("every alternative must bind `{name}`")]),
            _ => diagnostic.with_labels(vec![primary]),
        }
    }
}

fn secondary_if_sourced(
    primary: Label<usize>,
    other: FileSpan,
    message: &str,
) -> Vec<Label<usize>> {
    if other.is_builtin() {
        vec![primary]
    } else {
        vec![
            primary,
            Label::secondary(other.file.0 as usize, other.range()).with_message(message),
        ]
    }
}

/// Whether `name` can be written as a plain identifier; excludes `!`
fn is_identifier(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
}

fn sorted_chars(name: &str) -> Vec<char> {
    let mut chars: Vec<char> = name.chars().collect();
    chars.sort_unstable();
    chars
}

/// Compute Levenshtein distance between two strings
fn levenshtein_distance(source: &str, target: &str) -> usize {
    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();

    if source.is_empty() {
        return target.len();
    }
    if target.is_empty() {
        return source.len();
    }

    let mut previous: Vec<usize> = (0..=target.len()).collect();
    let mut current = vec![0; target.len() + 1];

    for (idx, source_char) in source.iter().enumerate() {
        current[0] = idx + 1;
        for (jdx, target_char) in target.iter().enumerate() {
            let cost = usize::from(source_char != target_char);
            current[jdx + 1] = (previous[jdx + 1] + 1)
                .min(current[jdx] + 1)
                .min(previous[jdx] + cost);
        }
        mem::swap(&mut previous, &mut current);
    }

    previous[target.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use cv_span::{FileId, Span};

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", "def"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
        assert_eq!(levenshtein_distance("", "xyz"), 3);
    }

    #[test]
    fn test_suggestions_are_ranked_and_capped() {
        let interner = Interner::new();
        let names: Vec<Symbol> = ["amount", "count", "counted", "counter", "unrelated_name"]
            .iter()
            .map(|name| interner.intern(name))
            .collect();
        let options = ResolveOptions {
            max_suggestions: 2,
            ..ResolveOptions::default()
        };
        let suggestions =
            ResolutionError::compute_suggestions(interner.intern("countr"), &interner, &names, &options);
        assert_eq!(suggestions, vec!["count".to_string(), "counter".to_string()]);
    }

    #[test]
    fn test_short_names_get_a_tight_cutoff() {
        let interner = Interner::new();
        let names: Vec<Symbol> = ["!", "u8", "i8", "b", "abc"]
            .iter()
            .map(|name| interner.intern(name))
            .collect();
        let suggestions = ResolutionError::compute_suggestions(
            interner.intern("a"),
            &interner,
            &names,
            &ResolveOptions::default(),
        );
        assert_eq!(suggestions, vec!["b".to_string()]);
    }

    #[test]
    fn test_transposed_letters_are_suggested() {
        let interner = Interner::new();
        let names = vec![interner.intern("value"), interner.intern("values")];
        let suggestions = ResolutionError::compute_suggestions(
            interner.intern("valeu"),
            &interner,
            &names,
            &ResolveOptions::default(),
        );
        assert_eq!(suggestions, vec!["value".to_string()]);
    }

    #[test]
    fn test_suggestions_can_be_disabled() {
        let interner = Interner::new();
        let names = vec![interner.intern("value")];
        let options = ResolveOptions {
            suggest_similar_names: false,
            ..ResolveOptions::default()
        };
        assert!(
            ResolutionError::compute_suggestions(interner.intern("valeu"), &interner, &names, &options)
                .is_empty()
        );
    }

    #[test]
    fn test_codespan_diagnostic() {
        let span = FileSpan::new(FileId::new(0), Span::new(3, 8));
        let error = ResolutionError::new(
            ResolutionErrorKind::UnresolvedName {
                name: "valeu".to_string(),
                namespace: Namespace::Value,
                suggestions: vec!["value".to_string()],
            },
            span,
        );
        let diagnostic = error.to_codespan_diagnostic();
        assert_eq!(diagnostic.message, "cannot find value `valeu` in this scope");
        assert_eq!(diagnostic.labels.len(), 1);
        assert_eq!(diagnostic.labels[0].range, 3..8);
        assert_eq!(diagnostic.notes, vec!["help: did you mean `value`?".to_string()]);
    }

    #[test]
    fn test_builtin_first_definition_has_no_secondary_label() {
        let span = FileSpan::new(FileId::new(0), Span::new(0, 1));
        let error = ResolutionError::new(
            ResolutionErrorKind::DuplicateDefinition {
                name: "f".to_string(),
                namespace: Namespace::Value,
                first: FileSpan::BUILTIN,
            },
            span,
        );
        assert_eq!(error.to_codespan_diagnostic().labels.len(), 1);
        assert_eq!(
            error.to_string(),
            "the name `f` is defined multiple times in the value namespace at file#0@0..1"
        );
    }
}
