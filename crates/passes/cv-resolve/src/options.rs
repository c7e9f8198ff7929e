//! Resolver configuration

use serde::Deserialize;

/// Errors from loading [`ResolveOptions`]
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    /// The TOML text could not be parsed into options
    #[error("invalid resolver options: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Knobs for the resolution pass
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolveOptions {
    /// Attach "did you mean" suggestions to unresolved names
    pub suggest_similar_names: bool,
    /// Upper bound on suggestions per error
    pub max_suggestions: usize,
    /// Largest edit distance a suggestion may have
    pub max_suggestion_distance: usize,
    /// Report unlabeled `break`/`continue` outside loops and `continue` to labeled blocks
    pub check_loop_control: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            suggest_similar_names: true,
            max_suggestions: 3,
            max_suggestion_distance: 3,
            check_loop_control: true,
        }
    }
}

impl ResolveOptions {
    /// Parse options from TOML; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Toml`] for malformed TOML, unknown keys or
    /// values of the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let options = ResolveOptions::from_toml_str("").unwrap();
        assert_eq!(options, ResolveOptions::default());
    }

    #[test]
    fn test_partial_toml() {
        let options = ResolveOptions::from_toml_str(
            "suggest_similar_names = false\nmax_suggestions = 1\n",
        )
        .unwrap();
        assert!(!options.suggest_similar_names);
        assert_eq!(options.max_suggestions, 1);
        assert_eq!(options.max_suggestion_distance, 3);
        assert!(options.check_loop_control);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = ResolveOptions::from_toml_str("colour = true").unwrap_err();
        assert!(err.to_string().starts_with("invalid resolver options"));
    }
}
