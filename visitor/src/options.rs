//! Visitor configuration.

use std::fmt;

/// When the member table of a visitor is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingMode {
    /// Build the table the first time a member is enumerated or looked up.
    Lite,
    /// Build the table when the visitor is created.
    #[default]
    Normal,
}

/// What a visitor is bound to. Implied by the constructor used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A live instance.
    Instance,
    /// Values collected for an instance that does not exist yet.
    FutureInstance,
    /// No instance; only type-level members.
    StaticType,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetKind::Instance => "instance",
            TargetKind::FutureInstance => "future instance",
            TargetKind::StaticType => "static type",
        };
        f.write_str(name)
    }
}

/// Mode flags of a visitor session. Fixed once the visitor exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitorOptions {
    /// Member table loading.
    pub loading: LoadingMode,
    /// Validate each assignment before applying it.
    pub strict: bool,
    /// Record accepted assignments for replay.
    pub repeatable: bool,
}

impl Default for VisitorOptions {
    fn default() -> Self {
        Self {
            loading: LoadingMode::Normal,
            strict: false,
            repeatable: false,
        }
    }
}

impl VisitorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lazy member table, otherwise default.
    pub fn lite() -> Self {
        Self::default().with_loading(LoadingMode::Lite)
    }

    /// Strict validation, otherwise default.
    pub fn strict() -> Self {
        Self::default().with_strict(true)
    }

    /// History recording, otherwise default.
    pub fn repeatable() -> Self {
        Self::default().with_repeatable(true)
    }

    pub fn with_loading(mut self, loading: LoadingMode) -> Self {
        self.loading = loading;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_repeatable(mut self, repeatable: bool) -> Self {
        self.repeatable = repeatable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = VisitorOptions::new();
        assert_eq!(options.loading, LoadingMode::Normal);
        assert!(!options.strict);
        assert!(!options.repeatable);
    }

    #[test]
    fn test_presets_combine() {
        let options = VisitorOptions::strict()
            .with_repeatable(true)
            .with_loading(LoadingMode::Lite);

        assert!(options.strict);
        assert!(options.repeatable);
        assert_eq!(options.loading, LoadingMode::Lite);
        assert_eq!(VisitorOptions::lite().loading, LoadingMode::Lite);
        assert!(VisitorOptions::repeatable().repeatable);
    }
}
