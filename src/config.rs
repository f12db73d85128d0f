use crate::interpreter::{
    lexer::InvalidCharacterPolicy,
    parser::core::{MAX_NESTING, Strategy},
};

/// Settings shared by every evaluation an engine performs.
///
/// `EngineConfig` is a small `Copy` value built once and handed to
/// [`crate::cache::ExpressionCache::with_config`] or [`crate::compute`].
///
/// # Example
/// ```
/// use memocalc::{
///     config::EngineConfig,
///     interpreter::{lexer::InvalidCharacterPolicy, parser::core::Strategy},
/// };
///
/// let config = EngineConfig::default().with_strategy(Strategy::ShuntingYard)
///                                     .with_invalid_characters(InvalidCharacterPolicy::Collect)
///                                     .without_cache();
/// assert_eq!(config.strategy, Strategy::ShuntingYard);
/// assert!(!config.caching);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Parsing algorithm.
    pub strategy:           Strategy,
    /// How invalid characters are reported.
    pub invalid_characters: InvalidCharacterPolicy,
    /// Whether successful results are memoized.
    pub caching:            bool,
    /// Maximum depth of parentheses and prefix signs.
    pub max_nesting:        usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { strategy:           Strategy::default(),
               invalid_characters: InvalidCharacterPolicy::default(),
               caching:            true,
               max_nesting:        MAX_NESTING, }
    }
}

impl EngineConfig {
    #[must_use]
    pub const fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub const fn with_invalid_characters(mut self, policy: InvalidCharacterPolicy) -> Self {
        self.invalid_characters = policy;
        self
    }

    /// Turns memoization off: every request is a miss and nothing is stored.
    #[must_use]
    pub const fn without_cache(mut self) -> Self {
        self.caching = false;
        self
    }

    #[must_use]
    pub const fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }
}
