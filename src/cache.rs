use std::{
    collections::HashMap,
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
};

use serde::Serialize;
use tracing::{debug, info};

use crate::{compute_normalized, config::EngineConfig, error::EvalError};

/// Removes every whitespace character from an expression.
///
/// This is the only normalization applied to cache keys: case, digits and
/// numeric formatting are kept verbatim, so `2+3` and `2 + 3` share a key
/// while `2.0+3` does not.
///
/// # Example
/// ```
/// use memocalc::cache::normalize;
///
/// assert_eq!(normalize(" 2 +\t3 * 4\n"), "2+3*4");
/// ```
#[must_use]
pub fn normalize(expression: &str) -> String {
    expression.chars().filter(|c| !c.is_whitespace()).collect()
}

/// A snapshot of cache usage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    /// Requests answered from the cache.
    pub hits:     u64,
    /// Requests that ran the pipeline, successful or not.
    pub misses:   u64,
    /// `hits + misses`.
    pub total:    u64,
    /// `hits / total * 100`, or `0` before the first request.
    pub hit_rate: f64,
    /// Number of stored results.
    pub entries:  usize,
}

impl fmt::Display for CacheStats {
    /// Multi-line report, one counter per line, without a trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cache statistics:")?;
        writeln!(f, "  hits:     {}", self.hits)?;
        writeln!(f, "  misses:   {}", self.misses)?;
        writeln!(f, "  total:    {}", self.total)?;
        writeln!(f, "  hit rate: {:.2}%", self.hit_rate)?;
        write!(f, "  entries:  {}", self.entries)
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, f64>,
    hits:    u64,
    misses:  u64,
}

/// Memoizing front end of the evaluation pipeline.
///
/// Results are keyed by the [`normalize`]d expression and kept until
/// [`ExpressionCache::clear`]; there is no eviction. Failed evaluations are
/// never stored, so an invalid expression is re-parsed (and re-reported) on
/// every call.
///
/// The table and both counters sit behind a single lock that is held for a
/// whole lookup-compute-store sequence, so the cache can be shared between
/// threads through an `Arc` without a `clear` ever interleaving with a
/// read-then-write pair.
///
/// # Example
/// ```
/// use memocalc::cache::ExpressionCache;
///
/// let cache = ExpressionCache::new();
/// assert_eq!(cache.evaluate("2+3*4").unwrap(), 14.0);
/// assert_eq!(cache.evaluate(" 2 + 3 * 4 ").unwrap(), 14.0);
///
/// let stats = cache.stats();
/// assert_eq!((stats.hits, stats.misses), (1, 1));
/// assert_eq!(stats.hit_rate, 50.0);
/// ```
#[derive(Debug, Default)]
pub struct ExpressionCache {
    config: EngineConfig,
    state:  Mutex<CacheState>,
}

impl ExpressionCache {
    /// Creates an empty cache with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache that evaluates with `config`.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config,
               state: Mutex::default() }
    }

    /// Returns the configuration this cache evaluates with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluates an expression, answering from the cache when possible.
    ///
    /// Exactly one of the hit and miss counters moves per call. On a hit the
    /// stored value is returned without lexing or parsing. On a miss the
    /// full pipeline runs and a successful result is stored.
    ///
    /// # Errors
    /// Returns the [`EvalError`] of whichever stage failed; nothing is
    /// stored in that case.
    pub fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        let key = normalize(expression);
        let mut state = self.lock();

        if self.config.caching
           && let Some(&value) = state.entries.get(&key)
        {
            state.hits += 1;
            debug!(expression = %key, value, "cache hit");
            return Ok(value);
        }

        state.misses += 1;
        debug!(expression = %key, "cache miss");

        let value = compute_normalized(&key, &self.config)?;

        if self.config.caching {
            debug!(expression = %key, value, "storing result");
            state.entries.insert(key, value);
        }

        Ok(value)
    }

    /// Returns the current hit/miss counters and entry count.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        let total = state.hits + state.misses;
        let hit_rate = if total > 0 {
            state.hits as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        CacheStats { hits: state.hits,
                     misses: state.misses,
                     total,
                     hit_rate,
                     entries: state.entries.len() }
    }

    /// Removes every stored result. The counters keep their lifetime
    /// totals; see [`ExpressionCache::reset_stats`].
    pub fn clear(&self) {
        let mut state = self.lock();
        let removed = state.entries.len();
        state.entries.clear();
        info!(removed, "expression cache cleared");
    }

    /// Zeroes the hit and miss counters without touching stored results.
    pub fn reset_stats(&self) {
        let mut state = self.lock();
        state.hits = 0;
        state.misses = 0;
        info!("expression cache statistics reset");
    }

    /// Number of stored results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a result for `expression` (after normalization) is stored.
    /// Does not count as a request.
    #[must_use]
    pub fn contains(&self, expression: &str) -> bool {
        self.lock().entries.contains_key(&normalize(expression))
    }

    /// The stored normalized expressions and their values, sorted by key.
    #[must_use]
    pub fn cached_expressions(&self) -> Vec<(String, f64)> {
        let mut entries: Vec<(String, f64)> = self.lock()
                                                  .entries
                                                  .iter()
                                                  .map(|(key, value)| (key.clone(), *value))
                                                  .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // The state has no cross-field invariant a panic could break.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ParseError};

    #[test]
    fn hit_after_whitespace_change() {
        let cache = ExpressionCache::new();
        assert_eq!(cache.evaluate("2+3*4"), Ok(14.0));
        assert_eq!(cache.evaluate(" 2 + 3 * 4 "), Ok(14.0));

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn formatting_is_part_of_the_key() {
        let cache = ExpressionCache::new();
        cache.evaluate("2+3").unwrap();
        cache.evaluate("2.0+3").unwrap();
        assert_eq!(cache.stats().misses, 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failures_are_never_stored() {
        let cache = ExpressionCache::new();
        for _ in 0..3 {
            let err = cache.evaluate("2+").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Syntax);
            assert!(matches!(err, EvalError::Parse(ParseError::MissingOperand { .. })));
        }

        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (0, 3));
        assert!(cache.is_empty());
        assert!(!cache.contains("2+"));
    }

    #[test]
    fn clear_keeps_counters() {
        let cache = ExpressionCache::new();
        cache.evaluate("1+1").unwrap();
        cache.evaluate("1+1").unwrap();
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 1);

        cache.evaluate("1+1").unwrap();
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (1, 2));
    }

    #[test]
    fn reset_stats_keeps_entries() {
        let cache = ExpressionCache::new();
        cache.evaluate("6/3").unwrap();
        cache.reset_stats();

        assert_eq!(cache.stats().total, 0);
        assert!(cache.contains(" 6 / 3 "));
    }

    #[test]
    fn stats_report() {
        let cache = ExpressionCache::new();
        cache.evaluate("1+1").unwrap();
        cache.evaluate("1 + 1").unwrap();
        cache.evaluate("1+2").unwrap();

        assert_eq!(cache.stats().to_string(),
                   "Cache statistics:\n  \
                    hits:     1\n  \
                    misses:   2\n  \
                    total:    3\n  \
                    hit rate: 33.33%\n  \
                    entries:  2");
    }

    #[test]
    fn empty_stats() {
        let stats = ExpressionCache::new().stats();
        assert_eq!(stats.total, 0);
        assert!(stats.hit_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn disabled_cache_always_misses() {
        let cache = ExpressionCache::with_config(EngineConfig::default().without_cache());
        cache.evaluate("1+2").unwrap();
        cache.evaluate("1+2").unwrap();

        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.entries), (0, 2, 0));
    }

    #[test]
    fn cached_expressions_are_sorted() {
        let cache = ExpressionCache::new();
        cache.evaluate("3*3").unwrap();
        cache.evaluate("1 + 1").unwrap();
        assert_eq!(cache.cached_expressions(),
                   vec![("1+1".to_string(), 2.0), ("3*3".to_string(), 9.0)]);
    }
}
