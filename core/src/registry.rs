//! `FilterRegistry` — Caller-owned custom filter registry
//!
//! Custom filters extend the expression grammar with project-specific
//! predicates. The registry is an explicit object owned by the caller and
//! injected into [`TypeMatcher`](crate::TypeMatcher) at construction —
//! created once, injected per test run, cleared between runs — so no state
//! leaks across runs behind the caller's back.
//!
//! # Entry kinds
//!
//! - **Exact-named** — key like `"slug"`, matched by whole-string equality
//!   against the filter body; the predicate receives no extra args.
//! - **Pattern-named** — key starting with `/`, a delimited regex matched
//!   against the raw filter body; captured groups are forwarded to the
//!   predicate as positional args (`"/len\((\d+)\)/"` matches `len(5)` and
//!   forwards `["5"]`).
//!
//! Lookup walks entries in registration order; the first hit wins. A filter
//! that hits no entry falls through to the built-ins — absence is not an
//! error.

use crate::{pattern, MatcherError};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// A custom filter predicate: `(value, args) -> bool`.
///
/// `value` is the string form of the field under test; `args` are the
/// captured groups of a pattern-named entry (empty for exact-named entries).
/// Predicates are `Send + Sync` behind `Arc` so registries clone cheaply and
/// can be shared across threads.
pub type FilterFn = Arc<dyn Fn(&str, &[String]) -> bool + Send + Sync>;

#[derive(Clone)]
enum FilterKey {
    Exact(String),
    Pattern { raw: String, regex: Regex },
}

#[derive(Clone)]
struct Entry {
    key: FilterKey,
    filter: FilterFn,
}

/// Ordered collection of custom filters.
///
/// # Example
///
/// ```
/// use jsonshape::FilterRegistry;
///
/// let mut filters = FilterRegistry::new();
/// filters
///     .register("slug", |value, _args| !value.contains(' '))
///     .unwrap();
/// assert_eq!(filters.len(), 1);
/// filters.clear();
/// assert!(filters.is_empty());
/// ```
#[derive(Clone, Default)]
pub struct FilterRegistry {
    entries: Vec<Entry>,
}

impl FilterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filter under an exact name or a `/pattern/` key.
    ///
    /// Re-registering a key does not replace the earlier entry; the earlier
    /// registration keeps winning lookups (first hit in registration order).
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::InvalidPattern`] when a `/pattern/` key fails
    /// to compile — a load-time authoring error, caught at registration.
    pub fn register<F>(
        &mut self,
        name_or_pattern: impl Into<String>,
        filter: F,
    ) -> Result<(), MatcherError>
    where
        F: Fn(&str, &[String]) -> bool + Send + Sync + 'static,
    {
        let key = name_or_pattern.into();
        let key = if key.starts_with('/') {
            let regex =
                pattern::compile_delimited(&key).map_err(|e| MatcherError::InvalidPattern {
                    pattern: key.clone(),
                    source: e.to_string(),
                })?;
            FilterKey::Pattern { raw: key, regex }
        } else {
            FilterKey::Exact(key)
        };
        self.entries.push(Entry {
            key,
            filter: Arc::new(filter),
        });
        Ok(())
    }

    /// Remove every registered filter.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of registered filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no filters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up and evaluate the first entry matching `filter`.
    ///
    /// `None` means no entry claimed the filter and built-ins should be
    /// consulted.
    pub(crate) fn apply(&self, filter: &str, value: &str) -> Option<bool> {
        for entry in &self.entries {
            match &entry.key {
                FilterKey::Pattern { regex, .. } => {
                    if let Some(caps) = regex.captures(filter) {
                        let args: Vec<String> = caps
                            .iter()
                            .skip(1)
                            .flatten()
                            .map(|m| m.as_str().to_string())
                            .collect();
                        return Some((entry.filter)(value, &args));
                    }
                }
                FilterKey::Exact(name) => {
                    if name == filter {
                        return Some((entry.filter)(value, &[]));
                    }
                }
            }
        }
        None
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys = self.entries.iter().map(|e| match &e.key {
            FilterKey::Exact(name) => name.as_str(),
            FilterKey::Pattern { raw, .. } => raw.as_str(),
        });
        f.debug_list().entries(keys).finish()
    }
}
