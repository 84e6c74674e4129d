//! `TypeMatcher` — Evaluates specification trees against data trees
//!
//! One structural pass walks the specification in author order and checks
//! each described field: presence first, then type, then filters. Failures
//! are returned as [`Mismatch`] values, never panicked — the caller decides
//! whether a mismatch becomes a test failure, and collection matching needs
//! to aggregate several of them.
//!
//! # Alternation is asymmetric
//!
//! Alternatives are tried left to right, and the *first* alternative whose
//! type name equals the value's type tag decides the field — its filter
//! result is final, and later alternatives are never consulted, even when
//! those filters fail. `'test' => null` against `string:regex(...)|integer`
//! does not match (no alternative is `null`-typed); against
//! `integer|null|string:regex(...)` it matches via the `null` alternative.
//! This ordering dependence is long-standing observable behavior and is
//! preserved exactly.

use crate::type_expr::TypeExpr;
use crate::{filter, FilterRegistry, Map, SpecNode, Value};
use std::error::Error;
use std::fmt;

/// A failed match: which field, its actual value, the expected expression.
///
/// Returned — never panicked — so callers can aggregate failures across a
/// collection before deciding what to do (spec mismatches are expected
/// behavior, not errors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    message: String,
}

impl Mismatch {
    fn new(message: String) -> Self {
        Self { message }
    }

    /// The human-readable diagnostic. One line per failed field.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Mismatch {}

/// The type-expression matching engine.
///
/// Holds the custom [`FilterRegistry`]; construct one per test run and
/// inject the registry the run needs.
///
/// # Example
///
/// ```
/// use jsonshape::{Map, SpecNode, TypeMatcher, Value};
///
/// let data: Value = [
///     ("id".to_string(), Value::Int(11)),
///     ("name".to_string(), Value::from("davert")),
/// ]
/// .into_iter()
/// .collect::<Map>()
/// .into();
///
/// let spec: SpecNode = [
///     ("id".to_string(), SpecNode::from("integer:>5:<12")),
///     ("name".to_string(), SpecNode::from("string")),
/// ]
/// .into_iter()
/// .collect::<Map<SpecNode>>()
/// .into();
///
/// let matcher = TypeMatcher::new();
/// assert!(matcher.matches(&data, &spec).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeMatcher {
    filters: FilterRegistry,
}

impl TypeMatcher {
    /// Create a matcher with an empty custom filter registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with the given custom filter registry.
    #[must_use]
    pub fn with_filters(filters: FilterRegistry) -> Self {
        Self { filters }
    }

    /// The custom filter registry.
    #[must_use]
    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    /// Mutable access to the custom filter registry.
    pub fn filters_mut(&mut self) -> &mut FilterRegistry {
        &mut self.filters
    }

    /// Match `data` against a specification.
    ///
    /// A sequence whose first element is a mapping is a collection of
    /// records: the specification is applied to *every* element and all
    /// failing diagnostics are aggregated, one per line. Anything else is
    /// matched as a single mapping.
    ///
    /// # Errors
    ///
    /// Returns a [`Mismatch`] naming the first offending field (or, for
    /// collections, every offending element).
    ///
    /// # Panics
    ///
    /// Panics if the specification root is a leaf expression rather than a
    /// mapping — a contract violation by the specification author, not a
    /// data mismatch.
    pub fn matches(&self, data: &Value, spec: &SpecNode) -> Result<(), Mismatch> {
        let spec = match spec {
            SpecNode::Object(map) => map,
            SpecNode::Type(expr) => {
                panic!("specification root must be a mapping, got expression `{expr}`")
            }
        };
        if let Value::Seq(items) = data {
            if items.first().is_some_and(Value::is_map) {
                let failures: Vec<String> = items
                    .iter()
                    .filter_map(|item| self.type_comparison(item, spec).err())
                    .collect();
                return if failures.is_empty() {
                    Ok(())
                } else {
                    Err(Mismatch::new(failures.join("\n")))
                };
            }
        }
        self.type_comparison(data, spec).map_err(Mismatch::new)
    }

    /// Evaluate one filter against a value's string form.
    ///
    /// Leading `!` negates the rest. Custom registry entries are consulted
    /// before built-ins, in registration order, so they may shadow any
    /// built-in spelling; a filter nothing claims is `false`.
    #[must_use]
    pub fn match_filter(&self, filter: &str, value: &str) -> bool {
        let filter = filter.trim();
        if let Some(rest) = filter.strip_prefix('!') {
            return !self.match_filter(rest, value);
        }
        if let Some(result) = self.filters.apply(filter, value) {
            return result;
        }
        filter::match_builtin(filter, value)
    }

    fn type_comparison(&self, data: &Value, spec: &Map<SpecNode>) -> Result<(), String> {
        for (key, node) in spec {
            let Some(value) = data.get(key) else {
                return Err(format!("Key `{key}` doesn't exist in {data}"));
            };
            match node {
                SpecNode::Object(nested) => self.type_comparison(value, nested)?,
                SpecNode::Type(expr) => self.leaf_comparison(key, value, expr)?,
            }
        }
        Ok(())
    }

    fn leaf_comparison(&self, key: &str, value: &Value, expr: &str) -> Result<(), String> {
        let parsed = TypeExpr::parse(expr);
        let actual = value.type_name();
        for alternative in &parsed.alternatives {
            if alternative.type_name != actual {
                continue;
            }
            let string_form = value.filter_string();
            if alternative
                .filters
                .iter()
                .all(|f| self.match_filter(f, &string_form))
            {
                return Ok(());
            }
            // first type-name match decides the field; no fallthrough
            break;
        }
        Err(format!("`{key}: {value}` is of type `{expr}`"))
    }
}
