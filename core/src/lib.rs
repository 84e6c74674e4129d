//! jsonshape - structural/type matching for JSON-like trees
//!
//! Validates decoded API/service responses against declarative contracts.
//! Two independent engines share one data model:
//!
//! - [`TypeMatcher`] — per-field type expressions (`"integer:>5:<12"`,
//!   `"string:url|null"`) evaluated against a data tree, returning success
//!   or a diagnostic naming the offending field, its actual value, and the
//!   expected expression.
//! - [`ContainsComparator`] — recursive needle-in-haystack tree containment
//!   with first-fit sequence matching and numeric/string-coerced scalar
//!   equality.
//!
//! # Architecture
//!
//! - [`Value`] — tagged union for decoded trees (null/bool/int/float/string/
//!   sequence/mapping), borrowed read-only by both engines
//! - [`Map`] — insertion-ordered string-keyed map (data and specs walk in
//!   author order)
//! - [`SpecNode`] — specification tree: type-expression leaves, nested
//!   objects
//! - [`FilterRegistry`] — caller-owned custom filters, injected into
//!   [`TypeMatcher`] at construction
//!
//! The engines never parse raw JSON bytes — decoding is the caller's job
//! (enable the `json` feature for `serde_json::Value` conversions, `serde`
//! for deserializing [`Value`]/[`SpecNode`] from any format).
//!
//! # Example
//!
//! ```
//! use jsonshape::{Map, SpecNode, TypeMatcher, Value};
//!
//! let data: Value = [
//!     ("id".to_string(), Value::Int(11)),
//!     ("link".to_string(), Value::from("http://example.com/")),
//! ]
//! .into_iter()
//! .collect::<Map>()
//! .into();
//!
//! let spec: SpecNode = [
//!     ("id".to_string(), SpecNode::from("integer:>5:<12")),
//!     ("link".to_string(), SpecNode::from("string:url")),
//! ]
//! .into_iter()
//! .collect::<Map<SpecNode>>()
//! .into();
//!
//! let matcher = TypeMatcher::new();
//! assert!(matcher.matches(&data, &spec).is_ok());
//! ```
//!
//! # Expression grammar
//!
//! ```text
//! Expr   := Alt ('|' Alt)*
//! Alt    := TypeName (':' Filter)*
//! Filter := ['!'] FilterBody
//! ```
//!
//! Type names come from the closed tag set (`integer`, `float`, `string`,
//! `boolean`, `array`, `null`). Alternation is left-to-right and the first
//! alternative whose type name matches the value decides the field — see
//! [`TypeMatcher`] for the exact (asymmetric) semantics. Filters include
//! `=literal`, `url`, `date`, `email`, `empty`, `regex(...)` with
//! source-style delimiters, and the comparison operators `>=` `<=` `>` `<`.

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod contains;
mod filter;
mod map;
mod matcher;
mod pattern;
mod registry;
mod spec;
mod type_expr;
mod value;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use contains::{contains, ContainsComparator};
pub use map::Map;
pub use matcher::{Mismatch, TypeMatcher};
pub use registry::{FilterFn, FilterRegistry};
pub use spec::SpecNode;
pub use value::Value;

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use jsonshape::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        contains, ContainsComparator, FilterRegistry, Map, MatcherError, Mismatch, SpecNode,
        TypeMatcher, Value,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from matcher and registry construction.
///
/// These errors are caught when contracts and filters are loaded, not at
/// match time. Data mismatches are not errors — they are [`Mismatch`]
/// values returned by [`TypeMatcher::matches`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatcherError {
    /// A `/pattern/` registry key failed to compile.
    InvalidPattern {
        /// The pattern key that failed to compile.
        pattern: String,
        /// The underlying error message.
        source: String,
    },
}

impl std::fmt::Display for MatcherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid filter pattern \"{pattern}\": {source}")
            }
        }
    }
}

impl std::error::Error for MatcherError {}
