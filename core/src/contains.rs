//! Containment matching
//!
//! Decides whether a needle tree is structurally present inside a haystack
//! tree. The engine reconstructs the matched subtree bottom-up and the entry
//! point accepts only when the reconstruction equals the needle itself — a
//! partial reconstruction (fewer matched entries, a shorter matched
//! sub-sequence) is rejected.
//!
//! # Classification
//!
//! - [`Seq`](Value::Seq) vs `Seq` — sequence containment: each needle
//!   element claims the first not-yet-claimed haystack element it matches,
//!   in iteration order, with no backtracking. A haystack element satisfies
//!   at most one needle element. The first-fit policy is observable on
//!   ambiguous inputs and is preserved exactly.
//! - anything else between containers — associative containment over the
//!   intersection of keys (a sequence contributes its positional keys
//!   `"0"`, `"1"`, …). When the two sides share *no* keys, every top-level
//!   haystack value is searched recursively for a full reconstruction of
//!   the whole needle, which handles a needle nested anywhere inside a
//!   wrapper. Fewer kept entries than the smaller side's size means no
//!   match — that guards against accidental partial overlaps.
//!
//! # Scalar coercion
//!
//! At scalar leaves only, numeric values compare by canonical string form:
//! `1`, `1.0` and `"1"` are all equal, `"01"` is not. Keys and container
//! shape never coerce.

use crate::value::cast_float;
use crate::{Map, Value};

/// Containment matcher over a borrowed haystack.
///
/// # Example
///
/// ```
/// use jsonshape::{ContainsComparator, Map, Value};
///
/// let haystack: Value = [
///     ("id".to_string(), Value::Int(1)),
///     ("name".to_string(), Value::from("davert")),
/// ]
/// .into_iter()
/// .collect::<Map>()
/// .into();
///
/// let needle: Value = [("name".to_string(), Value::from("davert"))]
///     .into_iter()
///     .collect::<Map>()
///     .into();
///
/// assert!(ContainsComparator::new(&haystack).contains(&needle));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ContainsComparator<'a> {
    haystack: &'a Value,
}

impl<'a> ContainsComparator<'a> {
    /// Create a comparator for the given haystack.
    #[must_use]
    pub fn new(haystack: &'a Value) -> Self {
        Self { haystack }
    }

    /// Returns `true` iff `needle` is structurally contained in the
    /// haystack: the recursive intersection reconstructs the needle exactly.
    #[must_use]
    pub fn contains(&self, needle: &Value) -> bool {
        match intersect(needle, self.haystack) {
            Some(found) => found == *needle,
            None => false,
        }
    }
}

/// Free-function form of [`ContainsComparator::contains`].
#[must_use]
pub fn contains(needle: &Value, haystack: &Value) -> bool {
    ContainsComparator::new(haystack).contains(needle)
}

/// Recursive intersection. `None` when either side is a scalar (scalars are
/// compared by [`is_equal_value`] one level up) or the associative guard
/// rejects the overlap.
fn intersect(needle: &Value, haystack: &Value) -> Option<Value> {
    match (needle, haystack) {
        (Value::Seq(n), Value::Seq(h)) => Some(Value::Seq(sequential_intersect(n, h))),
        (n, h) if is_container(n) && is_container(h) => associative_intersect(n, h),
        _ => None,
    }
}

/// First-fit claimed matching of needle elements against haystack elements.
/// Returns the matched needle elements in needle order; unmatched elements
/// are simply absent, which the entry-point equality then rejects.
fn sequential_intersect(needle: &[Value], haystack: &[Value]) -> Vec<Value> {
    let mut claimed = vec![false; haystack.len()];
    let mut matched = Vec::new();
    for nv in needle {
        for (j, hv) in haystack.iter().enumerate() {
            if claimed[j] {
                continue;
            }
            if let Some(found) = intersect(nv, hv) {
                if found == *nv {
                    matched.push(found);
                    claimed[j] = true;
                    break;
                }
            }
            if is_equal_value(nv, hv) {
                matched.push(nv.clone());
                claimed[j] = true;
                break;
            }
        }
    }
    matched
}

fn associative_intersect(needle: &Value, haystack: &Value) -> Option<Value> {
    let common: Vec<String> = keys(needle)
        .into_iter()
        .filter(|key| lookup(haystack, key).is_some())
        .collect();

    let mut kept: Vec<(String, Value)> = Vec::new();
    for key in &common {
        let nv = lookup(needle, key)?;
        let hv = lookup(haystack, key)?;
        if let Some(found) = intersect(nv, hv) {
            kept.push((key.clone(), found));
            continue;
        }
        if is_equal_value(nv, hv) {
            kept.push((key.clone(), nv.clone()));
        }
    }

    if common.is_empty() {
        // the needle may be a wrapped fragment somewhere inside the haystack
        for hv in values(haystack) {
            if let Some(found) = intersect(needle, hv) {
                if !is_empty_container(&found) && found == *needle {
                    return Some(found);
                }
            }
        }
    }

    if kept.len() < container_len(needle).min(container_len(haystack)) {
        return None;
    }

    Some(rebuild(needle, kept))
}

/// Reassemble kept entries in the needle's shape so the entry-point equality
/// compares like against like.
fn rebuild(needle: &Value, kept: Vec<(String, Value)>) -> Value {
    match needle {
        Value::Seq(_) => Value::Seq(kept.into_iter().map(|(_, v)| v).collect()),
        _ => Value::Map(kept.into_iter().collect::<Map>()),
    }
}

fn is_container(v: &Value) -> bool {
    matches!(v, Value::Seq(_) | Value::Map(_))
}

fn is_empty_container(v: &Value) -> bool {
    match v {
        Value::Seq(items) => items.is_empty(),
        Value::Map(map) => map.is_empty(),
        _ => false,
    }
}

fn container_len(v: &Value) -> usize {
    match v {
        Value::Seq(items) => items.len(),
        Value::Map(map) => map.len(),
        _ => 0,
    }
}

fn keys(v: &Value) -> Vec<String> {
    match v {
        Value::Map(map) => map.keys().map(str::to_string).collect(),
        Value::Seq(items) => (0..items.len()).map(|i| i.to_string()).collect(),
        _ => Vec::new(),
    }
}

fn lookup<'v>(v: &'v Value, key: &str) -> Option<&'v Value> {
    match v {
        Value::Map(map) => map.get(key),
        Value::Seq(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn values(v: &Value) -> Vec<&Value> {
    match v {
        Value::Map(map) => map.values().collect(),
        Value::Seq(items) => items.iter().collect(),
        _ => Vec::new(),
    }
}

/// Scalar-leaf equality with numeric/string coercion: numbers (and strings
/// that parse as numbers) compare by canonical string form; everything else
/// compares strictly.
fn is_equal_value(a: &Value, b: &Value) -> bool {
    match (numeric_string(a), numeric_string(b)) {
        (Some(a), Some(b)) => a == b,
        (None, None) => a == b,
        _ => false,
    }
}

fn numeric_string(v: &Value) -> Option<String> {
    match v {
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(cast_float(*f)),
        Value::String(s) if s.parse::<f64>().is_ok() => Some(s.clone()),
        _ => None,
    }
}
