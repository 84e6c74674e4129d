//! `Value` — The decoded data tree both matchers walk
//!
//! A tagged union over the JSON-like scalar and container kinds. Values are
//! produced by the caller (decoded upstream, or converted from
//! `serde_json::Value` with the `json` feature) and borrowed read-only by
//! both matching engines.
//!
//! # Type tags
//!
//! Each value carries exactly one tag from a closed set, reported by
//! [`type_name()`](Value::type_name): `"null"`, `"boolean"`, `"integer"`,
//! `"float"`, `"string"`, `"array"`. Type expressions dispatch on these tags.
//! Both [`Seq`](Value::Seq) and [`Map`](Value::Map) report `"array"` — the
//! grammar has a single container type.

use crate::Map;
use std::fmt;
use std::fmt::Write as _;

/// A decoded JSON-like value.
///
/// # Example
///
/// ```
/// use jsonshape::Value;
///
/// let v = Value::from(3.5);
/// assert_eq!(v.type_name(), "float");
/// assert_eq!(v.as_float(), Some(3.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent/null value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer number.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// String.
    String(String),
    /// Ordered sequence of values.
    Seq(Vec<Value>),
    /// String-keyed mapping, insertion-ordered.
    Map(Map),
}

impl Value {
    /// The type tag this value matches under.
    ///
    /// Always one of `"null"`, `"boolean"`, `"integer"`, `"float"`,
    /// `"string"`, `"array"`. Floats always report `"float"` — the closed
    /// tag set has no separate `"double"` spelling.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Seq(_) | Self::Map(_) => "array",
        }
    }

    /// Returns `true` if this is `Null`.
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this is a boolean.
    #[inline]
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Returns `true` if this is an integer.
    #[inline]
    #[must_use]
    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// Returns `true` if this is a float.
    #[inline]
    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// Returns `true` if this is an integer or a float.
    #[inline]
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Returns `true` if this is a string.
    #[inline]
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Returns `true` if this is a sequence.
    #[inline]
    #[must_use]
    pub fn is_seq(&self) -> bool {
        matches!(self, Self::Seq(_))
    }

    /// Returns `true` if this is a mapping.
    #[inline]
    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Try to get the value as a boolean.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as an integer.
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get the value as a float. Integers widen losslessly.
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            #[allow(clippy::cast_precision_loss)]
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get the value as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to get the value as a sequence slice.
    #[inline]
    #[must_use]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Self::Seq(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Try to get the value as a mapping.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up `key` if this value is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// The string form filters operate on.
    ///
    /// Scalars coerce the way the source runtime casts to string: `Null` and
    /// `false` become the empty string, `true` becomes `"1"`, numbers render
    /// canonically (a float with zero fraction drops it: `1.0` → `"1"`).
    /// Containers render as their JSON text.
    #[must_use]
    pub fn filter_string(&self) -> String {
        match self {
            Self::Null | Self::Bool(false) => String::new(),
            Self::Bool(true) => "1".to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => cast_float(*f),
            Self::String(s) => s.clone(),
            Self::Seq(_) | Self::Map(_) => self.to_string(),
        }
    }
}

/// Canonical string cast for a float: drop a zero fraction so numeric
/// coercion agrees with the integer spelling (`1.0` and `1` both cast to
/// `"1"`).
pub(crate) fn cast_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
        #[allow(clippy::cast_possible_truncation)]
        let i = f as i64;
        i.to_string()
    } else {
        format!("{f}")
    }
}

fn write_json_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Compact JSON rendering. Diagnostics embed values through this impl.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) if !v.is_finite() => f.write_str("null"),
            Self::Float(v) if v.fract() == 0.0 => write!(f, "{v:.1}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write_json_string(f, s),
            Self::Seq(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Self::Map(map) => {
                f.write_char('{')?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_json_string(f, key)?;
                    f.write_char(':')?;
                    write!(f, "{value}")?;
                }
                f.write_char('}')
            }
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Seq(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Map(map)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::Value;
    use crate::Map;
    use serde::de::{MapAccess, SeqAccess, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Value::Null => serializer.serialize_unit(),
                Value::Bool(b) => serializer.serialize_bool(*b),
                Value::Int(i) => serializer.serialize_i64(*i),
                Value::Float(f) => serializer.serialize_f64(*f),
                Value::String(s) => serializer.serialize_str(s),
                Value::Seq(items) => serializer.collect_seq(items),
                Value::Map(map) => serializer.collect_map(map.iter()),
            }
        }
    }

    impl<'de> Deserialize<'de> for Value {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct ValueVisitor;

            impl<'de> Visitor<'de> for ValueVisitor {
                type Value = Value;

                fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    f.write_str("a JSON-like value")
                }

                fn visit_unit<E>(self) -> Result<Value, E> {
                    Ok(Value::Null)
                }

                fn visit_none<E>(self) -> Result<Value, E> {
                    Ok(Value::Null)
                }

                fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Value, D::Error> {
                    Value::deserialize(d)
                }

                fn visit_bool<E>(self, b: bool) -> Result<Value, E> {
                    Ok(Value::Bool(b))
                }

                fn visit_i64<E>(self, i: i64) -> Result<Value, E> {
                    Ok(Value::Int(i))
                }

                fn visit_u64<E>(self, u: u64) -> Result<Value, E> {
                    #[allow(clippy::cast_precision_loss)]
                    match i64::try_from(u) {
                        Ok(i) => Ok(Value::Int(i)),
                        Err(_) => Ok(Value::Float(u as f64)),
                    }
                }

                fn visit_f64<E>(self, f: f64) -> Result<Value, E> {
                    Ok(Value::Float(f))
                }

                fn visit_str<E>(self, s: &str) -> Result<Value, E> {
                    Ok(Value::String(s.to_string()))
                }

                fn visit_string<E>(self, s: String) -> Result<Value, E> {
                    Ok(Value::String(s))
                }

                fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
                    let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));
                    while let Some(item) = access.next_element()? {
                        items.push(item);
                    }
                    Ok(Value::Seq(items))
                }

                fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
                    let mut map = Map::with_capacity(access.size_hint().unwrap_or(0));
                    while let Some((key, value)) = access.next_entry::<String, Value>()? {
                        map.insert(key, value);
                    }
                    Ok(Value::Map(map))
                }
            }

            deserializer.deserialize_any(ValueVisitor)
        }
    }
}

#[cfg(feature = "json")]
mod json_impls {
    use super::Value;
    use crate::Map;

    impl From<serde_json::Value> for Value {
        fn from(v: serde_json::Value) -> Self {
            match v {
                serde_json::Value::Null => Value::Null,
                serde_json::Value::Bool(b) => Value::Bool(b),
                serde_json::Value::Number(n) => n.as_i64().map_or_else(
                    || Value::Float(n.as_f64().unwrap_or(f64::NAN)),
                    Value::Int,
                ),
                serde_json::Value::String(s) => Value::String(s),
                serde_json::Value::Array(items) => {
                    Value::Seq(items.into_iter().map(Value::from).collect())
                }
                serde_json::Value::Object(entries) => Value::Map(
                    entries
                        .into_iter()
                        .map(|(k, v)| (k, Value::from(v)))
                        .collect::<Map>(),
                ),
            }
        }
    }

    impl From<Value> for serde_json::Value {
        fn from(v: Value) -> Self {
            match v {
                Value::Null => serde_json::Value::Null,
                Value::Bool(b) => serde_json::Value::Bool(b),
                Value::Int(i) => serde_json::Value::from(i),
                Value::Float(f) => serde_json::Number::from_f64(f)
                    .map_or(serde_json::Value::Null, serde_json::Value::Number),
                Value::String(s) => serde_json::Value::String(s),
                Value::Seq(items) => {
                    serde_json::Value::Array(items.into_iter().map(Into::into).collect())
                }
                Value::Map(map) => serde_json::Value::Object(
                    map.into_iter()
                        .map(|(k, v)| (k, serde_json::Value::from(v)))
                        .collect(),
                ),
            }
        }
    }
}
