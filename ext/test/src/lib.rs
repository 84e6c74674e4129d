//! jsonshape-test: conformance fixtures for the jsonshape matcher
//!
//! Provides a YAML fixture model and runner for exercising the type and
//! containment matchers against a declarative corpus, plus small helpers
//! for building data trees in tests.
//!
//! # Example
//!
//! ```
//! use jsonshape_test::prelude::*;
//!
//! let data = json_value(r#"{"id": 1, "name": "davert"}"#);
//! assert_eq!(data.get("id"), Some(&Value::Int(1)));
//! ```

use jsonshape::Value;

pub mod fixture;

/// Decode a JSON literal into a [`Value`] tree.
///
/// # Panics
///
/// Panics on malformed JSON — this is a test helper; the input is authored
/// alongside the test.
#[must_use]
pub fn json_value(source: &str) -> Value {
    let decoded: serde_json::Value =
        serde_json::from_str(source).expect("test helper requires valid JSON");
    Value::from(decoded)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::fixture::{ContainsCase, Expect, Fixture, TypeCase};
    pub use super::json_value;
    pub use jsonshape::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_value_decodes_nested_trees() {
        let v = json_value(r#"{"a": [1, 2.5, "x", null, true]}"#);
        let items = v.get("a").unwrap().as_seq().unwrap();
        assert_eq!(items[0], Value::Int(1));
        assert_eq!(items[1], Value::Float(2.5));
        assert_eq!(items[2], Value::from("x"));
        assert_eq!(items[3], Value::Null);
        assert_eq!(items[4], Value::Bool(true));
    }

    #[test]
    #[should_panic(expected = "valid JSON")]
    fn json_value_rejects_garbage() {
        let _ = json_value("{not json");
    }
}
