//! `SpecNode` — The specification tree a data tree is matched against
//!
//! A specification is a tree isomorphic to the subset of the data it
//! constrains: leaves are type expressions (see [`TypeMatcher`]), internal
//! nodes are nested specifications for sub-mappings.
//!
//! The typed tree makes malformed leaves (numbers, booleans) unrepresentable
//! in code; when specifications are loaded from YAML/JSON (feature `serde`),
//! a malformed leaf is a deserialization error — specifications are authored
//! by the test author, so that failure is fatal at load time, not a runtime
//! diagnostic.
//!
//! [`TypeMatcher`]: crate::TypeMatcher

use crate::Map;

/// One node of a specification tree.
///
/// # Example
///
/// ```
/// use jsonshape::{Map, SpecNode};
///
/// let spec: SpecNode = [
///     ("id".to_string(), SpecNode::from("integer:>0")),
///     ("name".to_string(), SpecNode::from("string")),
/// ]
/// .into_iter()
/// .collect::<Map<SpecNode>>()
/// .into();
///
/// assert!(spec.as_object().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SpecNode {
    /// Leaf: a type expression such as `"string:url|null"`.
    Type(String),
    /// Internal node: a nested specification for a sub-mapping.
    Object(Map<SpecNode>),
}

impl SpecNode {
    /// Try to get this node as a leaf expression.
    #[must_use]
    pub fn as_type(&self) -> Option<&str> {
        match self {
            Self::Type(expr) => Some(expr.as_str()),
            Self::Object(_) => None,
        }
    }

    /// Try to get this node as a nested specification.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map<SpecNode>> {
        match self {
            Self::Object(map) => Some(map),
            Self::Type(_) => None,
        }
    }
}

impl From<&str> for SpecNode {
    fn from(expr: &str) -> Self {
        Self::Type(expr.to_string())
    }
}

impl From<String> for SpecNode {
    fn from(expr: String) -> Self {
        Self::Type(expr)
    }
}

impl From<Map<SpecNode>> for SpecNode {
    fn from(map: Map<SpecNode>) -> Self {
        Self::Object(map)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::SpecNode;
    use crate::Map;
    use serde::de::{MapAccess, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    impl Serialize for SpecNode {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                SpecNode::Type(expr) => serializer.serialize_str(expr),
                SpecNode::Object(map) => serializer.collect_map(map.iter()),
            }
        }
    }

    impl<'de> Deserialize<'de> for SpecNode {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct SpecVisitor;

            impl<'de> Visitor<'de> for SpecVisitor {
                type Value = SpecNode;

                fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    f.write_str("a type expression string or a nested specification map")
                }

                fn visit_str<E>(self, s: &str) -> Result<SpecNode, E> {
                    Ok(SpecNode::Type(s.to_string()))
                }

                fn visit_string<E>(self, s: String) -> Result<SpecNode, E> {
                    Ok(SpecNode::Type(s))
                }

                fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SpecNode, A::Error> {
                    let mut map = Map::with_capacity(access.size_hint().unwrap_or(0));
                    while let Some((key, value)) = access.next_entry::<String, SpecNode>()? {
                        map.insert(key, value);
                    }
                    Ok(SpecNode::Object(map))
                }
            }

            deserializer.deserialize_any(SpecVisitor)
        }
    }
}
