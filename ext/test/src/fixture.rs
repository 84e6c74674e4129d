//! Conformance fixture runner
//!
//! Loads YAML fixtures and runs them against the matching engines. A fixture
//! file may hold several fixtures separated by `---`; each fixture carries
//! type-matcher cases (`cases`) and/or containment cases (`contains_cases`).
//!
//! Custom-filter behavior is covered by unit tests in the core crate —
//! predicates are closures and have no YAML representation.

use jsonshape::{contains, SpecNode, TypeMatcher, Value};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A complete conformance fixture.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cases: Vec<TypeCase>,
    #[serde(default)]
    pub contains_cases: Vec<ContainsCase>,
}

/// One type-matcher case: a specification applied to a data tree.
#[derive(Debug, Deserialize)]
pub struct TypeCase {
    pub name: String,
    pub spec: SpecNode,
    pub data: Value,
    pub expect: Expect,
    /// Substrings the diagnostic must contain (mismatch cases only).
    #[serde(default)]
    pub message_contains: Vec<String>,
}

/// Expected outcome of a type-matcher case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expect {
    Match,
    Mismatch,
}

/// One containment case: needle against haystack.
#[derive(Debug, Deserialize)]
pub struct ContainsCase {
    pub name: String,
    pub needle: Value,
    pub haystack: Value,
    pub expect: bool,
}

impl Fixture {
    /// Parse a single YAML document.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error for malformed fixtures — including
    /// malformed specification leaves, which must fail at load time.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse a YAML stream of one or more `---`-separated fixtures.
    ///
    /// # Errors
    ///
    /// Returns the first deserialization error in the stream.
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        serde_yaml::Deserializer::from_str(yaml)
            .map(Fixture::deserialize)
            .collect()
    }

    /// Run every case, panicking with a named diagnostic on the first
    /// deviation from the expected outcome.
    pub fn run_and_assert(&self) {
        let matcher = TypeMatcher::new();
        for case in &self.cases {
            let result = matcher.matches(&case.data, &case.spec);
            match case.expect {
                Expect::Match => {
                    assert!(
                        result.is_ok(),
                        "[{}] case `{}` expected match, got:\n{}",
                        self.name,
                        case.name,
                        result.err().map(|e| e.to_string()).unwrap_or_default(),
                    );
                }
                Expect::Mismatch => match result {
                    Ok(()) => panic!(
                        "[{}] case `{}` expected a mismatch, but it matched",
                        self.name, case.name
                    ),
                    Err(mismatch) => {
                        for needle in &case.message_contains {
                            assert!(
                                mismatch.message().contains(needle),
                                "[{}] case `{}` diagnostic\n  {}\ndoes not contain\n  {}",
                                self.name,
                                case.name,
                                mismatch.message(),
                                needle,
                            );
                        }
                    }
                },
            }
        }
        for case in &self.contains_cases {
            assert_eq!(
                contains(&case.needle, &case.haystack),
                case.expect,
                "[{}] containment case `{}`",
                self.name,
                case.name,
            );
        }
    }
}

/// Load and run every `*.yaml`/`*.yml` fixture in a directory.
///
/// # Panics
///
/// Panics if the directory is missing, a fixture fails to parse, or any
/// case deviates from its expected outcome.
pub fn run_fixtures_in_dir(dir: &Path) {
    assert!(
        dir.exists(),
        "fixtures directory does not exist: {}",
        dir.display()
    );

    let mut ran = 0usize;
    for entry in fs::read_dir(dir).expect("read fixtures dir") {
        let path = entry.expect("dir entry").path();
        if !path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            continue;
        }
        let yaml = fs::read_to_string(&path).expect("read fixture file");
        let fixtures = Fixture::from_yaml_multi(&yaml)
            .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()));
        for fixture in fixtures {
            fixture.run_and_assert();
            ran += 1;
        }
    }
    assert!(ran > 0, "no fixtures found in {}", dir.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_runs_an_inline_fixture() {
        let yaml = r#"
name: inline
description: smoke fixture
cases:
  - name: integer matches
    spec:
      id: integer
    data:
      id: 3
    expect: match
contains_cases:
  - name: subset key
    needle:
      a: 1
    haystack:
      a: 1
      b: 2
    expect: true
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        assert_eq!(fixture.name, "inline");
        assert_eq!(fixture.cases.len(), 1);
        assert_eq!(fixture.contains_cases.len(), 1);
        fixture.run_and_assert();
    }

    #[test]
    fn multi_document_streams_split() {
        let yaml = "name: one\ncases: []\n---\nname: two\ncases: []\n";
        let fixtures = Fixture::from_yaml_multi(yaml).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[1].name, "two");
    }

    #[test]
    fn malformed_spec_leaf_fails_to_parse() {
        let yaml = "name: bad\ncases:\n  - name: x\n    spec:\n      id: 42\n    data:\n      id: 1\n    expect: match\n";
        assert!(Fixture::from_yaml(yaml).is_err());
    }
}
