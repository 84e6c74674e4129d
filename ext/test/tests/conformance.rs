//! Conformance tests that run the type-matcher YAML fixtures.

use jsonshape_test::fixture::run_fixtures_in_dir;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
fn type_matcher_fixtures() {
    run_fixtures_in_dir(&fixtures_dir().join("type"));
}
