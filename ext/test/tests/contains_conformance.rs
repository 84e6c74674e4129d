//! Conformance tests that run the containment YAML fixtures.

use jsonshape_test::fixture::run_fixtures_in_dir;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
fn containment_fixtures() {
    run_fixtures_in_dir(&fixtures_dir().join("contains"));
}
