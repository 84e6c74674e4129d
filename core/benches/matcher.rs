//! Matcher benchmarks — the hot paths.
//!
//! Measures: leaf expression evaluation (including regex-bearing
//! expressions, which re-split per call), collection matching over a list of
//! records, and containment over nested trees.

use jsonshape::{contains, Map, SpecNode, TypeMatcher, Value};

fn main() {
    divan::main();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════════════════

fn obj(entries: Vec<(&str, Value)>) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}

fn spec(entries: Vec<(&str, &str)>) -> SpecNode {
    SpecNode::Object(
        entries
            .into_iter()
            .map(|(k, e)| (k.to_string(), SpecNode::from(e)))
            .collect::<Map<SpecNode>>(),
    )
}

fn record(id: i64) -> Value {
    obj(vec![
        ("id", Value::Int(id)),
        ("name", Value::from("user")),
        ("link", Value::from("http://example.com/")),
    ])
}

fn record_spec() -> SpecNode {
    spec(vec![
        ("id", "integer:>0"),
        ("name", "string:!empty"),
        ("link", "string:url"),
    ])
}

// ═══════════════════════════════════════════════════════════════════════════════
// Type matcher
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench]
fn match_flat_record(bencher: divan::Bencher) {
    let matcher = TypeMatcher::new();
    let data = record(7);
    let spec = record_spec();
    bencher.bench_local(|| matcher.matches(divan::black_box(&data), divan::black_box(&spec)));
}

#[divan::bench]
fn match_regex_expression(bencher: divan::Bencher) {
    let matcher = TypeMatcher::new();
    let data = obj(vec![("slug", Value::from("have-a-test"))]);
    let spec = spec(vec![("slug", "string:regex(~^[a-z-]+$~)")]);
    bencher.bench_local(|| matcher.matches(divan::black_box(&data), divan::black_box(&spec)));
}

#[divan::bench]
fn match_alternation_miss_heavy(bencher: divan::Bencher) {
    let matcher = TypeMatcher::new();
    let data = obj(vec![("v", Value::Null)]);
    let spec = spec(vec![("v", "integer|float|boolean|string|null")]);
    bencher.bench_local(|| matcher.matches(divan::black_box(&data), divan::black_box(&spec)));
}

#[divan::bench]
fn match_collection_100(bencher: divan::Bencher) {
    let matcher = TypeMatcher::new();
    let data = Value::Seq((0..100).map(record).collect());
    let spec = record_spec();
    bencher.bench_local(|| matcher.matches(divan::black_box(&data), divan::black_box(&spec)));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Containment
// ═══════════════════════════════════════════════════════════════════════════════

#[divan::bench]
fn contains_nested(bencher: divan::Bencher) {
    let haystack = obj(vec![
        ("meta", obj(vec![("page", Value::Int(1))])),
        ("items", Value::Seq((0..50).map(record).collect())),
    ]);
    let needle = obj(vec![(
        "items",
        Value::Seq(vec![record(49), record(25), record(0)]),
    )]);
    bencher.bench_local(|| contains(divan::black_box(&needle), divan::black_box(&haystack)));
}
