//! Built-in filters
//!
//! Filters operate on the string form of a value (see
//! [`Value::filter_string`](crate::Value::filter_string)). Dispatch order is
//! part of the contract: `=` literal equality first, then the named
//! validators, then `regex(...)`, then the comparison operators with `>=`
//! and `<=` ahead of their single-character prefixes. Anything unrecognized
//! is `false` — an unknown filter is not an error.
//!
//! Negation and custom-registry precedence live one level up in
//! [`TypeMatcher::match_filter`](crate::TypeMatcher::match_filter).

use crate::pattern;
use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// HTML5/WHATWG email syntax.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

/// Evaluate one built-in filter against a value's string form.
pub(crate) fn match_builtin(filter: &str, value: &str) -> bool {
    if let Some(literal) = filter.strip_prefix('=') {
        return value == literal;
    }
    match filter {
        "url" => return url::Url::parse(value).is_ok(),
        "date" => return is_iso_datetime(value),
        "email" => return EMAIL_RE.is_match(value),
        "empty" => return value.is_empty(),
        _ => {}
    }
    if let Some(body) = filter
        .strip_prefix("regex(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return pattern::compile_delimited(body).is_ok_and(|re| re.is_match(value));
    }
    // `>=`/`<=` must win over their single-character prefixes
    if let Some(arg) = filter.strip_prefix(">=") {
        return compare(value, arg, |v, n| v >= n);
    }
    if let Some(arg) = filter.strip_prefix("<=") {
        return compare(value, arg, |v, n| v <= n);
    }
    if let Some(arg) = filter.strip_prefix('>') {
        return compare(value, arg, |v, n| v > n);
    }
    if let Some(arg) = filter.strip_prefix('<') {
        return compare(value, arg, |v, n| v < n);
    }
    false
}

/// ISO-8601 date-time: full offset form (RFC 3339), or naive date-time with
/// optional fractional seconds and no offset.
fn is_iso_datetime(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
}

/// Numeric comparison. The bound must be a decimal literal; the value's
/// string form coerces like a runtime float cast — non-numeric text counts
/// as `0.0`.
fn compare(value: &str, bound: &str, op: impl Fn(f64, f64) -> bool) -> bool {
    let Ok(bound) = bound.trim().parse::<f64>() else {
        return false;
    };
    let value = value.trim().parse::<f64>().unwrap_or(0.0);
    op(value, bound)
}
