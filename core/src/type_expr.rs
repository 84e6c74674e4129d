//! Type-expression splitting
//!
//! A type expression is `Alt ('|' Alt)*` where each alternative is
//! `TypeName (':' Filter)*`. The separators are plain `|` and `:` — except
//! inside a `regex(...)` filter body, whose delimited pattern may contain
//! both freely. Splitting therefore masks every `regex(...)` span behind a
//! positional placeholder first, splits, then restores the original body
//! into each filter string.
//!
//! Filters stay raw strings after splitting: custom registry entries are
//! consulted before built-ins and may shadow any built-in spelling, so
//! filter bodies cannot be interpreted until evaluation time.

use crate::pattern;

/// Placeholder sentinel. Never produced by the splitter's own output and
/// passed through verbatim if it somehow occurs in user input.
const MASK: char = '\u{1}';

/// One `TypeName (':' Filter)*` alternative.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Alternative {
    /// Lowercased, trimmed type name this alternative applies to.
    pub type_name: String,
    /// Raw filter strings, regex bodies restored.
    pub filters: Vec<String>,
}

/// A parsed type expression: `|`-separated alternatives in source order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TypeExpr {
    pub alternatives: Vec<Alternative>,
}

impl TypeExpr {
    /// Split an expression into alternatives and filters.
    ///
    /// Splitting never fails: unparseable `regex(...)` spans degrade to
    /// paren-balanced scanning and malformed filters evaluate to `false`
    /// later, matching the expression-as-written diagnostic contract.
    pub(crate) fn parse(expr: &str) -> Self {
        let (masked, bodies) = mask_regex_bodies(expr);
        let alternatives = masked
            .split('|')
            .map(|alt| {
                let mut segments = alt.split(':').map(|seg| restore(seg, &bodies));
                let type_name = segments.next().unwrap_or_default().trim().to_lowercase();
                Alternative {
                    type_name,
                    filters: segments.collect(),
                }
            })
            .collect();
        Self { alternatives }
    }
}

/// Replace every `regex(...)` span with `regex(<placeholder>)`, collecting
/// the original bodies (delimiters and modifiers included).
fn mask_regex_bodies(expr: &str) -> (String, Vec<String>) {
    let mut masked = String::with_capacity(expr.len());
    let mut bodies = Vec::new();
    let mut rest = expr;
    while let Some(pos) = rest.find("regex(") {
        masked.push_str(&rest[..pos]);
        let after = &rest[pos + "regex(".len()..];
        let (body, consumed) = scan_regex_body(after);
        masked.push_str("regex(");
        masked.push(MASK);
        masked.push_str(&bodies.len().to_string());
        masked.push(MASK);
        masked.push(')');
        bodies.push(body.to_string());
        rest = &after[consumed..];
    }
    masked.push_str(rest);
    (masked, bodies)
}

/// Scan the body of a `regex(...)` filter starting just after the opening
/// paren. Returns the body slice (delimited pattern plus any modifiers) and
/// the bytes consumed including the closing paren.
fn scan_regex_body(s: &str) -> (&str, usize) {
    if let Some(len) = pattern::scan_delimited_len(s) {
        // modifiers run until the grammar's closing paren
        if let Some(close_rel) = s[len..].find(')') {
            let end = len + close_rel;
            return (&s[..end], end + 1);
        }
    }
    // no recognizable delimited pattern: balance plain parentheses
    let mut depth = 1usize;
    for (idx, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return (&s[..idx], idx + 1);
                }
            }
            _ => {}
        }
    }
    (s, s.len())
}

/// Substitute placeholders in one split segment back to their bodies.
fn restore(segment: &str, bodies: &[String]) -> String {
    if !segment.contains(MASK) {
        return segment.to_string();
    }
    let mut out = String::with_capacity(segment.len());
    let mut rest = segment;
    while let Some(start) = rest.find(MASK) {
        out.push_str(&rest[..start]);
        let after = &rest[start + MASK.len_utf8()..];
        let restored = after.find(MASK).and_then(|end| {
            let body = after[..end]
                .parse::<usize>()
                .ok()
                .and_then(|i| bodies.get(i))?;
            Some((body, end))
        });
        match restored {
            Some((body, end)) => {
                out.push_str(body);
                rest = &after[end + MASK.len_utf8()..];
            }
            None => {
                // stray sentinel in user input: pass through
                out.push(MASK);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
