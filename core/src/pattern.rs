//! Delimited regex literals
//!
//! Regex filter bodies carry their own delimiters, source-style: the pattern
//! is wrapped in one of the symmetric pairs `()`, `{}`, `[]`, `<>` (nesting
//! balanced, `\`-escapes honored) or in any other non-alphanumeric character
//! paired with itself (`~...~`, `/.../`), optionally followed by modifier
//! letters. `regex([xyz])`, `regex({xyz})`, `regex(<xyz>)` and
//! `regex((xyz))` all denote the pattern `xyz`.
//!
//! Shared by the `regex(...)` filter, registry pattern keys, and
//! expression-splitting (which must skip `|`/`:` inside delimited bodies).

use regex::Regex;
use std::fmt;

/// Why a delimited literal failed to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PatternError {
    /// No valid opening delimiter, or the closing delimiter never appears.
    Unbalanced,
    /// A modifier letter after the closing delimiter is not supported.
    UnknownModifier(char),
    /// The inner pattern is not a valid regex.
    Invalid(String),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbalanced => f.write_str("missing or unbalanced pattern delimiters"),
            Self::UnknownModifier(c) => write!(f, "unsupported pattern modifier `{c}`"),
            Self::Invalid(source) => write!(f, "invalid pattern: {source}"),
        }
    }
}

fn closing_for(open: char) -> char {
    match open {
        '(' => ')',
        '{' => '}',
        '[' => ']',
        '<' => '>',
        other => other,
    }
}

/// Byte length of the delimited literal at the start of `s` (both delimiters
/// included, modifiers excluded). `None` if `s` does not start with a valid
/// opening delimiter or the closing delimiter never appears.
pub(crate) fn scan_delimited_len(s: &str) -> Option<usize> {
    let mut chars = s.char_indices();
    let (_, open) = chars.next()?;
    if open.is_alphanumeric() || open == '\\' || open.is_whitespace() {
        return None;
    }
    let close = closing_for(open);
    let paired = close != open;
    let mut depth = 1usize;
    let mut escaped = false;
    for (idx, c) in chars {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if paired && c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(idx + c.len_utf8());
            }
        }
    }
    None
}

/// Split a delimited literal into `(pattern, modifiers)`.
pub(crate) fn split_delimited(s: &str) -> Result<(&str, &str), PatternError> {
    let len = scan_delimited_len(s).ok_or(PatternError::Unbalanced)?;
    let open = s.chars().next().ok_or(PatternError::Unbalanced)?;
    let close = closing_for(open);
    let pattern = &s[open.len_utf8()..len - close.len_utf8()];
    Ok((pattern, &s[len..]))
}

/// Compile a delimited literal, translating trailing modifiers into inline
/// flag groups (`i`, `m`, `s`, `x`; `u` is a no-op — patterns are Unicode
/// already).
pub(crate) fn compile_delimited(s: &str) -> Result<Regex, PatternError> {
    let (pattern, modifiers) = split_delimited(s)?;
    let mut flags = String::new();
    for c in modifiers.chars() {
        match c {
            'i' | 'm' | 's' | 'x' => {
                if !flags.contains(c) {
                    flags.push(c);
                }
            }
            'u' => {}
            other => return Err(PatternError::UnknownModifier(other)),
        }
    }
    let source = if flags.is_empty() {
        pattern.to_string()
    } else {
        format!("(?{flags}){pattern}")
    };
    Regex::new(&source).map_err(|e| PatternError::Invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_symmetric_pairs_denote_the_same_pattern() {
        for body in ["(xyz)", "{xyz}", "[xyz]", "<xyz>", "~xyz~", "/xyz/"] {
            let re = compile_delimited(body).unwrap();
            assert!(re.is_match("xyz"), "delimiters {body}");
            assert!(!re.is_match("abc"), "delimiters {body}");
        }
    }

    #[test]
    fn paired_delimiters_nest() {
        assert_eq!(scan_delimited_len("(a(b)c)"), Some(7));
        let re = compile_delimited("((a|b))").unwrap();
        assert!(re.is_match("a"));
        assert!(re.is_match("b"));
    }

    #[test]
    fn escaped_closing_delimiter_is_skipped() {
        let (pattern, modifiers) = split_delimited(r"~a\~b~").unwrap();
        assert_eq!(pattern, r"a\~b");
        assert_eq!(modifiers, "");
    }

    #[test]
    fn modifiers_become_inline_flags() {
        let re = compile_delimited("/^abc$/i").unwrap();
        assert!(re.is_match("ABC"));
        assert!(compile_delimited("/a/q").is_err());
    }

    #[test]
    fn unbalanced_or_missing_delimiters_fail() {
        assert_eq!(scan_delimited_len("abc"), None);
        assert_eq!(scan_delimited_len("~abc"), None);
        assert_eq!(scan_delimited_len("(a(b)"), None);
        assert!(matches!(
            compile_delimited("^foo$"),
            Err(PatternError::Unbalanced)
        ));
    }

    #[test]
    fn invalid_inner_pattern_reports_source() {
        assert!(matches!(
            compile_delimited("/[bad/"),
            Err(PatternError::Invalid(_))
        ));
    }
}
