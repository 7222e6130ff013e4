//! Classification of raw command-line tokens
//!
//! A token is a parameter when it starts with `/`, `-` or `--`, followed by a
//! key made of word characters and hyphens (the first one must be a word
//! character), optionally followed by `:` or `=` and an inline value. The
//! inline value is everything after the separator, taken verbatim.

use std::sync::LazyLock;

use regex::Regex;

/// Token that requests help without going through the parameter grammar
pub const HELP_TOKEN: &str = "/?";

static PARAM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[/\-]|--)(?P<key>[A-Za-z0-9_][A-Za-z0-9_\-]*)(?:[:=](?P<value>(?s:.+)))?")
        .expect("parameter grammar is a valid pattern")
});

/// A token that matched the parameter grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamToken<'a> {
    /// Key exactly as typed, without prefix
    pub key: &'a str,
    /// Text after the `:` or `=` separator, if any
    pub value: Option<&'a str>,
}

impl<'a> ParamToken<'a> {
    /// The inline value, unless it is empty or only whitespace
    #[must_use]
    pub fn inline_value(&self) -> Option<&'a str> {
        self.value.filter(|v| !v.trim().is_empty())
    }
}

/// Classify a single token
///
/// Returns `None` when the token does not look like a parameter. This is a
/// pure function: the same input always yields the same result.
///
/// # Examples
///
/// ```
/// use argbind::parse_param;
///
/// let token = parse_param("--out-dir=/tmp/x").unwrap();
/// assert_eq!(token.key, "out-dir");
/// assert_eq!(token.value, Some("/tmp/x"));
///
/// assert!(parse_param("plain").is_none());
/// ```
#[must_use]
pub fn parse_param(token: &str) -> Option<ParamToken<'_>> {
    let caps = PARAM_PATTERN.captures(token)?;
    let key = caps.name("key")?.as_str();
    let value = caps.name("value").map(|m| m.as_str());
    Some(ParamToken { key, value })
}

/// Check whether a token looks like a parameter
#[must_use]
pub fn is_param(token: &str) -> bool {
    PARAM_PATTERN.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(token: &str) -> (&str, Option<&str>) {
        let parsed = parse_param(token).unwrap();
        (parsed.key, parsed.value)
    }

    #[test]
    fn test_non_params() {
        assert!(parse_param("a").is_none());
        assert!(parse_param("").is_none());
        assert!(parse_param("/?").is_none());
        assert!(parse_param("---x").is_none());
        assert!(parse_param("-").is_none());
        assert!(!is_param("value"));
    }

    #[test]
    fn test_flags() {
        assert_eq!(param("/b"), ("b", None));
        assert_eq!(param("-c"), ("c", None));
        assert_eq!(param("--flag"), ("flag", None));
    }

    #[test]
    fn test_assignments() {
        assert_eq!(param("-d:dval"), ("d", Some("dval")));
        assert_eq!(param("/e=eval"), ("e", Some("eval")));
    }

    #[test]
    fn test_long_keys() {
        assert_eq!(param("--f-gh"), ("f-gh", None));
        assert_eq!(param("--i-jk=kval"), ("i-jk", Some("kval")));
        assert_eq!(param("--l-mn=mval-with-hyphen"), ("l-mn", Some("mval-with-hyphen")));
        assert_eq!(param("/o:oval-with-hyphen"), ("o", Some("oval-with-hyphen")));
    }

    #[test]
    fn test_paths_and_spaces() {
        assert_eq!(param(r"/path:Z:\Dir\File.Ext"), ("path", Some(r"Z:\Dir\File.Ext")));
        assert_eq!(param("-q=arg with space"), ("q", Some("arg with space")));
        assert_eq!(param("--url=http://host:8080/a"), ("url", Some("http://host:8080/a")));
    }

    #[test]
    fn test_multiline_values() {
        assert_eq!(param("-m:line1\nline2"), ("m", Some("line1\nline2")));
        assert_eq!(param("-m=a\r\nb\n"), ("m", Some("a\r\nb\n")));
    }

    #[test]
    fn test_empty_and_trailing() {
        assert_eq!(param("-s:"), ("s", None));
        assert_eq!(param("-s!x"), ("s", None));

        let token = parse_param("-s:   ").unwrap();
        assert_eq!(token.value, Some("   "));
        assert_eq!(token.inline_value(), None);
    }

    #[test]
    fn test_negative_numbers_look_like_params() {
        assert_eq!(param("-5"), ("5", None));
    }

    #[test]
    fn test_idempotent() {
        for token in ["-a:a1,a2", "value", "--x-y=z", "/?"] {
            assert_eq!(parse_param(token), parse_param(token));
        }
    }
}
