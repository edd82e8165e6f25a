//! Cookie jar parsed from a `document.cookie` string.
//!
//! Format: `name1=value1; name2=value2`
//!
//! - Pairs are split on `;`, then on the first `=`
//! - Whitespace around names and values is trimmed before decoding
//! - Names and values are percent-decoded (`%20` -> space, `+` is literal)
//! - A pair with no `=` has an absent value, not an empty one
//! - Later duplicates overwrite earlier ones

use std::borrow::Cow;
use std::collections::HashMap;

/// Immutable snapshot of the cookies visible to the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    entries: HashMap<String, Option<String>>,
}

impl CookieJar {
    /// Parse a raw cookie string. Never fails; malformed pairs degrade to
    /// absent values or are skipped.
    pub fn parse(raw: &str) -> Self {
        let mut entries = HashMap::new();

        for pair in raw.split(';') {
            if pair.trim().is_empty() {
                continue;
            }

            let (name, value) = match pair.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (pair, None),
            };

            let name = decode(name.trim());
            if name.is_empty() {
                continue;
            }
            let value = value.map(|v| decode(v.trim()));

            entries.insert(name, value);
        }

        Self { entries }
    }

    /// Decoded value of `name`, if the cookie exists and carries a value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(|v| v.as_deref())
    }

    /// True if a cookie called `name` appeared, with or without a value.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        let mut pairs: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs.into_iter()
    }
}

/// Percent-decode, keeping the raw text when the bytes are not UTF-8.
fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .unwrap_or(Cow::Borrowed(raw))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let jar = CookieJar::parse("a=1; b=2; _csrf=TOKEN123");
        assert_eq!(jar.len(), 3);
        assert_eq!(jar.get("a"), Some("1"));
        assert_eq!(jar.get("b"), Some("2"));
        assert_eq!(jar.get("_csrf"), Some("TOKEN123"));
    }

    #[test]
    fn test_whitespace_insensitive() {
        let spaced = CookieJar::parse("a=1;  b = 2 ");
        let tight = CookieJar::parse("a=1;b=2");
        assert_eq!(spaced, tight);
        assert_eq!(spaced.get("b"), Some("2"));
    }

    #[test]
    fn test_duplicate_last_wins() {
        let jar = CookieJar::parse("_csrf=OLD; _csrf=NEW");
        assert_eq!(jar.get("_csrf"), Some("NEW"));
        assert_eq!(jar.len(), 1);
    }

    #[test]
    fn test_percent_round_trip() {
        let name = "session id";
        let value = "a b/c;d=e%f\u{e9}";
        let raw = format!(
            "x=1; {}={}",
            urlencoding::encode(name),
            urlencoding::encode(value)
        );
        let jar = CookieJar::parse(&raw);
        assert_eq!(jar.get(name), Some(value));
    }

    #[test]
    fn test_split_on_first_equals() {
        // base64 padding must survive
        let jar = CookieJar::parse("_csrf=abc==; other=x=y");
        assert_eq!(jar.get("_csrf"), Some("abc=="));
        assert_eq!(jar.get("other"), Some("x=y"));
    }

    #[test]
    fn test_missing_value_is_absent() {
        let jar = CookieJar::parse("flag; _csrf=");
        assert!(jar.contains("flag"));
        assert_eq!(jar.get("flag"), None);
        assert!(jar.contains("_csrf"));
        assert_eq!(jar.get("_csrf"), Some(""));
    }

    #[test]
    fn test_empty_and_degenerate_input() {
        assert!(CookieJar::parse("").is_empty());
        assert!(CookieJar::parse(" ; ;").is_empty());
        assert!(CookieJar::parse("=orphan").is_empty());
    }

    #[test]
    fn test_invalid_utf8_keeps_raw() {
        let jar = CookieJar::parse("bad=%FF%FE");
        assert_eq!(jar.get("bad"), Some("%FF%FE"));
    }

    #[test]
    fn test_plus_is_literal() {
        let jar = CookieJar::parse("q=a+b");
        assert_eq!(jar.get("q"), Some("a+b"));
    }

    #[test]
    fn test_iter_sorted() {
        let jar = CookieJar::parse("b=2; a=1; c");
        let pairs: Vec<_> = jar.iter().collect();
        assert_eq!(pairs, vec![("a", Some("1")), ("b", Some("2")), ("c", None)]);
    }
}
