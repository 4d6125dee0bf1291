//! Frontmatter parsing and serialization for markdown pages.
//!
//! Pages carry an optional metadata block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: Home
//! alias: /index.html
//! ---
//!
//! # Welcome
//! ```
//!
//! The dialect is deliberately small: one block, single-level `key: value`
//! lines, no nesting, no escaping. A value keeps everything after the first
//! colon, so embedded colons survive; one pair of surrounding double quotes
//! is stripped. Lines without a colon are ignored.
//!
//! # Known limitation
//!
//! Values and bodies are written back verbatim. A body whose first line is
//! `---` will be re-parsed as a new delimiter on round-trip; the codec does
//! not escape it.

use regex::Regex;
use std::sync::OnceLock;

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Block pattern: `---`, newline, block, a `---` line, then the body.
/// Anchored at byte 0; the block match is non-greedy so the first `---`
/// line closes it.
fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| Regex::new(r"(?s)\A---\n(.*?)\n---\n(.*)\z").unwrap())
}

/// Ordered `key -> value` attributes parsed from a frontmatter block.
///
/// Insertion order is the order the keys appear in the block; duplicate
/// keys are kept as-is (lookups return the first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Look up the first value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Render as a JSON object, preserving attribute order.
    pub fn to_json(&self) -> serde_json::Map<String, serde_json::Value> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect()
    }

    fn push(&mut self, key: String, value: String) {
        self.0.push((key, value));
    }
}

/// A parsed page: attributes, body, and the verbatim source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub attributes: Attributes,
    /// Trimmed remainder after the block, or the verbatim text when no
    /// block matched.
    pub body: String,
    pub raw: String,
}

/// Parse a page into attributes and body.
///
/// Input without a frontmatter block yields empty attributes and the text
/// unchanged as the body.
pub fn parse(text: &str) -> Document {
    let Some(captures) = frontmatter_regex().captures(text) else {
        return Document {
            attributes: Attributes::default(),
            body: text.to_string(),
            raw: text.to_string(),
        };
    };

    let block = captures.get(1).map_or("", |m| m.as_str());
    let body = captures.get(2).map_or("", |m| m.as_str());

    let mut attributes = Attributes::default();
    for line in block.lines() {
        if line.trim().is_empty() {
            continue;
        }
        // Only the first colon splits key from value; the rest of the line
        // belongs to the value.
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = strip_quotes(value.trim());
        attributes.push(key.trim().to_string(), value.to_string());
    }

    Document {
        attributes,
        body: body.trim().to_string(),
        raw: text.to_string(),
    }
}

/// Serialize a single-key page. This is the only write path exposed.
pub fn serialize(title: &str, body: &str) -> String {
    format!("---\ntitle: {title}\n---\n\n{body}")
}

/// Strip one pair of surrounding double quotes, if present.
fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attributes_and_body() {
        let text = "---\ntitle: Home\nalias: /index.html\n---\n\n# Welcome";
        let doc = parse(text);

        assert_eq!(doc.attributes.get("title"), Some("Home"));
        assert_eq!(doc.attributes.get("alias"), Some("/index.html"));
        assert_eq!(doc.body, "# Welcome");
        assert_eq!(doc.raw, text);
    }

    #[test]
    fn test_parse_no_frontmatter() {
        let text = "# Just Content\n\nNo frontmatter here.";
        let doc = parse(text);

        assert!(doc.attributes.is_empty());
        assert_eq!(doc.body, text);
        assert_eq!(doc.raw, text);
    }

    #[test]
    fn test_parse_unterminated_block_is_body() {
        // Opening delimiter without a closing line is not a block
        let text = "---\ntitle: Broken\nno closing delimiter";
        let doc = parse(text);

        assert!(doc.attributes.is_empty());
        assert_eq!(doc.body, text);
    }

    #[test]
    fn test_parse_block_must_start_at_byte_zero() {
        let text = "\n---\ntitle: Late\n---\nbody";
        let doc = parse(text);

        assert!(doc.attributes.is_empty());
        assert_eq!(doc.body, text);
    }

    #[test]
    fn test_parse_first_colon_splits() {
        let doc = parse("---\nalias: /about.html:v2\n---\nbody");
        assert_eq!(doc.attributes.get("alias"), Some("/about.html:v2"));
    }

    #[test]
    fn test_parse_strips_one_quote_pair() {
        let doc = parse("---\ntitle: \"Quoted\"\nhalf: \"open\nliteral: \"\"x\"\"\n---\nbody");
        assert_eq!(doc.attributes.get("title"), Some("Quoted"));
        // Unbalanced quotes stay as written
        assert_eq!(doc.attributes.get("half"), Some("\"open"));
        // Only one pair comes off
        assert_eq!(doc.attributes.get("literal"), Some("\"x\""));
    }

    #[test]
    fn test_parse_ignores_lines_without_colon() {
        let doc = parse("---\ntitle: Ok\njust some text\n---\nbody");
        assert_eq!(doc.attributes.len(), 1);
        assert_eq!(doc.attributes.get("title"), Some("Ok"));
    }

    #[test]
    fn test_parse_preserves_attribute_order() {
        let doc = parse("---\nzebra: 1\nalpha: 2\nmango: 3\n---\nbody");
        let binding = doc.attributes.to_json();
        let keys: Vec<&String> = binding.keys().collect();
        assert_eq!(keys, ["zebra", "alpha", "mango"]);
    }

    #[test]
    fn test_serialize_exact_format() {
        assert_eq!(
            serialize("Home", "# Welcome"),
            "---\ntitle: Home\n---\n\n# Welcome"
        );
    }

    #[test]
    fn test_round_trip() {
        let doc = parse(&serialize("My Page", "Some *markdown* body.\n\nSecond paragraph."));
        assert_eq!(doc.attributes.get("title"), Some("My Page"));
        assert_eq!(doc.body, "Some *markdown* body.\n\nSecond paragraph.");
    }

    #[test]
    fn test_body_delimiter_closes_at_first_candidate() {
        // No escaping: the first `---` line closes the block, so a stray
        // delimiter truncates what was meant as the block.
        let doc = parse("---\ntitle: T\n---\nsubtitle: S\n---\nbody");
        assert_eq!(doc.attributes.get("title"), Some("T"));
        assert_eq!(doc.attributes.get("subtitle"), None);
        assert_eq!(doc.body, "subtitle: S\n---\nbody");
    }

    #[test]
    fn test_parse_empty_block() {
        let doc = parse("---\n\n---\nbody");
        assert!(doc.attributes.is_empty());
        assert_eq!(doc.body, "body");
    }
}
