//! Extract module: scan markup for declared ids and classes
//!
//! Line-based scanning, not a parser. Every `id="…"` / `class="…"` value is
//! paired with a freshly generated replacement token. The substring match is
//! deliberately loose: an `id=` inside unrelated text on a line still
//! matches, and an unterminated attribute quote yields a garbage slice.

use crate::token::{sanitize, Digester};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One original declared name paired with its replacement token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameBinding {
    /// Name as declared in the markup
    pub original: String,
    /// Sanitized replacement token
    pub token: String,
}

impl NameBinding {
    fn generate(original: &str, digester: &dyn Digester) -> Result<Self> {
        let token = sanitize(&digester.digest(original)?);
        Ok(Self {
            original: original.to_string(),
            token,
        })
    }
}

/// Extract all declared ids from markup, in discovery order.
///
/// Duplicate declarations each produce their own binding; with in-order
/// application the first one wins (see the rewrite engine).
pub fn extract_ids(markup: &str, digester: &dyn Digester) -> Result<Vec<NameBinding>> {
    let mut bindings = Vec::new();

    for name in scan_values(markup, "id=") {
        bindings.push(NameBinding::generate(&name, digester)?);
    }

    Ok(bindings)
}

/// Extract all declared classes from markup, in discovery order.
///
/// Attribute values are split on single spaces, empty segments discarded,
/// and the result deduplicated by exact (original, token) pair.
pub fn extract_classes(markup: &str, digester: &dyn Digester) -> Result<Vec<NameBinding>> {
    let mut bindings: Vec<NameBinding> = Vec::new();

    for value in scan_values(markup, "class=") {
        for name in value.split(' ').filter(|s| !s.is_empty()) {
            let binding = NameBinding::generate(name, digester)?;
            if !bindings.contains(&binding) {
                bindings.push(binding);
            }
        }
    }

    Ok(bindings)
}

/// Collect every quote-delimited value following `marker`, line by line,
/// left to right within a line.
fn scan_values(markup: &str, marker: &str) -> Vec<String> {
    let mut values = Vec::new();

    for line in markup.lines() {
        let mut rest = line;
        while let Some(pos) = rest.find(marker) {
            rest = &rest[pos + marker.len()..];

            let Some(open) = rest.find('"') else { break };
            rest = &rest[open + 1..];

            let Some(close) = rest.find('"') else { break };
            values.push(rest[..close].to_string());
            rest = &rest[close + 1..];
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Sha256Digester;

    #[test]
    fn test_extract_single_id() {
        let ids = extract_ids(r#"<div id="foo"></div>"#, &Sha256Digester).unwrap();

        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].original, "foo");
        assert_eq!(ids[0].token.len(), 6);
    }

    #[test]
    fn test_extract_ids_keeps_duplicates() {
        let markup = "<p id=\"twice\"></p>\n<p id=\"twice\"></p>";
        let ids = extract_ids(markup, &Sha256Digester).unwrap();

        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].original, "twice");
        assert_eq!(ids[1].original, "twice");
    }

    #[test]
    fn test_extract_ids_multiple_per_line() {
        let markup = r#"<a id="one"></a><a id="two"></a>"#;
        let ids = extract_ids(markup, &Sha256Digester).unwrap();

        let originals: Vec<&str> = ids.iter().map(|b| b.original.as_str()).collect();
        assert_eq!(originals, ["one", "two"]);
    }

    #[test]
    fn test_extract_ids_skips_plain_lines() {
        let markup = "<html>\n<body>\n<p>no declarations here</p>\n</body>";
        assert!(extract_ids(markup, &Sha256Digester).unwrap().is_empty());
    }

    #[test]
    fn test_extract_classes_splits_on_spaces() {
        let classes = extract_classes(r#"<p class="big bold">hi</p>"#, &Sha256Digester).unwrap();

        let originals: Vec<&str> = classes.iter().map(|b| b.original.as_str()).collect();
        assert_eq!(originals, ["big", "bold"]);
    }

    #[test]
    fn test_extract_classes_discards_empty_segments() {
        let classes = extract_classes(r#"<p class="big  bold">"#, &Sha256Digester).unwrap();

        let originals: Vec<&str> = classes.iter().map(|b| b.original.as_str()).collect();
        assert_eq!(originals, ["big", "bold"]);
    }

    #[test]
    fn test_loose_marker_match_is_kept() {
        // "grid=" contains "id=" - a documented limitation, not special-cased
        let ids = extract_ids(r#"<table grid="3">"#, &Sha256Digester).unwrap();

        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].original, "3");
    }
}
