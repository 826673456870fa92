//! Batch module: orchestrate one full hashing run
//!
//! Owns all file texts for the duration of a run. Ids are extracted and
//! rewritten first; classes are then extracted from the already id-rewritten
//! markup. A digest failure aborts the run with nothing returned.

use crate::extract::{extract_classes, extract_ids, NameBinding};
use crate::rewrite::{rewrite_classes, rewrite_ids, Dialect};
use crate::token::Digester;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Result of a full run: rewritten texts, index-aligned with the inputs,
/// plus the bindings that were applied.
#[derive(Debug, Clone)]
pub struct RewrittenBundle {
    /// Rewritten markup text
    pub markup: String,
    /// Rewritten style texts, in input order
    pub styles: Vec<String>,
    /// Rewritten script texts, in input order
    pub scripts: Vec<String>,
    /// Id bindings, in discovery order
    pub ids: Vec<NameBinding>,
    /// Class bindings, in discovery order
    pub classes: Vec<NameBinding>,
}

impl RewrittenBundle {
    /// Binding lists in serializable form, for the map file.
    pub fn map(&self) -> SelectorMap {
        SelectorMap {
            ids: self.ids.clone(),
            classes: self.classes.clone(),
        }
    }
}

/// Serialized pairing of original names and tokens. Written as YAML so a
/// hashed file can later be restored by the `unmask` binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorMap {
    /// Id bindings
    pub ids: Vec<NameBinding>,
    /// Class bindings
    pub classes: Vec<NameBinding>,
}

/// Run the id pass then the class pass over all file texts.
pub fn run(
    markup: &str,
    styles: &[String],
    scripts: &[String],
    digester: &dyn Digester,
) -> Result<RewrittenBundle> {
    // Id pass
    let ids = extract_ids(markup, digester)?;
    let markup = rewrite_ids(markup, &ids, Dialect::Markup);
    let styles: Vec<String> = styles
        .iter()
        .map(|s| rewrite_ids(s, &ids, Dialect::Style))
        .collect();
    let scripts: Vec<String> = scripts
        .iter()
        .map(|s| rewrite_ids(s, &ids, Dialect::Script))
        .collect();

    // Class pass, against the id-rewritten markup
    let classes = extract_classes(&markup, digester)?;
    let markup = rewrite_classes(&markup, &classes, Dialect::Markup);
    let styles = styles
        .iter()
        .map(|s| rewrite_classes(s, &classes, Dialect::Style))
        .collect();
    let scripts = scripts
        .iter()
        .map(|s| rewrite_classes(s, &classes, Dialect::Script))
        .collect();

    Ok(RewrittenBundle {
        markup,
        styles,
        scripts,
        ids,
        classes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Sha256Digester;
    use anyhow::bail;

    #[test]
    fn test_run_rewrites_markup_and_styles_consistently() {
        let markup = r#"<p class="big bold">hi</p>"#;
        let style = ".big { font-size: 2em; } .bold { font-weight: 700; }".to_string();

        let bundle = run(markup, &[style], &[], &Sha256Digester).unwrap();

        assert_eq!(bundle.classes.len(), 2);
        let big = &bundle.classes[0];
        let bold = &bundle.classes[1];
        assert_eq!(big.original, "big");
        assert_eq!(bold.original, "bold");

        // Same token at the same positions in both outputs
        assert_eq!(
            bundle.markup,
            format!(r#"<p class="{} {}">hi</p>"#, big.token, bold.token)
        );
        assert_eq!(
            bundle.styles[0],
            format!(
                ".{} {{ font-size: 2em; }} .{} {{ font-weight: 700; }}",
                big.token, bold.token
            )
        );
    }

    #[test]
    fn test_run_rewrites_ids_across_all_dialects() {
        let markup = "<div id=\"menu\"></div>";
        let style = "#menu { width: 10px; }".to_string();
        let script = "document.getElementById(\"menu\");".to_string();

        let bundle = run(markup, &[style], &[script], &Sha256Digester).unwrap();

        let token = &bundle.ids[0].token;
        assert_eq!(bundle.markup, format!("<div id=\"{token}\"></div>"));
        assert_eq!(bundle.styles[0], format!("#{token} {{ width: 10px; }}"));
        assert_eq!(
            bundle.scripts[0],
            format!("document.getElementById(\"{token}\");")
        );
    }

    #[test]
    fn test_run_keeps_file_order() {
        let markup = "<i id=\"a\"></i>";
        let styles = ["/* one */".to_string(), "/* two */".to_string()];

        let bundle = run(markup, &styles, &[], &Sha256Digester).unwrap();

        assert_eq!(bundle.styles, styles);
        assert!(bundle.scripts.is_empty());
    }

    #[test]
    fn test_run_aborts_on_digest_failure() {
        struct FailingDigester;
        impl Digester for FailingDigester {
            fn digest(&self, _value: &str) -> Result<String> {
                bail!("digest backend unavailable")
            }
        }

        let result = run("<div id=\"x\"></div>", &[], &[], &FailingDigester);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_without_declarations_is_identity() {
        let markup = "<p>plain</p>";
        let style = "body { margin: 0; }".to_string();

        let bundle = run(markup, &[style.clone()], &[], &Sha256Digester).unwrap();

        assert_eq!(bundle.markup, markup);
        assert_eq!(bundle.styles[0], style);
        assert!(bundle.ids.is_empty());
        assert!(bundle.classes.is_empty());
    }
}
