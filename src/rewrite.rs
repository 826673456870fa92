//! Rewrite module: apply name bindings across the three dialects
//!
//! Plain text replacement with per-dialect boundary patterns. No parsing:
//! the boundary sets approximate attribute, selector and string-literal
//! edges well enough that a substring of a longer name is never rewritten.
//! A binding with no occurrences is a silent no-op.

use crate::extract::NameBinding;

/// Syntactic context a file is rewritten under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// HTML attribute values
    Markup,
    /// CSS selectors
    Style,
    /// JS string literals
    Script,
}

/// Characters that may follow a `#id` or `.class` selector token.
const STYLE_FOLLOWERS: [char; 5] = [' ', ',', ':', '.', ')'];

/// Quote characters recognized around script string literals.
const SCRIPT_QUOTES: [char; 3] = ['"', '\'', '`'];

/// Boundary characters around a bare class name in a markup attribute.
const MARKUP_EDGES: [char; 2] = ['"', ' '];

/// Rewrite every id occurrence of each binding, in binding order.
pub fn rewrite_ids(content: &str, bindings: &[NameBinding], dialect: Dialect) -> String {
    let mut content = content.to_string();

    for binding in bindings {
        content = match dialect {
            Dialect::Markup => content.replace(
                &format!("id=\"{}\"", binding.original),
                &format!("id=\"{}\"", binding.token),
            ),
            Dialect::Style => replace_selector(&content, '#', binding),
            Dialect::Script => replace_accessor(&content, binding),
        };
    }

    content
}

/// Rewrite every class occurrence of each binding, in binding order.
pub fn rewrite_classes(content: &str, bindings: &[NameBinding], dialect: Dialect) -> String {
    let mut content = content.to_string();

    for binding in bindings {
        content = match dialect {
            Dialect::Markup => replace_bounded_name(&content, binding),
            Dialect::Style => replace_selector(&content, '.', binding),
            Dialect::Script => replace_quoted(&content, binding),
        };
    }

    content
}

/// Replace `getElementById(<q><name><q>` for each quote character, leaving
/// the call syntax and closing parenthesis intact.
fn replace_accessor(content: &str, binding: &NameBinding) -> String {
    let mut content = content.to_string();

    for quote in SCRIPT_QUOTES {
        content = content.replace(
            &format!("getElementById({q}{}{q}", binding.original, q = quote),
            &format!("getElementById({q}{}{q}", binding.token, q = quote),
        );
    }

    content
}

/// Replace any `<q><name><q>` string literal for each quote character.
fn replace_quoted(content: &str, binding: &NameBinding) -> String {
    let mut content = content.to_string();

    for quote in SCRIPT_QUOTES {
        content = content.replace(
            &format!("{quote}{}{quote}", binding.original),
            &format!("{quote}{}{quote}", binding.token),
        );
    }

    content
}

/// Replace the bare name bounded by quote or space on each side, so a
/// substring of a longer class name is never rewritten.
fn replace_bounded_name(content: &str, binding: &NameBinding) -> String {
    let mut content = content.to_string();

    for left in MARKUP_EDGES {
        for right in MARKUP_EDGES {
            content = content.replace(
                &format!("{left}{}{right}", binding.original),
                &format!("{left}{}{right}", binding.token),
            );
        }
    }

    content
}

/// Replace `<sigil><name>` followed by a selector-boundary character.
fn replace_selector(content: &str, sigil: char, binding: &NameBinding) -> String {
    let mut content = content.to_string();

    for follower in STYLE_FOLLOWERS {
        content = content.replace(
            &format!("{sigil}{}{follower}", binding.original),
            &format!("{sigil}{}{follower}", binding.token),
        );
    }

    content
}
