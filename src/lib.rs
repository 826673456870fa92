//! selector-lockr: selector obfuscation for shipped front-end code
//!
//! Rewrites the ids and classes declared in an HTML document into short
//! hashed tokens and propagates the same rewrite into the CSS and JS files
//! that reference them, so every cross-reference stays consistent.
//!
//! ## How it works
//!
//! 1. **Extract**: line-scan the markup for `id="…"` and `class="…"` values
//! 2. **Tokenize**: SHA-256 each name, truncate, sanitize into a valid token
//! 3. **Rewrite**: apply every binding per dialect (markup, style, script)
//! 4. **Bundle**: return the rewritten texts plus the name→token map

pub mod batch;
pub mod extract;
pub mod rewrite;
pub mod token;

pub use batch::{run, RewrittenBundle, SelectorMap};
pub use extract::NameBinding;
pub use rewrite::Dialect;
pub use token::{Digester, Sha256Digester};
