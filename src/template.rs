//! Shared page template: placeholder validation and substitution.
//!
//! The template is a plain HTML file containing three literal placeholder
//! tokens — `{title}`, `{up}`, `{content}` — each of which may appear any
//! number of times (`{up}` usually appears several: stylesheet link, home
//! link, favicon). It is loaded once per run and passed by reference into
//! every page render; there is no module-level template state.
//!
//! Substitution order matters: `{content}` goes last, so placeholder-looking
//! text inside a page body is never re-expanded.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Replaced with the page title (first source line, marker stripped).
pub const TITLE_PLACEHOLDER: &str = "{title}";
/// Replaced with the relative ascent prefix (`""`, `"../"`, `"../../"`, …).
pub const UP_PLACEHOLDER: &str = "{up}";
/// Replaced with the page body HTML.
pub const CONTENT_PLACEHOLDER: &str = "{content}";

/// Expected template filename inside the template directory.
pub const TEMPLATE_FILENAME: &str = "template.html";

const STOCK_TEMPLATE: &str = include_str!("../static/template.html");

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("template {path} is missing the {token} placeholder")]
    MissingPlaceholder { path: PathBuf, token: &'static str },
}

/// A validated page template.
///
/// Construction guarantees all three placeholders are present, so
/// [`PageTemplate::render`] can never silently drop a page's content.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    text: String,
}

impl PageTemplate {
    /// Load and validate a template file.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let text = fs::read_to_string(path)?;
        Self::new(text, path)
    }

    /// Validate template text. `origin` is only used in error messages.
    pub fn new(text: String, origin: &Path) -> Result<Self, TemplateError> {
        for token in [TITLE_PLACEHOLDER, UP_PLACEHOLDER, CONTENT_PLACEHOLDER] {
            if !text.contains(token) {
                return Err(TemplateError::MissingPlaceholder {
                    path: origin.to_path_buf(),
                    token,
                });
            }
        }
        Ok(Self { text })
    }

    /// The stock template embedded in the binary. Known to be valid.
    pub fn stock() -> Self {
        Self {
            text: STOCK_TEMPLATE.to_string(),
        }
    }

    /// Substitute every occurrence of each placeholder.
    pub fn render(&self, title: &str, up: &str, content: &str) -> String {
        self.text
            .replace(TITLE_PLACEHOLDER, title)
            .replace(UP_PLACEHOLDER, up)
            .replace(CONTENT_PLACEHOLDER, content)
    }
}

/// The stock template text, printed by the `gen-template` CLI command.
pub fn stock_template_html() -> &'static str {
    STOCK_TEMPLATE
}
