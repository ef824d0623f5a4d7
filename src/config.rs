//! Site configuration module.
//!
//! Handles loading and validating an optional `config.toml` from the
//! directory railpress runs in. Config files are sparse — override just the
//! values you want:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! template = "template"     # Static assets + template.html, mirrored to output
//! source = "src"            # Markdown content root
//! output = "html"           # Output root (deleted and rebuilt every run!)
//!
//! [markdown]
//! tables = true             # GitHub-style tables
//! footnotes = true          # Footnote references
//! strikethrough = true      # ~~strikethrough~~
//! smart_punctuation = false # Curly quotes, en/em dashes
//!
//! [diagrams]
//! enabled = true            # Replace fenced Railroad: blocks with SVG
//! ```
//!
//! Unknown keys are rejected to catch typos early. CLI path flags override
//! the corresponding `[paths]` values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults matching the classic zero-argument invocation
/// (`template/` → `html/`, content under `src/`). User config files need
/// only specify the values they want to override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// The three directories a build touches.
    pub paths: PathsConfig,
    /// CommonMark extension toggles.
    pub markdown: MarkdownConfig,
    /// Railroad diagram substitution settings.
    pub diagrams: DiagramsConfig,
}

/// The three directories a build touches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Template/assets directory, copied verbatim into the output root.
    pub template: String,
    /// Markdown content root.
    pub source: String,
    /// Output root. Deleted and recreated on every build.
    pub output: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            template: "template".to_string(),
            source: "src".to_string(),
            output: "html".to_string(),
        }
    }
}

/// CommonMark extension toggles, mapped onto [`pulldown_cmark::Options`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    /// GitHub-style tables.
    pub tables: bool,
    /// Footnote references and definitions.
    pub footnotes: bool,
    /// `~~strikethrough~~` spans.
    pub strikethrough: bool,
    /// Curly quotes and en/em dashes.
    pub smart_punctuation: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            smart_punctuation: false,
        }
    }
}

impl MarkdownConfig {
    /// Build the parser options for the enabled extensions.
    pub fn to_options(&self) -> pulldown_cmark::Options {
        use pulldown_cmark::Options;
        let mut options = Options::empty();
        if self.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.smart_punctuation {
            options.insert(Options::ENABLE_SMART_PUNCTUATION);
        }
        options
    }
}

/// Railroad diagram substitution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramsConfig {
    /// When false, fenced `Railroad:` blocks are left in place as ordinary
    /// code blocks.
    pub enabled: bool,
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl SiteConfig {
    /// Validate config values.
    ///
    /// The output root is destroyed on every build, so it must never alias
    /// the source or template directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths.template.is_empty()
            || self.paths.source.is_empty()
            || self.paths.output.is_empty()
        {
            return Err(ConfigError::Validation(
                "paths.template, paths.source and paths.output must not be empty".into(),
            ));
        }
        validate_paths(
            Path::new(&self.paths.template),
            Path::new(&self.paths.source),
            Path::new(&self.paths.output),
        )
    }
}

/// Check that the output directory does not alias the source or template
/// directory. Called again in `main` after CLI flags are resolved, since
/// flags can override any of the three.
pub fn validate_paths(template: &Path, source: &Path, output: &Path) -> Result<(), ConfigError> {
    if output == source {
        return Err(ConfigError::Validation(format!(
            "output directory {} would destroy the source directory",
            output.display()
        )));
    }
    if output == template {
        return Err(ConfigError::Validation(format!(
            "output directory {} would destroy the template directory",
            output.display()
        )));
    }
    Ok(())
}

/// Load config from the given file path.
///
/// A missing file yields the stock defaults; a present file must parse,
/// contain no unknown keys, and pass validation.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Railpress Configuration
# =======================
#
# All options are optional. Delete anything you don't want to override;
# the values below are the stock defaults.

[paths]
# Static assets directory. Copied verbatim into the output root before
# pages are generated. Must contain template.html (the shared page
# template) unless --template points elsewhere.
template = "template"

# Markdown content root. Every .md file under it becomes an .html page
# at the mirrored output path.
source = "src"

# Output root. DELETED AND REBUILT on every run — never point this at a
# directory with content you care about.
output = "html"

[markdown]
# CommonMark extension toggles.
tables = true
footnotes = true
strikethrough = true
smart_punctuation = false

[diagrams]
# Replace fenced ```Railroad: blocks with inline SVG railroad diagrams.
# When disabled, the blocks pass through to the Markdown renderer as
# ordinary code blocks.
enabled = true
"##
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_match_classic_layout() {
        let config = SiteConfig::default();
        assert_eq!(config.paths.template, "template");
        assert_eq!(config.paths.source, "src");
        assert_eq!(config.paths.output, "html");
    }

    #[test]
    fn sparse_config_overrides_only_named_values() {
        let config: SiteConfig = toml::from_str("[paths]\noutput = \"public\"\n").unwrap();
        assert_eq!(config.paths.output, "public");
        assert_eq!(config.paths.source, "src");
        assert!(config.markdown.tables);
        assert!(config.diagrams.enabled);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[paths]\noutpot = \"public\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn output_aliasing_source_is_error() {
        let config: SiteConfig =
            toml::from_str("[paths]\nsource = \"site\"\noutput = \"site\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn output_aliasing_template_is_error() {
        let config: SiteConfig =
            toml::from_str("[paths]\ntemplate = \"t\"\noutput = \"t\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_path_is_error() {
        let config: SiteConfig = toml::from_str("[paths]\nsource = \"\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.paths.source, "src");
    }

    #[test]
    fn markdown_options_respect_toggles() {
        use pulldown_cmark::Options;
        let config = MarkdownConfig {
            tables: false,
            footnotes: true,
            strikethrough: false,
            smart_punctuation: true,
        };
        let options = config.to_options();
        assert!(!options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_FOOTNOTES));
        assert!(!options.contains(Options::ENABLE_STRIKETHROUGH));
        assert!(options.contains(Options::ENABLE_SMART_PUNCTUATION));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let parsed: Result<SiteConfig, _> = toml::from_str(stock_config_toml());
        assert!(parsed.is_ok());
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(parsed.paths.template, defaults.paths.template);
        assert_eq!(parsed.paths.source, defaults.paths.source);
        assert_eq!(parsed.paths.output, defaults.paths.output);
        assert_eq!(parsed.markdown.tables, defaults.markdown.tables);
        assert_eq!(
            parsed.markdown.smart_punctuation,
            defaults.markdown.smart_punctuation
        );
        assert_eq!(parsed.diagrams.enabled, defaults.diagrams.enabled);
    }
}
