//! Single-page rendering.
//!
//! Produces one complete HTML page from one Markdown source file:
//!
//! 1. Read the file.
//! 2. Take the title from the first line — a `#` marker followed by the
//!    title text (`#Hello World` → `Hello World`, surrounding whitespace
//!    trimmed).
//! 3. Run the diagram substitution pass over the full source.
//! 4. Convert the result to HTML with `pulldown-cmark`.
//! 5. Merge title, up-path and content into the shared template.
//!
//! Rendering is deterministic given identical input file and template.
//!
//! Every source file must have a non-empty first line starting with `#`;
//! an empty file or a missing marker fails the build with a descriptive
//! error rather than producing a half-formed page.

use crate::diagram::{self, DiagramError};
use crate::template::PageTemplate;
use pulldown_cmark::{Options, Parser, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// First-line marker introducing the page title.
pub const TITLE_MARKER: char = '#';

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}: source file is empty (the first line must hold the page title)")]
    EmptySource(PathBuf),
    #[error("{0}: first line must start with '#' followed by the page title")]
    MissingTitle(PathBuf),
    #[error("{path}: {source}")]
    Diagram {
        path: PathBuf,
        #[source]
        source: DiagramError,
    },
}

/// Everything a page render needs besides the file itself.
///
/// Built once per run from config and the loaded template, then borrowed by
/// every render — the template is an explicit value, not process-wide state.
pub struct RenderContext {
    pub template: PageTemplate,
    pub markdown_options: Options,
    pub diagrams_enabled: bool,
}

/// One rendered page, before or after it is written out.
#[derive(Debug)]
pub struct RenderedPage {
    /// Title from the first source line, marker stripped.
    pub title: String,
    /// Complete HTML document.
    pub html: String,
    /// Number of railroad diagrams substituted into this page.
    pub diagrams: usize,
}

/// Render one source file to a complete HTML page in memory.
///
/// `up` is the relative ascent prefix for this page's depth below the
/// output root (`""` at the root, `"../"` one level down, and so on).
pub fn render_page(
    ctx: &RenderContext,
    input: &Path,
    up: &str,
) -> Result<RenderedPage, RenderError> {
    let source = fs::read_to_string(input)?;
    let title = extract_title(&source, input)?;

    let (body, diagrams) = if ctx.diagrams_enabled {
        let substituted = diagram::substitute(&source).map_err(|e| RenderError::Diagram {
            path: input.to_path_buf(),
            source: e,
        })?;
        (substituted.text, substituted.diagrams)
    } else {
        (source, 0)
    };

    let content = markdown_to_html(&body, ctx.markdown_options);
    let html = ctx.template.render(&title, up, &content);

    Ok(RenderedPage {
        title,
        html,
        diagrams,
    })
}

/// Render one source file and write the result to `output`.
pub fn render_page_to(
    ctx: &RenderContext,
    input: &Path,
    output: &Path,
    up: &str,
) -> Result<RenderedPage, RenderError> {
    let page = render_page(ctx, input, up)?;
    fs::write(output, &page.html)?;
    Ok(page)
}

/// Convert Markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str, options: Options) -> String {
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Title = first line minus its leading `#`, trimmed.
fn extract_title(source: &str, path: &Path) -> Result<String, RenderError> {
    let first = source
        .lines()
        .next()
        .ok_or_else(|| RenderError::EmptySource(path.to_path_buf()))?;
    let title = first
        .strip_prefix(TITLE_MARKER)
        .ok_or_else(|| RenderError::MissingTitle(path.to_path_buf()))?;
    Ok(title.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_ctx() -> RenderContext {
        RenderContext {
            template: PageTemplate::new(
                "<title>{title}</title><base href=\"{up}\">{content}".to_string(),
                Path::new("test-template"),
            )
            .unwrap(),
            markdown_options: Options::empty(),
            diagrams_enabled: true,
        }
    }

    fn write_page(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn title_marker_stripped_and_trimmed() {
        let source = "#Hello World\n\nBody text.\n";
        assert_eq!(
            extract_title(source, Path::new("p.md")).unwrap(),
            "Hello World"
        );
    }

    #[test]
    fn title_with_space_after_marker() {
        assert_eq!(
            extract_title("# Spaced\n", Path::new("p.md")).unwrap(),
            "Spaced"
        );
    }

    #[test]
    fn empty_file_is_error() {
        assert!(matches!(
            extract_title("", Path::new("p.md")),
            Err(RenderError::EmptySource(_))
        ));
    }

    #[test]
    fn missing_marker_is_error() {
        assert!(matches!(
            extract_title("Hello\n", Path::new("p.md")),
            Err(RenderError::MissingTitle(_))
        ));
    }

    #[test]
    fn renders_title_up_and_content() {
        let tmp = TempDir::new().unwrap();
        let input = write_page(&tmp, "page.md", "# My Page\n\nSome *emphasis* here.\n");

        let page = render_page(&test_ctx(), &input, "../").unwrap();
        assert_eq!(page.title, "My Page");
        assert!(page.html.contains("<title>My Page</title>"));
        assert!(page.html.contains("<base href=\"../\">"));
        assert!(page.html.contains("<em>emphasis</em>"));
        assert_eq!(page.diagrams, 0);
    }

    #[test]
    fn diagram_block_becomes_svg() {
        let tmp = TempDir::new().unwrap();
        let input = write_page(
            &tmp,
            "grammar.md",
            "# Grammar\n\n```Railroad:\"let\"```\n",
        );

        let page = render_page(&test_ctx(), &input, "").unwrap();
        assert_eq!(page.diagrams, 1);
        assert!(page.html.contains("<svg"));
    }

    #[test]
    fn diagrams_disabled_leaves_fence_alone() {
        let tmp = TempDir::new().unwrap();
        let input = write_page(
            &tmp,
            "grammar.md",
            "# Grammar\n\n```Railroad:\"let\"\n```\n",
        );

        let mut ctx = test_ctx();
        ctx.diagrams_enabled = false;
        let page = render_page(&ctx, &input, "").unwrap();
        assert_eq!(page.diagrams, 0);
        assert!(!page.html.contains("<svg"));
        // The fence falls through to the Markdown renderer as a code block.
        assert!(page.html.contains("<code"));
    }

    #[test]
    fn diagram_error_names_the_file() {
        let tmp = TempDir::new().unwrap();
        let input = write_page(&tmp, "bad.md", "# Bad\n\n```Railroad:\"open\n");

        match render_page(&test_ctx(), &input, "") {
            Err(RenderError::Diagram { path, .. }) => assert!(path.ends_with("bad.md")),
            other => panic!("expected Diagram error, got {other:?}"),
        }
    }

    #[test]
    fn render_page_to_writes_the_file() {
        let tmp = TempDir::new().unwrap();
        let input = write_page(&tmp, "page.md", "# T\n\nbody\n");
        let output = tmp.path().join("page.html");

        render_page_to(&test_ctx(), &input, &output, "").unwrap();
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("<title>T</title>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        let input = write_page(
            &tmp,
            "page.md",
            "# T\n\n```Railroad:Choice(\"a\", \"b\")```\ntail\n",
        );

        let ctx = test_ctx();
        let first = render_page(&ctx, &input, "../").unwrap();
        let second = render_page(&ctx, &input, "../").unwrap();
        assert_eq!(first.html, second.html);
    }
}
