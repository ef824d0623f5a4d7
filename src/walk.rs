//! Recursive tree walk: discovers Markdown files and drives the renderer.
//!
//! For each directory entry, in sorted order:
//!
//! - a file with a `.md` extension (case-insensitive) is rendered to the
//!   mirrored output path with the extension replaced by `.html`;
//! - a directory is recursed into, with the relative up-path extended by
//!   one `../` step and the equivalent output subdirectory created;
//! - anything else (stray images, editor droppings, sockets) is skipped —
//!   not copied, not rendered — logged at debug level and counted in the
//!   report.
//!
//! Filesystem directory trees are acyclic for this purpose, so there is no
//! cycle detection and no depth limit.

use crate::render::{self, RenderContext, RenderError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Source files are selected by this extension.
pub const MARKDOWN_EXTENSION: &str = "md";
/// Rendered pages get this extension.
pub const OUTPUT_EXTENSION: &str = "html";
/// One level of ascent in the up-path prefix.
pub const UP_STEP: &str = "../";

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Whether the walk writes pages out or only renders them in memory.
///
/// `DryRun` backs the `check` subcommand: the full pipeline runs — titles
/// extracted, diagrams parsed and rendered — but nothing touches disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Write,
    DryRun,
}

/// What one walk over the source tree produced.
#[derive(Debug, Default)]
pub struct SiteReport {
    /// Every rendered page, in walk (sorted, depth-first) order.
    pub pages: Vec<PageRecord>,
    /// Entries that were neither Markdown files nor directories.
    pub skipped: usize,
}

impl SiteReport {
    /// Total diagrams across all pages.
    pub fn diagram_count(&self) -> usize {
        self.pages.iter().map(|p| p.diagrams).sum()
    }
}

/// One rendered page, paths relative to their respective roots.
#[derive(Debug)]
pub struct PageRecord {
    pub title: String,
    /// Source path relative to the source root.
    pub source: PathBuf,
    /// Output path relative to the output root.
    pub output: PathBuf,
    pub diagrams: usize,
}

/// Walk the source tree and render every Markdown file into the output
/// tree, mirroring the directory structure.
///
/// Pages at the root get an empty up-path; each directory level below adds
/// one `../`.
pub fn compile_tree(
    ctx: &RenderContext,
    source_root: &Path,
    output_root: &Path,
    mode: Mode,
) -> Result<SiteReport, WalkError> {
    let mut report = SiteReport::default();
    if mode == Mode::Write {
        fs::create_dir_all(output_root)?;
    }
    compile_dir(
        ctx,
        source_root,
        output_root,
        "",
        Path::new(""),
        mode,
        &mut report,
    )?;
    Ok(report)
}

fn compile_dir(
    ctx: &RenderContext,
    dir: &Path,
    out_dir: &Path,
    up: &str,
    rel: &Path,
    mode: Mode,
    report: &mut SiteReport,
) -> Result<(), WalkError> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name();

        if path.is_dir() {
            let child_out = out_dir.join(&name);
            if mode == Mode::Write {
                fs::create_dir_all(&child_out)?;
            }
            let child_up = format!("{UP_STEP}{up}");
            compile_dir(
                ctx,
                &path,
                &child_out,
                &child_up,
                &rel.join(&name),
                mode,
                report,
            )?;
        } else if is_markdown(&path) {
            let output = out_dir.join(&name).with_extension(OUTPUT_EXTENSION);
            let page = match mode {
                Mode::Write => render::render_page_to(ctx, &path, &output, up)?,
                Mode::DryRun => render::render_page(ctx, &path, up)?,
            };
            log::debug!("rendered {} -> {}", path.display(), output.display());
            report.pages.push(PageRecord {
                title: page.title,
                source: rel.join(&name),
                output: rel.join(&name).with_extension(OUTPUT_EXTENSION),
                diagrams: page.diagrams,
            });
        } else {
            log::debug!("skipping non-markdown entry {}", path.display());
            report.skipped += 1;
        }
    }

    Ok(())
}

fn is_markdown(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|e| e.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
            .unwrap_or(false)
}
