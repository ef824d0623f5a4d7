//! CLI output formatting for build and check runs.
//!
//! Output is information-centric: the primary display for every page is its
//! semantic identity — positional index and title — with filesystem paths
//! as indented `Source:` context lines underneath.
//!
//! ```text
//! Pages
//! 001 Home → index.html
//!     Source: index.md
//! 002 Statements → guide/statements.html
//!     Source: guide/statements.md
//!     Diagrams: 3
//!
//! Generated 2 pages (3 diagrams), copied 4 assets
//! ```
//!
//! Each run kind has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::walk::{PageRecord, SiteReport};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Header + context lines for one page.
fn page_lines(index: usize, page: &PageRecord) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} {} → {}",
            format_index(index),
            page.title,
            page.output.display()
        ),
        format!("    Source: {}", page.source.display()),
    ];
    if page.diagrams > 0 {
        lines.push(format!("    Diagrams: {}", page.diagrams));
    }
    lines
}

fn page_listing(report: &SiteReport) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    for (idx, page) in report.pages.iter().enumerate() {
        lines.extend(page_lines(idx + 1, page));
    }
    lines
}

/// Format the result of a full build.
pub fn format_build_output(report: &SiteReport, assets_copied: usize) -> Vec<String> {
    let mut lines = page_listing(report);
    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages ({} diagrams), copied {} assets",
        report.pages.len(),
        report.diagram_count(),
        assets_copied
    ));
    if report.skipped > 0 {
        lines.push(format!(
            "Skipped {} non-markdown entries in the source tree",
            report.skipped
        ));
    }
    lines
}

/// Format the result of a dry-run check.
pub fn format_check_output(report: &SiteReport) -> Vec<String> {
    let mut lines = page_listing(report);
    lines.push(String::new());
    lines.push(format!(
        "Checked {} pages ({} diagrams), nothing written",
        report.pages.len(),
        report.diagram_count()
    ));
    lines
}

pub fn print_build_output(report: &SiteReport, assets_copied: usize) {
    for line in format_build_output(report, assets_copied) {
        println!("{}", line);
    }
}

pub fn print_check_output(report: &SiteReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
