//! Railroad diagram substitution.
//!
//! Scans raw page source for fenced blocks of the form
//!
//! ````text
//! ```Railroad:
//! Sequence("let", NonTerminal("pattern"), Optional("mut"))
//! ```
//! ````
//!
//! and replaces each with an inline SVG railroad diagram, leaving every
//! other byte of the page — ordering, whitespace, everything — untouched.
//! The pass runs before Markdown conversion, so the emitted SVG reaches the
//! final page as a raw HTML block.
//!
//! ## Scanning
//!
//! A two-cursor scan over the text: find the literal start marker
//! `` ```Railroad: ``, then the next plain `` ``` `` close marker. The text
//! strictly between them is the diagram description. The search is purely
//! textual — no nesting, no escaping — so a `` ``` `` inside a description
//! terminates the block at that point.
//!
//! ## Malformed input
//!
//! A start marker with no close marker fails the whole page with
//! [`DiagramError::Unterminated`], carrying the line of the opening marker.
//! Silently swallowing the rest of the page was the other candidate policy;
//! failing loudly was chosen because an unterminated fence is always an
//! authoring mistake.

mod parse;
mod render;

pub use parse::{DiagramNode, ParseError};

use thiserror::Error;

/// Opens a diagram block. The description follows immediately after.
pub const START_MARKER: &str = "```Railroad:";
/// Closes a diagram block.
pub const END_MARKER: &str = "```";

#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("unterminated Railroad block opened on line {line}")]
    Unterminated { line: usize },
    #[error("Railroad block on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },
}

/// Result of a substitution pass over one page.
#[derive(Debug)]
pub struct Substituted {
    /// The page text with every diagram block replaced by SVG markup.
    pub text: String,
    /// Number of diagrams rendered.
    pub diagrams: usize,
}

/// Replace every fenced `Railroad:` block in `source` with rendered SVG.
///
/// Text outside the blocks is preserved byte-for-byte; input containing no
/// start marker comes back unchanged.
pub fn substitute(source: &str) -> Result<Substituted, DiagramError> {
    let mut text = String::with_capacity(source.len());
    let mut cursor = 0;
    let mut diagrams = 0;

    while let Some(found) = source[cursor..].find(START_MARKER) {
        let start = cursor + found;
        let desc_start = start + START_MARKER.len();
        let Some(found_end) = source[desc_start..].find(END_MARKER) else {
            return Err(DiagramError::Unterminated {
                line: line_of(source, start),
            });
        };
        let desc_end = desc_start + found_end;

        let node =
            parse::parse(&source[desc_start..desc_end]).map_err(|e| DiagramError::Parse {
                line: line_of(source, start),
                source: e,
            })?;

        text.push_str(&source[cursor..start]);
        text.push_str(&render::to_svg(&node));
        diagrams += 1;
        cursor = desc_end + END_MARKER.len();
    }

    text.push_str(&source[cursor..]);
    Ok(Substituted { text, diagrams })
}

/// 1-based line number of a byte offset.
fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].bytes().filter(|&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_free_input_unchanged() {
        let source = "# Title\n\nJust some *markdown*, with ``inline code``.\n";
        let result = substitute(source).unwrap();
        assert_eq!(result.text, source);
        assert_eq!(result.diagrams, 0);
    }

    #[test]
    fn surrounding_text_preserved_exactly() {
        let result = substitute("A ```Railroad:\"x\"``` B").unwrap();
        assert!(result.text.starts_with("A "));
        assert!(result.text.ends_with(" B"));
        assert!(result.text.contains("<svg"));
        assert_eq!(result.diagrams, 1);
    }

    #[test]
    fn multiple_blocks_replaced_in_order() {
        let source = "one\n```Railroad:\"a\"```\ntwo\n```Railroad:NonTerminal(\"b\")```\nthree\n";
        let result = substitute(source).unwrap();
        assert_eq!(result.diagrams, 2);

        let first_svg = result.text.find("<svg").unwrap();
        let second_svg = result.text.rfind("<svg").unwrap();
        assert!(first_svg < second_svg);

        let one = result.text.find("one").unwrap();
        let two = result.text.find("two").unwrap();
        let three = result.text.find("three").unwrap();
        assert!(one < first_svg && first_svg < two);
        assert!(two < second_svg && second_svg < three);
    }

    #[test]
    fn whitespace_between_blocks_untouched() {
        let source = "```Railroad:\"a\"```  \t\n\n```Railroad:\"b\"```";
        let result = substitute(source).unwrap();
        assert!(result.text.contains("  \t\n\n"));
    }

    #[test]
    fn unterminated_block_reports_opening_line() {
        let source = "line one\nline two\n```Railroad:\"x\"\nno close";
        match substitute(source) {
            Err(DiagramError::Unterminated { line }) => assert_eq!(line, 3),
            other => panic!("expected Unterminated, got {other:?}"),
        }
    }

    #[test]
    fn close_marker_inside_description_ends_block_early() {
        // The scan is textual: the first ``` closes the block, the rest of
        // the line is ordinary page text.
        let source = "```Railroad:\"a\"``` trailing ```Railroad:\"b\"```";
        let result = substitute(source).unwrap();
        assert_eq!(result.diagrams, 2);
        assert!(result.text.contains(" trailing "));
    }

    #[test]
    fn parse_error_carries_block_line() {
        let source = "intro\n\n```Railroad:Bogus(\"x\")```\n";
        match substitute(source) {
            Err(DiagramError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn description_may_span_lines() {
        let source = "```Railroad:\nChoice(\n    \"a\",\n    \"b\",\n)\n```";
        let result = substitute(source).unwrap();
        assert_eq!(result.diagrams, 1);
        assert!(result.text.contains("<svg"));
    }
}
