//! SVG generation for parsed diagram descriptions.
//!
//! Maps [`DiagramNode`] onto the node types of the
//! [`railroad`](https://docs.rs/railroad) crate, wraps the root between the
//! start/end markers every diagram carries, and attaches the crate's default
//! stylesheet so each SVG is self-contained — no external CSS required on
//! the published page.

use railroad::{
    Choice, Comment, DEFAULT_CSS, Diagram, Empty, End, Node, NonTerminal, Optional, Repeat,
    Sequence, Stack, Start, Terminal,
};

use super::parse::DiagramNode;

type Boxed = Box<dyn Node>;

/// Render one parsed description to SVG markup.
///
/// Deterministic for a given description: identical input yields identical
/// markup, which keeps whole-site builds idempotent.
pub fn to_svg(node: &DiagramNode) -> String {
    let mut root: Sequence<Boxed> = Sequence::default();
    root.push(Box::new(Start));
    root.push(build(node));
    root.push(Box::new(End));

    let mut diagram = Diagram::new(root);
    diagram.add_element(
        railroad::svg::Element::new("style")
            .set("type", "text/css")
            .text(DEFAULT_CSS),
    );
    diagram.to_string()
}

fn build(node: &DiagramNode) -> Boxed {
    match node {
        DiagramNode::Terminal(label) => Box::new(Terminal::new(label.clone())),
        DiagramNode::NonTerminal(name) => Box::new(NonTerminal::new(name.clone())),
        DiagramNode::Comment(text) => Box::new(Comment::new(text.clone())),
        DiagramNode::Sequence(children) => {
            Box::new(Sequence::new(children.iter().map(build).collect()))
        }
        DiagramNode::Stack(children) => Box::new(Stack::new(children.iter().map(build).collect())),
        DiagramNode::Choice(children) => {
            Box::new(Choice::new(children.iter().map(build).collect()))
        }
        DiagramNode::Optional(inner) => Box::new(Optional::new(build(inner))),
        DiagramNode::Repeat { body, separator } => match separator {
            Some(sep) => Box::new(Repeat::new(build(body), build(sep))),
            None => Box::new(Repeat::new(build(body), Empty)),
        },
    }
}
