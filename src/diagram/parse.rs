//! Parser for the railroad description language.
//!
//! Descriptions are small constructor-call expressions mirroring the node
//! vocabulary of the rendering library:
//!
//! ```text
//! Sequence("let", NonTerminal("pattern"), Optional("mut"))
//! Choice("integer", "float", "string")
//! Repeat(NonTerminal("item"), ",")
//! ```
//!
//! A bare string literal is shorthand for `Terminal(...)`, and an optional
//! top-level `Diagram(...)` wrapper is accepted and unwrapped. Whitespace
//! (including newlines) is insignificant between tokens and trailing commas
//! are allowed, so descriptions can be formatted freely inside their fence.
//!
//! Grammar:
//!
//! ```text
//! node   := string | call
//! call   := ident "(" args ")"
//! args   := [ node ("," node)* [","] ]        for container constructors
//!         | string                            for leaf constructors
//! string := '"' (char | '\"' | '\\' | '\n')* '"'
//! ```

use thiserror::Error;

/// Parsed diagram description, one node per constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramNode {
    /// A literal token, drawn in a rounded box.
    Terminal(String),
    /// A reference to another production, drawn in a square box.
    NonTerminal(String),
    /// Free-text annotation.
    Comment(String),
    /// Left-to-right concatenation.
    Sequence(Vec<DiagramNode>),
    /// Vertical concatenation.
    Stack(Vec<DiagramNode>),
    /// Mutually exclusive branches.
    Choice(Vec<DiagramNode>),
    /// Zero-or-one bypass.
    Optional(Box<DiagramNode>),
    /// One-or-more loop, with an optional separator on the repeat path.
    Repeat {
        body: Box<DiagramNode>,
        separator: Option<Box<DiagramNode>>,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (at offset {offset})")]
pub struct ParseError {
    /// Byte offset into the description where parsing stopped.
    pub offset: usize,
    pub message: String,
}

/// Parse a complete description into a single root node.
pub fn parse(input: &str) -> Result<DiagramNode, ParseError> {
    let mut parser = Parser { input, pos: 0 };
    parser.skip_ws();
    let node = parser.node()?;
    parser.skip_ws();
    if !parser.at_end() {
        return Err(parser.error("expected end of description"));
    }
    Ok(node)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{expected}'")))
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn node(&mut self) -> Result<DiagramNode, ParseError> {
        self.skip_ws();
        match self.peek() {
            Some('"') => Ok(DiagramNode::Terminal(self.string()?)),
            Some(c) if c.is_ascii_alphabetic() => self.call(),
            Some(c) => Err(self.error(format!(
                "expected a constructor or string literal, found {c:?}"
            ))),
            None => Err(self.error(
                "expected a constructor or string literal, found end of description",
            )),
        }
    }

    fn ident(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.bump();
        }
        &self.input[start..self.pos]
    }

    fn call(&mut self) -> Result<DiagramNode, ParseError> {
        let name_offset = self.pos;
        let name = self.ident();
        self.skip_ws();
        self.expect('(')?;
        match name {
            "Terminal" => Ok(DiagramNode::Terminal(self.leaf_arg()?)),
            "NonTerminal" => Ok(DiagramNode::NonTerminal(self.leaf_arg()?)),
            "Comment" => Ok(DiagramNode::Comment(self.leaf_arg()?)),
            "Optional" => {
                let args = self.node_args()?;
                let [inner] = <[DiagramNode; 1]>::try_from(args).map_err(|_| ParseError {
                    offset: name_offset,
                    message: "Optional takes exactly one argument".into(),
                })?;
                Ok(DiagramNode::Optional(Box::new(inner)))
            }
            "Repeat" => {
                let mut args = self.node_args()?;
                match args.len() {
                    1 => Ok(DiagramNode::Repeat {
                        body: Box::new(args.remove(0)),
                        separator: None,
                    }),
                    2 => {
                        let separator = args.pop().map(Box::new);
                        Ok(DiagramNode::Repeat {
                            body: Box::new(args.remove(0)),
                            separator,
                        })
                    }
                    _ => Err(ParseError {
                        offset: name_offset,
                        message: "Repeat takes one or two arguments (body, optional separator)"
                            .into(),
                    }),
                }
            }
            "Sequence" | "Stack" | "Choice" | "Diagram" => {
                let mut args = self.node_args()?;
                if args.is_empty() {
                    return Err(ParseError {
                        offset: name_offset,
                        message: format!("{name} requires at least one argument"),
                    });
                }
                Ok(match name {
                    "Sequence" => DiagramNode::Sequence(args),
                    "Stack" => DiagramNode::Stack(args),
                    "Choice" => DiagramNode::Choice(args),
                    // Diagram(...) is a transparent wrapper: one child passes
                    // through, several become an implicit sequence.
                    _ => {
                        if args.len() == 1 {
                            args.remove(0)
                        } else {
                            DiagramNode::Sequence(args)
                        }
                    }
                })
            }
            other => Err(ParseError {
                offset: name_offset,
                message: format!("unknown constructor `{other}`"),
            }),
        }
    }

    /// A single string argument followed by the closing paren, for the leaf
    /// constructors (`Terminal`, `NonTerminal`, `Comment`).
    fn leaf_arg(&mut self) -> Result<String, ParseError> {
        self.skip_ws();
        let value = self.string()?;
        self.skip_ws();
        self.eat(',');
        self.skip_ws();
        self.expect(')')?;
        Ok(value)
    }

    /// Comma-separated node arguments up to and including the closing paren.
    fn node_args(&mut self) -> Result<Vec<DiagramNode>, ParseError> {
        let mut args = Vec::new();
        self.skip_ws();
        if self.eat(')') {
            return Ok(args);
        }
        loop {
            args.push(self.node()?);
            self.skip_ws();
            if self.eat(',') {
                self.skip_ws();
                if self.eat(')') {
                    break;
                }
            } else {
                self.expect(')')?;
                break;
            }
        }
        Ok(args)
    }

    fn string(&mut self) -> Result<String, ParseError> {
        if !self.eat('"') {
            return Err(self.error("expected a string literal"));
        }
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(value),
                Some('\\') => match self.bump() {
                    Some('"') => value.push('"'),
                    Some('\\') => value.push('\\'),
                    Some('n') => value.push('\n'),
                    Some(c) => return Err(self.error(format!("unknown escape `\\{c}`"))),
                    None => return Err(self.error("unterminated string literal")),
                },
                Some(c) => value.push(c),
                None => return Err(self.error("unterminated string literal")),
            }
        }
    }
}
