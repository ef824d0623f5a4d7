//! # Railpress
//!
//! A minimal static site generator for grammar and syntax documentation.
//! Your filesystem is the data source: a tree of Markdown files becomes an
//! identically shaped tree of HTML pages, wrapped in a shared template, with
//! fenced `Railroad:` code blocks replaced by inline railroad diagrams.
//!
//! # Architecture: One Pass, Two Phases
//!
//! A build runs two phases over the filesystem, in order:
//!
//! ```text
//! 1. Mirror    template/  →  html/     (delete output, copy static assets)
//! 2. Compile   src/       →  html/     (walk tree, render every .md page)
//! ```
//!
//! The compile phase is driven by the tree walker: for every Markdown file it
//! invokes the page renderer, which runs the diagram substitution pass over
//! the raw source, converts the result to HTML, and merges it into the shared
//! page template. Everything is sequential and synchronous — a build either
//! completes or stops at the first error.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`mirror`] | Phase 1 — resets the output root and copies template assets into it |
//! | [`walk`] | Phase 2 — recursive tree walk, tracks the relative up-path, drives the renderer |
//! | [`render`] | Renders one page: title extraction, diagram pass, Markdown → HTML, template merge |
//! | [`diagram`] | Finds fenced `Railroad:` blocks and replaces them with rendered SVG |
//! | [`template`] | Shared page template: placeholder validation and substitution |
//! | [`config`] | Optional `config.toml` loading and validation |
//! | [`output`] | CLI output formatting — per-page display of build results |
//!
//! # Design Decisions
//!
//! ## A Text Template, Not a Template Engine
//!
//! Pages are produced by substituting three literal tokens (`{title}`, `{up}`,
//! `{content}`) into a plain HTML file the user owns. There is no template
//! language to learn and nothing to escape; the template is an ordinary file
//! sitting next to the site's CSS, edited with the same tools.
//!
//! ## Inline Diagrams, No External Toolchain
//!
//! Railroad diagrams are rendered at build time by the pure-Rust
//! [`railroad`](https://docs.rs/railroad) crate and embedded directly in the
//! page as SVG. The published site needs no JavaScript and no diagram
//! service; a description written in a fenced block is all the source there
//! is.
//!
//! ## Destructive Output
//!
//! The output root is deleted and rebuilt on every run. There is no partial
//! or incremental mode, so the output can never drift out of sync with the
//! source tree — what is on disk after a build is exactly what the build
//! produced.

pub mod config;
pub mod diagram;
pub mod mirror;
pub mod output;
pub mod render;
pub mod template;
pub mod walk;
