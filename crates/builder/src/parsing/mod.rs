//! Parser adapters: everything that knows how source text becomes a tree.
//!
//! The model-building phases never see a concrete parser; they consume
//! [`crate::ast::Node`] trees. Adapters implementing [`SourceParser`] sit in
//! front and translate a real parser's output into that shape. One backend
//! ships: [`TreeSitterParser`] over tree-sitter-ruby.

mod treesitter;

pub use treesitter::TreeSitterParser;

use crate::ast::Node;
use std::path::Path;
use thiserror::Error;

/// Errors surfaced while turning source text into a syntax tree. A failed
/// file yields no tree at all; the pipeline records the file and moves on.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("source contains syntax errors")]
    Syntax,

    #[error("failed to load the Ruby grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
}

pub trait SourceParser {
    fn parse_string(&self, source: &str) -> Result<Node, ParseError>;

    fn parse_file(&self, path: &Path) -> Result<Node, ParseError> {
        let source = std::fs::read_to_string(path)?;
        self.parse_string(&source)
    }
}
