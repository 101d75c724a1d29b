//! Source positions attached to every occurrence record.

use std::fmt;

/// A 1-based line / 0-based column pair. The zero position is reserved for
/// synthetic occurrences with no source text behind them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start and end of the source text one syntax node covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub from: Position,
    pub to: Position,
}

impl Span {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from == self.to {
            write!(f, "{}", self.from)
        } else {
            write!(f, "{}-{}", self.from, self.to)
        }
    }
}

/// A file (when known) plus the span a declaration covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: Option<String>,
    pub span: Span,
}

impl Location {
    pub fn new(file: Option<String>, span: Span) -> Self {
        Self { file, span }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.as_deref().unwrap_or(""), self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        let loc = Location::new(
            Some("lib/user.rb".to_string()),
            Span::new(Position::new(3, 2), Position::new(7, 5)),
        );
        assert_eq!(loc.to_string(), "lib/user.rb:3:2-7:5");
    }

    #[test]
    fn test_display_without_file_or_extent() {
        let loc = Location::new(None, Span::default());
        assert_eq!(loc.to_string(), ":0:0");
    }
}
