//! Lowers the tree-sitter-ruby concrete syntax tree into the generic tree
//! consumed by the scope-building phase.
//!
//! The lowering is structural and total: every named CST node becomes one
//! [`Node`], kinds the walker discriminates keep their identity, and
//! everything else collapses to [`NodeKind::Other`] with its children
//! intact. tree-sitter rows are 0-based; lines in the model are 1-based.

use crate::ast::{Node, NodeKind};
use crate::parsing::{ParseError, SourceParser};
use model::{Position, Span};
use tree_sitter::Node as CstNode;

pub struct TreeSitterParser;

impl TreeSitterParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TreeSitterParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for TreeSitterParser {
    fn parse_string(&self, source: &str) -> Result<Node, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&tree_sitter_ruby::LANGUAGE.into())?;
        let tree = parser.parse(source, None).ok_or(ParseError::Syntax)?;
        let root = tree.root_node();
        // All-or-nothing: a file with any syntax error produces no tree.
        if root.has_error() {
            return Err(ParseError::Syntax);
        }
        Ok(lower(root, source.as_bytes()))
    }
}

fn lower(node: CstNode, src: &[u8]) -> Node {
    let kind = kind_of(node, src);
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .map(|child| lower(child, src))
        .collect();
    Node::new(kind, children, span_of(node))
}

fn kind_of(node: CstNode, src: &[u8]) -> NodeKind {
    match node.kind() {
        "program" => NodeKind::Program,
        "begin" | "body_statement" => NodeKind::Begin,
        "module" => NodeKind::Module,
        "class" => NodeKind::Class,
        "superclass" => NodeKind::Superclass,
        "method" => NodeKind::Method {
            name: field_text(node, "name", src),
        },
        "singleton_method" => NodeKind::SingletonMethod {
            name: field_text(node, "name", src),
        },
        "method_parameters" | "bare_parameters" => NodeKind::MethodParameters,
        "optional_parameter" => NodeKind::OptionalParameter,
        "splat_parameter" => NodeKind::SplatParameter,
        "hash_splat_parameter" => NodeKind::HashSplatParameter,
        "keyword_parameter" => NodeKind::KeywordParameter,
        "block_parameter" => NodeKind::BlockParameter,
        "assignment" | "operator_assignment" => NodeKind::Assignment,
        "call" => NodeKind::Call {
            method: field_text(node, "method", src),
        },
        "argument_list" => NodeKind::ArgumentList,
        "block" | "do_block" => NodeKind::Block,
        "scope_resolution" => NodeKind::ScopeResolution,
        "constant" => NodeKind::Constant {
            name: node_text(node, src),
        },
        "identifier" => NodeKind::Identifier {
            name: node_text(node, src),
        },
        "simple_symbol" => NodeKind::SymbolLit {
            name: node_text(node, src)
                .trim_start_matches(':')
                .to_string(),
        },
        "self" => NodeKind::SelfRef,
        _ => NodeKind::Other,
    }
}

fn field_text(node: CstNode, field: &str, src: &[u8]) -> String {
    node.child_by_field_name(field)
        .and_then(|child| child.utf8_text(src).ok())
        .unwrap_or_default()
        .to_string()
}

fn node_text(node: CstNode, src: &[u8]) -> String {
    node.utf8_text(src).unwrap_or_default().to_string()
}

fn span_of(node: CstNode) -> Span {
    Span::new(position(node.start_position()), position(node.end_position()))
}

fn position(point: tree_sitter::Point) -> Position {
    Position::new(point.row + 1, point.column)
}
