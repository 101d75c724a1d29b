//! The syntax-tree boundary consumed by the scope-building phase.
//!
//! Trees come from an external parser (see [`crate::parsing`]) already
//! built: every node is a kind tag, an ordered child list, and a source
//! span. The kind set is closed and only discriminates the shapes the
//! walker acts on; anything else is [`NodeKind::Other`] and gets traversed
//! transparently.
//!
//! Layout conventions the walker relies on:
//!
//! - A `Module` or `Class` node's first child is its name expression, a
//!   [`NodeKind::Constant`] or [`NodeKind::ScopeResolution`] subtree.
//! - A `Class` with a superclass expression carries it wrapped in a
//!   [`NodeKind::Superclass`] child.
//! - A `Call`'s receiver, [`NodeKind::ArgumentList`], and [`NodeKind::Block`]
//!   are ordinary children.
//! - Parameter nodes nest the [`NodeKind::Identifier`] that names them.

use model::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    Begin,
    Module,
    Class,
    Superclass,
    Method { name: String },
    SingletonMethod { name: String },
    MethodParameters,
    OptionalParameter,
    SplatParameter,
    HashSplatParameter,
    KeywordParameter,
    BlockParameter,
    Assignment,
    Call { method: String },
    ArgumentList,
    Block,
    ScopeResolution,
    Constant { name: String },
    Identifier { name: String },
    SymbolLit { name: String },
    SelfRef,
    Other,
}

impl Node {
    pub fn new(kind: NodeKind, children: Vec<Node>, span: Span) -> Self {
        Self {
            kind,
            children,
            span,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    fn leaf(kind: NodeKind) -> Self {
        Self::new(kind, Vec::new(), Span::default())
    }

    pub fn program(statements: Vec<Node>) -> Self {
        Self::new(NodeKind::Program, statements, Span::default())
    }

    pub fn begin(statements: Vec<Node>) -> Self {
        Self::new(NodeKind::Begin, statements, Span::default())
    }

    /// `module <name> ... end`; `name` is a constant path expression.
    pub fn module(name: Node, body: Vec<Node>) -> Self {
        let mut children = vec![name];
        children.extend(body);
        Self::new(NodeKind::Module, children, Span::default())
    }

    /// `class <name> [< superclass] ... end`.
    pub fn class(name: Node, superclass: Option<Node>, body: Vec<Node>) -> Self {
        let mut children = vec![name];
        if let Some(superclass) = superclass {
            children.push(Self::new(
                NodeKind::Superclass,
                vec![superclass],
                Span::default(),
            ));
        }
        children.extend(body);
        Self::new(NodeKind::Class, children, Span::default())
    }

    pub fn method(name: &str, params: Vec<Node>, body: Vec<Node>) -> Self {
        let mut children = Vec::new();
        if !params.is_empty() {
            children.push(Self::new(NodeKind::MethodParameters, params, Span::default()));
        }
        children.extend(body);
        Self::new(
            NodeKind::Method {
                name: name.to_string(),
            },
            children,
            Span::default(),
        )
    }

    pub fn singleton_method(name: &str, receiver: Node, params: Vec<Node>, body: Vec<Node>) -> Self {
        let mut children = vec![receiver];
        if !params.is_empty() {
            children.push(Self::new(NodeKind::MethodParameters, params, Span::default()));
        }
        children.extend(body);
        Self::new(
            NodeKind::SingletonMethod {
                name: name.to_string(),
            },
            children,
            Span::default(),
        )
    }

    pub fn required_param(name: &str) -> Self {
        Self::identifier(name)
    }

    pub fn optional_param(name: &str, default: Node) -> Self {
        Self::new(
            NodeKind::OptionalParameter,
            vec![Self::identifier(name), default],
            Span::default(),
        )
    }

    pub fn splat_param(name: Option<&str>) -> Self {
        let children = name.map(Self::identifier).into_iter().collect();
        Self::new(NodeKind::SplatParameter, children, Span::default())
    }

    pub fn hash_splat_param(name: Option<&str>) -> Self {
        let children = name.map(Self::identifier).into_iter().collect();
        Self::new(NodeKind::HashSplatParameter, children, Span::default())
    }

    pub fn keyword_param(name: &str) -> Self {
        Self::new(
            NodeKind::KeywordParameter,
            vec![Self::identifier(name)],
            Span::default(),
        )
    }

    pub fn block_param(name: &str) -> Self {
        Self::new(
            NodeKind::BlockParameter,
            vec![Self::identifier(name)],
            Span::default(),
        )
    }

    pub fn assign(lhs: Node, rhs: Node) -> Self {
        Self::new(NodeKind::Assignment, vec![lhs, rhs], Span::default())
    }

    pub fn call(method: &str, args: Vec<Node>) -> Self {
        let mut children = Vec::new();
        if !args.is_empty() {
            children.push(Self::new(NodeKind::ArgumentList, args, Span::default()));
        }
        Self::new(
            NodeKind::Call {
                method: method.to_string(),
            },
            children,
            Span::default(),
        )
    }

    pub fn call_with_block(method: &str, args: Vec<Node>, block_body: Vec<Node>) -> Self {
        let mut node = Self::call(method, args);
        node.children
            .push(Self::new(NodeKind::Block, block_body, Span::default()));
        node
    }

    pub fn constant(name: &str) -> Self {
        Self::leaf(NodeKind::Constant {
            name: name.to_string(),
        })
    }

    /// `A::B` (`scope` is `None` for a leading `::`).
    pub fn scope_resolution(scope: Option<Node>, name: &str) -> Self {
        let mut children: Vec<Node> = scope.into_iter().collect();
        children.push(Self::constant(name));
        Self::new(NodeKind::ScopeResolution, children, Span::default())
    }

    pub fn identifier(name: &str) -> Self {
        Self::leaf(NodeKind::Identifier {
            name: name.to_string(),
        })
    }

    pub fn symbol(name: &str) -> Self {
        Self::leaf(NodeKind::SymbolLit {
            name: name.to_string(),
        })
    }

    pub fn self_ref() -> Self {
        Self::leaf(NodeKind::SelfRef)
    }

    /// A construct the walker has no interest in; children stay visible.
    pub fn other(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Other, children, Span::default())
    }
}
