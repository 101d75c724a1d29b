//! The per-file scope-building pass.
//!
//! Walks one syntax tree top to bottom exactly once, creating or reusing
//! entities in the shared model and appending one occurrence record per
//! physical declaration site. Running the pass once per file against the
//! same model is what merges reopened namespaces: the first occurrence of a
//! qualified name creates the entity, every later one only appends.
//!
//! Scoping is lexical. A compound declaration (`module A::B::C`) becomes a
//! single child of the enclosing scope whose simple name is the full
//! `"A::B::C"` segment. Arbitrary calls are opaque: declarations inside
//! their arguments or blocks are invisible to the model, while declarations
//! nested in any other construct (conditionals, loops, `begin` bodies) are
//! found through transparent traversal.

use crate::ast::{Node, NodeKind};
use model::{
    AttrKind, IncludeDef, IncludeKind, Location, Model, Param, Params, PropertyDef, ScopeDefId,
    Sig, Span,
};
use tracing::warn;

pub struct BuildScopes<'a> {
    model: &'a mut Model,
    file: Option<String>,
    stack: Vec<ScopeDefId>,
    pending_sig: Option<Sig>,
}

impl<'a> BuildScopes<'a> {
    /// Runs the pass for one file. `tree` is `None` for a file that failed
    /// to parse; the model still records the synthetic root occurrence so
    /// the file stays visible, but nothing else is produced.
    pub fn run(model: &'a mut Model, file: Option<&str>, tree: Option<&Node>) {
        let mut phase = BuildScopes::new(model, file);
        if let Some(node) = tree {
            phase.visit(node);
        }
    }

    fn new(model: &'a mut Model, file: Option<&str>) -> Self {
        let file = file.map(str::to_owned);
        let root = model.root();
        let root_def = model.add_scope_def(root, Location::new(file.clone(), Span::default()), None);
        Self {
            model,
            file,
            stack: vec![root_def],
            pending_sig: None,
        }
    }

    fn visit(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Module => self.visit_module(node),
            NodeKind::Class => self.visit_class(node),
            NodeKind::Method { name } => self.visit_method(node, name, false),
            NodeKind::SingletonMethod { name } => self.visit_method(node, name, true),
            NodeKind::Assignment => self.visit_assignment(node),
            NodeKind::Call { method } => self.visit_call(node, method),
            _ => self.visit_all(&node.children),
        }
    }

    fn visit_all(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.visit(node);
        }
    }

    fn current(&self) -> ScopeDefId {
        *self.stack.last().expect("walker stack is never empty")
    }

    fn visit_module(&mut self, node: &Node) {
        self.pending_sig = None;
        let parent = self.current().scope;
        let name = scope_name(node.children.first());
        let scope = self.model.get_or_create_module(parent, &name);
        let def = self.model.add_scope_def(scope, self.loc(node), None);
        self.stack.push(def);
        self.visit_all(&node.children);
        self.stack.pop();
        self.pending_sig = None;
    }

    fn visit_class(&mut self, node: &Node) {
        self.pending_sig = None;
        let parent = self.current().scope;
        let name = scope_name(node.children.first());
        let superclass_name = node
            .children
            .iter()
            .find(|child| matches!(child.kind, NodeKind::Superclass))
            .map(|child| scope_name(Some(child)));
        let scope = self.model.get_or_create_class(parent, &name);
        let def = self.model.add_scope_def(scope, self.loc(node), superclass_name);
        self.stack.push(def);
        self.visit_all(&node.children);
        self.stack.pop();
        self.pending_sig = None;
    }

    // The receiver of a singleton declaration is deliberately ignored:
    // `def Other.f` still attaches to the lexically enclosing scope.
    fn visit_method(&mut self, node: &Node, name: &str, is_singleton: bool) {
        let scope = self.current().scope;
        let property = self.model.get_or_create_method(scope, name, is_singleton);
        let def = PropertyDef::Method {
            loc: self.loc(node),
            is_singleton,
            params: method_params(node),
            sig: self.pending_sig.take(),
        };
        self.model.add_property_def(property, def);
    }

    fn visit_assignment(&mut self, node: &Node) {
        match node.children.first().map(|lhs| &lhs.kind) {
            Some(NodeKind::Constant { .. }) | Some(NodeKind::ScopeResolution) => {
                self.visit_const_assign(node)
            }
            _ => self.visit_all(&node.children),
        }
    }

    fn visit_const_assign(&mut self, node: &Node) {
        let Some(name) = node.children.first().and_then(const_name) else {
            return;
        };
        let scope = self.current().scope;
        let property = self.model.get_or_create_const(scope, name);
        self.model
            .add_property_def(property, PropertyDef::Const { loc: self.loc(node) });
        self.pending_sig = None;
    }

    fn visit_call(&mut self, node: &Node, method: &str) {
        match method {
            "attr_reader" => self.visit_attr(node, AttrKind::Reader),
            "attr_writer" => self.visit_attr(node, AttrKind::Writer),
            "attr_accessor" => self.visit_attr(node, AttrKind::Accessor),
            "include" => self.visit_include(node, IncludeKind::Include),
            "prepend" => self.visit_include(node, IncludeKind::Prepend),
            "extend" => self.visit_include(node, IncludeKind::Extend),
            "sig" => self.visit_sig(node),
            // Any other call is opaque: declarations inside its arguments
            // or block never reach the model.
            _ => {}
        }
    }

    fn visit_attr(&mut self, node: &Node, kind: AttrKind) {
        let scope = self.current().scope;
        if !self.model.scope(scope).is_class() {
            warn!(
                "adding attributes to module `{}`",
                self.model.scope(scope).qname()
            );
            return;
        }
        let loc = self.loc(node);
        for name in symbol_args(node) {
            let property = self.model.get_or_create_attr(scope, name, kind);
            let def = PropertyDef::Attr {
                loc: loc.clone(),
                kind,
                // Only the first name of a multi-name declaration gets the
                // pending marker.
                sig: self.pending_sig.take(),
            };
            self.model.add_property_def(property, def);
        }
    }

    fn visit_include(&mut self, node: &Node, kind: IncludeKind) {
        let def = self.current();
        let name = first_arg(node)
            .map(|arg| scope_name(Some(arg)))
            .unwrap_or_default();
        self.model.add_include_def(def, IncludeDef { name, kind });
    }

    fn visit_sig(&mut self, node: &Node) {
        if self.pending_sig.is_some() {
            warn!("signature annotation with no definition attached, replacing it");
        }
        self.pending_sig = Some(Sig {
            loc: self.loc(node),
        });
    }

    fn loc(&self, node: &Node) -> Location {
        Location::new(self.file.clone(), node.span)
    }
}

/// Concatenates every constant segment found in a name expression, in
/// source order: `A::B::C` yields `"A::B::C"`. A leading `::` leaves no
/// segment behind, so fully-qualified spellings lose their prefix here.
fn scope_name(node: Option<&Node>) -> String {
    let mut names = Vec::new();
    if let Some(node) = node {
        collect_constants(node, &mut names);
    }
    names.join("::")
}

fn collect_constants<'n>(node: &'n Node, names: &mut Vec<&'n str>) {
    for child in &node.children {
        collect_constants(child, names);
    }
    if let NodeKind::Constant { name } = &node.kind {
        names.push(name);
    }
}

/// Name a constant assignment defines: the final constant segment of the
/// left-hand side. A qualifying receiver (`A::B::C = 1`) is ignored.
fn const_name(lhs: &Node) -> Option<&str> {
    match &lhs.kind {
        NodeKind::Constant { name } => Some(name),
        NodeKind::ScopeResolution => lhs.children.iter().rev().find_map(|child| {
            if let NodeKind::Constant { name } = &child.kind {
                Some(name.as_str())
            } else {
                None
            }
        }),
        _ => None,
    }
}

/// Parameter names in order, one per parameter node, whatever its flavor:
/// each contributes its first identifying token. Anonymous rest parameters
/// contribute nothing.
fn method_params(node: &Node) -> Params {
    let mut params = Params::new();
    let Some(list) = node
        .children
        .iter()
        .find(|child| matches!(child.kind, NodeKind::MethodParameters))
    else {
        return params;
    };
    for child in &list.children {
        if let Some(name) = param_name(child) {
            params.push(Param::new(name));
        }
    }
    params
}

fn param_name(node: &Node) -> Option<&str> {
    if let NodeKind::Identifier { name } = &node.kind {
        return Some(name);
    }
    node.children.iter().find_map(param_name)
}

fn symbol_args(node: &Node) -> impl Iterator<Item = &str> {
    args(node).iter().filter_map(|arg| match &arg.kind {
        NodeKind::SymbolLit { name } => Some(name.as_str()),
        _ => None,
    })
}

fn first_arg(node: &Node) -> Option<&Node> {
    args(node).first()
}

fn args(node: &Node) -> &[Node] {
    node.children
        .iter()
        .find(|child| matches!(child.kind, NodeKind::ArgumentList))
        .map(|list| list.children.as_slice())
        .unwrap_or(&[])
}
