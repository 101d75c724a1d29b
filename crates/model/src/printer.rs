//! Indented text rendering of a model.
//!
//! Walks the scope tree from the root and renders each entity with its
//! declaration sites, resolved mixins, and properties. Rendering pattern
//! matches the closed entity variants so a new kind cannot be forgotten
//! silently.

use crate::entities::{PropertyId, PropertyKind, ScopeId, ScopeKind};
use crate::model::Model;
use std::io::{self, Write};

pub struct ModelPrinter<'a, W: Write> {
    out: &'a mut W,
    indent: usize,
    print_defs: bool,
    print_properties: bool,
}

impl<'a, W: Write> ModelPrinter<'a, W> {
    pub fn new(out: &'a mut W, print_defs: bool, print_properties: bool) -> Self {
        Self {
            out,
            indent: 0,
            print_defs,
            print_properties,
        }
    }

    pub fn print_model(&mut self, model: &Model) -> io::Result<()> {
        self.print_scope(model, model.root())
    }

    pub fn print_scope(&mut self, model: &Model, id: ScopeId) -> io::Result<()> {
        let scope = model.scope(id);
        match scope.kind() {
            ScopeKind::Module => self.line(&format!("module {}", scope.qname()))?,
            ScopeKind::Class => match scope.superclass() {
                Some(superclass) => self.line(&format!(
                    "class {} < {}",
                    scope.qname(),
                    model.scope(superclass).qname()
                ))?,
                None => self.line(&format!("class {}", scope.qname()))?,
            },
        }

        self.indent += 2;
        if self.print_defs {
            for def in scope.defs() {
                self.line(&format!("defined at {}", def.loc()))?;
            }
        }
        for include in scope.includes() {
            self.line(&format!(
                "{} {}",
                include.kind.as_str(),
                model.scope(include.module).qname()
            ))?;
        }
        if self.print_properties {
            for &id in scope.consts() {
                self.print_property(model, id)?;
            }
            for &id in scope.attrs() {
                self.print_property(model, id)?;
            }
            for &id in scope.methods() {
                self.print_property(model, id)?;
            }
        }
        for &child in scope.children() {
            self.print_scope(model, child)?;
        }
        self.indent -= 2;
        Ok(())
    }

    fn print_property(&mut self, model: &Model, id: PropertyId) -> io::Result<()> {
        let property = model.property(id);
        match property.kind() {
            PropertyKind::Const => self.line(property.name())?,
            PropertyKind::Attr { kind } => {
                self.line(&format!("{} {}", kind.as_str(), property.name()))?
            }
            PropertyKind::Method { is_singleton } => {
                let receiver = if is_singleton { "self." } else { "" };
                self.line(&format!("def {receiver}{}", property.name()))?
            }
        }
        if self.print_defs {
            self.indent += 2;
            for def in property.defs() {
                self.line(&format!("defined at {}", def.loc()))?;
                if let crate::defs::PropertyDef::Method { params, sig, .. } = def {
                    self.indent += 2;
                    if params.is_empty() {
                        self.line(&format!("signature: {}", property.name()))?;
                    } else {
                        let names: Vec<&str> =
                            params.iter().map(|param| param.name.as_str()).collect();
                        self.line(&format!(
                            "signature: {}({})",
                            property.name(),
                            names.join(", ")
                        ))?;
                    }
                    if sig.is_some() {
                        self.line("sig: true")?;
                    }
                    self.indent -= 2;
                }
            }
            self.indent -= 2;
        }
        Ok(())
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{:indent$}{text}", "", indent = self.indent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::{AttrKind, Include, IncludeKind, Param, PropertyDef};
    use crate::location::{Location, Position, Span};
    use smallvec::smallvec;

    fn loc(file: &str, line: usize) -> Location {
        Location::new(
            Some(file.to_string()),
            Span::new(Position::new(line, 0), Position::new(line, 10)),
        )
    }

    fn render(model: &Model, print_defs: bool, print_properties: bool) -> String {
        let mut out = Vec::new();
        ModelPrinter::new(&mut out, print_defs, print_properties)
            .print_model(model)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample_model() -> Model {
        let mut model = Model::new();
        let m = model.get_or_create_module(model.root(), "M");
        model.add_scope_def(m, loc("m.rb", 1), None);
        let c = model.get_or_create_class(model.root(), "C");
        model.add_scope_def(c, loc("c.rb", 1), Some("M".to_string()));
        model.add_include(
            c,
            Include {
                module: m,
                kind: IncludeKind::Include,
            },
        );
        let konst = model.get_or_create_const(c, "VERSION");
        model.add_property_def(konst, PropertyDef::Const { loc: loc("c.rb", 2) });
        let attr = model.get_or_create_attr(c, "name", AttrKind::Reader);
        model.add_property_def(
            attr,
            PropertyDef::Attr {
                loc: loc("c.rb", 3),
                kind: AttrKind::Reader,
                sig: None,
            },
        );
        let meth = model.get_or_create_method(c, "save", false);
        model.add_property_def(
            meth,
            PropertyDef::Method {
                loc: loc("c.rb", 4),
                is_singleton: false,
                params: smallvec![Param::new("force")],
                sig: None,
            },
        );
        model
    }

    #[test]
    fn test_print_model() {
        let model = sample_model();
        let expected = "\
module <root>
  module ::M
    defined at m.rb:1:0-1:10
  class ::C
    defined at c.rb:1:0-1:10
    include ::M
    VERSION
      defined at c.rb:2:0-2:10
    attr_reader name
      defined at c.rb:3:0-3:10
    def save
      defined at c.rb:4:0-4:10
        signature: save(force)
";
        assert_eq!(render(&model, true, true), expected);
    }

    #[test]
    fn test_print_model_without_defs() {
        let model = sample_model();
        let expected = "\
module <root>
  module ::M
  class ::C
    include ::M
    VERSION
    attr_reader name
    def save
";
        assert_eq!(render(&model, false, true), expected);
    }

    #[test]
    fn test_print_model_without_properties() {
        let model = sample_model();
        let expected = "\
module <root>
  module ::M
    defined at m.rb:1:0-1:10
  class ::C
    defined at c.rb:1:0-1:10
    include ::M
";
        assert_eq!(render(&model, true, false), expected);
    }

    #[test]
    fn test_resolved_superclass_in_header() {
        let mut model = Model::new();
        let a = model.get_or_create_class(model.root(), "A");
        let b = model.get_or_create_class(model.root(), "B");
        model.set_superclass(b, a);
        let rendered = render(&model, false, false);
        assert!(rendered.contains("class ::B < ::A\n"));
    }

    #[test]
    fn test_singleton_method_and_sig_lines() {
        let mut model = Model::new();
        let c = model.get_or_create_class(model.root(), "C");
        let meth = model.get_or_create_method(c, "build", true);
        model.add_property_def(
            meth,
            PropertyDef::Method {
                loc: loc("c.rb", 2),
                is_singleton: true,
                params: smallvec![],
                sig: Some(crate::defs::Sig { loc: loc("c.rb", 1) }),
            },
        );
        let rendered = render(&model, true, true);
        assert!(rendered.contains("    def self.build\n"));
        assert!(rendered.contains("        signature: build\n"));
        assert!(rendered.contains("        sig: true\n"));
    }
}
