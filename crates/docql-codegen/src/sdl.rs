//! Intermediate representation of generated SDL and its serializer.
//!
//! Generators only decide which declarations, fields and arguments exist.
//! [`SdlWriter`] is the single place that decides how they are printed.

use std::fmt::Write as _;

/// A named, typed argument or input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub type_text: String,
}

impl Argument {
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_text: type_text.into(),
        }
    }
}

/// A field of an object or input type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    /// Resolver arguments; always empty on input types.
    pub arguments: Vec<Argument>,
    pub type_text: String,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            type_text: type_text.into(),
        }
    }

    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<Argument>) -> Self {
        self.arguments = arguments;
        self
    }
}

impl From<Argument> for FieldDef {
    fn from(arg: Argument) -> Self {
        Self::new(arg.name, arg.type_text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Type,
    Input,
}

impl DeclarationKind {
    fn keyword(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Input => "input",
        }
    }
}

/// An object or input type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl Declaration {
    pub fn object(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            kind: DeclarationKind::Type,
            name: name.into(),
            fields,
        }
    }

    pub fn input(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            kind: DeclarationKind::Input,
            name: name.into(),
            fields,
        }
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A root Query or Mutation operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub returns: String,
}

impl Operation {
    pub fn new(name: impl Into<String>, arguments: Vec<Argument>, returns: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments,
            returns: returns.into(),
        }
    }

    /// Looks up an argument by name.
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.name == name)
    }
}

/// Renders the IR as SDL text.
#[derive(Debug, Clone)]
pub struct SdlWriter {
    indent: String,
}

impl Default for SdlWriter {
    fn default() -> Self {
        Self::new("  ")
    }
}

impl SdlWriter {
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }

    /// Renders one declaration:
    ///
    /// ```graphql
    /// type Book {
    ///   title: String
    ///   subjects(SORT: SubjectSort, SORTS: [SubjectSort]): [Subject]
    /// }
    /// ```
    pub fn declaration(&self, decl: &Declaration) -> String {
        let mut out = format!("{} {} {{\n", decl.kind.keyword(), decl.name);
        for field in &decl.fields {
            out.push_str(&self.indent);
            out.push_str(&field.name);
            if !field.arguments.is_empty() {
                let args: Vec<String> = field.arguments.iter().map(render_argument).collect();
                let _ = write!(out, "({})", args.join(", "));
            }
            let _ = writeln!(out, ": {}", field.type_text);
        }
        out.push('}');
        out
    }

    /// Renders declarations separated by blank lines.
    pub fn declarations(&self, decls: &[Declaration]) -> String {
        decls
            .iter()
            .map(|d| self.declaration(d))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Renders an operation as a field of a root type, one argument per line.
    pub fn operation(&self, op: &Operation) -> String {
        if op.arguments.is_empty() {
            return format!("{}{}: {}", self.indent, op.name, op.returns);
        }

        let mut out = format!("{}{}(\n", self.indent, op.name);
        for arg in &op.arguments {
            let _ = writeln!(out, "{0}{0}{1}", self.indent, render_argument(arg));
        }
        let _ = write!(out, "{}): {}", self.indent, op.returns);
        out
    }

    /// Renders operations separated by blank lines.
    pub fn operations(&self, ops: &[Operation]) -> String {
        ops.iter()
            .map(|op| self.operation(op))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Wraps already rendered fragments in a root type such as `Query`.
    pub fn root_type(&self, name: &str, fragments: &[String]) -> String {
        format!("type {name} {{\n\n{}\n\n}}", fragments.join("\n\n"))
    }
}

fn render_argument(arg: &Argument) -> String {
    format!("{}: {}", arg.name, arg.type_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_object_type() {
        let decl = Declaration::object(
            "Book",
            vec![
                FieldDef::new("title", "String"),
                FieldDef::new("subjects", "[Subject]").with_arguments(vec![
                    Argument::new("SORT", "SubjectSort"),
                    Argument::new("SORTS", "[SubjectSort]"),
                ]),
            ],
        );

        assert_eq!(
            SdlWriter::default().declaration(&decl),
            "type Book {\n  title: String\n  subjects(SORT: SubjectSort, SORTS: [SubjectSort]): [Subject]\n}"
        );
    }

    #[test]
    fn test_render_input_with_custom_indent() {
        let decl = Declaration::input("BookSort", vec![FieldDef::new("title", "Int")]);
        assert_eq!(
            SdlWriter::new("\t").declaration(&decl),
            "input BookSort {\n\ttitle: Int\n}"
        );
    }

    #[test]
    fn test_render_operation() {
        let op = Operation::new(
            "deleteBook",
            vec![Argument::new("_id", "String")],
            "Boolean",
        );
        assert_eq!(
            SdlWriter::default().operation(&op),
            "  deleteBook(\n    _id: String\n  ): Boolean"
        );

        let bare = Operation::new("ping", Vec::new(), "Boolean");
        assert_eq!(SdlWriter::default().operation(&bare), "  ping: Boolean");
    }

    #[test]
    fn test_blocks_joined_by_blank_line() {
        let decls = vec![
            Declaration::object("A", vec![FieldDef::new("x", "Int")]),
            Declaration::input("B", vec![FieldDef::new("y", "Int")]),
        ];
        assert_eq!(
            SdlWriter::default().declarations(&decls),
            "type A {\n  x: Int\n}\n\ninput B {\n  y: Int\n}"
        );
    }
}
