//! Artifact → TypeScript text

use super::templates::{
    FILE_TEMPLATE, FILE_TEMPLATE_NAME, HEADER, METHOD_TEMPLATE, METHOD_TEMPLATE_NAME,
};
use crate::artifact::{ArgumentStyle, Artifact, BindingDirective, Collaborator, Decorator, Import, Method};
use crate::catalog;
use crate::error::Result;
use handlebars::Handlebars;
use serde_json::json;

/// Indentation of class members
const MEMBER_INDENT: &str = "  ";

/// Indentation of method bodies
const BODY_INDENT: &str = "    ";

/// Renders artifacts to source text
///
/// Output depends only on the artifact, so rendering the same artifact twice
/// gives byte-identical text.
pub struct Renderer {
    handlebars: Handlebars<'static>,
}

impl Renderer {
    /// Create a renderer with the file, method and catalog body templates registered
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to compile.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Disable HTML escaping since we're generating code
        handlebars.register_escape_fn(handlebars::no_escape);
        // A missing variable is a bug in a builder, not an empty string
        handlebars.set_strict_mode(true);

        handlebars.register_template_string(FILE_TEMPLATE_NAME, FILE_TEMPLATE)?;
        handlebars.register_template_string(METHOD_TEMPLATE_NAME, METHOD_TEMPLATE)?;
        for (name, source) in catalog::body_templates() {
            handlebars.register_template_string(&name, source)?;
        }

        Ok(Self { handlebars })
    }

    /// Render an artifact to a complete source file
    ///
    /// # Errors
    ///
    /// Returns an error if a method body references an unknown template or
    /// variable.
    pub fn render(&self, artifact: &Artifact) -> Result<String> {
        let class = &artifact.class;

        let imports: Vec<String> = artifact.imports.iter().map(render_import).collect();
        let decorators: String = class
            .decorators
            .iter()
            .map(|decorator| format!("{}\n", render_decorator(decorator)))
            .collect();

        let mut members = vec![render_constructor(&class.collaborator)];
        for method in &class.methods {
            members.push(self.render_method(method)?);
        }

        let mut text = self.handlebars.render(
            FILE_TEMPLATE_NAME,
            &json!({
                "header": HEADER,
                "imports": imports.join("\n"),
                "decorators": decorators,
                "class_name": class.name,
                "members": members.join("\n\n"),
            }),
        )?;

        if !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }

    fn render_method(&self, method: &Method) -> Result<String> {
        let body = self
            .handlebars
            .render(&method.body.template, &method.body.context)?;

        let (decorators, parameter) = match &method.binding {
            Some(binding) => (
                format!("{MEMBER_INDENT}{}\n", render_decorator(&binding_decorator(binding))),
                format!(
                    "{} {}: {}",
                    render_decorator(&argument_decorator(&binding.argument)),
                    method.parameter.name,
                    method.parameter.type_name
                ),
            ),
            None => (
                String::new(),
                format!("{}: {}", method.parameter.name, method.parameter.type_name),
            ),
        };

        Ok(self.handlebars.render(
            METHOD_TEMPLATE_NAME,
            &json!({
                "decorators": decorators,
                "name": method.name,
                "parameter": parameter,
                "return_type": method.return_type,
                "body": indent(&body, BODY_INDENT),
            }),
        )?)
    }
}

/// `@Query(() => Order, { description: 'Get one' })`
fn binding_decorator(binding: &BindingDirective) -> Decorator {
    Decorator::new(
        binding.kind.decorator(),
        [
            format!("() => {}", binding.graphql_type),
            format!("{{ description: {} }}", quote(&binding.description)),
        ],
    )
}

/// `@Args()` or `@Arg('input')`
fn argument_decorator(argument: &ArgumentStyle) -> Decorator {
    match argument {
        ArgumentStyle::Bag => Decorator::bare("Args"),
        ArgumentStyle::Named(name) => Decorator::new("Arg", [quote(name)]),
    }
}

fn render_decorator(decorator: &Decorator) -> String {
    format!("@{}({})", decorator.name, decorator.arguments.join(", "))
}

fn render_import(import: &Import) -> String {
    format!(
        "import {{ {} }} from {}",
        import.names.join(", "),
        quote(&import.module)
    )
}

fn render_constructor(collaborator: &Collaborator) -> String {
    let decorator = collaborator
        .decorator
        .as_ref()
        .map(|decorator| format!("{} ", render_decorator(decorator)))
        .unwrap_or_default();

    format!(
        "{MEMBER_INDENT}constructor({decorator}private {}: {}) {{}}",
        collaborator.field, collaborator.type_name
    )
}

/// Single-quoted TypeScript string literal
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Indent every non-empty line
fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
