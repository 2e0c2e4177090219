//! Renderer for the mustache subset parsed by [`super::parser`].
//!
//! Rendering walks the node tree with a chain of scopes. The root scope is
//! the [`Context`]; each iteration of a list section pushes the current item
//! on top. Names resolve innermost scope first, and `.` names the current item.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::context::Context;
//! use crate::templates::{embedded, renderer::TemplateRenderer};
//!
//! let renderer = TemplateRenderer::new();
//! let context = Context::new().with("SolutionName", "App.sln");
//! let output = renderer.render(embedded::BUILD_WORKFLOW, &context)?;
//! ```

use crate::context::{lookup, Context, Item, Resolved, Scope};
use crate::error::{Result, WorkflowGenError};

use super::parser::{self, Node};

/// A parsed template, ready to be rendered any number of times.
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse `source`. All structural errors are reported here, before any output
    /// is produced.
    pub fn parse(source: &str) -> Result<Self> {
        Ok(Self {
            nodes: parser::parse(source)?,
        })
    }

    /// Render against `context`. Neither the template nor the context is modified.
    pub fn render(&self, context: &Context) -> Result<String> {
        let mut out = String::new();
        let mut scopes = vec![Scope::Root(context)];
        render_nodes(&self.nodes, &mut scopes, &mut out)?;
        Ok(out)
    }
}

/// One-shot template renderer: parse, then render.
///
/// The renderer holds no state. Each call to [`render`](Self::render) parses
/// the template again; use [`Template`] directly to render one parsed
/// template several times.
///
/// Rendering is all-or-nothing: a structural error in the template or a
/// list bound where text is expected returns an error and no partial output.
pub struct TemplateRenderer;

impl TemplateRenderer {
    /// Create a renderer.
    pub fn new() -> Self {
        Self
    }

    /// Render a template string with the given context.
    pub fn render(&self, template: &str, context: &Context) -> Result<String> {
        let parsed = Template::parse(template)?;
        tracing::trace!(bindings = context.len(), "rendering template");
        parsed.render(context)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_nodes<'a>(nodes: &[Node], scopes: &mut Vec<Scope<'a>>, out: &mut String) -> Result<()> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Variable { name, escape } => match lookup(scopes.as_slice(), name) {
                None | Some(Resolved::Bool(false)) => {}
                Some(Resolved::Bool(true)) => out.push_str("true"),
                Some(Resolved::Str(s)) if *escape => escape_html(s, out),
                Some(Resolved::Str(s)) => out.push_str(s),
                Some(_) => {
                    return Err(WorkflowGenError::NonScalarValue { name: name.clone() });
                }
            },
            Node::Section {
                name,
                inverted: true,
                children,
            } => {
                let truthy = lookup(scopes.as_slice(), name).is_some_and(|v| v.is_truthy());
                if !truthy {
                    render_nodes(children, scopes, out)?;
                }
            }
            Node::Section {
                name,
                inverted: false,
                children,
            } => match lookup(scopes.as_slice(), name) {
                Some(Resolved::List(items)) => {
                    for item in items {
                        render_item(Item::Str(item.as_str()), children, scopes, out)?;
                    }
                }
                Some(Resolved::Records(records)) => {
                    for record in records {
                        render_item(Item::Record(record), children, scopes, out)?;
                    }
                }
                Some(Resolved::Record(record)) => {
                    render_item(Item::Record(record), children, scopes, out)?;
                }
                Some(value) if value.is_truthy() => render_nodes(children, scopes, out)?,
                _ => {}
            },
        }
    }
    Ok(())
}

fn render_item<'a>(
    item: Item<'a>,
    children: &[Node],
    scopes: &mut Vec<Scope<'a>>,
    out: &mut String,
) -> Result<()> {
    scopes.push(Scope::Item(item));
    let result = render_nodes(children, scopes, out);
    scopes.pop();
    result
}

fn escape_html(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
