//! Template system for workflow generation.
//!
//! Workflow templates are embedded into the binary at compile-time via
//! [`include_str!`] in the [`embedded`] module, or read from a directory at
//! runtime through [`source::DirectoryTemplates`]. They are rendered with the
//! small mustache dialect implemented by [`parser`] and [`renderer`].
//!
//! ## Template syntax
//!
//! - `{{Name}}`: HTML-escaped value, empty when unbound or `false`
//! - `{{&Name}}` / `{{{Name}}}`: raw value
//! - `{{#Name}}...{{/Name}}`: repeated per list item, once for a truthy scalar
//! - `{{^Name}}...{{/Name}}`: rendered only when `Name` is falsy
//! - `{{! comment }}` and `{{=<% %>=}}` (set delimiters)
//!
//! Partials are not supported.
//!
//! ## Adding a new template
//!
//! 1. Create the `.yml` file under `templates/workflows/`
//! 2. Add a `pub const` with `include_str!` in [`embedded`]
//! 3. Add a [`crate::workflow::WorkflowKind`] variant that points at it

pub mod embedded;
pub(crate) mod parser;
pub mod renderer;
pub mod source;

pub use renderer::{Template, TemplateRenderer};
pub use source::{DirectoryTemplates, EmbeddedTemplates, TemplateSource};
