//! Workflow generation: load template, build context, render, write.

use std::path::Path;

use crate::error::{Result, WorkflowGenError};
use crate::templates::renderer::TemplateRenderer;
use crate::templates::source::{EmbeddedTemplates, TemplateSource};
use crate::workflow::Workflow;

/// Renders workflows from a [`TemplateSource`].
///
/// Generation is four steps: load the template for the workflow's kind, build
/// the context from its options, render, and optionally write the result.
/// Nothing is written unless rendering succeeded.
pub struct WorkflowGenerator {
    source: Box<dyn TemplateSource>,
    renderer: TemplateRenderer,
}

impl WorkflowGenerator {
    /// Generator over the templates compiled into the binary.
    pub fn new() -> Self {
        Self::with_source(EmbeddedTemplates)
    }

    /// Generator over a custom template source, such as [`DirectoryTemplates`].
    ///
    /// [`DirectoryTemplates`]: crate::templates::source::DirectoryTemplates
    pub fn with_source(source: impl TemplateSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            renderer: TemplateRenderer::new(),
        }
    }

    /// Render `workflow` to a string.
    pub async fn generate(&self, workflow: &Workflow) -> Result<String> {
        let kind = workflow.kind();
        let template = self.source.load(kind).await?;
        let context = workflow.to_context();
        tracing::debug!(workflow = %kind, bindings = context.len(), "rendering workflow");
        if tracing::enabled!(tracing::Level::TRACE) {
            if let Ok(json) = serde_json::to_string(&context) {
                tracing::trace!(context = %json, "render context");
            }
        }
        self.renderer.render(&template, &context)
    }

    /// Render `workflow` and write it to `path`, creating parent directories.
    ///
    /// The whole document is rendered before the file is touched, so a render
    /// failure leaves no partial output behind.
    pub async fn generate_to_file(&self, workflow: &Workflow, path: &Path) -> Result<()> {
        let rendered = self.generate(workflow).await?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| WorkflowGenError::OutputWrite {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }
        tokio::fs::write(path, rendered)
            .await
            .map_err(|e| WorkflowGenError::OutputWrite {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!(workflow = %workflow.kind(), path = %path.display(), "workflow written");
        Ok(())
    }
}

impl Default for WorkflowGenerator {
    fn default() -> Self {
        Self::new()
    }
}
