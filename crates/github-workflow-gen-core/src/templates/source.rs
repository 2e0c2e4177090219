//! Where workflow templates come from.
//!
//! The generator only needs the template text for a [`WorkflowKind`]. By default
//! that is the copy compiled into the binary; a template directory can be
//! supplied instead to try out template changes without rebuilding.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{Result, WorkflowGenError};
use crate::workflow::WorkflowKind;

/// Supplies the template text for a workflow kind.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Return the full template text for `kind`.
    async fn load(&self, kind: WorkflowKind) -> Result<String>;
}

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

#[async_trait]
impl TemplateSource for EmbeddedTemplates {
    async fn load(&self, kind: WorkflowKind) -> Result<String> {
        tracing::debug!(workflow = kind.as_str(), "using embedded template");
        Ok(kind.embedded_template().to_string())
    }
}

/// Templates read from `<root>/<kind.template_file()>` at runtime.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    /// Read templates from `root`, e.g. a checkout's `templates/workflows`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where the template for `kind` is expected.
    pub fn path_for(&self, kind: WorkflowKind) -> PathBuf {
        self.root.join(kind.template_file())
    }
}

#[async_trait]
impl TemplateSource for DirectoryTemplates {
    async fn load(&self, kind: WorkflowKind) -> Result<String> {
        let path = self.path_for(kind);
        tracing::debug!(workflow = kind.as_str(), path = %path.display(), "loading template");
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| WorkflowGenError::TemplateNotFound { path, source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::embedded;

    #[tokio::test]
    async fn test_embedded_source() {
        let text = EmbeddedTemplates.load(WorkflowKind::Build).await.unwrap();
        assert_eq!(text, embedded::BUILD_WORKFLOW);
    }

    #[tokio::test]
    async fn test_directory_source_reads_template_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("releaselib.yml"), "name: <%WorkflowName%>\n").unwrap();

        let source = DirectoryTemplates::new(dir.path());
        let text = source.load(WorkflowKind::ReleaseLib).await.unwrap();
        assert_eq!(text, "name: <%WorkflowName%>\n");
    }

    #[tokio::test]
    async fn test_directory_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectoryTemplates::new(dir.path());
        let err = source.load(WorkflowKind::Release).await.unwrap_err();
        match err {
            WorkflowGenError::TemplateNotFound { path, .. } => {
                assert_eq!(path, dir.path().join("release.yml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
