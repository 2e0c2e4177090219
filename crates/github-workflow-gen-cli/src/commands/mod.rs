//! CLI command implementations for github-workflow-gen.
//!
//! Each module corresponds to a subcommand (`github-workflow-gen <command>`)
//! and owns its argument struct.

pub mod build;
pub mod release;
pub mod releaselib;

use std::path::Path;

use anyhow::{Context, Result};

use github_workflow_gen_core::{Workflow, WorkflowGenerator};

use crate::output;

/// Render `workflow` to `file_name` and report it.
async fn write_workflow(
    generator: &WorkflowGenerator,
    workflow: &Workflow,
    file_name: &str,
) -> Result<()> {
    let path = Path::new(file_name);
    output::print_key_value("Output", file_name);

    generator
        .generate_to_file(workflow, path)
        .await
        .with_context(|| format!("failed to generate {file_name}"))?;

    output::print_success(&format!("{file_name} was successfully generated."));
    Ok(())
}

/// `None` for a list flag that was not given, so config file values apply.
fn given(values: Vec<String>) -> Option<Vec<String>> {
    (!values.is_empty()).then_some(values)
}

/// Resolve a `--flag`/`--no-flag` pair. `None` when neither was given, so
/// config file values apply.
///
/// The pair is declared with `overrides_with`, so at most one side is set.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch() {
        assert_eq!(switch(true, false), Some(true));
        assert_eq!(switch(false, true), Some(false));
        assert_eq!(switch(false, false), None);
    }

    #[test]
    fn test_given() {
        assert_eq!(given(Vec::new()), None);
        assert_eq!(given(vec!["api".into()]), Some(vec!["api".to_string()]));
    }
}
