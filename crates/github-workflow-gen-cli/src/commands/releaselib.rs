use anyhow::Result;
use clap::Args;

use github_workflow_gen_core::config::ReleaseLibSection;
use github_workflow_gen_core::{Workflow, WorkflowGenerator};

use crate::output;

/// Arguments for `github-workflow-gen releaselib`.
#[derive(Debug, Args, Clone, Default)]
pub struct ReleaseLibArgs {
    /// Output file name [default: release.yml]
    #[arg(long, alias = "fileName", value_name = "FILE")]
    pub file_name: Option<String>,

    /// Workflow name [default: Release]
    #[arg(long, alias = "workflowName")]
    pub workflow_name: Option<String>,

    /// NuGet package names (space separated)
    #[arg(long, alias = "nugetPackages", num_args = 1.., value_name = "PACKAGE")]
    pub nuget_packages: Vec<String>,

    /// Prefix for the Jira release
    #[arg(long, alias = "jiraPrefix")]
    pub jira_prefix: Option<String>,

    /// Jira project [default: GAWR]
    #[arg(long, alias = "jiraProject")]
    pub jira_project: Option<String>,
}

impl ReleaseLibArgs {
    /// Command-line values as a section; flags not given stay `None`.
    pub fn into_section(self) -> ReleaseLibSection {
        ReleaseLibSection {
            file_name: self.file_name,
            workflow_name: self.workflow_name,
            nuget_packages: super::given(self.nuget_packages),
            jira_prefix: self.jira_prefix,
            jira_project: self.jira_project,
        }
    }
}

/// Generate a release workflow for a library repository.
pub async fn run(
    args: ReleaseLibArgs,
    file_section: Option<ReleaseLibSection>,
    generator: &WorkflowGenerator,
) -> Result<()> {
    output::print_header("github-workflow-gen releaselib");

    let section = args.into_section().merge(file_section.unwrap_or_default());
    let file_name = section.file_name().to_string();
    let options = section.into_options()?;

    output::print_key_value("Workflow", &options.workflow_name);
    output::print_key_value("Packages", &options.nuget_packages.join(", "));
    output::print_key_value(
        "Jira",
        &format!("{} / {}", options.jira_project, options.jira_prefix),
    );

    super::write_workflow(generator, &Workflow::ReleaseLib(options), &file_name).await
}
