use anyhow::Result;
use clap::Args;

use github_workflow_gen_core::config::BuildSection;
use github_workflow_gen_core::{Workflow, WorkflowGenerator};

use crate::output;

/// Arguments for `github-workflow-gen build`.
#[derive(Debug, Args, Clone, Default)]
pub struct BuildArgs {
    /// Output file name [default: build.yml]
    #[arg(long, alias = "fileName", value_name = "FILE")]
    pub file_name: Option<String>,

    /// Solution file to build and test (e.g. StreetNameRegistry.sln)
    #[arg(long, alias = "solutionName")]
    pub solution_name: Option<String>,

    /// SonarCloud project key (e.g. streetname-registry)
    #[arg(long, alias = "sonarKey")]
    pub sonar_key: Option<String>,

    /// Also run the workflow on pull requests
    #[arg(long, alias = "onPullRequests", overrides_with = "no_on_pull_requests")]
    pub on_pull_requests: bool,

    /// Do not run the workflow on pull requests, even if the config file says so
    #[arg(long, overrides_with = "on_pull_requests")]
    pub no_on_pull_requests: bool,
}

impl BuildArgs {
    /// Command-line values as a section; flags not given stay `None`.
    pub fn into_section(self) -> BuildSection {
        BuildSection {
            file_name: self.file_name,
            solution_name: self.solution_name,
            sonar_key: self.sonar_key,
            on_pull_requests: super::switch(self.on_pull_requests, self.no_on_pull_requests),
        }
    }
}

/// Generate a build workflow.
///
/// Command-line values win over the `build` section of the config file.
pub async fn run(
    args: BuildArgs,
    file_section: Option<BuildSection>,
    generator: &WorkflowGenerator,
) -> Result<()> {
    output::print_header("github-workflow-gen build");

    let section = args.into_section().merge(file_section.unwrap_or_default());
    let file_name = section.file_name().to_string();
    let options = section.into_options()?;

    output::print_key_value("Solution", &options.solution_name);
    output::print_key_value("Sonar key", &options.sonar_key);
    output::print_key_value("Pull requests", &options.on_pull_requests.to_string());

    super::write_workflow(generator, &Workflow::Build(options), &file_name).await
}
