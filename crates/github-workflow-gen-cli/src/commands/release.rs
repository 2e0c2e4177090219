use anyhow::Result;
use clap::Args;

use github_workflow_gen_core::config::ReleaseSection;
use github_workflow_gen_core::options::ReleaseOptions;
use github_workflow_gen_core::{Workflow, WorkflowGenerator};

use crate::output;

/// Arguments for `github-workflow-gen release`.
#[derive(Debug, Args, Clone, Default)]
pub struct ReleaseArgs {
    /// Output file name [default: release.yml]
    #[arg(long, alias = "fileName", value_name = "FILE")]
    pub file_name: Option<String>,

    /// Workflow name [default: Release]
    #[arg(long, alias = "workflowName")]
    pub workflow_name: Option<String>,

    /// Repository name (e.g. streetname-registry)
    #[arg(long, alias = "repositoryName")]
    pub repository_name: Option<String>,

    /// Repository prefix (e.g. sr for streetname-registry)
    #[arg(long, alias = "repositoryPrefix")]
    pub repository_prefix: Option<String>,

    /// Docker image build artifacts (space separated)
    #[arg(long, alias = "buildArtifacts", num_args = 1.., value_name = "ARTIFACT")]
    pub build_artifacts: Vec<String>,

    /// NuGet packages as artifact/package pairs: `<artifact> <package> ...`
    #[arg(long, alias = "nugetPackages", num_args = 1.., value_name = "VALUE")]
    pub nuget_packages: Vec<String>,

    /// Leave out every lambda-related step and job
    #[arg(long, alias = "skipLambda", overrides_with = "no_skip_lambda")]
    pub skip_lambda: bool,

    /// Include the lambda steps and jobs, even if the config file skips them
    #[arg(long, overrides_with = "skip_lambda")]
    pub no_skip_lambda: bool,

    /// Prefix for the Jira release
    #[arg(long, alias = "jiraPrefix")]
    pub jira_prefix: Option<String>,

    /// Jira project [default: GAWR]
    #[arg(long, alias = "jiraProject")]
    pub jira_project: Option<String>,

    /// Folder the lambda function is zipped from
    #[arg(long, alias = "lambdaSourceFolder", value_name = "DIR")]
    pub lambda_source_folder: Option<String>,

    /// Test S3 bucket for the lambda (s3://some.bucket.name)
    #[arg(long, alias = "testS3BucketForLambda", value_name = "BUCKET")]
    pub test_s3_bucket_for_lambda: Option<String>,

    /// Services to deploy on test (space separated)
    #[arg(long, alias = "testServiceMatrix", num_args = 1.., value_name = "SERVICE")]
    pub test_service_matrix: Vec<String>,

    /// Staging S3 bucket for the lambda (s3://some.bucket.name)
    #[arg(long, alias = "stagingS3BucketForLambda", value_name = "BUCKET")]
    pub staging_s3_bucket_for_lambda: Option<String>,

    /// Services to deploy on staging (space separated)
    #[arg(long, alias = "stagingServiceMatrix", num_args = 1.., value_name = "SERVICE")]
    pub staging_service_matrix: Vec<String>,

    /// Production S3 bucket for the lambda (s3://some.bucket.name)
    #[arg(long, alias = "productionS3BucketForLambda", value_name = "BUCKET")]
    pub production_s3_bucket_for_lambda: Option<String>,

    /// Services to deploy on production (space separated)
    #[arg(long, alias = "productionServiceMatrix", num_args = 1.., value_name = "SERVICE")]
    pub production_service_matrix: Vec<String>,
}

impl ReleaseArgs {
    /// Command-line values as a section; flags not given stay `None`.
    pub fn into_section(self) -> ReleaseSection {
        ReleaseSection {
            file_name: self.file_name,
            workflow_name: self.workflow_name,
            repository_name: self.repository_name,
            repository_prefix: self.repository_prefix,
            build_artifacts: super::given(self.build_artifacts),
            nuget_packages: super::given(self.nuget_packages),
            skip_lambda: super::switch(self.skip_lambda, self.no_skip_lambda),
            jira_prefix: self.jira_prefix,
            jira_project: self.jira_project,
            lambda_source_folder: self.lambda_source_folder,
            test_s3_bucket_for_lambda: self.test_s3_bucket_for_lambda,
            test_service_matrix: super::given(self.test_service_matrix),
            staging_s3_bucket_for_lambda: self.staging_s3_bucket_for_lambda,
            staging_service_matrix: super::given(self.staging_service_matrix),
            production_s3_bucket_for_lambda: self.production_s3_bucket_for_lambda,
            production_service_matrix: super::given(self.production_service_matrix),
        }
    }
}

/// Generate a release workflow for a service repository.
pub async fn run(
    args: ReleaseArgs,
    file_section: Option<ReleaseSection>,
    generator: &WorkflowGenerator,
) -> Result<()> {
    output::print_header("github-workflow-gen release");

    let section = args.into_section().merge(file_section.unwrap_or_default());
    let file_name = section.file_name().to_string();
    let options = section.into_options()?;

    output::print_key_value("Workflow", &options.workflow_name);
    output::print_key_value(
        "Repository",
        &format!("{} ({})", options.repository_name, options.repository_prefix),
    );
    output::print_key_value("Build artifacts", &options.build_artifacts.len().to_string());
    output::print_key_value("NuGet packages", &options.nuget_packages.len().to_string());

    if options.skip_lambda {
        output::print_key_value("Lambda", "skipped");
        if has_lambda_settings(&options) {
            output::print_warning("lambda settings are ignored because --skip-lambda is set");
        }
    }

    super::write_workflow(generator, &Workflow::Release(options), &file_name).await
}

fn has_lambda_settings(options: &ReleaseOptions) -> bool {
    options.lambda_source_folder.is_some()
        || [&options.test, &options.staging, &options.production]
            .iter()
            .any(|env| env.s3_bucket_for_lambda.is_some())
}
