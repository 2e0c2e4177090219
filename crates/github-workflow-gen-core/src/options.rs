//! Typed options for each workflow kind and their mapping to a render [`Context`].
//!
//! Field names here are snake_case; the context names the templates reference
//! are PascalCase (`SolutionName`, `NuGetPackages`, ...). Every `to_context`
//! binds every name its template uses, so a template never sees a missing key
//! for a supplied option.

use crate::context::{Context, Record};
use crate::error::{Result, WorkflowGenError};

/// Workflow name used when none is given.
pub const DEFAULT_WORKFLOW_NAME: &str = "Release";

/// Jira project used when none is given.
pub const DEFAULT_JIRA_PROJECT: &str = "GAWR";

// -------------------------------------------------------
// build
// -------------------------------------------------------

/// Options for the `build` workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Solution file passed to `dotnet build` and `dotnet test`.
    pub solution_name: String,
    /// SonarCloud project key, without the `Informatievlaanderen_` prefix.
    pub sonar_key: String,
    /// Also trigger the workflow on pull requests.
    pub on_pull_requests: bool,
}

impl BuildOptions {
    /// Bind `SolutionName`, `SonarKey` and `OnPullRequests`.
    pub fn to_context(&self) -> Context {
        Context::new()
            .with("SolutionName", self.solution_name.as_str())
            .with("SonarKey", self.sonar_key.as_str())
            .with("OnPullRequests", self.on_pull_requests)
    }
}

// -------------------------------------------------------
// release
// -------------------------------------------------------

/// A build artifact together with the NuGet package it publishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NuGetArtifactAndPackage {
    /// Artifact name, e.g. `api-legacy`.
    pub artifact: String,
    /// Full NuGet package id pushed from that artifact's build.
    pub package: String,
}

impl NuGetArtifactAndPackage {
    /// Pair an artifact with its package.
    pub fn new(artifact: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            artifact: artifact.into(),
            package: package.into(),
        }
    }

    /// Group a flat `artifact package artifact package ...` list into pairs.
    ///
    /// The command line takes NuGet packages as one flat list, so an odd
    /// number of values cannot be paired and fails with
    /// [`WorkflowGenError::UnevenNuGetPairs`]. An empty list gives no pairs.
    pub fn from_pairs(values: &[String]) -> Result<Vec<Self>> {
        if values.len() % 2 != 0 {
            return Err(WorkflowGenError::UnevenNuGetPairs(values.len()));
        }
        Ok(values
            .chunks_exact(2)
            .map(|pair| Self::new(pair[0].as_str(), pair[1].as_str()))
            .collect())
    }

    fn to_record(&self) -> Record {
        Record::from([
            ("Artifact".to_string(), self.artifact.clone()),
            ("Package".to_string(), self.package.clone()),
        ])
    }
}

/// Deployment settings for one AWS environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentOptions {
    /// Bucket the lambda package is pushed to, e.g. `s3://some.bucket.name`.
    pub s3_bucket_for_lambda: Option<String>,
    /// ECS services deployed to this environment.
    pub service_matrix: Vec<String>,
}

impl EnvironmentOptions {
    /// The service matrix as the inside of a YAML flow sequence:
    /// `'a', 'b', 'c'`. Empty when there are no services.
    pub fn service_matrix_value(&self) -> String {
        self.service_matrix
            .iter()
            .map(|s| single_quoted(s))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn bind(&self, context: &mut Context, environment: &str) {
        context.insert(
            format!("S3BucketForLambda{environment}"),
            self.s3_bucket_for_lambda.clone().unwrap_or_default(),
        );
        context.insert(
            format!("ServiceMatrix{environment}"),
            self.service_matrix_value(),
        );
    }
}

/// Options for the `release` workflow of a service repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOptions {
    /// Value of the workflow's `name:` line.
    pub workflow_name: String,
    /// Repository name, e.g. `streetname-registry`.
    pub repository_name: String,
    /// Short repository prefix used in AWS resource names, e.g. `sr`.
    pub repository_prefix: String,
    /// Docker image artifacts, one save/upload/download/load block each.
    pub build_artifacts: Vec<String>,
    /// Packages published to NuGet, in publish order.
    pub nuget_packages: Vec<NuGetArtifactAndPackage>,
    /// Leave out every lambda packaging and deployment step.
    pub skip_lambda: bool,
    /// Prefix of the Jira release version, e.g. `StreetName`.
    pub jira_prefix: String,
    /// Jira project key the release is created in.
    pub jira_project: String,
    /// Folder the lambda function is zipped from. Required unless `skip_lambda`.
    pub lambda_source_folder: Option<String>,
    pub test: EnvironmentOptions,
    pub staging: EnvironmentOptions,
    pub production: EnvironmentOptions,
}

impl ReleaseOptions {
    /// Bind every name the release template references.
    ///
    /// Build artifacts become a list of strings and NuGet packages a list of
    /// `Artifact`/`Package` records. Each environment contributes
    /// `S3BucketForLambda<Env>` and `ServiceMatrix<Env>` for `Test`,
    /// `Staging` and `Production`; missing settings bind as empty strings so
    /// the template still renders.
    pub fn to_context(&self) -> Context {
        let mut context = Context::new()
            .with("WorkflowName", self.workflow_name.as_str())
            .with("RepositoryName", self.repository_name.as_str())
            .with("RepositoryPrefix", self.repository_prefix.as_str())
            .with("BuildArtifacts", self.build_artifacts.clone())
            .with(
                "NuGetPackages",
                self.nuget_packages
                    .iter()
                    .map(NuGetArtifactAndPackage::to_record)
                    .collect::<Vec<_>>(),
            )
            .with("SkipLambda", self.skip_lambda)
            .with("JiraPrefix", self.jira_prefix.as_str())
            .with("JiraProject", self.jira_project.as_str())
            .with(
                "LambdaSourceFolder",
                self.lambda_source_folder.clone().unwrap_or_default(),
            );

        self.test.bind(&mut context, "Test");
        self.staging.bind(&mut context, "Staging");
        self.production.bind(&mut context, "Production");
        context
    }
}

// -------------------------------------------------------
// releaselib
// -------------------------------------------------------

/// Options for the `release` workflow of a library repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseLibOptions {
    /// Value of the workflow's `name:` line.
    pub workflow_name: String,
    /// NuGet package names; each is pushed from `dist/<name>/`.
    pub nuget_packages: Vec<String>,
    /// Prefix of the Jira release version.
    pub jira_prefix: String,
    pub jira_project: String,
}

impl ReleaseLibOptions {
    /// Bind `WorkflowName`, `NuGetPackages`, `JiraPrefix` and `JiraProject`.
    pub fn to_context(&self) -> Context {
        Context::new()
            .with("WorkflowName", self.workflow_name.as_str())
            .with("NuGetPackages", self.nuget_packages.clone())
            .with("JiraPrefix", self.jira_prefix.as_str())
            .with("JiraProject", self.jira_project.as_str())
    }
}

/// Wrap `s` in single quotes, adding only the quotes it lacks.
pub fn single_quoted(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    if !s.starts_with('\'') {
        quoted.push('\'');
    }
    quoted.push_str(s);
    if s.len() < 2 || !s.ends_with('\'') {
        quoted.push('\'');
    }
    quoted
}
