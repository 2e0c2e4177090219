//! JSON configuration file and option binding.
//!
//! A config file holds one optional section per workflow kind, using the same
//! names as the command-line flags in snake_case:
//!
//! ```json
//! {
//!   "build": { "solution_name": "StreetNameRegistry.sln", "sonar_key": "streetname-registry" },
//!   "releaselib": { "nuget_packages": ["Be.Vlaanderen.Basisregisters.Sqs"], "jira_prefix": "Address" }
//! }
//! ```
//!
//! Every field is optional at this stage. Command-line values are merged over
//! file values with `merge`, then `into_options` applies defaults and checks
//! that everything the workflow needs is present.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkflowGenError};
use crate::options::{
    BuildOptions, EnvironmentOptions, NuGetArtifactAndPackage, ReleaseLibOptions, ReleaseOptions,
    DEFAULT_JIRA_PROJECT, DEFAULT_WORKFLOW_NAME,
};
use crate::workflow::WorkflowKind;

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub build: Option<BuildSection>,
    pub release: Option<ReleaseSection>,
    pub releaselib: Option<ReleaseLibSection>,
}

impl GeneratorConfig {
    /// Load and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| WorkflowGenError::ConfigNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;
        let config: GeneratorConfig =
            serde_json::from_str(&contents).map_err(|e| WorkflowGenError::ConfigParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if given, otherwise an empty config.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

// -------------------------------------------------------
// build
// -------------------------------------------------------

/// Partially specified `build` options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSection {
    pub file_name: Option<String>,
    pub solution_name: Option<String>,
    pub sonar_key: Option<String>,
    pub on_pull_requests: Option<bool>,
}

impl BuildSection {
    /// Fill every field unset in `self` from `fallback`.
    pub fn merge(self, fallback: Self) -> Self {
        Self {
            file_name: self.file_name.or(fallback.file_name),
            solution_name: self.solution_name.or(fallback.solution_name),
            sonar_key: self.sonar_key.or(fallback.sonar_key),
            on_pull_requests: self.on_pull_requests.or(fallback.on_pull_requests),
        }
    }

    /// Output file name, `build.yml` unless overridden.
    pub fn file_name(&self) -> &str {
        output_name(self.file_name.as_deref(), WorkflowKind::Build)
    }

    /// Check the required values and fill in defaults.
    ///
    /// `solution-name` and `sonar-key` must be present and non-blank;
    /// `on_pull_requests` defaults to off.
    pub fn into_options(self) -> Result<BuildOptions> {
        let kind = WorkflowKind::Build;
        Ok(BuildOptions {
            solution_name: required(self.solution_name, kind, "solution-name")?,
            sonar_key: required(self.sonar_key, kind, "sonar-key")?,
            on_pull_requests: self.on_pull_requests.unwrap_or(false),
        })
    }
}

// -------------------------------------------------------
// release
// -------------------------------------------------------

/// Partially specified `release` options.
///
/// `nuget_packages` is the flat `artifact package ...` list taken by the
/// command line, paired up in [`into_options`](Self::into_options).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseSection {
    pub file_name: Option<String>,
    pub workflow_name: Option<String>,
    pub repository_name: Option<String>,
    pub repository_prefix: Option<String>,
    pub build_artifacts: Option<Vec<String>>,
    pub nuget_packages: Option<Vec<String>>,
    pub skip_lambda: Option<bool>,
    pub jira_prefix: Option<String>,
    pub jira_project: Option<String>,
    pub lambda_source_folder: Option<String>,
    pub test_s3_bucket_for_lambda: Option<String>,
    pub test_service_matrix: Option<Vec<String>>,
    pub staging_s3_bucket_for_lambda: Option<String>,
    pub staging_service_matrix: Option<Vec<String>>,
    pub production_s3_bucket_for_lambda: Option<String>,
    pub production_service_matrix: Option<Vec<String>>,
}

impl ReleaseSection {
    /// Fill every field unset in `self` from `fallback`.
    pub fn merge(self, fallback: Self) -> Self {
        Self {
            file_name: self.file_name.or(fallback.file_name),
            workflow_name: self.workflow_name.or(fallback.workflow_name),
            repository_name: self.repository_name.or(fallback.repository_name),
            repository_prefix: self.repository_prefix.or(fallback.repository_prefix),
            build_artifacts: self.build_artifacts.or(fallback.build_artifacts),
            nuget_packages: self.nuget_packages.or(fallback.nuget_packages),
            skip_lambda: self.skip_lambda.or(fallback.skip_lambda),
            jira_prefix: self.jira_prefix.or(fallback.jira_prefix),
            jira_project: self.jira_project.or(fallback.jira_project),
            lambda_source_folder: self.lambda_source_folder.or(fallback.lambda_source_folder),
            test_s3_bucket_for_lambda: self
                .test_s3_bucket_for_lambda
                .or(fallback.test_s3_bucket_for_lambda),
            test_service_matrix: self.test_service_matrix.or(fallback.test_service_matrix),
            staging_s3_bucket_for_lambda: self
                .staging_s3_bucket_for_lambda
                .or(fallback.staging_s3_bucket_for_lambda),
            staging_service_matrix: self
                .staging_service_matrix
                .or(fallback.staging_service_matrix),
            production_s3_bucket_for_lambda: self
                .production_s3_bucket_for_lambda
                .or(fallback.production_s3_bucket_for_lambda),
            production_service_matrix: self
                .production_service_matrix
                .or(fallback.production_service_matrix),
        }
    }

    /// Output file name, `release.yml` unless overridden.
    pub fn file_name(&self) -> &str {
        output_name(self.file_name.as_deref(), WorkflowKind::Release)
    }

    /// Check the required values, pair up NuGet packages and fill in defaults.
    ///
    /// `repository-name`, `repository-prefix` and `jira-prefix` are always
    /// required. `lambda-source-folder` is required unless lambda is skipped.
    /// The workflow name defaults to `Release` and the Jira project to `GAWR`.
    pub fn into_options(self) -> Result<ReleaseOptions> {
        let kind = WorkflowKind::Release;
        let skip_lambda = self.skip_lambda.unwrap_or(false);

        let lambda_source_folder = if skip_lambda {
            self.lambda_source_folder
        } else {
            Some(required(self.lambda_source_folder, kind, "lambda-source-folder")?)
        };

        Ok(ReleaseOptions {
            workflow_name: self
                .workflow_name
                .unwrap_or_else(|| DEFAULT_WORKFLOW_NAME.to_string()),
            repository_name: required(self.repository_name, kind, "repository-name")?,
            repository_prefix: required(self.repository_prefix, kind, "repository-prefix")?,
            build_artifacts: self.build_artifacts.unwrap_or_default(),
            nuget_packages: NuGetArtifactAndPackage::from_pairs(
                &self.nuget_packages.unwrap_or_default(),
            )?,
            skip_lambda,
            jira_prefix: required(self.jira_prefix, kind, "jira-prefix")?,
            jira_project: self
                .jira_project
                .unwrap_or_else(|| DEFAULT_JIRA_PROJECT.to_string()),
            lambda_source_folder,
            test: EnvironmentOptions {
                s3_bucket_for_lambda: self.test_s3_bucket_for_lambda,
                service_matrix: self.test_service_matrix.unwrap_or_default(),
            },
            staging: EnvironmentOptions {
                s3_bucket_for_lambda: self.staging_s3_bucket_for_lambda,
                service_matrix: self.staging_service_matrix.unwrap_or_default(),
            },
            production: EnvironmentOptions {
                s3_bucket_for_lambda: self.production_s3_bucket_for_lambda,
                service_matrix: self.production_service_matrix.unwrap_or_default(),
            },
        })
    }
}

// -------------------------------------------------------
// releaselib
// -------------------------------------------------------

/// Partially specified `releaselib` options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseLibSection {
    pub file_name: Option<String>,
    pub workflow_name: Option<String>,
    pub nuget_packages: Option<Vec<String>>,
    pub jira_prefix: Option<String>,
    pub jira_project: Option<String>,
}

impl ReleaseLibSection {
    /// Fill every field unset in `self` from `fallback`.
    pub fn merge(self, fallback: Self) -> Self {
        Self {
            file_name: self.file_name.or(fallback.file_name),
            workflow_name: self.workflow_name.or(fallback.workflow_name),
            nuget_packages: self.nuget_packages.or(fallback.nuget_packages),
            jira_prefix: self.jira_prefix.or(fallback.jira_prefix),
            jira_project: self.jira_project.or(fallback.jira_project),
        }
    }

    /// Output file name. Library releases also default to `release.yml`.
    pub fn file_name(&self) -> &str {
        output_name(self.file_name.as_deref(), WorkflowKind::ReleaseLib)
    }

    /// Check that at least one package and a `jira-prefix` are given, then
    /// fill in defaults.
    pub fn into_options(self) -> Result<ReleaseLibOptions> {
        let kind = WorkflowKind::ReleaseLib;
        let nuget_packages = self
            .nuget_packages
            .filter(|packages| !packages.is_empty())
            .ok_or(WorkflowGenError::MissingOption {
                workflow: kind.as_str(),
                option: "nuget-packages",
            })?;

        Ok(ReleaseLibOptions {
            workflow_name: self
                .workflow_name
                .unwrap_or_else(|| DEFAULT_WORKFLOW_NAME.to_string()),
            nuget_packages,
            jira_prefix: required(self.jira_prefix, kind, "jira-prefix")?,
            jira_project: self
                .jira_project
                .unwrap_or_else(|| DEFAULT_JIRA_PROJECT.to_string()),
        })
    }
}

/// An option that must be present and non-empty.
fn required(value: Option<String>, kind: WorkflowKind, option: &'static str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(WorkflowGenError::MissingOption {
            workflow: kind.as_str(),
            option,
        })
}

fn output_name(file_name: Option<&str>, kind: WorkflowKind) -> &str {
    file_name.unwrap_or(kind.default_output())
}
