//! Workflow kinds and the options that go with them.

use std::fmt;
use std::str::FromStr;

use crate::context::Context;
use crate::error::{Result, WorkflowGenError};
use crate::options::{BuildOptions, ReleaseLibOptions, ReleaseOptions};
use crate::templates::embedded;

/// The workflows this tool can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowKind {
    /// CI build with tests and SonarCloud analysis.
    Build,
    /// Release of a service repository: docker images, NuGet, lambda, ECS deploys.
    Release,
    /// Release of a library repository: NuGet packages only.
    ReleaseLib,
}

impl WorkflowKind {
    /// Every kind, in command order.
    pub const ALL: [WorkflowKind; 3] = [Self::Build, Self::Release, Self::ReleaseLib];

    /// The command and config-section name: `build`, `release` or `releaselib`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Release => "release",
            Self::ReleaseLib => "releaselib",
        }
    }

    /// Parse a kind from its [`as_str`](Self::as_str) name.
    ///
    /// Names are matched exactly; anything else is
    /// [`WorkflowGenError::UnknownWorkflow`].
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| WorkflowGenError::UnknownWorkflow(name.to_string()))
    }

    /// File name of the template, both in `templates/workflows/` and in a
    /// template directory override.
    pub fn template_file(self) -> &'static str {
        match self {
            Self::Build => "build.yml",
            Self::Release => "release.yml",
            Self::ReleaseLib => "releaselib.yml",
        }
    }

    /// Output file name used when none is given. Both release kinds write
    /// `release.yml`.
    pub fn default_output(self) -> &'static str {
        match self {
            Self::Build => "build.yml",
            Self::Release | Self::ReleaseLib => "release.yml",
        }
    }

    /// Template text compiled into the binary for this kind.
    pub fn embedded_template(self) -> &'static str {
        match self {
            Self::Build => embedded::BUILD_WORKFLOW,
            Self::Release => embedded::RELEASE_WORKFLOW,
            Self::ReleaseLib => embedded::RELEASELIB_WORKFLOW,
        }
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowKind {
    type Err = WorkflowGenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// A fully bound workflow, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Workflow {
    Build(BuildOptions),
    Release(ReleaseOptions),
    ReleaseLib(ReleaseLibOptions),
}

impl Workflow {
    /// The kind this workflow renders as.
    pub fn kind(&self) -> WorkflowKind {
        match self {
            Self::Build(_) => WorkflowKind::Build,
            Self::Release(_) => WorkflowKind::Release,
            Self::ReleaseLib(_) => WorkflowKind::ReleaseLib,
        }
    }

    /// Flatten the options into the context their template expects.
    pub fn to_context(&self) -> Context {
        match self {
            Self::Build(options) => options.to_context(),
            Self::Release(options) => options.to_context(),
            Self::ReleaseLib(options) => options.to_context(),
        }
    }
}

impl From<BuildOptions> for Workflow {
    fn from(options: BuildOptions) -> Self {
        Self::Build(options)
    }
}

impl From<ReleaseOptions> for Workflow {
    fn from(options: ReleaseOptions) -> Self {
        Self::Release(options)
    }
}

impl From<ReleaseLibOptions> for Workflow {
    fn from(options: ReleaseLibOptions) -> Self {
        Self::ReleaseLib(options)
    }
}
