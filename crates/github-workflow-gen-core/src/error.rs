//! Unified error types for the github-workflow-gen toolkit.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while generating a workflow.
#[derive(Error, Debug)]
pub enum WorkflowGenError {
    // --- Configuration ---

    /// The JSON configuration file passed with `--config` was not found.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The workflow kind is not one of: `build`, `release`, `releaselib`.
    #[error("unknown workflow kind: {0} (supported: build, release, releaselib)")]
    UnknownWorkflow(String),

    // --- Binding ---

    /// A value the workflow cannot be rendered without was not supplied.
    #[error("missing required option '{option}' for the {workflow} workflow")]
    MissingOption {
        workflow: &'static str,
        option: &'static str,
    },

    /// `--nuget-packages` on the release command takes artifact/package pairs.
    #[error("uneven number of NuGet artifacts and packages ({0} values given)")]
    UnevenNuGetPairs(usize),

    // --- Templates ---

    /// The template file could not be read from the template directory.
    #[error("template not found at {path}")]
    TemplateNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A tag was opened but its closing delimiter never appears.
    #[error("line {line}: unclosed tag, expected '{close}'")]
    UnclosedTag { line: usize, close: String },

    /// A section was opened but never closed before the end of the template.
    #[error("line {line}: section '{name}' is never closed")]
    UnclosedSection { line: usize, name: String },

    /// A section close tag with no matching open section.
    #[error("line {line}: closing tag for '{name}' has no open section")]
    UnmatchedSectionClose { line: usize, name: String },

    /// A section close tag naming a different section than the innermost open one.
    #[error("line {line}: expected close of section '{expected}', found '{found}'")]
    MismatchedSectionClose {
        line: usize,
        expected: String,
        found: String,
    },

    /// A set-delimiter directive appeared inside an open section.
    #[error("line {line}: delimiters cannot be redefined inside section '{section}'")]
    DelimiterInSection { line: usize, section: String },

    /// A set-delimiter directive that is not of the form `=open close=`.
    #[error("line {line}: invalid delimiter directive '{directive}'")]
    InvalidDelimiter { line: usize, directive: String },

    /// An empty tag, or a tag kind the renderer does not support (partials).
    #[error("line {line}: invalid tag '{tag}'")]
    InvalidTag { line: usize, tag: String },

    /// A list or record value referenced where a scalar is expected.
    #[error("'{name}' is bound to a list or record and cannot be rendered as text")]
    NonScalarValue { name: String },

    // --- Output ---

    /// The rendered workflow could not be written to its destination.
    #[error("failed to write {path}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Alias for `Result<T, WorkflowGenError>`.
pub type Result<T> = std::result::Result<T, WorkflowGenError>;
