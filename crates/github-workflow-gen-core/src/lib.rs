//! Core library for the github-workflow-gen toolkit.
//!
//! Renders GitHub Actions workflow files (`build`, `release`, `releaselib`) from
//! templates embedded in the binary. The pieces, bottom-up:
//!
//! - [`templates`]: a small mustache dialect (parser + renderer) and the
//!   template sources (embedded or a directory override)
//! - [`context`]: the values a template can reference
//! - [`options`]: typed options per workflow and their mapping to a context
//! - [`workflow`]: workflow kinds and bound workflows
//! - [`config`]: the JSON config file and option validation
//! - [`generator`]: load, render and write a workflow

pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod options;
pub mod templates;
pub mod workflow;

pub use error::{Result, WorkflowGenError};
pub use generator::WorkflowGenerator;
pub use workflow::{Workflow, WorkflowKind};
