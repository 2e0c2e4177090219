//! github-workflow-gen CLI: generate GitHub Actions workflows from templates.
//!
//! Provides three commands, one per workflow: `build`, `release` (service
//! repositories) and `releaselib` (library repositories).
//!
//! Option values come from the command line, then from the matching section of
//! the optional `--config` file, then from built-in defaults.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use github_workflow_gen_core::config::GeneratorConfig;
use github_workflow_gen_core::templates::DirectoryTemplates;
use github_workflow_gen_core::WorkflowGenerator;

use commands::build::BuildArgs;
use commands::release::ReleaseArgs;
use commands::releaselib::ReleaseLibArgs;

#[derive(Parser)]
#[command(
    name = "github-workflow-gen",
    about = "Generate GitHub Actions build and release workflows",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file with `build`, `release` and `releaselib` sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read templates from this directory instead of the embedded ones
    #[arg(long, global = true, env = "GITHUB_WORKFLOW_GEN_TEMPLATES")]
    templates_dir: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a build.yml workflow
    Build(BuildArgs),

    /// Generate a release.yml workflow for a service repository
    Release(ReleaseArgs),

    /// Generate a release.yml workflow for a library repository
    Releaselib(ReleaseLibArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = GeneratorConfig::load_optional(cli.config.as_deref())?;

    let generator = match &cli.templates_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "using template directory");
            WorkflowGenerator::with_source(DirectoryTemplates::new(dir))
        }
        None => WorkflowGenerator::new(),
    };

    match cli.command {
        Commands::Build(args) => {
            commands::build::run(args, config.build, &generator).await?;
        }
        Commands::Release(args) => {
            commands::release::run(args, config.release, &generator).await?;
        }
        Commands::Releaselib(args) => {
            commands::releaselib::run(args, config.releaselib, &generator).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use github_workflow_gen_core::config::BuildSection;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from([
            "github-workflow-gen",
            "build",
            "--solution-name",
            "StreetNameRegistry.sln",
            "--sonar-key",
            "streetname-registry",
            "--on-pull-requests",
        ])
        .unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("expected build command");
        };
        let options = args.into_section().into_options().unwrap();
        assert_eq!(options.solution_name, "StreetNameRegistry.sln");
        assert!(options.on_pull_requests);
    }

    #[test]
    fn test_camel_case_aliases() {
        let cli = Cli::try_parse_from([
            "github-workflow-gen",
            "releaselib",
            "--nugetPackages",
            "Be.Vlaanderen.Basisregisters.Sqs",
            "Be.Vlaanderen.Basisregisters.Sqs.Lambda",
            "--jiraPrefix",
            "Address",
            "--fileName",
            "lib.yml",
        ])
        .unwrap();
        let Commands::Releaselib(args) = cli.command else {
            panic!("expected releaselib command");
        };
        let section = args.into_section();
        assert_eq!(section.file_name(), "lib.yml");
        let options = section.into_options().unwrap();
        assert_eq!(options.nuget_packages.len(), 2);
        assert_eq!(options.workflow_name, "Release");
        assert_eq!(options.jira_project, "GAWR");
    }

    #[test]
    fn test_release_nuget_pairs_and_matrices() {
        let cli = Cli::try_parse_from([
            "github-workflow-gen",
            "release",
            "--repository-name",
            "streetname-registry",
            "--repository-prefix",
            "sr",
            "--build-artifacts",
            "api-legacy",
            "projector",
            "--nuget-packages",
            "api-legacy",
            "Be.Vlaanderen.Basisregisters.StreetNameRegistry.Api.Legacy",
            "--jira-prefix",
            "StreetName",
            "--skip-lambda",
            "--test-service-matrix",
            "streetname-registry-api",
            "streetname-registry-projections",
        ])
        .unwrap();
        let Commands::Release(args) = cli.command else {
            panic!("expected release command");
        };
        let options = args.into_section().into_options().unwrap();
        assert_eq!(options.build_artifacts, vec!["api-legacy", "projector"]);
        assert_eq!(options.nuget_packages.len(), 1);
        assert_eq!(options.nuget_packages[0].artifact, "api-legacy");
        assert!(options.skip_lambda);
        assert_eq!(
            options.test.service_matrix_value(),
            "'streetname-registry-api', 'streetname-registry-projections'"
        );
    }

    #[test]
    fn test_negated_switches_override_config() {
        let cli = Cli::try_parse_from([
            "github-workflow-gen",
            "build",
            "--no-on-pull-requests",
        ])
        .unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("expected build command");
        };
        let file = BuildSection {
            solution_name: Some("App.sln".into()),
            sonar_key: Some("app".into()),
            on_pull_requests: Some(true),
            ..Default::default()
        };
        let options = args.into_section().merge(file).into_options().unwrap();
        assert!(!options.on_pull_requests);
    }

    #[test]
    fn test_last_switch_wins() {
        let cli = Cli::try_parse_from([
            "github-workflow-gen",
            "release",
            "--skip-lambda",
            "--no-skip-lambda",
        ])
        .unwrap();
        let Commands::Release(args) = cli.command else {
            panic!("expected release command");
        };
        assert_eq!(args.into_section().skip_lambda, Some(false));

        let cli = Cli::try_parse_from([
            "github-workflow-gen",
            "release",
            "--no-skip-lambda",
            "--skip-lambda",
        ])
        .unwrap();
        let Commands::Release(args) = cli.command else {
            panic!("expected release command");
        };
        assert_eq!(args.into_section().skip_lambda, Some(true));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "github-workflow-gen",
            "build",
            "--config",
            "workflows.json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("workflows.json")));
        assert_eq!(cli.verbose, 2);
    }
}
