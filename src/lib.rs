//! offsets-fetcher: versioned offsets retrieval from GitHub.
//!
//! The crate fetches offsets files (`offsets-<version>.json` /
//! `offsets-<version>.ini`) from a repository on GitHub, picks the right
//! candidate by comparing the dot-separated numeric version tokens
//! embedded in the file names, and parses the chosen file into a
//! structured [`offsets::Offsets`] record.
//!
//! # Modules
//!
//! - [`github`]: hosting collaborator (repo references, listing, content)
//! - [`version`]: version extraction, comparison, and candidate selection
//! - [`offsets`]: parsed records and the JSON/INI readers
//! - [`fetch`]: orchestration tying the above together
//! - [`error`]: error types for offsets-fetcher operations

pub mod error;
pub mod fetch;
pub mod github;
pub mod offsets;
pub mod version;

use clap::{Parser, Subcommand};

pub use error::FetchError;

use github::{parse_repo_input, GitHubClient, RepoSpec};
use offsets::Offsets;

/// The offsets-fetcher CLI application.
#[derive(Parser)]
#[command(name = "offsets-fetcher")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Fetch the newest offsets from a repository.
    Latest(LatestArgs),
    /// Fetch offsets for a specific target version.
    Version(VersionArgs),
}

/// Arguments shared by both retrieval subcommands.
#[derive(clap::Args)]
struct RepoArgs {
    /// Repository, as 'owner/repo' or a github.com URL.
    repo: String,

    /// Directory within the repository holding the offsets files.
    #[arg(long, default_value = "offsets")]
    path: String,

    /// Fixed file name; skips directory listing and version selection.
    #[arg(long)]
    file: Option<String>,

    /// GitHub access token; unset or empty means anonymous access.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Output format for the offsets ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the latest subcommand.
#[derive(clap::Args)]
struct LatestArgs {
    #[command(flatten)]
    repo: RepoArgs,
}

/// Arguments for the version subcommand.
#[derive(clap::Args)]
struct VersionArgs {
    #[command(flatten)]
    repo: RepoArgs,

    /// Target version to look up (e.g. '1.23.4').
    target: String,
}

/// Run the offsets-fetcher CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), FetchError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Latest(args)) => run_latest(args),
        Some(Commands::Version(args)) => run_version(args),
        None => {
            // No subcommand: print a usage hint and exit successfully
            println!("offsets-fetcher {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Fetches versioned offsets files from GitHub repositories.");
            println!();
            println!("Run 'offsets-fetcher --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the latest subcommand.
fn run_latest(args: LatestArgs) -> Result<(), FetchError> {
    let spec = build_spec(&args.repo)?;
    let client = GitHubClient::new(args.repo.token.as_deref());

    let result = fetch::get_last_offsets(&client, &spec)?;
    report(result, &args.repo.output)
}

/// Execute the version subcommand.
fn run_version(args: VersionArgs) -> Result<(), FetchError> {
    let spec = build_spec(&args.repo)?;
    let client = GitHubClient::new(args.repo.token.as_deref());

    let result = fetch::get_offsets_from_version(&client, &spec, &args.target)?;
    report(result, &args.repo.output)
}

fn build_spec(args: &RepoArgs) -> Result<RepoSpec, FetchError> {
    let (owner, repo) = parse_repo_input(&args.repo)?;

    Ok(RepoSpec {
        owner,
        repo,
        offsets_path: args.path.clone(),
        file_name: args.file.clone(),
    })
}

fn report(result: Option<Offsets>, output: &str) -> Result<(), FetchError> {
    let Some(offsets) = result else {
        println!("No offsets found.");
        return Ok(());
    };

    match output {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&offsets)?);
        }
        "text" => {
            println!(
                "Offsets for version {} ({}/{}, {})",
                offsets.version, offsets.source.owner, offsets.source.repo, offsets.source.path
            );
            for (name, value) in &offsets.entries {
                println!("  {name:<32} 0x{value:X}");
            }
        }
        other => {
            return Err(FetchError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }

    Ok(())
}
