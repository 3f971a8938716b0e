use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::env;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use github_changelog::formatter::{changelog_markdown_simple, changelog_markdown_table};
use github_changelog::github::GitHubClient;
use github_changelog::services::{ChangelogService, TokenStore, default_config_dir};
use github_changelog::types::{GroupSpec, RepositoryId, RepositoryUrl};

#[derive(Parser)]
#[command(name = "github-changelog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Changelog generator for GitHub - renders the issues of a milestone as Markdown, optionally grouped by label")]
struct Cli {
    /// The GitHub repository in owner/name format (optional when run inside a clone with a GitHub remote)
    repository: Option<String>,
    /// The milestone to create a changelog for, by exact title
    milestone: Option<String>,
    /// Output format
    #[arg(short, long, default_value = "simple")]
    format: OutputFormat,
    /// Group output by GitHub labels, use multiple times for every label
    #[arg(short, long = "group-by", value_name = "LABEL")]
    group_by: Vec<String>,
    /// GitHub personal access token (can also be set via the GITHUB_CHANGELOG_GITHUB_TOKEN environment variable or the config file)
    #[arg(long)]
    github_token: Option<String>,
    /// Request timeout in seconds for GitHub API calls
    #[arg(long)]
    request_timeout: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Simple,
    Table,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize rustls crypto provider early to prevent "no process-level CryptoProvider available" panics
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize logging on stderr so the Markdown on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("github_changelog=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let (repository_id, milestone_title) = resolve_targets(cli.repository, cli.milestone)?;

    let github_token = resolve_token(cli.github_token)?;
    let request_timeout = cli.request_timeout.map(Duration::from_secs);
    let github_client = GitHubClient::new(Some(github_token), request_timeout)?;
    let service = ChangelogService::new(github_client);

    let spec: GroupSpec = cli.group_by.into_iter().collect();
    let changelog = service
        .build_changelog(&repository_id, &milestone_title, &spec)
        .await?;

    let content = match cli.format {
        OutputFormat::Simple => changelog_markdown_simple(&changelog),
        OutputFormat::Table => changelog_markdown_table(&changelog),
    };
    print!("{}", content);

    Ok(())
}

/// Resolve the repository and milestone from the positional arguments.
///
/// Clap cannot express "the first positional is required unless the
/// repository can be discovered from git metadata", so both positionals are
/// optional and sorted out here: two values are repository + milestone, a
/// single value is the milestone with the repository discovered from the
/// surrounding clone's remote URL.
fn resolve_targets(
    repository: Option<String>,
    milestone: Option<String>,
) -> Result<(RepositoryId, String)> {
    match (repository, milestone) {
        (Some(repository), Some(milestone)) => {
            let repository_id = RepositoryId::parse_url(&RepositoryUrl::from(repository))
                .map_err(|e| anyhow::anyhow!(e))?;
            Ok((repository_id, milestone))
        }
        (Some(milestone), None) => {
            let repository_id =
                github_changelog::services::discover_repository().ok_or_else(|| {
                    anyhow::anyhow!(
                        "No repository given and none discovered from git metadata. \
                         Pass the repository explicitly in owner/name format."
                    )
                })?;
            Ok((repository_id, milestone))
        }
        (None, _) => Err(anyhow::anyhow!(
            "Missing required argument: the milestone to create a changelog for"
        )),
    }
}

/// Resolve the GitHub token: CLI flag, then environment, then the config
/// file with interactive first-run setup
fn resolve_token(cli_token: Option<String>) -> Result<String> {
    if let Some(token) = cli_token {
        return Ok(token);
    }
    if let Ok(token) = env::var("GITHUB_CHANGELOG_GITHUB_TOKEN") {
        return Ok(token);
    }

    let config_dir =
        default_config_dir().map_err(|e| anyhow::anyhow!("Failed to get config directory: {}", e))?;
    let store = TokenStore::new(config_dir);
    store
        .load_or_init_interactive()
        .map_err(|e| anyhow::anyhow!("Failed to load token configuration: {}", e))
}
