//! Latest release commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{OutputFormat, print_error, print_formatted};
use crate::config::Config;
use crate::github::GitHubClient;
use crate::resource::FetchState;
use crate::snippets::DependencySnippet;
use crate::state::ReleaseState;

#[derive(Subcommand, Debug)]
pub enum ReleaseCommands {
    /// Show the latest published release
    Latest {
        /// Include the publish date, overriding `release.show_release_date`
        #[arg(long, overrides_with = "no_date")]
        show_date: bool,

        /// Omit the publish date, overriding `release.show_release_date`
        #[arg(long, overrides_with = "show_date")]
        no_date: bool,
    },

    /// Print dependency snippets for the latest release
    Snippets,
}

#[derive(Serialize)]
struct LatestResult {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag_name: Option<String>,
    html_url: Option<String>,
    published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    released_on: Option<String>,
    rate_limit_remaining: Option<u32>,
}

pub async fn run(command: ReleaseCommands, format: OutputFormat, _quiet: bool) -> Result<()> {
    let config = Config::load()?;
    let client = GitHubClient::with_api_base(&config.release.api_base)?;

    let mut state = ReleaseState::default();
    state.mount(&config.release, &client);
    state.settle().await;

    if let FetchState::Error(failure) = state.state() {
        print_error(&failure.message);
        anyhow::bail!("Could not load release info for {}", config.release.repository);
    }

    match command {
        ReleaseCommands::Latest { show_date, no_date } => {
            let configured = config.release.show_release_date;
            let show_date = resolve_show_date(show_date, no_date, configured);
            latest(&state, show_date, format)
        }
        ReleaseCommands::Snippets => snippets(&state, &config, format),
    }
}

/// Command-line flags win over the configured default
fn resolve_show_date(show_date: bool, no_date: bool, configured: bool) -> bool {
    match (show_date, no_date) {
        (true, _) => true,
        (_, true) => false,
        _ => configured,
    }
}

fn latest(state: &ReleaseState, show_date: bool, format: OutputFormat) -> Result<()> {
    let release = state
        .release()
        .ok_or_else(|| anyhow::anyhow!("Release info is still loading"))?;

    let result = LatestResult {
        name: release.version().to_string(),
        tag_name: release.tag_name.clone(),
        html_url: release.html_url.clone(),
        published_at: release.published_at.clone(),
        released_on: show_date.then(|| release.release_date_label()).flatten(),
        rate_limit_remaining: state.rate_limit.remaining,
    };

    print_formatted(&result, format, |r| {
        let mut line = format!("Latest Version: {}", r.name);
        if let Some(date) = &r.released_on {
            line.push_str(&format!(" released on {}", date));
        }
        if let Some(url) = &r.html_url {
            line.push_str(&format!("\n{}", url));
        }
        line
    })?;

    Ok(())
}

fn snippets(state: &ReleaseState, config: &Config, format: OutputFormat) -> Result<()> {
    let snippets: Vec<DependencySnippet> = state
        .snippets(&config.release)
        .ok_or_else(|| anyhow::anyhow!("Release info is still loading"))?;

    print_formatted(&snippets, format, |snippets| {
        snippets
            .iter()
            .map(|s| format!("{} {}\n\n{}\n", s.title, s.file, s.code))
            .collect::<Vec<_>>()
            .join("\n")
    })?;

    Ok(())
}
