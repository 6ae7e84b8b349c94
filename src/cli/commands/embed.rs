//! Code embed command

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{OutputFormat, print_error, print_formatted};
use crate::code_embed::CodeEmbed;
use crate::config::Config;
use crate::github::GitHubClient;
use crate::resource::FetchState;

#[derive(Args, Debug)]
pub struct EmbedArgs {
    /// Raw-content URL of the file
    pub url: String,

    /// Highlighting language (inferred from the extension by default)
    #[arg(long)]
    pub language: Option<String>,

    /// Print the fetched code after the header
    #[arg(long)]
    pub print_code: bool,
}

#[derive(Serialize)]
struct EmbedResult {
    file_name: String,
    github_url: String,
    language: String,
    lines: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

pub async fn run(args: EmbedArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let config = Config::load()?;
    let client = GitHubClient::with_api_base(&config.release.api_base)?;

    let mut embed = CodeEmbed::new(Some(args.url.clone()), args.language);
    embed.mount(&client);

    let code = match embed.settle().await {
        FetchState::Ready(code) => code.clone(),
        FetchState::Error(failure) => {
            print_error(&failure.message);
            anyhow::bail!("Could not load {}", args.url);
        }
        FetchState::Loading => anyhow::bail!("No response for {}", args.url),
    };

    let result = EmbedResult {
        file_name: embed.file_name().unwrap_or_default().to_string(),
        github_url: embed.github_url().unwrap_or_default(),
        language: embed.language().to_string(),
        lines: code.lines().count(),
        code: args.print_code.then_some(code),
    };

    print_formatted(&result, format, |r| {
        let mut out = if quiet {
            String::new()
        } else {
            format!(
                "{} ({}, {} lines)\nView on GitHub: {}\n",
                r.file_name, r.language, r.lines, r.github_url
            )
        };
        if let Some(code) = &r.code {
            out.push_str(code);
        }
        out
    })?;

    Ok(())
}
