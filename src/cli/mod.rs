//! CLI module
//!
//! Runs the homepage widgets from the terminal instead of the window.

mod commands;
mod output;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

/// Ollama4j homepage - latest release, code embeds and the typewriter hero
#[derive(Parser, Debug)]
#[command(name = "ollama4j-home")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    /// Launch the window when no subcommand is given
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Latest release lookup
    Release {
        #[command(subcommand)]
        command: commands::release::ReleaseCommands,
    },

    /// Fetch a source file from GitHub
    Embed(commands::embed::EmbedArgs),

    /// Play the typewriter animation in the terminal
    Typewriter(commands::typewriter::TypewriterArgs),

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

/// Run the CLI with a parsed subcommand
pub async fn run(command: Commands, output: &OutputOptions) -> anyhow::Result<()> {
    let format = output.format();
    let quiet = output.quiet;

    match command {
        Commands::Release { command } => commands::release::run(command, format, quiet).await,
        Commands::Embed(args) => commands::embed::run(args, format, quiet).await,
        Commands::Typewriter(args) => commands::typewriter::run(args, quiet).await,
        Commands::Config { command } => commands::config::run(command, format, quiet).await,
    }
}
