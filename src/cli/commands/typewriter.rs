//! Terminal rendition of the typewriter hero

use std::io::Write;

use anyhow::Result;
use clap::Args;

use crate::config::{Config, TypewriterConfig};
use crate::typewriter::TypewriterAnimator;

#[derive(Args, Debug)]
pub struct TypewriterArgs {
    /// Text to animate (defaults to the configured text)
    #[arg(long)]
    pub text: Option<String>,

    /// Milliseconds per character
    #[arg(long)]
    pub speed: Option<u64>,

    /// Milliseconds to hold the full text before restarting
    #[arg(long)]
    pub pause: Option<u64>,

    /// Number of typing cycles to play
    #[arg(long, default_value = "1")]
    pub cycles: u32,
}

impl TypewriterArgs {
    /// Configured settings with command-line overrides applied
    fn settings(&self, base: TypewriterConfig) -> TypewriterConfig {
        TypewriterConfig {
            text: self.text.clone().unwrap_or(base.text.clone()),
            typing_speed_ms: self.speed.unwrap_or(base.typing_speed_ms),
            pause_ms: self.pause.unwrap_or(base.pause_ms),
            ..base
        }
    }
}

pub async fn run(args: TypewriterArgs, quiet: bool) -> Result<()> {
    let config = Config::load()?;
    let settings = args.settings(config.typewriter);

    if settings.text.is_empty() {
        tracing::info!("Nothing to animate");
        return Ok(());
    }

    let animator = TypewriterAnimator::start(settings);
    let mut rx = animator.subscribe();
    let mut stdout = std::io::stdout();
    let mut printed = String::new();
    let mut cycles = 0;

    while cycles < args.cycles && rx.changed().await.is_ok() {
        let text = rx.borrow_and_update().clone();

        if text.is_empty() || !text.starts_with(printed.as_str()) {
            // Cycle finished; the next one starts on a fresh block
            cycles += 1;
            printed.clear();
            if !quiet {
                writeln!(stdout)?;
            }
            if text.is_empty() || cycles >= args.cycles {
                continue;
            }
        }

        write!(stdout, "{}", &text[printed.len()..])?;
        stdout.flush()?;
        printed = text;
    }

    writeln!(stdout)?;
    Ok(())
}
