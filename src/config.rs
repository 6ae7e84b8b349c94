use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::github::GITHUB_API_BASE;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub release: ReleaseConfig,
    #[serde(default)]
    pub typewriter: TypewriterConfig,
    #[serde(default = "default_embeds")]
    pub embeds: Vec<EmbedConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            release: ReleaseConfig::default(),
            typewriter: TypewriterConfig::default(),
            embeds: default_embeds(),
        }
    }
}

/// Homepage header content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_tagline")]
    pub tagline: String,
    /// Target of the "Getting Started" button
    #[serde(default = "default_docs_url")]
    pub docs_url: String,
    /// Support page opened by the coffee link
    #[serde(default = "default_coffee_url")]
    pub coffee_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            tagline: default_tagline(),
            docs_url: default_docs_url(),
            coffee_url: default_coffee_url(),
        }
    }
}

fn default_title() -> String {
    "Ollama4j".to_string()
}

fn default_tagline() -> String {
    "Java library for interacting with Ollama.".to_string()
}

fn default_docs_url() -> String {
    "https://ollama4j.github.io/ollama4j/intro".to_string()
}

fn default_coffee_url() -> String {
    "https://www.buymeacoffee.com/amithkoujalgi".to_string()
}

/// Where the latest release is looked up, and how it is shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// `owner/repo` on GitHub
    #[serde(default = "default_repository")]
    pub repository: String,
    /// Append the publish date to the version badge
    #[serde(default = "default_true")]
    pub show_release_date: bool,
    /// Maven coordinates used in the dependency snippets
    #[serde(default = "default_group_id")]
    pub group_id: String,
    #[serde(default = "default_artifact_id")]
    pub artifact_id: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            repository: default_repository(),
            show_release_date: true,
            group_id: default_group_id(),
            artifact_id: default_artifact_id(),
        }
    }
}

fn default_api_base() -> String {
    GITHUB_API_BASE.to_string()
}

fn default_repository() -> String {
    "ollama4j/ollama4j".to_string()
}

fn default_group_id() -> String {
    "io.github.ollama4j".to_string()
}

fn default_artifact_id() -> String {
    "ollama4j".to_string()
}

fn default_true() -> bool {
    true
}

/// Horizontal alignment of the typewriter text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Typewriter animation settings. Only the text and timings affect behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypewriterConfig {
    #[serde(default = "default_typewriter_text")]
    pub text: String,
    /// Milliseconds per revealed character
    #[serde(default = "default_typing_speed")]
    pub typing_speed_ms: u64,
    /// Milliseconds the full text stays up before restarting
    #[serde(default = "default_pause")]
    pub pause_ms: u64,
    #[serde(default = "default_height")]
    pub height: f32,
    /// Fixed width in points; fills the available width when unset
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub align: TextAlign,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            text: default_typewriter_text(),
            typing_speed_ms: default_typing_speed(),
            pause_ms: default_pause(),
            height: default_height(),
            width: None,
            align: TextAlign::Left,
        }
    }
}

impl TypewriterConfig {
    /// Settings for `text` with the default timings
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Delay between revealed characters, never below `MIN_TICK_MS`
    pub fn typing_speed(&self) -> Duration {
        Duration::from_millis(self.typing_speed_ms.max(MIN_TICK_MS))
    }

    /// Delay before the cycle restarts, never below `MIN_TICK_MS`
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms.max(MIN_TICK_MS))
    }

    /// Whether switching from `self` to `other` requires restarting the animation
    pub fn timing_differs(&self, other: &TypewriterConfig) -> bool {
        self.text != other.text
            || self.typing_speed_ms != other.typing_speed_ms
            || self.pause_ms != other.pause_ms
    }
}

fn default_typewriter_text() -> String {
    "OllamaAPI ollama = new OllamaAPI(\"http://localhost:11434\");\n\
     OllamaResult result = ollama.generate(\"llama3\", \"Why is the sky blue?\", null);\n\
     System.out.println(result.getResponse());"
        .to_string()
}

/// Shortest typewriter timer, like a browser's clamped `setTimeout(0)`
pub const MIN_TICK_MS: u64 = 4;

fn default_typing_speed() -> u64 {
    50
}

fn default_pause() -> u64 {
    1000
}

fn default_height() -> f32 {
    200.0
}

/// A source file pulled from GitHub and shown on the examples tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// Raw-content URL of the file
    pub src: String,
    /// Highlighting language; inferred from the file extension when unset
    #[serde(default)]
    pub language: Option<String>,
}

fn default_embeds() -> Vec<EmbedConfig> {
    vec![EmbedConfig {
        src: concat!(
            "https://raw.githubusercontent.com/ollama4j/ollama4j-examples/refs/heads/main/",
            "src/main/java/io/github/ollama4j/examples/GenerateExample.java"
        )
        .to_string(),
        language: None,
    }]
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("io", "ollama4j", "ollama4j-home")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, falling back to defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Read a scalar setting by dotted key, e.g. `release.repository`
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "site.title" => self.site.title.clone(),
            "site.tagline" => self.site.tagline.clone(),
            "site.docs_url" => self.site.docs_url.clone(),
            "site.coffee_url" => self.site.coffee_url.clone(),
            "release.api_base" => self.release.api_base.clone(),
            "release.repository" => self.release.repository.clone(),
            "release.show_release_date" => self.release.show_release_date.to_string(),
            "release.group_id" => self.release.group_id.clone(),
            "release.artifact_id" => self.release.artifact_id.clone(),
            "typewriter.text" => self.typewriter.text.clone(),
            "typewriter.typing_speed_ms" => self.typewriter.typing_speed_ms.to_string(),
            "typewriter.pause_ms" => self.typewriter.pause_ms.to_string(),
            _ => anyhow::bail!("Unknown config key: {}", key),
        };
        Ok(value)
    }

    /// Update a scalar setting by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parse_bool = |v: &str| -> Result<bool> {
            v.parse()
                .with_context(|| format!("Expected true or false for {}, got '{}'", key, v))
        };
        let parse_ms = |v: &str| -> Result<u64> {
            v.parse()
                .with_context(|| format!("Expected milliseconds for {}, got '{}'", key, v))
        };

        match key {
            "site.title" => self.site.title = value.to_string(),
            "site.tagline" => self.site.tagline = value.to_string(),
            "site.docs_url" => self.site.docs_url = value.to_string(),
            "site.coffee_url" => self.site.coffee_url = value.to_string(),
            "release.api_base" => self.release.api_base = value.to_string(),
            "release.repository" => self.release.repository = value.to_string(),
            "release.show_release_date" => self.release.show_release_date = parse_bool(value)?,
            "release.group_id" => self.release.group_id = value.to_string(),
            "release.artifact_id" => self.release.artifact_id = value.to_string(),
            "typewriter.text" => self.typewriter.text = value.to_string(),
            "typewriter.typing_speed_ms" => self.typewriter.typing_speed_ms = parse_ms(value)?,
            "typewriter.pause_ms" => self.typewriter.pause_ms = parse_ms(value)?,
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }
}
