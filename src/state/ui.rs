//! UI-related application state

use egui_commonmark::CommonMarkCache;

use crate::config::{Config, TypewriterConfig};

/// Application tabs representing the main navigation sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Hero header, feature panels, latest release
    #[default]
    Home,
    /// Dependency snippets for the latest release
    GetStarted,
    /// Source files embedded from GitHub
    Examples,
    /// Runtime editing of the typewriter and embed settings
    Settings,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::GetStarted, Tab::Examples, Tab::Settings]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::GetStarted => "Get Started",
            Tab::Examples => "Examples",
            Tab::Settings => "Settings",
        }
    }
}

/// Unsaved edits on the settings tab
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsDraft {
    pub typewriter: TypewriterConfig,
    /// One source URL per configured embed
    pub embed_sources: Vec<String>,
}

impl SettingsDraft {
    pub fn from_config(config: &Config) -> Self {
        Self {
            typewriter: config.typewriter.clone(),
            embed_sources: config.embeds.iter().map(|e| e.src.clone()).collect(),
        }
    }

    /// Whether the draft differs from what is applied
    pub fn is_dirty(&self, config: &Config) -> bool {
        *self != Self::from_config(config)
    }
}

/// UI-related state
pub struct UiState {
    /// Cache for markdown rendering
    pub markdown_cache: CommonMarkCache,
    /// Currently selected tab
    pub active_tab: Tab,
    /// Whether to show the About dialog
    pub show_about_dialog: bool,
    pub settings: SettingsDraft,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            markdown_cache: CommonMarkCache::default(),
            active_tab: Tab::default(),
            show_about_dialog: false,
            settings: SettingsDraft::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_draft_tracks_edits() {
        let config = Config::default();
        let mut draft = SettingsDraft::from_config(&config);
        assert_eq!(draft.embed_sources.len(), config.embeds.len());
        assert!(!draft.is_dirty(&config));

        draft.typewriter.pause_ms += 1;
        assert!(draft.is_dirty(&config));
    }
}
