//! Get Started tab: dependency snippets for the latest release

use eframe::egui::{self, RichText};
use egui_commonmark::CommonMarkViewer;

use crate::app::HomeApp;
use crate::code_embed::fenced;
use crate::snippets::dependency_snippets;
use crate::ui::components;

/// Render the get started tab content
pub fn render_get_started_tab(app: &mut HomeApp, ui: &mut egui::Ui) {
    components::render_section_frame(ui, "Add to your project", |ui| {
        let state = app.release.state();
        let loading = "Loading latest release info...";
        let Some(result) = components::render_fetch_state(ui, state, loading) else {
            return;
        };

        let release_config = &app.config.release;
        let snippets = dependency_snippets(
            &release_config.group_id,
            &release_config.artifact_id,
            result.data.version(),
        );

        for snippet in snippets {
            ui.label(RichText::new(format!("{} {}", snippet.title, snippet.file)).strong());
            CommonMarkViewer::new().show(
                ui,
                &mut app.ui.markdown_cache,
                &fenced(&snippet.code, snippet.language),
            );
            ui.add_space(8.0);
        }
    });
}
