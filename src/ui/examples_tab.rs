//! Examples tab: source files embedded from GitHub

use eframe::egui::{self, RichText};
use egui_commonmark::CommonMarkViewer;

use crate::app::HomeApp;
use crate::ui::components::{self, MUTED};

/// Render the examples tab content
pub fn render_examples_tab(app: &mut HomeApp, ui: &mut egui::Ui) {
    if app.embeds.embeds.is_empty() {
        ui.label(RichText::new("No code embeds configured").color(MUTED));
        return;
    }

    let cache = &mut app.ui.markdown_cache;
    for embed in &app.embeds.embeds {
        let title = embed.file_name().unwrap_or("Untitled").to_string();
        components::render_section_frame(ui, &title, |ui| {
            if let Some(url) = embed.github_url() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    components::external_link(
                        ui,
                        RichText::new("View on GitHub").italics().color(MUTED),
                        &url,
                    );
                });
            }

            if components::render_fetch_state(ui, embed.state(), "Loading code...").is_some() {
                if let Some(markdown) = embed.markdown() {
                    CommonMarkViewer::new().show(ui, cache, &markdown);
                }
            }
        });
        ui.add_space(12.0);
    }
}
