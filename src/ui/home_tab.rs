//! Home tab: hero header, typewriter, latest release, feature panels

use eframe::egui::{self, Color32, RichText, Stroke};

use crate::app::HomeApp;
use crate::config::TextAlign;
use crate::ui::components::{self, ACCENT, BADGE, MUTED, WARNING};

/// A static feature panel
struct Feature {
    title: &'static str,
    description: &'static str,
}

const FEATURES: &[Feature] = &[
    Feature {
        title: "Easy LLM Integration",
        description: "Easy integration with Ollama, enabling the execution of large language models locally.",
    },
    Feature {
        title: "Developer-Friendly",
        description: "Clean and simple APIs, focused on seamless interaction with Ollama.",
    },
    Feature {
        title: "Powered by Java",
        description: "Empowers Java developers to harness the full capabilities of Ollama.",
    },
];

/// Render the home tab content
pub fn render_home_tab(app: &mut HomeApp, ui: &mut egui::Ui) {
    render_header(app, ui);
    ui.add_space(16.0);
    render_features(ui);
    ui.add_space(16.0);
    render_coffee(app, ui);
}

fn render_header(app: &mut HomeApp, ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(&app.config.site.title).size(36.0).strong());
        ui.label(RichText::new(&app.config.site.tagline).size(16.0).color(MUTED));
        ui.add_space(12.0);

        let button = egui::Button::new(RichText::new("Getting Started").strong())
            .min_size(egui::vec2(160.0, 36.0));
        if ui.add(button).clicked() {
            if let Err(e) = open::that(&app.config.site.docs_url) {
                tracing::error!("Failed to open docs: {}", e);
            }
        }
    });

    ui.add_space(16.0);
    render_typewriter(app, ui);
    ui.add_space(24.0);

    ui.vertical_centered(|ui| render_latest_release(app, ui));
}

fn render_typewriter(app: &HomeApp, ui: &mut egui::Ui) {
    let config = app.typewriter.config();
    let text = app.typewriter.visible_text();
    let width = config.width.unwrap_or_else(|| ui.available_width());

    let layout = egui::Layout::top_down(match config.align {
        TextAlign::Left => egui::Align::Min,
        TextAlign::Center => egui::Align::Center,
        TextAlign::Right => egui::Align::Max,
    });

    egui::Frame::new()
        .fill(Color32::from_rgb(0xf4, 0xf4, 0xf4))
        .stroke(Stroke::new(1.0, Color32::from_rgb(0xcc, 0xcc, 0xcc)))
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width((width - 32.0).max(0.0));
            ui.set_height(config.height);
            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    ui.with_layout(layout, |ui| {
                        ui.label(RichText::new(text).monospace().color(Color32::BLACK));
                    });
                });
        });
}

fn render_latest_release(app: &HomeApp, ui: &mut egui::Ui) {
    let state = app.release.state();
    let loading = "Loading latest release info...";
    let Some(result) = components::render_fetch_state(ui, state, loading) else {
        return;
    };
    let release = &result.data;

    ui.horizontal(|ui| {
        ui.label(RichText::new("Latest Version").strong());
        ui.label(":");
        let badge = RichText::new(release.version())
            .strong()
            .color(Color32::WHITE)
            .background_color(BADGE);
        match release.html_url.as_deref() {
            Some(url) => components::external_link(ui, badge, url),
            None => {
                ui.label(badge);
            }
        }

        if app.config.release.show_release_date {
            if let Some(date) = release.release_date_label() {
                ui.label(format!("released on {}", date));
            }
        }
    });

    if app.release.rate_limit.is_low() {
        let remaining = app.release.rate_limit.remaining.unwrap_or(0);
        let reset_mins = app.release.rate_limit.reset_in_minutes().unwrap_or(0);
        ui.label(
            RichText::new(format!(
                "API limit: {} requests remaining (resets in {} min)",
                remaining, reset_mins
            ))
            .color(WARNING)
            .size(11.0),
        );
    }
}

fn render_features(ui: &mut egui::Ui) {
    ui.columns(FEATURES.len(), |columns| {
        for (column, feature) in columns.iter_mut().zip(FEATURES) {
            column.vertical_centered(|ui| {
                ui.label(RichText::new(feature.title).size(18.0).strong().color(ACCENT));
                ui.add_space(6.0);
                ui.label(feature.description);
            });
        }
    });
}

fn render_coffee(app: &HomeApp, ui: &mut egui::Ui) {
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        components::external_link(ui, "☕ Buy me a coffee", &app.config.site.coffee_url);
        ui.label(RichText::new("Support the project:").color(MUTED));
    });
}
