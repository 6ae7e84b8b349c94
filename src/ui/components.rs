//! Shared UI components

use eframe::egui::{self, Color32, RichText};

use crate::app::HomeApp;
use crate::resource::FetchState;
use crate::state::Tab;

pub const ACCENT: Color32 = Color32::from_rgb(0x2e, 0x85, 0x55);
pub const BADGE: Color32 = Color32::from_rgb(0x11, 0xbc, 0x11);
pub const MUTED: Color32 = Color32::GRAY;
pub const ERROR: Color32 = Color32::from_rgb(0xe1, 0x3c, 0x3c);
pub const WARNING: Color32 = Color32::from_rgb(255, 165, 0);

/// Render a tab button
pub fn render_tab(app: &mut HomeApp, ui: &mut egui::Ui, tab: Tab) {
    let is_active = app.ui.active_tab == tab;
    let text = if is_active {
        RichText::new(tab.label()).color(ACCENT).strong()
    } else {
        RichText::new(tab.label()).color(MUTED)
    };

    if ui.selectable_label(is_active, text).clicked() {
        app.ui.active_tab = tab;
    }
}

/// Render a titled frame around a section
pub fn render_section_frame<F>(ui: &mut egui::Ui, title: &str, content: F)
where
    F: FnOnce(&mut egui::Ui),
{
    egui::Frame::group(ui.style())
        .corner_radius(8.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).color(ACCENT).size(13.0).strong());
            ui.add_space(12.0);
            content(ui);
        });
}

/// Render the loading or error placeholder of a fetched resource.
///
/// Returns the payload when it is ready so the caller can render it.
pub fn render_fetch_state<'a, T>(
    ui: &mut egui::Ui,
    state: &'a FetchState<T>,
    loading_text: &str,
) -> Option<&'a T> {
    match state {
        FetchState::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new(loading_text).color(MUTED));
            });
            None
        }
        FetchState::Error(failure) => {
            ui.label(RichText::new(failure.to_string()).color(ERROR));
            None
        }
        FetchState::Ready(payload) => Some(payload),
    }
}

/// A link that opens `url` in the system browser
pub fn external_link(ui: &mut egui::Ui, text: impl Into<RichText>, url: &str) {
    let text: RichText = text.into();
    if ui.link(text).on_hover_text(url).clicked() {
        if let Err(e) = open::that(url) {
            tracing::error!("Failed to open {}: {}", url, e);
        }
    }
}

/// Render the About dialog
pub fn render_about_dialog(app: &mut HomeApp, ctx: &egui::Context) {
    if !app.ui.show_about_dialog {
        return;
    }

    egui::Window::new(format!("About {}", app.config.site.title))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 200.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(
                    RichText::new(&app.config.site.title)
                        .size(24.0)
                        .strong()
                        .color(ACCENT),
                );
                ui.add_space(4.0);
                ui.label(RichText::new(&app.config.site.tagline).color(MUTED));

                ui.add_space(12.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION"))).color(MUTED),
                );

                ui.add_space(12.0);
                let repo_url = format!("https://github.com/{}", app.config.release.repository);
                external_link(ui, "GitHub", &repo_url);

                ui.add_space(12.0);
                if ui.button("Close").clicked() {
                    app.ui.show_about_dialog = false;
                }
                ui.add_space(8.0);
            });
        });
}
