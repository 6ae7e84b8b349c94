//! Settings tab: edit the typewriter and code embeds at runtime

use eframe::egui::{self, RichText};

use crate::app::HomeApp;
use crate::config::TextAlign;
use crate::ui::components::{self, MUTED, WARNING};

const ALIGNMENTS: [(TextAlign, &str); 3] = [
    (TextAlign::Left, "Left"),
    (TextAlign::Center, "Center"),
    (TextAlign::Right, "Right"),
];

/// Render the settings tab
pub fn render_settings_tab(app: &mut HomeApp, ui: &mut egui::Ui) {
    render_typewriter_section(app, ui);
    ui.add_space(12.0);
    render_embeds_section(app, ui);
    ui.add_space(12.0);

    let dirty = app.ui.settings.is_dirty(&app.config);
    ui.horizontal(|ui| {
        if ui.add_enabled(dirty, egui::Button::new("Save")).clicked() {
            app.apply_settings();
        }
        if ui.add_enabled(dirty, egui::Button::new("Revert")).clicked() {
            app.revert_settings();
        }
        if dirty {
            ui.label(RichText::new("Unsaved changes").color(WARNING));
        }
    });
}

fn render_typewriter_section(app: &mut HomeApp, ui: &mut egui::Ui) {
    let draft = &mut app.ui.settings.typewriter;

    components::render_section_frame(ui, "Typewriter", |ui| {
        ui.label(RichText::new("Text:").color(MUTED));
        ui.add(
            egui::TextEdit::multiline(&mut draft.text)
                .code_editor()
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(8.0);

        egui::Grid::new("typewriter_settings")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Typing speed:").color(MUTED));
                ui.add(egui::DragValue::new(&mut draft.typing_speed_ms).suffix(" ms/char"));
                ui.end_row();

                ui.label(RichText::new("Pause:").color(MUTED));
                ui.add(egui::DragValue::new(&mut draft.pause_ms).suffix(" ms"));
                ui.end_row();

                ui.label(RichText::new("Height:").color(MUTED));
                ui.add(egui::DragValue::new(&mut draft.height).range(40.0..=800.0));
                ui.end_row();

                ui.label(RichText::new("Alignment:").color(MUTED));
                egui::ComboBox::from_id_salt("typewriter_align")
                    .selected_text(align_label(draft.align))
                    .show_ui(ui, |ui| {
                        for (align, label) in ALIGNMENTS {
                            ui.selectable_value(&mut draft.align, align, label);
                        }
                    });
                ui.end_row();
            });
    });
}

fn render_embeds_section(app: &mut HomeApp, ui: &mut egui::Ui) {
    let sources = &mut app.ui.settings.embed_sources;

    components::render_section_frame(ui, "Code embeds", |ui| {
        if sources.is_empty() {
            ui.label(RichText::new("No code embeds configured").color(MUTED));
            return;
        }
        for src in sources.iter_mut() {
            ui.add(egui::TextEdit::singleline(src).desired_width(f32::INFINITY));
        }
    });
}

fn align_label(align: TextAlign) -> &'static str {
    ALIGNMENTS
        .iter()
        .find(|(a, _)| *a == align)
        .map(|(_, label)| *label)
        .unwrap_or("Left")
}
