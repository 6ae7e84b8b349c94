use eframe::egui;

use crate::config::Config;
use crate::github::GitHubClient;
use crate::state::{EmbedsState, ReleaseState, SettingsDraft, StateEvent, Tab, UiState};
use crate::typewriter::TypewriterAnimator;

/// Main application state
pub struct HomeApp {
    /// Application configuration
    pub config: Config,
    /// GitHub HTTP client
    pub github_client: GitHubClient,
    /// Status message for the status bar
    pub status_message: String,
    pub ui: UiState,
    /// Latest release lookup
    pub release: ReleaseState,
    /// Code embeds on the examples tab
    pub embeds: EmbedsState,
    /// Hero text animation
    pub typewriter: TypewriterAnimator,
}

impl HomeApp {
    /// Create a new application instance
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: Config,
        github_client: GitHubClient,
    ) -> Self {
        let typewriter = TypewriterAnimator::start(config.typewriter.clone());
        let embeds = EmbedsState::from_config(&config.embeds);
        let ui = UiState {
            settings: SettingsDraft::from_config(&config),
            ..UiState::default()
        };

        let mut app = Self {
            config,
            github_client,
            status_message: "Ready".to_string(),
            ui,
            release: ReleaseState::default(),
            embeds,
            typewriter,
        };

        // Header widgets mount with the page
        if let Some(event) = app.release.mount(&app.config.release, &app.github_client) {
            app.handle_event(event);
        }

        app
    }

    /// Apply an event returned by a state poll method
    fn handle_event(&mut self, event: StateEvent) {
        match event {
            StateEvent::StatusMessage(msg) => self.status_message = msg,
            StateEvent::LogError(msg) => tracing::error!("{}", msg),
            StateEvent::LogInfo(msg) => tracing::info!("{}", msg),
        }
    }

    /// Mount the widgets of the active tab, unmount the rest
    fn sync_mounts(&mut self) {
        match self.ui.active_tab {
            Tab::Examples => {
                let started = self.embeds.mount_all(&self.github_client);
                if started > 0 {
                    self.status_message = format!("Fetching {} code embeds...", started);
                }
            }
            Tab::Home | Tab::GetStarted | Tab::Settings => self.embeds.unmount_all(),
        }
    }

    /// Apply the settings draft to the running widgets and persist it
    pub fn apply_settings(&mut self) {
        let draft = self.ui.settings.clone();

        self.typewriter.reconfigure(draft.typewriter.clone());
        self.config.typewriter = draft.typewriter;

        self.embeds.set_sources(&draft.embed_sources, &self.github_client);
        for (embed, src) in self.config.embeds.iter_mut().zip(&draft.embed_sources) {
            embed.src = src.trim().to_string();
        }
        self.ui.settings = SettingsDraft::from_config(&self.config);

        self.save_config();
        self.status_message = "Settings saved".to_string();
    }

    /// Drop unsaved edits
    pub fn revert_settings(&mut self) {
        self.ui.settings = SettingsDraft::from_config(&self.config);
    }

    /// Save configuration to disk
    fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
        }
    }

    /// Poll async tasks and schedule the next repaint
    fn poll_tasks(&mut self, ctx: &egui::Context) {
        let mut events = self.release.poll();
        events.extend(self.embeds.poll());
        for event in events {
            self.handle_event(event);
        }

        if self.release.is_pending() || self.embeds.is_pending() {
            ctx.request_repaint();
        } else if self.typewriter.is_running() {
            ctx.request_repaint_after(self.typewriter.config().typing_speed());
        }
    }
}

impl eframe::App for HomeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_tasks(ctx);

        // Top navigation
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for &tab in Tab::all() {
                    crate::ui::components::render_tab(self, ui, tab);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("About").clicked() {
                        self.ui.show_about_dialog = true;
                    }
                });
            });
        });

        // Status bar at bottom
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);
            });
        });

        self.sync_mounts();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.ui.active_tab {
                Tab::Home => crate::ui::render_home_tab(self, ui),
                Tab::GetStarted => crate::ui::render_get_started_tab(self, ui),
                Tab::Examples => crate::ui::render_examples_tab(self, ui),
                Tab::Settings => crate::ui::render_settings_tab(self, ui),
            });
        });

        crate::ui::components::render_about_dialog(self, ctx);
    }
}
