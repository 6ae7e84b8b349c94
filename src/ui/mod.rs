//! UI modules, organized by tab.

pub mod components;
mod examples_tab;
mod get_started_tab;
mod home_tab;
mod settings_tab;

pub use examples_tab::render_examples_tab;
pub use get_started_tab::render_get_started_tab;
pub use home_tab::render_home_tab;
pub use settings_tab::render_settings_tab;
