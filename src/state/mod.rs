//! Application state modules
//!
//! Each state struct owns its related fields and poll methods, and reports
//! back to the app through `StateEvent`s instead of mutating it directly.

mod embeds;
mod releases;
mod ui;

pub use embeds::EmbedsState;
pub use releases::ReleaseState;
pub use ui::{SettingsDraft, Tab, UiState};

/// Events that state poll methods can return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    /// Update the status message
    StatusMessage(String),

    /// Log an error message
    LogError(String),

    /// Log an info message
    LogInfo(String),
}
