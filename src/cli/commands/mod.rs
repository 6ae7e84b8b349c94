pub mod config;
pub mod embed;
pub mod release;
pub mod typewriter;
