//! Configuration module for subkeep
//!
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SubkeepPaths;
pub use settings::Settings;
