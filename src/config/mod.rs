//! Configuration module for Deben
//!
//! - XDG-compliant path resolution
//! - Optional user settings with display defaults

pub mod paths;
pub mod settings;

pub use paths::DebenPaths;
pub use settings::Settings;
