//! Configuration module for reelwright.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the API
//! connection and the terminal wizard, `AppPaths` for cross-platform config
//! directories, and TOML persistence via `AppConfig::load` /
//! `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{ApiConfig, AppConfig, WizardConfig};
