//! Configuration loading and resolution.

pub mod loader;

pub use loader::{load_config, load_config_with, ServerConfig, CONFIG_ENV};
