//! Configuration management for jobboard-rs
//!
//! Settings are merged from TOML files and `JOBBOARD_*` environment variables.
//! See [`ConfigLoader`] for the precedence rules.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    ApplicationConfig, ConsoleSettings, FileSettings, LoggerSettings, RelationshipSettings,
    Settings, StoreConfig,
};
