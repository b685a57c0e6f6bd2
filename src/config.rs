//! Settings for the catalog tools, read from `.i18n-catalog.json`.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Scanned file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    I18nSettings,
    ValidationError,
};
