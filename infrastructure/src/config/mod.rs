//! Configuration file loading for mabrur
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `MABRUR_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./mabrur.toml` or `./.mabrur.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/mabrur/config.toml`
//! 5. Fallback: `~/.config/mabrur/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileKnowledgeConfig, FileLoggingConfig,
    FileProviderConfig, FileRetrievalConfig, FileRetryConfig, FileServerConfig,
};
pub use loader::ConfigLoader;
