//! Core types shared across LumaEngine: configuration and errors.

mod config;
mod error;

pub use config::{
    AnalyzerConfig, BoardConfig, Config, CorsConfig, LoggingConfig, ServerConfig,
    LOCAL_CONFIG_FILE,
};
pub use error::{Error, Result};
