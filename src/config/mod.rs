//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, GateConfig, LogFormat, LoggingConfig, ServerConfig, SessionConfig,
    ValidationPolicy,
};
