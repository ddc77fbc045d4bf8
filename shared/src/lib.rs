//! Shared utilities and common types for the Ilon server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Phone number formatting helpers (normalization, log masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheBackend, CacheConfig, CorsConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, OtpConfig, ServerConfig,
};
pub use utils::phone;
