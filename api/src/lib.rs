//! # Ilon API
//!
//! HTTP surface for phone-number OTP sign-in: configuration loading,
//! tracing setup, route handlers and the application factory used by both
//! the binary and the integration tests.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
