//! Library exports for reuse in integration tests.
/// Application directory helpers.
pub mod app_dirs;
/// Configuration load/save.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Effort estimation domain types and service client.
pub mod estimator;
/// Shared HTTP client helpers.
pub mod http_client;
/// Logging setup.
pub mod logging;
