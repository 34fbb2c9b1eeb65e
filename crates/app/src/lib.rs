//! Process wiring for the event scheduling services.
//!
//! Loads configuration from the environment and builds every service once,
//! with tracing and Prometheus metrics installed by the binary.

pub mod config;
pub mod container;
pub mod demo;

pub use config::Config;
pub use container::Container;
