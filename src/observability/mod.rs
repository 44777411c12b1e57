//! Observability subsystem.
//!
//! Structured logging goes through `tracing` (initialized in main);
//! counters are exported Prometheus-style when enabled in config.

pub mod metrics;
