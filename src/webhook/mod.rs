//! Webhook delivery subsystem.
//!
//! The handler talks to a `WebhookSink`, not to the network; the reqwest
//! implementation is wired in at startup and fakes are wired in by tests.

pub mod client;

pub use client::{DeliveryOutcome, HttpWebhookSink, WebhookSink};
