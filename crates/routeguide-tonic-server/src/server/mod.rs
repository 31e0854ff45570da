//! Server internals: configuration, logging, the feature database, and the
//! gRPC service implementation.
//!
//! ## Structure
//!
//! - [`config`] - CLI arguments and the validated runtime configuration.
//! - [`telemetry`] - tracing/logging setup.
//! - [`store`] - the read-only feature database loaded at startup.
//! - [`service`] - the gRPC service entry point (`RouteGuideService`).

pub mod config;
pub mod service;
pub mod store;
pub mod telemetry;
