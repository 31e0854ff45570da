//! gRPC service implementation.
//!
//! This module contains the core logic for handling client-facing gRPC
//! requests: feature lookup, bounding-box streaming, route summarization,
//! and the note relay chat.
//!
//! ## Structure
//!
//! - [`handler`] - gRPC service entry point (`RouteGuideService`).

pub mod handler;
