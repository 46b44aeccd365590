//! Booking service library: domain model, ports, adapters, and server
//! wiring for the VR arena booking API.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Tracing middleware attaching per-request trace identifiers.
pub use middleware::trace::Trace;
