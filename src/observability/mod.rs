//! Observability subsystem.
//!
//! # Responsibilities
//! - Initialize the logging subscriber for embedders that do not bring
//!   their own
//!
//! # Design Decisions
//! - The engine itself only emits `tracing` events; installing a
//!   subscriber is the embedder's choice

pub mod logging;
