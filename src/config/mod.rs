//! Destination registration subsystem.
//!
//! # Data Flow
//! ```text
//! static registration data (code, JSON or TOML)
//!     → schema.rs (serde destination descriptors)
//!     → validation.rs (semantic checks)
//!     → RouteTable::build (frozen, immutable)
//! ```
//!
//! # Design Decisions
//! - Descriptors are plain data with defaults everywhere; pluggable
//!   matcher / converter hooks ride along as `#[serde(skip)]` trait
//!   objects attached in code
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports all violations, not just the first

pub mod schema;
pub mod validation;

pub use schema::{DestinationConfig, HandlerConfig, RouteRegistration, VariantConfig};
pub use validation::ValidationError;
