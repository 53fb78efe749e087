//! Display formatting and result wrapper types.
//!
//! Domain models implement `Display` directly; collections and operation
//! outcomes go through small wrapper types so every interface prints the
//! same markdown.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Formatted     │
//! │  (Plan, Task)   │───▶│ Envelope render │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (Actions)
//! - [`results`]: Operation result types (CreateResult, UpdateResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//! - [`envelope`]: Display implementation for operation envelopes
//!
//! ## Usage Examples
//!
//! ```rust
//! use trellis_core::display::OperationStatus;
//!
//! let success = OperationStatus::success("Plan discarded".to_string());
//! assert_eq!(success.to_string(), "Success: Plan discarded\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod envelope;
pub mod models;
pub mod results;
pub mod status;

pub use collections::Actions;
pub use datetime::LocalDateTime;
pub use results::{CreateResult, UpdateResult};
pub use status::OperationStatus;
