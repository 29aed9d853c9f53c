//! Axum integration for TicketBoss.
//!
//! This crate is the imperative shell around the reservation core: it turns
//! domain rejections into HTTP responses and tags every request with a
//! correlation id for tracing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← HTTP, JSON
//! │  - Request parsing                      │  ← Correlation ids
//! │  - Response serialization               │  ← Logging
//! ├─────────────────────────────────────────┤
//! │         Functional Core                 │
//! │  - Ledger reducer                       │  ← Testable at memory speed
//! │  - One Store, one lock                  │  ← No I/O inside transactions
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract data** from request (JSON, path)
//! 3. **Call the service**, which runs one Store transaction
//! 4. **Map result** to HTTP response (`AppError` for rejections)

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod middleware;

// Re-export key types for convenience
pub use error::AppError;
pub use middleware::{CORRELATION_ID_HEADER, CorrelationId, correlation_id};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
