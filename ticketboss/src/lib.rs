//! # TicketBoss
//!
//! Seat reservations for a single event, safe under concurrent access.
//!
//! Partners reserve between 1 and 10 seats; the event can never be
//! oversold. All state lives in memory, owned by one [`Store`] whose write
//! lock makes every reservation, cancellation and reset a single
//! transaction.
//!
//! ## Layout
//!
//! - [`types`]: identifiers, seat counts, event and reservation entities
//! - [`error`]: the three ways an operation can be rejected
//! - [`aggregates`]: the ledger reducer and its reservation registry
//! - [`app`]: [`ReservationService`], the operations callers use
//! - [`config`]: environment-driven configuration
//! - [`server`] and [`api`]: the Axum router and handlers
//!
//! [`Store`]: ticketboss_runtime::Store

pub mod aggregates;
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod server;
pub mod types;

pub use app::ReservationService;
pub use error::LedgerError;
