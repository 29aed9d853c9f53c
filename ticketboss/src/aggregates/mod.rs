//! Aggregates for the reservation domain.
//!
//! The ledger aggregate owns the event and its reservations; the registry is
//! the reservation map it mutates inside each transaction.

pub mod ledger;
pub mod registry;

pub use ledger::{LedgerAction, LedgerEnvironment, LedgerReducer, LedgerState};
pub use registry::ReservationRegistry;
