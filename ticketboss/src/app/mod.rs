//! Application services wiring the ledger to its Store.

mod services;

pub use services::{LedgerStore, ReservationService};
