//! # TicketBoss Testing
//!
//! Testing utilities and helpers for TicketBoss reducers.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - A Given-When-Then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use ticketboss_testing::{test_clock, SequentialIdGenerator};
//!
//! let env = LedgerEnvironment::new(
//!     Arc::new(test_clock()),
//!     Arc::new(SequentialIdGenerator::new()),
//! );
//! ```

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use ticketboss_core::environment::{Clock, IdGenerator};
use uuid::Uuid;


/// Mock implementations of Environment traits
pub mod mocks {
    use super::{AtomicU64, Clock, DateTime, IdGenerator, Ordering, Utc, Uuid};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use ticketboss_testing::mocks::FixedClock;
    /// use ticketboss_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable identifiers: 1, 2, 3, ... encoded as UUIDs
    ///
    /// Safe to share between threads; every call still yields a fresh id.
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose first id is `SequentialIdGenerator::nth(1)`
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(1),
            }
        }

        /// The id the `n`th call returns (1-based)
        #[must_use]
        pub const fn nth(n: u64) -> Uuid {
            Uuid::from_u64_pair(0, n)
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> Uuid {
            Self::nth(self.next.fetch_add(1, Ordering::Relaxed))
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SequentialIdGenerator, test_clock};
pub use reducer_test::ReducerTest;
