//! # TicketBoss Core
//!
//! Core traits for the TicketBoss reservation service.
//!
//! Business logic is written as reducers: a transaction takes the current
//! state, an action and an injected environment, and either applies the
//! action in full or rejects it without touching state.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state owned by exactly one `Store`
//! - **Action**: All possible inputs to a reducer
//! - **Reducer**: `(State, Action, Environment) → Result<Output, Error>`
//! - **Environment**: Injected dependencies via traits (clock, id generation)
//!
//! ## Example
//!
//! ```ignore
//! use ticketboss_core::reducer::Reducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = CounterEnvironment;
//!     type Output = u64;
//!     type Error = CounterError;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &CounterEnvironment,
//!     ) -> Result<u64, CounterError> {
//!         state.count += 1;
//!         Ok(state.count)
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use uuid::Uuid;

/// Reducer module - The core trait for business logic
///
/// A reducer is the only code allowed to mutate state. The runtime calls
/// [`reducer::Reducer::reduce`] while holding the state lock exclusively.
pub mod reducer {
    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    /// - `Output`: What a successful transaction returns to the caller
    /// - `Error`: Why a transaction was rejected
    ///
    /// # Transaction Contract
    ///
    /// `reduce` either applies every change an action implies and returns
    /// `Ok`, or returns `Err` with `state` exactly as it was passed in.
    /// Implementations check all failure conditions before the first write.
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for LedgerReducer {
    ///     type State = LedgerState;
    ///     type Action = LedgerAction;
    ///     type Environment = LedgerEnvironment;
    ///     type Output = Event;
    ///     type Error = LedgerError;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut LedgerState,
    ///         action: LedgerAction,
    ///         env: &LedgerEnvironment,
    ///     ) -> Result<Event, LedgerError> {
    ///         match action {
    ///             LedgerAction::Cancel { reservation_id } => {
    ///                 // Business logic here
    ///             }
    ///             // ...
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Result of a successful transaction
        type Output;

        /// Rejection reason for a failed transaction
        type Error;

        /// Apply an action to state as one indivisible transaction
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Errors
        ///
        /// Returns the reducer's error if the action conflicts with current
        /// state. State is left untouched in that case.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Result<Self::Output, Self::Error>;
    }
}

/// Environment module - Dependency injection traits
///
/// All sources of nondeterminism a reducer needs (time, fresh identifiers)
/// are abstracted behind traits and injected via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - uses system clock
    /// let clock = SystemClock;
    ///
    /// // Test - fixed time for deterministic tests
    /// let clock = FixedClock::new(time);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// `IdGenerator` trait - abstracts identifier generation for testability
    ///
    /// Every call must return an identifier never returned before by the
    /// same generator.
    pub trait IdGenerator: Send + Sync {
        /// Produce a fresh identifier
        fn next_id(&self) -> Uuid;
    }

    /// Random v4 UUIDs
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidGenerator;

    impl IdGenerator for UuidGenerator {
        fn next_id(&self) -> Uuid {
            Uuid::new_v4()
        }
    }
}
