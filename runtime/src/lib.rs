//! # TicketBoss Runtime
//!
//! Runtime implementation for TicketBoss reducers.
//!
//! ## Core Components
//!
//! - **Store**: Owns the state and serializes every transaction through one lock
//! - **Metrics**: Prometheus exporter and recorders for store activity
//!
//! ## Example
//!
//! ```ignore
//! use ticketboss_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Run a transaction
//! let outcome = store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::time::Instant;
use ticketboss_core::reducer::Reducer;
use tokio::sync::RwLock;

/// Prometheus metrics for observability
pub mod metrics;

pub use store::Store;

/// Store runtime for coordinating reducer execution.
pub mod store {
    use super::{Instant, Reducer, RwLock};
    use crate::metrics::StoreMetrics;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`, the single mutual-exclusion domain)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    ///
    /// The Store holds the only reference to its state. Callers never see
    /// the state directly: they submit actions through [`Store::send`] and
    /// read through closures passed to [`Store::state`].
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::new(
    ///     LedgerState::default(),
    ///     LedgerReducer::new(),
    ///     production_environment(),
    /// );
    ///
    /// store.send(LedgerAction::Cancel { reservation_id }).await?;
    /// ```
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: RwLock<S>,
        reducer: R,
        environment: E,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync,
        A: Send,
        S: Send + Sync,
        E: Send + Sync,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: RwLock::new(initial_state),
                reducer,
                environment,
            }
        }

        /// Run an action as one transaction
        ///
        /// This method:
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Releases the lock and returns the reducer's result
        ///
        /// # Concurrency
        ///
        /// - Concurrent `send()` calls serialize at the write lock
        /// - The reducer runs synchronously: nothing is awaited while the
        ///   write guard is held, so lock hold time is bounded by the reducer
        /// - Readers going through [`Store::state`] never observe a
        ///   transaction half-applied
        ///
        /// # Errors
        ///
        /// Returns the reducer's error if the transaction rejects the action.
        /// State is unchanged in that case.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<R::Output, R::Error> {
            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            let start = Instant::now();
            let result = self.reducer.reduce(&mut *state, action, &self.environment);
            let duration = start.elapsed();
            drop(state);

            StoreMetrics::record_transaction(result.is_ok(), duration);
            tracing::debug!(applied = result.is_ok(), "Transaction completed");

            result
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released promptly:
        ///
        /// ```ignore
        /// let count = store.state(|s| s.registry.count()).await;
        /// ```
        ///
        /// The closure runs under the read lock, so everything it sees
        /// belongs to one committed state.
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// The environment injected at construction
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Debug, Default)]
    struct PairState {
        left: u32,
        right: u32,
    }

    #[derive(Debug)]
    enum PairAction {
        /// Move `n` units from left to right
        Shift(u32),
        Reset(u32),
    }

    #[derive(Debug, PartialEq, Eq)]
    enum PairError {
        Exhausted,
    }

    struct PairReducer;

    impl Reducer for PairReducer {
        type State = PairState;
        type Action = PairAction;
        type Environment = ();
        type Output = u32;
        type Error = PairError;

        fn reduce(&self, state: &mut PairState, action: PairAction, _env: &()) -> Result<u32, PairError> {
            match action {
                PairAction::Shift(n) => {
                    if state.left < n {
                        return Err(PairError::Exhausted);
                    }
                    state.left -= n;
                    state.right += n;
                    Ok(state.left)
                }
                PairAction::Reset(total) => {
                    state.left = total;
                    state.right = 0;
                    Ok(total)
                }
            }
        }
    }

    #[tokio::test]
    async fn test_send_applies_transaction() {
        let store = Store::new(PairState { left: 10, right: 0 }, PairReducer, ());

        assert_eq!(store.send(PairAction::Shift(4)).await, Ok(6));

        let (left, right) = store.state(|s| (s.left, s.right)).await;
        assert_eq!((left, right), (6, 4));
    }

    #[tokio::test]
    async fn test_rejection_leaves_state_untouched() {
        let store = Store::new(PairState { left: 10, right: 0 }, PairReducer, ());

        assert_eq!(store.send(PairAction::Shift(11)).await, Err(PairError::Exhausted));

        let (left, right) = store.state(|s| (s.left, s.right)).await;
        assert_eq!((left, right), (10, 0));
    }

    #[tokio::test]
    async fn test_reset_replaces_state() {
        let store = Store::new(PairState::default(), PairReducer, ());
        store.send(PairAction::Reset(3)).await.unwrap();
        store.send(PairAction::Shift(3)).await.unwrap();

        assert_eq!(store.send(PairAction::Reset(7)).await, Ok(7));
        assert_eq!(store.state(|s| s.left + s.right).await, 7);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sends_never_overdraw() {
        let store = Arc::new(Store::new(PairState { left: 25, right: 0 }, PairReducer, ()));

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.send(PairAction::Shift(1)).await })
            })
            .collect();

        let results: Vec<_> = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|r| r.expect("task panicked"))
            .collect();

        let applied = results.iter().filter(|r| r.is_ok()).count();
        let exhausted = results
            .iter()
            .filter(|r| matches!(r, Err(PairError::Exhausted)))
            .count();

        assert_eq!(applied, 25);
        assert_eq!(exhausted, 75);
        assert_eq!(store.state(|s| (s.left, s.right)).await, (0, 25));
    }

    #[test]
    fn test_send_from_blocking_context() {
        let store = Store::new(PairState { left: 2, right: 0 }, PairReducer, ());
        let result = tokio_test::block_on(store.send(PairAction::Shift(2)));
        assert_eq!(result, Ok(0));
    }
}
