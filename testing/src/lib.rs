//! # Orderdesk Testing
//!
//! Testing utilities and helpers for the Orderdesk store.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given/When/Then harness for slice reducers
//! - [`MockBackend`]: In-memory implementation of both backend services
//! - [`FixedClock`]: Deterministic time
//!
//! ## Example
//!
//! ```ignore
//! use orderdesk_testing::MockBackend;
//! use orderdesk_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_fetch_orders() {
//!     let backend = MockBackend::new()
//!         .with_product("p-1", "Widget", Money::from_cents(1050))
//!         .with_order("o-1", "A-1", OrderStatus::Pending, &[("p-1", 2)]);
//!     let store = Store::new(AppState::default(), AppReducer::new(), environment(&backend));
//!
//!     store.send_and_settle(AppAction::Orders(OrdersAction::FetchOrders)).await.unwrap();
//!
//!     assert_eq!(store.state(|s| s.orders.list.len()).await, 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use orderdesk_core::environment::Clock;

pub mod mock_backend;
pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use orderdesk_testing::mocks::FixedClock;
    /// use orderdesk_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
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
            DateTime::parse_from_rfc3339(crate::mock_backend::MOCK_ORDER_DATE)
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mock_backend::{MockBackend, Operation, Request};
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_matches_mock_order_date() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }
}
