//! Integration tests for Store action broadcasting
//!
//! Observers see every action an effect feeds back into the store.
//! `send_and_wait_for` resolves on the first matching feedback action,
//! follows multi-step chains, and times out when nothing matches.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use orderdesk_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use orderdesk_runtime::{Store, StoreError};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum TestAction {
    /// Ask the fake backend for a record
    Lookup { id: u64 },
    /// Backend answered
    Resolved { id: u64 },
    /// Backend answered in pages, one per step
    LookupPaged { id: u64 },
    PageLoaded { id: u64, page: u32 },
    /// Never produced by any effect
    Rejected { id: u64 },
}

#[derive(Debug, Clone, Default)]
struct TestState {
    resolved: Vec<u64>,
    pages: Vec<u32>,
}

#[derive(Clone)]
struct TestEnvironment;

#[derive(Clone)]
struct TestReducer;

impl Reducer for TestReducer {
    type State = TestState;
    type Action = TestAction;
    type Environment = TestEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TestAction::Lookup { id } => smallvec![Effect::Future(Box::pin(async move {
                // Simulate network latency
                tokio::time::sleep(Duration::from_millis(10)).await;
                Some(TestAction::Resolved { id })
            }))],
            TestAction::Resolved { id } => {
                state.resolved.push(id);
                SmallVec::new()
            },
            TestAction::LookupPaged { id } => {
                state.pages.clear();
                smallvec![Effect::Future(Box::pin(async move {
                    Some(TestAction::PageLoaded { id, page: 1 })
                }))]
            },
            TestAction::PageLoaded { id, page } => {
                state.pages.push(page);
                if page < 3 {
                    smallvec![Effect::Future(Box::pin(async move {
                        tokio::time::sleep(Duration::from_millis(5)).await;
                        Some(TestAction::PageLoaded { id, page: page + 1 })
                    }))]
                } else {
                    smallvec![Effect::Future(Box::pin(async move {
                        Some(TestAction::Resolved { id })
                    }))]
                }
            },
            TestAction::Rejected { .. } => SmallVec::new(),
        }
    }
}

fn new_store() -> Store<TestState, TestAction, TestEnvironment, TestReducer> {
    Store::new(TestState::default(), TestReducer, TestEnvironment)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn send_and_wait_for_returns_completion_action() {
    let store = new_store();

    let action = store
        .send_and_wait_for(
            TestAction::Lookup { id: 7 },
            |a| matches!(a, TestAction::Resolved { id: 7 }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(action, TestAction::Resolved { id: 7 });
}

#[tokio::test]
async fn send_and_wait_for_follows_multi_step_chain() {
    let store = new_store();

    store
        .send_and_wait_for(
            TestAction::LookupPaged { id: 42 },
            |a| matches!(a, TestAction::Resolved { id: 42 }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(store.state(|s| s.pages.clone()).await, vec![1, 2, 3]);
}

#[tokio::test]
async fn send_and_wait_for_times_out() {
    let store = new_store();

    let result = store
        .send_and_wait_for(
            TestAction::Lookup { id: 99 },
            |a| matches!(a, TestAction::Rejected { id: 99 }),
            Duration::from_millis(50),
        )
        .await;

    assert!(matches!(result, Err(StoreError::Timeout)));
}

#[tokio::test]
async fn concurrent_waiters_get_their_own_completion() {
    let store = Arc::new(new_store());

    let mut tasks = Vec::new();
    for id in 1..=5 {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            store
                .send_and_wait_for(
                    TestAction::Lookup { id },
                    move |a| matches!(a, TestAction::Resolved { id: got } if *got == id),
                    Duration::from_secs(2),
                )
                .await
        }));
    }

    for (idx, task) in tasks.into_iter().enumerate() {
        let action = task.await.unwrap().unwrap();
        assert_eq!(action, TestAction::Resolved { id: idx as u64 + 1 });
    }

    let mut resolved = store.state(|s| s.resolved.clone()).await;
    resolved.sort_unstable();
    assert_eq!(resolved, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn subscribers_see_effect_actions_only() {
    let store = new_store();
    let mut rx = store.subscribe_actions();

    store
        .send_and_settle(TestAction::Lookup { id: 3 })
        .await
        .unwrap();

    let observed = rx.recv().await.unwrap();
    assert_eq!(observed, TestAction::Resolved { id: 3 });
    assert!(rx.try_recv().is_err());
}
