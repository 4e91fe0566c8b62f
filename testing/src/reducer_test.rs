//! Given/When/Then harness for slice reducers
//!
//! Slice tests usually replay a short history (a fetch, then its completion)
//! before the action under test, so the harness accepts prior actions as
//! part of the "given" and only asserts on the effects of the final action.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use orderdesk_core::{effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// use orderdesk_testing::ReducerTest;
///
/// ReducerTest::new(OrdersReducer::new())
///     .with_env(test_environment())
///     .given_state(OrdersState::default())
///     .given_actions(vec![OrdersAction::FetchOrders])
///     .when_action(OrdersAction::OrdersLoaded { orders: vec![summary] })
///     .then_state(|state| {
///         assert_eq!(state.status, LoadStatus::Succeeded);
///     })
///     .then_effects(assertions::assert_no_effects)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    history: Vec<A>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            history: Vec::new(),
            action: None,
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Actions reduced before the action under test (Given)
    ///
    /// Their effects are discarded.
    #[must_use]
    pub fn given_actions(mut self, actions: Vec<A>) -> Self {
        self.history = actions;
        self
    }

    /// Set the action to test (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting effects (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let action = self.action.expect("Action must be set with when_action()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        for prior in self.history {
            let _ = self.reducer.reduce(&mut state, prior, &env);
        }

        let effects = self.reducer.reduce(&mut state, action, &env);

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use orderdesk_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if any effect would do something when executed.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one Future effect
    ///
    /// # Panics
    ///
    /// Panics if no Future effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "Expected at least one Future effect, but none found"
        );
    }

    /// Run every future effect to completion and collect the actions they produce
    ///
    /// Effects are awaited one after another in declaration order.
    pub async fn resolve_effects<A>(effects: impl IntoIterator<Item = Effect<A>>) -> Vec<A> {
        let mut actions = Vec::new();
        for effect in effects {
            if let Effect::Future(fut) = effect {
                actions.extend(fut.await);
            }
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_core::{SmallVec, smallvec};

    #[derive(Clone, Debug, Default, PartialEq)]
    struct TestState {
        loading: bool,
        rows: Vec<u32>,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Fetch,
        Loaded(Vec<u32>),
    }

    struct TestReducer;

    struct TestEnv;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Fetch => {
                    state.loading = true;
                    smallvec![Effect::Future(Box::pin(async {
                        Some(TestAction::Loaded(vec![1, 2]))
                    }))]
                },
                TestAction::Loaded(rows) => {
                    state.loading = false;
                    state.rows = rows;
                    SmallVec::new()
                },
            }
        }
    }

    #[test]
    fn given_actions_are_replayed_before_the_action_under_test() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState::default())
            .given_actions(vec![TestAction::Fetch])
            .when_action(TestAction::Loaded(vec![7]))
            .then_state(|state| {
                assert!(!state.loading);
                assert_eq!(state.rows, vec![7]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn effects_of_the_action_under_test_are_asserted() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState::default())
            .when_action(TestAction::Fetch)
            .then_state(|state| assert!(state.loading))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[tokio::test]
    async fn resolve_effects_keeps_declaration_order() {
        let effects = vec![
            Effect::Future(Box::pin(async { Some(TestAction::Fetch) })),
            Effect::None,
            Effect::Future(Box::pin(async { Some(TestAction::Loaded(vec![1])) })),
            Effect::Future(Box::pin(async { None })),
        ];

        let actions = assertions::resolve_effects(effects).await;

        assert_eq!(
            actions,
            vec![TestAction::Fetch, TestAction::Loaded(vec![1])]
        );
    }
}
