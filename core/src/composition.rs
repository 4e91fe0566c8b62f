//! Reducer composition utilities
//!
//! The application store is built from independent slices. This module
//! provides the glue:
//! - **`scope_reducer`**: Run a slice reducer against one field of a parent
//!   state, translating actions in both directions
//! - **`combine_reducers`**: Run several reducers over the same state/action
//!
//! # Examples
//!
//! ```
//! use orderdesk_core::{Effect, Reducer, SmallVec, smallvec};
//! use orderdesk_core::composition::{combine_reducers, scope_reducer};
//!
//! #[derive(Clone, Default)]
//! struct CounterState {
//!     count: i32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut CounterState, action: CounterAction, _env: &()) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! #[derive(Default)]
//! struct AppState {
//!     left: CounterState,
//!     right: CounterState,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum AppAction {
//!     Left(CounterAction),
//!     Right(CounterAction),
//! }
//!
//! fn left(s: &mut AppState) -> &mut CounterState { &mut s.left }
//! fn right(s: &mut AppState) -> &mut CounterState { &mut s.right }
//! fn only_left(a: AppAction) -> Option<CounterAction> {
//!     match a { AppAction::Left(a) => Some(a), AppAction::Right(_) => None }
//! }
//! fn only_right(a: AppAction) -> Option<CounterAction> {
//!     match a { AppAction::Right(a) => Some(a), AppAction::Left(_) => None }
//! }
//!
//! let app = combine_reducers(vec![
//!     Box::new(scope_reducer(CounterReducer, left, only_left, AppAction::Left)),
//!     Box::new(scope_reducer(CounterReducer, right, only_right, AppAction::Right)),
//! ]);
//!
//! let mut state = AppState::default();
//! app.reduce(&mut state, AppAction::Left(CounterAction::Increment), &());
//! assert_eq!(state.left.count, 1);
//! assert_eq!(state.right.count, 0);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence, and all effects are collected and concatenated.
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// Scopes a slice reducer to one field of a larger state.
///
/// - `focus` borrows the child state out of the parent
/// - `extract` picks the child's action out of a parent action (`None` means
///   the action belongs to another slice and is ignored)
/// - `embed` wraps the child's feedback actions back into the parent type
///
/// The child environment is the parent environment; slices that need less
/// simply ignore the rest.
pub fn scope_reducer<S, SubS, A, SubA, E, R>(
    reducer: R,
    focus: fn(&mut S) -> &mut SubS,
    extract: fn(A) -> Option<SubA>,
    embed: fn(SubA) -> A,
) -> ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    ScopedReducer {
        reducer,
        focus,
        extract,
        embed,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    reducer: R,
    focus: fn(&mut S) -> &mut SubS,
    extract: fn(A) -> Option<SubA>,
    embed: fn(SubA) -> A,
}

impl<S, SubS, A, SubA, E, R> Reducer for ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
    A: Send + 'static,
    SubA: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(child_action) = (self.extract)(action) else {
            return SmallVec::new();
        };

        let child_state = (self.focus)(state);
        let embed = self.embed;

        self.reducer
            .reduce(child_state, child_action, env)
            .into_iter()
            .map(|effect| effect.map(embed))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smallvec;

    #[derive(Clone, Default)]
    struct TestState {
        counter: i32,
        name: String,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        SetName(String),
    }

    struct CounterReducer;
    struct NameReducer;

    impl Reducer for CounterReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            if matches!(action, TestAction::Increment) {
                state.counter += 1;
            }
            smallvec![Effect::None]
        }
    }

    impl Reducer for NameReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            if let TestAction::SetName(name) = action {
                state.name = name;
            }
            smallvec![Effect::None]
        }
    }

    #[test]
    fn combined_reducers_all_see_the_action() {
        let combined = combine_reducers(vec![Box::new(CounterReducer), Box::new(NameReducer)]);

        let mut state = TestState::default();
        let effects = combined.reduce(&mut state, TestAction::Increment, &());
        assert_eq!(state.counter, 1);
        assert_eq!(effects.len(), 2);

        combined.reduce(&mut state, TestAction::SetName("orders".to_string()), &());
        assert_eq!(state.name, "orders");
        assert_eq!(state.counter, 1);
    }

    #[derive(Default)]
    struct ParentState {
        child: TestState,
    }

    #[derive(Clone, Debug)]
    enum ParentAction {
        Child(TestAction),
        Other,
    }

    fn focus_child(state: &mut ParentState) -> &mut TestState {
        &mut state.child
    }

    fn extract_child(action: ParentAction) -> Option<TestAction> {
        match action {
            ParentAction::Child(a) => Some(a),
            ParentAction::Other => None,
        }
    }

    #[test]
    fn scoped_reducer_focuses_child_state() {
        let scoped = scope_reducer(CounterReducer, focus_child, extract_child, ParentAction::Child);

        let mut state = ParentState::default();
        let effects = scoped.reduce(&mut state, ParentAction::Child(TestAction::Increment), &());
        assert_eq!(state.child.counter, 1);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn scoped_reducer_ignores_foreign_actions() {
        let scoped = scope_reducer(CounterReducer, focus_child, extract_child, ParentAction::Child);

        let mut state = ParentState::default();
        let effects = scoped.reduce(&mut state, ParentAction::Other, &());
        assert_eq!(state.child.counter, 0);
        assert!(effects.is_empty());
    }
}
