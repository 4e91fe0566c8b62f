//! # Orderdesk Core
//!
//! Core traits and types for the Orderdesk client state architecture.
//!
//! The application keeps its orders and products in a single store. Every
//! change to that store goes through a reducer, and every call to the backend
//! is described as an effect that the runtime executes on the reducer's behalf.
//!
//! ## Core Concepts
//!
//! - **State**: Data owned by a slice (lists, selected record, load status)
//! - **Action**: All inputs to a reducer (user intents and service completions)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies (service clients, clock) via traits
//!
//! ## Example
//!
//! ```ignore
//! use orderdesk_core::*;
//!
//! impl Reducer for ProductsReducer {
//!     type State = ProductsState;
//!     type Action = ProductsAction;
//!     type Environment = ProductsEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut ProductsState,
//!         action: ProductsAction,
//!         env: &ProductsEnvironment,
//!     ) -> SmallVec<[Effect<ProductsAction>; 4]> {
//!         match action {
//!             ProductsAction::FetchProducts => {
//!                 state.status = LoadStatus::Loading;
//!                 let api = Arc::clone(&env.products);
//!                 smallvec![async_effect! {
//!                     Some(ProductsAction::from(api.list().await))
//!                 }]
//!             }
//!             // ...
//!         }
//!     }
//! }
//! ```

pub use smallvec::{SmallVec, smallvec};

/// Reducer composition utilities (scoping child slices into a parent store)
pub mod composition;

/// Declarative macros for building effects
pub mod effect_macros;

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all state transition logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The slice state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for OrdersReducer {
    ///     type State = OrdersState;
    ///     type Action = OrdersAction;
    ///     type Environment = OrdersEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut OrdersState,
    ///         action: OrdersAction,
    ///         env: &OrdersEnvironment,
    ///     ) -> SmallVec<[Effect<OrdersAction>; 4]> {
    ///         match action {
    ///             OrdersAction::ClearSelectedOrder => {
    ///                 state.selected = None;
    ///                 SmallVec::new()
    ///             }
    ///             _ => SmallVec::new(),
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

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Updates state in place
        /// 2. Returns effect descriptions to be executed
        ///
        /// # Returns
        ///
        /// The effects to be executed by the runtime. Most actions produce
        /// zero or one effect, hence the inline capacity of four.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Returns true if this effect does nothing when executed
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// Transform the actions this effect feeds back into the store
        ///
        /// Used when a child slice's effects run inside a parent store whose
        /// action type wraps the child's.
        #[must_use]
        pub fn map<B, F>(self, f: F) -> Effect<B>
        where
            Action: Send + 'static,
            B: Send + 'static,
            F: FnOnce(Action) -> B + Send + 'static,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Future(fut) => {
                    Effect::Future(Box::pin(async move { fut.await.map(f) }))
                },
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use orderdesk_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let _now = clock.now();
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

// Re-export the types every reducer module touches
pub use effect::Effect;
pub use reducer::Reducer;

#[cfg(test)]
mod tests {
    use super::effect::Effect;

    #[derive(Debug, Clone, PartialEq)]
    enum Child {
        Loaded(u32),
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Parent {
        Child(Child),
    }

    #[test]
    fn none_is_none() {
        assert!(Effect::<Child>::None.is_none());
    }

    #[test]
    fn future_is_not_none() {
        let effect: Effect<Child> = Effect::Future(Box::pin(async { None }));
        assert!(!effect.is_none());
    }

    #[tokio::test]
    async fn map_rewrites_future_output() {
        let effect: Effect<Child> = Effect::Future(Box::pin(async { Some(Child::Loaded(3)) }));

        let Effect::Future(fut) = effect.map(Parent::Child) else {
            panic!("mapped future should stay a future");
        };

        assert_eq!(fut.await, Some(Parent::Child(Child::Loaded(3))));
    }

    #[test]
    fn map_keeps_none() {
        assert!(Effect::<Child>::None.map(Parent::Child).is_none());
    }
}
