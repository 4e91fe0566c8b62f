//! Application store: both slices behind one reducer.

use crate::orders::{OrdersAction, OrdersReducer, OrdersState};
use crate::products::{ProductsAction, ProductsReducer, ProductsState};
use orderdesk_api::{ApiConfig, ApiError, HttpOrdersApi, HttpProductsApi, OrdersApi, ProductsApi, Transport};
use orderdesk_core::composition::{CombinedReducer, combine_reducers, scope_reducer};
use orderdesk_core::environment::{Clock, SystemClock};
use orderdesk_core::{SmallVec, effect::Effect, reducer::Reducer};
use orderdesk_runtime::Store;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Progress of a slice's list fetch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Last request succeeded
    Succeeded,
    /// Last request failed
    Failed,
}

/// Whole-application state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    /// Orders slice
    pub orders: OrdersState,
    /// Products slice
    pub products: ProductsState,
}

/// Whole-application actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAction {
    /// Routed to the orders slice
    Orders(OrdersAction),
    /// Routed to the products slice
    Products(ProductsAction),
}

impl From<OrdersAction> for AppAction {
    fn from(action: OrdersAction) -> Self {
        Self::Orders(action)
    }
}

impl From<ProductsAction> for AppAction {
    fn from(action: ProductsAction) -> Self {
        Self::Products(action)
    }
}

/// Services and clock shared by both slices
#[derive(Clone)]
pub struct AppEnvironment {
    /// Orders backend
    pub orders: Arc<dyn OrdersApi>,
    /// Products backend
    pub products: Arc<dyn ProductsApi>,
    /// Clock for sync timestamps and new-order dates
    pub clock: Arc<dyn Clock>,
}

impl AppEnvironment {
    /// Creates a new `AppEnvironment`
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersApi>, products: Arc<dyn ProductsApi>, clock: Arc<dyn Clock>) -> Self {
        Self {
            orders,
            products,
            clock,
        }
    }

    /// Environment talking to a real backend over HTTP
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn http(config: &ApiConfig) -> Result<Self, ApiError> {
        let transport = Transport::new(config)?;
        Ok(Self::new(
            Arc::new(HttpOrdersApi::new(transport.clone())),
            Arc::new(HttpProductsApi::new(transport)),
            Arc::new(SystemClock),
        ))
    }
}

impl std::fmt::Debug for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnvironment").finish_non_exhaustive()
    }
}

fn orders_state(state: &mut AppState) -> &mut OrdersState {
    &mut state.orders
}

fn products_state(state: &mut AppState) -> &mut ProductsState {
    &mut state.products
}

fn orders_action(action: AppAction) -> Option<OrdersAction> {
    match action {
        AppAction::Orders(action) => Some(action),
        AppAction::Products(_) => None,
    }
}

fn products_action(action: AppAction) -> Option<ProductsAction> {
    match action {
        AppAction::Products(action) => Some(action),
        AppAction::Orders(_) => None,
    }
}

/// Root reducer routing each action to its slice
pub struct AppReducer {
    inner: CombinedReducer<AppState, AppAction, AppEnvironment>,
}

impl AppReducer {
    /// Creates a new `AppReducer`
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: combine_reducers(vec![
                Box::new(scope_reducer(
                    OrdersReducer::new(),
                    orders_state,
                    orders_action,
                    AppAction::Orders,
                )),
                Box::new(scope_reducer(
                    ProductsReducer::new(),
                    products_state,
                    products_action,
                    AppAction::Products,
                )),
            ]),
        }
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.inner.reduce(state, action, env)
    }
}

/// The application store
pub type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

/// Build the store with empty slices
#[must_use]
pub fn new_store(environment: AppEnvironment) -> AppStore {
    Store::new(AppState::default(), AppReducer::new(), environment)
}

#[cfg(test)]
pub(crate) fn test_environment(backend: &orderdesk_testing::MockBackend) -> AppEnvironment {
    AppEnvironment::new(
        Arc::new(backend.clone()),
        Arc::new(backend.clone()),
        Arc::new(orderdesk_testing::test_clock()),
    )
}
