//! Orders slice: the canonical order list and the order open in the editor.
//!
//! Commands start a backend call through an effect; the completion action
//! the effect feeds back is the only thing that writes the list or the
//! selected order.

use crate::store::{AppEnvironment, LoadStatus};
use chrono::{DateTime, Utc};
use orderdesk_api::{
    CreateOrder, OrderDetail, OrderId, OrderStatus, OrderSummary, UpdateOrderItems,
    UpdateOrderStatus,
};
use orderdesk_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, service_call, smallvec};
use std::sync::Arc;

/// State owned by the orders slice
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrdersState {
    /// Summaries in server order
    pub list: Vec<OrderSummary>,
    /// Order open in the editor
    pub selected: Option<OrderDetail>,
    /// Order whose detail fetch is in flight
    pub requested: Option<OrderId>,
    /// Shared status of list and detail fetches
    pub status: LoadStatus,
    /// Last failure, cleared by the next success
    pub error: Option<String>,
    /// When the list was last replaced from the server
    pub synced_at: Option<DateTime<Utc>>,
}

impl OrdersState {
    /// All orders in list order
    #[must_use]
    pub fn all_orders(&self) -> &[OrderSummary] {
        &self.list
    }

    /// The order open in the editor
    #[must_use]
    pub const fn selected_order(&self) -> Option<&OrderDetail> {
        self.selected.as_ref()
    }

    /// Look up a summary by id
    #[must_use]
    pub fn find(&self, id: &OrderId) -> Option<&OrderSummary> {
        self.list.iter().find(|o| &o.id == id)
    }

    fn replace_summary(&mut self, summary: OrderSummary) {
        if let Some(slot) = self.list.iter_mut().find(|o| o.id == summary.id) {
            *slot = summary;
        }
    }
}

/// Orders slice actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrdersAction {
    // Commands
    /// Replace the list with the server's
    FetchOrders,
    /// Load one order into `selected`
    FetchOrderById {
        /// Order to load
        id: OrderId,
    },
    /// Create an order and append it to the list
    CreateOrder {
        /// Minimal create payload
        payload: CreateOrder,
    },
    /// Save edited items over an existing order
    UpdateOrder {
        /// Order to update
        id: OrderId,
        /// Minimal update payload
        payload: UpdateOrderItems,
    },
    /// Set an order's status
    ChangeOrderStatus {
        /// Order to update
        id: OrderId,
        /// Target status
        status: OrderStatus,
    },
    /// Move an order to the next status in its lifecycle
    AdvanceOrderStatus {
        /// Order to advance
        id: OrderId,
    },
    /// Delete an order
    DeleteOrder {
        /// Order to delete
        id: OrderId,
    },
    /// Forget the order open in the editor
    ClearSelectedOrder,

    // Completions
    /// List fetch succeeded
    OrdersLoaded {
        /// Server list
        orders: Vec<OrderSummary>,
    },
    /// List fetch failed
    OrdersLoadFailed {
        /// User-facing message
        error: String,
    },
    /// Detail fetch succeeded
    OrderLoaded {
        /// Loaded order
        order: OrderDetail,
    },
    /// Detail fetch failed
    OrderLoadFailed {
        /// Order that failed to load
        id: OrderId,
        /// User-facing message
        error: String,
    },
    /// Create succeeded
    OrderCreated {
        /// Created order
        order: OrderDetail,
    },
    /// Item or status update succeeded
    OrderUpdated {
        /// Updated order
        order: OrderDetail,
    },
    /// Delete succeeded
    OrderDeleted {
        /// Deleted order
        id: OrderId,
    },
    /// A create, update or delete failed
    OperationFailed {
        /// User-facing message
        error: String,
    },
}

/// Reducer for the orders slice
#[derive(Clone, Debug)]
pub struct OrdersReducer;

impl OrdersReducer {
    /// Creates a new `OrdersReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn change_status(
        env: &AppEnvironment,
        id: OrderId,
        status: OrderStatus,
    ) -> SmallVec<[Effect<OrdersAction>; 4]> {
        let api = Arc::clone(&env.orders);
        let error = format!("Failed to change status of order {id}");
        smallvec![service_call! {
            call: api.update_status(id, UpdateOrderStatus { status }),
            on_success: |order| OrdersAction::OrderUpdated { order },
            on_failure: || OrdersAction::OperationFailed { error }
        }]
    }
}

impl Default for OrdersReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for OrdersReducer {
    type State = OrdersState;
    type Action = OrdersAction;
    type Environment = AppEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            OrdersAction::FetchOrders => {
                state.status = LoadStatus::Loading;
                let api = Arc::clone(&env.orders);
                smallvec![service_call! {
                    call: api.list(),
                    on_success: |orders| OrdersAction::OrdersLoaded { orders },
                    on_failure: || OrdersAction::OrdersLoadFailed {
                        error: "Failed to load orders".to_string(),
                    }
                }]
            },

            OrdersAction::FetchOrderById { id } => {
                // Cleared up front so the editor never shows the previous order
                state.selected = None;
                state.requested = Some(id.clone());
                state.status = LoadStatus::Loading;
                let api = Arc::clone(&env.orders);
                let error = format!("Failed to load order {id}");
                let failed_id = id.clone();
                smallvec![service_call! {
                    call: api.get(id),
                    on_success: |order| OrdersAction::OrderLoaded { order },
                    on_failure: || OrdersAction::OrderLoadFailed { id: failed_id, error }
                }]
            },

            OrdersAction::CreateOrder { payload } => {
                let api = Arc::clone(&env.orders);
                let error = format!("Failed to create order {}", payload.order_number);
                smallvec![service_call! {
                    call: api.create(payload),
                    on_success: |order| OrdersAction::OrderCreated { order },
                    on_failure: || OrdersAction::OperationFailed { error }
                }]
            },

            OrdersAction::UpdateOrder { id, payload } => {
                let api = Arc::clone(&env.orders);
                let error = format!("Failed to update order {id}");
                smallvec![service_call! {
                    call: api.update_items(id, payload),
                    on_success: |order| OrdersAction::OrderUpdated { order },
                    on_failure: || OrdersAction::OperationFailed { error }
                }]
            },

            OrdersAction::ChangeOrderStatus { id, status } => Self::change_status(env, id, status),

            OrdersAction::AdvanceOrderStatus { id } => {
                let Some(current) = state.find(&id).map(|o| o.status) else {
                    state.error = Some(format!("Order {id} not found"));
                    return SmallVec::new();
                };

                match current.next() {
                    Ok(next) => Self::change_status(env, id, next),
                    Err(error) => {
                        tracing::warn!(order = %id, %error, "Refused status change");
                        state.error = Some(error.to_string());
                        SmallVec::new()
                    },
                }
            },

            OrdersAction::DeleteOrder { id } => {
                let api = Arc::clone(&env.orders);
                smallvec![async_effect! {
                    if api.delete(id.clone()).await {
                        Some(OrdersAction::OrderDeleted { id })
                    } else {
                        Some(OrdersAction::OperationFailed {
                            error: format!("Failed to delete order {id}"),
                        })
                    }
                }]
            },

            OrdersAction::ClearSelectedOrder => {
                state.selected = None;
                // An abandoned detail fetch must not leave the shared status loading
                if state.requested.take().is_some() && state.status == LoadStatus::Loading {
                    state.status = if state.synced_at.is_some() {
                        LoadStatus::Succeeded
                    } else {
                        LoadStatus::Idle
                    };
                }
                SmallVec::new()
            },

            // ========== Completions ==========
            OrdersAction::OrdersLoaded { orders } => {
                state.list = orders;
                state.status = LoadStatus::Succeeded;
                state.error = None;
                state.synced_at = Some(env.clock.now());
                SmallVec::new()
            },

            OrdersAction::OrdersLoadFailed { error } => {
                // The previous list stays available
                state.status = LoadStatus::Failed;
                state.error = Some(error);
                SmallVec::new()
            },

            OrdersAction::OrderLoaded { order } => {
                if state.requested.as_ref() != Some(order.id()) {
                    tracing::debug!(order = %order.id(), "Discarding stale order detail");
                    return SmallVec::new();
                }
                state.requested = None;
                state.selected = Some(order);
                state.status = LoadStatus::Succeeded;
                state.error = None;
                SmallVec::new()
            },

            OrdersAction::OrderLoadFailed { id, error } => {
                if state.requested.as_ref() != Some(&id) {
                    return SmallVec::new();
                }
                state.requested = None;
                state.status = LoadStatus::Failed;
                state.error = Some(error);
                SmallVec::new()
            },

            OrdersAction::OrderCreated { order } => {
                state.list.push(order.summary);
                state.error = None;
                SmallVec::new()
            },

            OrdersAction::OrderUpdated { order } => {
                if state.selected.as_ref().is_some_and(|s| s.id() == order.id()) {
                    state.selected = Some(order.clone());
                }
                state.replace_summary(order.summary);
                state.error = None;
                SmallVec::new()
            },

            OrdersAction::OrderDeleted { id } => {
                state.list.retain(|o| o.id != id);
                state.error = None;
                SmallVec::new()
            },

            OrdersAction::OperationFailed { error } => {
                state.error = Some(error);
                SmallVec::new()
            },
        }
    }
}
