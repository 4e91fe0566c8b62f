//! Order list screen

use super::{ControllerError, Prompt, matches_term};
use crate::orders::OrdersAction;
use crate::rules;
use crate::store::{AppAction, AppStore, LoadStatus};
use orderdesk_api::{OrderId, OrderSummary};
use orderdesk_runtime::StoreError;

const DELETE_TITLE: &str = "Confirm deletion";
const DELETE_MESSAGE: &str =
    "Are you sure you want to delete this order? This action cannot be undone.";

/// Controller for the order list
#[derive(Clone)]
pub struct OrderListController {
    store: AppStore,
}

impl OrderListController {
    /// Create a controller over the shared store
    #[must_use]
    pub const fn new(store: AppStore) -> Self {
        Self { store }
    }

    /// Load the list the first time the screen is shown
    ///
    /// Later mounts reuse whatever the store already holds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn mount(&self) -> Result<(), StoreError> {
        if self.status().await == LoadStatus::Idle {
            self.store
                .send_and_settle(AppAction::Orders(OrdersAction::FetchOrders))
                .await?;
        }
        Ok(())
    }

    /// Shared fetch status of the orders slice
    pub async fn status(&self) -> LoadStatus {
        self.store.state(|s| s.orders.status).await
    }

    /// Last recorded failure
    pub async fn error(&self) -> Option<String> {
        self.store.state(|s| s.orders.error.clone()).await
    }

    /// Orders whose number or status contains `search`, ignoring case
    pub async fn visible_orders(&self, search: &str) -> Vec<OrderSummary> {
        let term = search.trim();
        self.store
            .state(|s| {
                s.orders
                    .all_orders()
                    .iter()
                    .filter(|o| {
                        matches_term(&o.order_number, term)
                            || matches_term(o.status.as_str(), term)
                            || matches_term(o.status.label(), term)
                    })
                    .cloned()
                    .collect()
            })
            .await
    }

    async fn find(&self, id: &OrderId) -> Option<OrderSummary> {
        self.store.state(|s| s.orders.find(id).cloned()).await
    }

    /// Decide whether the editor may open for `id`
    pub async fn request_edit(&self, id: &OrderId) -> Prompt {
        let Some(order) = self.find(id).await else {
            return Prompt::Notice {
                message: ControllerError::OrderNotFound(id.clone()).to_string(),
            };
        };

        match rules::check_edit(order.status) {
            Ok(()) => Prompt::Navigate { id: order.id },
            Err(violation) => Prompt::Notice {
                message: violation.to_string(),
            },
        }
    }

    /// Decide whether deleting `id` may be confirmed
    pub async fn request_delete(&self, id: &OrderId) -> Prompt {
        let Some(order) = self.find(id).await else {
            return Prompt::Notice {
                message: ControllerError::OrderNotFound(id.clone()).to_string(),
            };
        };

        match rules::check_delete(order.status) {
            Ok(()) => Prompt::ConfirmDelete {
                title: DELETE_TITLE,
                message: DELETE_MESSAGE,
            },
            Err(violation) => Prompt::Notice {
                message: violation.to_string(),
            },
        }
    }

    /// Delete `id` after the user confirmed
    ///
    /// The order leaves the list only once the backend confirms.
    ///
    /// # Errors
    ///
    /// - [`ControllerError::Guard`] if the order is in progress
    /// - [`ControllerError::Rejected`] if the backend call failed
    pub async fn confirm_delete(&self, id: &OrderId) -> Result<(), ControllerError> {
        let order = self
            .find(id)
            .await
            .ok_or_else(|| ControllerError::OrderNotFound(id.clone()))?;
        rules::check_delete(order.status)?;

        self.store
            .send_and_settle(AppAction::Orders(OrdersAction::DeleteOrder { id: id.clone() }))
            .await?;
        self.rejection().await
    }

    /// Move `id` to its next status
    ///
    /// # Errors
    ///
    /// - [`ControllerError::Guard`] if the order is completed
    /// - [`ControllerError::Rejected`] if the backend call failed
    pub async fn advance_status(&self, id: &OrderId) -> Result<(), ControllerError> {
        let order = self
            .find(id)
            .await
            .ok_or_else(|| ControllerError::OrderNotFound(id.clone()))?;
        rules::check_advance(order.status)?;

        self.store
            .send_and_settle(AppAction::Orders(OrdersAction::AdvanceOrderStatus { id: id.clone() }))
            .await?;
        self.rejection().await
    }

    async fn rejection(&self) -> Result<(), ControllerError> {
        match self.error().await {
            Some(message) => Err(ControllerError::Rejected(message)),
            None => Ok(()),
        }
    }
}
