//! Order editor screen (create and edit)

use super::ControllerError;
use crate::draft::OrderDraft;
use crate::orders::OrdersAction;
use crate::products::ProductsAction;
use crate::store::{AppAction, AppStore, LoadStatus};
use orderdesk_api::{Money, OrderId, Product, ProductId};
use orderdesk_runtime::StoreError;

/// Controller for the order editor
///
/// Holds the working copy. In edit mode the copy is filled from the selected
/// order once it has loaded; nothing is sent until [`save`](Self::save).
pub struct OrderEditController {
    store: AppStore,
    order_id: Option<OrderId>,
    draft: OrderDraft,
    synced: bool,
}

impl OrderEditController {
    /// Open the editor, for a new order (`None`) or an existing one
    ///
    /// Loads the product catalog and, in edit mode, the order itself. A new
    /// draft is dated from the environment's clock.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn mount(store: AppStore, order_id: Option<OrderId>) -> Result<Self, StoreError> {
        let mut products = store
            .send(AppAction::Products(ProductsAction::FetchProducts))
            .await?;

        if let Some(id) = &order_id {
            let mut order = store
                .send(AppAction::Orders(OrdersAction::FetchOrderById { id: id.clone() }))
                .await?;
            order.wait().await;
        }
        products.wait().await;

        let today = store.environment().clock.now().format("%Y-%m-%d").to_string();
        let mut controller = Self {
            store,
            order_id,
            draft: OrderDraft::new(today),
            synced: false,
        };
        controller.sync_from_store().await;
        Ok(controller)
    }

    /// True when editing an existing order
    #[must_use]
    pub const fn is_edit_mode(&self) -> bool {
        self.order_id.is_some()
    }

    /// True while the order being edited is still loading
    pub async fn is_loading(&self) -> bool {
        self.is_edit_mode() && self.store.state(|s| s.orders.status).await == LoadStatus::Loading
    }

    /// Copy the selected order into the draft once it has arrived
    ///
    /// Only the first arrival is copied so local edits are never
    /// overwritten. Returns whether the draft now reflects the order.
    pub async fn sync_from_store(&mut self) -> bool {
        if self.synced {
            return true;
        }
        let Some(id) = &self.order_id else {
            return false;
        };

        let selected = self
            .store
            .state(|s| s.orders.selected_order().filter(|o| o.id() == id).cloned())
            .await;

        if let Some(detail) = selected {
            self.draft = OrderDraft::from_detail(&detail);
            self.synced = true;
        }
        self.synced
    }

    /// The working copy
    #[must_use]
    pub const fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Catalog offered by the add-product dialog
    pub async fn available_products(&self) -> Vec<Product> {
        self.store.state(|s| s.products.all_products().to_vec()).await
    }

    /// Replace the order number
    pub fn set_order_number(&mut self, order_number: &str) {
        self.draft.set_order_number(order_number);
    }

    /// Add `quantity` units of a catalog product
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::ProductNotFound`] if the product is not in the catalog.
    pub async fn add_item(&mut self, product_id: &ProductId, quantity: u32) -> Result<(), ControllerError> {
        let product = self
            .store
            .state(|s| s.products.find(product_id).cloned())
            .await
            .ok_or_else(|| ControllerError::ProductNotFound(product_id.clone()))?;

        self.draft.add_item(&product, quantity);
        Ok(())
    }

    /// Set a line's quantity
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        self.draft.update_quantity(product_id, quantity);
    }

    /// Drop a line
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.draft.remove_item(product_id);
    }

    /// Number of lines in the draft
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.draft.product_count()
    }

    /// Total of the draft
    #[must_use]
    pub fn final_price(&self) -> Money {
        self.draft.final_price()
    }

    /// Create or update the order, then refresh the list
    ///
    /// # Errors
    ///
    /// - [`ControllerError::Draft`] if the order number is missing
    /// - [`ControllerError::Rejected`] if the backend call failed
    pub async fn save(&self) -> Result<(), ControllerError> {
        let action = match &self.order_id {
            Some(id) => OrdersAction::UpdateOrder {
                id: id.clone(),
                payload: self.draft.to_update()?,
            },
            None => OrdersAction::CreateOrder {
                payload: self.draft.to_create()?,
            },
        };

        self.store.send_and_settle(AppAction::Orders(action)).await?;

        if let Some(message) = self.store.state(|s| s.orders.error.clone()).await {
            return Err(ControllerError::Rejected(message));
        }

        tracing::info!(order = ?self.order_id, "Order saved, refreshing list");
        self.store
            .send_and_settle(AppAction::Orders(OrdersAction::FetchOrders))
            .await?;
        Ok(())
    }

    /// Leave the editor, forgetting the selected order
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn unmount(self) -> Result<(), StoreError> {
        self.store
            .send(AppAction::Orders(OrdersAction::ClearSelectedOrder))
            .await?;
        Ok(())
    }
}
