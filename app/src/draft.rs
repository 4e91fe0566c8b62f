//! Working copy of an order while it is being edited
//!
//! Line-item changes happen entirely client-side; nothing reaches the
//! backend until the draft is turned into a create or update payload.

use orderdesk_api::{
    CreateOrder, Money, OrderDetail, OrderItem, OrderLine, Product, ProductId, UpdateOrderItems,
};
use thiserror::Error;

/// Errors raised when a draft cannot be saved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// The order number is required
    #[error("Order number is required")]
    MissingOrderNumber,
}

/// Editable copy of an order's number and line items
///
/// Every line keeps `total_price == quantity * price_at_order`. The price is
/// snapshotted from the product when the line is first added and never
/// re-read, so later product price changes do not alter a draft.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderDraft {
    order_number: String,
    date: String,
    items: Vec<OrderItem>,
}

impl OrderDraft {
    /// Empty draft for a new order dated `date`
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            order_number: String::new(),
            date: date.into(),
            items: Vec::new(),
        }
    }

    /// Working copy of an existing order
    #[must_use]
    pub fn from_detail(detail: &OrderDetail) -> Self {
        Self {
            order_number: detail.summary.order_number.clone(),
            date: detail.summary.date.clone(),
            items: detail.items.clone(),
        }
    }

    /// Order number being edited
    #[must_use]
    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    /// Date shown alongside the draft
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Current line items
    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Replace the order number
    pub fn set_order_number(&mut self, order_number: impl Into<String>) {
        self.order_number = order_number.into();
    }

    /// Add `quantity` units of `product`
    ///
    /// An existing line for the product grows by `quantity` at its original
    /// price, capped at `u32::MAX`; otherwise a new line is appended at the
    /// product's current price. A zero quantity is ignored.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.quantity = item.quantity.saturating_add(quantity);
            item.total_price = item.price_at_order.times(item.quantity);
            return;
        }

        self.items.push(OrderItem {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            price_at_order: product.unit_price,
            total_price: product.unit_price.times(quantity),
        });
    }

    /// Set a line's quantity (at least 1) and recompute its total
    ///
    /// Unknown products are ignored.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|i| &i.product_id == product_id) {
            item.quantity = quantity.max(1);
            item.total_price = item.price_at_order.times(item.quantity);
        }
    }

    /// Drop the line for `product_id`
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.items.retain(|i| &i.product_id != product_id);
    }

    /// Number of distinct lines
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of line totals
    #[must_use]
    pub fn final_price(&self) -> Money {
        self.items.iter().map(|i| i.total_price).sum()
    }

    fn lines(&self) -> Vec<OrderLine> {
        self.items
            .iter()
            .map(|i| OrderLine {
                product_id: i.product_id.clone(),
                quantity: i.quantity,
            })
            .collect()
    }

    fn checked_number(&self) -> Result<String, DraftError> {
        let number = self.order_number.trim();
        if number.is_empty() {
            return Err(DraftError::MissingOrderNumber);
        }
        Ok(number.to_string())
    }

    /// Payload for creating this draft as a new order
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::MissingOrderNumber`] if the order number is blank.
    pub fn to_create(&self) -> Result<CreateOrder, DraftError> {
        Ok(CreateOrder {
            order_number: self.checked_number()?,
            items: self.lines(),
        })
    }

    /// Payload for saving this draft over an existing order
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::MissingOrderNumber`] if the order number is blank.
    pub fn to_update(&self) -> Result<UpdateOrderItems, DraftError> {
        Ok(UpdateOrderItems {
            order_number: Some(self.checked_number()?),
            items: Some(self.lines()),
        })
    }
}
