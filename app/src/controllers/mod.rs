//! Page controllers
//!
//! Each controller pairs the shared store with the local state of one
//! screen. Controllers only send actions and read state; after a mutation
//! the store already reflects the server's answer, so a screen re-reads
//! instead of reloading.

mod order_edit;
mod order_list;
mod product_list;

pub use order_edit::OrderEditController;
pub use order_list::OrderListController;
pub use product_list::{ProductForm, ProductFormError, ProductListController};

use crate::draft::DraftError;
use crate::rules::GuardViolation;
use orderdesk_api::{OrderId, ProductId};
use orderdesk_runtime::StoreError;
use thiserror::Error;

/// Follow-up a screen should present after a user request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Open the order editor
    Navigate {
        /// Order to edit
        id: OrderId,
    },
    /// Ask for confirmation before deleting
    ConfirmDelete {
        /// Title of the confirmation dialog
        title: &'static str,
        /// Body of the confirmation dialog
        message: &'static str,
    },
    /// Explain why the request was refused
    Notice {
        /// User-facing message
        message: String,
    },
}

/// Errors surfaced by controller operations
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The store refused the action
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The order's status forbids the request
    #[error(transparent)]
    Guard(#[from] GuardViolation),

    /// The draft cannot be saved
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// The product form is invalid
    #[error(transparent)]
    ProductForm(#[from] ProductFormError),

    /// The order is not in the list
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),

    /// The product is not in the catalog
    #[error("Product {0} not found")]
    ProductNotFound(ProductId),

    /// The backend call failed; carries the message recorded in the store
    #[error("{0}")]
    Rejected(String),
}

/// Case-insensitive containment; an empty term matches everything
fn matches_term(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(&term.to_lowercase())
}
