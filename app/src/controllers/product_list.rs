//! Product list screen

use super::{ControllerError, Prompt, matches_term};
use crate::products::ProductsAction;
use crate::store::{AppAction, AppStore, LoadStatus};
use orderdesk_api::{CreateProduct, Money, Product, ProductId, UpdateProduct};
use orderdesk_runtime::StoreError;
use thiserror::Error;

/// Reasons a product form cannot be submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProductFormError {
    /// Name is blank
    #[error("Product name is required")]
    MissingName,

    /// Price is zero or negative
    #[error("Unit price must be greater than zero")]
    NonPositivePrice,
}

/// Values entered in the product dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    /// Product name
    pub name: String,
    /// Unit price
    pub unit_price: Money,
}

impl ProductForm {
    /// Form pre-filled from an existing product
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            unit_price: product.unit_price,
        }
    }

    /// Check the form and build a create payload
    ///
    /// # Errors
    ///
    /// Returns a [`ProductFormError`] for a blank name or non-positive price.
    pub fn validate(&self) -> Result<CreateProduct, ProductFormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProductFormError::MissingName);
        }
        if !self.unit_price.is_positive() {
            return Err(ProductFormError::NonPositivePrice);
        }
        Ok(CreateProduct {
            name: name.to_string(),
            unit_price: self.unit_price,
        })
    }
}

/// Controller for the product list
#[derive(Clone)]
pub struct ProductListController {
    store: AppStore,
}

impl ProductListController {
    /// Create a controller over the shared store
    #[must_use]
    pub const fn new(store: AppStore) -> Self {
        Self { store }
    }

    /// Load the catalog the first time the screen is shown
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn mount(&self) -> Result<(), StoreError> {
        if self.status().await == LoadStatus::Idle {
            self.store
                .send_and_settle(AppAction::Products(ProductsAction::FetchProducts))
                .await?;
        }
        Ok(())
    }

    /// Fetch status of the catalog
    pub async fn status(&self) -> LoadStatus {
        self.store.state(|s| s.products.status).await
    }

    /// Products whose name contains `search`, ignoring case
    pub async fn visible_products(&self, search: &str) -> Vec<Product> {
        let term = search.trim();
        self.store
            .state(|s| {
                s.products
                    .all_products()
                    .iter()
                    .filter(|p| matches_term(&p.name, term))
                    .cloned()
                    .collect()
            })
            .await
    }

    /// Create a product, or update `editing` when set
    ///
    /// # Errors
    ///
    /// - [`ControllerError::ProductForm`] if the form is invalid
    /// - [`ControllerError::Rejected`] if the backend call failed
    pub async fn save(&self, form: &ProductForm, editing: Option<&ProductId>) -> Result<(), ControllerError> {
        let payload = form.validate()?;

        let action = match editing {
            Some(id) => ProductsAction::UpdateProduct {
                id: id.clone(),
                payload: UpdateProduct {
                    name: Some(payload.name),
                    unit_price: Some(payload.unit_price),
                },
            },
            None => ProductsAction::AddProduct { payload },
        };

        self.store.send_and_settle(AppAction::Products(action)).await?;
        self.rejection().await
    }

    /// Confirmation shown before deleting `id`
    pub async fn request_delete(&self, id: &ProductId) -> Prompt {
        if self.store.state(|s| s.products.find(id).is_none()).await {
            return Prompt::Notice {
                message: ControllerError::ProductNotFound(id.clone()).to_string(),
            };
        }
        Prompt::ConfirmDelete {
            title: "Confirm product deletion",
            message: "Are you sure you want to delete this product? This action cannot be undone.",
        }
    }

    /// Delete a product after the user confirmed
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Rejected`] if the backend call failed.
    pub async fn delete(&self, id: &ProductId) -> Result<(), ControllerError> {
        self.store
            .send_and_settle(AppAction::Products(ProductsAction::DeleteProduct { id: id.clone() }))
            .await?;
        self.rejection().await
    }

    async fn rejection(&self) -> Result<(), ControllerError> {
        match self.store.state(|s| s.products.error.clone()).await {
            Some(message) => Err(ControllerError::Rejected(message)),
            None => Ok(()),
        }
    }
}
