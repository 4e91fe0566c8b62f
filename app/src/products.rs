//! Products slice: the product catalog.

use crate::store::{AppEnvironment, LoadStatus};
use chrono::{DateTime, Utc};
use orderdesk_api::{CreateProduct, Product, ProductId, UpdateProduct};
use orderdesk_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, service_call, smallvec};
use std::sync::Arc;

/// State owned by the products slice
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductsState {
    /// Products in server order
    pub items: Vec<Product>,
    /// Status of the list fetch
    pub status: LoadStatus,
    /// Last failure, cleared by the next success
    pub error: Option<String>,
    /// When the list was last replaced from the server
    pub synced_at: Option<DateTime<Utc>>,
}

impl ProductsState {
    /// All products in list order
    #[must_use]
    pub fn all_products(&self) -> &[Product] {
        &self.items
    }

    /// Look up a product by id
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.items.iter().find(|p| &p.id == id)
    }
}

/// Products slice actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductsAction {
    // Commands
    /// Replace the catalog with the server's
    FetchProducts,
    /// Create a product and append it
    AddProduct {
        /// Validated create payload
        payload: CreateProduct,
    },
    /// Update a product in place
    UpdateProduct {
        /// Product to update
        id: ProductId,
        /// Changed fields
        payload: UpdateProduct,
    },
    /// Delete a product
    DeleteProduct {
        /// Product to delete
        id: ProductId,
    },

    // Completions
    /// Catalog fetch succeeded
    ProductsLoaded {
        /// Server catalog
        products: Vec<Product>,
    },
    /// Catalog fetch failed
    ProductsLoadFailed {
        /// User-facing message
        error: String,
    },
    /// Create succeeded
    ProductAdded {
        /// Created product
        product: Product,
    },
    /// Update succeeded
    ProductUpdated {
        /// Updated product
        product: Product,
    },
    /// Delete succeeded
    ProductDeleted {
        /// Deleted product
        id: ProductId,
    },
    /// A create, update or delete failed
    OperationFailed {
        /// User-facing message
        error: String,
    },
}

/// Reducer for the products slice
#[derive(Clone, Debug)]
pub struct ProductsReducer;

impl ProductsReducer {
    /// Creates a new `ProductsReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ProductsReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for ProductsReducer {
    type State = ProductsState;
    type Action = ProductsAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ProductsAction::FetchProducts => {
                state.status = LoadStatus::Loading;
                let api = Arc::clone(&env.products);
                smallvec![service_call! {
                    call: api.list(),
                    on_success: |products| ProductsAction::ProductsLoaded { products },
                    on_failure: || ProductsAction::ProductsLoadFailed {
                        error: "Failed to load products".to_string(),
                    }
                }]
            },

            ProductsAction::AddProduct { payload } => {
                let api = Arc::clone(&env.products);
                let error = format!("Failed to create product {}", payload.name);
                smallvec![service_call! {
                    call: api.create(payload),
                    on_success: |product| ProductsAction::ProductAdded { product },
                    on_failure: || ProductsAction::OperationFailed { error }
                }]
            },

            ProductsAction::UpdateProduct { id, payload } => {
                let api = Arc::clone(&env.products);
                let error = format!("Failed to update product {id}");
                smallvec![service_call! {
                    call: api.update(id, payload),
                    on_success: |product| ProductsAction::ProductUpdated { product },
                    on_failure: || ProductsAction::OperationFailed { error }
                }]
            },

            ProductsAction::DeleteProduct { id } => {
                let api = Arc::clone(&env.products);
                smallvec![async_effect! {
                    if api.delete(id.clone()).await {
                        Some(ProductsAction::ProductDeleted { id })
                    } else {
                        Some(ProductsAction::OperationFailed {
                            error: format!("Failed to delete product {id}"),
                        })
                    }
                }]
            },

            ProductsAction::ProductsLoaded { products } => {
                state.items = products;
                state.status = LoadStatus::Succeeded;
                state.error = None;
                state.synced_at = Some(env.clock.now());
                SmallVec::new()
            },

            ProductsAction::ProductsLoadFailed { error } => {
                state.status = LoadStatus::Failed;
                state.error = Some(error);
                SmallVec::new()
            },

            ProductsAction::ProductAdded { product } => {
                state.items.push(product);
                state.error = None;
                SmallVec::new()
            },

            ProductsAction::ProductUpdated { product } => {
                if let Some(slot) = state.items.iter_mut().find(|p| p.id == product.id) {
                    *slot = product;
                }
                state.error = None;
                SmallVec::new()
            },

            ProductsAction::ProductDeleted { id } => {
                state.items.retain(|p| p.id != id);
                state.error = None;
                SmallVec::new()
            },

            ProductsAction::OperationFailed { error } => {
                state.error = Some(error);
                SmallVec::new()
            },
        }
    }
}
