//! Resource services for orders and products
//!
//! Every operation resolves to the decoded resource (or `true` for deletes)
//! only when the envelope reports success with the operation's expected
//! status. Any other outcome is logged and collapsed to `None`/`false`.

use crate::client::Transport;
use crate::error::ApiError;
use crate::types::{
    CreateOrder, CreateProduct, OrderDetail, OrderId, OrderSummary, Product, ProductId,
    UpdateOrderItems, UpdateOrderStatus, UpdateProduct,
};
use reqwest::StatusCode;
use std::future::Future;
use std::pin::Pin;
use tracing::Instrument;

/// Boxed future returned by service operations
pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Orders resource
///
/// Dyn-compatible so the store environment can hold `Arc<dyn OrdersApi>`.
pub trait OrdersApi: Send + Sync {
    /// `GET /orders`
    fn list(&self) -> ServiceFuture<'_, Option<Vec<OrderSummary>>>;

    /// `GET /orders/{id}`
    fn get(&self, id: OrderId) -> ServiceFuture<'_, Option<OrderDetail>>;

    /// `POST /orders` (expects 201)
    fn create(&self, payload: CreateOrder) -> ServiceFuture<'_, Option<OrderDetail>>;

    /// `PATCH /orders/data/{id}`
    fn update_items(
        &self,
        id: OrderId,
        payload: UpdateOrderItems,
    ) -> ServiceFuture<'_, Option<OrderDetail>>;

    /// `PATCH /orders/status/{id}`
    fn update_status(
        &self,
        id: OrderId,
        payload: UpdateOrderStatus,
    ) -> ServiceFuture<'_, Option<OrderDetail>>;

    /// `DELETE /orders/{id}`
    fn delete(&self, id: OrderId) -> ServiceFuture<'_, bool>;
}

/// Products resource
pub trait ProductsApi: Send + Sync {
    /// `GET /products`
    fn list(&self) -> ServiceFuture<'_, Option<Vec<Product>>>;

    /// `GET /products/{id}`
    fn get(&self, id: ProductId) -> ServiceFuture<'_, Option<Product>>;

    /// `POST /products` (expects 201)
    fn create(&self, payload: CreateProduct) -> ServiceFuture<'_, Option<Product>>;

    /// `PATCH /products/{id}`
    fn update(&self, id: ProductId, payload: UpdateProduct) -> ServiceFuture<'_, Option<Product>>;

    /// `DELETE /products/{id}`
    fn delete(&self, id: ProductId) -> ServiceFuture<'_, bool>;
}

/// Log a failed call and drop the error
fn collapse<T>(operation: &'static str, result: Result<T, ApiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::error!(
                operation,
                status = ?error.status(),
                %error,
                "Service call failed"
            );
            None
        },
    }
}

/// [`OrdersApi`] over HTTP
#[derive(Clone, Debug)]
pub struct HttpOrdersApi {
    transport: Transport,
}

impl HttpOrdersApi {
    /// Create the service over a shared transport
    #[must_use]
    pub const fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

impl OrdersApi for HttpOrdersApi {
    fn list(&self) -> ServiceFuture<'_, Option<Vec<OrderSummary>>> {
        Box::pin(
            async move {
                let result = self
                    .transport
                    .get("/orders")
                    .await
                    .and_then(|env| env.into_data::<Vec<OrderSummary>>(StatusCode::OK));
                collapse("list orders", result)
            }
            .instrument(tracing::debug_span!("orders_api", operation = "list")),
        )
    }

    fn get(&self, id: OrderId) -> ServiceFuture<'_, Option<OrderDetail>> {
        Box::pin(
            async move {
                let result = self
                    .transport
                    .get(&format!("/orders/{id}"))
                    .await
                    .and_then(|env| env.into_data::<OrderDetail>(StatusCode::OK));
                collapse("get order", result)
            }
            .instrument(tracing::debug_span!("orders_api", operation = "get")),
        )
    }

    fn create(&self, payload: CreateOrder) -> ServiceFuture<'_, Option<OrderDetail>> {
        Box::pin(
            async move {
                let result = self
                    .transport
                    .post("/orders", &payload)
                    .await
                    .and_then(|env| env.into_data::<OrderDetail>(StatusCode::CREATED));
                collapse("create order", result)
            }
            .instrument(tracing::debug_span!("orders_api", operation = "create")),
        )
    }

    fn update_items(
        &self,
        id: OrderId,
        payload: UpdateOrderItems,
    ) -> ServiceFuture<'_, Option<OrderDetail>> {
        Box::pin(
            async move {
                let result = self
                    .transport
                    .patch(&format!("/orders/data/{id}"), &payload)
                    .await
                    .and_then(|env| env.into_data::<OrderDetail>(StatusCode::OK));
                collapse("update order", result)
            }
            .instrument(tracing::debug_span!("orders_api", operation = "update_items")),
        )
    }

    fn update_status(
        &self,
        id: OrderId,
        payload: UpdateOrderStatus,
    ) -> ServiceFuture<'_, Option<OrderDetail>> {
        Box::pin(
            async move {
                let result = self
                    .transport
                    .patch(&format!("/orders/status/{id}"), &payload)
                    .await
                    .and_then(|env| env.into_data::<OrderDetail>(StatusCode::OK));
                collapse("update order status", result)
            }
            .instrument(tracing::debug_span!("orders_api", operation = "update_status")),
        )
    }

    fn delete(&self, id: OrderId) -> ServiceFuture<'_, bool> {
        Box::pin(
            async move {
                let result = self
                    .transport
                    .delete(&format!("/orders/{id}"))
                    .await
                    .and_then(|env| env.ensure(StatusCode::OK));
                collapse("delete order", result).is_some()
            }
            .instrument(tracing::debug_span!("orders_api", operation = "delete")),
        )
    }
}

/// [`ProductsApi`] over HTTP
#[derive(Clone, Debug)]
pub struct HttpProductsApi {
    transport: Transport,
}

impl HttpProductsApi {
    /// Create the service over a shared transport
    #[must_use]
    pub const fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

impl ProductsApi for HttpProductsApi {
    fn list(&self) -> ServiceFuture<'_, Option<Vec<Product>>> {
        Box::pin(
            async move {
                let result = self
                    .transport
                    .get("/products")
                    .await
                    .and_then(|env| env.into_data::<Vec<Product>>(StatusCode::OK));
                collapse("list products", result)
            }
            .instrument(tracing::debug_span!("products_api", operation = "list")),
        )
    }

    fn get(&self, id: ProductId) -> ServiceFuture<'_, Option<Product>> {
        Box::pin(
            async move {
                let result = self
                    .transport
                    .get(&format!("/products/{id}"))
                    .await
                    .and_then(|env| env.into_data::<Product>(StatusCode::OK));
                collapse("get product", result)
            }
            .instrument(tracing::debug_span!("products_api", operation = "get")),
        )
    }

    fn create(&self, payload: CreateProduct) -> ServiceFuture<'_, Option<Product>> {
        Box::pin(
            async move {
                let result = self
                    .transport
                    .post("/products", &payload)
                    .await
                    .and_then(|env| env.into_data::<Product>(StatusCode::CREATED));
                collapse("create product", result)
            }
            .instrument(tracing::debug_span!("products_api", operation = "create")),
        )
    }

    fn update(&self, id: ProductId, payload: UpdateProduct) -> ServiceFuture<'_, Option<Product>> {
        Box::pin(
            async move {
                let result = self
                    .transport
                    .patch(&format!("/products/{id}"), &payload)
                    .await
                    .and_then(|env| env.into_data::<Product>(StatusCode::OK));
                collapse("update product", result)
            }
            .instrument(tracing::debug_span!("products_api", operation = "update")),
        )
    }

    fn delete(&self, id: ProductId) -> ServiceFuture<'_, bool> {
        Box::pin(
            async move {
                let result = self
                    .transport
                    .delete(&format!("/products/{id}"))
                    .await
                    .and_then(|env| env.ensure(StatusCode::OK));
                collapse("delete product", result).is_some()
            }
            .instrument(tracing::debug_span!("products_api", operation = "delete")),
        )
    }
}
