//! # Orderdesk API Client
//!
//! Client library for the orders/products REST backend: a transport that
//! unwraps the `{success, status, data}` envelope, the resource types, and
//! one service per resource.
//!
//! ## Example
//!
//! ```no_run
//! use orderdesk_api::{ApiConfig, HttpOrdersApi, OrdersApi, Transport};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::new("http://localhost:3000", Duration::from_secs(10))?;
//!     let orders = HttpOrdersApi::new(Transport::new(&config)?);
//!
//!     // Failures are logged and collapse to `None`
//!     if let Some(list) = orders.list().await {
//!         println!("{} orders", list.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod services;
pub mod types;

// Re-export main types for convenience
pub use client::{ApiConfig, DEFAULT_TIMEOUT, Envelope, Transport};
pub use error::ApiError;
pub use services::{HttpOrdersApi, HttpProductsApi, OrdersApi, ProductsApi, ServiceFuture};
pub use types::{
    CreateOrder, CreateProduct, Money, OrderDetail, OrderId, OrderItem, OrderLine, OrderStatus,
    OrderSummary, Product, ProductId, StatusError, UpdateOrderItems, UpdateOrderStatus,
    UpdateProduct,
};
