//! # Orderdesk
//!
//! Client core for managing orders and products against a REST backend.
//!
//! State lives in a single [`AppStore`] split into an orders slice and a
//! products slice. Page controllers send actions and read state; each slice
//! writes its data only from the completion action of a backend call, so the
//! store always reflects what the server confirmed.
//!
//! ## Example
//!
//! ```no_run
//! use orderdesk::{AppConfig, AppEnvironment, OrderListController, new_store};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let store = new_store(AppEnvironment::http(&config.api_config()?)?);
//!
//!     let orders = OrderListController::new(store.clone());
//!     orders.mount().await?;
//!     for order in orders.visible_orders("pending").await {
//!         println!("{} {}", order.order_number, order.final_price);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod controllers;
pub mod draft;
pub mod orders;
pub mod products;
pub mod rules;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use controllers::{
    ControllerError, OrderEditController, OrderListController, ProductForm, ProductFormError,
    ProductListController, Prompt,
};
pub use draft::{DraftError, OrderDraft};
pub use orders::{OrdersAction, OrdersReducer, OrdersState};
pub use products::{ProductsAction, ProductsReducer, ProductsState};
pub use rules::GuardViolation;
pub use store::{AppAction, AppEnvironment, AppReducer, AppState, AppStore, LoadStatus, new_store};
