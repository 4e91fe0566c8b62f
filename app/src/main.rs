//! Orderdesk demo
//!
//! Connects to the configured backend, loads both screens and prints what a
//! user would see on the order and product lists.
//!
//! Run with: `ORDERDESK_API_BACKEND=http://localhost:3000 cargo run -p orderdesk`

use anyhow::Context;
use orderdesk::{AppConfig, AppEnvironment, OrderListController, ProductListController, Prompt, new_store};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Orderdesk ===");
    println!("Backend: {}\n", config.api_backend);

    let environment = AppEnvironment::http(&config.api_config()?).context("failed to build HTTP client")?;
    let store = new_store(environment);

    let products = ProductListController::new(store.clone());
    products.mount().await?;
    println!("Products:");
    for product in products.visible_products("").await {
        println!("  {:<30} {:>10}", product.name, product.unit_price);
    }

    let orders = OrderListController::new(store.clone());
    orders.mount().await?;
    if let Some(error) = orders.error().await {
        println!("\n{error}");
    }

    println!("\nOrders:");
    for order in orders.visible_orders("").await {
        let editable = match orders.request_edit(&order.id).await {
            Prompt::Navigate { .. } => "editable",
            _ => "locked",
        };
        println!(
            "  {:<12} {:<12} {:<12} {:>3} items {:>10}  ({editable})",
            order.order_number,
            order.date,
            order.status.label(),
            order.product_count,
            order.final_price,
        );
    }

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
