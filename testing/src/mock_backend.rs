//! In-memory backend for store and controller tests
//!
//! [`MockBackend`] implements both service traits over shared in-memory
//! tables, records every request it receives, and can be told to fail.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only follows a panicking test

use orderdesk_api::{
    CreateOrder, CreateProduct, Money, OrderDetail, OrderId, OrderItem, OrderLine, OrderStatus,
    OrderSummary, OrdersApi, Product, ProductId, ProductsApi, ServiceFuture, UpdateOrderItems,
    UpdateOrderStatus, UpdateProduct,
};
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Date stamped on orders created through the mock
pub const MOCK_ORDER_DATE: &str = "2025-01-01T00:00:00Z";

/// A request received by [`MockBackend`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    /// `GET /orders`
    ListOrders,
    /// `GET /orders/{id}`
    GetOrder(OrderId),
    /// `POST /orders`
    CreateOrder(CreateOrder),
    /// `PATCH /orders/data/{id}`
    UpdateOrderItems(OrderId, UpdateOrderItems),
    /// `PATCH /orders/status/{id}`
    UpdateOrderStatus(OrderId, OrderStatus),
    /// `DELETE /orders/{id}`
    DeleteOrder(OrderId),
    /// `GET /products`
    ListProducts,
    /// `GET /products/{id}`
    GetProduct(ProductId),
    /// `POST /products`
    CreateProduct(CreateProduct),
    /// `PATCH /products/{id}`
    UpdateProduct(ProductId, UpdateProduct),
    /// `DELETE /products/{id}`
    DeleteProduct(ProductId),
}

/// Operations that can be made to fail
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// List orders
    ListOrders,
    /// Get one order
    GetOrder,
    /// Create an order
    CreateOrder,
    /// Update order items
    UpdateOrderItems,
    /// Update order status
    UpdateOrderStatus,
    /// Delete an order
    DeleteOrder,
    /// List products
    ListProducts,
    /// Get one product
    GetProduct,
    /// Create a product
    CreateProduct,
    /// Update a product
    UpdateProduct,
    /// Delete a product
    DeleteProduct,
}

#[derive(Debug, Default)]
struct Tables {
    orders: Vec<OrderDetail>,
    products: Vec<Product>,
    requests: Vec<Request>,
    failing: HashSet<Operation>,
    next_id: u64,
}

/// In-memory orders/products backend
///
/// Clones share the same tables, so a test can keep one handle for
/// inspection and give another to the store environment.
///
/// # Example
///
/// ```
/// use orderdesk_testing::MockBackend;
/// use orderdesk_api::{Money, OrdersApi};
///
/// # async fn example() {
/// let backend = MockBackend::new().with_product("p-1", "Widget", Money::from_cents(1050));
/// let orders = backend.list().await;
/// assert_eq!(orders, Some(vec![]));
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct MockBackend {
    tables: Arc<RwLock<Tables>>,
    latency: Option<Duration>,
}

impl MockBackend {
    /// Create an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response by `latency`
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Seed a product
    #[must_use]
    pub fn with_product(self, id: &str, name: &str, unit_price: Money) -> Self {
        self.tables.write().unwrap().products.push(Product {
            id: ProductId::new(id),
            name: name.to_string(),
            unit_price,
        });
        self
    }

    /// Seed an order with the given lines, priced from the seeded products
    #[must_use]
    pub fn with_order(self, id: &str, order_number: &str, status: OrderStatus, lines: &[(&str, u32)]) -> Self {
        {
            let mut tables = self.tables.write().unwrap();
            let lines: Vec<OrderLine> = lines
                .iter()
                .map(|(product_id, quantity)| OrderLine {
                    product_id: ProductId::new(*product_id),
                    quantity: *quantity,
                })
                .collect();
            let items = price_lines(&tables.products, &lines);
            let order = build_detail(OrderId::new(id), order_number.to_string(), status, items);
            tables.orders.push(order);
        }
        self
    }

    /// Make an operation fail until [`MockBackend::recover`] is called
    pub fn fail(&self, operation: Operation) {
        self.tables.write().unwrap().failing.insert(operation);
    }

    /// Make a failing operation succeed again
    pub fn recover(&self, operation: Operation) {
        self.tables.write().unwrap().failing.remove(&operation);
    }

    /// Every request received so far, in order
    #[must_use]
    pub fn requests(&self) -> Vec<Request> {
        self.tables.read().unwrap().requests.clone()
    }

    /// Forget recorded requests
    pub fn clear_requests(&self) {
        self.tables.write().unwrap().requests.clear();
    }

    /// Number of recorded requests matching `predicate`
    #[must_use]
    pub fn count_requests(&self, predicate: impl Fn(&Request) -> bool) -> usize {
        self.tables
            .read()
            .unwrap()
            .requests
            .iter()
            .filter(|r| predicate(r))
            .count()
    }

    /// Server-side copy of an order
    #[must_use]
    pub fn order(&self, id: &str) -> Option<OrderDetail> {
        self.tables
            .read()
            .unwrap()
            .orders
            .iter()
            .find(|o| o.id().as_str() == id)
            .cloned()
    }

    /// Server-side product table
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.tables.read().unwrap().products.clone()
    }

    /// Record the request and report whether the operation should fail
    fn begin(&self, request: Request, operation: Operation) -> bool {
        let mut tables = self.tables.write().unwrap();
        tables.requests.push(request);
        tables.failing.contains(&operation)
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut tables = self.tables.write().unwrap();
        tables.next_id += 1;
        format!("{prefix}-{}", tables.next_id)
    }
}

fn price_lines(products: &[Product], lines: &[OrderLine]) -> Vec<OrderItem> {
    lines
        .iter()
        .filter_map(|line| {
            let product = products.iter().find(|p| p.id == line.product_id)?;
            Some(OrderItem {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                quantity: line.quantity,
                price_at_order: product.unit_price,
                total_price: product.unit_price.times(line.quantity),
            })
        })
        .collect()
}

fn build_detail(id: OrderId, order_number: String, status: OrderStatus, items: Vec<OrderItem>) -> OrderDetail {
    let mut detail = OrderDetail {
        summary: OrderSummary {
            id,
            order_number,
            date: MOCK_ORDER_DATE.to_string(),
            status,
            product_count: 0,
            final_price: Money::ZERO,
        },
        items,
    };
    refresh_totals(&mut detail);
    detail
}

#[allow(clippy::cast_possible_truncation)] // Test orders have few lines
fn refresh_totals(detail: &mut OrderDetail) {
    detail.summary.product_count = detail.items.len() as u32;
    detail.summary.final_price = detail.items.iter().map(|i| i.total_price).sum();
}

impl OrdersApi for MockBackend {
    fn list(&self) -> ServiceFuture<'_, Option<Vec<OrderSummary>>> {
        Box::pin(async move {
            let failing = self.begin(Request::ListOrders, Operation::ListOrders);
            self.delay().await;
            if failing {
                return None;
            }
            let tables = self.tables.read().unwrap();
            Some(tables.orders.iter().map(|o| o.summary.clone()).collect())
        })
    }

    fn get(&self, id: OrderId) -> ServiceFuture<'_, Option<OrderDetail>> {
        Box::pin(async move {
            let failing = self.begin(Request::GetOrder(id.clone()), Operation::GetOrder);
            self.delay().await;
            if failing {
                return None;
            }
            let tables = self.tables.read().unwrap();
            tables.orders.iter().find(|o| o.id() == &id).cloned()
        })
    }

    fn create(&self, payload: CreateOrder) -> ServiceFuture<'_, Option<OrderDetail>> {
        Box::pin(async move {
            let failing = self.begin(Request::CreateOrder(payload.clone()), Operation::CreateOrder);
            self.delay().await;
            if failing {
                return None;
            }
            let id = OrderId::new(self.next_id("o"));
            let mut tables = self.tables.write().unwrap();
            let items = price_lines(&tables.products, &payload.items);
            let order = build_detail(id, payload.order_number, OrderStatus::Pending, items);
            tables.orders.push(order.clone());
            Some(order)
        })
    }

    fn update_items(
        &self,
        id: OrderId,
        payload: UpdateOrderItems,
    ) -> ServiceFuture<'_, Option<OrderDetail>> {
        Box::pin(async move {
            let failing = self.begin(
                Request::UpdateOrderItems(id.clone(), payload.clone()),
                Operation::UpdateOrderItems,
            );
            self.delay().await;
            if failing {
                return None;
            }
            let mut tables = self.tables.write().unwrap();
            let items = payload
                .items
                .as_ref()
                .map(|lines| price_lines(&tables.products, lines));
            let order = tables.orders.iter_mut().find(|o| o.id() == &id)?;
            if let Some(number) = payload.order_number {
                order.summary.order_number = number;
            }
            if let Some(items) = items {
                order.items = items;
            }
            refresh_totals(order);
            Some(order.clone())
        })
    }

    fn update_status(
        &self,
        id: OrderId,
        payload: UpdateOrderStatus,
    ) -> ServiceFuture<'_, Option<OrderDetail>> {
        Box::pin(async move {
            let failing = self.begin(
                Request::UpdateOrderStatus(id.clone(), payload.status),
                Operation::UpdateOrderStatus,
            );
            self.delay().await;
            if failing {
                return None;
            }
            let mut tables = self.tables.write().unwrap();
            let order = tables.orders.iter_mut().find(|o| o.id() == &id)?;
            order.summary.status = payload.status;
            Some(order.clone())
        })
    }

    fn delete(&self, id: OrderId) -> ServiceFuture<'_, bool> {
        Box::pin(async move {
            let failing = self.begin(Request::DeleteOrder(id.clone()), Operation::DeleteOrder);
            self.delay().await;
            if failing {
                return false;
            }
            let mut tables = self.tables.write().unwrap();
            let before = tables.orders.len();
            tables.orders.retain(|o| o.id() != &id);
            tables.orders.len() < before
        })
    }
}

impl ProductsApi for MockBackend {
    fn list(&self) -> ServiceFuture<'_, Option<Vec<Product>>> {
        Box::pin(async move {
            let failing = self.begin(Request::ListProducts, Operation::ListProducts);
            self.delay().await;
            if failing {
                return None;
            }
            Some(self.tables.read().unwrap().products.clone())
        })
    }

    fn get(&self, id: ProductId) -> ServiceFuture<'_, Option<Product>> {
        Box::pin(async move {
            let failing = self.begin(Request::GetProduct(id.clone()), Operation::GetProduct);
            self.delay().await;
            if failing {
                return None;
            }
            let tables = self.tables.read().unwrap();
            tables.products.iter().find(|p| p.id == id).cloned()
        })
    }

    fn create(&self, payload: CreateProduct) -> ServiceFuture<'_, Option<Product>> {
        Box::pin(async move {
            let failing = self.begin(Request::CreateProduct(payload.clone()), Operation::CreateProduct);
            self.delay().await;
            if failing {
                return None;
            }
            let product = Product {
                id: ProductId::new(self.next_id("p")),
                name: payload.name,
                unit_price: payload.unit_price,
            };
            self.tables.write().unwrap().products.push(product.clone());
            Some(product)
        })
    }

    fn update(&self, id: ProductId, payload: UpdateProduct) -> ServiceFuture<'_, Option<Product>> {
        Box::pin(async move {
            let failing = self.begin(
                Request::UpdateProduct(id.clone(), payload.clone()),
                Operation::UpdateProduct,
            );
            self.delay().await;
            if failing {
                return None;
            }
            let mut tables = self.tables.write().unwrap();
            let product = tables.products.iter_mut().find(|p| p.id == id)?;
            if let Some(name) = payload.name {
                product.name = name;
            }
            if let Some(unit_price) = payload.unit_price {
                product.unit_price = unit_price;
            }
            Some(product.clone())
        })
    }

    fn delete(&self, id: ProductId) -> ServiceFuture<'_, bool> {
        Box::pin(async move {
            let failing = self.begin(Request::DeleteProduct(id.clone()), Operation::DeleteProduct);
            self.delay().await;
            if failing {
                return false;
            }
            let mut tables = self.tables.write().unwrap();
            let before = tables.products.len();
            tables.products.retain(|p| p.id != id);
            tables.products.len() < before
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> MockBackend {
        MockBackend::new()
            .with_product("p-1", "Widget", Money::from_cents(1050))
            .with_product("p-2", "Gadget", Money::from_cents(300))
    }

    #[tokio::test]
    async fn created_orders_are_priced_from_products() {
        let backend = backend();

        let order = OrdersApi::create(
            &backend,
            CreateOrder {
                order_number: "A-1".to_string(),
                items: vec![
                    OrderLine {
                        product_id: ProductId::new("p-1"),
                        quantity: 2,
                    },
                    OrderLine {
                        product_id: ProductId::new("p-2"),
                        quantity: 1,
                    },
                ],
            },
        )
        .await
        .unwrap();

        assert_eq!(order.summary.status, OrderStatus::Pending);
        assert_eq!(order.summary.product_count, 2);
        assert_eq!(order.summary.final_price, Money::from_cents(2400));
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn failing_operations_collapse_and_are_still_recorded() {
        let backend = backend().with_order("o-1", "A-1", OrderStatus::Pending, &[("p-1", 1)]);
        backend.fail(Operation::DeleteOrder);

        assert!(!OrdersApi::delete(&backend, OrderId::new("o-1")).await);
        assert!(backend.order("o-1").is_some());

        backend.recover(Operation::DeleteOrder);
        assert!(OrdersApi::delete(&backend, OrderId::new("o-1")).await);
        assert!(backend.order("o-1").is_none());

        assert_eq!(
            backend.count_requests(|r| matches!(r, Request::DeleteOrder(_))),
            2
        );
    }

    #[tokio::test]
    async fn deleting_unknown_product_reports_false() {
        let backend = backend();
        assert!(!ProductsApi::delete(&backend, ProductId::new("nope")).await);
    }
}
