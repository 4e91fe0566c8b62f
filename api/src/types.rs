//! Resource types exchanged with the orders/products backend
//!
//! Field names travel as camelCase. Monetary amounts are held as integer
//! cents and travel as JSON decimal numbers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use thiserror::Error;

/// Monetary amount in cents
///
/// Decoded from decimal JSON numbers by rounding to the nearest cent, so
/// line totals and order totals are exact sums.
///
/// # Examples
///
/// ```
/// use orderdesk_api::types::Money;
///
/// let price = Money::from_cents(1050);
/// assert_eq!(price.times(3), Money::from_cents(3150));
/// assert_eq!(price.to_string(), "10.50");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Create from cents
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Get cents
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Create from a decimal amount, rounding to the nearest cent
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Prices are far below i64::MAX cents
    pub fn from_decimal(amount: f64) -> Self {
        Self((amount * 100.0).round() as i64)
    }

    /// Decimal representation used on the wire
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Exact for any realistic price
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Multiply by a quantity, saturating at the `i64` bounds
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as i64))
    }

    /// True when the amount is strictly positive
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::from_decimal)
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a server-assigned identifier
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Server-assigned order identifier
    OrderId
);

string_id!(
    /// Server-assigned product identifier
    ProductId
);

/// Order lifecycle status
///
/// Strictly forward: `Pending` → `InProgress` → `Completed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created, items still editable
    Pending,
    /// Being worked on
    InProgress,
    /// Terminal
    Completed,
}

/// Error returned when a status has no successor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatusError {
    /// The order is already in its terminal status
    #[error("order status {from} cannot be advanced")]
    InvalidTransition {
        /// Status the transition was attempted from
        from: OrderStatus,
    },
}

impl OrderStatus {
    /// Next status in the lifecycle
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::InvalidTransition`] for `Completed`.
    pub const fn next(self) -> Result<Self, StatusError> {
        match self {
            Self::Pending => Ok(Self::InProgress),
            Self::InProgress => Ok(Self::Completed),
            Self::Completed => Err(StatusError::InvalidTransition { from: self }),
        }
    }

    /// Wire name (`PENDING`, `IN_PROGRESS`, `COMPLETED`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sellable product
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server identity
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Current unit price
    pub unit_price: Money,
}

/// Denormalized order row used by the order list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Server identity
    pub id: OrderId,
    /// User-facing order number
    pub order_number: String,
    /// Order date as sent by the server
    pub date: String,
    /// Lifecycle status
    pub status: OrderStatus,
    /// Number of distinct line items
    pub product_count: u32,
    /// Sum of line totals
    pub final_price: Money,
}

/// A line of an order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product this line refers to
    pub product_id: ProductId,
    /// Product name at the time the line was added
    pub product_name: String,
    /// Units ordered
    pub quantity: u32,
    /// Unit price snapshotted when the line was added
    pub price_at_order: Money,
    /// `quantity * price_at_order`
    pub total_price: Money,
}

/// Full order record with its line items
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    /// Summary fields
    #[serde(flatten)]
    pub summary: OrderSummary,
    /// Line items
    pub items: Vec<OrderItem>,
}

impl OrderDetail {
    /// Order identity
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.summary.id
    }
}

impl From<OrderDetail> for OrderSummary {
    fn from(detail: OrderDetail) -> Self {
        detail.summary
    }
}

/// Line of a write payload: only identity and quantity are sent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Product to order
    pub product_id: ProductId,
    /// Units
    pub quantity: u32,
}

/// Body of `POST /orders`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    /// User-facing order number
    pub order_number: String,
    /// Lines to create
    pub items: Vec<OrderLine>,
}

/// Body of `PATCH /orders/data/{id}`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderItems {
    /// New order number, if changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    /// Replacement line set, if changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderLine>>,
}

/// Body of `PATCH /orders/status/{id}`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrderStatus {
    /// Target status
    pub status: OrderStatus,
}

/// Body of `POST /products`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    /// Display name
    pub name: String,
    /// Unit price
    pub unit_price: Money,
}

/// Body of `PATCH /products/{id}`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    /// New name, if changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New unit price, if changed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Money>,
}
