//! Normalized customer and order records.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::{EntityId, JsonObject, Product};

/// Profile of the logged-in customer.
///
/// Only `id` and `email` are typed; the service returns a loosely defined
/// profile and every other field is passed through in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// A customer order.
///
/// Summaries from the paged listing and details from the single-order
/// endpoint share this shape. Detail lines additionally carry
/// `product_name` and the other descriptive fields of the order's product
/// side list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: EntityId,
    /// Code of the pickup store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Order {
    /// Total ordered amount across all lines. Lines without a quantity
    /// count as zero.
    #[must_use]
    pub fn total_quantity(&self) -> f64 {
        self.products
            .iter()
            .filter_map(|p| p.quantity.as_ref())
            .filter_map(Number::as_f64)
            .sum()
    }
}

/// One page of the customer's order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdersPage {
    pub orders: Vec<Order>,
    /// Total number of orders as reported by the service.
    pub count: u64,
    /// The page that was actually fetched (after coercion to `>= 1`).
    pub page: i64,
    /// Page to fetch next, or `None` once the history is exhausted.
    pub next_page: Option<i64>,
}

impl OrdersPage {
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.next_page.is_none()
    }
}
