//! Normalized store and catalog records.
//!
//! Every record keeps the fields this crate relies on as typed fields and
//! carries all other upstream attributes in `extra`. Catalog listings and
//! order lines expose different attribute sets for the same product, so the
//! typed fields are optional wherever one of those endpoints omits them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::{EntityId, JsonObject};

/// A physical pickup location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    /// Three-letter location code, e.g. `"BIC"`. This is the value every
    /// per-store endpoint expects.
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Ordering status of one store for the current ordering window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatus {
    /// `true` when the global order is open.
    pub is_active: bool,
    /// `true` when the store has at least one closed tag.
    pub is_full: bool,
    /// Opaque fullness causes, e.g. `"ORDERS"`, `"SEC"`, `"FRAIS"`.
    pub full_tags: Vec<String>,
}

/// A product, either from a catalog listing or as an order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    /// Display name. Catalog listings carry it; order summaries do not, and
    /// order details get it merged in from the order's product side list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_id: Option<EntityId>,
    /// Ordered amount. Only present on order lines. Kept as the JSON number
    /// the service sent: weighed produce is ordered in fractional units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Number>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Flat reference entity referenced by products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

pub type Category = Reference;
pub type Family = Reference;
pub type Producer = Reference;
pub type Promogroup = Reference;

/// Everything one store offers at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub families: Vec<Family>,
    pub producers: Vec<Producer>,
    pub promogroups: Vec<Promogroup>,
}

impl Offer {
    /// Reshapes every collection into a map keyed by record id.
    ///
    /// Upstream ids are unique per collection; if they are not, the last
    /// record with a given id wins.
    #[must_use]
    pub fn to_index(&self) -> OfferIndex {
        OfferIndex {
            products: index_by_id(&self.products, |p| &p.id),
            categories: index_by_id(&self.categories, |r| &r.id),
            families: index_by_id(&self.families, |r| &r.id),
            producers: index_by_id(&self.producers, |r| &r.id),
            promogroups: index_by_id(&self.promogroups, |r| &r.id),
        }
    }
}

/// An [`Offer`] with each collection keyed by record id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferIndex {
    pub products: HashMap<EntityId, Product>,
    pub categories: HashMap<EntityId, Category>,
    pub families: HashMap<EntityId, Family>,
    pub producers: HashMap<EntityId, Producer>,
    pub promogroups: HashMap<EntityId, Promogroup>,
}

fn index_by_id<T, F>(items: &[T], id: F) -> HashMap<EntityId, T>
where
    T: Clone,
    F: Fn(&T) -> &EntityId,
{
    items
        .iter()
        .map(|item| (id(item).clone(), item.clone()))
        .collect()
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
