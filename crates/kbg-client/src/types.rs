//! Raw response envelopes of the ordering API.
//!
//! ## Observed shapes
//!
//! ### Identifiers
//! Records come straight out of MongoDB and carry `_id`. Some endpoints also
//! send a public `id`; product records in the catalog and in order lines
//! carry `producerproduct_id`, which is the id every other endpoint uses to
//! reference the product. Records are therefore kept as untyped objects here
//! and only deserialized into `kbg_core` types after [`crate::normalize`].
//!
//! ### Availability
//! `GET /available` returns `{"available": {...}, "globalorder": {...},
//! "globalorderlocales": [...]}` while an ordering window is configured, and
//! `{"message": "globalorder-not-found"}` with status 200 when none is. All
//! sections are modelled as optional.
//!
//! ### Orders
//! The paged listing returns `{"items": [...], "count": N}` where `count` is
//! the total across all pages. Each order carries its store as `locale` and
//! its lines as `items`. The detail endpoint wraps a single order under
//! `order` and adds a `producerproducts` side list with product names.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use kbg_core::JsonObject;

/// `POST /login`.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
}

/// `GET /locales`.
#[derive(Debug, Deserialize)]
pub(crate) struct LocalesResponse {
    pub locales: Vec<JsonObject>,
}

/// `GET /available?locale=`, read for the availability map only.
#[derive(Debug, Deserialize)]
pub(crate) struct AvailabilityResponse {
    /// Product id → stock indicator, usually a unit count.
    #[serde(default)]
    pub available: Option<HashMap<String, Value>>,
}

/// `GET /available?locale=`, read for the ordering-window sections only.
///
/// `available` is not modelled here so that an availability map the client
/// cannot type never affects the store status.
#[derive(Debug, Deserialize)]
pub(crate) struct StoreStatusResponse {
    #[serde(default)]
    pub globalorder: Option<GlobalOrder>,

    #[serde(default)]
    pub globalorderlocales: Option<Vec<GlobalOrderLocale>>,
}

/// The ordering window shared by all stores.
#[derive(Debug, Deserialize)]
pub(crate) struct GlobalOrder {
    /// `2` while customers can order.
    #[serde(default)]
    pub status: Option<i64>,
}

/// Per-store state of the current ordering window.
#[derive(Debug, Deserialize)]
pub(crate) struct GlobalOrderLocale {
    #[serde(default)]
    pub locale: Option<String>,

    /// Reasons the store stopped taking orders; empty while it still does.
    #[serde(default)]
    pub closed_tags: Option<Vec<String>>,
}

/// `GET /init?locale=`. Stores without promotions omit `promogroups`.
#[derive(Debug, Deserialize)]
pub(crate) struct InitResponse {
    #[serde(default)]
    pub products: Vec<JsonObject>,
    #[serde(default)]
    pub categories: Vec<JsonObject>,
    #[serde(default)]
    pub families: Vec<JsonObject>,
    #[serde(default)]
    pub producers: Vec<JsonObject>,
    #[serde(default)]
    pub promogroups: Vec<JsonObject>,
}

/// `GET /api/consumer`.
#[derive(Debug, Deserialize)]
pub(crate) struct ConsumerResponse {
    pub consumer: JsonObject,
}

/// `GET /api/orders/fetch-for-consumer?page=`.
#[derive(Debug, Deserialize)]
pub(crate) struct OrdersPageResponse {
    #[serde(default)]
    pub items: Option<Vec<JsonObject>>,
    /// Total number of orders across all pages. Next-page inference depends
    /// on it, so a page without it is an error.
    #[serde(default)]
    pub count: Option<u64>,
}

/// `GET /api/orders/fetch-detail?order_id=`.
#[derive(Debug, Deserialize)]
pub(crate) struct OrderDetailResponse {
    pub order: JsonObject,
}
