//! Field normalization from raw API objects to the public record shape.
//!
//! The service is inconsistent about naming: records carry Mongo's `_id`,
//! products are keyed by `producerproduct_id`, orders call their store
//! `locale` and their lines `items`. Every transform here takes an object by
//! value and returns the normalized object; nested lists are normalized
//! before the object that contains them. All transforms are idempotent.
//!
//! Normalization only renames and drops keys. Deserialization into the
//! typed `kbg_core` records happens afterwards via [`decode`].

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use kbg_core::{EntityId, JsonObject};

use crate::error::KbgError;

pub const PUBLIC_ID: &str = "id";
pub const INTERNAL_ID: &str = "_id";
pub const PRODUCT_ID: &str = "producerproduct_id";

const RAW_STORE: &str = "locale";
const STORE: &str = "store";
const RAW_LINES: &str = "items";
const LINES: &str = "products";
const PRODUCT_DETAILS: &str = "producerproducts";

/// Renames the internal `_id` to `id`.
///
/// When the object already has an `id`, the public field wins and `_id` is
/// dropped.
#[must_use]
pub fn strip_internal_id(mut object: JsonObject) -> JsonObject {
    rename_key(&mut object, INTERNAL_ID, PUBLIC_ID);
    object
}

/// Renames `producerproduct_id` to `id` unless an `id` already exists, in
/// which case `producerproduct_id` is dropped.
#[must_use]
pub fn promote_product_id(mut object: JsonObject) -> JsonObject {
    rename_key(&mut object, PRODUCT_ID, PUBLIC_ID);
    object
}

/// Normalizes a product-shaped object.
///
/// The product id is promoted before the internal id is handled, so a
/// product carrying both `producerproduct_id` and `_id` is identified by its
/// producer-product id.
#[must_use]
pub fn normalize_product(object: JsonObject) -> JsonObject {
    strip_internal_id(promote_product_id(object))
}

/// Normalizes an order summary: `locale` becomes `store`, `items` becomes
/// `products` with every line normalized as a product.
///
/// The result always has a `products` array, empty when the raw order had
/// no lines.
#[must_use]
pub fn normalize_order(object: JsonObject) -> JsonObject {
    let (order, lines) = split_order(object);
    assemble_order(order, lines)
}

/// Normalizes an order detail and merges the `producerproducts` side list
/// into its lines (see [`merge_product_details`]).
#[must_use]
pub fn normalize_order_detail(mut object: JsonObject) -> JsonObject {
    let details = object
        .remove(PRODUCT_DETAILS)
        .map(|v| object_list(v, PRODUCT_DETAILS))
        .unwrap_or_default();
    let (order, lines) = split_order(object);
    assemble_order(order, merge_product_details(lines, details))
}

/// Overlays descriptive product fields onto normalized order lines.
///
/// Side entries are keyed by their normalized `id`, which is consumed as the
/// join key and never copied onto a line. For each line, fields from the
/// matching entry are added; fields the line already has are kept. Lines
/// without a matching entry are returned unchanged.
#[must_use]
pub fn merge_product_details(lines: Vec<JsonObject>, details: Vec<JsonObject>) -> Vec<JsonObject> {
    let by_id: HashMap<EntityId, JsonObject> = details
        .into_iter()
        .filter_map(|detail| {
            let mut detail = strip_internal_id(detail);
            detail.remove(PRODUCT_ID);
            let Some(key) = detail.remove(PUBLIC_ID) else {
                tracing::warn!("product detail has no id; skipping");
                return None;
            };
            match EntityId::from_value(&key) {
                Some(id) => Some((id, detail)),
                None => {
                    tracing::warn!(id = %key, "product detail has an unusable id; skipping");
                    None
                }
            }
        })
        .collect();

    lines
        .into_iter()
        .map(|mut line| {
            let Some(id) = line.get(PUBLIC_ID).and_then(EntityId::from_value) else {
                tracing::warn!("order line has no usable id; leaving it unmerged");
                return line;
            };
            match by_id.get(&id) {
                Some(detail) => {
                    for (key, value) in detail {
                        line.entry(key.clone()).or_insert_with(|| value.clone());
                    }
                }
                None => {
                    tracing::warn!(product_id = %id, "no product details for order line; leaving it unmerged");
                }
            }
            line
        })
        .collect()
}

/// Deserializes a normalized object into its typed record.
///
/// # Errors
///
/// Returns [`KbgError::Deserialize`] if the object does not have the
/// record's required fields, e.g. a product without any id.
pub(crate) fn decode<T: DeserializeOwned>(object: JsonObject, context: &str) -> Result<T, KbgError> {
    serde_json::from_value(Value::Object(object)).map_err(|e| KbgError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

/// Normalizes every object with `normalize` and decodes it.
///
/// # Errors
///
/// Returns the first [`KbgError::Deserialize`] encountered.
pub(crate) fn decode_all<T, F>(
    objects: Vec<JsonObject>,
    normalize: F,
    context: &str,
) -> Result<Vec<T>, KbgError>
where
    T: DeserializeOwned,
    F: Fn(JsonObject) -> JsonObject,
{
    objects
        .into_iter()
        .map(|object| decode(normalize(object), context))
        .collect()
}

/// Moves the value at `from` to `to` unless `to` is already set; `from` is
/// removed either way.
fn rename_key(object: &mut JsonObject, from: &str, to: &str) {
    if let Some(value) = object.remove(from) {
        if !object.contains_key(to) {
            object.insert(to.to_owned(), value);
        }
    }
}

/// Separates an order from its lines, normalizing both. An existing
/// `products` list wins over a raw `items` list.
fn split_order(mut object: JsonObject) -> (JsonObject, Vec<JsonObject>) {
    let raw_lines = object.remove(RAW_LINES);
    let lines = object
        .remove(LINES)
        .or(raw_lines)
        .map(|v| object_list(v, LINES))
        .unwrap_or_default()
        .into_iter()
        .map(normalize_product)
        .collect();

    let mut order = strip_internal_id(object);
    rename_key(&mut order, RAW_STORE, STORE);
    (order, lines)
}

fn assemble_order(mut order: JsonObject, lines: Vec<JsonObject>) -> JsonObject {
    let lines = lines.into_iter().map(Value::Object).collect();
    order.insert(LINES.to_owned(), Value::Array(lines));
    order
}

/// Extracts the objects of a JSON list. Non-object entries are dropped.
fn object_list(value: Value, field: &str) -> Vec<JsonObject> {
    match value {
        Value::Array(values) => values
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(object) => Some(object),
                other => {
                    tracing::warn!(field, value = %other, "dropping non-object list entry");
                    None
                }
            })
            .collect(),
        Value::Null => Vec::new(),
        other => {
            tracing::warn!(field, value = %other, "expected a list; ignoring field");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
