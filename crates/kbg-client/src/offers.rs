//! Per-store cache of catalog offers.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::future::Future;

use kbg_core::Offer;

use crate::error::KbgError;
use crate::normalize::{decode_all, normalize_product, strip_internal_id};
use crate::types::InitResponse;

/// At most one [`Offer`] per store id, kept for the lifetime of the client.
///
/// Entries never expire; a forced [`OfferCache::get_or_fetch`] replaces an
/// entry wholesale.
#[derive(Debug, Default)]
pub(crate) struct OfferCache {
    entries: HashMap<String, Offer>,
}

impl OfferCache {
    pub(crate) fn get(&self, store_id: &str) -> Option<&Offer> {
        self.entries.get(store_id)
    }

    /// Returns the cached offer for `store_id`, calling `fetch` only when
    /// there is none or `force` is set. A fetched offer replaces the whole
    /// entry; a failed fetch leaves the cache untouched.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `fetch`.
    pub(crate) async fn get_or_fetch<F, Fut>(
        &mut self,
        store_id: &str,
        force: bool,
        fetch: F,
    ) -> Result<&Offer, KbgError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Offer, KbgError>>,
    {
        match self.entries.entry(store_id.to_owned()) {
            Entry::Occupied(entry) if !force => {
                tracing::debug!(store_id, "offer cache hit");
                Ok(entry.into_mut())
            }
            Entry::Occupied(mut entry) => {
                tracing::debug!(store_id, "forced offer refetch");
                entry.insert(fetch().await?);
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                tracing::debug!(store_id, "offer cache miss");
                Ok(entry.insert(fetch().await?))
            }
        }
    }
}

/// Normalizes a raw `/init` payload into an [`Offer`].
///
/// Products go through the product-id rule; categories, families,
/// producers and promogroups only through the internal-id rule.
///
/// # Errors
///
/// Returns [`KbgError::Deserialize`] if a record has no usable id after
/// normalization.
pub(crate) fn build_offer(raw: InitResponse, store_id: &str) -> Result<Offer, KbgError> {
    let context = |collection: &str| format!("{collection} of offer for store {store_id}");

    Ok(Offer {
        products: decode_all(raw.products, normalize_product, &context("products"))?,
        categories: decode_all(raw.categories, strip_internal_id, &context("categories"))?,
        families: decode_all(raw.families, strip_internal_id, &context("families"))?,
        producers: decode_all(raw.producers, strip_internal_id, &context("producers"))?,
        promogroups: decode_all(raw.promogroups, strip_internal_id, &context("promogroups"))?,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::block_on;
    use futures::future;
    use serde_json::json;

    use kbg_core::EntityId;

    use super::*;

    fn raw_offer(value: serde_json::Value) -> InitResponse {
        serde_json::from_value(value).expect("valid init fixture")
    }

    #[test]
    fn build_offer_normalizes_every_collection() {
        let raw = raw_offer(json!({
            "products": [
                {"producerproduct_id": "p1", "_id": "x"},
                {"producerproduct_id": "p2", "_id": "y"}
            ],
            "categories": [{"_id": "c1"}, {"id": "c2", "_id": "zz"}],
            "promogroups": [],
            "families": [{"id": "f1"}],
            "producers": [{"_id": "P1", "name": "A"}]
        }));

        let offer = build_offer(raw, "XYZ").unwrap();

        let product_ids: Vec<_> = offer.products.iter().map(|p| p.id.clone()).collect();
        assert_eq!(product_ids, [EntityId::from("p1"), EntityId::from("p2")]);
        assert!(offer.products.iter().all(|p| p.extra.is_empty()));
        assert_eq!(offer.categories[0].id, EntityId::from("c1"));
        assert_eq!(offer.categories[1].id, EntityId::from("c2"));
        assert!(offer.categories[1].extra.is_empty());
        assert_eq!(offer.producers[0].name.as_deref(), Some("A"));
        assert!(offer.promogroups.is_empty());
    }

    #[test]
    fn build_offer_defaults_missing_collections() {
        let offer = build_offer(raw_offer(json!({"products": []})), "XYZ").unwrap();
        assert_eq!(offer, Offer::default());
    }

    #[test]
    fn build_offer_fails_on_product_without_id() {
        let raw = raw_offer(json!({"products": [{"product_name": "nameless"}]}));
        let err = build_offer(raw, "XYZ").unwrap_err();
        assert!(
            matches!(err, KbgError::Deserialize { ref context, .. } if context.contains("store XYZ")),
            "expected Deserialize, got: {err:?}"
        );
    }

    fn family_offer(id: &str) -> Offer {
        Offer {
            families: vec![serde_json::from_value(json!({"id": id})).unwrap()],
            ..Offer::default()
        }
    }

    #[test]
    fn get_or_fetch_fetches_once_per_store() {
        let mut cache = OfferCache::default();
        let calls = Cell::new(0);
        let fetch = |id: &'static str| {
            let calls = &calls;
            move || {
                calls.set(calls.get() + 1);
                future::ready(Ok(family_offer(id)))
            }
        };

        block_on(cache.get_or_fetch("XYZ", false, fetch("f1"))).unwrap();
        let again = block_on(cache.get_or_fetch("XYZ", false, fetch("f2"))).unwrap();
        assert_eq!(again, &family_offer("f1"));
        assert_eq!(calls.get(), 1);

        block_on(cache.get_or_fetch("DEF", false, fetch("f3"))).unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.entries.len(), 2);
    }

    #[test]
    fn get_or_fetch_force_replaces_entry() {
        let mut cache = OfferCache::default();
        block_on(cache.get_or_fetch("XYZ", false, || future::ready(Ok(family_offer("f1"))))).unwrap();
        let forced =
            block_on(cache.get_or_fetch("XYZ", true, || future::ready(Ok(family_offer("f2"))))).unwrap();
        assert_eq!(forced, &family_offer("f2"));
        assert_eq!(cache.get("XYZ"), Some(&family_offer("f2")));
        assert_eq!(cache.entries.len(), 1);
    }

    #[test]
    fn get_or_fetch_error_keeps_previous_entry() {
        let mut cache = OfferCache::default();
        block_on(cache.get_or_fetch("XYZ", false, || future::ready(Ok(family_offer("f1"))))).unwrap();
        let result = block_on(cache.get_or_fetch("XYZ", true, || {
            future::ready(Err(KbgError::NotFound {
                url: "http://localhost/init".to_owned(),
            }))
        }));
        assert!(matches!(result, Err(KbgError::NotFound { .. })));
        assert_eq!(cache.get("XYZ"), Some(&family_offer("f1")));
    }
}
