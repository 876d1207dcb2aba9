//! Endpoints that work without logging in.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use kbg_core::{ClientConfig, Offer, OfferIndex, Store, StoreStatus};

use crate::client::{Transport, AVAILABLE_PATH, INIT_PATH, LOCALES_PATH};
use crate::error::KbgError;
use crate::normalize::{decode_all, strip_internal_id};
use crate::offers::{build_offer, OfferCache};
use crate::status;
use crate::types::{AvailabilityResponse, InitResponse, LocalesResponse, StoreStatusResponse};

/// Read-only access to stores, availability and catalog offers.
///
/// Offers are cached per store id for the lifetime of the client;
/// availability and status are always fetched fresh.
#[derive(Debug)]
pub struct AnonymousClient {
    transport: Transport,
    offers: OfferCache,
}

impl AnonymousClient {
    /// Creates a client without credentials.
    ///
    /// # Errors
    ///
    /// See [`Transport::new`].
    pub fn new(config: &ClientConfig) -> Result<Self, KbgError> {
        Ok(Self::from_transport(Transport::new(config)?))
    }

    pub(crate) fn from_transport(transport: Transport) -> Self {
        Self {
            transport,
            offers: OfferCache::default(),
        }
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }

    /// `true` when requests carry a bearer token, i.e. this client belongs to
    /// a [`crate::Session`].
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.transport.has_token()
    }

    /// Lists all pickup stores.
    ///
    /// # Errors
    ///
    /// Propagates transport errors; [`KbgError::Deserialize`] if a store has
    /// no `code`.
    pub async fn stores(&self) -> Result<Vec<Store>, KbgError> {
        let response: LocalesResponse = self.transport.get(LOCALES_PATH, &[]).await?;
        decode_all(response.locales, strip_internal_id, "stores")
    }

    /// Stock indicator per product id for `store_id` in the current ordering
    /// window, as the service sent it (usually a unit count). Never cached.
    ///
    /// # Errors
    ///
    /// Propagates transport errors, including the service's own error for an
    /// unknown store code. Returns [`KbgError::MissingField`] if the response
    /// has no `available` section.
    pub async fn store_availabilities(
        &self,
        store_id: &str,
    ) -> Result<HashMap<String, Value>, KbgError> {
        let response: AvailabilityResponse = self.fetch_availability(store_id).await?;
        response
            .available
            .ok_or_else(|| KbgError::MissingField {
                context: format!("availability of store {store_id}"),
                field: "available",
            })
    }

    /// Whether `store_id` is taking orders and, if not, why.
    ///
    /// A response without ordering-window sections yields an inactive,
    /// non-full status rather than an error.
    ///
    /// # Errors
    ///
    /// Propagates transport errors.
    pub async fn store_status(&self, store_id: &str) -> Result<StoreStatus, KbgError> {
        let response: StoreStatusResponse = self.fetch_availability(store_id).await?;
        Ok(status::store_status(&response, store_id))
    }

    /// The catalog offer of `store_id`.
    ///
    /// Served from the cache unless this is the first request for the store
    /// or `force` is set; a forced fetch replaces the cached entry.
    ///
    /// # Errors
    ///
    /// Propagates transport errors; [`KbgError::Deserialize`] if a record has
    /// no id after normalization. The cache is unchanged on error.
    pub async fn store_offer(&mut self, store_id: &str, force: bool) -> Result<&Offer, KbgError> {
        let transport = &self.transport;
        self.offers
            .get_or_fetch(store_id, force, || fetch_offer(transport, store_id))
            .await
    }

    /// Same as [`Self::store_offer`], with each collection keyed by id.
    ///
    /// # Errors
    ///
    /// See [`Self::store_offer`].
    pub async fn store_offer_index(
        &mut self,
        store_id: &str,
        force: bool,
    ) -> Result<OfferIndex, KbgError> {
        Ok(self.store_offer(store_id, force).await?.to_index())
    }

    /// The cached offer of `store_id`, without any network access.
    #[must_use]
    pub fn cached_offer(&self, store_id: &str) -> Option<&Offer> {
        self.offers.get(store_id)
    }

    async fn fetch_availability<T: DeserializeOwned>(&self, store_id: &str) -> Result<T, KbgError> {
        self.transport
            .get(AVAILABLE_PATH, &[("locale", store_id)])
            .await
    }
}

async fn fetch_offer(transport: &Transport, store_id: &str) -> Result<Offer, KbgError> {
    let raw: InitResponse = transport.get(INIT_PATH, &[("locale", store_id)]).await?;
    build_offer(raw, store_id)
}
