//! Authenticated access: profile and order history.

use serde_json::json;

use kbg_core::{ClientConfig, Credentials, Customer, Order, OrdersPage};

use crate::anonymous::AnonymousClient;
use crate::client::{Transport, CONSUMER_PATH, LOGIN_PATH, ORDERS_PATH, ORDER_DETAIL_PATH};
use crate::error::KbgError;
use crate::normalize::{decode, decode_all, normalize_order, normalize_order_detail, strip_internal_id};
use crate::pagination::{coerce_page, next_page_after, OrderHistory};
use crate::types::{ConsumerResponse, LoginResponse, OrderDetailResponse, OrdersPageResponse};

/// A logged-in connection.
///
/// A `Session` only exists after a successful login; every request it
/// sends carries the bearer token. The anonymous endpoints are reachable
/// through [`Session::client`] and [`Session::client_mut`].
#[derive(Debug)]
pub struct Session {
    client: AnonymousClient,
}

impl Session {
    /// Logs in with `credentials` and returns the authenticated session.
    ///
    /// # Errors
    ///
    /// Any failure aborts construction:
    /// - transport errors from `POST /login`, including rejected credentials;
    /// - [`KbgError::Deserialize`] if the response carries no `token`;
    /// - [`KbgError::InvalidToken`] if the token is not a valid header value.
    pub async fn login(config: &ClientConfig, credentials: &Credentials) -> Result<Self, KbgError> {
        let transport = Transport::new(config)?;
        let body = json!({
            "email": credentials.email,
            "password": credentials.password,
        });
        let response: LoginResponse = transport.post(LOGIN_PATH, &body).await?;
        let transport = transport.with_token(&response.token)?;
        tracing::info!(api_url = transport.base_url(), "logged in");

        Ok(Self {
            client: AnonymousClient::from_transport(transport),
        })
    }

    /// Logs in with the credentials stored in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`KbgError::MissingCredentials`] if `config` has none, and
    /// otherwise the errors of [`Self::login`].
    pub async fn login_with_config(config: &ClientConfig) -> Result<Self, KbgError> {
        let credentials = config
            .credentials
            .as_ref()
            .ok_or(KbgError::MissingCredentials)?;
        Self::login(config, credentials).await
    }

    #[must_use]
    pub fn client(&self) -> &AnonymousClient {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut AnonymousClient {
        &mut self.client
    }

    /// Profile of the logged-in customer.
    ///
    /// # Errors
    ///
    /// Propagates transport errors.
    pub async fn customer_information(&self) -> Result<Customer, KbgError> {
        let response: ConsumerResponse = self.transport().get(CONSUMER_PATH, &[]).await?;
        decode(strip_internal_id(response.consumer), "customer information")
    }

    /// One page of order summaries. Pages are 1-based; `page <= 0` is
    /// fetched as page 1.
    ///
    /// # Errors
    ///
    /// Propagates transport errors; [`KbgError::MissingField`] if the page
    /// lacks `items` or `count`; [`KbgError::Deserialize`] if an order has
    /// no id.
    pub async fn customer_orders(&self, page: i64) -> Result<OrdersPage, KbgError> {
        let page = coerce_page(page);
        let page_param = page.to_string();
        let response: OrdersPageResponse = self
            .transport()
            .get(ORDERS_PATH, &[("page", page_param.as_str())])
            .await?;

        let missing = |field| KbgError::MissingField {
            context: format!("customer orders page {page}"),
            field,
        };
        let items = response.items.ok_or_else(|| missing("items"))?;
        let count = response.count.ok_or_else(|| missing("count"))?;

        let next_page = next_page_after(page, items.len(), count);
        let orders = decode_all(items, normalize_order, "customer orders")?;

        Ok(OrdersPage {
            orders,
            count,
            page,
            next_page,
        })
    }

    /// The whole order history as a lazy cursor starting at page 1.
    ///
    /// With `full`, every summary is replaced by its detail
    /// ([`Self::customer_order`]), one extra request per order.
    #[must_use]
    pub fn all_customer_orders(&self, full: bool) -> OrderHistory<'_> {
        OrderHistory::new(self, full)
    }

    /// One order with product details merged into its lines.
    ///
    /// # Errors
    ///
    /// Propagates transport errors, including the service's error for an
    /// unknown order id.
    pub async fn customer_order(&self, order_id: &str) -> Result<Order, KbgError> {
        let response: OrderDetailResponse = self
            .transport()
            .get(ORDER_DETAIL_PATH, &[("order_id", order_id)])
            .await?;
        decode(normalize_order_detail(response.order), "customer order")
    }

    fn transport(&self) -> &Transport {
        self.client.transport()
    }
}
