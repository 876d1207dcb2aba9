//! Page-number pagination over the customer's order history.
//!
//! The orders endpoint takes a 1-based `page` and returns at most
//! [`ORDERS_PAGE_SIZE`] orders plus the total `count`. It does not say
//! whether another page exists, so the next page is inferred from how many
//! orders have been seen so far.

use std::collections::VecDeque;

use futures::Stream;

use kbg_core::Order;

use crate::error::KbgError;
use crate::session::Session;

/// Orders per page, fixed by the service.
pub const ORDERS_PAGE_SIZE: u64 = 10;

/// Maps non-positive page numbers to 1; the service rejects them.
#[must_use]
pub fn coerce_page(page: i64) -> i64 {
    page.max(1)
}

/// Returns the page after `page`, or `None` when the history is exhausted.
///
/// Exhausted means the page came back empty, or
/// `ORDERS_PAGE_SIZE * (page - 1) + fetched` has reached `total`. Only the
/// `total` of the latest response counts, so a total that changes between
/// calls is picked up.
#[must_use]
pub fn next_page_after(page: i64, fetched: usize, total: u64) -> Option<i64> {
    if fetched == 0 {
        return None;
    }

    let page = coerce_page(page);
    let earlier_pages = u64::try_from(page - 1).unwrap_or(0);
    let fetched = u64::try_from(fetched).unwrap_or(u64::MAX);
    let seen = ORDERS_PAGE_SIZE
        .saturating_mul(earlier_pages)
        .saturating_add(fetched);

    if seen >= total {
        None
    } else {
        page.checked_add(1)
    }
}

/// Lazy cursor over every order of a [`Session`].
///
/// Nothing is fetched until the first [`OrderHistory::try_next`]. Each
/// advance fetches at most one page, plus one detail request when the
/// cursor was created with `full`. Pages are never prefetched. The cursor
/// cannot be restarted; after the last order or after any error it only
/// yields `None`.
#[derive(Debug)]
pub struct OrderHistory<'a> {
    session: &'a Session,
    full: bool,
    next_page: Option<i64>,
    pending: VecDeque<Order>,
}

impl<'a> OrderHistory<'a> {
    pub(crate) fn new(session: &'a Session, full: bool) -> Self {
        Self {
            session,
            full,
            next_page: Some(1),
            pending: VecDeque::new(),
        }
    }

    /// Yields the next order, fetching the next page when the current one is
    /// used up.
    ///
    /// # Errors
    ///
    /// Propagates the page or detail fetch error. The cursor is exhausted
    /// afterwards.
    pub async fn try_next(&mut self) -> Result<Option<Order>, KbgError> {
        let result = self.advance().await;
        if result.is_err() {
            self.next_page = None;
            self.pending.clear();
        }
        result
    }

    /// Adapts the cursor into a stream with the same laziness.
    pub fn into_stream(self) -> impl Stream<Item = Result<Order, KbgError>> + 'a {
        futures::stream::try_unfold(self, |mut history| async move {
            let next = history.try_next().await?;
            Ok::<_, KbgError>(next.map(|order| (order, history)))
        })
    }

    async fn advance(&mut self) -> Result<Option<Order>, KbgError> {
        loop {
            if let Some(order) = self.pending.pop_front() {
                if !self.full {
                    return Ok(Some(order));
                }
                let detail = self.session.customer_order(&order.id.to_string()).await?;
                return Ok(Some(detail));
            }

            let Some(page) = self.next_page.take() else {
                return Ok(None);
            };

            let fetched = self.session.customer_orders(page).await?;
            tracing::debug!(
                page = fetched.page,
                orders = fetched.orders.len(),
                count = fetched.count,
                next_page = ?fetched.next_page,
                "fetched order history page"
            );
            self.next_page = fetched.next_page;
            self.pending.extend(fetched.orders);
        }
    }
}
