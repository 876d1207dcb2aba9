//! Store status derived from an availability response.

use kbg_core::StoreStatus;

use crate::types::StoreStatusResponse;

/// `globalorder.status` value while the ordering window is open.
pub const GLOBAL_ORDER_ACTIVE: i64 = 2;

/// Derives the status of `store_id` from one availability response.
///
/// Missing `globalorder` or `globalorderlocales` sections mean no ordering
/// window is configured; they produce an inactive, non-full status instead
/// of an error.
pub(crate) fn store_status(response: &StoreStatusResponse, store_id: &str) -> StoreStatus {
    let is_active = response
        .globalorder
        .as_ref()
        .and_then(|g| g.status)
        .is_some_and(|status| status == GLOBAL_ORDER_ACTIVE);

    let full_tags = response
        .globalorderlocales
        .iter()
        .flatten()
        .find(|l| l.locale.as_deref() == Some(store_id))
        .and_then(|l| l.closed_tags.clone())
        .unwrap_or_default();

    StoreStatus {
        is_active,
        is_full: !full_tags.is_empty(),
        full_tags,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: serde_json::Value) -> StoreStatusResponse {
        serde_json::from_value(value).expect("valid availability fixture")
    }

    #[test]
    fn active_and_full_store() {
        let response = parse(json!({
            "available": {},
            "globalorder": {"status": 2},
            "globalorderlocales": [{
                "_id": "abc",
                "id": "abc",
                "locale": "BIC",
                "closed_tags": ["FRAIS", "ORDERS"],
                "distributions": []
            }]
        }));
        assert_eq!(
            store_status(&response, "BIC"),
            StoreStatus {
                is_active: true,
                is_full: true,
                full_tags: vec!["FRAIS".to_owned(), "ORDERS".to_owned()],
            }
        );
    }

    #[test]
    fn not_found_payload_is_inactive_and_not_full() {
        let response = parse(json!({"message": "globalorder-not-found"}));
        assert_eq!(store_status(&response, "DEF"), StoreStatus::default());
    }

    #[test]
    fn other_global_order_status_is_inactive() {
        let response = parse(json!({"globalorder": {"status": 1}, "globalorderlocales": []}));
        assert!(!store_status(&response, "BIC").is_active);
    }

    #[test]
    fn store_with_empty_closed_tags_is_not_full() {
        let response = parse(json!({
            "globalorder": {"status": 2},
            "globalorderlocales": [{"locale": "BIC", "closed_tags": []}]
        }));
        let status = store_status(&response, "BIC");
        assert!(status.is_active);
        assert!(!status.is_full);
        assert!(status.full_tags.is_empty());
    }

    #[test]
    fn only_the_requested_store_is_considered() {
        let response = parse(json!({
            "globalorder": {"status": 2},
            "globalorderlocales": [
                {"locale": "ABC", "closed_tags": ["SEC"]},
                {"locale": "BIC", "closed_tags": null}
            ]
        }));
        assert!(!store_status(&response, "BIC").is_full);
        assert_eq!(store_status(&response, "ABC").full_tags, vec!["SEC".to_owned()]);
    }

    #[test]
    fn fractional_availability_does_not_affect_status() {
        let response = parse(json!({
            "available": {"p1": 1.5, "p2": "low"},
            "globalorder": {"status": 2},
            "globalorderlocales": [{"locale": "BIC", "closed_tags": ["SEC"]}]
        }));
        let status = store_status(&response, "BIC");
        assert!(status.is_active);
        assert_eq!(status.full_tags, vec!["SEC".to_owned()]);
    }

    #[test]
    fn null_sections_are_tolerated() {
        let response = parse(json!({"globalorder": null, "globalorderlocales": null}));
        assert_eq!(store_status(&response, "BIC"), StoreStatus::default());
    }
}
