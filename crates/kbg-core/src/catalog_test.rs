use serde_json::json;

use super::*;

fn reference(id: &str, name: Option<&str>) -> Reference {
    Reference {
        id: EntityId::from(id),
        name: name.map(str::to_owned),
        extra: JsonObject::new(),
    }
}

fn product(id: &str) -> Product {
    Product {
        id: EntityId::from(id),
        product_name: None,
        producer_id: None,
        family_id: None,
        quantity: None,
        extra: JsonObject::new(),
    }
}

#[test]
fn product_keeps_unknown_attributes_in_extra() {
    let raw = json!({
        "id": "p1",
        "product_name": "Pommes Gala",
        "unit": "kg",
        "price": 350
    });
    let parsed: Product = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(parsed.id, EntityId::from("p1"));
    assert_eq!(parsed.product_name.as_deref(), Some("Pommes Gala"));
    assert_eq!(parsed.extra.get("unit"), Some(&json!("kg")));
    assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
}

#[test]
fn product_without_optional_fields_serializes_only_id() {
    let parsed: Product = serde_json::from_value(json!({"id": 42})).unwrap();
    assert_eq!(serde_json::to_value(&parsed).unwrap(), json!({"id": 42}));
}

#[test]
fn product_requires_an_id() {
    let result = serde_json::from_value::<Product>(json!({"product_name": "x"}));
    assert!(result.is_err());
}

#[test]
fn store_requires_a_code() {
    let store: Store = serde_json::from_value(json!({"code": "BIC", "id": "s1"})).unwrap();
    assert_eq!(store.code, "BIC");
    assert_eq!(store.id, Some(EntityId::from("s1")));
    assert!(serde_json::from_value::<Store>(json!({"name": "Bichat"})).is_err());
}

#[test]
fn offer_index_keys_every_collection_by_id() {
    let offer = Offer {
        products: vec![product("p1"), product("p2")],
        categories: vec![reference("c1", None), reference("c2", None)],
        families: vec![reference("f1", None)],
        producers: vec![reference("P1", Some("A"))],
        promogroups: vec![],
    };

    let index = offer.to_index();

    assert_eq!(index.products.len(), 2);
    assert_eq!(index.products[&EntityId::from("p2")].id, EntityId::from("p2"));
    assert_eq!(index.categories.len(), 2);
    assert_eq!(index.families.len(), 1);
    assert_eq!(
        index.producers[&EntityId::from("P1")].name.as_deref(),
        Some("A")
    );
    assert!(index.promogroups.is_empty());
}

#[test]
fn offer_index_last_duplicate_wins() {
    let offer = Offer {
        producers: vec![reference("P1", Some("first")), reference("P1", Some("second"))],
        ..Offer::default()
    };
    let index = offer.to_index();
    assert_eq!(index.producers.len(), 1);
    assert_eq!(
        index.producers[&EntityId::from("P1")].name.as_deref(),
        Some("second")
    );
}

#[test]
fn store_status_default_is_inactive_and_not_full() {
    let status = StoreStatus::default();
    assert!(!status.is_active);
    assert!(!status.is_full);
    assert!(status.full_tags.is_empty());
}
