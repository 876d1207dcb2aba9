pub mod catalog;
pub mod client_config;
pub mod config;
pub mod entity_id;
pub mod orders;

pub use catalog::{
    Category, Family, Offer, OfferIndex, Producer, Product, Promogroup, Reference, Store,
    StoreStatus,
};
pub use client_config::{ClientConfig, Credentials};
pub use config::{load_client_config, load_client_config_from_env};
pub use entity_id::EntityId;
pub use orders::{Customer, Order, OrdersPage};

use thiserror::Error;

/// Untyped JSON object, the shape every upstream record arrives in.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
