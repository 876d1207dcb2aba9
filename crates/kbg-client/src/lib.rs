pub mod anonymous;
pub mod client;
pub mod error;
pub mod normalize;
mod offers;
pub mod pagination;
pub mod session;
pub mod status;
mod types;

pub use anonymous::AnonymousClient;
pub use client::Transport;
pub use error::KbgError;
pub use kbg_core;
pub use kbg_core::{
    ClientConfig, Credentials, Customer, EntityId, Offer, OfferIndex, Order, OrdersPage, Product,
    Reference, Store, StoreStatus,
};
pub use pagination::OrderHistory;
pub use session::Session;
