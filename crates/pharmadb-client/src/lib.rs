pub mod client;
pub mod error;
pub mod store;

pub use client::StoreClient;
pub use error::StoreError;
pub use store::PharmacyStore;
