//! The seam between controllers and the remote pharmacy store.

use pharmadb_core::{NewPharmacy, PharmacyRecord, SearchResult};

use crate::error::StoreError;

/// Operations the remote store offers. Every call is a network round trip;
/// nothing is cached.
#[allow(async_fn_in_trait)]
pub trait PharmacyStore {
    /// Persists a new record and returns it with its store-assigned id.
    async fn create(&self, record: &NewPharmacy) -> Result<PharmacyRecord, StoreError>;

    /// All persisted records in store order.
    async fn list(&self) -> Result<Vec<PharmacyRecord>, StoreError>;

    /// Records whose stored distance is within `distance`.
    async fn nearby(&self, distance: f64) -> Result<Vec<PharmacyRecord>, StoreError>;

    /// Fails with [`StoreError::NotFound`] for an unknown id.
    async fn get_by_id(&self, id: i64) -> Result<PharmacyRecord, StoreError>;

    /// Not idempotent: deleting an id twice fails with [`StoreError::NotFound`].
    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;

    /// Geocodes `address` server-side, persists the nearby pharmacies and
    /// returns their display view.
    async fn search_and_persist(&self, address: &str) -> Result<Vec<SearchResult>, StoreError>;

    async fn health_check(&self) -> Result<String, StoreError>;
}
