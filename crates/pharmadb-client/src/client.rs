//! HTTP client for the pharmacy store REST API.
//!
//! Wraps `reqwest` with typed request/response handling for the
//! `/api/pharmacies` collection. A 404 surfaces as [`StoreError::NotFound`],
//! any other non-2xx as [`StoreError::UnexpectedStatus`], and body decoding
//! failures as [`StoreError::Deserialize`]. Nothing is retried.

use std::time::Duration;

use pharmadb_core::{AppConfig, NewPharmacy, PharmacyRecord, SearchResult};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::store::PharmacyStore;

const COLLECTION_PATH: &str = "api/pharmacies";

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    address: &'a str,
}

/// Client for the pharmacy store.
///
/// Use [`StoreClient::new`] with the loaded [`AppConfig`], or
/// [`StoreClient::with_base_url`] to point at a mock server in tests.
pub struct StoreClient {
    client: Client,
    endpoint: Url,
}

impl StoreClient {
    /// Creates a client for the backend named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`StoreError::InvalidBaseUrl`] if the configured URL
    /// does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, StoreError> {
        Self::with_base_url(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with an explicit backend base URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`StoreError::InvalidBaseUrl`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let joined = format!("{}/{COLLECTION_PATH}", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&joined).map_err(|e| StoreError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(StoreError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self { client, endpoint })
    }

    /// The collection endpoint every operation is relative to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn member_url(&self, segment: &str) -> String {
        format!("{}/{segment}", self.endpoint.as_str())
    }

    /// Sends the request and maps non-2xx statuses to typed errors.
    async fn send(request: RequestBuilder, url: &str) -> Result<Response, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(url, status = status.as_u16(), "store responded");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        response: Response,
        context: &str,
    ) -> Result<T, StoreError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

impl PharmacyStore for StoreClient {
    async fn create(&self, record: &NewPharmacy) -> Result<PharmacyRecord, StoreError> {
        let url = self.endpoint.as_str();
        tracing::debug!(name = %record.name, "creating pharmacy");
        let response = Self::send(self.client.post(url).json(record), url).await?;
        Self::decode(response, "create").await
    }

    async fn list(&self) -> Result<Vec<PharmacyRecord>, StoreError> {
        let url = self.endpoint.as_str();
        let response = Self::send(self.client.get(url), url).await?;
        Self::decode(response, "list").await
    }

    async fn nearby(&self, distance: f64) -> Result<Vec<PharmacyRecord>, StoreError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::InvalidBaseUrl {
                base_url: self.endpoint.to_string(),
                reason: "URL cannot carry a path".to_owned(),
            })?
            .push("nearby");
        url.query_pairs_mut()
            .append_pair("distance", &distance.to_string());

        let response = Self::send(self.client.get(url.clone()), url.as_str()).await?;
        Self::decode(response, &format!("nearby(distance={distance})")).await
    }

    async fn get_by_id(&self, id: i64) -> Result<PharmacyRecord, StoreError> {
        let url = self.member_url(&id.to_string());
        let response = Self::send(self.client.get(&url), &url).await?;
        Self::decode(response, &format!("get(id={id})")).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let url = self.member_url(&id.to_string());
        tracing::debug!(id, "deleting pharmacy");
        Self::send(self.client.delete(&url), &url).await?;
        Ok(())
    }

    async fn search_and_persist(&self, address: &str) -> Result<Vec<SearchResult>, StoreError> {
        let url = self.member_url("search");
        tracing::debug!(address, "searching nearby pharmacies");
        let request = self.client.post(&url).json(&SearchRequest { address });
        let response = Self::send(request, &url).await?;
        Self::decode(response, &format!("search(address={address})")).await
    }

    async fn health_check(&self) -> Result<String, StoreError> {
        let url = self.member_url("health");
        let response = Self::send(self.client.get(&url), &url).await?;
        Ok(response.text().await?)
    }
}
