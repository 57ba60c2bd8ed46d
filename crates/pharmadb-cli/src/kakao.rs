//! Map capability for the terminal: text rendering plus geocoding through
//! the Kakao Local address search API.

use std::time::Duration;

use pharmadb_core::{AppConfig, Coordinate};
use pharmadb_ui::{MapError, MapService, Marker, RenderedMap, TextMap};
use reqwest::{Client, Url};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com";
const ADDRESS_SEARCH_PATH: &str = "v2/local/search/address.json";

#[derive(Debug, Deserialize)]
struct AddressSearchResponse {
    #[serde(default)]
    documents: Vec<AddressDocument>,
}

/// Kakao encodes coordinates as decimal strings: `x` is longitude, `y` latitude.
#[derive(Debug, Deserialize)]
struct AddressDocument {
    #[serde(default)]
    address_name: Option<String>,
    x: String,
    y: String,
}

pub struct KakaoGeocoder {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl KakaoGeocoder {
    /// # Errors
    ///
    /// Returns [`MapError::Geocoding`] if the HTTP client cannot be built or
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, MapError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(|e| MapError::Geocoding(e.to_string()))?;

        let joined = format!("{}/{ADDRESS_SEARCH_PATH}", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&joined)
            .map_err(|e| MapError::Geocoding(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    /// Resolves `address` to the first (most precise) match.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Geocoding`] on transport failure, a non-2xx status,
    /// or an unparseable body.
    pub async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, MapError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("query", address);

        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("KakaoAK {}", self.api_key),
            )
            .send()
            .await
            .map_err(|e| MapError::Geocoding(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapError::Geocoding(format!(
                "address search returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: AddressSearchResponse = response
            .json()
            .await
            .map_err(|e| MapError::Geocoding(e.to_string()))?;

        let Some(first) = body.documents.into_iter().next() else {
            return Ok(None);
        };
        let parse = |raw: &str, axis: &str| {
            raw.parse::<f64>()
                .map_err(|e| MapError::Geocoding(format!("invalid {axis} \"{raw}\": {e}")))
        };
        let position = Coordinate::new(
            parse(&first.y, "latitude")?,
            parse(&first.x, "longitude")?,
        );
        tracing::debug!(
            address,
            matched = first.address_name.as_deref().unwrap_or(""),
            %position,
            "address geocoded"
        );
        Ok(Some(position))
    }
}

/// Terminal map: draws [`RenderedMap`] values and geocodes through Kakao
/// when an API key is configured.
pub struct TerminalMap {
    text: TextMap,
    geocoder: Option<KakaoGeocoder>,
}

impl TerminalMap {
    /// # Errors
    ///
    /// Propagates geocoder construction failures.
    pub fn from_config(config: &AppConfig) -> Result<Self, MapError> {
        let geocoder = config
            .kakao_rest_api_key
            .as_deref()
            .map(|key| {
                KakaoGeocoder::with_base_url(
                    key,
                    config.request_timeout_secs,
                    &config.user_agent,
                    DEFAULT_BASE_URL,
                )
            })
            .transpose()?;
        Ok(Self {
            text: TextMap::new(),
            geocoder,
        })
    }
}

impl MapService for TerminalMap {
    type Map = RenderedMap;

    fn create_map(&self, center: Coordinate, level: u8) -> RenderedMap {
        self.text.create_map(center, level)
    }

    fn create_marker(&self, map: &mut RenderedMap, marker: Marker) {
        self.text.create_marker(map, marker);
    }

    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, MapError> {
        match &self.geocoder {
            Some(geocoder) => geocoder.geocode(address).await,
            None => Err(MapError::GeocodingUnavailable),
        }
    }
}
