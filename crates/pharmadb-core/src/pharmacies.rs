//! Pharmacy records as the store persists them, and the transient search
//! results the store returns from its search-and-persist operation.
//!
//! The store speaks camelCase JSON. A [`PharmacyRecord`] always carries the
//! store-assigned `id`; a [`NewPharmacy`] never does, so the "identifier only
//! after creation" rule is enforced by the type split rather than by an
//! `Option`.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Zoom level used when the map is first drawn and after each search.
pub const DEFAULT_MAP_LEVEL: u8 = 5;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Checks that both components are finite and within the WGS84 range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CoordinateOutOfRange`] otherwise.
    pub fn validate(self) -> Result<Self, CoreError> {
        let lat_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let lng_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lng_ok {
            Ok(self)
        } else {
            Err(CoreError::CoordinateOutOfRange {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

impl Default for Coordinate {
    /// Seoul City Hall, the focal point before any search has completed.
    fn default() -> Self {
        Self::new(37.566_826, 126.978_656_7)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}",
            format_coordinate(self.latitude),
            format_coordinate(self.longitude)
        )
    }
}

/// A pharmacy as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PharmacyRecord {
    pub id: i64,
    pub name: String,
    pub distance: f64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<String>,
}

impl PharmacyRecord {
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Returns `true` when every field except the store-assigned `id`
    /// equals the submitted record.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn matches(&self, submitted: &NewPharmacy) -> bool {
        self.name == submitted.name
            && self.distance == submitted.distance
            && self.latitude == submitted.latitude
            && self.longitude == submitted.longitude
            && self.address == submitted.address
    }
}

/// A pharmacy that has not been stored yet. Serializes without an `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPharmacy {
    pub name: String,
    pub distance: f64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl NewPharmacy {
    /// Builds a validated record.
    ///
    /// # Errors
    ///
    /// - [`CoreError::EmptyName`] if `name` is blank.
    /// - [`CoreError::NegativeDistance`] if `distance` is negative or not finite.
    /// - [`CoreError::CoordinateOutOfRange`] for an impossible coordinate.
    pub fn new(
        name: &str,
        distance: f64,
        position: Coordinate,
        address: Option<String>,
    ) -> Result<Self, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::EmptyName);
        }
        if !distance.is_finite() || distance < 0.0 {
            return Err(CoreError::NegativeDistance(distance));
        }
        let position = position.validate()?;
        let address = address
            .map(|a| a.trim().to_owned())
            .filter(|a| !a.is_empty());

        Ok(Self {
            name: name.to_owned(),
            distance,
            latitude: position.latitude,
            longitude: position.longitude,
            address,
        })
    }
}

/// Display-oriented view of a nearby pharmacy, as returned by the store's
/// search-and-persist operation. Never persisted client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "pharmacyName")]
    pub name: String,
    #[serde(rename = "pharmacyAddress", default)]
    pub address: Option<String>,
    /// Human-readable distance with its unit, e.g. `"150.00 m"`.
    pub distance: String,
    #[serde(rename = "directionURL", default)]
    pub direction_url: Option<String>,
    #[serde(rename = "roadViewURL", default)]
    pub road_view_url: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl SearchResult {
    /// The result's position, if the store sent both components.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Converts this result into a record ready for the store's create
    /// operation. The numeric distance is the leading decimal of the
    /// distance text; the unit suffix is dropped.
    ///
    /// # Errors
    ///
    /// - [`CoreError::MissingCoordinates`] if either coordinate is absent.
    /// - [`CoreError::InvalidDistance`] if the distance text has no leading number.
    /// - Any validation error from [`NewPharmacy::new`].
    pub fn to_new_pharmacy(&self) -> Result<NewPharmacy, CoreError> {
        let position = self
            .coordinate()
            .ok_or_else(|| CoreError::MissingCoordinates {
                name: self.name.clone(),
            })?;
        let distance = parse_distance(&self.distance)?;
        NewPharmacy::new(&self.name, distance, position, self.address.clone())
    }
}

/// Extracts the leading decimal from a distance string such as `"150.00 m"`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDistance`] when the text does not start with
/// a number.
pub fn parse_distance(text: &str) -> Result<f64, CoreError> {
    let trimmed = text.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map_or(trimmed.len(), |(i, _)| i);

    trimmed[..end]
        .parse::<f64>()
        .map_err(|_| CoreError::InvalidDistance(text.to_owned()))
}

/// Formats a stored distance the way the record list shows it: `"150.00 m"`.
#[must_use]
pub fn format_distance(distance: f64) -> String {
    format!("{distance:.2} m")
}

/// Six decimal places, roughly 10 cm of precision.
#[must_use]
pub fn format_coordinate(value: f64) -> String {
    format!("{value:.6}")
}

#[cfg(test)]
#[path = "pharmacies_test.rs"]
mod tests;
