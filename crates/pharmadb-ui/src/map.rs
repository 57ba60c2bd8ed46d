//! The mapping capability the search page draws on.
//!
//! Controllers only see [`MapService`]; the concrete widget (or a text
//! rendering, or a test double) is injected.

use std::collections::HashMap;
use std::fmt;

use pharmadb_core::Coordinate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("geocoding is not configured")]
    GeocodingUnavailable,

    #[error("geocoding request failed: {0}")]
    Geocoding(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub title: String,
}

#[allow(async_fn_in_trait)]
pub trait MapService {
    /// Handle to one drawn map.
    type Map;

    fn create_map(&self, center: Coordinate, level: u8) -> Self::Map;

    fn create_marker(&self, map: &mut Self::Map, marker: Marker);

    /// Resolves free text to a position. `Ok(None)` means the address is
    /// unknown to the geocoder.
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, MapError>;
}

/// A drawn map as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMap {
    pub center: Coordinate,
    pub level: u8,
    pub markers: Vec<Marker>,
}

impl fmt::Display for RenderedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "map center: {} (level {})", self.center, self.level)?;
        for marker in &self.markers {
            writeln!(f, "  * {} @ {}", marker.title, marker.position)?;
        }
        Ok(())
    }
}

/// Map service that renders to [`RenderedMap`] values and geocodes from a
/// fixed table of known addresses.
#[derive(Debug, Default)]
pub struct TextMap {
    locations: HashMap<String, Coordinate>,
}

impl TextMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_location(mut self, address: &str, position: Coordinate) -> Self {
        self.locations.insert(address.trim().to_owned(), position);
        self
    }
}

impl MapService for TextMap {
    type Map = RenderedMap;

    fn create_map(&self, center: Coordinate, level: u8) -> RenderedMap {
        RenderedMap {
            center,
            level,
            markers: Vec::new(),
        }
    }

    fn create_marker(&self, map: &mut RenderedMap, marker: Marker) {
        map.markers.push(marker);
    }

    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, MapError> {
        Ok(self.locations.get(address.trim()).copied())
    }
}
