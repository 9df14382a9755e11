// crates/cityfinder-core/src/model.rs

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::traits::NameMatch;

/// Raw coordinate pair as it comes from JSON.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct CoordRaw {
    pub lon: f64,
    pub lat: f64,
}

/// Raw city entry as it comes from the bundled JSON file:
///
/// ```json
/// {"country": "UA", "name": "Hurzuf", "_id": 707860, "coord": {"lon": 34.283333, "lat": 44.549999}}
/// ```
///
/// NOTE: This type mirrors the external dataset. Only [`City`] is used past
/// the loader.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CityRaw {
    pub country: String,
    pub name: String,
    #[serde(rename = "_id")]
    pub id: i64,
    pub coord: CoordRaw,
}

/// A city record. Never mutated once built.
///
/// Several records can share a `name` (there is more than one Springfield);
/// the index keeps all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    pub fn new(
        name: impl Into<String>,
        country_code: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            country_code: country_code.into(),
            latitude,
            longitude,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// `(latitude, longitude)`
    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

impl From<CityRaw> for City {
    fn from(raw: CityRaw) -> Self {
        City {
            name: raw.name,
            country_code: raw.country,
            latitude: raw.coord.lat,
            longitude: raw.coord.lon,
        }
    }
}

impl NameMatch for City {
    fn name_str(&self) -> &str {
        &self.name
    }
}

/// Case-insensitive ordering by name, then by country code.
///
/// This is the order the bundled dataset is delivered in. Nothing in the
/// crate applies it implicitly; results keep store order unless a caller
/// asks for this.
pub fn compare_name_then_country(a: &City, b: &City) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| {
            a.country_code
                .to_lowercase()
                .cmp(&b.country_code.to_lowercase())
        })
}

/// Stable sort by [`compare_name_then_country`].
pub fn sort_by_name_then_country(cities: &mut [City]) {
    cities.sort_by(compare_name_then_country);
}
