// crates/cityfinder-core/src/loader/json.rs

use std::io::Read;

use crate::error::{CityError, Result};
use crate::model::{City, CityRaw};

/// Parse the source JSON array (`[{"country", "name", "_id", "coord"}, ...]`)
/// into cities, keeping file order.
pub fn read_cities<R: Read>(reader: R) -> Result<Vec<City>> {
    let raw: Vec<CityRaw> = serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            CityError::from_decode_io(e.into())
        } else {
            CityError::from(e)
        }
    })?;
    Ok(raw.into_iter().map(City::from).collect())
}
