// crates/cityfinder-core/src/loader/binary.rs

//! Pre-compiled dataset: the city list encoded with bincode.
//!
//! Loading it skips JSON parsing entirely. Only the records are stored; the
//! prefix index is always rebuilt in memory.

use std::io::Read;
use std::path::Path;

use bincode::Options;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::common_io::{self, CompressionMode};
use crate::error::{CityError, Result};
use crate::model::City;

/// Bumped whenever [`City`]'s layout changes.
pub const FORMAT_VERSION: u16 = 1;

// 256MB decode limit against corrupt or hostile length prefixes
const SIZE_LIMIT: u64 = 256 * 1024 * 1024;

#[derive(Serialize, Deserialize)]
struct DatasetFile {
    version: u16,
    cities: Vec<City>,
}

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(SIZE_LIMIT)
        .allow_trailing_bytes()
}

pub fn read_cities<R: Read>(mut reader: R) -> Result<Vec<City>> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(CityError::from_decode_io)?;
    from_bytes(&data)
}

pub fn from_bytes(data: &[u8]) -> Result<Vec<City>> {
    let file: DatasetFile = options().deserialize(data)?;
    if file.version != FORMAT_VERSION {
        return Err(CityError::Parsing(format!(
            "unsupported dataset version {} (expected {FORMAT_VERSION})",
            file.version
        )));
    }
    Ok(file.cities)
}

pub fn to_bytes(cities: &[City]) -> Result<Vec<u8>> {
    // Vec<City> and &[City] share a wire format, so encode through a borrow.
    #[derive(Serialize)]
    struct DatasetRef<'a> {
        version: u16,
        cities: &'a [City],
    }

    let bytes = options().serialize(&DatasetRef {
        version: FORMAT_VERSION,
        cities,
    })?;
    Ok(bytes)
}

/// Write `cities` as a binary dataset at `out_path`.
pub fn write_dataset(out_path: &Path, cities: &[City], compression: CompressionMode) -> Result<()> {
    let bytes = to_bytes(cities)?;
    common_io::write_bytes(out_path, &bytes, compression)?;
    info!(
        path = %out_path.display(),
        cities = cities.len(),
        bytes = bytes.len(),
        ?compression,
        "binary dataset written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn decodes_what_it_encodes() {
        let cities = vec![
            City::new("Alexandria", "EG", 31.2, 29.9),
            City::new("Alexandria", "US", 38.8, -77.0),
        ];
        let bytes = to_bytes(&cities).unwrap();
        assert_eq!(from_bytes(&bytes).unwrap(), cities);
    }

    #[test]
    fn rejects_other_versions() {
        let bytes = options()
            .serialize(&DatasetFile {
                version: FORMAT_VERSION + 1,
                cities: Vec::new(),
            })
            .unwrap();
        assert_eq!(from_bytes(&bytes).unwrap_err().kind(), ErrorKind::Parsing);
    }

    #[test]
    fn garbage_is_a_parsing_failure() {
        let err = from_bytes(&[0xff; 3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parsing);
    }
}
