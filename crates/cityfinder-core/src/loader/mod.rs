// crates/cityfinder-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (I/O, decompression) and delegates to the
//! format parsers (JSON source file vs pre-compiled binary). Whatever comes
//! out of here is a plain, validated `Vec<City>`; the repository never sees
//! raw JSON.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::error::Result;
use crate::model::City;

pub mod binary;
pub mod common_io;
pub mod json;

pub use binary::write_dataset;
pub use common_io::CompressionMode;

pub const DEFAULT_DATASET_FILENAME: &str = "cities_sorted.json";

/// Directory holding the bundled dataset.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Path of the bundled dataset.
pub fn default_dataset_path() -> PathBuf {
    default_data_dir().join(DEFAULT_DATASET_FILENAME)
}

/// Produces the full record sequence for the repository.
///
/// Called at most once per successful initialization, and again only after
/// a failure. Implementations report a missing source as
/// [`CityError::Loading`](crate::CityError::Loading) and undecodable content
/// as [`CityError::Parsing`](crate::CityError::Parsing).
pub trait CitySource: Send + Sync {
    fn load_records(&self) -> Result<Vec<City>>;

    /// Human-readable identifier for logs.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

impl<F> CitySource for F
where
    F: Fn() -> Result<Vec<City>> + Send + Sync,
{
    fn load_records(&self) -> Result<Vec<City>> {
        self()
    }

    fn describe(&self) -> String {
        "closure".to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// JSON array of source records, optionally gzipped.
    Json,
    /// bincode dataset written by [`write_dataset`], optionally gzipped.
    Binary,
}

impl DataFormat {
    /// `*.bin` / `*.bin.gz` are binary; everything else is read as JSON.
    pub fn detect(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        if name.ends_with(".bin") {
            DataFormat::Binary
        } else {
            DataFormat::Json
        }
    }
}

/// A dataset file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: DataFormat,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = DataFormat::detect(&path);
        Self { path, format }
    }

    pub fn with_format(path: impl Into<PathBuf>, format: DataFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// The bundled `data/cities_sorted.json`.
    pub fn bundled() -> Self {
        Self::new(default_dataset_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> DataFormat {
        self.format
    }
}

impl CitySource for FileSource {
    fn load_records(&self) -> Result<Vec<City>> {
        let started = Instant::now();
        debug!(path = %self.path.display(), format = ?self.format, "opening dataset");

        let reader = common_io::open_stream(&self.path)?;
        let cities = match self.format {
            DataFormat::Json => json::read_cities(reader)?,
            DataFormat::Binary => binary::read_cities(reader)?,
        };

        info!(
            path = %self.path.display(),
            cities = cities.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dataset loaded"
        );
        Ok(cities)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Read a JSON dataset and rewrite it in the binary format.
pub fn convert_to_binary(source: &Path, out_path: &Path, compression: CompressionMode) -> Result<usize> {
    let cities = FileSource::with_format(source, DataFormat::Json).load_records()?;
    write_dataset(out_path, &cities, compression)?;
    Ok(cities.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_from_file_name() {
        assert_eq!(DataFormat::detect(Path::new("a/cities.json")), DataFormat::Json);
        assert_eq!(DataFormat::detect(Path::new("cities.json.gz")), DataFormat::Json);
        assert_eq!(DataFormat::detect(Path::new("cities.bin")), DataFormat::Binary);
        assert_eq!(DataFormat::detect(Path::new("CITIES.BIN.GZ")), DataFormat::Binary);
        assert_eq!(DataFormat::detect(Path::new("noext")), DataFormat::Json);
    }

    #[test]
    fn bundled_dataset_is_json() {
        let source = FileSource::bundled();
        assert_eq!(source.format(), DataFormat::Json);
        assert!(source.path().ends_with("data/cities_sorted.json"));
    }

    #[test]
    fn closures_are_sources() {
        let source = || -> Result<Vec<City>> { Ok(vec![City::new("Oslo", "NO", 59.9, 10.7)]) };
        assert_eq!(source.load_records().unwrap().len(), 1);
        assert_eq!(source.describe(), "closure");
    }
}
