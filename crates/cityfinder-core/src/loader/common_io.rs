// crates/cityfinder-core/src/loader/common_io.rs
use crate::error::{CityError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl CompressionMode {
    /// Gzip for `*.gz` paths, plain otherwise.
    pub fn for_path(path: &Path) -> Self {
        if is_gzip_path(path) {
            CompressionMode::Gzip
        } else {
            CompressionMode::None
        }
    }
}

pub fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Opens a file, buffers it, and wraps it in a gzip decoder for `*.gz` paths.
/// Returns a generic reader so the caller doesn't care about the compression.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        CityError::Loading(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    wrap_reader(reader, CompressionMode::for_path(path))
}

fn wrap_reader<R: Read + 'static>(reader: R, mode: CompressionMode) -> Result<Box<dyn Read>> {
    match mode {
        CompressionMode::None => Ok(Box::new(reader)),
        #[cfg(feature = "compact")]
        CompressionMode::Gzip => Ok(Box::new(GzDecoder::new(reader))),
        #[cfg(not(feature = "compact"))]
        CompressionMode::Gzip => Err(CityError::Other(
            "gzip datasets need the `compact` feature".to_string(),
        )),
    }
}

/// Writes `bytes` to `path` (creating parent directories), gzip encoded
/// when asked for. The gzip trailer is written before returning.
pub fn write_bytes(path: &Path, bytes: &[u8], mode: CompressionMode) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)
        .map_err(|e| CityError::Other(format!("Cannot create {}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);

    match mode {
        CompressionMode::None => writer.write_all(bytes)?,
        #[cfg(feature = "compact")]
        CompressionMode::Gzip => {
            let mut encoder = GzEncoder::new(&mut writer, Compression::default());
            encoder.write_all(bytes)?;
            encoder.finish()?;
        }
        #[cfg(not(feature = "compact"))]
        CompressionMode::Gzip => {
            return Err(CityError::Other(
                "gzip datasets need the `compact` feature".to_string(),
            ))
        }
    }
    writer.flush()?;
    Ok(())
}
