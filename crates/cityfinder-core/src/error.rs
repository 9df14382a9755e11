// crates/cityfinder-core/src/error.rs

//! # Errors
//!
//! Ingestion can fail in three ways and only three: the dataset could not be
//! opened, its content could not be decoded, or something else went wrong.
//! Everything downstream (the repository, the CLI) matches on exactly these.

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CityError>;

/// Failure surfaced by ingestion and therefore by every repository query.
///
/// Searching an already-built catalog never fails; an unknown prefix is an
/// empty result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CityError {
    /// The backing data source could not be located or opened.
    #[error("failed to load city data: {0}")]
    Loading(String),

    /// The data source was found but its content is not a valid city list.
    #[error("failed to parse city data: {0}")]
    Parsing(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

/// Fieldless mirror of [`CityError`] for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Loading,
    Parsing,
    Other,
}

impl CityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CityError::Loading(_) => ErrorKind::Loading,
            CityError::Parsing(_) => ErrorKind::Parsing,
            CityError::Other(_) => ErrorKind::Other,
        }
    }

    /// Diagnostic detail carried by the error.
    pub fn message(&self) -> &str {
        match self {
            CityError::Loading(m) | CityError::Parsing(m) | CityError::Other(m) => m,
        }
    }

    /// Short sentence suitable for showing to an end user.
    ///
    /// Loading and parsing failures get fixed wording; other failures fall
    /// back to their own message.
    pub fn user_message(&self) -> &str {
        match self {
            CityError::Loading(_) => "Error in loading data. Please try again.",
            CityError::Parsing(_) => "Error in parsing data. Please try again.",
            CityError::Other(m) => m,
        }
    }

    /// Classify an I/O error raised while reading an already opened dataset.
    ///
    /// flate2 reports a bad gzip header or deflate stream as `InvalidInput`,
    /// so on this path that kind means undecodable content too.
    pub(crate) fn from_decode_io(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::InvalidInput => CityError::Parsing(e.to_string()),
            _ => e.into(),
        }
    }
}

impl From<io::Error> for CityError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                CityError::Loading(e.to_string())
            }
            // truncated or invalid bytes
            io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
                CityError::Parsing(e.to_string())
            }
            _ => CityError::Other(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for CityError {
    fn from(e: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match e.classify() {
            // unwraps to the underlying reader error
            Category::Io => io::Error::from(e).into(),
            Category::Syntax | Category::Data | Category::Eof => CityError::Parsing(e.to_string()),
        }
    }
}

impl From<bincode::Error> for CityError {
    fn from(e: bincode::Error) -> Self {
        match *e {
            bincode::ErrorKind::Io(io_err) => io_err.into(),
            other => CityError::Parsing(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_loading_failure() {
        let err: CityError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.kind(), ErrorKind::Loading);
        assert_eq!(err.message(), "gone");
    }

    #[test]
    fn malformed_json_is_a_parsing_failure() {
        let e = serde_json::from_str::<Vec<u8>>("[1, 2,").unwrap_err();
        assert_eq!(CityError::from(e).kind(), ErrorKind::Parsing);

        let e = serde_json::from_str::<Vec<u8>>(r#"{"a": 1}"#).unwrap_err();
        assert_eq!(CityError::from(e).kind(), ErrorKind::Parsing);
    }

    #[test]
    fn unexpected_io_is_other() {
        let err: CityError = io::Error::new(io::ErrorKind::Interrupted, "signal").into();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(err.user_message(), "signal");
    }

    #[test]
    fn invalid_input_while_decoding_is_a_parsing_failure() {
        let e = io::Error::new(io::ErrorKind::InvalidInput, "corrupt deflate stream");
        assert_eq!(CityError::from_decode_io(e).kind(), ErrorKind::Parsing);

        let e = io::Error::new(io::ErrorKind::InvalidInput, "bad argument");
        assert_eq!(CityError::from(e).kind(), ErrorKind::Other);

        let e = io::Error::new(io::ErrorKind::Interrupted, "signal");
        assert_eq!(CityError::from_decode_io(e).kind(), ErrorKind::Other);
    }

    #[test]
    fn user_messages_hide_details_for_known_kinds() {
        let err = CityError::Loading("/tmp/x.json: No such file".into());
        assert!(!err.user_message().contains("/tmp"));
        assert!(err.to_string().contains("/tmp/x.json"));
    }
}
