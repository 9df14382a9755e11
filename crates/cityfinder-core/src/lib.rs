// crates/cityfinder-core/src/lib.rs

//! # cityfinder-core
//!
//! Case-insensitive prefix search over a static gazetteer of cities.
//!
//! The dataset is loaded once, indexed into a character trie, and then
//! queried as often as needed without further locking:
//!
//! ```no_run
//! use cityfinder_core::default_repository;
//!
//! let repo = default_repository();
//! for city in &repo.search_cities_by_prefix("san f")? {
//!     println!("{} ({})", city.name(), city.country_code());
//! }
//! # Ok::<(), cityfinder_core::CityError>(())
//! ```

pub mod api; // JSON / grouped views
pub mod common;
pub mod config;
pub mod error;
pub mod loader; // The ingestion side
pub mod model;
pub mod repository; // Initialization gate
pub mod store;
pub mod text;
pub mod traits;
pub mod trie;

// Re-exports
pub use crate::error::{CityError, ErrorKind, Result};
pub use crate::common::CatalogStats;
pub use crate::config::RepositoryConfig;
pub use crate::loader::{CitySource, CompressionMode, DataFormat, FileSource};
pub use crate::model::City;
pub use crate::repository::{default_repository, CityRepository, InitPhase};
pub use crate::store::{Catalog, CityList};
pub use crate::text::Folding;
pub use crate::trie::PrefixIndex;
