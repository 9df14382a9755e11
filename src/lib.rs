//! Umbrella crate for the cityfinder workspace.
//!
//! Re-exports [`cityfinder_core`] and a prelude for the demos.

pub use cityfinder_core::*;

pub mod prelude {
    pub use cityfinder_core::api::{group_by_initial, CityGroup, CityView};
    pub use cityfinder_core::{
        default_repository, City, CityError, CityList, CityRepository, ErrorKind, FileSource,
        Folding, InitPhase, Result,
    };
}
