//! GFS GRIB2 subset reader.
//!
//! Decodes the isobaric fields of a NOMADS subset with the `grib` crate and
//! exposes them as 2x2 neighbourhoods around a site through
//! [`am_layers::GridAccessor`].

pub mod error;
pub mod index;
pub mod tables;

pub use error::{GribIndexError, GribIndexResult};
pub use index::{neighborhood_from_points, GribIndex};
