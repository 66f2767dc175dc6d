//! GFS column interpolation and am layer synthesis.
//!
//! The pipeline is pure and synchronous:
//!
//! 1. A [`GridAccessor`] supplies 2x2 neighbourhoods per variable and level.
//! 2. [`Profile::build`] interpolates them to the site.
//! 3. [`column_layers`] validates the column walk and yields [`Layer`]s.
//! 4. [`LayerWriter`] renders them in the am layer format.

pub mod accessor;
pub mod constants;
pub mod error;
pub mod interpolation;
pub mod layers;
pub mod profile;
pub mod writer;

pub use accessor::{GridAccessor, InMemoryAccessor};
pub use error::{LayerError, LayerResult, ProfileError, ProfileResult};
pub use interpolation::{bilinear, Neighborhood};
pub use layers::{column_layers, CloudPath, CloudPhase, Layer, LayerKind, Layers, WaterVapor};
pub use profile::{LevelRecord, Profile};
pub use writer::{ColumnHeader, LayerWriter};
