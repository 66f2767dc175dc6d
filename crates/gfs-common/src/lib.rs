//! Common types shared by the GFS column tools.

pub mod error;
pub mod grid;
pub mod levels;
pub mod product;
pub mod site;
pub mod time;
pub mod variables;

pub use error::{GfsError, GfsResult};
pub use grid::{GridCell, GridOffsets, GridResolution};
pub use levels::{gfs_levels, PressureLevel, GFS_PRESSURE_LEVELS, PASCAL_PER_MBAR};
pub use product::GfsProduct;
pub use site::Site;
pub use time::{CycleTime, ModelCycle, ValidTime};
pub use variables::Variable;
