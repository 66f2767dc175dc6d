//! GFS isobaric levels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pascals per millibar (hPa).
pub const PASCAL_PER_MBAR: f64 = 100.0;

/// An isobaric model level, identified by its pressure in whole millibars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PressureLevel(u32);

impl PressureLevel {
    pub const fn from_mbar(mbar: u32) -> Self {
        Self(mbar)
    }

    /// Level for a fixed-surface value in Pa, if it is a whole number of mbar.
    pub fn from_pascals(pa: f64) -> Option<Self> {
        let mbar = pa / PASCAL_PER_MBAR;
        let rounded = mbar.round();
        if rounded >= 1.0 && (mbar - rounded).abs() < 1e-6 {
            Some(Self(rounded as u32))
        } else {
            None
        }
    }

    pub fn mbar(&self) -> u32 {
        self.0
    }

    /// Pressure [mbar] as a float for numerical work.
    pub fn pressure(&self) -> f64 {
        self.0 as f64
    }
}

impl fmt::Display for PressureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mb", self.0)
    }
}

/// The 31 GFS isobaric levels, ordered top of atmosphere first
/// (increasing pressure).
pub const GFS_PRESSURE_LEVELS: [PressureLevel; 31] = [
    PressureLevel(1),
    PressureLevel(2),
    PressureLevel(3),
    PressureLevel(5),
    PressureLevel(7),
    PressureLevel(10),
    PressureLevel(20),
    PressureLevel(30),
    PressureLevel(50),
    PressureLevel(70),
    PressureLevel(100),
    PressureLevel(150),
    PressureLevel(200),
    PressureLevel(250),
    PressureLevel(300),
    PressureLevel(350),
    PressureLevel(400),
    PressureLevel(450),
    PressureLevel(500),
    PressureLevel(550),
    PressureLevel(600),
    PressureLevel(650),
    PressureLevel(700),
    PressureLevel(750),
    PressureLevel(800),
    PressureLevel(850),
    PressureLevel(900),
    PressureLevel(925),
    PressureLevel(950),
    PressureLevel(975),
    PressureLevel(1000),
];

/// The GFS level table.
pub fn gfs_levels() -> &'static [PressureLevel] {
    &GFS_PRESSURE_LEVELS
}
