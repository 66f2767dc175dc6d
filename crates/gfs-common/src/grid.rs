//! Regular lat/lon grid cells bracketing a site.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GfsError;

/// Grid spacing of a GFS lat/lon product, coded as in file names ("0p25").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GridResolution {
    code: String,
    spacing_deg: f64,
}

impl GridResolution {
    /// The 0.25 degree grid.
    pub fn quarter_degree() -> Self {
        Self {
            code: "0p25".to_string(),
            spacing_deg: 0.25,
        }
    }

    /// Code used in NOMADS file and CGI names.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Grid spacing [deg].
    pub fn spacing(&self) -> f64 {
        self.spacing_deg
    }
}

impl Default for GridResolution {
    fn default() -> Self {
        Self::quarter_degree()
    }
}

impl FromStr for GridResolution {
    type Err = GfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GfsError::InvalidGridCode(s.to_string());

        let (whole, frac) = s.split_once('p').ok_or_else(invalid)?;
        if whole.len() != 1 || frac.len() != 2 {
            return Err(invalid());
        }
        let whole: u32 = whole.parse().map_err(|_| invalid())?;
        let frac: u32 = frac.parse().map_err(|_| invalid())?;

        let spacing_deg = whole as f64 + 0.01 * frac as f64;
        if spacing_deg <= 0.0 {
            return Err(invalid());
        }

        Ok(Self {
            code: s.to_string(),
            spacing_deg,
        })
    }
}

impl TryFrom<String> for GridResolution {
    type Error = GfsError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<GridResolution> for String {
    fn from(res: GridResolution) -> Self {
        res.code
    }
}

impl fmt::Display for GridResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Fractional position of a site inside its grid cell, in grid-spacing units
/// measured from the south-west corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOffsets {
    /// Latitude direction (0 = southern row, 1 = northern row)
    pub u: f64,
    /// Longitude direction (0 = western column, 1 = eastern column)
    pub v: f64,
}

/// The four grid points surrounding a site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub left_lon: f64,
    pub right_lon: f64,
    pub bottom_lat: f64,
    pub top_lat: f64,
    pub spacing: f64,
}

impl GridCell {
    /// The cell whose south-west corner is the grid point at or below/west of
    /// the given position.
    pub fn bracketing(latitude: f64, longitude: f64, resolution: &GridResolution) -> Self {
        let spacing = resolution.spacing();
        let left_lon = (longitude / spacing).floor() * spacing;
        let bottom_lat = (latitude / spacing).floor() * spacing;

        Self {
            left_lon,
            right_lon: left_lon + spacing,
            bottom_lat,
            top_lat: bottom_lat + spacing,
            spacing,
        }
    }

    /// Fractional offsets of a position from the cell's south-west corner.
    pub fn offsets(&self, latitude: f64, longitude: f64) -> GridOffsets {
        GridOffsets {
            u: (latitude - self.bottom_lat) / self.spacing,
            v: (longitude - self.left_lon) / self.spacing,
        }
    }

    /// Map a grid point to its (latitude, longitude) corner index, if it is
    /// one of the four cell corners. Longitudes are compared modulo 360 so
    /// 0..360 and -180..180 conventions both match.
    pub fn corner_index(&self, latitude: f64, longitude: f64) -> Option<(usize, usize)> {
        let tolerance = self.spacing * 1e-3;

        let i = Self::unit_step((latitude - self.bottom_lat) / self.spacing, tolerance)?;
        let dlon = (longitude - self.left_lon).rem_euclid(360.0);
        let j = Self::unit_step(dlon / self.spacing, tolerance)
            .or_else(|| Self::unit_step((dlon - 360.0) / self.spacing, tolerance))?;

        Some((i, j))
    }

    fn unit_step(steps: f64, tolerance: f64) -> Option<usize> {
        if steps.abs() <= tolerance {
            Some(0)
        } else if (steps - 1.0).abs() <= tolerance {
            Some(1)
        } else {
            None
        }
    }
}
