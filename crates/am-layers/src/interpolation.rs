//! Horizontal and vertical interpolation.

use gfs_common::GridOffsets;

/// Values at the four grid points surrounding a site.
///
/// `values[i][j]`: `i` runs along latitude (0 = southern row), `j` along
/// longitude (0 = western column).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighborhood {
    pub values: [[f64; 2]; 2],
}

impl Neighborhood {
    pub fn new(values: [[f64; 2]; 2]) -> Self {
        Self { values }
    }

    /// True if every corner holds a finite value (no bitmap holes).
    pub fn is_complete(&self) -> bool {
        self.values.iter().flatten().all(|v| v.is_finite())
    }

    /// Bilinear blend at the given offsets.
    pub fn interpolate(&self, offsets: GridOffsets) -> f64 {
        bilinear(&self.values, offsets.u, offsets.v)
    }
}

impl From<[[f64; 2]; 2]> for Neighborhood {
    fn from(values: [[f64; 2]; 2]) -> Self {
        Self::new(values)
    }
}

/// Bilinear interpolation over a 2x2 neighbourhood.
///
/// `u` and `v` are the fractional distances, in grid spacing units, from
/// `a[0][0]` along the first and second index. No bounds checks: offsets
/// outside [0, 1] extrapolate.
pub fn bilinear(a: &[[f64; 2]; 2], u: f64, v: f64) -> f64 {
    a[0][0] * (1.0 - u) * (1.0 - v)
        + a[1][0] * u * (1.0 - v)
        + a[0][1] * (1.0 - u) * v
        + a[1][1] * u * v
}

/// Linear interpolation weight `u` of `x` between `x0` (u = 0) and `x1` (u = 1).
pub fn fraction(x: f64, x0: f64, x1: f64) -> f64 {
    (x - x0) / (x1 - x0)
}

/// `u * at_one + (1 - u) * at_zero`.
pub fn blend(u: f64, at_zero: f64, at_one: f64) -> f64 {
    u * at_one + (1.0 - u) * at_zero
}

/// Interpolate pressure linearly in log-pressure with weight `u`.
pub fn log_pressure_blend(u: f64, p_at_zero: f64, p_at_one: f64) -> f64 {
    blend(u, p_at_zero.ln(), p_at_one.ln()).exp()
}
