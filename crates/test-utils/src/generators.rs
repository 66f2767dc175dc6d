//! Generators for 2x2 grid neighbourhoods.
//!
//! Neighbourhoods are `[[f64; 2]; 2]` indexed `[lat][lon]`, southern row and
//! western column first.

/// A neighbourhood holding the same value at all four corners.
pub fn uniform_neighborhood(value: f64) -> [[f64; 2]; 2] {
    [[value; 2]; 2]
}

/// A planar field: `base + dlat * i + dlon * j`.
///
/// Bilinear interpolation of a planar field is exact, which makes the
/// expected value at any offset easy to state.
pub fn planar_neighborhood(base: f64, dlat: f64, dlon: f64) -> [[f64; 2]; 2] {
    [[base, base + dlon], [base + dlat, base + dlat + dlon]]
}

/// Corners numbered in row-major order: `[[1, 2], [3, 4]]`.
pub fn numbered_neighborhood() -> [[f64; 2]; 2] {
    [[1.0, 2.0], [3.0, 4.0]]
}

/// Flattened grid values in GRIB scanning mode 0 (north row first,
/// west to east), for a `[lat][lon]` neighbourhood.
pub fn north_first_scan(neighborhood: [[f64; 2]; 2]) -> Vec<f32> {
    vec![
        neighborhood[1][0] as f32,
        neighborhood[1][1] as f32,
        neighborhood[0][0] as f32,
        neighborhood[0][1] as f32,
    ]
}
