//! Index of GRIB2 submessages by variable and level.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use am_layers::{GridAccessor, Neighborhood};
use gfs_common::{GridCell, PressureLevel, Variable};
use tracing::{debug, info, instrument, trace, warn};

use crate::error::{GribIndexError, GribIndexResult};
use crate::tables;

/// 2x2 neighbourhoods for every recognised field of a GRIB2 subset.
#[derive(Debug, Clone)]
pub struct GribIndex {
    cell: GridCell,
    fields: HashMap<(Variable, PressureLevel), Neighborhood>,
}

impl GribIndex {
    /// Read a GRIB2 file from disk.
    pub fn from_path(path: impl AsRef<Path>, cell: &GridCell) -> GribIndexResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| GribIndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes, cell)
    }

    /// Decode every submessage and keep the fields on isobaric levels.
    ///
    /// Submessages that fail to decode or do not cover the cell corners are
    /// skipped with a warning. When a (variable, level) pair occurs more than
    /// once, the first occurrence is kept.
    #[instrument(skip(bytes, cell), fields(size = bytes.len()))]
    pub fn from_bytes(bytes: &[u8], cell: &GridCell) -> GribIndexResult<Self> {
        let grib2 = grib::from_reader(Cursor::new(bytes))
            .map_err(|e| GribIndexError::Parse(e.to_string()))?;

        let mut fields = HashMap::new();
        let mut skipped = 0usize;

        for (index, submessage) in grib2.iter() {
            let discipline = submessage.indicator().discipline;
            let prod_def = submessage.prod_def();
            let surface = prod_def
                .fixed_surfaces()
                .map(|(first, _)| (first.surface_type, first.value()));

            let Some(key) = tables::identify(
                discipline,
                prod_def.parameter_category(),
                prod_def.parameter_number(),
                surface,
            ) else {
                trace!(message = ?index, "Ignoring unrecognised product");
                continue;
            };

            if fields.contains_key(&key) {
                debug!(variable = %key.0, level = %key.1, "Duplicate field, keeping first");
                continue;
            }

            let points = match submessage.latlons() {
                Ok(points) => points
                    .map(|(lat, lon)| (lat as f64, lon as f64))
                    .collect::<Vec<_>>(),
                Err(e) => {
                    warn!(variable = %key.0, level = %key.1, error = %e, "Skipping submessage without grid points");
                    skipped += 1;
                    continue;
                }
            };

            let values: Vec<f32> = match grib::Grib2SubmessageDecoder::from(submessage) {
                Ok(decoder) => match decoder.dispatch() {
                    Ok(values) => values.collect(),
                    Err(e) => {
                        warn!(variable = %key.0, level = %key.1, error = %e, "Failed to decode submessage");
                        skipped += 1;
                        continue;
                    }
                },
                Err(e) => {
                    warn!(variable = %key.0, level = %key.1, error = %e, "Unsupported submessage encoding");
                    skipped += 1;
                    continue;
                }
            };

            match neighborhood_from_points(cell, &points, &values) {
                Ok(neighborhood) => {
                    fields.insert(key, neighborhood);
                }
                Err(e) => {
                    warn!(variable = %key.0, level = %key.1, error = %e, "Skipping submessage");
                    skipped += 1;
                }
            }
        }

        info!(fields = fields.len(), skipped, "Indexed GRIB2 subset");

        Ok(Self { cell: *cell, fields })
    }

    /// The grid cell the neighbourhoods were extracted for.
    pub fn cell(&self) -> &GridCell {
        &self.cell
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, variable: Variable, level: PressureLevel) -> bool {
        self.fields.contains_key(&(variable, level))
    }
}

impl GridAccessor for GribIndex {
    fn neighborhood(&self, variable: Variable, level: PressureLevel) -> Option<Neighborhood> {
        self.fields.get(&(variable, level)).copied()
    }
}

/// Place grid point values into a neighbourhood by their coordinates.
///
/// Points outside the cell are ignored; every corner must be hit. Values
/// keep their decoded form, so bitmap holes stay NaN.
pub fn neighborhood_from_points(
    cell: &GridCell,
    points: &[(f64, f64)],
    values: &[f32],
) -> GribIndexResult<Neighborhood> {
    if points.len() != values.len() {
        return Err(GribIndexError::LengthMismatch {
            points: points.len(),
            values: values.len(),
        });
    }

    let mut grid = [[f64::NAN; 2]; 2];
    let mut filled = [[false; 2]; 2];

    for (&(lat, lon), &value) in points.iter().zip(values) {
        if let Some((i, j)) = cell.corner_index(lat, lon) {
            if !filled[i][j] {
                grid[i][j] = value as f64;
                filled[i][j] = true;
            }
        }
    }

    let found = filled.iter().flatten().filter(|&&f| f).count();
    if found < 4 {
        return Err(GribIndexError::IncompleteNeighborhood { found });
    }

    Ok(Neighborhood::new(grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gfs_common::GridResolution;

    fn cell() -> GridCell {
        GridCell::bracketing(19.8207, -155.4681, &GridResolution::quarter_degree())
    }

    #[test]
    fn test_points_in_north_first_order() {
        // scanning mode 0: north row first, longitudes in 0..360
        let points = [(20.0, 204.5), (20.0, 204.75), (19.75, 204.5), (19.75, 204.75)];
        let values = [3.0, 4.0, 1.0, 2.0];
        let n = neighborhood_from_points(&cell(), &points, &values).unwrap();
        assert_eq!(n.values, [[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn test_points_outside_cell_are_ignored() {
        let points = [
            (20.25, 204.5),
            (20.0, 204.5),
            (20.0, 204.75),
            (19.75, 204.5),
            (19.75, 204.75),
            (19.75, 205.0),
        ];
        let values = [9.0, 3.0, 4.0, 1.0, 2.0, 9.0];
        let n = neighborhood_from_points(&cell(), &points, &values).unwrap();
        assert_eq!(n.values, [[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn test_missing_corner_is_an_error() {
        let points = [(20.0, 204.5), (20.0, 204.75), (19.75, 204.5)];
        let values = [3.0, 4.0, 1.0];
        let err = neighborhood_from_points(&cell(), &points, &values).unwrap_err();
        assert!(matches!(err, GribIndexError::IncompleteNeighborhood { found: 3 }));
    }

    #[test]
    fn test_length_mismatch() {
        let err = neighborhood_from_points(&cell(), &[(20.0, 204.5)], &[]).unwrap_err();
        assert!(matches!(
            err,
            GribIndexError::LengthMismatch {
                points: 1,
                values: 0
            }
        ));
    }

    #[test]
    fn test_nan_values_are_kept() {
        let points = [(20.0, 204.5), (20.0, 204.75), (19.75, 204.5), (19.75, 204.75)];
        let values = [3.0, f32::NAN, 1.0, 2.0];
        let n = neighborhood_from_points(&cell(), &points, &values).unwrap();
        assert!(!n.is_complete());
    }
}
