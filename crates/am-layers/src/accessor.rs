//! Access to gridded model fields around a site.

use std::collections::HashMap;

use gfs_common::{PressureLevel, Variable};

use crate::interpolation::Neighborhood;

/// Source of 2x2 neighbourhoods for (variable, level) pairs.
///
/// Implemented by the GRIB2 index and by in-memory fixtures.
pub trait GridAccessor {
    /// The neighbourhood around the site, or `None` if the field is absent.
    fn neighborhood(&self, variable: Variable, level: PressureLevel) -> Option<Neighborhood>;
}

impl<T: GridAccessor + ?Sized> GridAccessor for &T {
    fn neighborhood(&self, variable: Variable, level: PressureLevel) -> Option<Neighborhood> {
        (**self).neighborhood(variable, level)
    }
}

/// A `GridAccessor` backed by a hash map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccessor {
    fields: HashMap<(Variable, PressureLevel), Neighborhood>,
}

impl InMemoryAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        variable: Variable,
        level: PressureLevel,
        neighborhood: impl Into<Neighborhood>,
    ) -> Option<Neighborhood> {
        self.fields.insert((variable, level), neighborhood.into())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(
        mut self,
        variable: Variable,
        level: PressureLevel,
        neighborhood: impl Into<Neighborhood>,
    ) -> Self {
        self.insert(variable, level, neighborhood);
        self
    }

    /// Set the same value at all four corners.
    pub fn with_uniform(self, variable: Variable, level: PressureLevel, value: f64) -> Self {
        self.with(variable, level, [[value; 2]; 2])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl GridAccessor for InMemoryAccessor {
    fn neighborhood(&self, variable: Variable, level: PressureLevel) -> Option<Neighborhood> {
        self.fields.get(&(variable, level)).copied()
    }
}
