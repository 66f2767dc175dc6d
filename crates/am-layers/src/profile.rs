//! Vertical profile of model fields interpolated to a site.

use gfs_common::{GridOffsets, PressureLevel, Variable};
use tracing::{debug, instrument};

use crate::accessor::GridAccessor;
use crate::constants::ozone_mmr_to_vmr;
use crate::error::{ProfileError, ProfileResult};

/// Model fields at one isobaric level, interpolated to the site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelRecord {
    pub level: PressureLevel,
    /// Geopotential height [m]
    pub height_m: Option<f64>,
    /// Temperature [K]
    pub temperature_k: Option<f64>,
    /// Ozone volume mixing ratio
    pub ozone_vmr: f64,
    /// Relative humidity [%]
    pub relative_humidity_pct: f64,
    /// Cloud liquid water mass mixing ratio [kg/kg]
    pub cloud_liquid_mmr: f64,
    /// Cloud ice mass mixing ratio [kg/kg]
    pub cloud_ice_mmr: f64,
}

impl LevelRecord {
    /// A record with every field absent.
    pub fn empty(level: PressureLevel) -> Self {
        Self {
            level,
            height_m: None,
            temperature_k: None,
            ozone_vmr: 0.0,
            relative_humidity_pct: 0.0,
            cloud_liquid_mmr: 0.0,
            cloud_ice_mmr: 0.0,
        }
    }

    pub fn pressure(&self) -> f64 {
        self.level.pressure()
    }

    /// The first required field this record lacks, if any.
    pub fn missing_field(&self) -> Option<Variable> {
        if self.height_m.is_none() {
            Some(Variable::GeopotentialHeight)
        } else if self.temperature_k.is_none() {
            Some(Variable::Temperature)
        } else {
            None
        }
    }
}

/// Level records ordered top of atmosphere first.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    records: Vec<LevelRecord>,
}

impl Profile {
    /// Interpolate every variable at every level to the site.
    ///
    /// Height and temperature stay `None` when their field is absent; the
    /// other variables default to zero. Neighbourhoods with non-finite
    /// corners count as absent.
    #[instrument(skip(accessor, levels), fields(levels = levels.len()))]
    pub fn build<A: GridAccessor>(
        accessor: &A,
        levels: &[PressureLevel],
        offsets: GridOffsets,
    ) -> ProfileResult<Self> {
        let sample = |variable: Variable, level: PressureLevel| -> Option<f64> {
            let neighborhood = accessor.neighborhood(variable, level)?;
            if !neighborhood.is_complete() {
                debug!(%variable, %level, "Ignoring neighbourhood with missing corners");
                return None;
            }
            Some(neighborhood.interpolate(offsets))
        };

        let records = levels
            .iter()
            .map(|&level| LevelRecord {
                level,
                height_m: sample(Variable::GeopotentialHeight, level),
                temperature_k: sample(Variable::Temperature, level),
                ozone_vmr: sample(Variable::OzoneMixingRatio, level)
                    .map(ozone_mmr_to_vmr)
                    .unwrap_or(0.0),
                relative_humidity_pct: sample(Variable::RelativeHumidity, level).unwrap_or(0.0),
                cloud_liquid_mmr: sample(Variable::CloudMixingRatio, level).unwrap_or(0.0),
                cloud_ice_mmr: sample(Variable::IceMixingRatio, level).unwrap_or(0.0),
            })
            .collect::<Vec<_>>();

        let incomplete = records.iter().filter(|r| r.missing_field().is_some()).count();
        debug!(
            levels = records.len(),
            incomplete, "Built level profile"
        );

        Self::from_records(records)
    }

    /// Wrap records that are already interpolated.
    pub fn from_records(records: Vec<LevelRecord>) -> ProfileResult<Self> {
        if records.is_empty() {
            return Err(ProfileError::Empty);
        }
        if let Some(pair) = records.windows(2).find(|w| w[0].level >= w[1].level) {
            return Err(ProfileError::Unordered {
                above: pair[0].level,
                below: pair[1].level,
            });
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[LevelRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelRecord> {
        self.records.get(index)
    }

    pub fn levels(&self) -> impl Iterator<Item = PressureLevel> + '_ {
        self.records.iter().map(|r| r.level)
    }
}
