//! Synthesis of am layers from a site profile.
//!
//! Layers are produced top down, one per model level at or above the site,
//! followed by a partial layer whose base sits at the site altitude. The
//! whole walk is validated up front by [`column_layers`], so a caller that
//! receives a [`Layers`] iterator can write every layer without failing
//! halfway through.

use gfs_common::Variable;
use tracing::debug;

use crate::constants::{condensate_path, H2O_SUPERCOOL_LIMIT, RH_TOP_PLEVEL, STRAT_H2O_VMR};
use crate::error::{LayerError, LayerResult};
use crate::interpolation::{blend, fraction, log_pressure_blend};
use crate::profile::{LevelRecord, Profile};

/// Where a layer's base comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Base on a model level.
    ModelLevel,
    /// Base at the site altitude, extrapolated from the two nearest levels.
    SiteBase,
}

/// Water vapour statement for a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaterVapor {
    /// Relative humidity over liquid water [%]
    RelativeHumidity(f64),
    /// Relative humidity over ice [%]
    RelativeHumidityOverIce(f64),
    /// Fixed volume mixing ratio, used in the stratosphere
    VolumeMixingRatio(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudPhase {
    Liquid,
    Ice,
}

/// Column-integrated condensate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudPath {
    pub phase: CloudPhase,
    /// [kg / m^2]
    pub kg_per_m2: f64,
}

/// One am layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    /// Base pressure [mbar]
    pub base_pressure_mbar: f64,
    /// Base geopotential height [m]
    pub base_height_m: f64,
    /// Base temperature [K]
    pub base_temperature_k: f64,
    /// Mean ozone volume mixing ratio, if positive
    pub ozone_vmr: Option<f64>,
    pub water_vapor: WaterVapor,
    /// Cloud water path; liquid below the supercooling limit is reported as ice
    pub cloud_water: Option<CloudPath>,
    /// Cloud ice path [kg / m^2]
    pub cloud_ice: Option<f64>,
}

/// Mean values over a layer.
#[derive(Debug, Clone, Copy)]
struct LayerMeans {
    temperature_k: f64,
    ozone_vmr: f64,
    relative_humidity_pct: f64,
    cloud_liquid_mmr: f64,
    cloud_ice_mmr: f64,
}

impl LayerMeans {
    fn between(upper: &SiteLevel, lower: &SiteLevel) -> Self {
        Self {
            temperature_k: 0.5 * (upper.temperature_k + lower.temperature_k),
            ozone_vmr: 0.5 * (upper.ozone_vmr + lower.ozone_vmr),
            relative_humidity_pct: 0.5 * (upper.relative_humidity_pct + lower.relative_humidity_pct),
            cloud_liquid_mmr: 0.5 * (upper.cloud_liquid_mmr + lower.cloud_liquid_mmr),
            cloud_ice_mmr: 0.5 * (upper.cloud_ice_mmr + lower.cloud_ice_mmr),
        }
    }

    fn at(level: &SiteLevel) -> Self {
        Self {
            temperature_k: level.temperature_k,
            ozone_vmr: level.ozone_vmr,
            relative_humidity_pct: level.relative_humidity_pct,
            cloud_liquid_mmr: level.cloud_liquid_mmr,
            cloud_ice_mmr: level.cloud_ice_mmr,
        }
    }
}

/// A level record with height and temperature known to be present.
#[derive(Debug, Clone, Copy)]
struct SiteLevel {
    pressure_mbar: f64,
    height_m: f64,
    temperature_k: f64,
    ozone_vmr: f64,
    relative_humidity_pct: f64,
    cloud_liquid_mmr: f64,
    cloud_ice_mmr: f64,
}

impl SiteLevel {
    fn checked(record: &LevelRecord, index: usize) -> LayerResult<Self> {
        let missing = |field| {
            if index == 0 {
                LayerError::MissingTopLevel {
                    level: record.level,
                    field,
                }
            } else {
                LayerError::MissingLevelData {
                    level: record.level,
                    field,
                }
            }
        };

        let height_m = record
            .height_m
            .ok_or_else(|| missing(Variable::GeopotentialHeight))?;
        let temperature_k = record
            .temperature_k
            .ok_or_else(|| missing(Variable::Temperature))?;

        Ok(Self {
            pressure_mbar: record.pressure(),
            height_m,
            temperature_k,
            ozone_vmr: record.ozone_vmr,
            relative_humidity_pct: record.relative_humidity_pct,
            cloud_liquid_mmr: record.cloud_liquid_mmr,
            cloud_ice_mmr: record.cloud_ice_mmr,
        })
    }
}

fn synthesize(
    kind: LayerKind,
    base_pressure_mbar: f64,
    base_height_m: f64,
    base_temperature_k: f64,
    means: LayerMeans,
    thickness_mbar: f64,
) -> Layer {
    let ice_phase = means.temperature_k < H2O_SUPERCOOL_LIMIT;

    let water_vapor = if base_pressure_mbar > RH_TOP_PLEVEL {
        if ice_phase {
            WaterVapor::RelativeHumidityOverIce(means.relative_humidity_pct)
        } else {
            WaterVapor::RelativeHumidity(means.relative_humidity_pct)
        }
    } else {
        WaterVapor::VolumeMixingRatio(STRAT_H2O_VMR)
    };

    let cloud_water = (means.cloud_liquid_mmr > 0.0).then(|| CloudPath {
        phase: if ice_phase {
            CloudPhase::Ice
        } else {
            CloudPhase::Liquid
        },
        kg_per_m2: condensate_path(thickness_mbar, means.cloud_liquid_mmr),
    });

    let cloud_ice = (means.cloud_ice_mmr > 0.0)
        .then(|| condensate_path(thickness_mbar, means.cloud_ice_mmr));

    Layer {
        kind,
        base_pressure_mbar,
        base_height_m,
        base_temperature_k,
        ozone_vmr: (means.ozone_vmr > 0.0).then_some(means.ozone_vmr),
        water_vapor,
        cloud_water,
        cloud_ice,
    }
}

/// Partial layer between `upper` and the site, with site values taken from
/// the `(upper, lower)` bracket. Soft variables are interpolated linearly in
/// pressure and clamped at zero.
fn site_base_layer(
    upper: &SiteLevel,
    lower: &SiteLevel,
    altitude_m: f64,
    thickness_mbar: f64,
) -> Layer {
    let u = fraction(altitude_m, upper.height_m, lower.height_m);
    let pressure = log_pressure_blend(u, upper.pressure_mbar, lower.pressure_mbar);
    let temperature = blend(u, upper.temperature_k, lower.temperature_k);

    let u_p = fraction(pressure, upper.pressure_mbar, lower.pressure_mbar);
    let soft = |at_upper: f64, at_lower: f64| blend(u_p, at_upper, at_lower).max(0.0);

    let site = SiteLevel {
        pressure_mbar: pressure,
        height_m: altitude_m,
        temperature_k: temperature,
        ozone_vmr: soft(upper.ozone_vmr, lower.ozone_vmr),
        relative_humidity_pct: soft(upper.relative_humidity_pct, lower.relative_humidity_pct),
        cloud_liquid_mmr: soft(upper.cloud_liquid_mmr, lower.cloud_liquid_mmr),
        cloud_ice_mmr: soft(upper.cloud_ice_mmr, lower.cloud_ice_mmr),
    };

    synthesize(
        LayerKind::SiteBase,
        pressure,
        altitude_m,
        temperature,
        LayerMeans::between(upper, &site),
        thickness_mbar,
    )
}

/// Lazily produced layers for a validated column.
#[derive(Debug, Clone)]
pub struct Layers {
    levels: Vec<SiteLevel>,
    next: usize,
    base: Option<Layer>,
}

impl Layers {
    /// Number of layers on model levels.
    pub fn model_layer_count(&self) -> usize {
        self.levels.len()
    }

    /// True if a partial layer ends at the site.
    pub fn has_site_base(&self) -> bool {
        self.base.is_some()
    }

    fn model_layer(&self, index: usize) -> Layer {
        let level = &self.levels[index];
        let (means, thickness) = match index.checked_sub(1).map(|i| &self.levels[i]) {
            Some(above) => (
                LayerMeans::between(above, level),
                level.pressure_mbar - above.pressure_mbar,
            ),
            None => (LayerMeans::at(level), level.pressure_mbar),
        };

        synthesize(
            LayerKind::ModelLevel,
            level.pressure_mbar,
            level.height_m,
            level.temperature_k,
            means,
            thickness,
        )
    }
}

impl Iterator for Layers {
    type Item = Layer;

    fn next(&mut self) -> Option<Layer> {
        if self.next < self.levels.len() {
            let layer = self.model_layer(self.next);
            self.next += 1;
            Some(layer)
        } else {
            self.base.take()
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.levels.len() - self.next + usize::from(self.base.is_some());
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Layers {}

/// Plan the layers of a column above a site at `altitude_m`.
///
/// Walks the profile top down until a level lies below the site. Every level
/// the walk reaches must carry height and temperature. Fails if the site is
/// above the top level.
pub fn column_layers(profile: &Profile, altitude_m: f64) -> LayerResult<Layers> {
    let records = profile.records();
    let mut levels = Vec::with_capacity(records.len());
    let mut below = None;

    for (index, record) in records.iter().enumerate() {
        let level = SiteLevel::checked(record, index)?;
        if level.height_m < altitude_m {
            if index == 0 {
                return Err(LayerError::AltitudeAboveModelTop {
                    altitude: altitude_m,
                    top_height: level.height_m,
                    level: record.level,
                });
            }
            below = Some(level);
            break;
        }
        levels.push(level);
    }

    let base = plan_site_base(records, &levels, below, altitude_m)?;

    debug!(
        altitude_m,
        model_layers = levels.len(),
        site_base = base.is_some(),
        "Planned column layers"
    );

    Ok(Layers {
        levels,
        next: 0,
        base,
    })
}

fn plan_site_base(
    records: &[LevelRecord],
    levels: &[SiteLevel],
    below: Option<SiteLevel>,
    altitude_m: f64,
) -> LayerResult<Option<Layer>> {
    let Some(top) = levels.last() else {
        return Ok(None);
    };
    if top.height_m == altitude_m {
        return Ok(None);
    }

    match below {
        Some(lower) => {
            let thickness = lower.pressure_mbar - top.pressure_mbar;
            Ok(Some(site_base_layer(top, &lower, altitude_m, thickness)))
        }
        None => {
            // Site below the lowest model level: extrapolate from the bottom pair.
            let [.., upper, lower] = levels else {
                return Err(LayerError::InsufficientLevels);
            };
            if lower.height_m >= upper.height_m {
                let n = records.len();
                return Err(LayerError::HeightInversion {
                    above: records[n - 2].level,
                    below: records[n - 1].level,
                });
            }
            // The partial layer spans the bottom pair, as if the walk had
            // stopped at the last level.
            let thickness = lower.pressure_mbar - upper.pressure_mbar;
            Ok(Some(site_base_layer(upper, lower, altitude_m, thickness)))
        }
    }
}
