//! Physical constants and unit conversions.

pub use gfs_common::PASCAL_PER_MBAR;

/// Standard gravity [m / s^2].
pub const G_STD: f64 = 9.80665;

/// Average dry air molar mass [g / mol].
pub const M_AIR: f64 = 28.964;

/// Ozone molar mass [g / mol].
pub const M_O3: f64 = 47.997;

/// Below this temperature [K], condensed water is assumed to be ice.
pub const H2O_SUPERCOOL_LIMIT: f64 = 238.0;

/// At and above this level [mbar], model relative humidity is replaced by
/// a fixed stratospheric water vapour mixing ratio.
pub const RH_TOP_PLEVEL: f64 = 29.0;

/// Stratospheric water vapour volume mixing ratio.
pub const STRAT_H2O_VMR: f64 = 5e-6;

/// Convert an ozone mass mixing ratio [kg/kg] to a volume mixing ratio.
pub fn ozone_mmr_to_vmr(mmr: f64) -> f64 {
    mmr * (M_AIR / M_O3)
}

/// Mass of air per unit area [kg / m^2] in a slab `thickness_mbar` thick.
pub fn column_air_mass(thickness_mbar: f64) -> f64 {
    PASCAL_PER_MBAR * thickness_mbar / G_STD
}

/// Column-integrated condensate path [kg / m^2] for a mass mixing ratio
/// [kg/kg] over a slab `thickness_mbar` thick.
pub fn condensate_path(thickness_mbar: f64, mixing_ratio: f64) -> f64 {
    column_air_mass(thickness_mbar) * mixing_ratio
}
