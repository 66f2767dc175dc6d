//! GRIB2 codes for the GFS column variables.
//!
//! Only isobaric fields from the meteorological discipline are of interest;
//! everything else in a subset is ignored.

use gfs_common::{PressureLevel, Variable};

/// GRIB2 discipline 0: meteorological products.
pub const METEOROLOGICAL_DISCIPLINE: u8 = 0;

/// Fixed surface type 100: isobaric surface, value in Pa.
pub const ISOBARIC_SURFACE: u8 = 100;

/// (category, number) within discipline 0 for each variable (WMO code
/// table 4.2, with NCEP local entries for ozone).
pub const PARAMETERS: [(Variable, u8, u8); 6] = [
    (Variable::GeopotentialHeight, 3, 5),
    (Variable::Temperature, 0, 0),
    (Variable::OzoneMixingRatio, 14, 192),
    (Variable::RelativeHumidity, 1, 1),
    (Variable::CloudMixingRatio, 1, 22),
    (Variable::IceMixingRatio, 1, 23),
];

/// Variable for a discipline-0 (category, number) pair.
pub fn variable_for(category: u8, number: u8) -> Option<Variable> {
    PARAMETERS
        .iter()
        .find(|&&(_, c, n)| c == category && n == number)
        .map(|&(variable, _, _)| variable)
}

/// Identify a product from its GRIB2 codes.
///
/// `surface` is the type and value of the first fixed surface.
pub fn identify(
    discipline: u8,
    category: Option<u8>,
    number: Option<u8>,
    surface: Option<(u8, f64)>,
) -> Option<(Variable, PressureLevel)> {
    if discipline != METEOROLOGICAL_DISCIPLINE {
        return None;
    }
    let variable = variable_for(category?, number?)?;
    match surface? {
        (ISOBARIC_SURFACE, pascals) => Some((variable, PressureLevel::from_pascals(pascals)?)),
        _ => None,
    }
}
