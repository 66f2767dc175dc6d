//! GFS variables used to build an atmospheric column.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A model variable defined on isobaric levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    /// Cloud liquid water mass mixing ratio [kg/kg]
    CloudMixingRatio,
    /// Cloud ice mass mixing ratio [kg/kg]
    IceMixingRatio,
    /// Geopotential height [m]
    GeopotentialHeight,
    /// Ozone mass mixing ratio [kg/kg]
    OzoneMixingRatio,
    /// Relative humidity [%]
    RelativeHumidity,
    /// Temperature [K]
    Temperature,
}

impl Variable {
    /// All variables, in NOMADS request order.
    pub const ALL: [Variable; 6] = [
        Variable::CloudMixingRatio,
        Variable::IceMixingRatio,
        Variable::GeopotentialHeight,
        Variable::OzoneMixingRatio,
        Variable::RelativeHumidity,
        Variable::Temperature,
    ];

    /// GRIB2 short name, as used by the NOMADS filter CGI.
    pub fn short_name(&self) -> &'static str {
        match self {
            Variable::CloudMixingRatio => "CLWMR",
            Variable::IceMixingRatio => "ICMR",
            Variable::GeopotentialHeight => "HGT",
            Variable::OzoneMixingRatio => "O3MR",
            Variable::RelativeHumidity => "RH",
            Variable::Temperature => "TMP",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Variable::CloudMixingRatio => "Cloud mixing ratio",
            Variable::IceMixingRatio => "Ice water mixing ratio",
            Variable::GeopotentialHeight => "Geopotential height",
            Variable::OzoneMixingRatio => "Ozone mixing ratio",
            Variable::RelativeHumidity => "Relative humidity",
            Variable::Temperature => "Temperature",
        }
    }

    /// Height and temperature must be present for a level to be usable;
    /// the others fall back to zero.
    pub fn is_required(&self) -> bool {
        matches!(self, Variable::GeopotentialHeight | Variable::Temperature)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
