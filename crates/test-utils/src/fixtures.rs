//! Common test fixtures for GFS column tests.
//!
//! Values follow the 1976 US Standard Atmosphere evaluated at the GFS
//! isobaric levels, so layer and extrapolation tests work on a physically
//! plausible column.

/// One level of the standard atmosphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardLevel {
    pub pressure_mbar: f64,
    pub height_m: f64,
    pub temperature_k: f64,
}

const fn level(pressure_mbar: f64, height_m: f64, temperature_k: f64) -> StandardLevel {
    StandardLevel {
        pressure_mbar,
        height_m,
        temperature_k,
    }
}

/// Standard atmosphere at the 31 GFS levels, top of atmosphere first.
pub const STANDARD_ATMOSPHERE: [StandardLevel; 31] = [
    level(1.0, 47821.0, 270.65),
    level(2.0, 42440.6, 257.88),
    level(3.0, 39430.2, 249.45),
    level(5.0, 35777.2, 239.23),
    level(7.0, 33453.2, 232.72),
    level(10.0, 31055.2, 227.71),
    level(20.0, 26481.7, 223.13),
    level(30.0, 23849.0, 220.50),
    level(50.0, 20576.5, 217.23),
    level(70.0, 18441.9, 216.65),
    level(100.0, 16180.0, 216.65),
    level(150.0, 13608.6, 216.65),
    level(200.0, 11784.2, 216.65),
    level(250.0, 10363.1, 220.79),
    level(300.0, 9164.1, 228.58),
    level(350.0, 8117.4, 235.39),
    level(400.0, 7185.5, 241.44),
    level(450.0, 6343.7, 246.92),
    level(500.0, 5574.5, 251.92),
    level(550.0, 4865.3, 256.53),
    level(600.0, 4206.5, 260.81),
    level(650.0, 3590.7, 264.81),
    level(700.0, 3012.2, 268.57),
    level(750.0, 2466.3, 272.12),
    level(800.0, 1949.0, 275.48),
    level(850.0, 1457.3, 278.68),
    level(900.0, 988.5, 281.72),
    level(925.0, 762.0, 283.20),
    level(950.0, 540.3, 284.64),
    level(975.0, 323.4, 286.05),
    level(1000.0, 110.9, 287.43),
];

/// Look up the standard level for a pressure in mbar.
pub fn standard_level(pressure_mbar: f64) -> Option<StandardLevel> {
    STANDARD_ATMOSPHERE
        .iter()
        .copied()
        .find(|l| l.pressure_mbar == pressure_mbar)
}

/// Ozone mass mixing ratio [kg/kg] peaking near 10 mbar.
pub fn ozone_mmr(pressure_mbar: f64) -> f64 {
    let x = (pressure_mbar / 10.0).ln();
    1.6e-5 * (-0.5 * x * x).exp()
}

/// Relative humidity [%] increasing towards the surface.
pub fn relative_humidity(pressure_mbar: f64) -> f64 {
    (10.0 + 70.0 * pressure_mbar / 1000.0).min(100.0)
}

/// Common observing sites.
pub mod sites {
    /// Maunakea summit region (lat, lon, altitude)
    pub const MAUNAKEA: (f64, f64, f64) = (19.8207, -155.4681, 4080.0);

    /// Chajnantor plateau
    pub const CHAJNANTOR: (f64, f64, f64) = (-23.0293, -67.7549, 5080.0);

    /// South Pole station
    pub const SOUTH_POLE: (f64, f64, f64) = (-89.99, -45.0, 2835.0);

    /// Dead Sea shore, below the lowest model level
    pub const DEAD_SEA: (f64, f64, f64) = (31.5, 35.5, -430.0);
}

/// Common time and cycle values for testing.
pub mod time {
    /// Production date used by most tests
    pub const CYCLE_DATE: &str = "20240115";

    /// GFS cycle hours
    pub const GFS_CYCLES: [u32; 4] = [0, 6, 12, 18];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_atmosphere_is_top_down() {
        assert!(STANDARD_ATMOSPHERE
            .windows(2)
            .all(|w| w[0].pressure_mbar < w[1].pressure_mbar && w[0].height_m > w[1].height_m));
    }

    #[test]
    fn test_standard_level_lookup() {
        let l = standard_level(500.0).unwrap();
        assert_eq!(l.height_m, 5574.5);
        assert!(standard_level(501.0).is_none());
    }

    #[test]
    fn test_ozone_peaks_at_ten_mbar() {
        assert!(ozone_mmr(10.0) > ozone_mmr(1.0));
        assert!(ozone_mmr(10.0) > ozone_mmr(100.0));
        assert_eq!(ozone_mmr(10.0), 1.6e-5);
    }
}
