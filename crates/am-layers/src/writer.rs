//! am layer text output.

use std::io::{self, Write};

use gfs_common::{CycleTime, GfsProduct, Site};

use crate::layers::{CloudPhase, Layer, LayerKind, WaterVapor};

/// Provenance written as a comment block above the layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnHeader {
    pub cycle: CycleTime,
    pub product: GfsProduct,
    pub site: Site,
}

/// Writes am layer descriptions.
pub struct LayerWriter<W: Write> {
    out: W,
}

impl<W: Write> LayerWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn write_header(&mut self, header: &ColumnHeader) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out)?;
        writeln!(out, "#")?;
        writeln!(
            out,
            "# Layer data below were derived from NCEP GFS model data obtained"
        )?;
        writeln!(
            out,
            "# from the NOAA Operational Model Archive Distribution System"
        )?;
        writeln!(
            out,
            "# (NOMADS).  See http://nomads.ncep.noaa.gov for more information."
        )?;
        writeln!(out, "#")?;
        writeln!(out, "#         Production date: {}", header.cycle.date_string())?;
        writeln!(out, "#                   Cycle: {:02} UT", header.cycle.cycle.hour())?;
        writeln!(out, "#                 Product: {}", header.product.description())?;
        writeln!(out, "#")?;
        writeln!(out, "# Interpolated to")?;
        writeln!(out, "#")?;
        writeln!(
            out,
            "#                latitude: {} deg. N",
            float_repr(header.site.latitude)
        )?;
        writeln!(
            out,
            "#               longitude: {} deg. E",
            float_repr(header.site.longitude)
        )?;
        writeln!(
            out,
            "#   Geopotential altitude: {} m",
            float_repr(header.site.altitude_m)
        )?;
        writeln!(out, "#")?;
        writeln!(out)
    }

    /// Write one layer. Layers based on model levels are followed by a
    /// blank line; the site base layer closes the column without one.
    pub fn write_layer(&mut self, layer: &Layer) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out, "layer")?;
        writeln!(
            out,
            "Pbase {:.1} mbar  # {:.1} m",
            layer.base_pressure_mbar, layer.base_height_m
        )?;
        writeln!(out, "Tbase {:.1} K", layer.base_temperature_k)?;
        writeln!(out, "column dry_air vmr")?;

        if let Some(vmr) = layer.ozone_vmr {
            writeln!(out, "column o3 vmr {}", sci(vmr))?;
        }

        match layer.water_vapor {
            WaterVapor::RelativeHumidity(rh) => writeln!(out, "column h2o RH {:.2}%", rh)?,
            WaterVapor::RelativeHumidityOverIce(rh) => {
                writeln!(out, "column h2o RHi {:.2}%", rh)?
            }
            WaterVapor::VolumeMixingRatio(vmr) => writeln!(out, "column h2o vmr {}", sci(vmr))?,
        }

        if let Some(path) = layer.cloud_water {
            let species = match path.phase {
                CloudPhase::Liquid => "lwp_abs_Rayleigh",
                CloudPhase::Ice => "iwp_abs_Rayleigh",
            };
            writeln!(out, "column {} {} kg*m^-2", species, sci(path.kg_per_m2))?;
        }
        if let Some(path) = layer.cloud_ice {
            writeln!(out, "column iwp_abs_Rayleigh {} kg*m^-2", sci(path))?;
        }

        if layer.kind == LayerKind::ModelLevel {
            writeln!(out)?;
        }
        Ok(())
    }

    /// Header followed by every layer. Returns the number of layers written.
    pub fn write_column<I>(&mut self, header: &ColumnHeader, layers: I) -> io::Result<usize>
    where
        I: IntoIterator<Item = Layer>,
    {
        self.write_header(header)?;
        let mut count = 0;
        for layer in layers {
            self.write_layer(&layer)?;
            count += 1;
        }
        self.out.flush()?;
        Ok(count)
    }
}

/// Scientific notation with three decimals and a signed two-digit exponent,
/// e.g. `5.000e-06`.
pub fn sci(value: f64) -> String {
    with_padded_exponent(format!("{:.3e}", value))
}

/// Shortest round-trip decimal form of a float; integral values keep a
/// trailing `.0`, very small or large magnitudes use an exponent
/// (`1e-05`, `1e+16`).
pub fn float_repr(value: f64) -> String {
    with_padded_exponent(format!("{:?}", value))
}

fn with_padded_exponent(formatted: String) -> String {
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent.trim_start_matches('+')),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}
