//! Synthetic GRIB2 messages for gfs-grib tests.
//!
//! Messages use a regular lat/lon grid (template 3.0), an analysis or
//! forecast at a horizontal level (template 4.0) and simple packing
//! (template 5.0) without a bitmap.

#![allow(dead_code)]

use gfs_common::{PressureLevel, Variable};
use gfs_grib::tables::PARAMETERS;

/// Builds one GRIB2 message.
pub struct Grib2Builder {
    discipline: u8,
    // Grid definition, scanning mode 0 (west to east, north to south)
    ni: u32,
    nj: u32,
    north_lat: f64,
    west_lon: f64,
    spacing: f64,
    // Product definition
    param_category: u8,
    param_number: u8,
    surface_type: u8,
    surface_value: u32,
    // Data, in scan order
    data_values: Vec<f32>,
}

impl Grib2Builder {
    /// A 2x2 field around the Maunakea grid cell (19.75..20.0 N,
    /// 204.5..204.75 E).
    pub fn isobaric(variable: Variable, level: PressureLevel) -> Self {
        let (_, param_category, param_number) = *PARAMETERS
            .iter()
            .find(|e| e.0 == variable)
            .unwrap();
        Self {
            discipline: 0,
            ni: 2,
            nj: 2,
            north_lat: 20.0,
            west_lon: 204.5,
            spacing: 0.25,
            param_category,
            param_number,
            surface_type: 100,
            surface_value: level.mbar() * 100,
            data_values: vec![0.0; 4],
        }
    }

    pub fn with_discipline(mut self, discipline: u8) -> Self {
        self.discipline = discipline;
        self
    }

    pub fn with_grid(mut self, north_lat: f64, west_lon: f64, ni: u32, nj: u32) -> Self {
        self.north_lat = north_lat;
        self.west_lon = west_lon;
        self.ni = ni;
        self.nj = nj;
        self.data_values = vec![0.0; (ni * nj) as usize];
        self
    }

    pub fn with_surface(mut self, surface_type: u8, value: u32) -> Self {
        self.surface_type = surface_type;
        self.surface_value = value;
        self
    }

    pub fn with_constant_value(mut self, value: f32) -> Self {
        self.data_values = vec![value; (self.ni * self.nj) as usize];
        self
    }

    /// Values in scan order: north row first, west to east.
    pub fn with_data(mut self, data: Vec<f32>) -> Self {
        self.data_values = data;
        self
    }

    /// Build the complete GRIB2 message bytes
    pub fn build(&self) -> Vec<u8> {
        let section1 = self.build_section1();
        let section3 = self.build_section3();
        let section4 = self.build_section4();
        let section5 = self.build_section5();
        let section6 = self.build_section6();
        let section7 = self.build_section7();

        let message_length = 16
            + section1.len()
            + section3.len()
            + section4.len()
            + section5.len()
            + section6.len()
            + section7.len()
            + 4;

        let mut message = Vec::with_capacity(message_length);
        message.extend_from_slice(b"GRIB");
        message.extend_from_slice(&[0, 0]);
        message.push(self.discipline);
        message.push(2);
        message.extend_from_slice(&(message_length as u64).to_be_bytes());

        message.extend_from_slice(&section1);
        message.extend_from_slice(&section3);
        message.extend_from_slice(&section4);
        message.extend_from_slice(&section5);
        message.extend_from_slice(&section6);
        message.extend_from_slice(&section7);
        message.extend_from_slice(b"7777");

        message
    }

    fn build_section1(&self) -> Vec<u8> {
        let mut section = Vec::new();
        section.extend_from_slice(&21u32.to_be_bytes());
        section.push(1);

        section.extend_from_slice(&7u16.to_be_bytes()); // NCEP
        section.extend_from_slice(&0u16.to_be_bytes());
        section.push(2);
        section.push(1);
        section.push(1);

        section.extend_from_slice(&2024u16.to_be_bytes());
        section.push(1);
        section.push(15);
        section.push(6);
        section.push(0);
        section.push(0);

        section.push(0);
        section.push(1);
        section
    }

    fn build_section3(&self) -> Vec<u8> {
        let mut section = Vec::new();
        section.extend_from_slice(&72u32.to_be_bytes());
        section.push(3);

        section.push(0);
        section.extend_from_slice(&(self.ni * self.nj).to_be_bytes());
        section.push(0);
        section.push(0);
        section.extend_from_slice(&0u16.to_be_bytes()); // template 3.0

        section.push(6); // spherical earth, radius 6371229 m
        section.push(0);
        section.extend_from_slice(&0u32.to_be_bytes());
        section.push(0);
        section.extend_from_slice(&0u32.to_be_bytes());
        section.push(0);
        section.extend_from_slice(&0u32.to_be_bytes());

        section.extend_from_slice(&self.ni.to_be_bytes());
        section.extend_from_slice(&self.nj.to_be_bytes());
        section.extend_from_slice(&0u32.to_be_bytes());
        section.extend_from_slice(&0xFFFFFFFFu32.to_be_bytes());

        let south_lat = self.north_lat - self.spacing * (self.nj - 1) as f64;
        let east_lon = self.west_lon + self.spacing * (self.ni - 1) as f64;

        section.extend_from_slice(&grib_i32(micro(self.north_lat)));
        section.extend_from_slice(&grib_i32(micro(self.west_lon)));
        section.push(48);
        section.extend_from_slice(&grib_i32(micro(south_lat)));
        section.extend_from_slice(&grib_i32(micro(east_lon)));
        section.extend_from_slice(&(micro(self.spacing) as u32).to_be_bytes());
        section.extend_from_slice(&(micro(self.spacing) as u32).to_be_bytes());
        section.push(0); // scanning mode 0
        section
    }

    fn build_section4(&self) -> Vec<u8> {
        let mut section = Vec::new();
        section.extend_from_slice(&34u32.to_be_bytes());
        section.push(4);

        section.extend_from_slice(&0u16.to_be_bytes());
        section.extend_from_slice(&0u16.to_be_bytes()); // template 4.0

        section.push(self.param_category);
        section.push(self.param_number);
        section.push(2);
        section.push(0);
        section.push(96); // GFS
        section.extend_from_slice(&0u16.to_be_bytes());
        section.push(0);
        section.push(1);
        section.extend_from_slice(&0u32.to_be_bytes());

        section.push(self.surface_type);
        section.push(0);
        section.extend_from_slice(&self.surface_value.to_be_bytes());

        section.push(255);
        section.push(0);
        section.extend_from_slice(&0u32.to_be_bytes());
        section
    }

    fn packing(&self) -> (f32, i16, u8) {
        let (min_val, max_val) = self.data_values.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY),
            |(min, max), &v| (min.min(v), max.max(v)),
        );
        let range = max_val - min_val;
        if range == 0.0 {
            (min_val, 0, 0)
        } else {
            // value = reference + packed * 2^E, packed fits in 16 bits
            let binary_scale_factor = (range / 65535.0).log2().ceil() as i16;
            (min_val, binary_scale_factor, 16)
        }
    }

    fn build_section5(&self) -> Vec<u8> {
        let (reference_value, binary_scale_factor, bits_per_value) = self.packing();

        let mut section = Vec::new();
        section.extend_from_slice(&21u32.to_be_bytes());
        section.push(5);

        section.extend_from_slice(&(self.ni * self.nj).to_be_bytes());
        section.extend_from_slice(&0u16.to_be_bytes()); // template 5.0

        section.extend_from_slice(&reference_value.to_be_bytes());
        section.extend_from_slice(&grib_i16(binary_scale_factor));
        section.extend_from_slice(&grib_i16(0));
        section.push(bits_per_value);
        section.push(0);
        section
    }

    fn build_section6(&self) -> Vec<u8> {
        let mut section = Vec::new();
        section.extend_from_slice(&6u32.to_be_bytes());
        section.push(6);
        section.push(255); // no bitmap
        section
    }

    fn build_section7(&self) -> Vec<u8> {
        let packed = self.pack_simple();
        let mut section = Vec::new();
        section.extend_from_slice(&(5 + packed.len() as u32).to_be_bytes());
        section.push(7);
        section.extend_from_slice(&packed);
        section
    }

    fn pack_simple(&self) -> Vec<u8> {
        let (reference_value, binary_scale_factor, bits_per_value) = self.packing();
        if bits_per_value == 0 {
            return Vec::new();
        }

        let binary_scale = 2.0_f32.powi(binary_scale_factor as i32);
        self.data_values
            .iter()
            .flat_map(|&v| {
                (((v - reference_value) / binary_scale).round() as u16).to_be_bytes()
            })
            .collect()
    }
}

/// Concatenate messages into one file body.
pub fn concat(messages: &[Vec<u8>]) -> Vec<u8> {
    messages.concat()
}

fn micro(deg: f64) -> i32 {
    (deg * 1e6).round() as i32
}

/// GRIB2 signed integers are sign and magnitude, not two's complement.
fn grib_i32(v: i32) -> [u8; 4] {
    let magnitude = v.unsigned_abs();
    let raw = if v < 0 { magnitude | 0x8000_0000 } else { magnitude };
    raw.to_be_bytes()
}

fn grib_i16(v: i16) -> [u8; 2] {
    let magnitude = v.unsigned_abs();
    let raw = if v < 0 { magnitude | 0x8000 } else { magnitude };
    raw.to_be_bytes()
}
