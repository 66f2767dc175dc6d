//! Tests for the am layer text format.

use am_layers::{
    column_layers, CloudPath, CloudPhase, ColumnHeader, InMemoryAccessor, Layer, LayerKind,
    LayerWriter, LevelRecord, Profile, WaterVapor,
};
use chrono::NaiveDate;
use gfs_common::{
    gfs_levels, CycleTime, GfsProduct, GridCell, GridResolution, ModelCycle, PressureLevel, Site,
    Variable,
};
use test_utils::{sites, STANDARD_ATMOSPHERE};

fn header(product: GfsProduct, site: Site) -> ColumnHeader {
    ColumnHeader {
        cycle: CycleTime::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            ModelCycle::from_hour(6).unwrap(),
        ),
        product,
        site,
    }
}

fn maunakea() -> Site {
    let (lat, lon, alt) = sites::MAUNAKEA;
    Site::new(lat, lon, alt).unwrap()
}

fn render(f: impl FnOnce(&mut LayerWriter<&mut Vec<u8>>)) -> String {
    let mut buf = Vec::new();
    let mut writer = LayerWriter::new(&mut buf);
    f(&mut writer);
    String::from_utf8(buf).unwrap()
}

fn model_layer() -> Layer {
    Layer {
        kind: LayerKind::ModelLevel,
        base_pressure_mbar: 500.0,
        base_height_m: 5574.5,
        base_temperature_k: 251.92,
        ozone_vmr: Some(5e-6),
        water_vapor: WaterVapor::RelativeHumidity(45.678),
        cloud_water: Some(CloudPath {
            phase: CloudPhase::Liquid,
            kg_per_m2: 0.0123,
        }),
        cloud_ice: Some(1e-3),
    }
}

#[test]
fn test_header_text() {
    let text = render(|w| {
        w.write_header(&header(GfsProduct::forecast(6).unwrap(), maunakea()))
            .unwrap()
    });

    let expected = "
#
# Layer data below were derived from NCEP GFS model data obtained
# from the NOAA Operational Model Archive Distribution System
# (NOMADS).  See http://nomads.ncep.noaa.gov for more information.
#
#         Production date: 20240115
#                   Cycle: 06 UT
#                 Product: 006 hour forecast
#
# Interpolated to
#
#                latitude: 19.8207 deg. N
#               longitude: -155.4681 deg. E
#   Geopotential altitude: 4080.0 m
#

";
    assert_eq!(text, expected);
}

#[test]
fn test_header_for_analysis() {
    let site = Site::new(-23.0, 0.5, 5000.0).unwrap();
    let text = render(|w| w.write_header(&header(GfsProduct::Analysis, site)).unwrap());

    assert!(text.contains("#                 Product: analysis\n"));
    assert!(text.contains("#                latitude: -23.0 deg. N\n"));
    assert!(text.contains("#               longitude: 0.5 deg. E\n"));
    assert!(text.contains("#   Geopotential altitude: 5000.0 m\n"));
}

#[test]
fn test_model_layer_text() {
    let text = render(|w| w.write_layer(&model_layer()).unwrap());

    let expected = "\
layer
Pbase 500.0 mbar  # 5574.5 m
Tbase 251.9 K
column dry_air vmr
column o3 vmr 5.000e-06
column h2o RH 45.68%
column lwp_abs_Rayleigh 1.230e-02 kg*m^-2
column iwp_abs_Rayleigh 1.000e-03 kg*m^-2

";
    assert_eq!(text, expected);
}

#[test]
fn test_layer_with_two_ice_lines() {
    let layer = Layer {
        water_vapor: WaterVapor::RelativeHumidityOverIce(80.0),
        cloud_water: Some(CloudPath {
            phase: CloudPhase::Ice,
            kg_per_m2: 2e-4,
        }),
        ..model_layer()
    };
    let text = render(|w| w.write_layer(&layer).unwrap());

    assert!(text.contains("column h2o RHi 80.00%\n"));
    assert_eq!(text.matches("column iwp_abs_Rayleigh").count(), 2);
    assert!(text.contains("column iwp_abs_Rayleigh 2.000e-04 kg*m^-2\n"));
    assert!(!text.contains("lwp_abs_Rayleigh"));
}

#[test]
fn test_stratospheric_layer_text() {
    let layer = Layer {
        kind: LayerKind::ModelLevel,
        base_pressure_mbar: 1.0,
        base_height_m: 47821.0,
        base_temperature_k: 270.66,
        ozone_vmr: None,
        water_vapor: WaterVapor::VolumeMixingRatio(5e-6),
        cloud_water: None,
        cloud_ice: None,
    };
    let text = render(|w| w.write_layer(&layer).unwrap());

    let expected = "\
layer
Pbase 1.0 mbar  # 47821.0 m
Tbase 270.7 K
column dry_air vmr
column h2o vmr 5.000e-06

";
    assert_eq!(text, expected);
}

#[test]
fn test_site_base_layer_has_no_trailing_blank_line() {
    let layer = Layer {
        kind: LayerKind::SiteBase,
        cloud_water: None,
        cloud_ice: None,
        ..model_layer()
    };
    let text = render(|w| w.write_layer(&layer).unwrap());
    assert!(text.ends_with("column h2o RH 45.68%\n"));
}

// =============================================================================
// Whole columns
// =============================================================================

fn standard_accessor() -> InMemoryAccessor {
    STANDARD_ATMOSPHERE
        .iter()
        .fold(InMemoryAccessor::new(), |acc, std| {
            let level = PressureLevel::from_mbar(std.pressure_mbar as u32);
            acc.with_uniform(Variable::GeopotentialHeight, level, std.height_m)
                .with_uniform(Variable::Temperature, level, std.temperature_k)
        })
}

fn run_column(site: Site) -> String {
    let cell = GridCell::bracketing(site.latitude, site.longitude, &GridResolution::default());
    let offsets = cell.offsets(site.latitude, site.longitude);
    let profile = Profile::build(&standard_accessor(), gfs_levels(), offsets).unwrap();
    let layers = column_layers(&profile, site.altitude_m).unwrap();

    render(|w| {
        let count = w
            .write_column(&header(GfsProduct::Analysis, site), layers)
            .unwrap();
        assert!(count > 0);
    })
}

#[test]
fn test_column_output_is_identical_across_runs() {
    assert_eq!(run_column(maunakea()), run_column(maunakea()));
}

#[test]
fn test_column_ends_with_site_base_layer() {
    let text = run_column(maunakea());
    assert!(text.starts_with("\n#\n"));
    assert_eq!(text.matches("layer\n").count(), 22);
    assert!(text.contains("mbar  # 4080.0 m\n"));
    assert!(!text.ends_with("\n\n"));
}

#[test]
fn test_exact_match_column_ends_with_blank_line() {
    let profile = Profile::from_records(vec![
        LevelRecord {
            height_m: Some(5500.0),
            temperature_k: Some(250.0),
            ..LevelRecord::empty(PressureLevel::from_mbar(500))
        },
        LevelRecord {
            height_m: Some(3000.0),
            temperature_k: Some(265.0),
            ..LevelRecord::empty(PressureLevel::from_mbar(700))
        },
    ])
    .unwrap();
    let site = Site::new(19.8, -155.5, 3000.0).unwrap();
    let layers = column_layers(&profile, site.altitude_m).unwrap();

    let text = render(|w| {
        w.write_column(&header(GfsProduct::Analysis, site), layers)
            .unwrap();
    });
    assert!(text.ends_with("column h2o RH 0.00%\n\n"));
    assert_eq!(text.matches("layer\n").count(), 2);
}
