//! NOMADS filter CGI request URLs.

use gfs_common::{gfs_levels, CycleTime, GfsProduct, GridCell, GridResolution, Variable};

/// Default NOMADS server.
pub const DEFAULT_BASE_URL: &str = "https://nomads.ncep.noaa.gov";

/// A request for the isobaric column variables on the four grid points
/// around a site.
#[derive(Debug, Clone, PartialEq)]
pub struct NomadsRequest {
    pub base_url: String,
    pub resolution: GridResolution,
    pub cycle: CycleTime,
    pub product: GfsProduct,
    pub cell: GridCell,
}

impl NomadsRequest {
    pub fn new(cycle: CycleTime, product: GfsProduct, cell: GridCell) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            resolution: GridResolution::default(),
            cycle,
            product,
            cell,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_resolution(mut self, resolution: GridResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// GFS file name on the server, e.g. `gfs.t06z.pgrb2.0p25.f006`.
    pub fn file_name(&self) -> String {
        format!(
            "gfs.t{:02}z.pgrb2.{}.{}",
            self.cycle.cycle.hour(),
            self.resolution.code(),
            self.product
        )
    }

    /// Full CGI request URL.
    pub fn url(&self) -> String {
        let grid = self.resolution.code();
        let mut url = format!(
            "{}/cgi-bin/filter_gfs_{}_1hr.pl?",
            self.base_url.trim_end_matches('/'),
            grid
        );

        url.push_str(&format!("&file={}", self.file_name()));
        for level in gfs_levels() {
            url.push_str(&format!("&lev_{}_mb=on", level.mbar()));
        }
        for variable in Variable::ALL {
            url.push_str(&format!("&var_{}=on", variable.short_name()));
        }
        url.push_str(&format!(
            "&subregion=&leftlon={:?}&rightlon={:?}&toplat={:?}&bottomlat={:?}",
            self.cell.left_lon, self.cell.right_lon, self.cell.top_lat, self.cell.bottom_lat
        ));
        url.push_str(&format!(
            "&dir=%2Fgfs.{}%2F{:02}%2Fatmos",
            self.cycle.date_string(),
            self.cycle.cycle.hour()
        ));

        url
    }
}
