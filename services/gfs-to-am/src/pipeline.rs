//! Grid accessor to am layer text.

use std::io::Write;

use am_layers::{column_layers, ColumnHeader, GridAccessor, LayerWriter, Profile};
use anyhow::{Context, Result};
use gfs_common::{gfs_levels, CycleTime, GfsProduct, GridCell, Site};
use tracing::{info, instrument};

/// Everything that identifies one output column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRequest {
    pub site: Site,
    pub cycle: CycleTime,
    pub product: GfsProduct,
    pub cell: GridCell,
}

/// Interpolate the column and write it to `out`.
///
/// The column walk is validated before the header is written, so nothing
/// reaches `out` when the site cannot be served.
#[instrument(skip_all, fields(cycle = %request.cycle, product = %request.product))]
pub fn write_site_column<A, W>(accessor: &A, request: &ColumnRequest, out: W) -> Result<usize>
where
    A: GridAccessor,
    W: Write,
{
    let site = &request.site;
    let offsets = request.cell.offsets(site.latitude, site.longitude);

    let profile = Profile::build(accessor, gfs_levels(), offsets)
        .context("Failed to build level profile")?;
    let layers = column_layers(&profile, site.altitude_m)?;

    let header = ColumnHeader {
        cycle: request.cycle,
        product: request.product,
        site: *site,
    };
    let count = LayerWriter::new(out)
        .write_column(&header, layers)
        .context("Failed to write layer data")?;

    info!(layers = count, "Wrote am layers");
    Ok(count)
}
