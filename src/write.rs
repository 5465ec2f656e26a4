use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::Plot3dConfig;
use crate::error::{Plot3dError, Result};
use crate::geometry::{encode_dims, encode_header, GridDescriptor};
use crate::grid::Grid;
use crate::payload::encode_payload;
use crate::record::RecordWriter;
use crate::scalars::encode_scalars;

/// Write `grids` as a PLOT3D function file, replacing any file at `path`.
pub fn write_plot3d_q<P: AsRef<Path>>(
    path: P,
    grids: &[Grid],
    config: &Plot3dConfig,
) -> Result<()> {
    let path = path.as_ref();
    check_grids(grids, config)?;
    let f = File::create(path)?;
    write_plot3d_q_to(BufWriter::new(f), grids, config)?;
    log::info!("wrote {} grids to {}", grids.len(), path.display());
    Ok(())
}

/// Inverse of [`crate::read::read_plot3d_q_from`].
pub fn write_plot3d_q_to<W: Write>(w: W, grids: &[Grid], config: &Plot3dConfig) -> Result<()> {
    check_grids(grids, config)?;
    let mut writer = RecordWriter::new(w, config.endian, config.header_width);

    encode_header(&mut writer, grids.len())?;
    let dims: Vec<GridDescriptor> = grids.iter().map(|g| g.descriptor().clone()).collect();
    encode_dims(&mut writer, &dims)?;

    for (g, grid) in grids.iter().enumerate() {
        encode_scalars(&mut writer, grid.scalars(), config.precision)?;
        encode_payload(&mut writer, grid.data(), config.precision)?;
        log::debug!("grid {g}: wrote {} values", grid.data().len());
    }
    writer.flush()
}

fn check_grids(grids: &[Grid], config: &Plot3dConfig) -> Result<()> {
    let mismatch = |reason: String| Plot3dError::ConfigurationMismatch {
        record: 0,
        offset: 0,
        reason,
    };
    if grids.is_empty() {
        return Err(mismatch("a file needs at least one grid".into()));
    }
    for (g, grid) in grids.iter().enumerate() {
        if grid.descriptor().dimensionality() != config.dimensionality
            || grid.nvar() != config.nvar()
        {
            return Err(mismatch(format!(
                "grid {g} is {}-D with {} variables, config expects {}-D with {}",
                grid.descriptor().ndim(),
                grid.nvar(),
                config.dimensionality.ndim(),
                config.nvar()
            )));
        }
    }
    Ok(())
}
