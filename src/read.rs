use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::config::Plot3dConfig;
use crate::error::Result;
use crate::geometry::{decode_dims, decode_header};
use crate::grid::Grid;
use crate::payload::decode_payload;
use crate::record::RecordReader;
use crate::scalars::decode_scalars;

/// Read every grid of a PLOT3D function file.
///
/// The file is opened for the duration of the call and closed on every exit
/// path. Nothing is returned unless the whole file decodes.
pub fn read_plot3d_q<P: AsRef<Path>>(path: P, config: &Plot3dConfig) -> Result<Vec<Grid>> {
    let path = path.as_ref();
    let f = File::open(path)?;
    let grids = read_plot3d_q_from(BufReader::new(f), config)?;
    log::info!("read {} grids from {}", grids.len(), path.display());
    Ok(grids)
}

/// Read every grid from `r`: grid count, dims, then per grid scalars and payload.
pub fn read_plot3d_q_from<R: Read>(r: R, config: &Plot3dConfig) -> Result<Vec<Grid>> {
    let mut reader = RecordReader::new(r, config.endian, config.header_width);
    let nvar = config.nvar();

    let ngrids = decode_header(&mut reader)?;
    let dims = decode_dims(&mut reader, ngrids, config.dimensionality)?;

    let mut grids = Vec::with_capacity(dims.len());
    for (g, descriptor) in dims.into_iter().enumerate() {
        let scalars = decode_scalars(&mut reader, g, config.precision)?;
        let data = decode_payload(&mut reader, g, &descriptor, nvar, config.precision)?;
        log::debug!("grid {g}: extents {:?}, {scalars:?}", descriptor.extents());
        grids.push(Grid::new(descriptor, scalars, data)?);
    }
    Ok(grids)
}
