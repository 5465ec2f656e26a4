use std::io::{Read, Write};
use std::path::Path;

use ndarray::{ArrayBase, ArrayD, Data, Dimension};
use serde::Serialize;

use crate::config::{Dimensionality, Plot3dConfig};
use crate::error::{Plot3dError, Result};
use crate::geometry::GridDescriptor;
use crate::grid::Grid;
use crate::read::{read_plot3d_q, read_plot3d_q_from};
use crate::scalars::FreeStreamScalars;
use crate::write::{write_plot3d_q, write_plot3d_q_to};

/// Exportable description of one grid.
#[derive(Clone, Debug, Serialize)]
pub struct GridSummary {
    pub extents: Vec<usize>,
    pub npoints: usize,
    pub scalars: FreeStreamScalars,
}

/// Exportable description of a whole dataset, without the flow data.
#[derive(Clone, Debug, Serialize)]
pub struct DatasetSummary {
    pub dimensionality: Dimensionality,
    pub nvar: usize,
    pub grids: Vec<GridSummary>,
}

/// An ordered collection of grids sharing one dimensionality and variable count.
///
/// Starts empty. A successful [`read`](Self::read) replaces every grid at once;
/// a failed one leaves the dataset as it was.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiBlockDataset {
    dimensionality: Dimensionality,
    grids: Vec<Grid>,
}

impl Default for MultiBlockDataset {
    fn default() -> Self {
        Self::new(Dimensionality::Three)
    }
}

impl MultiBlockDataset {
    pub fn new(dimensionality: Dimensionality) -> Self {
        Self {
            dimensionality,
            grids: Vec::new(),
        }
    }

    #[inline]
    pub fn dimensionality(&self) -> Dimensionality {
        self.dimensionality
    }

    #[inline]
    pub fn nvar(&self) -> usize {
        self.dimensionality.nvar()
    }

    #[inline]
    pub fn ngrids(&self) -> usize {
        self.grids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    pub fn grid(&self, grid: usize) -> Option<&Grid> {
        self.grids.get(grid)
    }

    /// Append a zero-filled grid and return its index.
    pub fn push_grid(
        &mut self,
        descriptor: GridDescriptor,
        scalars: FreeStreamScalars,
    ) -> Result<usize> {
        if descriptor.dimensionality() != self.dimensionality {
            return Err(Plot3dError::InvalidExtents {
                extents: descriptor.extents().to_vec(),
                reason: "grid dimensionality differs from the dataset",
            });
        }
        self.grids.push(Grid::zeros(descriptor, scalars, self.nvar()));
        Ok(self.grids.len() - 1)
    }

    pub fn scalars(&self, grid: usize) -> Result<FreeStreamScalars> {
        self.grids
            .get(grid)
            .map(|g| *g.scalars())
            .ok_or(Plot3dError::GridIndex {
                grid,
                ngrids: self.grids.len(),
            })
    }

    pub fn set_scalars(&mut self, grid: usize, scalars: FreeStreamScalars) -> Result<()> {
        let ngrids = self.grids.len();
        let target = self
            .grids
            .get_mut(grid)
            .ok_or(Plot3dError::GridIndex { grid, ngrids })?;
        target.set_scalars(scalars);
        Ok(())
    }

    fn index_error(&self, grid: usize, var: usize) -> Plot3dError {
        Plot3dError::Index {
            grid,
            var,
            ngrids: self.grids.len(),
            nvar: self.nvar(),
        }
    }

    fn check_index(&self, grid: usize, var: usize) -> Result<()> {
        if grid >= self.grids.len() || var >= self.nvar() {
            return Err(self.index_error(grid, var));
        }
        Ok(())
    }

    /// Copy of variable `var` on grid `grid`, shaped like the grid's extents.
    ///
    /// The result owns its data; mutating it never touches the dataset.
    pub fn get_variable(&self, grid: usize, var: usize) -> Result<ArrayD<f64>> {
        self.grids
            .get(grid)
            .and_then(|g| g.variable(var))
            .map(|v| v.to_owned())
            .ok_or_else(|| self.index_error(grid, var))
    }

    /// Overwrite variable `var` on grid `grid` with `data`.
    ///
    /// `data` must have exactly the grid's extents as its shape.
    pub fn set_variable<S, D>(
        &mut self,
        data: &ArrayBase<S, D>,
        grid: usize,
        var: usize,
    ) -> Result<()>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        self.check_index(grid, var)?;
        let target = &mut self.grids[grid];
        if data.shape() != target.extents() {
            return Err(Plot3dError::VariableShape {
                grid,
                var,
                expected: target.extents().to_vec(),
                found: data.shape().to_vec(),
            });
        }
        target.variable_mut(var).assign(&data.view().into_dyn());
        Ok(())
    }

    /// Replace the whole dataset with the contents of the file at `path`.
    pub fn read<P: AsRef<Path>>(&mut self, path: P, config: &Plot3dConfig) -> Result<()> {
        let grids = read_plot3d_q(path, config)?;
        self.replace(grids, config);
        Ok(())
    }

    /// Like [`read`](Self::read), from any byte stream.
    pub fn read_from<R: Read>(&mut self, r: R, config: &Plot3dConfig) -> Result<()> {
        let grids = read_plot3d_q_from(r, config)?;
        self.replace(grids, config);
        Ok(())
    }

    fn replace(&mut self, grids: Vec<Grid>, config: &Plot3dConfig) {
        self.dimensionality = config.dimensionality;
        self.grids = grids;
    }

    pub fn write<P: AsRef<Path>>(&self, path: P, config: &Plot3dConfig) -> Result<()> {
        write_plot3d_q(path, &self.grids, config)
    }

    pub fn write_to<W: Write>(&self, w: W, config: &Plot3dConfig) -> Result<()> {
        write_plot3d_q_to(w, &self.grids, config)
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            dimensionality: self.dimensionality,
            nvar: self.nvar(),
            grids: self
                .grids
                .iter()
                .map(|g| GridSummary {
                    extents: g.extents().to_vec(),
                    npoints: g.npoints(),
                    scalars: *g.scalars(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3};

    fn two_d() -> MultiBlockDataset {
        let mut ds = MultiBlockDataset::new(Dimensionality::Two);
        ds.push_grid(
            GridDescriptor::new_2d(4, 3).unwrap(),
            FreeStreamScalars::new(0.5, 1.0, 1.0e5, 0.0),
        )
        .unwrap();
        ds
    }

    #[test]
    fn get_variable_returns_an_independent_copy() {
        let ds = two_d();
        let mut v = ds.get_variable(0, 1).unwrap();
        assert_eq!(v.shape(), &[4, 3]);
        v.fill(9.0);
        assert!(ds.get_variable(0, 1).unwrap().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn set_variable_writes_only_the_target_slice() {
        let mut ds = two_d();
        let data = Array2::from_shape_fn((4, 3), |(i, j)| (i + 10 * j) as f64);
        ds.set_variable(&data, 0, 2).unwrap();
        assert_eq!(ds.get_variable(0, 2).unwrap(), data.into_dyn());
        for var in [0, 1, 3] {
            assert!(ds.get_variable(0, var).unwrap().iter().all(|&x| x == 0.0));
        }
    }

    #[test]
    fn set_variable_rejects_wrong_shape() {
        let mut ds = two_d();
        let before = ds.clone();
        let transposed = Array2::<f64>::ones((3, 4));
        assert!(matches!(
            ds.set_variable(&transposed, 0, 0),
            Err(Plot3dError::VariableShape { .. })
        ));
        let too_many_axes = Array3::<f64>::ones((4, 3, 1));
        assert!(ds.set_variable(&too_many_axes, 0, 0).is_err());
        assert_eq!(ds, before);
    }

    #[test]
    fn push_grid_checks_dimensionality() {
        let mut ds = MultiBlockDataset::new(Dimensionality::Three);
        assert!(ds
            .push_grid(GridDescriptor::new_2d(2, 2).unwrap(), FreeStreamScalars::default())
            .is_err());
        assert!(ds.is_empty());
    }

    #[test]
    fn scalars_are_per_grid() {
        let mut ds = two_d();
        ds.push_grid(GridDescriptor::new_2d(2, 2).unwrap(), FreeStreamScalars::default()).unwrap();
        ds.set_scalars(1, FreeStreamScalars::new(2.0, 0.0, 3.0e6, 1.5)).unwrap();
        assert_eq!(ds.scalars(0).unwrap().mach, 0.5);
        assert_eq!(ds.scalars(1).unwrap().mach, 2.0);
        assert!(matches!(
            ds.scalars(2),
            Err(Plot3dError::GridIndex { grid: 2, ngrids: 2 })
        ));
    }
}
