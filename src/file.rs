use std::path::Path;

use ndarray::{ArrayBase, ArrayD, Data, Dimension};

use crate::config::Plot3dConfig;
use crate::dataset::MultiBlockDataset;
use crate::error::Result;
use crate::scalars::FreeStreamScalars;

/// A PLOT3D function file bound to one fixed layout configuration.
///
/// ```no_run
/// use plot3d_q::{Plot3dConfig, Plot3dFile};
///
/// # fn main() -> plot3d_q::Result<()> {
/// let mut p3d = Plot3dFile::new(Plot3dConfig::default());
/// p3d.read_file("RocFlo-CM.00040000.q")?;
///
/// let mut energy = p3d.get_var(0, 4)?;
/// energy.fill(1.0);
/// p3d.set_var(&energy, 0, 4)?;
/// p3d.write_file("out.q")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Plot3dFile {
    config: Plot3dConfig,
    dataset: MultiBlockDataset,
}

impl Plot3dFile {
    pub fn new(config: Plot3dConfig) -> Self {
        Self {
            config,
            dataset: MultiBlockDataset::new(config.dimensionality),
        }
    }

    pub fn config(&self) -> &Plot3dConfig {
        &self.config
    }

    pub fn dataset(&self) -> &MultiBlockDataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> MultiBlockDataset {
        self.dataset
    }

    pub fn read_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.dataset.read(path, &self.config)
    }

    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.dataset.write(path, &self.config)
    }

    pub fn get_var(&self, grid: usize, var: usize) -> Result<ArrayD<f64>> {
        self.dataset.get_variable(grid, var)
    }

    pub fn set_var<S, D>(&mut self, data: &ArrayBase<S, D>, grid: usize, var: usize) -> Result<()>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        self.dataset.set_variable(data, grid, var)
    }

    pub fn set_scalars(&mut self, grid: usize, scalars: FreeStreamScalars) -> Result<()> {
        self.dataset.set_scalars(grid, scalars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Dimensionality;
    use crate::geometry::GridDescriptor;

    #[test]
    fn dataset_always_follows_the_file_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facade.q");
        let config = Plot3dConfig::default().with_dimensionality(Dimensionality::Two);

        let mut source = MultiBlockDataset::new(Dimensionality::Two);
        let descriptor = GridDescriptor::new_2d(4, 3).unwrap();
        source.push_grid(descriptor, FreeStreamScalars::default()).unwrap();
        source.write(&path, &config).unwrap();

        let mut p3d = Plot3dFile::new(config);
        assert_eq!(p3d.dataset().dimensionality(), Dimensionality::Two);
        p3d.read_file(&path).unwrap();
        p3d.set_scalars(0, FreeStreamScalars::new(0.75, 2.0, 1.0e6, 3.0)).unwrap();
        p3d.write_file(&path).unwrap();

        p3d.read_file(&path).unwrap();
        assert_eq!(p3d.dataset().dimensionality(), p3d.config().dimensionality);
        assert_eq!(p3d.dataset().scalars(0).unwrap().mach, 0.75);
        assert!(p3d.set_scalars(1, FreeStreamScalars::default()).is_err());
    }
}
