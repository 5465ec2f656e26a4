use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD, Axis, IxDyn};

use crate::error::{Plot3dError, Result};
use crate::geometry::GridDescriptor;
use crate::scalars::FreeStreamScalars;

/// One structured grid block: its extents, free-stream scalars and flow data.
///
/// `data` has shape `(extents..., nvar)`; the variable index is the last axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    descriptor: GridDescriptor,
    scalars: FreeStreamScalars,
    data: ArrayD<f64>,
}

impl Grid {
    /// Wrap decoded data. The shape of `data` must be `(extents..., nvar)`.
    pub fn new(
        descriptor: GridDescriptor,
        scalars: FreeStreamScalars,
        data: ArrayD<f64>,
    ) -> Result<Self> {
        let shape = data.shape();
        let ndim = descriptor.ndim();
        if shape.len() != ndim + 1 || &shape[..ndim] != descriptor.extents() {
            return Err(Plot3dError::InvalidExtents {
                extents: shape.to_vec(),
                reason: "data shape does not match the grid extents",
            });
        }
        Ok(Self {
            descriptor,
            scalars,
            data,
        })
    }

    /// All-zero grid with `nvar` variables.
    pub fn zeros(descriptor: GridDescriptor, scalars: FreeStreamScalars, nvar: usize) -> Self {
        let data = ArrayD::zeros(IxDyn(&descriptor.payload_shape(nvar)));
        Self {
            descriptor,
            scalars,
            data,
        }
    }

    #[inline]
    pub fn descriptor(&self) -> &GridDescriptor {
        &self.descriptor
    }

    #[inline]
    pub fn extents(&self) -> &[usize] {
        self.descriptor.extents()
    }

    #[inline]
    pub fn scalars(&self) -> &FreeStreamScalars {
        &self.scalars
    }

    pub fn set_scalars(&mut self, scalars: FreeStreamScalars) {
        self.scalars = scalars;
    }

    #[inline]
    pub fn nvar(&self) -> usize {
        self.data.shape()[self.descriptor.ndim()]
    }

    #[inline]
    pub fn npoints(&self) -> usize {
        self.descriptor.npoints()
    }

    #[inline]
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// View of variable `var` with shape `extents`, or `None` if `var >= nvar`.
    pub fn variable(&self, var: usize) -> Option<ArrayViewD<'_, f64>> {
        (var < self.nvar()).then(|| self.data.index_axis(Axis(self.descriptor.ndim()), var))
    }

    pub(crate) fn variable_mut(&mut self, var: usize) -> ArrayViewMutD<'_, f64> {
        self.data.index_axis_mut(Axis(self.descriptor.ndim()), var)
    }

    /// Value of variable `var` at point `idx` (`[i, j]` or `[i, j, k]`).
    pub fn value_at(&self, idx: &[usize], var: usize) -> Option<f64> {
        if idx.len() != self.descriptor.ndim() {
            return None;
        }
        let mut full = idx.to_vec();
        full.push(var);
        self.data.get(IxDyn(&full)).copied()
    }
}
