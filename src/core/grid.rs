// Copyright @yucwang 2026

use crate::core::error::ProjectionError;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector2f};
use nalgebra::{DMatrix, Scalar};

/// Numeric cell types a grid can hold. Every value is widened to `Float`
/// before it is weighted.
pub trait CellValue: Scalar + Copy + Into<Float> {}

impl<T: Scalar + Copy + Into<Float>> CellValue for T {}

/// Immutable 2D object sampled on unit cells. Cell `(ix, iy)` covers
/// `[ix, ix + 1) x [iy, iy + 1)`; the matrix has `sx` rows and `sy` columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: CellValue = Float> {
    data: DMatrix<T>,
}

impl<T: CellValue> Grid<T> {
    pub fn from_matrix(data: DMatrix<T>) -> Result<Self, ProjectionError> {
        check_shape(data.nrows(), data.ncols())?;
        log::debug!("grid created: {}x{}", data.nrows(), data.ncols());
        Ok(Self { data })
    }

    /// `values` lists cells row by row: all of `ix = 0` first, `iy` fastest.
    pub fn from_row_slice(sx: usize, sy: usize, values: &[T]) -> Result<Self, ProjectionError> {
        check_shape(sx, sy)?;
        let expected = sx
            .checked_mul(sy)
            .ok_or_else(|| ProjectionError::InvalidArgument("grid dimensions overflow".to_string()))?;
        if values.len() != expected {
            return Err(ProjectionError::InvalidArgument(format!(
                "expected {} cell values for a {}x{} grid, got {}",
                expected, sx, sy, values.len()
            )));
        }
        Self::from_matrix(DMatrix::from_row_slice(sx, sy, values))
    }

    pub fn from_fn<F>(sx: usize, sy: usize, f: F) -> Result<Self, ProjectionError>
    where
        F: FnMut(usize, usize) -> T,
    {
        check_shape(sx, sy)?;
        Self::from_matrix(DMatrix::from_fn(sx, sy, f))
    }

    pub fn uniform(sx: usize, sy: usize, value: T) -> Result<Self, ProjectionError> {
        check_shape(sx, sy)?;
        Self::from_matrix(DMatrix::from_element(sx, sy, value))
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.data.nrows(), self.data.ncols())
    }

    pub fn get(&self, ix: usize, iy: usize) -> Option<T> {
        self.data.get((ix, iy)).copied()
    }

    /// Cell value widened to `Float`. Panics when the index is out of range.
    pub fn value(&self, ix: usize, iy: usize) -> Float {
        self.data[(ix, iy)].into()
    }

    /// `[0, sx] x [0, sy]`, the region covered by the grid lines.
    pub fn bbox(&self) -> AABB {
        let (sx, sy) = self.shape();
        AABB::new(Vector2f::zeros(), Vector2f::new(sx as Float, sy as Float))
    }

    pub fn matrix(&self) -> &DMatrix<T> {
        &self.data
    }
}

pub(crate) fn check_shape(sx: usize, sy: usize) -> Result<(), ProjectionError> {
    if sx == 0 || sy == 0 {
        return Err(ProjectionError::InvalidArgument(format!(
            "grid dimensions must be positive, got {}x{}",
            sx, sy
        )));
    }
    Ok(())
}
