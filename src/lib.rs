// Copyright @yucwang 2021

//! Forward projection of single rays through a 2D grid.
//!
//! ```
//! use xstream::core::grid::Grid;
//!
//! let grid = Grid::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
//! let p = xstream::project(0.0, 0.0, 2.0, 2.0, &grid);
//! assert!((p - 5.0 * 2f64.sqrt()).abs() < 1e-9);
//! ```

pub extern crate nalgebra as na;

pub mod core;
pub mod math;
pub mod projectors;

use self::core::error::ProjectionError;
use self::core::grid::{check_shape, CellValue, Grid};
use self::core::projector::{forward_project, Projector, TraceBuffers};
use self::math::constants::Float;
use self::math::segment::Segment2f;
use self::projectors::siddon::SiddonProjector;

/// Line integral of `grid` along (x0, y0) -> (x1, y1) with the default
/// Siddon settings. Returns 0 when the segment misses the grid.
pub fn project<T: CellValue>(x0: Float, y0: Float, x1: Float, y1: Float, grid: &Grid<T>) -> Float {
    SiddonProjector::default().project(&Segment2f::from_coords(x0, y0, x1, y1), grid)
}

/// Like [`project`], for a bare matrix with `sx` rows and `sy` columns.
/// Rejects empty matrices and non-finite coordinates.
pub fn project_matrix<T: CellValue>(
    x0: Float,
    y0: Float,
    x1: Float,
    y1: Float,
    values: &na::DMatrix<T>,
) -> Result<Float, ProjectionError> {
    let shape = (values.nrows(), values.ncols());
    check_shape(shape.0, shape.1)?;

    let segment = Segment2f::from_coords(x0, y0, x1, y1);
    if !segment.is_finite() {
        return Err(ProjectionError::InvalidArgument(format!(
            "segment coordinates must be finite, got {:?}",
            segment
        )));
    }

    let mut buffers = TraceBuffers::with_capacity(shape);
    SiddonProjector::default().trace_into(&segment, shape, &mut buffers);
    Ok(forward_project(buffers.cells(), values))
}
