// Copyright @yucwang 2026

use crate::core::grid::{CellValue, Grid};
use crate::math::constants::Float;
use crate::math::segment::Segment2f;
use nalgebra::DMatrix;

/// Length of a ray inside one grid cell.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CellIntersection {
    pub ix: usize,
    pub iy: usize,
    pub length: Float,
}

/// Scratch storage for one traced ray. Reusing a single instance across many
/// calls avoids reallocating the crossing and cell vectors per ray.
#[derive(Debug, Default, Clone)]
pub struct TraceBuffers {
    pub(crate) alphas: Vec<Float>,
    pub(crate) cells: Vec<CellIntersection>,
}

impl TraceBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ray crosses at most `sx + sy + 2` grid lines.
    pub fn with_capacity(shape: (usize, usize)) -> Self {
        let lines = shape.0 + shape.1 + 2;
        Self {
            alphas: Vec::with_capacity(lines + 2),
            cells: Vec::with_capacity(lines),
        }
    }

    pub fn cells(&self) -> &[CellIntersection] {
        &self.cells
    }

    /// Sorted crossing parameters of the last traced ray.
    pub fn alphas(&self) -> &[Float] {
        &self.alphas
    }

    pub fn total_length(&self) -> Float {
        self.cells.iter().map(|c| c.length).sum()
    }

    pub fn clear(&mut self) {
        self.alphas.clear();
        self.cells.clear();
    }
}

pub trait Projector: Send + Sync {
    /// Replace the contents of `buffers` with the cells `segment` crosses on a
    /// grid of `shape`, in the order the segment visits them.
    fn trace_into(&self, segment: &Segment2f, shape: (usize, usize), buffers: &mut TraceBuffers);

    fn trace(&self, segment: &Segment2f, shape: (usize, usize)) -> Vec<CellIntersection> {
        let mut buffers = TraceBuffers::with_capacity(shape);
        self.trace_into(segment, shape, &mut buffers);
        buffers.cells
    }

    fn project<T: CellValue>(&self, segment: &Segment2f, grid: &Grid<T>) -> Float
    where
        Self: Sized,
    {
        let mut buffers = TraceBuffers::with_capacity(grid.shape());
        self.trace_into(segment, grid.shape(), &mut buffers);
        forward_project(buffers.cells(), grid.matrix())
    }
}

/// Weighted sum of cell values along traced intersections. Cells outside
/// `values` contribute nothing.
#[inline]
pub fn forward_project<T: CellValue>(cells: &[CellIntersection], values: &DMatrix<T>) -> Float {
    let mut projection = 0.0;
    for cell in cells {
        match values.get((cell.ix, cell.iy)) {
            Some(v) => {
                let v: Float = (*v).into();
                projection += cell.length * v;
            }
            None => log::trace!("cell ({}, {}) outside grid, skipped", cell.ix, cell.iy),
        }
    }
    projection
}
