// Copyright @yucwang 2026

//! Siddon-style parametric ray tracing over a unit grid.
//!
//! The ray is written as `start + alpha * (end - start)`. Every vertical and
//! horizontal grid line it meets yields one alpha; the sorted alphas inside
//! the grid split the ray into chords, and each chord lies in exactly one
//! cell, found by flooring the chord midpoint.
//!
//! Axis-aligned rays are not special-cased. The start coordinate on a flat
//! axis is nudged by `perturbation` so the division stays finite, which
//! biases such rays by roughly that amount.

use crate::core::error::ProjectionError;
use crate::core::projector::{CellIntersection, Projector, TraceBuffers};
use crate::math::constants::{Float, AXIS_PERTURBATION, LENGTH_EPSILON};
use crate::math::segment::Segment2f;
use std::cmp::Ordering;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SiddonProjector {
    perturbation: Float,
    length_epsilon: Float,
}

impl Default for SiddonProjector {
    fn default() -> Self {
        Self { perturbation: AXIS_PERTURBATION, length_epsilon: LENGTH_EPSILON }
    }
}

impl SiddonProjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(perturbation: Float, length_epsilon: Float) -> Result<Self, ProjectionError> {
        if !perturbation.is_finite() || perturbation <= 0.0 {
            return Err(ProjectionError::InvalidArgument(format!(
                "perturbation must be positive and finite, got {}",
                perturbation
            )));
        }
        if !length_epsilon.is_finite() || length_epsilon < 0.0 {
            return Err(ProjectionError::InvalidArgument(format!(
                "length epsilon must be non-negative and finite, got {}",
                length_epsilon
            )));
        }
        Ok(Self { perturbation, length_epsilon })
    }

    pub fn perturbation(&self) -> Float {
        self.perturbation
    }

    pub fn length_epsilon(&self) -> Float {
        self.length_epsilon
    }
}

impl Projector for SiddonProjector {
    fn trace_into(&self, segment: &Segment2f, shape: (usize, usize), buffers: &mut TraceBuffers) {
        buffers.clear();
        let (sx, sy) = shape;
        if sx == 0 || sy == 0 || !segment.is_finite() {
            log::trace!("ray {:?} skipped for grid {}x{}", segment, sx, sy);
            return;
        }

        let ray = segment.with_axis_perturbation(self.perturbation);
        let start = ray.start();
        let delta = ray.delta();

        let (ax_min, ax_max) = axis_alpha_bounds(start.x, delta.x, sx);
        let (ay_min, ay_max) = axis_alpha_bounds(start.y, delta.y, sy);
        let a0 = ax_min.max(ay_min).max(0.0);
        let a1 = ax_max.min(ay_max).min(1.0);
        if !(a0 <= a1) {
            log::trace!("ray {:?} misses grid {}x{}", segment, sx, sy);
            return;
        }

        let alphas = &mut buffers.alphas;
        alphas.push(a0);
        alphas.push(a1);
        push_axis_crossings(alphas, start.x, delta.x, sx, a0, a1);
        push_axis_crossings(alphas, start.y, delta.y, sy, a0, a1);
        alphas.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        for pair in buffers.alphas.windows(2) {
            let length = (ray.at(pair[1]) - ray.at(pair[0])).norm();
            if !(length > self.length_epsilon) {
                continue;
            }

            let mid = ray.at(pair[0] + (pair[1] - pair[0]) / 2.0);
            let ix = mid.x.floor();
            let iy = mid.y.floor();
            if ix < 0.0 || iy < 0.0 || ix >= sx as Float || iy >= sy as Float {
                log::trace!("chord midpoint ({}, {}) outside grid, skipped", mid.x, mid.y);
                continue;
            }

            buffers.cells.push(CellIntersection { ix: ix as usize, iy: iy as usize, length });
        }

        log::trace!(
            "ray {:?}: {} crossings, {} cells",
            segment,
            buffers.alphas.len(),
            buffers.cells.len()
        );
    }
}

/// Alphas at the first and last grid line of one axis, ordered.
fn axis_alpha_bounds(origin: Float, dir: Float, lines: usize) -> (Float, Float) {
    let first = (0.0 - origin) / dir;
    let last = (lines as Float - origin) / dir;
    (first.min(last), first.max(last))
}

fn push_axis_crossings(alphas: &mut Vec<Float>, origin: Float, dir: Float,
                       lines: usize, a0: Float, a1: Float) {
    for line in 0..=lines {
        let alpha = (line as Float - origin) / dir;
        if alpha >= a0 && alpha <= a1 {
            alphas.push(alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Grid;
    use crate::math::aabb::AABB;
    use crate::math::constants::Vector2f;

    fn approx_eq(a: Float, b: Float, eps: Float) -> bool {
        (a - b).abs() < eps
    }

    fn ramp_grid() -> Grid {
        Grid::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]).expect("grid")
    }

    fn project(x0: Float, y0: Float, x1: Float, y1: Float, grid: &Grid) -> Float {
        SiddonProjector::default().project(&Segment2f::from_coords(x0, y0, x1, y1), grid)
    }

    // Fine midpoint-rule quadrature of the piecewise-constant object.
    fn integrate_by_sampling(segment: &Segment2f, grid: &Grid, steps: usize) -> Float {
        let (sx, sy) = grid.shape();
        let dt = 1.0 / steps as Float;
        let mut sum = 0.0;
        for i in 0..steps {
            let p = segment.at((i as Float + 0.5) * dt);
            if p.x < 0.0 || p.y < 0.0 || p.x >= sx as Float || p.y >= sy as Float {
                continue;
            }
            sum += grid.value(p.x.floor() as usize, p.y.floor() as usize);
        }
        sum * dt * segment.length()
    }

    #[test]
    fn single_cell_diagonal() {
        let v = project(0.0, 0.0, 1.0, 1.0, &ramp_grid());
        assert!(approx_eq(v, std::f64::consts::SQRT_2, 1e-9));
    }

    #[test]
    fn corner_crossing_uses_midpoint_cells() {
        let v = project(0.0, 0.0, 2.0, 2.0, &ramp_grid());
        assert!(approx_eq(v, 5.0 * std::f64::consts::SQRT_2, 1e-9));

        let cells = SiddonProjector::default().trace(&Segment2f::from_coords(0.0, 0.0, 2.0, 2.0), (2, 2));
        let indices: Vec<(usize, usize)> = cells.iter().map(|c| (c.ix, c.iy)).collect();
        assert_eq!(indices, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn horizontal_ray_is_perturbed() {
        let grid = Grid::uniform(3, 3, 1.0).expect("grid");
        let v = project(0.0, 1.5, 3.0, 1.5, &grid);
        assert!(approx_eq(v, 3.0, 1e-5));

        let cells = SiddonProjector::default().trace(&Segment2f::from_coords(0.0, 1.5, 3.0, 1.5), (3, 3));
        assert_eq!(cells.len(), 3);
        assert!(cells.iter().all(|c| c.iy == 1));
    }

    #[test]
    fn vertical_ray_on_boundary_line() {
        let grid = Grid::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]).expect("grid");
        // x = 0 is nudged to the inside of the ix = 0 cells.
        let v = project(0.0, 0.0, 0.0, 2.0, &grid);
        assert!(approx_eq(v, 3.0, 1e-5));
        // x = 2 is nudged outside the grid.
        let v = project(2.0, 0.0, 2.0, 2.0, &grid);
        assert!(approx_eq(v, 0.0, 1e-5));
    }

    #[test]
    fn miss_returns_zero() {
        let grid = ramp_grid();
        assert_eq!(project(-3.0, -1.0, -0.5, 3.0, &grid), 0.0);
        assert_eq!(project(2.5, -1.0, 4.0, 5.0, &grid), 0.0);
        assert_eq!(project(-1.0, 3.0, 5.0, 2.5, &grid), 0.0);
        // The line would cross the grid but the segment stops short.
        assert_eq!(project(-3.0, -3.0, -1.0, -1.0, &grid), 0.0);
    }

    #[test]
    fn segment_inside_one_cell() {
        let grid = ramp_grid();
        let seg = Segment2f::from_coords(1.2, 0.2, 1.8, 0.6);
        let v = SiddonProjector::default().project(&seg, &grid);
        assert!(approx_eq(v, 3.0 * seg.length(), 1e-12));
    }

    #[test]
    fn trace_lengths_match_clipped_length() {
        let projector = SiddonProjector::default();
        let bbox = AABB::new(Vector2f::zeros(), Vector2f::new(7.0, 5.0));
        let segments = [
            Segment2f::from_coords(-1.3, -0.7, 8.2, 6.1),
            Segment2f::from_coords(0.4, 4.9, 6.6, 0.2),
            Segment2f::from_coords(3.5, -2.0, 2.25, 9.0),
            Segment2f::from_coords(-4.0, 2.5, 1.75, 3.125),
            Segment2f::from_coords(6.9, 0.1, 0.3, 4.4),
        ];
        let mut buffers = TraceBuffers::with_capacity((7, 5));
        for seg in segments.iter() {
            projector.trace_into(seg, (7, 5), &mut buffers);
            let expected = bbox.segment_clipped_length(seg);
            assert!(expected > 0.0);
            assert!(approx_eq(buffers.total_length(), expected, 1e-9),
                    "{:?}: {} vs {}", seg, buffers.total_length(), expected);
            assert!(buffers.alphas().windows(2).all(|w| w[0] <= w[1]));
            assert!(buffers.cells().iter().all(|c| c.ix < 7 && c.iy < 5));
        }
    }

    #[test]
    fn uniform_grid_scales_clipped_length() {
        let grid = Grid::uniform(6, 4, 2.5).expect("grid");
        let bbox = grid.bbox();
        let seg = Segment2f::from_coords(-2.0, 1.3, 7.5, 3.7);
        let v = SiddonProjector::default().project(&seg, &grid);
        assert!(approx_eq(v, 2.5 * bbox.segment_clipped_length(&seg), 1e-9));
    }

    #[test]
    fn reversed_segment_projects_the_same() {
        let grid: Grid = Grid::from_fn(5, 4, |ix, iy| (ix * 4 + iy) as Float * 0.5 + 1.0).expect("grid");
        let projector = SiddonProjector::default();
        let segments = [
            Segment2f::from_coords(-0.5, 0.25, 5.5, 3.9),
            Segment2f::from_coords(4.2, -1.0, 0.7, 4.5),
            Segment2f::from_coords(1.0, 1.0, 3.0, 3.0),
        ];
        for seg in segments.iter() {
            let forward = projector.project(seg, &grid);
            let backward = projector.project(&seg.reversed(), &grid);
            assert!(approx_eq(forward, backward, 1e-9), "{} vs {}", forward, backward);
        }
    }

    #[test]
    fn matches_sampled_integral() {
        let grid: Grid = Grid::from_fn(8, 6, |ix, iy| ((ix * 7 + iy * 3) % 5) as Float).expect("grid");
        let seg = Segment2f::from_coords(-0.3, 0.45, 8.4, 5.2);
        let exact = SiddonProjector::default().project(&seg, &grid);
        let sampled = integrate_by_sampling(&seg, &grid, 200_000);
        assert!(approx_eq(exact, sampled, 5e-3), "{} vs {}", exact, sampled);
    }

    #[test]
    fn integer_grid_values() {
        let grid: Grid<i32> = Grid::from_row_slice(2, 2, &[1, 2, 3, 4]).expect("grid");
        let v = SiddonProjector::default().project(&Segment2f::from_coords(0.0, 0.0, 2.0, 2.0), &grid);
        assert!(approx_eq(v, 5.0 * std::f64::consts::SQRT_2, 1e-9));
    }

    #[test]
    fn buffers_are_reset_between_rays() {
        let projector = SiddonProjector::default();
        let mut buffers = TraceBuffers::new();
        projector.trace_into(&Segment2f::from_coords(0.0, 0.0, 2.0, 2.0), (2, 2), &mut buffers);
        assert_eq!(buffers.cells().len(), 2);
        projector.trace_into(&Segment2f::from_coords(5.0, 5.0, 6.0, 6.0), (2, 2), &mut buffers);
        assert!(buffers.cells().is_empty());
        assert!(buffers.alphas().is_empty());
    }

    #[test]
    fn non_finite_segments_trace_nothing() {
        let projector = SiddonProjector::default();
        let seg = Segment2f::from_coords(std::f64::NAN, 0.0, 1.0, 1.0);
        assert!(projector.trace(&seg, (2, 2)).is_empty());
    }

    #[test]
    fn settings_are_validated() {
        let projector = SiddonProjector::with_settings(1e-9, 0.0).expect("settings");
        assert_eq!(projector.perturbation(), 1e-9);
        assert_eq!(projector.length_epsilon(), 0.0);
        assert!(SiddonProjector::with_settings(0.0, 1e-12).is_err());
        assert!(SiddonProjector::with_settings(1e-6, -1.0).is_err());
        assert!(SiddonProjector::with_settings(std::f64::NAN, 1e-12).is_err());

        let default = SiddonProjector::new();
        assert_eq!(default.perturbation(), AXIS_PERTURBATION);
        assert_eq!(default.length_epsilon(), LENGTH_EPSILON);
    }

    #[test]
    fn smaller_perturbation_reduces_bias() {
        let grid = Grid::uniform(3, 3, 1.0).expect("grid");
        let seg = Segment2f::from_coords(0.5, 1.5, 0.5, 2.5);
        let coarse = SiddonProjector::with_settings(1e-3, LENGTH_EPSILON).expect("settings");
        let fine = SiddonProjector::with_settings(1e-9, LENGTH_EPSILON).expect("settings");
        let coarse_err = (coarse.project(&seg, &grid) - 1.0).abs();
        let fine_err = (fine.project(&seg, &grid) - 1.0).abs();
        assert!(fine_err <= coarse_err);
        assert!(fine_err < 1e-8);
    }
}
