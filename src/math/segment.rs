// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector2f};

/// A finite ray from `start` to `end` in grid coordinates, parameterized by
/// alpha in [0, 1].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment2f {
    start: Vector2f,
    end: Vector2f,
}

impl Segment2f {
    pub fn new(start: Vector2f, end: Vector2f) -> Self {
        Self { start, end }
    }

    pub fn from_coords(x0: Float, y0: Float, x1: Float, y1: Float) -> Self {
        Self::new(Vector2f::new(x0, y0), Vector2f::new(x1, y1))
    }

    pub fn start(&self) -> Vector2f {
        self.start
    }

    pub fn end(&self) -> Vector2f {
        self.end
    }

    pub fn delta(&self) -> Vector2f {
        self.end - self.start
    }

    pub fn at(&self, alpha: Float) -> Vector2f {
        self.start + self.delta() * alpha
    }

    pub fn length(&self) -> Float {
        self.delta().norm()
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    pub fn is_finite(&self) -> bool {
        self.start.iter().chain(self.end.iter()).all(|v| v.is_finite())
    }

    /// Moves the start coordinate by `eps` on every axis the segment does not
    /// advance along. The end point is never touched.
    pub fn with_axis_perturbation(&self, eps: Float) -> Self {
        let mut start = self.start;
        for idx in 0..2 {
            if self.end[idx] - start[idx] == 0.0 {
                start[idx] += eps;
            }
        }
        Self::new(start, self.end)
    }
}

/* Tests for Segment */
