// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector2f, EPSILON, FLOAT_MAX, FLOAT_MIN};
use super::segment::Segment2f;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AABB {
    pub p_min: Vector2f,
    pub p_max: Vector2f,
}

impl Default for AABB {
    fn default() -> Self {
        Self { p_min: Vector2f::new(FLOAT_MAX, FLOAT_MAX),
               p_max: Vector2f::new(FLOAT_MIN, FLOAT_MIN) }
    }
}

impl AABB {
    pub fn new(p_min: Vector2f, p_max: Vector2f) -> Self {
        let mut min = Vector2f::zeros();
        let mut max = Vector2f::zeros();
        for idx in 0..2 {
            min[idx] = p_min[idx].min(p_max[idx]);
            max[idx] = p_max[idx].max(p_min[idx]);
        }
        Self { p_min: min, p_max: max }
    }

    pub fn expand_by_point(&mut self, p: &Vector2f) {
        for idx in 0..2 {
            self.p_min[idx] = self.p_min[idx].min(p[idx]);
            self.p_max[idx] = self.p_max[idx].max(p[idx]);
        }
    }

    pub fn extent(&self) -> Vector2f {
        self.p_max - self.p_min
    }

    pub fn is_valid(&self) -> bool {
        (0..2).all(|idx| self.p_min[idx] <= self.p_max[idx])
    }

    /// Closed-interval overlap test; boxes sharing only an edge overlap.
    pub fn overlaps(&self, other: &AABB) -> bool {
        self.is_valid()
            && other.is_valid()
            && (0..2).all(|idx| {
                self.p_min[idx] <= other.p_max[idx] && other.p_min[idx] <= self.p_max[idx]
            })
    }

    /// Alpha range of `segment` inside the box, clipped to [0, 1]. Exact slab
    /// test: an axis the segment does not advance along only rejects.
    pub fn segment_intersect_range(&self, segment: &Segment2f) -> Option<(Float, Float)> {
        if !self.is_valid() {
            return None;
        }

        let o = segment.start();
        let d = segment.delta();
        let mut t_min: Float = 0.0;
        let mut t_max: Float = 1.0;

        for idx in 0..2 {
            let dir = d[idx];
            if dir.abs() < EPSILON {
                if o[idx] < self.p_min[idx] || o[idx] > self.p_max[idx] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (self.p_min[idx] - o[idx]) * inv;
            let mut t1 = (self.p_max[idx] - o[idx]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_max < t_min {
                return None;
            }
        }

        Some((t_min, t_max))
    }

    pub fn segment_clipped_length(&self, segment: &Segment2f) -> Float {
        match self.segment_intersect_range(segment) {
            Some((t0, t1)) => (t1 - t0) * segment.length(),
            None => 0.0,
        }
    }
}

/* Test for AABB */
