/* Copyright 2020 @Yuchen Wong */

use nalgebra::{DMatrix, Vector2};

pub type Float = f64;

pub type Vector2f = Vector2<Float>;
pub type MatrixXF = DMatrix<Float>;

/// Nudge applied to the start coordinate of an axis-aligned segment so the
/// parametric division never sees a zero denominator.
pub const AXIS_PERTURBATION: Float = 1e-6;

/// Crossing intervals at or below this length are dropped.
pub const LENGTH_EPSILON: Float = 1e-12;

pub const EPSILON: Float = 1e-8;
pub const FLOAT_MIN: Float = std::f64::MIN;
pub const FLOAT_MAX: Float = std::f64::MAX;
