// Copyright @yucwang 2026

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionError {
    InvalidArgument(String),
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for ProjectionError {}
