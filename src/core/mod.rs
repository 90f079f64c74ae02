// Copyright @yucwang 2021

pub mod error;
pub mod grid;
pub mod projector;
