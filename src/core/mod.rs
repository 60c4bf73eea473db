pub mod geometry;
pub mod model;
pub mod risk;
pub mod scoring;
