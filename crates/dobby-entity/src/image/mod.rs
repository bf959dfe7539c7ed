//! Image domain entities.

pub mod model;

pub use model::{CreateImage, Image};
