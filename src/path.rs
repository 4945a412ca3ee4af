//! Path geometry.

mod geometry;

pub use geometry::{path_length, point_at_progress};
