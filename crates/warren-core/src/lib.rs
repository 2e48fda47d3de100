//! Geometry primitives shared by the warren map crates.

mod geom;

pub use geom::{Point, Range, RangeIter};
