//! Geometry primitives and units for route lines, plus the ribbon mesh builder that turns a
//! planar path into something a renderer can draw.

#[macro_use]
extern crate anyhow;

pub use crate::bounds::{Bounds, GPSBounds};
pub use crate::distance::Distance;
pub use crate::duration::Duration;
pub use crate::gps::LonLat;
pub use crate::mesh::{Mesh, Pt3D, RibbonVertex, Vec3};
pub use crate::projection::{Projection, WebMercator, MAX_MERCATOR_LATITUDE};
pub use crate::pt::Pt2D;
pub use crate::time::Time;

mod bounds;
mod distance;
mod duration;
mod gps;
mod mesh;
mod projection;
mod pt;
mod ribbon;
mod time;

/// Reduce the precision of an f64. This helps ensure serialization is idempotent (everything is
/// exactly the same before and after saving/loading). Ideally we'd use some kind of proper
/// fixed-precision type instead of f64.
pub fn trim_f64(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
