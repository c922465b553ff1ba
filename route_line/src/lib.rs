//! Keeps a route line's ribbon mesh in sync with the route it draws. A `RoutePipeline` projects
//! geographic points, builds the mesh, and swaps it into a `RenderSink`. A `RouteUpdater` drives
//! the pipeline from moving waypoints on a fixed tick, asking a `RouteSource` for fresh routes.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod options;
mod pipeline;
mod source;
mod updater;
mod waypoints;

pub use crate::options::{RouteLineOptions, MAX_UPDATE_FREQUENCY, MIN_UPDATE_FREQUENCY};
pub use crate::pipeline::{RenderSink, RoutePipeline};
pub use crate::source::{Route, RouteResponse, RouteSource, StraightLines};
pub use crate::updater::RouteUpdater;
pub use crate::waypoints::WaypointWatcher;
