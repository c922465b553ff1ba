use anyhow::Result;

use geom::{LonLat, Time, WebMercator};
use route_line::{RouteLineOptions, RoutePipeline, RouteUpdater, StraightLines};

use crate::LoggingSink;

// About 11m at the equator
const NUDGE_DEGREES: f64 = 0.0001;

pub fn run(
    waypoints_path: String,
    opts: RouteLineOptions,
    ticks: usize,
    move_every: usize,
) -> Result<()> {
    let raw: Vec<[f64; 2]> = abstutil::read_json(&waypoints_path)?;
    if raw.len() < 2 {
        bail!("{} needs at least 2 waypoints", waypoints_path);
    }
    if raw.iter().flatten().any(|x| !x.is_finite()) {
        bail!("{} has a coordinate that isn't a finite number", waypoints_path);
    }
    if move_every == 0 {
        bail!("--move-every must be at least 1");
    }
    let waypoints: Vec<LonLat> = raw.into_iter().map(LonLat::from).collect();

    let interval = opts.update_interval();
    let projection = WebMercator::new(LonLat::center(&waypoints), 1.0);
    let pipeline = RoutePipeline::new(projection, LoggingSink::default(), opts)?;
    let mut now = Time::START;
    let mut updater = RouteUpdater::new(StraightLines, pipeline, waypoints, 16.0, now);
    updater.on_map_changed(16.0)?;

    let mut moves = 0;
    for tick in 1..=ticks {
        if tick % move_every == 0 {
            // Every waypoint moves, but that should only cause one rebuild
            let nudged: Vec<LonLat> = updater
                .waypoints()
                .iter()
                .map(|pt| LonLat::new(pt.x() + NUDGE_DEGREES, pt.y()))
                .collect();
            for (idx, pt) in nudged.into_iter().enumerate() {
                updater.move_waypoint(idx, pt)?;
                moves += 1;
            }
        }
        now += interval;
        if updater.update(now)? {
            info!("Tick {} at {}: rebuilt the route line", tick, now);
        }
    }

    let sink = updater.pipeline().sink();
    info!(
        "{} ticks, {} waypoint moves, {} rebuilds ({} meshes installed, {} released)",
        ticks,
        moves,
        updater.pipeline().num_rebuilds(),
        sink.installs,
        sink.releases
    );
    updater.disable();
    Ok(())
}
