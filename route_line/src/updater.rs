use anyhow::Result;

use geom::{Duration, LonLat, Projection, Time};

use crate::{RenderSink, RoutePipeline, RouteSource, WaypointWatcher};

/// Keeps a route line up to date while its waypoints move around. The host calls `update` from
/// its (single-threaded) loop; at most one route query and rebuild happen per tick, however many
/// waypoints moved in between.
pub struct RouteUpdater<R: RouteSource, P: Projection, S: RenderSink> {
    source: R,
    pipeline: RoutePipeline<P, S>,
    watcher: WaypointWatcher,
    interval: Duration,
    next_tick: Time,
    zoom: f64,
    enabled: bool,
}

impl<R: RouteSource, P: Projection, S: RenderSink> RouteUpdater<R, P, S> {
    /// The first tick happens one interval after `now`.
    pub fn new(
        source: R,
        pipeline: RoutePipeline<P, S>,
        waypoints: Vec<LonLat>,
        zoom: f64,
        now: Time,
    ) -> Self {
        let interval = pipeline.options().update_interval();
        Self {
            source,
            pipeline,
            watcher: WaypointWatcher::new(waypoints),
            interval,
            next_tick: now + interval,
            zoom,
            enabled: true,
        }
    }

    /// The map finished loading or moved to a new zoom. Queries right away instead of waiting for
    /// the next tick. Returns true if the route line was rebuilt.
    pub fn on_map_changed(&mut self, zoom: f64) -> Result<bool> {
        if !self.enabled {
            return Ok(false);
        }
        self.zoom = zoom;
        self.query()
    }

    pub fn move_waypoint(&mut self, idx: usize, pt: LonLat) -> Result<()> {
        self.watcher.set_position(idx, pt)
    }

    /// Forces a query at the next tick.
    pub fn mark_dirty(&mut self) {
        self.watcher.mark_dirty();
    }

    /// Call this every frame. Returns true if the route line was rebuilt.
    pub fn update(&mut self, now: Time) -> Result<bool> {
        if !self.enabled || now < self.next_tick {
            return Ok(false);
        }
        // If the host stalled past several deadlines, that still only counts as one tick
        while self.next_tick <= now {
            self.next_tick += self.interval;
        }

        if !self.watcher.tick() {
            return Ok(false);
        }
        debug!("Waypoints moved; querying for a new route at {}", now);
        self.query()
    }

    /// Stops all updates and releases the route line. Nothing scheduled runs afterwards.
    pub fn disable(&mut self) {
        if self.enabled {
            info!("Disabling route line updates");
        }
        self.enabled = false;
        self.pipeline.clear();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pipeline(&self) -> &RoutePipeline<P, S> {
        &self.pipeline
    }

    pub fn waypoints(&self) -> &[LonLat] {
        self.watcher.waypoints()
    }

    fn query(&mut self) -> Result<bool> {
        let response = self.source.query(self.watcher.waypoints())?;
        self.pipeline.rebuild_from_response(response, self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tests::{line, Flat, RecordingSink};
    use crate::{RouteLineOptions, RouteResponse, StraightLines};

    /// Counts queries, then answers with straight lines. Can be told to find nothing.
    struct CountingSource {
        queries: usize,
        no_route: bool,
    }

    impl RouteSource for CountingSource {
        fn query(&mut self, waypoints: &[LonLat]) -> Result<Option<RouteResponse>> {
            self.queries += 1;
            if self.no_route {
                return Ok(None);
            }
            StraightLines.query(waypoints)
        }
    }

    fn updater() -> RouteUpdater<CountingSource, Flat, RecordingSink> {
        let opts = RouteLineOptions {
            update_frequency_seconds: 2.0,
            ..Default::default()
        };
        let pipeline = RoutePipeline::new(Flat, RecordingSink::default(), opts).unwrap();
        RouteUpdater::new(
            CountingSource {
                queries: 0,
                no_route: false,
            },
            pipeline,
            line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]),
            16.0,
            Time::START,
        )
    }

    fn t(secs: f64) -> Time {
        Time::seconds_since_start(secs)
    }

    #[test]
    fn map_changes_query_immediately() {
        let mut u = updater();
        assert!(u.on_map_changed(16.0).unwrap());
        assert_eq!(u.pipeline().num_rebuilds(), 1);
        assert_eq!(u.source.queries, 1);
        assert_eq!(u.pipeline().mesh().unwrap().corner_vertices().len(), 6);
    }

    #[test]
    fn many_moves_one_rebuild() {
        let mut u = updater();
        u.on_map_changed(16.0).unwrap();

        for (idx, pt) in line(&[(1.0, 1.0), (20.0, 0.0), (20.0, 30.0)])
            .into_iter()
            .enumerate()
        {
            u.move_waypoint(idx, pt).unwrap();
        }
        // Not time yet
        assert!(!u.update(t(1.0)).unwrap());
        assert!(u.update(t(2.0)).unwrap());
        assert_eq!(u.source.queries, 2);
        assert_eq!(u.pipeline().num_rebuilds(), 2);
        assert_eq!(u.pipeline().sink().live(), 1);

        // Nothing moved since
        assert!(!u.update(t(4.0)).unwrap());
        assert!(!u.update(t(6.0)).unwrap());
        assert_eq!(u.source.queries, 2);
    }

    #[test]
    fn one_tick_per_interval() {
        let mut u = updater();
        u.move_waypoint(0, LonLat::new(-1.0, 0.0)).unwrap();
        assert!(u.update(t(2.5)).unwrap());

        // Moved again, but the next tick isn't until t=4
        u.move_waypoint(0, LonLat::new(-2.0, 0.0)).unwrap();
        assert!(!u.update(t(3.9)).unwrap());
        assert!(u.update(t(4.0)).unwrap());
        assert_eq!(u.pipeline().num_rebuilds(), 2);
    }

    #[test]
    fn stalled_host_gets_one_tick() {
        let mut u = updater();
        u.move_waypoint(1, LonLat::new(11.0, 0.0)).unwrap();
        assert!(u.update(t(9.0)).unwrap());
        u.mark_dirty();
        // Deadlines at 2, 4, 6, 8 were all covered by the tick at 9; the next is 10
        assert!(!u.update(t(9.5)).unwrap());
        assert!(u.update(t(10.0)).unwrap());
    }

    #[test]
    fn missing_route_keeps_the_line() {
        let mut u = updater();
        u.on_map_changed(16.0).unwrap();
        let before = u.pipeline().mesh().unwrap().clone();

        u.source.no_route = true;
        u.move_waypoint(2, LonLat::new(0.0, 10.0)).unwrap();
        assert!(!u.update(t(2.0)).unwrap());
        assert_eq!(u.source.queries, 2);
        assert_eq!(u.pipeline().mesh(), Some(&before));
    }

    #[test]
    fn nothing_runs_after_disable() {
        let mut u = updater();
        u.on_map_changed(16.0).unwrap();
        u.move_waypoint(0, LonLat::new(5.0, 5.0)).unwrap();
        u.disable();
        assert!(!u.is_enabled());
        assert!(u.pipeline().mesh().is_none());
        assert_eq!(u.pipeline().sink().live(), 0);

        assert!(!u.update(t(2.0)).unwrap());
        assert!(!u.on_map_changed(17.0).unwrap());
        assert_eq!(u.source.queries, 1);
    }
}
