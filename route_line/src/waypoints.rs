use anyhow::Result;

use geom::LonLat;

/// Remembers where a route's waypoints were at the last tick, so the next tick can tell if any of
/// them moved. Whoever owns the waypoints pushes new positions with `set_position`.
pub struct WaypointWatcher {
    current: Vec<LonLat>,
    cached: Vec<LonLat>,
    dirty: bool,
}

impl WaypointWatcher {
    pub fn new(waypoints: Vec<LonLat>) -> WaypointWatcher {
        WaypointWatcher {
            cached: waypoints.clone(),
            current: waypoints,
            dirty: false,
        }
    }

    /// The latest known positions, in route order.
    pub fn waypoints(&self) -> &[LonLat] {
        &self.current
    }

    pub fn set_position(&mut self, idx: usize, pt: LonLat) -> Result<()> {
        match self.current.get_mut(idx) {
            Some(slot) => {
                *slot = pt;
                Ok(())
            }
            None => bail!(
                "Can't move waypoint {}; there are only {}",
                idx,
                self.current.len()
            ),
        }
    }

    /// Forces the next tick to report a change, even if nothing moved.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Compares every waypoint against its position at the previous tick, using exact equality.
    /// Returns true if anything changed, no matter how many waypoints moved. The snapshot is
    /// updated either way.
    pub fn tick(&mut self) -> bool {
        for (cached, current) in self.cached.iter_mut().zip(self.current.iter()) {
            if *cached != *current {
                *cached = *current;
                self.dirty = true;
            }
        }
        std::mem::replace(&mut self.dirty, false)
    }
}
