use anyhow::Result;

use crate::{GPSBounds, LonLat, Pt2D};

/// Converts geographic coordinates into a local planar system measured in meters. Fails if a
/// point can't be represented, instead of producing non-finite coordinates.
pub trait Projection {
    fn project(&self, gps: LonLat) -> Result<Pt2D>;

    fn project_all(&self, pts: &[LonLat]) -> Result<Vec<Pt2D>> {
        pts.iter().map(|pt| self.project(*pt)).collect()
    }
}

/// Points outside the boundary are still converted, landing at negative coordinates or beyond
/// `get_max_world_pt`. The northernmost latitude is y = 0.
impl Projection for GPSBounds {
    fn project(&self, gps: LonLat) -> Result<Pt2D> {
        self.project_with_max(gps, self.get_max_world_pt())
    }

    fn project_all(&self, pts: &[LonLat]) -> Result<Vec<Pt2D>> {
        let max = self.get_max_world_pt();
        pts.iter()
            .map(|pt| self.project_with_max(*pt, max))
            .collect()
    }
}

impl GPSBounds {
    fn project_with_max(&self, gps: LonLat, max: Pt2D) -> Result<Pt2D> {
        let lon_range = self.max_lon - self.min_lon;
        let lat_range = self.max_lat - self.min_lat;

        let x = if lon_range > 0.0 {
            (gps.x() - self.min_lon) / lon_range * max.x()
        } else {
            0.0
        };
        // Invert y, so that the northernmost latitude is 0. Screen drawing order, not Cartesian
        // grid.
        let y = if lat_range > 0.0 {
            max.y() - (gps.y() - self.min_lat) / lat_range * max.y()
        } else {
            0.0
        };
        Pt2D::try_new(x, y)
    }
}

// Half of the equatorial circumference of the WGS84 ellipsoid, in meters
const ORIGIN_SHIFT: f64 = std::f64::consts::PI * 6_378_137.0;
/// Web mercator maps are square; this is where they're cut off.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

/// Spherical web mercator, relative to a center point and scaled for the scene. X grows east and
/// Y grows north.
#[derive(Clone, Debug, PartialEq)]
pub struct WebMercator {
    center_x: f64,
    center_y: f64,
    world_relative_scale: f64,
}

impl WebMercator {
    pub fn new(center: LonLat, world_relative_scale: f64) -> WebMercator {
        assert!(
            world_relative_scale.is_finite() && world_relative_scale > 0.0,
            "Bad world_relative_scale {}",
            world_relative_scale
        );
        let (center_x, center_y) = WebMercator::to_meters(center);
        WebMercator {
            center_x,
            center_y,
            world_relative_scale,
        }
    }

    /// Absolute mercator meters of a point, before centering and scaling.
    pub fn to_meters(gps: LonLat) -> (f64, f64) {
        let x = gps.x() * ORIGIN_SHIFT / 180.0;
        let y = ((90.0 + gps.y()) * std::f64::consts::PI / 360.0)
            .tan()
            .ln()
            .to_degrees()
            * ORIGIN_SHIFT
            / 180.0;
        (x, y)
    }
}

impl Projection for WebMercator {
    fn project(&self, gps: LonLat) -> Result<Pt2D> {
        if gps.y().abs() > MAX_MERCATOR_LATITUDE {
            bail!("{} is too close to a pole for web mercator", gps);
        }
        let (x, y) = WebMercator::to_meters(gps);
        Pt2D::try_new(
            (x - self.center_x) * self.world_relative_scale,
            (y - self.center_y) * self.world_relative_scale,
        )
    }
}
