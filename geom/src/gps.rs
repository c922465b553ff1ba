use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Distance;

/// longitude is x, latitude is y
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct LonLat {
    longitude: f64,
    latitude: f64,
}

impl LonLat {
    /// Note the order of arguments!
    pub fn new(lon: f64, lat: f64) -> LonLat {
        if !lon.is_finite() || !lat.is_finite() {
            panic!("Bad LonLat {}, {}", lon, lat);
        }
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    pub fn x(self) -> f64 {
        self.longitude
    }

    pub fn y(self) -> f64 {
        self.latitude
    }

    /// Returns the Haversine distance to another point.
    pub fn gps_dist(self, other: LonLat) -> Distance {
        let earth_radius_m = 6_371_000.0;
        let lon1 = self.x().to_radians();
        let lon2 = other.x().to_radians();
        let lat1 = self.y().to_radians();
        let lat2 = other.y().to_radians();

        let delta_lat = lat2 - lat1;
        let delta_lon = lon2 - lon1;

        let a = (delta_lat / 2.0).sin().powi(2)
            + (delta_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Distance::meters(earth_radius_m * c)
    }

    /// The average of all the points. Panics if there aren't any.
    pub fn center(pts: &[LonLat]) -> LonLat {
        assert!(!pts.is_empty(), "Can't find the center of no points");
        let mut lon = 0.0;
        let mut lat = 0.0;
        for pt in pts {
            lon += pt.x();
            lat += pt.y();
        }
        let len = pts.len() as f64;
        LonLat::new(lon / len, lat / len)
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({0}, {1})", self.x(), self.y())
    }
}

impl From<[f64; 2]> for LonLat {
    fn from(pair: [f64; 2]) -> LonLat {
        LonLat::new(pair[0], pair[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine() {
        // One degree of latitude is about 111km everywhere
        let dist = LonLat::new(-122.3, 47.0).gps_dist(LonLat::new(-122.3, 48.0));
        assert!(
            (dist.inner_meters() - 111_195.0).abs() < 10.0,
            "one degree of latitude came out as {}",
            dist
        );
    }

    #[test]
    fn center() {
        let pts = vec![LonLat::new(0.0, 0.0), LonLat::new(2.0, 4.0)];
        assert_eq!(LonLat::center(&pts), LonLat::new(1.0, 2.0));
    }
}
