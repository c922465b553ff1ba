use anyhow::{Context, Result};
use geojson::{Geometry, Value};
use serde::{Deserialize, Serialize};

use geom::{Distance, Duration, LonLat};

/// Finds routes between waypoints, usually by asking some directions service.
pub trait RouteSource {
    /// Looks for a route visiting every waypoint in order. `Ok(None)` means no route is available
    /// right now; that's not an error.
    fn query(&mut self, waypoints: &[LonLat]) -> Result<Option<RouteResponse>>;
}

/// The answer from a directions service, in the shape of a Mapbox Directions API response with
/// `geometries=geojson`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Route {
    pub geometry: Geometry,
    /// In meters
    #[serde(default)]
    pub distance: f64,
    /// In seconds
    #[serde(default)]
    pub duration: f64,
}

impl RouteResponse {
    pub fn parse(raw: &str) -> Result<RouteResponse> {
        serde_json::from_str(raw).context("parsing a directions response")
    }

    /// Routes are ordered by preference, so the first is the one to draw.
    pub fn first_route(&self) -> Option<&Route> {
        self.routes.first()
    }

    /// A single route directly connecting the waypoints.
    pub fn straight_line(waypoints: &[LonLat]) -> RouteResponse {
        let distance = waypoints
            .windows(2)
            .map(|pair| pair[0].gps_dist(pair[1]))
            .sum::<Distance>();
        RouteResponse {
            code: Some("Ok".to_string()),
            routes: vec![Route {
                geometry: Geometry::new(Value::LineString(
                    waypoints.iter().map(|pt| vec![pt.x(), pt.y()]).collect(),
                )),
                distance: distance.inner_meters(),
                duration: 0.0,
            }],
        }
    }
}

impl Route {
    /// The points along the route, in travel order.
    pub fn points(&self) -> Result<Vec<LonLat>> {
        let coords = match self.geometry.value {
            Value::LineString(ref coords) => coords,
            ref x => bail!("Route geometry should be a LineString, not {:?}", x),
        };
        let mut pts = Vec::new();
        for (idx, pos) in coords.iter().enumerate() {
            if pos.len() < 2 {
                bail!("Position {} of the route only has {} values", idx, pos.len());
            }
            if !pos[0].is_finite() || !pos[1].is_finite() {
                bail!("Position {} of the route is {:?}", idx, pos);
            }
            if pos[0].abs() > 180.0 || pos[1].abs() > 90.0 {
                bail!("Position {} of the route is off the globe: {:?}", idx, pos);
            }
            pts.push(LonLat::new(pos[0], pos[1]));
        }
        Ok(pts)
    }

    pub fn distance(&self) -> Distance {
        Distance::meters(self.distance)
    }

    pub fn duration(&self) -> Duration {
        Duration::seconds(self.duration)
    }
}

/// Connects waypoints with straight lines, without asking anybody. Useful offline and for
/// previews while a real route is loading.
pub struct StraightLines;

impl RouteSource for StraightLines {
    fn query(&mut self, waypoints: &[LonLat]) -> Result<Option<RouteResponse>> {
        if waypoints.len() < 2 {
            return Ok(None);
        }
        Ok(Some(RouteResponse::straight_line(waypoints)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_directions_response() {
        let raw = r#"{
            "code": "Ok",
            "routes": [{
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[13.38, 52.51], [13.39, 52.52, 34.0], [13.40, 52.52]]
                },
                "distance": 1520.3,
                "duration": 301.5,
                "legs": []
            }],
            "waypoints": []
        }"#;
        let resp = RouteResponse::parse(raw).unwrap();
        let route = resp.first_route().unwrap();
        assert_eq!(
            route.points().unwrap(),
            vec![
                LonLat::new(13.38, 52.51),
                LonLat::new(13.39, 52.52),
                LonLat::new(13.40, 52.52)
            ]
        );
        assert_eq!(route.distance(), Distance::meters(1520.3));
        assert_eq!(route.duration(), Duration::seconds(301.5));
    }

    #[test]
    fn no_routes() {
        let resp = RouteResponse::parse(r#"{"code": "NoRoute", "routes": []}"#).unwrap();
        assert!(resp.first_route().is_none());
        let resp = RouteResponse::parse(r#"{"code": "NoRoute"}"#).unwrap();
        assert!(resp.first_route().is_none());
    }

    #[test]
    fn wrong_geometry() {
        let raw = r#"{"routes": [{"geometry": {"type": "Point", "coordinates": [1.0, 2.0]}}]}"#;
        let resp = RouteResponse::parse(raw).unwrap();
        assert!(resp.first_route().unwrap().points().is_err());
        assert!(RouteResponse::parse("routes").is_err());
    }

    #[test]
    fn off_the_globe() {
        for coords in ["[[13.4, 52.5], [13.4, 95.0]]", "[[13.4, 52.5], [-190.0, 52.5]]"] {
            let raw = format!(
                r#"{{"routes": [{{"geometry": {{"type": "LineString", "coordinates": {}}}}}]}}"#,
                coords
            );
            let resp = RouteResponse::parse(&raw).unwrap();
            assert!(resp.first_route().unwrap().points().is_err());
        }
    }

    #[test]
    fn straight_lines() {
        let waypoints = vec![LonLat::new(0.0, 0.0), LonLat::new(0.0, 1.0)];
        let resp = StraightLines.query(&waypoints).unwrap().unwrap();
        let route = resp.first_route().unwrap();
        assert_eq!(route.points().unwrap(), waypoints);
        assert!(route.distance() > Distance::kilometers(110.0));

        assert!(StraightLines.query(&waypoints[0..1]).unwrap().is_none());
    }
}
