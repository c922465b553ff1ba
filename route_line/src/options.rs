use anyhow::Result;
use serde::{Deserialize, Serialize};

use geom::{Distance, Duration};

pub const MIN_UPDATE_FREQUENCY: Duration = Duration::const_seconds(1.0);
pub const MAX_UPDATE_FREQUENCY: Duration = Duration::const_seconds(10.0);

/// How route lines look and how often they're refreshed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteLineOptions {
    /// Half the width of the line at `reference_zoom`, in meters
    pub base_width_meters: f64,
    /// The zoom level where the line has exactly `base_width_meters`. Each zoom level above this
    /// doubles the width; each level below halves it.
    pub reference_zoom: f64,
    /// How often to check if waypoints moved. Clamped to [1, 10] seconds.
    pub update_frequency_seconds: f64,
    /// Passed to the renderer along with every mesh
    pub layer: usize,
}

impl Default for RouteLineOptions {
    fn default() -> Self {
        Self {
            base_width_meters: 2.0,
            reference_zoom: 16.0,
            update_frequency_seconds: 2.0,
            layer: 0,
        }
    }
}

impl RouteLineOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.base_width_meters.is_finite() || self.base_width_meters <= 0.0 {
            bail!(
                "base_width_meters must be positive, not {}",
                self.base_width_meters
            );
        }
        if !self.reference_zoom.is_finite() {
            bail!("reference_zoom {} isn't finite", self.reference_zoom);
        }
        if !self.update_frequency_seconds.is_finite() {
            bail!(
                "update_frequency_seconds {} isn't finite",
                self.update_frequency_seconds
            );
        }
        Ok(())
    }

    /// The half-width of the line when the map is shown at some zoom level.
    pub fn width_at_zoom(&self, zoom: f64) -> Result<Distance> {
        let width = self.base_width_meters * 2.0_f64.powf(zoom - self.reference_zoom);
        if !width.is_finite() || width <= 0.0 {
            bail!(
                "At zoom {}, a base width of {}m becomes {}; can't draw that",
                zoom,
                self.base_width_meters,
                width
            );
        }
        Ok(Distance::meters(width))
    }

    pub fn update_interval(&self) -> Duration {
        Duration::seconds(self.update_frequency_seconds)
            .clamp(MIN_UPDATE_FREQUENCY, MAX_UPDATE_FREQUENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_doubles_per_zoom_level() {
        let opts = RouteLineOptions::default();
        assert_eq!(opts.width_at_zoom(16.0).unwrap(), Distance::meters(2.0));
        assert_eq!(opts.width_at_zoom(17.0).unwrap(), Distance::meters(4.0));
        assert_eq!(opts.width_at_zoom(14.0).unwrap(), Distance::meters(0.5));
        assert!(opts.width_at_zoom(f64::NAN).is_err());
        assert!(opts.width_at_zoom(-5000.0).is_err());
    }

    #[test]
    fn update_interval_is_clamped() {
        let mut opts = RouteLineOptions::default();
        assert_eq!(opts.update_interval(), Duration::seconds(2.0));
        opts.update_frequency_seconds = 0.1;
        assert_eq!(opts.update_interval(), MIN_UPDATE_FREQUENCY);
        opts.update_frequency_seconds = 60.0;
        assert_eq!(opts.update_interval(), MAX_UPDATE_FREQUENCY);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let opts: RouteLineOptions = serde_json::from_str(r#"{"layer": 3}"#).unwrap();
        assert_eq!(opts.layer, 3);
        assert_eq!(opts.base_width_meters, 2.0);
        opts.validate().unwrap();

        let bad = RouteLineOptions {
            base_width_meters: -1.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
