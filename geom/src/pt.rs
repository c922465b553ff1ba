use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::Distance;

/// This represents world-space in meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt2D {
    x: f64,
    y: f64,
}

impl Pt2D {
    pub fn new(x: f64, y: f64) -> Pt2D {
        if !x.is_finite() || !y.is_finite() {
            panic!("Bad Pt2D {}, {}", x, y);
        }

        Pt2D { x, y }
    }

    /// Like `new`, but returns an error for non-finite coordinates instead of panicking.
    pub fn try_new(x: f64, y: f64) -> Result<Pt2D> {
        if !x.is_finite() || !y.is_finite() {
            bail!("Bad Pt2D {}, {}", x, y);
        }
        Ok(Pt2D { x, y })
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn offset(self, dx: f64, dy: f64) -> Pt2D {
        Pt2D::new(self.x + dx, self.y + dy)
    }

    pub fn dist_to(self, to: Pt2D) -> Distance {
        Distance::meters((self.x - to.x).hypot(self.y - to.y))
    }

    /// Halfway between two points.
    pub fn midpoint(self, other: Pt2D) -> Pt2D {
        Pt2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn approx_eq(self, other: Pt2D, threshold: Distance) -> bool {
        self.dist_to(other) <= threshold
    }
}

impl fmt::Display for Pt2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pt2D({0}, {1})", self.x(), self.y())
    }
}

impl From<[f64; 2]> for Pt2D {
    fn from(pair: [f64; 2]) -> Pt2D {
        Pt2D::new(pair[0], pair[1])
    }
}
