use std::{cmp, fmt};

use crate::trim_f64;

/// A duration, in seconds. Can be negative.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Duration(f64);

// By construction, Duration is a finite f64 with trimmed precision.
impl Eq for Duration {}

#[allow(clippy::derive_ord_xor_partial_ord)] // false positive
impl Ord for Duration {
    fn cmp(&self, other: &Duration) -> cmp::Ordering {
        self.partial_cmp(other).unwrap()
    }
}

impl Duration {
    /// Creates a duration in seconds.
    pub fn seconds(value: f64) -> Duration {
        if !value.is_finite() {
            panic!("Bad Duration {}", value);
        }

        Duration(trim_f64(value))
    }

    pub const fn const_seconds(value: f64) -> Duration {
        Duration(value)
    }

    /// Returns the duration in seconds. Prefer working in typesafe `Duration`s.
    pub fn inner_seconds(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 < 60.0 {
            write!(f, "{}s", self.0)
        } else {
            let mins = (self.0 / 60.0).floor();
            write!(f, "{}m{}s", mins, trim_f64(self.0 - mins * 60.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Duration::seconds(12.5).to_string(), "12.5s");
        assert_eq!(Duration::seconds(301.5).to_string(), "5m1.5s");
    }

    #[test]
    fn clamping() {
        let lo = Duration::const_seconds(1.0);
        let hi = Duration::const_seconds(10.0);
        assert_eq!(Duration::seconds(0.2).clamp(lo, hi), lo);
        assert_eq!(Duration::seconds(3.0).clamp(lo, hi), Duration::seconds(3.0));
    }
}
