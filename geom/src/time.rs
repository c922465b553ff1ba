use std::{cmp, fmt, ops};

use crate::{trim_f64, Duration};

/// In seconds since the host's update loop started. Can't be negative.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Time(f64);

// By construction, Time is a finite f64 with trimmed precision.
impl Eq for Time {}

#[allow(clippy::derive_ord_xor_partial_ord)] // false positive
impl Ord for Time {
    fn cmp(&self, other: &Time) -> cmp::Ordering {
        self.partial_cmp(other).unwrap()
    }
}

impl Time {
    pub const START: Time = Time(0.0);

    pub fn seconds_since_start(value: f64) -> Time {
        if !value.is_finite() || value < 0.0 {
            panic!("Bad Time {}", value);
        }

        Time(trim_f64(value))
    }

    pub fn inner_seconds(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "t={}s", self.0)
    }
}

impl ops::Add<Duration> for Time {
    type Output = Time;

    fn add(self, other: Duration) -> Time {
        Time::seconds_since_start(self.0 + other.inner_seconds())
    }
}

impl ops::AddAssign<Duration> for Time {
    fn add_assign(&mut self, other: Duration) {
        *self = *self + other;
    }
}

impl ops::Sub for Time {
    type Output = Duration;

    fn sub(self, other: Time) -> Duration {
        Duration::seconds(self.0 - other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let t = Time::START + Duration::seconds(2.5);
        assert_eq!(t, Time::seconds_since_start(2.5));
        assert_eq!(t - Time::START, Duration::seconds(2.5));
        assert!(t + Duration::seconds(0.1) > t);
    }

    #[test]
    #[should_panic]
    fn negative_time() {
        Time::seconds_since_start(-1.0);
    }
}
