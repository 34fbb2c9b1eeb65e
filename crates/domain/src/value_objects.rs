//! Location, distance and time-window value objects.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Mean earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    lat: f64,
    long: f64,
}

impl Location {
    /// Creates a new location.
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }

    /// Returns the latitude.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Returns the longitude.
    pub fn long(&self) -> f64 {
        self.long
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_km(&self, other: &Location) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let d_lat = lat2 - lat1;
        let d_long = (other.long - self.long).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_long / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

/// A search radius around an origin point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    radius_km: f64,
    origin_lat: f64,
    origin_long: f64,
}

impl Distance {
    /// Creates a new distance filter.
    pub fn new(radius_km: f64, origin_lat: f64, origin_long: f64) -> Self {
        Self {
            radius_km,
            origin_lat,
            origin_long,
        }
    }

    /// Returns true only when radius and both origin coordinates are
    /// strictly positive.
    ///
    /// Origins on or below the equator or the prime meridian therefore never
    /// count as set.
    pub fn is_set(&self) -> bool {
        self.radius_km > 0.0 && self.origin_lat > 0.0 && self.origin_long > 0.0
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn origin(&self) -> Location {
        Location::new(self.origin_lat, self.origin_long)
    }

    /// Returns true if `location` lies strictly within the radius.
    pub fn covers(&self, location: &Location) -> bool {
        self.origin().distance_km(location) < self.radius_km
    }
}

/// A window of `interval` on either side of `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    date: DateTime<Utc>,
    #[serde(with = "duration_secs")]
    interval: TimeDelta,
}

impl TimeInterval {
    /// Creates a new time interval.
    pub fn new(date: DateTime<Utc>, interval: TimeDelta) -> Self {
        Self { date, interval }
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn interval(&self) -> TimeDelta {
        self.interval
    }

    /// Returns true when the interval is strictly positive.
    pub fn is_set(&self) -> bool {
        self.interval > TimeDelta::zero()
    }

    /// Returns `date - interval`, clamped to the earliest representable instant.
    pub fn start(&self) -> DateTime<Utc> {
        self.date
            .checked_sub_signed(self.interval)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Returns `date + interval`, clamped to the latest representable instant.
    pub fn end(&self) -> DateTime<Utc> {
        self.date
            .checked_add_signed(self.interval)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Returns true if `at` lies inside the window, bounds included.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start() <= at && at <= self.end()
    }
}

mod duration_secs {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let secs = i64::deserialize(deserializer)?;
        TimeDelta::try_seconds(secs)
            .ok_or_else(|| serde::de::Error::custom("interval out of range"))
    }
}
