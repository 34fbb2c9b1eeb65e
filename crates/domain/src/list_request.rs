//! Criteria for listing events.

use chrono::{DateTime, TimeDelta, Utc};

use crate::value_objects::{Distance, TimeInterval};

/// Builder for event search criteria.
///
/// Every accessor returns `None` when its criterion is absent or not set, so
/// storage implementations only apply the filters that are present. Present
/// filters combine conjunctively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListRequest {
    name: Option<String>,
    user: Option<String>,
    public: Option<bool>,
    interval: Option<TimeInterval>,
    distance: Option<Distance>,
}

impl ListRequest {
    /// Creates a request that matches every event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters to events whose name contains `name`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Filters to events owned by `user`.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Filters by the public flag.
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }

    /// Filters to events starting within `interval` of `date`.
    pub fn with_time_interval(mut self, date: DateTime<Utc>, interval: TimeDelta) -> Self {
        self.interval = Some(TimeInterval::new(date, interval));
        self
    }

    /// Filters to events located within `radius_km` of the origin.
    pub fn with_distance(mut self, radius_km: f64, lat: f64, long: f64) -> Self {
        self.distance = Some(Distance::new(radius_km, lat, long));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref().filter(|user| !user.is_empty())
    }

    pub fn public(&self) -> Option<bool> {
        self.public
    }

    pub fn interval(&self) -> Option<TimeInterval> {
        self.interval.filter(TimeInterval::is_set)
    }

    pub fn distance(&self) -> Option<Distance> {
        self.distance.filter(Distance::is_set)
    }

    /// Returns true if no criterion is present.
    pub fn is_unfiltered(&self) -> bool {
        self.name().is_none()
            && self.user().is_none()
            && self.public.is_none()
            && self.interval().is_none()
            && self.distance().is_none()
    }
}
