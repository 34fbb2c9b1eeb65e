//! Time period value objects.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when constructing a [`Period`] or [`EventPeriod`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Start or end date is missing.
    #[error("Dates cannot be empty")]
    EmptyDates,

    /// Start date is after the end date.
    #[error("Start date must be before end date")]
    InvalidDates,

    /// A zero duration was given.
    #[error("Duration must be set")]
    DurationRequired,

    /// Start plus duration is not a representable instant.
    #[error("Period end is out of range")]
    OutOfRange,
}

/// A closed range of time with `start <= end`.
///
/// A `Period` can only be obtained through its validating constructors, so
/// every instance satisfies the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodRecord")]
pub struct Period {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct PeriodRecord {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<PeriodRecord> for Period {
    type Error = PeriodError;

    fn try_from(record: PeriodRecord) -> Result<Self, Self::Error> {
        Period::between(record.start, record.end)
    }
}

impl Period {
    /// Creates a period from optional bounds.
    ///
    /// Fails with [`PeriodError::EmptyDates`] if either bound is missing and
    /// with [`PeriodError::InvalidDates`] if `start` is after `end`.
    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, PeriodError> {
        let (Some(start), Some(end)) = (start, end) else {
            return Err(PeriodError::EmptyDates);
        };

        Self::between(start, end)
    }

    /// Creates a period from two known instants.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::InvalidDates);
        }

        Ok(Self { start, end })
    }

    /// Returns the start of the period.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the end of the period.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns `end - start`.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns true if `at` lies strictly inside the period.
    ///
    /// Both boundary instants are outside.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start < at && at < self.end
    }

    /// Returns true if both bounds of this period are earlier than the
    /// corresponding bounds of `other`.
    pub fn is_before(&self, other: &Period) -> bool {
        self.start < other.start && self.end < other.end
    }

    /// Returns true if both bounds of this period are later than the
    /// corresponding bounds of `other`.
    pub fn is_after(&self, other: &Period) -> bool {
        self.start > other.start && self.end > other.end
    }
}

/// The schedule of an event: a [`Period`] plus its duration.
///
/// The duration is redundant with the bounds and kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "EventPeriodRecord", try_from = "EventPeriodRecord")]
pub struct EventPeriod {
    period: Period,
    duration: TimeDelta,
}

#[derive(Serialize, Deserialize)]
struct EventPeriodRecord {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    #[serde(default)]
    duration_secs: i64,
}

impl From<EventPeriod> for EventPeriodRecord {
    fn from(value: EventPeriod) -> Self {
        Self {
            start: value.start(),
            end: value.end(),
            duration_secs: value.duration.num_seconds(),
        }
    }
}

impl TryFrom<EventPeriodRecord> for EventPeriod {
    type Error = PeriodError;

    fn try_from(record: EventPeriodRecord) -> Result<Self, Self::Error> {
        EventPeriod::with_start_and_end_date(Some(record.start), Some(record.end))
    }
}

impl EventPeriod {
    /// Builds an event period from explicit bounds.
    pub fn with_start_and_end_date(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, PeriodError> {
        let period = Period::new(start, end)?;

        Ok(Self {
            period,
            duration: period.duration(),
        })
    }

    /// Builds an event period from a start date and a duration.
    ///
    /// A zero duration is rejected before the start date is looked at. A
    /// negative duration is treated as its absolute value.
    pub fn with_start_and_duration(
        start: Option<DateTime<Utc>>,
        duration: TimeDelta,
    ) -> Result<Self, PeriodError> {
        if duration.is_zero() {
            return Err(PeriodError::DurationRequired);
        }

        let duration = duration.abs();
        let Some(start) = start else {
            return Err(PeriodError::EmptyDates);
        };
        let end = start
            .checked_add_signed(duration)
            .ok_or(PeriodError::OutOfRange)?;

        Ok(Self {
            period: Period::between(start, end)?,
            duration,
        })
    }

    /// Returns the underlying period.
    pub fn period(&self) -> Period {
        self.period
    }

    /// Returns the event start.
    pub fn start(&self) -> DateTime<Utc> {
        self.period.start()
    }

    /// Returns the event end.
    pub fn end(&self) -> DateTime<Utc> {
        self.period.end()
    }

    /// Returns the event duration.
    pub fn duration(&self) -> TimeDelta {
        self.duration
    }
}
