use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;

/// Source of the current calendar day.
///
/// Rolling windows and the current-year check read "today" through this
/// trait so tests can pin it.
pub trait Clock: Send + Sync {
    /// The current calendar day.
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Local,
    Utc,
    Named(Tz),
}

/// Wall clock reading the system time in a chosen time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemClock {
    zone: Zone,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::local()
    }
}

impl SystemClock {
    /// Days roll over at local midnight of the host.
    #[must_use]
    pub const fn local() -> Self {
        Self { zone: Zone::Local }
    }

    /// Days roll over at UTC midnight.
    #[must_use]
    pub const fn utc() -> Self {
        Self { zone: Zone::Utc }
    }

    /// Days roll over at midnight in `tz`.
    #[must_use]
    pub const fn in_tz(tz: Tz) -> Self {
        Self {
            zone: Zone::Named(tz),
        }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.zone {
            Zone::Local => Local::now().date_naive(),
            Zone::Utc => Utc::now().date_naive(),
            Zone::Named(tz) => Utc::now().with_timezone(&tz).date_naive(),
        }
    }
}

/// Clock pinned to a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    /// Clock that always reports `today`.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self(today)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
