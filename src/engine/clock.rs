/// Time source for the engine
///
/// Streaks and "today" queries work on calendar days, so the engine needs both
/// the current instant and a calendar that maps any instant, past or present,
/// to the local date it fell on.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Offset, Utc};

use crate::domain::Calendar;

pub trait Clock: Calendar {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Today's date in the local calendar
    fn today(&self) -> NaiveDate {
        self.local_date(self.now())
    }
}

/// Wall clock in the machine's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Calendar for SystemClock {
    fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&Local).date_naive()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
///
/// Clones share the same instant, so a test can keep one handle and advance
/// the engine's copy.
#[derive(Debug, Clone)]
pub struct ManualClock<Z = FixedOffset> {
    now: Rc<Cell<DateTime<Utc>>>,
    zone: Z,
}

impl ManualClock {
    /// Manual clock using UTC day boundaries
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_zone(start, Utc.fix())
    }
}

impl<Z: Calendar> ManualClock<Z> {
    pub fn with_zone(start: DateTime<Utc>, zone: Z) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
            zone,
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.now.set(instant);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }
}

impl<Z: Calendar> Calendar for ManualClock<Z> {
    fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        self.zone.local_date(at)
    }
}

impl<Z: Calendar> Clock for ManualClock<Z> {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
