// src/common/clock.rs

use chrono::{DateTime, NaiveDate, Utc};

/// Wall-clock capability injected into the services.
///
/// Everything that compares against "now" or "today" (age in days, the
/// daily-log edit window, closure dates) goes through this trait so tests
/// can freeze time instead of depending on the real clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
