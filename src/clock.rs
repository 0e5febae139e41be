use chrono::{Local, NaiveDate};

use chau_core::Clock;

/// Real-time clock following the local calendar.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
