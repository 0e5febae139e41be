use chrono::NaiveDate;

/// Clock abstracts access to the current calendar day so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current date, which decides the current month.
    fn today(&self) -> NaiveDate;
}

/// Clock pinned to a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}
