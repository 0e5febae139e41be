//! Grouping of transactions by calendar month and by calendar day.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use chau_domain::{Amounted, MonthKey, Transaction};

use crate::aggregation_service::PeriodTotals;

/// Income and expense for one past calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthBucket {
    pub key: MonthKey,
    pub totals: PeriodTotals,
}

/// Expense total for a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub expense_total: f64,
}

pub struct BucketingService;

impl BucketingService {
    /// Groups every transaction outside the month of `today` by calendar month.
    pub fn by_month(
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> BTreeMap<MonthKey, PeriodTotals> {
        let current = MonthKey::from_date(today);
        let mut buckets: BTreeMap<MonthKey, PeriodTotals> = BTreeMap::new();
        for txn in transactions.iter().filter(|txn| !current.contains(txn.date())) {
            buckets
                .entry(MonthKey::from_date(txn.date()))
                .or_default()
                .record(txn);
        }
        buckets
    }

    /// Past-month buckets, newest month first.
    pub fn history(transactions: &[Transaction], today: NaiveDate) -> Vec<MonthBucket> {
        Self::by_month(transactions, today)
            .into_iter()
            .rev()
            .map(|(key, totals)| MonthBucket { key, totals })
            .collect()
    }

    /// Expense totals for the `window_days` dates ending at `today`, oldest first.
    ///
    /// Days without expenses are reported as zero so the series always covers the
    /// whole window.
    pub fn daily_series(
        transactions: &[Transaction],
        today: NaiveDate,
        window_days: u32,
    ) -> Vec<DailyTotal> {
        let mut series: Vec<DailyTotal> = (0..window_days)
            .rev()
            .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
            .map(|date| DailyTotal {
                date,
                expense_total: 0.0,
            })
            .collect();
        let Some(start) = series.first().map(|day| day.date) else {
            return series;
        };

        for txn in transactions.iter().filter(|txn| txn.is_expense()) {
            let date = txn.date();
            if date < start || date > today {
                continue;
            }
            let index = (date - start).num_days() as usize;
            if let Some(day) = series.get_mut(index) {
                day.expense_total += txn.amount();
            }
        }
        series
    }
}
