//! One render cycle: every figure the dashboard needs, computed from scratch.
//!
//! See also: [`crate::AggregationService`], [`crate::BucketingService`] and
//! [`crate::ForecastService`] for the individual engines.

use chrono::NaiveDate;
use tracing::debug;

use chau_domain::{
    CategoryPalette, ForecastParams, Transaction, DEFAULT_BUDGET_LIMIT, DEFAULT_DAILY_WINDOW_DAYS,
    DEFAULT_RECENT_LIMIT,
};

use crate::{
    aggregation_service::{AggregationService, Aggregates, CategorySlice},
    bucketing_service::{BucketingService, DailyTotal},
    forecast_service::{Forecast, ForecastService},
    transaction_service::TransactionService,
};

/// Configuration values consumed by the dashboard computation.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    pub budget_limit: f64,
    pub daily_window_days: u32,
    pub recent_limit: usize,
    pub forecast: ForecastParams,
    pub palette: CategoryPalette,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            budget_limit: DEFAULT_BUDGET_LIMIT,
            daily_window_days: DEFAULT_DAILY_WINDOW_DAYS,
            recent_limit: DEFAULT_RECENT_LIMIT,
            forecast: ForecastParams::default(),
            palette: CategoryPalette::default(),
        }
    }
}

/// Everything a presentation layer renders for one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub today: NaiveDate,
    pub budget_limit: f64,
    pub aggregates: Aggregates,
    pub forecast: Forecast,
    pub daily_series: Vec<DailyTotal>,
    pub category_slices: Vec<CategorySlice>,
    pub uncategorized_total: f64,
    pub recent: Vec<Transaction>,
    pub transaction_count: usize,
}

pub struct SummaryService;

impl SummaryService {
    pub fn dashboard(
        transactions: &[Transaction],
        today: NaiveDate,
        settings: &DashboardSettings,
    ) -> DashboardSnapshot {
        let aggregates = AggregationService::aggregate(transactions, today, settings.budget_limit);
        let forecast = ForecastService::forecast(
            transactions,
            today,
            aggregates.total_balance,
            &settings.forecast,
        );
        let daily_series =
            BucketingService::daily_series(transactions, today, settings.daily_window_days);
        let (category_slices, uncategorized_total) = AggregationService::category_slices(
            &aggregates.category_expense_totals,
            &settings.palette,
        );
        debug!(
            transactions = transactions.len(),
            %today,
            balance = aggregates.total_balance,
            budget_percent = aggregates.budget_percent,
            "dashboard recomputed"
        );

        DashboardSnapshot {
            today,
            budget_limit: settings.budget_limit,
            aggregates,
            forecast,
            daily_series,
            category_slices,
            uncategorized_total,
            recent: TransactionService::recent(transactions, settings.recent_limit).to_vec(),
            transaction_count: transactions.len(),
        }
    }
}
