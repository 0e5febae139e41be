//! End-of-month balance forecast and savings suggestion.
//!
//! The forecast blends the current month's spending velocity with the average of
//! previous months. The current month's weight ramps up linearly with the day of
//! the month and is capped so history always keeps some influence.

use chrono::{Datelike, NaiveDate};

use chau_domain::{Category, ForecastParams, MonthKey, Transaction};

use crate::{
    aggregation_service::{AggregationService, CategoryTotals},
    bucketing_service::BucketingService,
};

/// Figures the forecast is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastInputs {
    pub today: NaiveDate,
    pub total_balance: f64,
    pub current_month_expense: f64,
    pub historical_avg_monthly_expense: f64,
}

/// Predicted end-of-month position plus the intermediate rates behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub predicted_end_of_month_balance: f64,
    pub predicted_daily_rate: f64,
    pub daily_rate_current: f64,
    pub daily_rate_historical: f64,
    pub current_weight: f64,
    pub days_elapsed: u32,
    pub days_remaining: u32,
    pub current_month_expense: f64,
    pub historical_avg_monthly_expense: f64,
    pub suggestion: Option<SavingsSuggestion>,
}

/// Proposal to trim the largest spending category.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsSuggestion {
    pub category: Category,
    pub category_total: f64,
    /// Share of `category_total` proposed as a saving.
    pub rate: f64,
    pub suggested_saving: f64,
}

pub struct ForecastService;

impl ForecastService {
    /// Forecasts the balance at the end of the month containing `today`.
    pub fn forecast(
        transactions: &[Transaction],
        today: NaiveDate,
        total_balance: f64,
        params: &ForecastParams,
    ) -> Forecast {
        let current_month_expense =
            AggregationService::month_totals(transactions, MonthKey::from_date(today)).expense;
        let inputs = ForecastInputs {
            today,
            total_balance,
            current_month_expense,
            historical_avg_monthly_expense: Self::historical_avg_monthly_expense(
                transactions,
                today,
            ),
        };
        let totals = AggregationService::category_expense_totals(transactions);
        let mut forecast = Self::project(&inputs, params);
        forecast.suggestion = Self::savings_suggestion(&totals, params.savings_rate);
        forecast
    }

    /// Mean expense over the months before the current one; 0 without history.
    pub fn historical_avg_monthly_expense(
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> f64 {
        let buckets = BucketingService::by_month(transactions, today);
        let total: f64 = buckets.values().map(|totals| totals.expense).sum();
        safe_div(total, buckets.len() as f64)
    }

    /// Applies the weighted daily-rate blend to precomputed inputs.
    pub fn project(inputs: &ForecastInputs, params: &ForecastParams) -> Forecast {
        let days_elapsed = inputs.today.day();
        let days_in_month = MonthKey::from_date(inputs.today).days_in_month();
        let days_remaining = days_in_month.saturating_sub(days_elapsed);

        let daily_rate_current = safe_div(inputs.current_month_expense, f64::from(days_elapsed));
        let daily_rate_historical = safe_div(
            inputs.historical_avg_monthly_expense,
            params.historical_month_days,
        );
        let current_weight = safe_div(f64::from(days_elapsed), params.ramp_days)
            .min(params.current_weight_cap);
        let predicted_daily_rate =
            daily_rate_current * current_weight + daily_rate_historical * (1.0 - current_weight);

        Forecast {
            predicted_end_of_month_balance: inputs.total_balance
                - predicted_daily_rate * f64::from(days_remaining),
            predicted_daily_rate,
            daily_rate_current,
            daily_rate_historical,
            current_weight,
            days_elapsed,
            days_remaining,
            current_month_expense: inputs.current_month_expense,
            historical_avg_monthly_expense: inputs.historical_avg_monthly_expense,
            suggestion: None,
        }
    }

    /// Suggests saving `rate` of the top all-time expense category.
    pub fn savings_suggestion(totals: &CategoryTotals, rate: f64) -> Option<SavingsSuggestion> {
        totals.top().map(|(category, total)| SavingsSuggestion {
            category: category.clone(),
            category_total: total,
            rate,
            suggested_saving: total * rate,
        })
    }
}

/// Division that yields 0 instead of NaN or infinity for a zero denominator.
fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        0.0
    } else {
        numerator / denominator
    }
}
