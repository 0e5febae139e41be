//! Tunable constants for budgeting and forecasting.

use serde::{Deserialize, Serialize};

/// Monthly expense ceiling used when none is configured.
pub const DEFAULT_BUDGET_LIMIT: f64 = 10_000_000.0;
/// Length of the daily expense chart, in days ending today.
pub const DEFAULT_DAILY_WINDOW_DAYS: u32 = 7;
/// Number of transactions shown in the "recent" list.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Days a historical month is normalized to, regardless of its real length.
pub const HISTORICAL_MONTH_DAYS: f64 = 30.0;
/// Day of month at which the current month's velocity would reach full weight.
pub const CURRENT_WEIGHT_RAMP_DAYS: f64 = 20.0;
/// Upper bound on the current month's share of the blended daily rate.
pub const CURRENT_WEIGHT_CAP: f64 = 0.9;
/// Share of the top spending category proposed as a saving.
pub const SAVINGS_RATE: f64 = 0.15;

/// Parameters of the weighted end-of-month forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastParams {
    #[serde(default = "ForecastParams::default_historical_month_days")]
    pub historical_month_days: f64,
    #[serde(default = "ForecastParams::default_ramp_days")]
    pub ramp_days: f64,
    #[serde(default = "ForecastParams::default_current_weight_cap")]
    pub current_weight_cap: f64,
    #[serde(default = "ForecastParams::default_savings_rate")]
    pub savings_rate: f64,
}

impl ForecastParams {
    pub fn default_historical_month_days() -> f64 {
        HISTORICAL_MONTH_DAYS
    }

    pub fn default_ramp_days() -> f64 {
        CURRENT_WEIGHT_RAMP_DAYS
    }

    pub fn default_current_weight_cap() -> f64 {
        CURRENT_WEIGHT_CAP
    }

    pub fn default_savings_rate() -> f64 {
        SAVINGS_RATE
    }
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            historical_month_days: HISTORICAL_MONTH_DAYS,
            ramp_days: CURRENT_WEIGHT_RAMP_DAYS,
            current_weight_cap: CURRENT_WEIGHT_CAP,
            savings_rate: SAVINGS_RATE,
        }
    }
}
