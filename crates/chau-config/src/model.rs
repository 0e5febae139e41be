use serde::{de::Deserializer, Deserialize, Serialize};
use std::fmt;

use chau_domain::{
    CategoryPalette, ForecastParams, DEFAULT_BUDGET_LIMIT, DEFAULT_DAILY_WINDOW_DAYS,
    DEFAULT_RECENT_LIMIT,
};

use crate::ConfigError;

/// User preferences and the tunables of the dashboard computations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_budget_limit")]
    pub budget_limit: f64,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub palette: CategoryPalette,
    #[serde(default)]
    pub forecast: ForecastParams,
    #[serde(default = "Config::default_daily_window_days")]
    pub daily_window_days: u32,
    #[serde(default = "Config::default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            budget_limit: Self::default_budget_limit(),
            theme: Theme::default(),
            locale: Self::default_locale(),
            currency_symbol: Self::default_currency_symbol(),
            palette: CategoryPalette::default(),
            forecast: ForecastParams::default(),
            daily_window_days: Self::default_daily_window_days(),
            recent_limit: Self::default_recent_limit(),
        }
    }
}

impl Config {
    pub fn default_budget_limit() -> f64 {
        DEFAULT_BUDGET_LIMIT
    }

    pub fn default_locale() -> String {
        "vi-VN".into()
    }

    pub fn default_currency_symbol() -> String {
        "₫".into()
    }

    pub fn default_daily_window_days() -> u32 {
        DEFAULT_DAILY_WINDOW_DAYS
    }

    pub fn default_recent_limit() -> usize {
        DEFAULT_RECENT_LIMIT
    }

    pub fn dark_mode(&self) -> bool {
        self.theme == Theme::Dark
    }

    /// Rejects values the dashboard computations cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.budget_limit.is_finite() || self.budget_limit <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "budget_limit must be a positive number (got {})",
                self.budget_limit
            )));
        }
        if self.daily_window_days == 0 {
            return Err(ConfigError::Invalid(
                "daily_window_days must be at least 1".into(),
            ));
        }
        let forecast = &self.forecast;
        for (name, value) in [
            ("forecast.historical_month_days", forecast.historical_month_days),
            ("forecast.ramp_days", forecast.ramp_days),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number (got {value})"
                )));
            }
        }
        for (name, value) in [
            ("forecast.current_weight_cap", forecast.current_weight_cap),
            ("forecast.savings_rate", forecast.savings_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must lie within [0, 1] (got {value})"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    fn from_value(value: Option<String>) -> Self {
        value
            .map(|v| Theme::from_name(v.trim()))
            .unwrap_or_default()
    }

    /// Lenient parse; anything other than `dark` falls back to light.
    pub fn from_name(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Theme::from_value(value))
    }
}
