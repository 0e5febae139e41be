//! Text rendering of engine outputs for a presentation layer.
//!
//! Nothing here computes figures; every value comes from a
//! [`DashboardSnapshot`] or a [`Transaction`]. Amounts follow the configured
//! locale through [`AmountStyle`]; labels are Vietnamese.

use chrono::NaiveDate;
use serde::Serialize;

use chau_config::Config;
use chau_core::{DashboardSnapshot, Forecast, SavingsSuggestion};
use chau_domain::{Amounted, Identifiable, Transaction};

use crate::errors::Result;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₫";
pub const DEFAULT_LOCALE: &str = "vi-VN";
pub const NO_NOTE_LABEL: &str = "Không ghi chú";
pub const EMPTY_RECENT_MESSAGE: &str = "Chưa có giao dịch gần đây";
pub const EMPTY_HISTORY_MESSAGE: &str = "Bắt đầu ghi chép để quản lý tiền của bạn!";
/// Budget usage strictly above this percentage is flagged.
pub const BUDGET_ALERT_PERCENT: u8 = 90;

const FRACTION_SCALE: u128 = 1_000;
/// Languages written `1.234,5`; every other language gets `1,234.5`.
const COMMA_DECIMAL_LANGUAGES: &[&str] = &["vi", "id", "de", "es", "it", "pt", "nl", "da", "tr"];

/// Separators and currency symbol used when rendering amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountStyle {
    pub symbol: String,
    pub grouping_separator: char,
    pub decimal_separator: char,
}

impl AmountStyle {
    /// Derives separators from the language part of `locale` (`vi-VN`, `en_US`).
    pub fn new(locale: &str, symbol: &str) -> Self {
        let language = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let (grouping_separator, decimal_separator) =
            if COMMA_DECIMAL_LANGUAGES.contains(&language.as_str()) {
                ('.', ',')
            } else {
                (',', '.')
            };
        Self {
            symbol: symbol.to_string(),
            grouping_separator,
            decimal_separator,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.locale, &config.currency_symbol)
    }

    /// Formats `amount` followed by the symbol.
    ///
    /// At most three fraction digits are kept and trailing zeros are dropped.
    /// Non-finite input renders as zero.
    pub fn format(&self, amount: f64) -> String {
        let number = self.group_digits(amount);
        if self.symbol.is_empty() {
            number
        } else {
            format!("{number} {}", self.symbol)
        }
    }

    fn group_digits(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return "0".into();
        }
        let scaled = (amount.abs() * FRACTION_SCALE as f64).round() as u128;
        let integer = (scaled / FRACTION_SCALE).to_string();
        let fraction = scaled % FRACTION_SCALE;

        let mut out = String::with_capacity(integer.len() + 8);
        if amount < 0.0 && scaled > 0 {
            out.push('-');
        }
        let len = integer.len();
        for (index, digit) in integer.chars().enumerate() {
            if index > 0 && (len - index) % 3 == 0 {
                out.push(self.grouping_separator);
            }
            out.push(digit);
        }
        if fraction > 0 {
            let digits = format!("{fraction:03}");
            out.push(self.decimal_separator);
            out.push_str(digits.trim_end_matches('0'));
        }
        out
    }
}

impl Default for AmountStyle {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE, DEFAULT_CURRENCY_SYMBOL)
    }
}

/// Formats `amount` vi-VN style with the default `₫` suffix.
pub fn format_currency(amount: f64) -> String {
    AmountStyle::default().format(amount)
}

/// Chart axis label, `DD/MM`.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

pub fn budget_usage_label(expense: f64, budget_limit: f64, style: &AmountStyle) -> String {
    format!(
        "Đã dùng {} / {}",
        style.format(expense),
        style.format(budget_limit)
    )
}

pub fn budget_alert(budget_percent: u8) -> bool {
    budget_percent > BUDGET_ALERT_PERCENT
}

/// Insight sentence announcing the predicted end-of-month balance.
pub fn forecast_message(forecast: &Forecast, style: &AmountStyle) -> String {
    let last_day = forecast.days_elapsed + forecast.days_remaining;
    format!(
        "Dựa trên thói quen chi tiêu, dự kiến bạn sẽ còn {} vào ngày {}.",
        style.format(forecast.predicted_end_of_month_balance),
        last_day
    )
}

pub fn savings_message(suggestion: &SavingsSuggestion, style: &AmountStyle) -> String {
    format!(
        "Bạn chi nhiều nhất cho {}. Thử giảm {}% mục này để tiết kiệm thêm {} nhé!",
        suggestion.category,
        (suggestion.rate * 100.0).round(),
        style.format(suggestion.suggested_saving)
    )
}

/// Label of the button that switches to the other theme.
pub fn theme_toggle_label(dark_mode: bool) -> &'static str {
    if dark_mode {
        "Giao diện sáng"
    } else {
        "Giao diện tối"
    }
}

/// One entry of a transaction list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub income: bool,
    pub title: String,
    pub subtitle: String,
    pub amount_label: String,
}

impl TransactionRow {
    pub fn new(txn: &Transaction, style: &AmountStyle) -> Self {
        let sign = if txn.is_income() { '+' } else { '-' };
        Self {
            id: txn.id().to_string(),
            income: txn.is_income(),
            title: txn.category().label().to_string(),
            subtitle: format!(
                "{} • {}",
                txn.note().unwrap_or(NO_NOTE_LABEL),
                txn.date().format("%Y-%m-%d")
            ),
            amount_label: format!("{sign}{}", style.format(txn.amount())),
        }
    }
}

/// Rendered list plus the message shown when it is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionListView {
    pub rows: Vec<TransactionRow>,
    pub placeholder: Option<String>,
}

impl TransactionListView {
    pub fn recent(transactions: &[Transaction], style: &AmountStyle) -> Self {
        Self::build(transactions, style, EMPTY_RECENT_MESSAGE)
    }

    pub fn full(transactions: &[Transaction], style: &AmountStyle) -> Self {
        Self::build(transactions, style, EMPTY_HISTORY_MESSAGE)
    }

    fn build(transactions: &[Transaction], style: &AmountStyle, empty: &str) -> Self {
        let rows: Vec<TransactionRow> = transactions
            .iter()
            .map(|txn| TransactionRow::new(txn, style))
            .collect();
        let placeholder = rows.is_empty().then(|| empty.to_string());
        Self { rows, placeholder }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Everything the dashboard screen displays, as text and chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub balance: String,
    pub month_income: String,
    pub month_expense: String,
    pub budget_percent: u8,
    pub budget_percent_label: String,
    pub budget_usage: String,
    pub budget_alert: bool,
    pub recent: TransactionListView,
    pub daily_chart: Vec<ChartPoint>,
    pub category_chart: Vec<ChartPoint>,
    pub forecast_message: String,
    pub savings_message: Option<String>,
    pub theme_toggle_label: String,
}

impl DashboardView {
    pub fn from_snapshot(
        snapshot: &DashboardSnapshot,
        dark_mode: bool,
        style: &AmountStyle,
    ) -> Self {
        let aggregates = &snapshot.aggregates;
        let daily_chart = snapshot
            .daily_series
            .iter()
            .map(|day| ChartPoint {
                label: day_label(day.date),
                value: day.expense_total,
                color: None,
            })
            .collect();
        let category_chart = snapshot
            .category_slices
            .iter()
            .map(|slice| ChartPoint {
                label: slice.category.label().to_string(),
                value: slice.total,
                color: Some(slice.color.clone()),
            })
            .collect();

        Self {
            balance: style.format(aggregates.total_balance),
            month_income: style.format(aggregates.current_month_income),
            month_expense: style.format(aggregates.current_month_expense),
            budget_percent: aggregates.budget_percent,
            budget_percent_label: format!("{}%", aggregates.budget_percent),
            budget_usage: budget_usage_label(
                aggregates.current_month_expense,
                snapshot.budget_limit,
                style,
            ),
            budget_alert: budget_alert(aggregates.budget_percent),
            recent: TransactionListView::recent(&snapshot.recent, style),
            daily_chart,
            category_chart,
            forecast_message: forecast_message(&snapshot.forecast, style),
            savings_message: snapshot
                .forecast
                .suggestion
                .as_ref()
                .map(|suggestion| savings_message(suggestion, style)),
            theme_toggle_label: theme_toggle_label(dark_mode).to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chau_core::{DashboardSettings, SummaryService};
    use chau_domain::{Category, TransactionKind};
    use insta::assert_snapshot;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn currency_uses_vietnamese_grouping() {
        assert_snapshot!(format_currency(4_000_000.0), @"4.000.000 ₫");
        assert_snapshot!(format_currency(-540.0), @"-540 ₫");
        assert_snapshot!(format_currency(1_234.5), @"1.234,5 ₫");
        assert_snapshot!(format_currency(2.0 / 3.0), @"0,667 ₫");
        assert_eq!(format_currency(0.0), "0 ₫");
        assert_eq!(format_currency(999.0), "999 ₫");
        assert_eq!(format_currency(-0.0001), "0 ₫");
        assert_eq!(format_currency(f64::NAN), "0 ₫");
        assert_eq!(AmountStyle::new("vi-VN", "").format(1_000.0), "1.000");
    }

    #[test]
    fn amount_style_follows_configured_locale() {
        let english = AmountStyle::new("en-US", "$");
        assert_eq!(english.grouping_separator, ',');
        assert_snapshot!(english.format(1_234_567.25), @"1,234,567.25 $");

        assert_eq!(AmountStyle::new("de_DE", "€").format(1_234.5), "1.234,5 €");
        assert_eq!(AmountStyle::new("", "").format(1_000.0), "1,000");

        let config = Config {
            locale: "en-GB".into(),
            currency_symbol: "£".into(),
            ..Config::default()
        };
        assert_eq!(AmountStyle::from_config(&config).format(2_500.0), "2,500 £");
        assert_eq!(AmountStyle::from_config(&Config::default()), AmountStyle::default());
    }

    #[test]
    fn transaction_row_shows_sign_and_note_fallback() {
        let expense = Transaction::new(
            TransactionKind::Expense,
            date(2024, 6, 5),
            Category::Food,
            1_000_000.0,
            None,
        )
        .unwrap();
        let row = TransactionRow::new(&expense, &AmountStyle::default());
        assert!(!row.income);
        assert_snapshot!(&row.title, @"Ăn uống");
        assert_snapshot!(&row.subtitle, @"Không ghi chú • 2024-06-05");
        assert_snapshot!(&row.amount_label, @"-1.000.000 ₫");

        let income = Transaction::new(
            TransactionKind::Income,
            date(2024, 6, 1),
            Category::Other,
            5_000_000.0,
            Some("Lương tháng 6".into()),
        )
        .unwrap();
        let row = TransactionRow::new(&income, &AmountStyle::default());
        assert_snapshot!(&row.subtitle, @"Lương tháng 6 • 2024-06-01");
        assert_snapshot!(&row.amount_label, @"+5.000.000 ₫");
    }

    #[test]
    fn labels_for_budget_axis_and_theme() {
        assert_snapshot!(day_label(date(2024, 3, 2)), @"02/03");
        assert_snapshot!(
            budget_usage_label(1_000_000.0, 10_000_000.0, &AmountStyle::default()),
            @"Đã dùng 1.000.000 ₫ / 10.000.000 ₫"
        );
        assert!(!budget_alert(90));
        assert!(budget_alert(91));
        assert_eq!(theme_toggle_label(true), "Giao diện sáng");
        assert_eq!(theme_toggle_label(false), "Giao diện tối");
    }

    #[test]
    fn empty_lists_carry_placeholders() {
        let recent = TransactionListView::recent(&[], &AmountStyle::default());
        assert_eq!(recent.placeholder.as_deref(), Some(EMPTY_RECENT_MESSAGE));
        let full = TransactionListView::full(&[], &AmountStyle::default());
        assert_eq!(full.placeholder.as_deref(), Some(EMPTY_HISTORY_MESSAGE));
    }

    #[test]
    fn dashboard_view_renders_snapshot() {
        let list = vec![
            Transaction::new(
                TransactionKind::Expense,
                date(2024, 6, 2),
                Category::Transport,
                1_500_000.0,
                None,
            )
            .unwrap(),
            Transaction::new(
                TransactionKind::Expense,
                date(2024, 6, 4),
                Category::Transport,
                500_000.0,
                None,
            )
            .unwrap(),
        ];
        let snapshot =
            SummaryService::dashboard(&list, date(2024, 6, 10), &DashboardSettings::default());
        let view = DashboardView::from_snapshot(&snapshot, false, &AmountStyle::default());

        assert_snapshot!(&view.balance, @"-2.000.000 ₫");
        assert_snapshot!(&view.budget_percent_label, @"20%");
        assert_snapshot!(&view.budget_usage, @"Đã dùng 2.000.000 ₫ / 10.000.000 ₫");
        assert!(!view.budget_alert);
        assert_snapshot!(
            view.savings_message.clone().unwrap_or_default(),
            @"Bạn chi nhiều nhất cho Di chuyển. Thử giảm 15% mục này để tiết kiệm thêm 300.000 ₫ nhé!"
        );
        assert!(view.forecast_message.ends_with("vào ngày 30."));
        assert_eq!(view.daily_chart.len(), 7);
        assert_eq!(view.daily_chart[0].label, "04/06");
        assert_eq!(view.category_chart[1].label, "Di chuyển");
        assert_eq!(view.category_chart[1].value, 2_000_000.0);
        assert_eq!(view.recent.rows.len(), 2);
        assert!(view.recent.placeholder.is_none());
        assert_eq!(view.theme_toggle_label, "Giao diện tối");

        let json = view.to_json().expect("serialize view");
        assert!(json.contains("\"budget_percent\": 20"));
    }
}
