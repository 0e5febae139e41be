//! Balance, monthly totals, budget usage and per-category expense totals.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use chau_domain::{Amounted, Category, CategoryPalette, MonthKey, Transaction};

/// Aggregate figures derived from the full transaction list.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    /// Signed sum over every transaction, regardless of date.
    pub total_balance: f64,
    pub current_month_income: f64,
    pub current_month_expense: f64,
    /// Share of the budget limit spent this month, clamped to `0..=100`.
    pub budget_percent: u8,
    /// All-time expense totals per category.
    pub category_expense_totals: CategoryTotals,
}

/// Income and expense sums for one period.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodTotals {
    pub income: f64,
    pub expense: f64,
}

impl PeriodTotals {
    pub fn record(&mut self, txn: &Transaction) {
        if txn.is_income() {
            self.income += txn.amount();
        } else {
            self.expense += txn.amount();
        }
    }
}

/// Expense totals keyed by category.
///
/// Iteration follows [`Category`] ordering, which makes [`CategoryTotals::top`]
/// deterministic when several categories share the highest total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    totals: BTreeMap<Category, f64>,
}

impl CategoryTotals {
    pub fn add(&mut self, category: &Category, amount: f64) {
        *self.totals.entry(category.clone()).or_insert(0.0) += amount;
    }

    pub fn get(&self, category: &Category) -> f64 {
        self.totals.get(category).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, f64)> {
        self.totals.iter().map(|(category, total)| (category, *total))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Category with the largest total; the first in category order wins a tie.
    pub fn top(&self) -> Option<(&Category, f64)> {
        self.iter().fold(None, |best, (category, total)| match best {
            Some((_, best_total)) if total <= best_total => best,
            _ => Some((category, total)),
        })
    }
}

/// One slice of the category chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub category: Category,
    pub color: String,
    pub total: f64,
}

/// Computes the aggregate figures shown on the dashboard.
pub struct AggregationService;

impl AggregationService {
    /// Computes every aggregate for the list as seen on `today`.
    pub fn aggregate(
        transactions: &[Transaction],
        today: NaiveDate,
        budget_limit: f64,
    ) -> Aggregates {
        let current = Self::month_totals(transactions, MonthKey::from_date(today));
        Aggregates {
            total_balance: Self::total_balance(transactions),
            current_month_income: current.income,
            current_month_expense: current.expense,
            budget_percent: Self::budget_percent(current.expense, budget_limit),
            category_expense_totals: Self::category_expense_totals(transactions),
        }
    }

    pub fn total_balance(transactions: &[Transaction]) -> f64 {
        transactions.iter().map(Amounted::signed_amount).sum()
    }

    /// Income and expense restricted to a single calendar month.
    pub fn month_totals(transactions: &[Transaction], month: MonthKey) -> PeriodTotals {
        transactions
            .iter()
            .filter(|txn| month.contains(txn.date()))
            .fold(PeriodTotals::default(), |mut totals, txn| {
                totals.record(txn);
                totals
            })
    }

    /// `round(expense / limit * 100)` clamped to `0..=100`; 0 for a non-positive limit.
    pub fn budget_percent(expense: f64, budget_limit: f64) -> u8 {
        if !budget_limit.is_finite() || budget_limit <= 0.0 || !expense.is_finite() {
            return 0;
        }
        let percent = (expense / budget_limit * 100.0).round();
        percent.clamp(0.0, 100.0) as u8
    }

    pub fn category_expense_totals(transactions: &[Transaction]) -> CategoryTotals {
        let mut totals = CategoryTotals::default();
        for txn in transactions.iter().filter(|txn| txn.is_expense()) {
            totals.add(txn.category(), txn.amount());
        }
        totals
    }

    /// Chart slices in palette order (zero totals kept), plus the summed total of
    /// categories the palette has no color for.
    pub fn category_slices(
        totals: &CategoryTotals,
        palette: &CategoryPalette,
    ) -> (Vec<CategorySlice>, f64) {
        let slices = palette
            .entries()
            .iter()
            .map(|entry| CategorySlice {
                category: entry.category.clone(),
                color: entry.color.clone(),
                total: totals.get(&entry.category),
            })
            .collect();
        let uncategorized = totals
            .iter()
            .filter(|(category, _)| palette.color_for(category).is_none())
            .map(|(_, total)| total)
            .sum();
        (slices, uncategorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chau_domain::TransactionKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(kind: TransactionKind, on: NaiveDate, category: Category, amount: f64) -> Transaction {
        Transaction::new(kind, on, category, amount, None).unwrap()
    }

    #[test]
    fn empty_list_yields_zero_aggregates() {
        let aggregates = AggregationService::aggregate(&[], date(2024, 6, 10), 10_000_000.0);
        assert_eq!(aggregates.total_balance, 0.0);
        assert_eq!(aggregates.current_month_income, 0.0);
        assert_eq!(aggregates.current_month_expense, 0.0);
        assert_eq!(aggregates.budget_percent, 0);
        assert!(aggregates.category_expense_totals.is_empty());
    }

    #[test]
    fn month_totals_ignore_same_month_of_other_years() {
        let list = vec![
            txn(TransactionKind::Expense, date(2024, 6, 3), Category::Food, 100.0),
            txn(TransactionKind::Expense, date(2023, 6, 3), Category::Food, 900.0),
            txn(TransactionKind::Income, date(2024, 6, 1), Category::Other, 500.0),
        ];
        let aggregates = AggregationService::aggregate(&list, date(2024, 6, 10), 1_000.0);
        assert_eq!(aggregates.current_month_expense, 100.0);
        assert_eq!(aggregates.current_month_income, 500.0);
        assert_eq!(aggregates.total_balance, -500.0);
        assert_eq!(aggregates.budget_percent, 10);
        assert_eq!(
            aggregates.category_expense_totals.get(&Category::Food),
            1_000.0
        );
    }

    #[test]
    fn budget_percent_clamps_and_guards() {
        assert_eq!(AggregationService::budget_percent(0.0, 100.0), 0);
        assert_eq!(AggregationService::budget_percent(45.4, 100.0), 45);
        assert_eq!(AggregationService::budget_percent(1.0, 8.0), 13);
        assert_eq!(AggregationService::budget_percent(250.0, 100.0), 100);
        assert_eq!(AggregationService::budget_percent(50.0, 0.0), 0);
        assert_eq!(AggregationService::budget_percent(50.0, -10.0), 0);
    }

    #[test]
    fn top_category_breaks_ties_by_category_order() {
        let mut totals = CategoryTotals::default();
        totals.add(&Category::Shopping, 200.0);
        totals.add(&Category::Transport, 200.0);
        totals.add(&Category::Food, 50.0);
        let (category, total) = totals.top().expect("non-empty");
        assert_eq!(category, &Category::Transport);
        assert_eq!(total, 200.0);
        assert!(CategoryTotals::default().top().is_none());
    }

    #[test]
    fn category_slices_follow_palette_and_split_out_unknown_labels() {
        let list = vec![
            txn(TransactionKind::Expense, date(2024, 6, 3), Category::Bills, 30.0),
            txn(
                TransactionKind::Expense,
                date(2024, 6, 3),
                Category::Uncategorized("Thú cưng".into()),
                12.0,
            ),
            txn(TransactionKind::Income, date(2024, 6, 3), Category::Food, 99.0),
        ];
        let totals = AggregationService::category_expense_totals(&list);
        let (slices, uncategorized) =
            AggregationService::category_slices(&totals, &CategoryPalette::default());
        assert_eq!(slices.len(), 8);
        assert_eq!(slices[0].category, Category::Food);
        assert_eq!(slices[0].total, 0.0);
        assert_eq!(slices[3].category, Category::Bills);
        assert_eq!(slices[3].total, 30.0);
        assert_eq!(slices[3].color, "#34D399");
        assert_eq!(uncategorized, 12.0);
    }
}
