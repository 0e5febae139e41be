#![allow(dead_code)]

use std::path::PathBuf;

use chau_money::{Transaction, TransactionDraft};
use chrono::NaiveDate;
use tempfile::TempDir;

/// Creates an isolated data directory. Keep the guard alive for the test's duration.
pub fn setup_test_env() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    (temp, base)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn draft(kind: &str, date: &str, category: &str, amount: &str, note: &str) -> TransactionDraft {
    TransactionDraft {
        kind: kind.into(),
        date: date.into(),
        category: category.into(),
        amount: amount.into(),
        note: note.into(),
    }
}

pub fn expense(date: &str, category: &str, amount: &str) -> Transaction {
    Transaction::try_from(draft("chi", date, category, amount, "")).expect("valid expense")
}
