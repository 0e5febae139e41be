//! Domain models for recorded income and expense transactions.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{category::Category, common::*};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reasons a transaction is refused before it enters the list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransactionError {
    #[error("amount must not be negative (got {0})")]
    NegativeAmount(f64),
    #[error("amount must be a finite number")]
    NonFiniteAmount,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("malformed date `{0}`, expected YYYY-MM-DD")]
    MalformedDate(String),
    #[error("malformed amount `{0}`")]
    MalformedAmount(String),
    #[error("unknown transaction type `{0}`")]
    UnknownKind(String),
}

/// Opaque identifier, stable for the lifetime of a transaction.
///
/// New identifiers are random UUIDs; identifiers read from older data (such as
/// millisecond timestamps) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Direction of a transaction. Stored as `thu` (income) / `chi` (expense).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "thu", alias = "income")]
    Income,
    #[serde(rename = "chi", alias = "expense")]
    Expense,
}

impl TransactionKind {
    /// Sign applied to the amount when computing a balance.
    pub fn sign(self) -> f64 {
        match self {
            TransactionKind::Income => 1.0,
            TransactionKind::Expense => -1.0,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "thu" | "income" => Ok(TransactionKind::Income),
            "chi" | "expense" => Ok(TransactionKind::Expense),
            "" => Err(TransactionError::MissingField("type")),
            other => Err(TransactionError::UnknownKind(other.to_string())),
        }
    }
}

/// A single recorded income or expense event. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    id: TransactionId,
    #[serde(rename = "type")]
    kind: TransactionKind,
    date: NaiveDate,
    category: Category,
    amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl Transaction {
    /// Creates a transaction with a freshly generated identifier.
    pub fn new(
        kind: TransactionKind,
        date: NaiveDate,
        category: Category,
        amount: f64,
        note: Option<String>,
    ) -> Result<Self, TransactionError> {
        Self::with_id(TransactionId::generate(), kind, date, category, amount, note)
    }

    /// Creates a transaction with a caller-supplied identifier.
    pub fn with_id(
        id: TransactionId,
        kind: TransactionKind,
        date: NaiveDate,
        category: Category,
        amount: f64,
        note: Option<String>,
    ) -> Result<Self, TransactionError> {
        validate_amount(amount)?;
        Ok(Self {
            id,
            kind,
            date,
            category,
            amount,
            note: normalize_note(note),
        })
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &TransactionId {
        &self.id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }

    fn signed_amount(&self) -> f64 {
        self.kind.sign() * self.amount
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "txn:{} [{} {} {}]",
            self.id,
            self.kind,
            self.category,
            self.date.format(DATE_FORMAT)
        )
    }
}

/// Wire shape of a persisted transaction, validated on the way in.
#[derive(Debug, Deserialize)]
struct TransactionRecord {
    id: TransactionId,
    #[serde(rename = "type")]
    kind: TransactionKind,
    date: NaiveDate,
    category: Category,
    amount: f64,
    #[serde(default)]
    note: Option<String>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = TransactionError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Transaction::with_id(
            record.id,
            record.kind,
            record.date,
            record.category,
            record.amount,
            record.note,
        )
    }
}

/// Raw, unvalidated field values collected from the entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub kind: String,
    pub date: String,
    pub category: String,
    pub amount: String,
    pub note: String,
}

impl TryFrom<TransactionDraft> for Transaction {
    type Error = TransactionError;

    fn try_from(draft: TransactionDraft) -> Result<Self, Self::Error> {
        let kind: TransactionKind = draft.kind.parse()?;
        let date = parse_date(&draft.date)?;
        let category = draft.category.trim();
        if category.is_empty() {
            return Err(TransactionError::MissingField("category"));
        }
        let amount = parse_amount(&draft.amount)?;
        Transaction::new(
            kind,
            date,
            Category::from_label(category),
            amount,
            Some(draft.note),
        )
    }
}

/// Parses a `YYYY-MM-DD` boundary date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, TransactionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TransactionError::MissingField("date"));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| TransactionError::MalformedDate(trimmed.to_string()))
}

fn parse_amount(raw: &str) -> Result<f64, TransactionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TransactionError::MissingField("amount"));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| TransactionError::MalformedAmount(trimmed.to_string()))
}

fn validate_amount(amount: f64) -> Result<(), TransactionError> {
    if !amount.is_finite() {
        return Err(TransactionError::NonFiniteAmount);
    }
    if amount < 0.0 {
        return Err(TransactionError::NegativeAmount(amount));
    }
    Ok(())
}

fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
