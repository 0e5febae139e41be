#![doc(test(attr(deny(warnings))))]

//! Chau Money computes the statistics behind a personal finance dashboard:
//! balances, monthly budget usage, per-category spending, daily expense series
//! and an end-of-month balance forecast with a savings suggestion.

pub mod app;
pub mod clock;
pub mod errors;
pub mod format;
pub mod utils;

pub use app::{open_in, App, AppState, PersistenceStatus};
pub use clock::SystemClock;
pub use errors::{AppError, Result};

pub use chau_config::{Config, ConfigManager, Theme};
pub use chau_core::{DashboardSnapshot, FixedClock, InMemoryStore, TransactionStore};
pub use chau_domain::{Category, Transaction, TransactionDraft, TransactionId, TransactionKind};
pub use chau_storage_json::JsonTransactionStore;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        let build = utils::build_info::current();
        tracing::info!(build = %build.summary(), "Chau Money tracing initialized.");
    });
}
