//! Application state and the operations a user triggers on it.
//!
//! [`App`] owns the transaction list and theme flag explicitly. Every mutation
//! updates memory first, then persists the whole list; a failed write is
//! reported through [`PersistenceStatus`] and never rolls the change back.
//! A store that could not be read is never written to until [`App::reset`]
//! clears it, so unreadable data stays on disk untouched.

use std::{fmt, path::PathBuf};

use tracing::{info, warn};

use chau_config::{Config, ConfigManager, Theme};
use chau_core::{
    storage::store_warnings, BucketingService, Clock, DashboardSettings, DashboardSnapshot,
    MonthBucket, SummaryService, TransactionService, TransactionStore,
};
use chau_domain::{Transaction, TransactionDraft, TransactionId};
use chau_storage_json::JsonTransactionStore;

use crate::{
    clock::SystemClock,
    errors::Result,
    format::{AmountStyle, DashboardView, TransactionListView},
};

const UNREADABLE_STORE_MESSAGE: &str =
    "stored transactions could not be read; reset to start saving again";

/// Outcome of writing state back to durable storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceStatus {
    Saved,
    /// The in-memory change stands but was not persisted.
    NotSaved(String),
}

impl PersistenceStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistenceStatus::Saved)
    }

    fn from_result<E: fmt::Display>(operation: &str, result: std::result::Result<(), E>) -> Self {
        match result {
            Ok(()) => PersistenceStatus::Saved,
            Err(err) => {
                warn!(operation, error = %err, "change kept in memory but not persisted");
                PersistenceStatus::NotSaved(err.to_string())
            }
        }
    }
}

/// The only mutable state of a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Newest first.
    pub transactions: Vec<Transaction>,
    pub dark_mode: bool,
}

pub struct App<S: TransactionStore, C: Clock> {
    store: S,
    clock: C,
    config: Config,
    config_manager: Option<ConfigManager>,
    state: AppState,
    load_status: PersistenceStatus,
    store_writable: bool,
}

impl<S: TransactionStore, C: Clock> App<S, C> {
    /// Loads the stored list. An unreadable store yields an empty session.
    pub fn open(store: S, clock: C, config: Config) -> Self {
        let (transactions, load_status) = match store.load() {
            Ok(transactions) => {
                for warning in store_warnings(&transactions) {
                    warn!(%warning, "stored transaction list");
                }
                (transactions, PersistenceStatus::Saved)
            }
            Err(err) => {
                warn!(error = %err, "transaction store unavailable, starting empty");
                (Vec::new(), PersistenceStatus::NotSaved(err.to_string()))
            }
        };
        let state = AppState {
            transactions,
            dark_mode: config.dark_mode(),
        };
        let store_writable = load_status.is_saved();
        Self {
            store,
            clock,
            config,
            config_manager: None,
            state,
            load_status,
            store_writable,
        }
    }

    /// Persists theme changes through `manager`.
    pub fn with_config_manager(mut self, manager: ConfigManager) -> Self {
        self.config_manager = Some(manager);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn load_status(&self) -> &PersistenceStatus {
        &self.load_status
    }

    /// False while the session runs on top of a store it failed to read.
    pub fn store_writable(&self) -> bool {
        self.store_writable
    }

    pub fn add_transaction(
        &mut self,
        draft: TransactionDraft,
    ) -> Result<(TransactionId, PersistenceStatus)> {
        let transaction = Transaction::try_from(draft)?;
        let id = TransactionService::add(&mut self.state.transactions, transaction)?;
        Ok((id, self.persist("add")))
    }

    /// Removes the first transaction with `id`.
    pub fn delete_transaction(&mut self, id: &TransactionId) -> Result<PersistenceStatus> {
        TransactionService::remove(&mut self.state.transactions, id)?;
        Ok(self.persist("delete"))
    }

    /// Drops every transaction and clears the store.
    ///
    /// A successful clear makes an unreadable store writable again.
    pub fn reset(&mut self) -> PersistenceStatus {
        let dropped = TransactionService::clear(&mut self.state.transactions);
        info!(dropped, "transaction list reset");
        let status = PersistenceStatus::from_result("reset", self.store.clear());
        if status.is_saved() && !self.store_writable {
            info!("transaction store writable again after reset");
            self.store_writable = true;
        }
        status
    }

    /// Flips dark mode. Without a config manager the flag lives in memory only.
    pub fn toggle_theme(&mut self) -> PersistenceStatus {
        self.state.dark_mode = !self.state.dark_mode;
        let theme = Theme::from_dark_mode(self.state.dark_mode);
        self.config.theme = theme;
        match &self.config_manager {
            Some(manager) => {
                let result = manager.set_theme(theme).map(|_| ());
                PersistenceStatus::from_result("toggle_theme", result)
            }
            None => PersistenceStatus::NotSaved("no configuration storage attached".into()),
        }
    }

    /// One render cycle computed from scratch.
    pub fn snapshot(&self) -> DashboardSnapshot {
        SummaryService::dashboard(
            &self.state.transactions,
            self.clock.today(),
            &dashboard_settings(&self.config),
        )
    }

    pub fn view(&self) -> DashboardView {
        DashboardView::from_snapshot(
            &self.snapshot(),
            self.state.dark_mode,
            &self.amount_style(),
        )
    }

    pub fn history_view(&self) -> TransactionListView {
        TransactionListView::full(&self.state.transactions, &self.amount_style())
    }

    pub fn amount_style(&self) -> AmountStyle {
        AmountStyle::from_config(&self.config)
    }

    /// Past-month income and expense, newest month first.
    pub fn monthly_history(&self) -> Vec<MonthBucket> {
        BucketingService::history(&self.state.transactions, self.clock.today())
    }

    fn persist(&self, operation: &str) -> PersistenceStatus {
        if !self.store_writable {
            warn!(operation, "stored data unreadable, change kept in memory only");
            return PersistenceStatus::NotSaved(UNREADABLE_STORE_MESSAGE.into());
        }
        PersistenceStatus::from_result(operation, self.store.save(&self.state.transactions))
    }
}

/// Opens a session rooted at `base`: config under `base/config`, transactions
/// in `base` itself.
pub fn open_in(base: PathBuf) -> Result<App<JsonTransactionStore, SystemClock>> {
    let manager = ConfigManager::with_base_dir(base.clone())?;
    let config = manager.load()?;
    config.validate()?;
    let store = JsonTransactionStore::new(base)?;
    info!(path = %store.path().display(), "opening transaction store");
    Ok(App::open(store, SystemClock, config).with_config_manager(manager))
}

pub fn dashboard_settings(config: &Config) -> DashboardSettings {
    DashboardSettings {
        budget_limit: config.budget_limit,
        daily_window_days: config.daily_window_days,
        recent_limit: config.recent_limit,
        forecast: config.forecast,
        palette: config.palette.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chau_core::{FixedClock, InMemoryStore, StoreError};
    use chau_domain::{Identifiable, TransactionError};
    use chrono::NaiveDate;
    use std::sync::Mutex;

    use crate::errors::AppError;

    struct ReadOnlyStore(Vec<Transaction>);

    impl TransactionStore for ReadOnlyStore {
        fn load(&self) -> std::result::Result<Vec<Transaction>, StoreError> {
            Ok(self.0.clone())
        }

        fn save(&self, _: &[Transaction]) -> std::result::Result<(), StoreError> {
            Err(StoreError::Unavailable("quota exceeded".into()))
        }

        fn clear(&self) -> std::result::Result<(), StoreError> {
            Err(StoreError::Unavailable("quota exceeded".into()))
        }
    }

    /// Fails to load until cleared; counts every write it accepts.
    #[derive(Default)]
    struct UnreadableStore {
        saves: Mutex<usize>,
        cleared: Mutex<bool>,
    }

    impl TransactionStore for UnreadableStore {
        fn load(&self) -> std::result::Result<Vec<Transaction>, StoreError> {
            if *self.cleared.lock().unwrap() {
                Ok(Vec::new())
            } else {
                Err(StoreError::Corrupt("invalid type: null, expected f64".into()))
            }
        }

        fn save(&self, _: &[Transaction]) -> std::result::Result<(), StoreError> {
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }

        fn clear(&self) -> std::result::Result<(), StoreError> {
            *self.cleared.lock().unwrap() = true;
            Ok(())
        }
    }

    fn clock() -> FixedClock {
        FixedClock::new(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
    }

    fn draft(kind: &str, date: &str, category: &str, amount: &str) -> TransactionDraft {
        TransactionDraft {
            kind: kind.into(),
            date: date.into(),
            category: category.into(),
            amount: amount.into(),
            note: String::new(),
        }
    }

    #[test]
    fn add_persists_and_prepends() {
        let mut app = App::open(InMemoryStore::new(), clock(), Config::default());
        let (first, status) = app
            .add_transaction(draft("thu", "2024-06-01", "Khác", "5000000"))
            .unwrap();
        assert!(status.is_saved());
        let (second, _) = app
            .add_transaction(draft("chi", "2024-06-05", "Ăn uống", "1000000"))
            .unwrap();

        assert_eq!(app.transactions()[0].id(), &second);
        assert_eq!(app.transactions()[1].id(), &first);
        assert_eq!(app.store.load().unwrap().len(), 2);

        let snapshot = app.snapshot();
        assert_eq!(snapshot.aggregates.total_balance, 4_000_000.0);
        assert_eq!(snapshot.aggregates.budget_percent, 10);
    }

    #[test]
    fn invalid_draft_leaves_list_untouched() {
        let mut app = App::open(InMemoryStore::new(), clock(), Config::default());
        let err = app
            .add_transaction(draft("chi", "2024-06-05", "Ăn uống", "-5"))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidTransaction(TransactionError::NegativeAmount(_))
        ));
        assert!(app.transactions().is_empty());
    }

    #[test]
    fn unavailable_store_starts_empty_and_reports_unsaved() {
        let mut app = App::open(InMemoryStore::unavailable(), clock(), Config::default());
        assert!(!app.load_status().is_saved());
        assert!(app.transactions().is_empty());

        let (_, status) = app
            .add_transaction(draft("chi", "2024-06-05", "Ăn uống", "10"))
            .unwrap();
        assert!(matches!(status, PersistenceStatus::NotSaved(_)));
        assert_eq!(app.transactions().len(), 1);
    }

    #[test]
    fn unreadable_store_is_not_overwritten_until_reset() {
        let mut app = App::open(UnreadableStore::default(), clock(), Config::default());
        assert!(!app.load_status().is_saved());
        assert!(!app.store_writable());

        let (id, status) = app
            .add_transaction(draft("chi", "2024-06-05", "Ăn uống", "10"))
            .unwrap();
        assert!(matches!(status, PersistenceStatus::NotSaved(_)));
        assert!(!app.delete_transaction(&id).unwrap().is_saved());
        assert_eq!(*app.store.saves.lock().unwrap(), 0);

        assert!(app.reset().is_saved());
        assert!(app.store_writable());
        let (_, status) = app
            .add_transaction(draft("chi", "2024-06-05", "Ăn uống", "10"))
            .unwrap();
        assert!(status.is_saved());
        assert_eq!(*app.store.saves.lock().unwrap(), 1);
    }

    #[test]
    fn failed_save_does_not_roll_back_delete() {
        let kept = Transaction::try_from(draft("chi", "2024-06-05", "Ăn uống", "10")).unwrap();
        let id = kept.id().clone();
        let mut app = App::open(ReadOnlyStore(vec![kept]), clock(), Config::default());

        let status = app.delete_transaction(&id).unwrap();
        assert!(!status.is_saved());
        assert!(app.transactions().is_empty());

        let status = app.reset();
        assert_eq!(
            status,
            PersistenceStatus::NotSaved("Store unavailable: quota exceeded".into())
        );
    }

    #[test]
    fn delete_unknown_id_is_an_error() {
        let mut app = App::open(InMemoryStore::new(), clock(), Config::default());
        let err = app
            .delete_transaction(&TransactionId::from("missing"))
            .unwrap_err();
        assert!(matches!(err, AppError::TransactionNotFound(_)));
    }

    #[test]
    fn reset_clears_memory_and_store() {
        let mut app = App::open(InMemoryStore::new(), clock(), Config::default());
        app.add_transaction(draft("chi", "2024-06-05", "Ăn uống", "10"))
            .unwrap();
        assert!(app.reset().is_saved());
        assert!(app.transactions().is_empty());
        assert!(app.store.load().unwrap().is_empty());
        assert_eq!(
            app.history_view().placeholder.as_deref(),
            Some(crate::format::EMPTY_HISTORY_MESSAGE)
        );
    }

    #[test]
    fn toggle_theme_without_manager_stays_in_memory() {
        let mut app = App::open(InMemoryStore::new(), clock(), Config::default());
        assert!(!app.state().dark_mode);
        let status = app.toggle_theme();
        assert!(!status.is_saved());
        assert!(app.state().dark_mode);
        assert_eq!(app.config().theme, Theme::Dark);
        assert_eq!(app.view().theme_toggle_label, "Giao diện sáng");
    }

    #[test]
    fn snapshot_uses_configured_window_and_limit() {
        let config = Config {
            budget_limit: 100.0,
            daily_window_days: 3,
            recent_limit: 1,
            ..Config::default()
        };
        let mut app = App::open(InMemoryStore::new(), clock(), config);
        app.add_transaction(draft("chi", "2024-06-10", "Mua sắm", "95"))
            .unwrap();
        app.add_transaction(draft("chi", "2024-05-10", "Mua sắm", "30"))
            .unwrap();

        let snapshot = app.snapshot();
        assert_eq!(snapshot.daily_series.len(), 3);
        assert_eq!(snapshot.recent.len(), 1);
        assert_eq!(snapshot.aggregates.budget_percent, 95);
        assert!(app.view().budget_alert);

        let history = app.monthly_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].totals.expense, 30.0);
    }

    #[test]
    fn view_formats_amounts_with_configured_locale() {
        let config = Config {
            locale: "en-US".into(),
            currency_symbol: "VND".into(),
            ..Config::default()
        };
        let mut app = App::open(InMemoryStore::new(), clock(), config);
        app.add_transaction(draft("thu", "2024-06-01", "Khác", "1234567.5"))
            .unwrap();

        assert_eq!(app.view().balance, "1,234,567.5 VND");
        assert_eq!(app.history_view().rows[0].amount_label, "+1,234,567.5 VND");
    }
}
