//! chau-core
//!
//! Statistics and forecasting engines for the finance tracker.
//! Depends on chau-domain. Pure functions of a transaction list and a reference
//! date; no terminal I/O. Filesystem access is limited to [`fs_util`].

pub mod aggregation_service;
pub mod bucketing_service;
pub mod error;
pub mod forecast_service;
pub mod fs_util;
pub mod storage;
pub mod summary_service;
pub mod time;
pub mod transaction_service;

pub use aggregation_service::*;
pub use bucketing_service::*;
pub use error::CoreError;
pub use forecast_service::*;
pub use storage::{InMemoryStore, StoreError, TransactionStore};
pub use summary_service::*;
pub use time::{Clock, FixedClock};
pub use transaction_service::*;
