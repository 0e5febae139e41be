//! chau-domain
//!
//! Pure domain models for the personal finance tracker (transactions, categories,
//! calendar buckets, tunable parameters). No I/O, no storage, no presentation.

pub mod category;
pub mod common;
pub mod settings;
pub mod transaction;

pub use category::*;
pub use common::*;
pub use settings::*;
pub use transaction::*;
