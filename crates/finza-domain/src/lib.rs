//! finza-domain
//!
//! Pure domain models (Transaction, RecurringRule, PendingWrite, etc.).
//! No I/O, no storage, no network. Only data types and core enums.

pub mod common;
pub mod pending;
pub mod recurring;
pub mod transaction;

pub use common::*;
pub use pending::*;
pub use recurring::*;
pub use transaction::*;
