//! # scorebook-ledger
//!
//! **Delivery Ledger**: the ordered record of every ball bowled, per innings.
//!
//! ## Architecture
//!
//! The ledger sits between the scoring engine and the delivery store:
//! 1. **DeliveryValidator**: hard gate, rejects malformed deliveries
//! 2. **DeliveryLedger**: checks innings status, assigns over/ball position
//!    from the current legal-ball count, appends; removes the tail on undo
//! 3. **LedgerStore**: ordered storage contract with per-innings and
//!    per-player retrieval; [`MemoryLedgerStore`] is the in-process backend
//!
//! ## Delivery Flow
//!
//! ```text
//! Engine (innings shard locked) → DeliveryLedger.record()
//!     → status check → DeliveryValidator.validate() → position → LedgerStore.append()
//! ```

pub mod ledger;
pub mod store;
pub mod validator;

pub use ledger::{DeliveryLedger, LedgerCursor};
pub use store::{LedgerStore, MemoryLedgerStore};
pub use validator::DeliveryValidator;
