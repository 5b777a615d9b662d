//! A keypad calculator engine.
//!
//! Tokens accumulate into an expression with a live preview, `=` commits
//! the result to a history log, and a single memory register can store,
//! accumulate and recall values. History and memory persist through a
//! [`KeyValueStore`].

pub mod calculator;
pub mod config;
pub mod keypad;
pub mod logging;
pub mod session;
pub mod store;

pub use calculator::{EvalError, evaluate};
pub use keypad::{Key, KeypadError, parse_keys};
pub use session::{CalculatorSession, HistoryEntry};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
