//! The calculator session: expression building, live preview, equals
//! commit, memory register and history log.
//!
//! A session is the single source of truth for whatever presents the
//! calculator. Every operation runs to completion and never fails; bad
//! input only affects the preview.

mod history;
mod memory;

pub use history::{HistoryEntry, HistoryLog};
pub use memory::MemoryRegister;

use crate::calculator::{evaluate, format_number, parse_number, sanitize};
use crate::keypad::Key;
use crate::store::KeyValueStore;
use tracing::{debug, warn};

/// Store key holding the JSON history array.
pub const HISTORY_KEY: &str = "history";
/// Store key holding the stringified memory value.
pub const MEMORY_KEY: &str = "memory";

/// Display value of an empty expression.
const RESET_EXPRESSION: &str = "0";

/// A calculator session backed by a key-value store.
#[derive(Debug)]
pub struct CalculatorSession<S: KeyValueStore> {
    expression: String,
    live_preview: String,
    after_equals: bool,
    memory: MemoryRegister,
    history: HistoryLog,
    store: S,
}

impl<S: KeyValueStore> CalculatorSession<S> {
    /// Start a session, hydrating history and memory from `store`.
    ///
    /// Unreadable or malformed stored values are logged and ignored.
    pub fn new(store: S) -> Self {
        let history = load_history(&store);
        let memory = load_memory(&store);
        debug!(
            entries = history.len(),
            memory = ?memory.value(),
            "Session hydrated"
        );

        Self {
            expression: RESET_EXPRESSION.to_string(),
            live_preview: String::new(),
            after_equals: false,
            memory,
            history,
            store,
        }
    }

    /// The expression as currently displayed. Never empty.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The live preview, or an empty string when there is none.
    pub fn live_preview(&self) -> &str {
        &self.live_preview
    }

    /// Whether the next token starts a fresh expression.
    pub fn is_after_equals(&self) -> bool {
        self.after_equals
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn memory(&self) -> Option<f64> {
        self.memory.value()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append a keypad token to the expression.
    ///
    /// Right after a commit the token replaces the expression outright.
    /// Otherwise it extends it (replacing a bare `"0"`), and the preview
    /// is refreshed. If the new text does not evaluate, the previous
    /// preview stays so a trailing operator does not blank it.
    pub fn append_token(&mut self, token: &str) {
        if token.is_empty() {
            return;
        }

        if self.after_equals {
            self.expression = token.to_string();
            self.live_preview.clear();
            self.after_equals = false;
            return;
        }

        if self.expression == RESET_EXPRESSION {
            self.expression = token.to_string();
        } else {
            self.expression.push_str(token);
        }

        match evaluate(&sanitize(&self.expression)) {
            Ok(value) => self.live_preview = format_number(value),
            Err(e) => debug!(expression = %self.expression, "Keeping stale preview: {}", e),
        }
    }

    /// Remove the last character, bottoming out at `"0"`.
    ///
    /// Unlike [`append_token`](Self::append_token), a failed evaluation
    /// clears the preview.
    pub fn backspace(&mut self) {
        if self.expression.chars().count() > 1 {
            self.expression.pop();
        } else {
            self.expression = RESET_EXPRESSION.to_string();
        }

        match evaluate(&sanitize(&self.expression)) {
            Ok(value) => self.live_preview = format_number(value),
            Err(e) => {
                debug!(expression = %self.expression, "Clearing preview: {}", e);
                self.live_preview.clear();
            }
        }
    }

    /// Reset the expression and preview. Memory, history and the
    /// fresh-start flag are untouched.
    pub fn clear(&mut self) {
        self.expression = RESET_EXPRESSION.to_string();
        self.live_preview.clear();
    }

    /// Evaluate the expression as typed and commit the result.
    ///
    /// On success the calculation is logged and persisted, the result
    /// becomes the expression, and the next token starts fresh. On
    /// failure nothing changes.
    pub fn commit_equals(&mut self) {
        let value = match evaluate(&self.expression) {
            Ok(value) => value,
            Err(e) => {
                debug!(expression = %self.expression, "Commit ignored: {}", e);
                return;
            }
        };

        let result = format_number(value);
        let expression = std::mem::replace(&mut self.expression, result.clone());
        debug!(%expression, %result, "Committed");

        self.history.push(HistoryEntry::new(expression, result));
        self.persist_history();
        self.after_equals = true;
    }

    /// Put the stored value on the display. Does nothing when memory is
    /// empty.
    pub fn memory_recall(&mut self) {
        if let Some(value) = self.memory.value() {
            self.expression = format_number(value);
            self.live_preview.clear();
        }
    }

    /// Replace the stored value with the number on the display.
    pub fn memory_store(&mut self) {
        let operand = parse_number(&self.expression);
        self.memory.store(operand);
        self.persist_memory();
    }

    /// Add the number on the display to memory.
    pub fn memory_add(&mut self) {
        let operand = parse_number(&self.expression);
        self.memory.add(operand);
        self.persist_memory();
    }

    /// Subtract the number on the display from memory.
    pub fn memory_subtract(&mut self) {
        let operand = parse_number(&self.expression);
        self.memory.subtract(operand);
        self.persist_memory();
    }

    pub fn memory_clear(&mut self) {
        self.memory.clear();
        if let Err(e) = self.store.remove(MEMORY_KEY) {
            warn!("Failed to remove stored memory: {}", e);
        }
    }

    pub fn history_clear(&mut self) {
        self.history.clear();
        if let Err(e) = self.store.remove(HISTORY_KEY) {
            warn!("Failed to remove stored history: {}", e);
        }
    }

    /// Dispatch a keypad key to the matching operation.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Token(c) => {
                let mut buf = [0u8; 4];
                self.append_token(c.encode_utf8(&mut buf));
            }
            Key::Equals => self.commit_equals(),
            Key::Backspace => self.backspace(),
            Key::ClearEntry | Key::Clear => self.clear(),
            Key::MemoryClear => self.memory_clear(),
            Key::MemoryRecall => self.memory_recall(),
            Key::MemoryAdd => self.memory_add(),
            Key::MemorySubtract => self.memory_subtract(),
            Key::MemoryStore => self.memory_store(),
            Key::HistoryClear => self.history_clear(),
        }
    }

    fn persist_history(&mut self) {
        let json = match self.history.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize history: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(HISTORY_KEY, &json) {
            warn!("Failed to persist history: {}", e);
        }
    }

    fn persist_memory(&mut self) {
        let Some(value) = self.memory.value() else {
            return;
        };
        if let Err(e) = self.store.set(MEMORY_KEY, &format_number(value)) {
            warn!("Failed to persist memory: {}", e);
        }
    }
}

fn load_history(store: &impl KeyValueStore) -> HistoryLog {
    match store.get(HISTORY_KEY) {
        Ok(Some(json)) => HistoryLog::from_json(&json).unwrap_or_else(|e| {
            warn!("Ignoring malformed stored history: {}", e);
            HistoryLog::new()
        }),
        Ok(None) => HistoryLog::new(),
        Err(e) => {
            warn!("Failed to read stored history: {}", e);
            HistoryLog::new()
        }
    }
}

fn load_memory(store: &impl KeyValueStore) -> MemoryRegister {
    match store.get(MEMORY_KEY) {
        Ok(Some(text)) => MemoryRegister::with_value(parse_number(&text)),
        Ok(None) => MemoryRegister::new(),
        Err(e) => {
            warn!("Failed to read stored memory: {}", e);
            MemoryRegister::new()
        }
    }
}
