use serde_json::Value;
use tracing::debug;

use crate::config;

use super::{ChatInput, HISTORY_LIMIT};

impl ChatInput {
    // Step the scrollback cursor. Stepping past the newest entry parks the
    // cursor at history.len() ("fresh input") and empties the buffer; any
    // in-range position loads that entry.
    pub(crate) fn from_history(&mut self, step: isize) {
        let next = self
            .history_index
            .saturating_add_signed(step)
            .min(self.history.len());
        self.history_index = next;
        if next == self.history.len() {
            self.clear();
        } else {
            let entry = self.history[next].clone();
            self.set_buffer_end(entry);
        }
    }

    pub(crate) fn remember(&mut self, line: &str) {
        if self.history.len() >= HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(line.to_string());
        self.history_index = self.history.len();
        if self.persist_on_submit {
            self.store_history();
        }
    }

    /// Write the scrollback and cursor to the settings store now. The UI
    /// calls this at teardown so history survives sessions even with
    /// per-submit persistence turned off.
    pub fn flush_history(&mut self) {
        self.store_history();
    }

    fn store_history(&mut self) {
        let entries: Vec<Value> = self.history.iter().cloned().map(Value::from).collect();
        self.config.set(config::KEY_HISTORY, Value::Array(entries));
        self.config.set(
            config::KEY_HISTORY_INDEX,
            Value::from(self.history_index as u64),
        );
        debug!(target: "chat", entries = self.history.len(), "scrollback persisted");
    }
}
