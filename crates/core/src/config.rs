use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

// Settings keys owned by the chat input.
pub const KEY_HISTORY: &str = "chat.history";
pub const KEY_HISTORY_INDEX: &str = "chat.history.index";
pub const KEY_HISTORY_PERSIST: &str = "chat.history.persist";

/// String-keyed settings store shared across the client.
///
/// Writes are synchronous and fire-and-forget: an implementation that hits an
/// I/O problem logs it and keeps the in-memory value, it never raises.
pub trait ConfigStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value);
}

pub fn get_string_list(store: &dyn ConfigStore, key: &str) -> Vec<String> {
    match store.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

pub fn get_usize(store: &dyn ConfigStore, key: &str, default: usize) -> usize {
    store
        .get(key)
        .and_then(|v| v.as_u64())
        .map(|n| n as usize)
        .unwrap_or(default)
}

pub fn get_bool(store: &dyn ConfigStore, key: &str, default: bool) -> bool {
    store
        .get(key)
        .and_then(|v| v.as_bool())
        .unwrap_or(default)
}

/// In-memory store. Clones share the same map, so a caller can hand one clone
/// to the chat input and keep another to observe what was written.
#[derive(Clone, Default)]
pub struct MemoryConfig {
    values: Rc<RefCell<serde_json::Map<String, Value>>>,
}

impl MemoryConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfig {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.borrow_mut().insert(key.to_string(), value);
    }
}
