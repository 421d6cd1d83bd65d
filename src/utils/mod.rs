//! Project-specific utilities live here.

use std::collections::HashSet;

use parking_lot::Mutex;

/// Formats a shared log prefix for project logs.
pub fn log_prefix(module: &str) -> String {
    format!("project::{module}")
}

/// Keys of operations currently running. A key can be held by one caller at
/// a time; the holder releases it by dropping the returned guard.
#[derive(Debug, Default)]
pub struct InFlight {
    keys: Mutex<HashSet<String>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key`, or `None` if another caller already holds it.
    pub fn try_begin(&self, key: &str) -> Option<InFlightGuard<'_>> {
        let mut keys = self.keys.lock();
        if !keys.insert(key.to_string()) {
            return None;
        }
        Some(InFlightGuard {
            owner: self,
            key: key.to_string(),
        })
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.keys.lock().contains(key)
    }
}

/// Releases its key on drop.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    owner: &'a InFlight,
    key: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner.keys.lock().remove(&self.key);
    }
}
