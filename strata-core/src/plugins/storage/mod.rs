//! Storage backends

mod memory;
mod persistent;

pub use memory::MemoryStorage;
pub use persistent::PersistentStorage;

use std::sync::PoisonError;

use crate::core_plugin::StoreError;

/// Convert a poisoned-lock error into a storage error.
pub(crate) fn handle_poison<T>(_err: PoisonError<T>) -> StoreError {
    StoreError::Storage("lock poisoned: a thread panicked while holding the lock".to_string())
}
