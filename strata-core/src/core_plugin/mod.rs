//! Capability contracts for pluggable backends
//!
//! Every backend satisfies one of three narrow interfaces: [`Storage`] for
//! key-value persistence, [`Serializer`] for converting values to and from
//! bytes, and [`Transformer`] for reversible byte-level transforms such as
//! compression or encryption. The composition engine in
//! [`core_store`](crate::core_store) only ever speaks these traits; it never
//! constructs a concrete backend itself.
//!
//! Every capability method is async. Backends that complete synchronously
//! simply return ready futures; there is no value-or-future special case.

pub mod errors;
pub mod keys;
pub mod registry;

pub use errors::{StoreError, StoreResult};
pub use registry::{PluginDescriptor, PluginRegistry};

use async_trait::async_trait;
use serde_json::Value;

/// The base contract every plugin satisfies.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Prepare the plugin for operation: load initial data, open files,
    /// allocate resources. Must be awaited to completion before any other
    /// method is called; calling it again after success is a no-op.
    async fn initialize(&self) -> StoreResult<()> {
        Ok(())
    }

    /// Serializable descriptor from which an equivalent instance can be
    /// rebuilt through a [`PluginRegistry`].
    fn descriptor(&self) -> PluginDescriptor;
}

/// Key-value storage capability.
///
/// Keys are opaque strings, values opaque byte buffers. Implementations must
/// treat an absent key as `Ok(None)` on `get` and as success on `delete`.
#[async_trait]
pub trait Storage: Plugin {
    /// Retrieve the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, overwriting any existing value.
    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()>;

    /// Remove `key`. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// All keys currently present at this storage boundary.
    async fn list(&self) -> StoreResult<Vec<String>>;
}

impl std::fmt::Debug for dyn Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Storage").field(&self.descriptor()).finish()
    }
}

/// Serialization capability.
///
/// Values travel through the pipeline as the self-describing
/// [`serde_json::Value`] data model; only the serializer interprets them.
#[async_trait]
pub trait Serializer: Plugin {
    /// Encode `value` into bytes suitable for storage.
    async fn serialize(&self, value: &Value) -> StoreResult<Vec<u8>>;

    /// Decode bytes produced by `serialize` back into a value.
    async fn deserialize(&self, data: &[u8]) -> StoreResult<Value>;
}

/// Reversible byte transform capability.
///
/// Implementations must hold `reverse(transform(b)) == b` for every byte
/// buffer `b`. Each transformer's `reverse` only undoes its own `transform`;
/// composing several stages is the chain's job, not the transformer's.
#[async_trait]
pub trait Transformer: Plugin {
    /// Apply the forward transformation (compress, encrypt, ...).
    async fn transform(&self, data: Vec<u8>) -> StoreResult<Vec<u8>>;

    /// Undo `transform`, restoring the original bytes.
    async fn reverse(&self, data: Vec<u8>) -> StoreResult<Vec<u8>>;
}

impl std::fmt::Debug for dyn Transformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Transformer").field(&self.descriptor()).finish()
    }
}
