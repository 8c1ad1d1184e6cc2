//! Concrete backend plugins
//!
//! The capability implementations this crate ships: in-memory and
//! file-backed storage, JSON and binary serializers, LZ4 compression and
//! AES-256-GCM encryption transformers. All of them are registered in
//! [`PluginRegistry::with_builtin`](crate::core_plugin::PluginRegistry::with_builtin).

pub mod serializer;
pub mod storage;
pub mod transformer;

pub use serializer::{BinarySerializer, JsonSerializer};
pub use storage::{MemoryStorage, PersistentStorage};
pub use transformer::{CompressionTransformer, EncryptionTransformer};
