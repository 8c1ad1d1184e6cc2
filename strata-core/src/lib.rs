//! strata-core: a pluggable key-value abstraction layer.
//!
//! Callers read and write arbitrary values through a fixed pipeline of three
//! capability kinds (storage, serialization, transformation) without
//! depending on any concrete backend:
//!
//! ```text
//! write: value → Serializer::serialize → chain forward (1..N) → Storage::set
//! read:  Storage::get → chain reverse (N..1) → Serializer::deserialize → value
//! ```
//!
//! On top of the pipeline sits [`NodeDistributor`], a CRUSH-inspired layer
//! that shards a logical store across multiple physical storage backends by
//! mapping each key deterministically to one node.

pub mod core_crush;
pub mod core_plugin;
pub mod core_store;
pub mod logging;
pub mod plugins;

#[cfg(test)]
pub mod test_utils;

pub use core_crush::NodeDistributor;
pub use core_plugin::{
    Plugin, PluginDescriptor, PluginRegistry, Serializer, Storage, StoreError, StoreResult,
    Transformer,
};
pub use core_store::{KeyValueStore, TransformerChain};
pub use logging::{init_logging, LogLevel};
