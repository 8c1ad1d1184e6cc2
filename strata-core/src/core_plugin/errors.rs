/*
    errors.rs - Error types shared across the plugin pipeline

    One taxonomy for every fallible operation in the crate:
    - distributor routing (no available nodes)
    - registry reconstruction (unregistered tag, bad config)
    - backend failures, propagated unchanged and never retried

    Absent keys are not errors: `get` on a missing key is Ok(None).
*/

use thiserror::Error;

/// Errors surfaced by stores, distributors, registries and plugins
#[derive(Debug, Error)]
pub enum StoreError {
    /// The distributor has zero available nodes at call time
    #[error("no available nodes")]
    NoAvailableNodes,

    /// Registry lookup miss while rebuilding a plugin from its descriptor
    #[error("unregistered plugin type: {0}")]
    UnregisteredPluginType(String),

    /// A descriptor's config could not construct the plugin it names
    #[error("invalid plugin config: {0}")]
    InvalidConfig(String),

    /// Storage backend failure
    #[error("storage error: {0}")]
    Storage(String),

    /// Value could not be serialized
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Stored bytes could not be deserialized
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// A transformer stage failed in either direction
    #[error("transform error: {0}")]
    Transform(String),

    /// File-backed persistence failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for all store operations
pub type StoreResult<T> = Result<T, StoreError>;
