//! Transformer backends

mod compression;
mod encryption;

pub use compression::CompressionTransformer;
pub use encryption::EncryptionTransformer;
