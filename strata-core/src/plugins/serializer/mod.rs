//! Serializer backends

mod binary;
mod json;

pub use binary::BinarySerializer;
pub use json::JsonSerializer;
