//! LZ4 compression transformer.
//!
//! `transform` compresses with the uncompressed size prepended, `reverse`
//! decompresses. Invertible for every byte buffer.

use async_trait::async_trait;
use serde_json::Value;

use crate::core_plugin::{Plugin, PluginDescriptor, StoreError, StoreResult, Transformer};

#[derive(Debug, Default)]
pub struct CompressionTransformer;

impl CompressionTransformer {
    pub fn new() -> Self {
        CompressionTransformer
    }
}

#[async_trait]
impl Plugin for CompressionTransformer {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new("compression", Value::Null)
    }
}

#[async_trait]
impl Transformer for CompressionTransformer {
    async fn transform(&self, data: Vec<u8>) -> StoreResult<Vec<u8>> {
        Ok(lz4_flex::compress_prepend_size(&data))
    }

    async fn reverse(&self, data: Vec<u8>) -> StoreResult<Vec<u8>> {
        lz4_flex::decompress_size_prepended(&data)
            .map_err(|e| StoreError::Transform(e.to_string()))
    }
}
