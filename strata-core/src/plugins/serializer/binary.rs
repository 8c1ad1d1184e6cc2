/*
    binary.rs - Compact binary serializer

    Bincode is not self-describing, so `serde_json::Value` cannot round-trip
    through it directly. Values are bridged through an internally tagged
    mirror of the value model, which bincode encodes without ambiguity.
*/

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core_plugin::{Plugin, PluginDescriptor, Serializer, StoreError, StoreResult};

/// Tagged mirror of the JSON value model.
#[derive(Debug, Serialize, Deserialize)]
enum Packed {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Array(Vec<Packed>),
    Object(Vec<(String, Packed)>),
}

fn pack(value: &Value) -> StoreResult<Packed> {
    Ok(match value {
        Value::Null => Packed::Null,
        Value::Bool(b) => Packed::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Packed::Int(i)
            } else if let Some(u) = n.as_u64() {
                Packed::UInt(u)
            } else {
                let f = n.as_f64().ok_or_else(|| {
                    StoreError::Serialization(format!("unrepresentable number: {}", n))
                })?;
                Packed::Float(f)
            }
        }
        Value::String(s) => Packed::Str(s.clone()),
        Value::Array(items) => {
            Packed::Array(items.iter().map(pack).collect::<StoreResult<_>>()?)
        }
        Value::Object(map) => Packed::Object(
            map.iter()
                .map(|(key, value)| Ok((key.clone(), pack(value)?)))
                .collect::<StoreResult<_>>()?,
        ),
    })
}

fn unpack(packed: Packed) -> StoreResult<Value> {
    Ok(match packed {
        Packed::Null => Value::Null,
        Packed::Bool(b) => Value::Bool(b),
        Packed::Int(i) => Value::from(i),
        Packed::UInt(u) => Value::from(u),
        Packed::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| StoreError::Deserialization("non-finite float".to_string()))?,
        Packed::Str(s) => Value::String(s),
        Packed::Array(items) => {
            Value::Array(items.into_iter().map(unpack).collect::<StoreResult<_>>()?)
        }
        Packed::Object(entries) => {
            let mut map = serde_json::Map::new();
            for (key, value) in entries {
                map.insert(key, unpack(value)?);
            }
            Value::Object(map)
        }
    })
}

/// Binary serializer over the tagged value mirror.
#[derive(Debug, Default)]
pub struct BinarySerializer;

impl BinarySerializer {
    pub fn new() -> Self {
        BinarySerializer
    }
}

#[async_trait]
impl Plugin for BinarySerializer {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new("binary", Value::Null)
    }
}

#[async_trait]
impl Serializer for BinarySerializer {
    async fn serialize(&self, value: &Value) -> StoreResult<Vec<u8>> {
        let packed = pack(value)?;
        bincode::serialize(&packed).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn deserialize(&self, data: &[u8]) -> StoreResult<Value> {
        let packed: Packed =
            bincode::deserialize(data).map_err(|e| StoreError::Deserialization(e.to_string()))?;
        unpack(packed)
    }
}
