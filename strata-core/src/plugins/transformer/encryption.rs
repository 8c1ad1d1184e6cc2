/*
    encryption.rs - AES-256-GCM encryption transformer

    Authenticated encryption around the storage boundary. A fresh random
    12-byte nonce is generated per transform and prepended to the ciphertext.

    The key is derived from the configured passphrase with blake3, so two
    instances built from the same descriptor decrypt each other's output.
    In production the passphrase should come from a keystore, not from a
    persisted descriptor.
*/

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::core_plugin::{Plugin, PluginDescriptor, StoreError, StoreResult, Transformer};

const NONCE_LEN: usize = 12;

#[derive(Debug, Deserialize)]
struct EncryptionConfig {
    secret_key: String,
}

/// AEAD transformer: `transform` encrypts, `reverse` decrypts and
/// authenticates.
pub struct EncryptionTransformer {
    cipher: Aes256Gcm,
    secret_key: String,
}

impl EncryptionTransformer {
    pub fn new(secret_key: impl Into<String>) -> Self {
        let secret_key = secret_key.into();
        let derived = blake3::hash(secret_key.as_bytes());
        let key = Key::<Aes256Gcm>::from_slice(derived.as_bytes());
        EncryptionTransformer { cipher: Aes256Gcm::new(key), secret_key }
    }

    /// Construct from a descriptor config: `{"secret_key": "..."}`.
    pub fn from_config(config: &Value) -> StoreResult<Self> {
        let config: EncryptionConfig = serde_json::from_value(config.clone())
            .map_err(|e| StoreError::InvalidConfig(e.to_string()))?;
        Ok(Self::new(config.secret_key))
    }
}

#[async_trait]
impl Plugin for EncryptionTransformer {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new("encryption", json!({ "secret_key": self.secret_key }))
    }
}

#[async_trait]
impl Transformer for EncryptionTransformer {
    async fn transform(&self, data: Vec<u8>) -> StoreResult<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, data.as_slice())
            .map_err(|e| StoreError::Transform(e.to_string()))?;

        let mut result = nonce_bytes.to_vec();
        result.extend_from_slice(&ciphertext);
        Ok(result)
    }

    async fn reverse(&self, data: Vec<u8>) -> StoreResult<Vec<u8>> {
        if data.len() < NONCE_LEN {
            return Err(StoreError::Transform(
                "ciphertext shorter than nonce".to_string(),
            ));
        }
        let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        self.cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| StoreError::Transform(e.to_string()))
    }
}
