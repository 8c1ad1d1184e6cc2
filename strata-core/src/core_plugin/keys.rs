//! Canonical storage keys
//!
//! Keys are opaque strings at the storage boundary. Callers that model a key
//! as an ordered sequence of parts join them here so the same logical key
//! always canonicalizes to the same storage key. An unstable canonicalization
//! silently misses on read.

/// Separator between key parts in the canonical form
pub const KEY_SEPARATOR: char = ':';

/// Join ordered key parts into one canonical storage key.
pub fn join(parts: &[&str]) -> String {
    parts.join(&KEY_SEPARATOR.to_string())
}

/// Split a canonical storage key back into its parts.
pub fn split(key: &str) -> Vec<&str> {
    key.split(KEY_SEPARATOR).collect()
}
