//! Compression Codec Module
//!
//! Serializes values to JSON and gzips them when they are large enough.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CacheError, Result};

// == Encode ==
/// Serializes a value to JSON bytes.
pub fn to_json<V: Serialize>(value: &V) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| CacheError::Encode(e.to_string()))
}

// == Compress ==
/// Gzips already-serialized JSON bytes.
pub fn compress_json(json: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(json)
        .map_err(|e| CacheError::Encode(format!("compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| CacheError::Encode(format!("compression finish failed: {}", e)))
}

// == Decompress ==
/// Restores a value from gzip-compressed JSON produced by [`compress_json`].
pub fn decompress<V: DeserializeOwned>(bytes: &[u8]) -> Result<V> {
    let mut decoder = GzDecoder::new(bytes);
    let mut json = Vec::new();
    decoder
        .read_to_end(&mut json)
        .map_err(|e| CacheError::Decode(format!("decompression failed: {}", e)))?;

    serde_json::from_slice(&json).map_err(|e| CacheError::Decode(e.to_string()))
}
