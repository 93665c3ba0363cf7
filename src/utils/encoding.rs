//! Character encoding utilities
//!
//! Registry dumps are mostly UTF-8, but older objects in several of them are
//! still Latin-1. Decoding never fails: invalid input falls back to
//! Windows-1252, which maps every byte to some character.

use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;

/// Decode a raw dump line into text without ever failing
pub fn decode_lossy(data: &[u8]) -> Cow<'_, str> {
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(data) {
        return text;
    }

    let (cow, had_errors) = WINDOWS_1252.decode_without_bom_handling(data);
    if had_errors {
        log::debug!("Windows-1252 decoding replaced bytes in: {:?}", data);
    }
    cow
}
