//! Shared helpers for decoding dump bytes and resolving paths

pub mod encoding;
pub mod path;
