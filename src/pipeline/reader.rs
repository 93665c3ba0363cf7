//! Dump file opening
//!
//! Gzip is recognised by its magic bytes rather than the file extension;
//! anything else is read as plain text.

use crate::error::Result;
use flate2::read::MultiGzDecoder;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Detected input compression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

impl Compression {
    /// Detect compression format from magic bytes
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(&GZIP_MAGIC) {
            Compression::Gzip
        } else {
            Compression::None
        }
    }
}

/// Open a dump file for line reading, decompressing gzip transparently
pub fn open_dump(path: &Path) -> Result<Box<dyn BufRead>> {
    let mut raw = BufReader::new(File::open(path)?);
    let compression = Compression::detect(raw.fill_buf()?);
    debug!("opening {} as {:?}", path.display(), compression);

    match compression {
        Compression::Gzip => Ok(Box::new(BufReader::new(MultiGzDecoder::new(raw)))),
        Compression::None => Ok(Box::new(raw)),
    }
}
