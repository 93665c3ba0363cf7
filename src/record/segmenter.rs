//! Block segmentation of raw dump streams
//!
//! Dumps are read line by line as bytes. Comment lines are dropped, blank
//! lines close the block being accumulated, and only blocks whose first line
//! starts a record we care about are emitted. Everything else (person, role,
//! mntner objects, ...) is discarded at the boundary.
//!
//! In RPSL dumps a dropped `remarks:` attribute takes its continuation lines
//! with it, up to the next attribute line.

use crate::error::Result;
use crate::record::block::RawBlock;
use crate::registry::{Schema, Source};
use crate::utils::encoding::decode_lossy;
use std::io::BufRead;

/// Lazy iterator of [`RawBlock`]s over one dump stream
///
/// Single forward pass; yields `Err` once and stops if the underlying
/// reader fails.
pub struct BlockReader<R: BufRead> {
    reader: R,
    source: Source,
    pending: Vec<String>,
    buf: Vec<u8>,
    in_remarks: bool,
    finished: bool,
}

impl<R: BufRead> BlockReader<R> {
    pub fn new(reader: R, source: Source) -> Self {
        Self {
            reader,
            source,
            pending: Vec::new(),
            buf: Vec::new(),
            in_remarks: false,
            finished: false,
        }
    }

    fn is_comment(line: &str) -> bool {
        line.starts_with('%') || line.starts_with('#')
    }

    fn is_continuation(line: &str) -> bool {
        line.starts_with([' ', '\t', '+'])
    }

    /// Whether an attribute or continuation line belongs to a dropped `remarks:`
    fn is_remark(&mut self, line: &str) -> bool {
        if self.source.schema() != Schema::Rpsl {
            return false;
        }
        if !Self::is_continuation(line) {
            self.in_remarks = line.starts_with("remarks:");
        }
        self.in_remarks
    }

    /// Take the accumulated lines, returning them as a block if they form one
    fn flush(&mut self) -> Option<RawBlock> {
        let lines = std::mem::take(&mut self.pending);
        if lines.is_empty() {
            return None;
        }
        let block = RawBlock::finalize(self.source, lines);
        if block.is_none() {
            log::trace!("[{}] discarding block of no interest", self.source);
        }
        block
    }

    fn next_block(&mut self) -> Result<Option<RawBlock>> {
        loop {
            self.buf.clear();
            let read = self.reader.read_until(b'\n', &mut self.buf)?;

            if read == 0 {
                self.finished = true;
                return Ok(self.flush());
            }

            let line = decode_lossy(&self.buf)
                .trim_end_matches(['\n', '\r'])
                .to_string();

            if line.trim().is_empty() {
                self.in_remarks = false;
                if let Some(block) = self.flush() {
                    return Ok(Some(block));
                }
                continue;
            }

            if Self::is_comment(&line) || self.is_remark(&line) {
                continue;
            }

            self.pending.push(line);
        }
    }
}

impl<R: BufRead> Iterator for BlockReader<R> {
    type Item = Result<RawBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_block() {
            Ok(Some(block)) => Some(Ok(block)),
            Ok(None) => None,
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
