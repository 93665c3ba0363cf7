//! Pipeline driver
//!
//! Processes the configured dump files strictly in order, one pass each:
//! segment the stream into blocks, build records from every block and hand
//! them to the sink in the order produced.
//!
//! All per-file state (the registry tag and the ARIN organization table)
//! lives in a [`FileContext`] that is created when a file is opened and
//! reset once it has been consumed. Nothing carries over between files.

pub mod reader;

use crate::error::{NetblockError, Result};
use crate::output::RecordSink;
use crate::record::{BlockReader, OrgResolver, RecordBuilder};
use crate::registry::Source;
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// State scoped to the processing of one dump file
#[derive(Debug)]
pub struct FileContext {
    pub source: Source,
    pub path: PathBuf,
    pub orgs: OrgResolver,
    pub stats: FileStats,
}

impl FileContext {
    pub fn new(source: Source, path: PathBuf) -> Self {
        Self {
            source,
            path,
            orgs: OrgResolver::new(),
            stats: FileStats::default(),
        }
    }

    /// Tear down per-file state once the file has been fully consumed
    pub fn finish(&mut self) -> FileStats {
        if !self.orgs.is_empty() {
            debug!("[{}] dropping {} organizations", self.source, self.orgs.len());
        }
        self.orgs.reset();
        self.stats
    }
}

/// Counters for one processed file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    pub blocks: u64,
    pub records: u64,
    pub skipped: u64,
}

/// Counters for a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub files_processed: u64,
    pub files_missing: u64,
    pub files_failed: u64,
    pub blocks: u64,
    pub records: u64,
    pub skipped: u64,
}

impl PipelineSummary {
    fn add(&mut self, stats: FileStats) {
        self.blocks += stats.blocks;
        self.records += stats.records;
        self.skipped += stats.skipped;
    }
}

/// A dump file scheduled for processing
#[derive(Debug, Clone)]
pub struct DumpFile {
    pub path: PathBuf,
    pub source: Source,
}

pub struct Pipeline {
    files: Vec<DumpFile>,
    builder: RecordBuilder,
}

impl Pipeline {
    /// Resolve every file name to its registry up front
    ///
    /// An unknown prefix is a configuration error and nothing is processed.
    pub fn new(directory: &Path, files: &[String]) -> Result<Self> {
        let files = files
            .iter()
            .map(|name| {
                let source = Source::from_filename(name)?;
                Ok(DumpFile {
                    path: directory.join(name),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            files,
            builder: RecordBuilder::new(),
        })
    }

    /// Replace the record builder (e.g. to plug in a different attribute parser)
    pub fn with_builder(mut self, builder: RecordBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn files(&self) -> &[DumpFile] {
        &self.files
    }

    /// Run every file through the sink
    ///
    /// Missing or unreadable input files are logged and skipped; only sink
    /// failures abort the run.
    pub fn run<S: RecordSink>(&self, sink: &mut S) -> Result<PipelineSummary> {
        let started = Instant::now();
        let mut summary = PipelineSummary::default();

        for file in &self.files {
            if !file.path.exists() {
                info!("File {} not found, skipping", file.path.display());
                summary.files_missing += 1;
                continue;
            }

            let mut ctx = FileContext::new(file.source, file.path.clone());
            match self.process_file(&mut ctx, sink) {
                Ok(()) => summary.files_processed += 1,
                Err(FileFailure::Input(e)) => {
                    error!("[{}] failed reading {}: {}", ctx.source, ctx.path.display(), e);
                    summary.files_failed += 1;
                }
                Err(FileFailure::Sink(e)) => return Err(e),
            }
            summary.add(ctx.finish());
        }

        sink.flush()?;
        info!(
            "finished {} files ({} missing, {} failed): {} blocks, {} records, {} skipped in {:.2} seconds",
            summary.files_processed,
            summary.files_missing,
            summary.files_failed,
            summary.blocks,
            summary.records,
            summary.skipped,
            started.elapsed().as_secs_f64()
        );
        Ok(summary)
    }

    fn process_file<S: RecordSink>(
        &self,
        ctx: &mut FileContext,
        sink: &mut S,
    ) -> std::result::Result<(), FileFailure> {
        let started = Instant::now();
        info!("[{}] parsing database file: {}", ctx.source, ctx.path.display());

        let stream = reader::open_dump(&ctx.path).map_err(FileFailure::Input)?;

        for block in BlockReader::new(stream, ctx.source) {
            let block = block.map_err(FileFailure::Input)?;
            ctx.stats.blocks += 1;
            if ctx.stats.blocks % 1000 == 0 {
                debug!("[{}] parsed another 1000 blocks ({} so far)", ctx.source, ctx.stats.blocks);
            }

            match self.builder.build(&block, ctx) {
                Ok(records) => {
                    for record in &records {
                        sink.write_record(record).map_err(FileFailure::Sink)?;
                    }
                    ctx.stats.records += records.len() as u64;
                }
                Err(e) if e.is_recoverable() => {
                    ctx.stats.skipped += 1;
                    warn!("[{}] skipping block {:?}: {}", ctx.source, block.first_line(), e);
                    debug!("[{}] skipped block content:\n{}", ctx.source, block.body());
                }
                Err(e) => return Err(FileFailure::Input(e)),
            }
        }

        info!(
            "[{}] block parsing finished: {} blocks, {} records, {} skipped in {:.2} seconds",
            ctx.source,
            ctx.stats.blocks,
            ctx.stats.records,
            ctx.stats.skipped,
            started.elapsed().as_secs_f64()
        );
        Ok(())
    }
}

/// Why processing of a single file stopped early
enum FileFailure {
    /// Reading or decoding the dump failed; the rest of the batch continues
    Input(NetblockError),
    /// Writing output failed; the run is aborted
    Sink(NetblockError),
}
