//! netblock-tsv: normalize Regional and Internet Routing Registry dumps
//!
//! Reads bulk WHOIS dumps (RPSL objects from AFRINIC, APNIC, LACNIC, RIPE and
//! the IRRs, plus ARIN's own bulk format) and produces one row per CIDR block
//! with the block's ownership metadata.
//!
//! ```no_run
//! use netblock_tsv::output::TsvWriter;
//! use netblock_tsv::pipeline::Pipeline;
//! use std::path::Path;
//!
//! let files = vec!["ripe.db.inetnum.gz".to_string(), "arin.db.gz".to_string()];
//! let pipeline = Pipeline::new(Path::new("./databases"), &files)?;
//! let mut writer = TsvWriter::create(Path::new("db.tsv"))?;
//! pipeline.run(&mut writer)?;
//! # Ok::<(), netblock_tsv::NetblockError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod range;
pub mod record;
pub mod regex;
pub mod registry;
pub mod rpsl;
pub mod utils;

pub use error::{NetblockError, Result};
pub use record::NormalizedRecord;
pub use registry::Source;
