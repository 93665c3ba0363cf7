//! Registry record extraction and normalization
//!
//! # Module Organization
//!
//! - `attribute`: `name: value` extraction and the `AttrValue` variant
//! - `block`: raw blocks and record kind classification
//! - `segmenter`: splitting dump streams into blocks
//! - `org`: per-file ARIN organization table
//! - `builder`: turning blocks into normalized records
//! - `types`: the output record

pub mod attribute;
pub mod block;
pub mod builder;
pub mod org;
pub mod segmenter;
pub mod types;

pub use attribute::AttrValue;
pub use block::{RawBlock, RecordKind};
pub use builder::RecordBuilder;
pub use org::{OrgEntry, OrgResolver};
pub use segmenter::BlockReader;
pub use types::NormalizedRecord;
