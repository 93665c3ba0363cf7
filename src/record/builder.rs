//! Record building
//!
//! Turns one [`RawBlock`] into zero or more [`NormalizedRecord`]s according
//! to its [`RecordKind`]:
//!
//! - `Organization` blocks only feed the file's [`OrgResolver`](super::org::OrgResolver)
//! - `Network` blocks are ARIN networks joined with their organization
//! - `FreeText` blocks go through the RPSL attribute parser
//!
//! A returned `Err` invalidates the whole block; route-set members that fail
//! to normalize are logged and dropped individually.

use crate::error::{NetblockError, Result};
use crate::pipeline::FileContext;
use crate::range;
use crate::record::attribute::{extract, extract_or_empty};
use crate::record::block::{RawBlock, RecordKind, SOURCE_ATTRIBUTE};
use crate::record::types::{NormalizedRecord, RecordTemplate};
use crate::regex::strip_range_operator;
use crate::registry::Source;
use crate::rpsl::{AttributeParser, RpslObject, RpslParser};

/// RPSL attributes holding a single address range, in priority order
const RANGE_ATTRIBUTES: &[&str] = &["inetnum", "inet6num", "route", "route6"];

/// RPSL attributes listing route-set members
const MEMBER_ATTRIBUTES: &[&str] = &["members", "mp-members"];

/// Address attribute selected from an RPSL object
enum Addresses<'a> {
    Range(&'a str),
    Members(Vec<&'a str>),
}

pub struct RecordBuilder {
    parser: Box<dyn AttributeParser>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::with_parser(Box::new(RpslParser::new()))
    }

    pub fn with_parser(parser: Box<dyn AttributeParser>) -> Self {
        Self { parser }
    }

    pub fn build(&self, block: &RawBlock, ctx: &mut FileContext) -> Result<Vec<NormalizedRecord>> {
        match block.kind {
            RecordKind::Organization => {
                register_organization(block, ctx)?;
                Ok(Vec::new())
            }
            RecordKind::Network => build_network(block, ctx),
            RecordKind::FreeText => self.build_free_text(block, ctx),
        }
    }

    fn build_free_text(&self, block: &RawBlock, ctx: &FileContext) -> Result<Vec<NormalizedRecord>> {
        let object = self.parser.parse(&block.body())?;

        let last_modified = match object.joined("last-modified") {
            modified if !modified.is_empty() => modified,
            _ => object.joined("changed"),
        };
        let template = RecordTemplate {
            netname: object.joined("netname"),
            description: object.joined("descr"),
            country: object.joined("country"),
            maintained_by: object.joined("mnt-by"),
            created: object.joined("created"),
            last_modified,
        };
        let source = rpsl_source(&object, ctx.source);

        let cidrs = match select_addresses(&object)? {
            Addresses::Range(text) => range::normalize(text)?,
            Addresses::Members(members) => {
                let mut cidrs = Vec::new();
                for member in members {
                    match range::normalize(strip_range_operator(member)) {
                        Ok(member_cidrs) => cidrs.extend(member_cidrs),
                        Err(e) => log::warn!(
                            "[{}] {} {}: skipping member {:?}: {}",
                            ctx.source,
                            object.class,
                            object.key,
                            member,
                            e
                        ),
                    }
                }
                cidrs
            }
        };

        Ok(template.fan_out(cidrs, source))
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn register_organization(block: &RawBlock, ctx: &mut FileContext) -> Result<()> {
    let body = block.body();
    let org_id = extract(&body, "OrgID")
        .filter(|id| !id.is_empty())
        .ok_or_else(|| NetblockError::MissingAttribute("OrgID".to_string()))?;

    ctx.orgs.register(
        &org_id,
        extract_or_empty(&body, "OrgName"),
        extract_or_empty(&body, "Country"),
    );
    Ok(())
}

fn build_network(block: &RawBlock, ctx: &FileContext) -> Result<Vec<NormalizedRecord>> {
    let body = block.body();

    let net_range = extract(&body, "NetRange")
        .ok_or_else(|| NetblockError::MissingAttribute("NetRange".to_string()))?;
    let cidrs = range::normalize_start_end(&net_range)?;

    let org_id = extract(&body, "OrgID")
        .ok_or_else(|| NetblockError::MissingAttribute("OrgID".to_string()))?;
    let org = ctx.orgs.resolve(&org_id)?;

    let description = extract(&body, "NetHandle")
        .filter(|handle| !handle.is_empty())
        .or_else(|| extract(&body, "V6NetHandle"))
        .unwrap_or_default();

    let template = RecordTemplate {
        netname: extract_or_empty(&body, "NetName"),
        description,
        country: org.country.clone(),
        maintained_by: org.name.clone(),
        created: extract_or_empty(&body, "RegDate"),
        last_modified: extract_or_empty(&body, "Updated"),
    };
    let source = extract(&body, SOURCE_ATTRIBUTE)
        .and_then(|tag| tag.parse::<Source>().ok())
        .unwrap_or(ctx.source);

    Ok(template.fan_out(cidrs, source))
}

/// Pick the address attribute: a single range first, route-set members otherwise
fn select_addresses(object: &RpslObject) -> Result<Addresses<'_>> {
    for name in RANGE_ATTRIBUTES {
        if let Some(value) = object.get(name) {
            let text = value
                .first()
                .ok_or_else(|| NetblockError::range(format!("empty {} attribute", name)))?;
            return Ok(Addresses::Range(text));
        }
    }

    let members: Vec<&str> = MEMBER_ATTRIBUTES
        .iter()
        .filter_map(|name| object.get(name))
        .flat_map(|value| value.values())
        .collect();
    if members.is_empty() && object.class != "route-set" {
        return Err(NetblockError::MissingAttribute(format!(
            "no address attribute in {} {}",
            object.class, object.key
        )));
    }
    Ok(Addresses::Members(members))
}

/// Registry of an RPSL object: its `source:` attribute when that is a known
/// tag, otherwise the tag of the dump it came from
fn rpsl_source(object: &RpslObject, fallback: Source) -> Source {
    [object.get("source"), object.get(SOURCE_ATTRIBUTE)]
        .into_iter()
        .flatten()
        .filter_map(|value| value.first())
        .find_map(|tag| tag.parse::<Source>().ok())
        .unwrap_or(fallback)
}
