//! CLI module for netblock-tsv
//!
//! This module handles command line argument parsing and wires the
//! configuration into a pipeline run.

use crate::config::AppConfig;
use crate::error::Result;
use crate::output::TsvWriter;
use crate::pipeline::{Pipeline, PipelineSummary};
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "netblock-tsv")]
#[command(version, about = "Parse RIR/IRR WHOIS database dumps into a single TSV file")]
#[command(long_about = "netblock-tsv reads registry dumps (RPSL and ARIN bulk format, \
    gzip or plain) and writes one tab-separated row per CIDR block:\n\n  \
    cidr, netname, description, country, maintained_by, created, last_modified, source\n\n\
    Examples:\n  \
    $ netblock-tsv -o db.tsv\n  \
    $ netblock-tsv -o db.tsv -i /srv/dumps ripe.db.inetnum.gz arin.db.gz\n  \
    $ netblock-tsv --print-config")]
pub struct Cli {
    /// Dump files to process, in order (defaults to the configured list)
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Output TSV file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<String>,

    /// Directory holding the dump files
    #[arg(short = 'i', long = "input-dir", value_name = "DIR")]
    pub input_dir: Option<String>,

    /// Configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Set log level to DEBUG
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Load the configuration file named on the command line, or the default one
    pub fn load_config(&self) -> Result<AppConfig> {
        match &self.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(),
        }
    }

    /// Apply command line options on top of file and environment settings
    pub fn apply(&self, config: &mut AppConfig) {
        if !self.files.is_empty() {
            config.input.files = self.files.clone();
        }
        if let Some(dir) = &self.input_dir {
            config.input.directory = dir.clone();
        }
        if let Some(output) = &self.output {
            config.output.path = Some(output.clone());
        }
        if self.debug {
            config.global.debug = true;
        }
    }

    pub fn run(&self, config: &AppConfig) -> Result<Option<PipelineSummary>> {
        if self.print_config {
            print!("{}", config.to_yaml()?);
            return Ok(None);
        }

        // Configuration problems are fatal and surface before any input is read.
        let output_path = config.output_path()?;
        let pipeline = Pipeline::new(&config.input_directory(), &config.input.files)?;

        let mut writer = TsvWriter::create(&output_path)?;
        let summary = pipeline.run(&mut writer)?;

        info!("wrote {} rows to {}", writer.rows(), output_path.display());
        Ok(Some(summary))
    }
}
