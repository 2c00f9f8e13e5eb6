//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use unisink::{CategoryNormalizer, OverrideTable, UnifyConfig, UnifyInputs};

/// unisink: unify Android source/sink annotation datasets
#[derive(Parser)]
#[command(name = "unisink")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Unify the datasets and write the canonical annotation CSV
    Unify {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output path for the unified annotations
        #[arg(short, long, default_value = unisink::DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// List annotation conflicts without writing any output
    Conflicts {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Input files and resolution options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// DroidSafe framework-scan files
    #[arg(long = "framework-scan", visible_alias = "dsafe", value_name = "FILE", num_args = 1..)]
    pub framework_scan: Vec<PathBuf>,

    /// SuSi catalog files (name must mention Source or Sink)
    #[arg(long, visible_alias = "susi", value_name = "FILE", num_args = 1..)]
    pub catalog: Vec<PathBuf>,

    /// Permission-map CSV files
    #[arg(long = "permission-map", visible_alias = "perm-map", value_name = "FILE", num_args = 1..)]
    pub permission_map: Vec<PathBuf>,

    /// Keep categories as read instead of stripping "_INFORMATION"
    #[arg(long)]
    pub no_normalize: bool,

    /// Fail on catalog files whose name mentions neither Source nor Sink
    #[arg(long)]
    pub strict: bool,

    /// Additional conflict override, e.g. "a.b.C.m(String)=dsafe"
    #[arg(long = "override", value_name = "METHOD=ORIGIN")]
    pub overrides: Vec<String>,
}

impl InputArgs {
    /// Check that enough inputs were given and that every file exists.
    pub fn check(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.framework_scan.is_empty() && self.catalog.is_empty() {
            return Err("Must give at least one file with --framework-scan or --catalog".into());
        }

        let inputs = self.to_inputs();
        if let Some(missing) = inputs.paths().find(|p| !p.is_file()) {
            return Err(format!("{} is not a file.", missing.display()).into());
        }

        Ok(())
    }

    pub fn to_inputs(&self) -> UnifyInputs {
        UnifyInputs {
            framework_scan: self.framework_scan.clone(),
            catalog: self.catalog.clone(),
            permission_map: self.permission_map.clone(),
        }
    }

    pub fn to_config(&self) -> Result<UnifyConfig, Box<dyn std::error::Error>> {
        let mut overrides = OverrideTable::default();
        for entry in &self.overrides {
            overrides = overrides.with_entry(entry)?;
        }

        Ok(UnifyConfig {
            overrides,
            normalizer: (!self.no_normalize).then(CategoryNormalizer::default),
            strict_catalog_kind: self.strict,
        })
    }
}
