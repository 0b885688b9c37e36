//! CLI argument definitions for compbench.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use survey_model::{BlendMethod, CategoryKind};

#[derive(Parser)]
#[command(
    name = "compbench",
    version,
    about = "Compensation survey benchmarking - map vendor labels and blend percentiles",
    long_about = "Normalize compensation survey exports from multiple vendors\n\
                  (MGMA, SullivanCotter, Gallagher, ECG, AMGA), map their labels\n\
                  onto canonical categories, and blend selected rows into a single\n\
                  percentile distribution."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Suggest canonical mappings for unmapped labels in a survey export.
    Map(MapArgs),

    /// Blend selected survey rows into one percentile distribution.
    Blend(BlendArgs),

    /// List confirmed categories in a mapping repository.
    Categories(CategoriesArgs),
}

#[derive(Parser)]
pub struct MapArgs {
    /// Path to the vendor survey CSV export.
    #[arg(value_name = "SURVEY_CSV")]
    pub survey: PathBuf,

    /// Directory holding the confirmed-mapping files.
    #[arg(long = "mappings", value_name = "DIR", default_value = "mappings")]
    pub mappings: PathBuf,

    /// Which label kind to map.
    #[arg(long = "kind", value_enum, default_value = "specialty")]
    pub kind: KindArg,

    /// Vendor name when the export has no vendor column.
    #[arg(long = "vendor")]
    pub vendor: Option<String>,

    /// Survey year when the export has no year column.
    #[arg(long = "year")]
    pub year: Option<u16>,

    /// Auto-accept suggestions clearing the threshold and persist them.
    ///
    /// Without this flag the command only reports ranked suggestions;
    /// nothing is written.
    #[arg(long = "apply")]
    pub apply: bool,

    /// Minimum confidence for a suggestion to be auto-accepted.
    #[arg(long = "threshold", value_name = "SCORE", default_value_t = 0.8)]
    pub threshold: f64,

    /// Disable synonym-table matching.
    #[arg(long = "no-synonyms")]
    pub no_synonyms: bool,

    /// Disable fuzzy string matching.
    #[arg(long = "no-string-matching")]
    pub no_string_matching: bool,
}

#[derive(Parser)]
pub struct BlendArgs {
    /// Path to the vendor survey CSV export.
    #[arg(value_name = "SURVEY_CSV")]
    pub survey: PathBuf,

    /// Weighting method.
    #[arg(long = "method", value_enum, default_value = "weighted")]
    pub method: MethodArg,

    /// Custom weights as index=weight pairs (e.g. "0=60,1=40").
    ///
    /// Indices refer to the filtered row selection, in file order. Rows
    /// absent from the list contribute nothing. Only honored with
    /// --method custom.
    #[arg(long = "weights", value_name = "PAIRS")]
    pub weights: Option<String>,

    /// Only blend rows for these specialties (repeatable).
    #[arg(long = "specialty", value_name = "NAME")]
    pub specialties: Vec<String>,

    /// Only blend rows from this vendor; also used as the fallback when
    /// the export has no vendor column.
    #[arg(long = "vendor")]
    pub vendor: Option<String>,

    /// Only blend rows for this survey year; also used as the fallback
    /// when the export has no year column.
    #[arg(long = "year")]
    pub year: Option<u16>,

    /// Only blend rows for this geographic region.
    #[arg(long = "region")]
    pub region: Option<String>,

    /// Only blend rows for this provider type.
    #[arg(long = "provider-type")]
    pub provider_type: Option<String>,

    /// Print the blended result as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct CategoriesArgs {
    /// Directory holding the confirmed-mapping files.
    #[arg(long = "mappings", value_name = "DIR", default_value = "mappings")]
    pub mappings: PathBuf,

    /// Restrict the listing to one kind.
    #[arg(long = "kind", value_enum)]
    pub kind: Option<KindArg>,
}

/// CLI category kind choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Specialty,
    ProviderType,
    Region,
    Column,
}

impl From<KindArg> for CategoryKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Specialty => CategoryKind::Specialty,
            KindArg::ProviderType => CategoryKind::ProviderType,
            KindArg::Region => CategoryKind::Region,
            KindArg::Column => CategoryKind::Column,
        }
    }
}

/// CLI blend method choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum MethodArg {
    Simple,
    Weighted,
    Custom,
}

impl From<MethodArg> for BlendMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Simple => BlendMethod::Simple,
            MethodArg::Weighted => BlendMethod::Weighted,
            MethodArg::Custom => BlendMethod::Custom,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
