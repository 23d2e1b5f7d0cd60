use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::typicality::{Distance, Kernel};

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext
{
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub verbose: bool,  // global --verbose
}

#[derive(Parser)]
#[command(name = "cue")]
#[command(about = "Concept assignment, typicality ranking and representative picks for source code")]
#[command(version, long_about = None)]
pub struct Cli
{
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log debug events to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands
{
    /// Assign concepts to a file, some of its elements, or a batch of files
    Concepts(ConceptsArgs),

    /// Rank a corpus by typicality and print the most typical sources
    Typical(TypicalArgs),

    /// Pick sources that jointly cover a corpus
    Representative(RepresentativeArgs),

    /// Initialize a cue.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Parser)]
pub struct ConceptsArgs
{
    /// Source files; more than one is treated as a batch
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Restrict to elements with this name (repeatable; single file only)
    #[arg(short, long = "element", value_name = "NAME")]
    pub elements: Vec<String>,

    /// Restrict to an inclusive 1-based line span, e.g. 10-42 (single file only)
    #[arg(long, value_name = "A-B", conflicts_with = "elements")]
    pub lines: Option<String>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Corpus selection shared by typicality and representative queries
#[derive(Debug, Args)]
pub struct CorpusArgs
{
    /// Root directory of the corpus
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// File extensions to include (defaults to config `extensions`)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Additional glob patterns to ignore
    #[arg(short, long)]
    pub ignore: Vec<String>,
}

#[derive(Debug, Parser)]
pub struct TypicalArgs
{
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Number of sources to report (default: 10, capped at corpus size)
    #[arg(short)]
    pub k: Option<usize>,

    /// Terms that matter most for this query (repeatable)
    #[arg(short, long, value_name = "TERM")]
    pub relevant: Vec<String>,

    /// Kernel bandwidth (defaults to config `analysis.bandwidth`)
    #[arg(long)]
    pub bandwidth: Option<f64>,

    /// Density kernel
    #[arg(long, value_enum)]
    pub kernel: Option<Kernel>,

    /// Distance between term vectors
    #[arg(long, value_enum)]
    pub distance: Option<Distance>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct RepresentativeArgs
{
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Number of sources to pick (default: 5, capped at corpus size)
    #[arg(short)]
    pub k: Option<usize>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct InitArgs
{
    /// Directory to initialize config in
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell
{
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Debug, Parser)]
pub struct CompletionsArgs
{
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory for the completion file
    #[arg(long, required_unless_present = "stdout")]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long, conflicts_with = "out_dir")]
    pub stdout: bool,
}
