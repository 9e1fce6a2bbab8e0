use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use extentalg::interval::Overlap;
use extentalg::io::{InputFormat, OutputFormat};


/// The input formats supported by extentalg
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputType {
    /// JSON array of labelled extent lists
    Json,

    /// Delimited table with start/end column pairs
    Table,
}

impl From<InputType> for InputFormat {
    fn from(value: InputType) -> Self {
        match value {
            InputType::Json => InputFormat::Json,
            InputType::Table => InputFormat::Table,
        }
    }
}

/// The various output formats supported by extentalg
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputType {
    /// One interval per row, tab separated
    Rows,

    /// One gap-free line (or intersection tuple) per row
    Lines,

    /// JSON
    Json,
}

impl From<OutputType> for OutputFormat {
    fn from(value: OutputType) -> Self {
        match value {
            OutputType::Rows => OutputFormat::Rows,
            OutputType::Lines => OutputFormat::Lines,
            OutputType::Json => OutputFormat::Json,
        }
    }
}

/// Which overlap test the union fold uses
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum UnionPredicate {
    /// Intervals sharing at least one point
    Symmetric,

    /// The next interval does not end before the current one starts
    Reaches,
}

impl From<UnionPredicate> for Overlap {
    fn from(value: UnionPredicate) -> Self {
        match value {
            UnionPredicate::Symmetric => Overlap::Symmetric,
            UnionPredicate::Reaches => Overlap::Reaches,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Set verbosity level. Use multiple times to increase the verbosity level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<CliSubcommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliSubcommand {
    /// Fold union over all sources and print gap-free lines
    Union(UnionArgs),

    /// Find interval tuples shared by every source
    Intersect(QueryArgs),

    /// Find intervals strictly containing intervals of another source
    Extend(ExtendArgs),

    /// Union every pair of sources, merge and print gap-free lines
    FindExtend(QueryArgs),

    /// Print per-source statistics
    Stats(InputArgs),
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Interval sources. Files ending in .gz are decompressed.
    #[clap(help_heading = "Inputs")]
    pub input: PathBuf,

    /// Input file type.
    #[arg(value_enum, short = 'I', long, default_value = "json")]
    #[clap(help_heading = "Inputs")]
    pub input_type: InputType,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output filename. If not given, defaults to stdout
    #[arg(short, long)]
    #[clap(help_heading = "Outputs")]
    pub output: Option<PathBuf>,

    /// Output file type.
    #[arg(value_enum, short = 'O', long, default_value = "rows")]
    #[clap(help_heading = "Outputs")]
    pub output_type: OutputType,
}

#[derive(Args, Debug)]
pub struct UnionArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Overlap test used while folding.
    #[arg(value_enum, short, long, default_value = "symmetric")]
    #[clap(help_heading = "Union configuration")]
    pub predicate: UnionPredicate,
}

#[derive(Args, Debug)]
pub struct ExtendArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Label of the containing source. If not given, every pair of sources is searched.
    #[arg(short, long)]
    #[clap(help_heading = "Extend configuration")]
    pub anchor: Option<String>,

    /// Report each containment pair instead of gap-free lines.
    #[arg(long)]
    #[clap(help_heading = "Extend configuration")]
    pub pairs: bool,
}
