use std::io::{self, IsTerminal, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, Subscriber};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Registry};

use extentalg::collection::IntervalCollection;
use extentalg::config::RunConfig;
use extentalg::io::{create_output, read_collection, write_output, InputFormat};
use extentalg::query::Query;
use extentalg::timing::Timed;

mod cli;

/// Endpoint type used for all command line input
type Pos = i64;

/// Build our base tracing subscriber with stderr logging.
fn build_base_subscriber(verbose: u8) -> impl Subscriber + for<'span> LookupSpan<'span> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(filter_layer);

    Registry::default().with(stderr_log)
}

fn load(path: &std::path::Path, format: InputFormat) -> Result<IntervalCollection<Pos>> {
    read_collection::<Pos>(path, format)
        .with_context(|| format!("Could not read interval sources from {path:?}"))
}

fn run_query(config: &RunConfig) -> Result<()> {
    let timer = Timed::start("total");

    let collection = load(&config.input, config.input_format)?;
    info!(sources = collection.len(), query = config.query.name(), "Loaded interval sources");

    let output = {
        let _query_timer = Timed::start("query");
        config.query.run(&collection)?
    };

    let mut writer = create_output(config.output.as_deref())?;
    write_output(&mut writer, &output, config.output_format)
        .with_context(|| "Could not write query output".to_string())?;

    let elapsed = timer.finish();
    eprintln!("{} {} written. Total running time: {:.6} seconds",
              output.len(),
              output.kind(),
              elapsed.as_secs_f64());

    Ok(())
}

fn stats_subcommand(args: &cli::InputArgs) -> Result<()> {
    let collection = load(&args.input, args.input_type.into())?;

    let mut out = io::stdout().lock();
    writeln!(out, "source\tintervals\trejected\tbounds\tcoverage")?;
    for stats in collection.stats() {
        let bounds = stats.bounds
            .map(|b| b.to_string())
            .unwrap_or_else(|| "-".to_string());

        writeln!(out, "{}\t{}\t{}\t{}\t{}", stats.label, stats.intervals, stats.rejected, bounds, stats.coverage)?;
    }

    Ok(())
}

fn query_config(args: &cli::QueryArgs, query: Query) -> RunConfig {
    RunConfig::new(args.input.input.clone(), query)
        .with_input_format(args.input.input_type.into())
        .with_output(args.output.clone(), args.output_type.into())
}

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    build_base_subscriber(args.verbose).init();

    match &args.command {
        Some(cli::CliSubcommand::Union(v)) =>
            run_query(&query_config(&v.query, Query::Union { predicate: v.predicate.into() }))?,
        Some(cli::CliSubcommand::Intersect(v)) =>
            run_query(&query_config(v, Query::Intersection))?,
        Some(cli::CliSubcommand::Extend(v)) =>
            run_query(&query_config(&v.query, Query::Extend { anchor: v.anchor.clone(), pairs: v.pairs }))?,
        Some(cli::CliSubcommand::FindExtend(v)) =>
            run_query(&query_config(v, Query::FindExtend))?,
        Some(cli::CliSubcommand::Stats(v)) =>
            stats_subcommand(v)?,
        None => bail!("No subcommand given. See --help."),
    };

    Ok(())
}
