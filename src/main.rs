mod cli;

use crate::cli::OutputFormat;
use cidrdiff::{ClientBuilder, DiffResults, IpRanges};
use clap::Parser;
use log::error;
use std::process::ExitCode;

/*-------------------------------------------------------------------------------------------------
  Main CLI Function
-------------------------------------------------------------------------------------------------*/

fn main() -> ExitCode {
    let args = cli::Args::parse();

    stderrlog::new()
        .module(module_path!())
        .verbosity(args.verbose.log_level_filter())
        .init()
        .ok();

    // Retrieve the source and excluded IP ranges documents
    let (source, excluded) = match get_ranges(&args) {
        Ok(ranges) => ranges,
        Err(error) => {
            error!("{error}");
            eprintln!("error: no usable data from upstream ranges documents");
            return ExitCode::FAILURE;
        }
    };

    // Compute the difference
    let results = cidrdiff::difference(&source, &excluded);
    cli::log::diff_results(&source, &excluded, &results);
    let results = results.retain_family(args.family());

    match output(&args, &results) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

/*--------------------------------------------------------------------------------------
  Retrieve IP Ranges
--------------------------------------------------------------------------------------*/

fn get_ranges(args: &cli::Args) -> cidrdiff::Result<(IpRanges, IpRanges)> {
    let mut builder = ClientBuilder::new();
    if let Some(source) = &args.source {
        builder.source(source);
    }
    if let Some(excluded) = &args.excluded {
        builder.excluded(excluded);
    }
    let client = builder.build();

    let source = client.get_source_ranges()?;
    let excluded = client.get_excluded_ranges()?;
    Ok((source, excluded))
}

/*--------------------------------------------------------------------------------------
  Output Results
--------------------------------------------------------------------------------------*/

fn output(args: &cli::Args, results: &DiffResults) -> cidrdiff::Result<()> {
    match args.output {
        OutputFormat::Cidr => cli::output::prefixes_in_cidr_format(results),
        OutputFormat::Netmask => cli::output::prefixes_in_netmask_format(results)?,
        OutputFormat::Table => cli::output::prefix_table(results),
    }

    if args.summary {
        cli::output::summary_table(results);
    }

    if let Some(path) = &args.csv_file {
        cli::csv::save(results, path)?;
    }

    Ok(())
}
