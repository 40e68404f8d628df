use std::path::PathBuf;

use clap::Parser;

use scoutmerge::{parse_column_list, run, MergeConfig};

#[derive(Parser, Debug)]
#[command(name = "scoutmerge")]
#[command(version)]
#[command(about = "Merge a directory of scouting CSV exports and drop duplicate match records")]
struct Args {
    /// Input directory containing the CSV files to merge
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Output file path; missing parent directories are created
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Comma-separated columns to group by, in grouping order
    /// [default: match_number,team_alliance,team_position,team_number]
    #[arg(short, long, value_name = "COLUMNS")]
    groupby: Option<String>,

    /// Comma-separated columns to deduplicate on within each group
    /// [default: timestamp]
    #[arg(long = "drop_duplicates", alias = "dd", value_name = "COLUMNS")]
    drop_duplicates: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Column lists are validated before any file I/O happens.
    let mut config = MergeConfig::new(args.directory, args.output);
    if let Some(groupby) = args.groupby.as_deref() {
        config = config.group_keys(parse_column_list(groupby)?);
    }
    if let Some(dedup) = args.drop_duplicates.as_deref() {
        config = config.dedup_keys(parse_column_list(dedup)?);
    }

    run(&config)?;
    Ok(())
}
