#![cfg_attr(feature = "strict", deny(warnings))]
#![cfg_attr(feature = "strict", deny(clippy::all))]

use common::util::{path_or_relative_to_project_root, read_csv_records, write_serializable_to_json};
use common::{logging, SegError, SegResult};
use executables::{config::ReplayConfig, replay_squares};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
struct Cli {
    #[structopt(long = "config", parse(from_os_str))]
    config_path: Option<PathBuf>,
    #[structopt(
        short = "i",
        long = "input",
        parse(from_os_str),
        help = "csv file with one square `left,side_length` per line"
    )]
    input_path: PathBuf,
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    output_path: Option<PathBuf>,
}

fn main() -> SegResult<()> {
    logging::init_logging("stacking")?;

    let args = Cli::from_args();

    let config_path =
        path_or_relative_to_project_root(args.config_path.as_ref(), "config/replay/default.dhall")?;
    let config = ReplayConfig::from_file(config_path)?;

    log::info!("Reading squares from {}...", args.input_path.display());
    let squares: Vec<(i64, i64)> = read_csv_records(&args.input_path)
        .map_err(SegError::rethrow_with("Could not read squares"))?;
    log::info!("Reading squares... DONE ({} squares)", squares.len());

    log::info!("Dropping squares...");
    let heights = replay_squares(&config, &squares)?;
    log::info!(
        "Dropping squares... DONE, highest stack {}",
        heights.last().copied().unwrap_or(config.initial_value)
    );

    let output_path =
        path_or_relative_to_project_root(args.output_path.as_ref(), "data/stacking/heights.json")?;
    write_serializable_to_json(&heights, &output_path)?;
    log::info!("Wrote heights to {}", output_path.display());

    Ok(())
}
