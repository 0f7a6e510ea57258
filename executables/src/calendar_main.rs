#![cfg_attr(feature = "strict", deny(warnings))]
#![cfg_attr(feature = "strict", deny(clippy::all))]

use common::util::{path_or_relative_to_project_root, read_csv_records, write_serializable_to_json};
use common::{logging, SegError, SegResult};
use executables::{config::ReplayConfig, replay_bookings, CalendarKind};
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
        help = "csv file with one booking `start,end` per line, end is exclusive"
    )]
    input_path: PathBuf,
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    output_path: Option<PathBuf>,
    #[structopt(
        short = "k",
        long = "kind",
        default_value = "bounded",
        possible_values = CalendarKind::VARIANTS,
        help = "single: no overlaps, bounded: at most max_overlap of the config, counter: report maximum overlap"
    )]
    kind: CalendarKind,
}

impl Cli {
    fn output_path(&self) -> SegResult<PathBuf> {
        let stem = self
            .input_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "bookings".into());
        path_or_relative_to_project_root(
            self.output_path.as_ref(),
            &format!("data/calendar/{}_{}.json", stem, self.kind.name()),
        )
    }

    fn config_path(&self) -> SegResult<PathBuf> {
        path_or_relative_to_project_root(self.config_path.as_ref(), "config/replay/default.dhall")
    }
}

fn main() -> SegResult<()> {
    logging::init_logging("calendar")?;

    let args = Cli::from_args();
    log::debug!("{:?}", args);

    log::info!("Reading config...");
    let config = ReplayConfig::from_file(args.config_path()?)?;
    log::info!("Reading config... DONE");

    log::info!("Reading bookings from {}...", args.input_path.display());
    let bookings: Vec<(i64, i64)> = read_csv_records(&args.input_path)
        .map_err(SegError::rethrow_with("Could not read bookings"))?;
    log::info!("Reading bookings... DONE ({} bookings)", bookings.len());

    log::info!("Replaying bookings against {} calendar...", args.kind.name());
    let outcome = replay_bookings(args.kind, &config, &bookings)?;
    log::info!("Replaying bookings... DONE");

    let output_path = args.output_path()?;
    write_serializable_to_json(&outcome, &output_path)?;
    log::info!("Wrote results to {}", output_path.display());

    Ok(())
}
