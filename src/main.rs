// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::path::PathBuf;
use anyhow::{Context as _, Result};
use clap::Parser;
use log::{debug, info, LevelFilter};
use advent23::{input, logs};


#[derive(Parser, Debug)]
#[command(name = "advent23", about = "Prints the answer to one part of one day's puzzle")]
struct Cli {
	/// Puzzle day
	#[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
	day: u8,
	/// Puzzle part
	#[arg(value_parser = clap::value_parser!(u8).range(1..=2))]
	part: u8,
	/// Input file [default: <DATA_DIR>/dayNN/input.txt]
	file: Option<PathBuf>,
	#[arg(long, default_value = "data")]
	data_dir: PathBuf,
	/// More logging; repeat for even more
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
	/// Only log warnings and errors
	#[arg(short, long, conflicts_with = "verbose")]
	quiet: bool,
}

impl Cli {
	fn log_level(&self) -> LevelFilter {
		match (self.quiet, self.verbose) {
			(true, _) => LevelFilter::Warn,
			(false, 0) => LevelFilter::Info,
			(false, 1) => LevelFilter::Debug,
			(false, _) => LevelFilter::Trace,
		}
	}

	fn input_path(&self) -> PathBuf {
		self.file.clone().unwrap_or_else(||
			input::data_path(&self.data_dir, self.day, input::DEFAULT_FILENAME))
	}
}


fn main() -> Result<()> {
	let cli = Cli::parse();
	logs::setup_logging(cli.log_level());

	let path = cli.input_path();
	debug!("Reading {}", path.display());
	let lines = input::read_stripped_lines(&path)
		.with_context(|| format!("Failed to read {}", path.display()))?;

	let answer = advent23::solve(cli.day, cli.part, &lines)?;
	info!("Day {} part {}: {answer}", cli.day, cli.part);
	println!("{answer}");
	Ok(())
}


#[test]
fn tests() {
	use clap::CommandFactory as _;
	Cli::command().debug_assert();

	let cli = Cli::try_parse_from(["advent23", "5", "2"]).unwrap();
	assert_eq!((cli.day, cli.part), (5, 2));
	assert_eq!(cli.input_path(), PathBuf::from("data/day05/input.txt"));
	assert_eq!(cli.log_level(), LevelFilter::Info);

	let cli = Cli::try_parse_from(["advent23", "-vv", "--data-dir", "inputs", "5", "1"]).unwrap();
	assert_eq!(cli.input_path(), PathBuf::from("inputs/day05/input.txt"));
	assert_eq!(cli.log_level(), LevelFilter::Trace);

	let cli = Cli::try_parse_from(["advent23", "-q", "5", "1", "almanac.txt"]).unwrap();
	assert_eq!(cli.input_path(), PathBuf::from("almanac.txt"));
	assert_eq!(cli.log_level(), LevelFilter::Warn);

	assert!(Cli::try_parse_from(["advent23", "26", "1"]).is_err());
	assert!(Cli::try_parse_from(["advent23", "5", "3"]).is_err());
	assert!(Cli::try_parse_from(["advent23", "-q", "-v", "5", "1"]).is_err());
}
