// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::io::Write as _;
use log::LevelFilter;


/// Warnings and up for everything, `crate_level` for this crate and the
/// binary. `RUST_LOG` takes precedence over both.
pub fn setup_logging(crate_level: LevelFilter) {
	builder(crate_level)
		.parse_env(env_logger::Env::default())
		.init()
}

fn builder(crate_level: LevelFilter) -> env_logger::Builder {
	let mut builder = env_logger::Builder::new();
	builder
		.filter_level(LevelFilter::Warn)
		.filter_module(env!("CARGO_CRATE_NAME"), crate_level)
		.format(|buf, record| writeln!(buf, "[{}][{:>5}][{}] {}",
			buf.timestamp_millis(), record.level(), record.target(), record.args()))
		.target(env_logger::Target::Stderr);
	builder
}


#[test]
fn tests() {
	use log::Log as _;

	let logger = builder(LevelFilter::Debug).build();
	assert_eq!(logger.filter(), LevelFilter::Debug);
	let enabled = |target, level| logger.enabled(&log::Metadata::builder()
		.target(target)
		.level(level)
		.build());
	assert!(enabled("advent23::day05", log::Level::Debug));
	assert!(!enabled("advent23::day05", log::Level::Trace));
	assert!(!enabled("other_crate", log::Level::Info));
	assert!(enabled("other_crate", log::Level::Warn));
}
