// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::{fs::File, io::{self, BufRead, BufReader}, path::{Path, PathBuf}};


pub const DEFAULT_FILENAME: &str = "input.txt";

/// Puzzle inputs live at `<data_dir>/dayNN/<filename>`.
pub fn data_path(data_dir: impl AsRef<Path>, day: u8, filename: &str) -> PathBuf {
	data_dir.as_ref().join(format!("day{day:02}")).join(filename)
}

/// Reads every line, stripped of its line ending.
pub fn read_stripped_lines(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
	stripped_lines(BufReader::new(File::open(path)?)).collect()
}

pub fn stripped_lines(reader: impl BufRead) -> impl Iterator<Item = io::Result<String>> {
	reader.lines()
}


#[test]
fn tests() {
	assert_eq!(data_path("data", 5, DEFAULT_FILENAME), Path::new("data/day05/input.txt"));
	assert_eq!(data_path("/tmp/x", 25, "example.txt"), Path::new("/tmp/x/day25/example.txt"));

	let lines = stripped_lines(io::Cursor::new("seeds: 1 2\r\n\nlast"))
		.collect::<io::Result<Vec<_>>>()
		.unwrap();
	assert_eq!(lines, ["seeds: 1 2", "", "last"]);

	assert!(read_stripped_lines("/nonexistent/advent23/input.txt").is_err());
}
