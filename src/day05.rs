// Copyright (c) 2022 Bastiaan Marinus van de Weerd

//! Seeds are sent through seven stages of almanac maps to find the lowest
//! location number. Part 1 treats the seed numbers as individual values,
//! part 2 as `(start, length)` pairs.

use log::debug;
use crate::ranges::{apply_maps, map_value_through, Range, Transforms};

pub use parsing::{AlmanacError, NumberError};


/// Map names, in pipeline order.
pub const STAGES: [&str; 7] = [
	"seed-to-soil",
	"soil-to-fertilizer",
	"fertilizer-to-water",
	"water-to-light",
	"light-to-temperature",
	"temperature-to-humidity",
	"humidity-to-location",
];


#[cfg_attr(test, derive(Debug))]
pub struct Almanac {
	seeds: Vec<i64>,
	maps: Vec<Transforms>,
}

impl Almanac {
	pub fn maps(&self) -> &[Transforms] { &self.maps }

	fn seed_values(&self) -> impl Iterator<Item = i64> + '_ {
		self.seeds.iter().copied()
	}

	fn seed_ranges(&self) -> Result<Vec<Range>, AlmanacError> {
		use itertools::Itertools as _;
		if self.seeds.len() % 2 != 0 {
			return Err(AlmanacError::OddSeeds { count: self.seeds.len() })
		}
		self.seeds.iter().copied()
			.tuples()
			.map(|(start, len)| start.checked_add(len)
				.and_then(|end| Range::try_new(start, end))
				.ok_or(AlmanacError::SeedRange { start, len }))
			.collect()
	}
}


pub fn part1<S: AsRef<str>>(lines: impl IntoIterator<Item = S>) -> Result<i64, AlmanacError> {
	let almanac = Almanac::try_from_lines(lines)?;
	debug!("seeds: {:?}", almanac.seeds);
	almanac.seed_values()
		.map(|seed| map_value_through(almanac.maps(), seed))
		.min()
		.ok_or(AlmanacError::NoSeeds)
}


pub fn part2<S: AsRef<str>>(lines: impl IntoIterator<Item = S>) -> Result<i64, AlmanacError> {
	use itertools::Itertools as _;

	let almanac = Almanac::try_from_lines(lines)?;
	let seeds = almanac.seed_ranges()?;
	debug!("seeds: {}", seeds.iter().join(", "));
	seeds.into_iter()
		.flat_map(|seed| apply_maps(almanac.maps(), seed))
		.map(|location| location.start())
		.min()
		.ok_or(AlmanacError::NoSeeds)
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use log::warn;
	use thiserror::Error;
	use crate::ranges::{Range, RangeTransform, Transforms};
	use super::{Almanac, STAGES};

	#[derive(Debug, Error)]
	pub enum AlmanacError {
		#[error("line {line}: expected {expected:?} but reached the end of the input")]
		UnexpectedEnd { line: usize, expected: &'static str },
		#[error("line {line}: expected \"seeds: …\" but got {found:?}")]
		SeedsFormat { line: usize, found: String },
		#[error("line {line}: seed number {field} is invalid")]
		Seed { line: usize, field: usize, #[source] source: NumberError },
		#[error("no seeds")]
		NoSeeds,
		#[error("seed ranges need pairs of numbers, got {count}")]
		OddSeeds { count: usize },
		#[error("seed range starting at {start} with length {len} is empty or too long")]
		SeedRange { start: i64, len: i64 },
		#[error("line {line}: expected a blank line but got {found:?}")]
		ExpectedBlank { line: usize, found: String },
		#[error("line {line}: expected {expected:?} but got {found:?}")]
		Header { line: usize, expected: String, found: String },
		#[error("line {line}: expected 3 numbers but got {found}")]
		RowLen { line: usize, found: usize },
		#[error("line {line}: number {field} is invalid")]
		RowNumber { line: usize, field: usize, #[source] source: NumberError },
		#[error("line {line}: map range of length {len} at {source_start} is empty or too long")]
		RowRange { line: usize, source_start: i64, len: i64 },
	}

	#[derive(Debug, Error)]
	pub enum NumberError {
		#[error(transparent)]
		Format(#[from] ParseIntError),
		#[error("{0} is out of range")]
		TooLarge(u64),
	}

	use AlmanacError::*;

	/// Non-negative, and small enough to add a length or offset to in `i64`.
	fn try_number(s: &str) -> Result<i64, NumberError> {
		let number = s.parse::<u64>()?;
		i64::try_from(number).map_err(|_| NumberError::TooLarge(number))
	}

	fn is_blank(line: &str) -> bool {
		line.trim().is_empty()
	}

	struct Lines<I> { inner: I, line: usize }

	impl<I, S> Lines<I> where I: Iterator<Item = S>, S: AsRef<str> {
		fn next(&mut self) -> Option<S> {
			let next = self.inner.next()?;
			self.line += 1;
			Some(next)
		}

		fn try_next(&mut self, expected: &'static str) -> Result<S, AlmanacError> {
			self.next().ok_or(UnexpectedEnd { line: self.line + 1, expected })
		}
	}

	fn try_seeds_from_lines<I, S>(lines: &mut Lines<I>) -> Result<Vec<i64>, AlmanacError>
	where I: Iterator<Item = S>, S: AsRef<str> {
		let line = lines.try_next("seeds: …")?;
		let seeds = line.as_ref().strip_prefix("seeds: ")
			.ok_or_else(|| SeedsFormat { line: lines.line, found: line.as_ref().to_owned() })?
			.split_whitespace()
			.enumerate()
			.map(|(f, s)| try_number(s)
				.map_err(|e| Seed { line: lines.line, field: f + 1, source: e }))
			.collect::<Result<Vec<_>, _>>()?;
		if seeds.is_empty() { return Err(NoSeeds) }

		let blank = lines.try_next("")?;
		if !is_blank(blank.as_ref()) {
			return Err(ExpectedBlank { line: lines.line, found: blank.as_ref().to_owned() })
		}
		Ok(seeds)
	}

	fn try_transform_from_str(line: usize, s: &str) -> Result<RangeTransform, AlmanacError> {
		let numbers = s.split_whitespace()
			.enumerate()
			.map(|(f, s)| try_number(s)
				.map_err(|e| RowNumber { line, field: f + 1, source: e }))
			.collect::<Result<Vec<_>, _>>()?;
		let &[dest_start, source_start, len] = numbers.as_slice()
			else { return Err(RowLen { line, found: numbers.len() }) };
		// The destination end must fit too, for shifted ranges to stay in bounds
		let range = source_start.checked_add(len)
			.zip(dest_start.checked_add(len))
			.and_then(|(source_end, _)| Range::try_new(source_start, source_end))
			.ok_or(RowRange { line, source_start, len })?;
		Ok(RangeTransform::new(range, dest_start - source_start))
	}

	fn try_transforms_from_lines<I, S>(name: &str, lines: &mut Lines<I>)
	-> Result<Transforms, AlmanacError>
	where I: Iterator<Item = S>, S: AsRef<str> {
		let header = lines.try_next("… map:")?;
		let expected = format!("{name} map:");
		if header.as_ref() != expected {
			return Err(Header { line: lines.line, expected, found: header.as_ref().to_owned() })
		}

		let mut transforms = vec![];
		while let Some(line) = lines.next() {
			if is_blank(line.as_ref()) { break }
			transforms.push(try_transform_from_str(lines.line, line.as_ref())?);
		}
		Ok(Transforms::sorted(transforms))
	}

	impl Almanac {
		pub fn try_from_lines<S: AsRef<str>>(lines: impl IntoIterator<Item = S>)
		-> Result<Self, AlmanacError> {
			let mut lines = Lines { inner: lines.into_iter(), line: 0 };
			let seeds = try_seeds_from_lines(&mut lines)?;
			let maps = STAGES.into_iter()
				.map(|name| try_transforms_from_lines(name, &mut lines))
				.collect::<Result<Vec<_>, _>>()?;
			while let Some(line) = lines.next() {
				if !is_blank(line.as_ref()) {
					warn!("Ignoring trailing input from line {}", lines.line);
					break
				}
			}
			Ok(Almanac { seeds, maps })
		}
	}

	impl FromStr for Almanac {
		type Err = AlmanacError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			Almanac::try_from_lines(s.lines())
		}
	}
}


#[cfg(test)]
const INPUT: &str = indoc::indoc! { "
	seeds: 79 14 55 13

	seed-to-soil map:
	50 98 2
	52 50 48

	soil-to-fertilizer map:
	0 15 37
	37 52 2
	39 0 15

	fertilizer-to-water map:
	49 53 8
	0 11 42
	42 0 7
	57 7 4

	water-to-light map:
	88 18 7
	18 25 70

	light-to-temperature map:
	45 77 23
	81 45 19
	68 64 13

	temperature-to-humidity map:
	0 69 1
	1 0 69

	humidity-to-location map:
	60 56 37
	56 93 4
" };

#[test]
fn tests() {
	assert_eq!(part1(INPUT.lines()).unwrap(), 35);
	assert_eq!(part2(INPUT.lines()).unwrap(), 46);
}

#[test]
fn seed_locations() {
	let almanac = INPUT.parse::<Almanac>().unwrap();
	assert_eq!(almanac.maps().len(), STAGES.len());
	assert_eq!(almanac.maps()[0].len(), 2);
	assert_eq!(almanac.maps()[0].iter().next().map(|t| t.range), Some(Range::new(50, 98)));

	for (seed, soil, location) in [(79, 81, 82), (14, 14, 43), (55, 57, 86), (13, 13, 35)] {
		assert_eq!(almanac.maps()[0].map_value(seed), soil);
		assert_eq!(map_value_through(almanac.maps(), seed), location);

		let single = apply_maps(almanac.maps(), Range::new(seed, seed + 1));
		assert_eq!(single, [Range::new(location, location + 1)]);
		assert_eq!(single[0].end(), location + 1);
	}

	let total = apply_maps(almanac.maps(), Range::new(79, 93)).iter()
		.map(Range::len)
		.sum::<i64>();
	assert_eq!(total, 14);
}

#[test]
fn blank_lines() {
	let spaced = INPUT.replacen("\n\n", "\n   \n", 2).replace("\n\nwater", "\n\t\nwater");
	assert_eq!(spaced.lines().filter(|l| !l.is_empty() && l.trim().is_empty()).count(), 3);
	assert_eq!(part1(spaced.lines()).unwrap(), 35);
	assert_eq!(part2(spaced.lines()).unwrap(), 46);

	let trailing = format!("{INPUT}\n\ngarbage");
	assert_eq!(part1(trailing.lines()).unwrap(), 35);
	assert_eq!(part2(trailing.lines()).unwrap(), 46);
}

#[test]
fn large_numbers() {
	// Seeds and map rows past `u32::MAX`
	let input = INPUT
		.replacen("79 14 55 13", "5000000000 10 79 14", 1)
		.replacen("50 98 2", "6000000000 5000000000 5", 1);
	assert_eq!(part1(input.lines()).unwrap(), 32);
	assert_eq!(part2(input.lines()).unwrap(), 46);

	let input = INPUT.replacen("79 14 55 13", "5000000000 10", 1);
	assert_eq!(part1(input.lines()).unwrap(), 32);
	assert_eq!(part2(input.lines()).unwrap(), 5_000_000_000);

	let input = INPUT.replacen("79 14 55 13", "5000000000", 1);
	assert_eq!(part1(input.lines()).unwrap(), 5_000_000_000);
}

#[test]
fn single_seed_pipeline() {
	let input = indoc::indoc! { "
		seeds: 0 10

		seed-to-soil map:
		5 0 10

		soil-to-fertilizer map:
		105 5 10

		fertilizer-to-water map:

		water-to-light map:

		light-to-temperature map:

		temperature-to-humidity map:

		humidity-to-location map:
	" };
	assert_eq!(part2(input.lines()).unwrap(), 105);
	// 10 falls just outside the first map, then inside the second
	assert_eq!(part1(input.lines()).unwrap(), 105);
}

#[test]
fn errors() {
	use itertools::Itertools as _;
	let lines = |edit: fn(&str) -> String| edit(INPUT);

	assert!(matches!(part1(lines(|s| s.replacen("seeds:", "seed:", 1)).lines()),
		Err(AlmanacError::SeedsFormat { line: 1, .. })));
	assert!(matches!(part1(lines(|s| s.replacen(" 14 ", " x ", 1)).lines()),
		Err(AlmanacError::Seed { line: 1, field: 2, .. })));
	assert!(matches!(part1(lines(|s| s.replacen(" 14 ", " -14 ", 1)).lines()),
		Err(AlmanacError::Seed { line: 1, field: 2, .. })));
	assert!(matches!(part1(lines(|s| s.replacen("79 14 55 13", "", 1)).lines()),
		Err(AlmanacError::NoSeeds)));
	assert!(matches!(part1(lines(|s| s.replacen("\n\n", "\n", 1)).lines()),
		Err(AlmanacError::ExpectedBlank { line: 2, .. })));
	assert!(matches!(part1(lines(|s| s.replacen("52 50 48", "52 50", 1)).lines()),
		Err(AlmanacError::RowLen { line: 5, found: 2 })));
	assert!(matches!(part1(lines(|s| s.replacen("52 50 48", "52 50 4 8", 1)).lines()),
		Err(AlmanacError::RowLen { line: 5, found: 4 })));
	assert!(matches!(part1(lines(|s| s.replacen("52 50 48", "52 5O 48", 1)).lines()),
		Err(AlmanacError::RowNumber { line: 5, field: 2, .. })));
	assert!(matches!(part1(lines(|s| s.replacen("52 50 48", "52 50 0", 1)).lines()),
		Err(AlmanacError::RowRange { line: 5, source_start: 50, len: 0 })));
	assert!(matches!(part1(lines(|s| s.replacen("52 50 48", "52 50 9223372036854775807", 1)).lines()),
		Err(AlmanacError::RowRange { line: 5, source_start: 50, .. })));
	assert!(matches!(part1(lines(|s| s.replacen("52 50 48", "52 50 9223372036854775808", 1)).lines()),
		Err(AlmanacError::RowNumber { line: 5, field: 3, source: NumberError::TooLarge(_) })));
	assert!(matches!(part1(lines(|s| s.replacen(" 14 ", " -14 ", 1)).lines()),
		Err(AlmanacError::Seed { source: NumberError::Format(_), .. })));
	assert!(matches!(part1(["seeds: 1 2"]), Err(AlmanacError::UnexpectedEnd { line: 2, .. })));
	assert!(matches!(part1(["seeds: 1 2", ""]),
		Err(AlmanacError::UnexpectedEnd { line: 3, .. })));
	assert!(matches!(part1(INPUT.lines().take(20)),
		Err(AlmanacError::UnexpectedEnd { line: 21, .. })));

	let Err(AlmanacError::Header { line, expected, found }) =
		part1(lines(|s| s.replacen("water-to-light", "water-to-lite", 1)).lines())
		else { panic!("expected a header error") };
	assert_eq!(line, 18);
	assert_eq!(expected, "water-to-light map:");
	assert_eq!(found, "water-to-lite map:");

	let swapped = INPUT.lines()
		.map(|l| if l.starts_with("soil-to") { "fertilizer-to-water map:" } else { l })
		.join("\n");
	assert!(matches!(part1(swapped.lines()), Err(AlmanacError::Header { line: 7, .. })));

	assert!(matches!(part2(lines(|s| s.replacen(" 13", "", 1)).lines()),
		Err(AlmanacError::OddSeeds { count: 3 })));
	assert!(matches!(part2(lines(|s| s.replacen(" 13", " 0", 1)).lines()),
		Err(AlmanacError::SeedRange { start: 55, len: 0 })));
	assert_eq!(part1(lines(|s| s.replacen(" 13", "", 1)).lines()).unwrap(), 43);

	// Duplicate seeds change nothing
	assert_eq!(part1(lines(|s| s.replacen(" 13", " 13 13 79", 1)).lines()).unwrap(), 35);

	let message = part1(lines(|s| s.replacen("water-to-light", "water-to-lite", 1)).lines())
		.unwrap_err()
		.to_string();
	assert_eq!(message, r#"line 18: expected "water-to-light map:" but got "water-to-lite map:""#);
}
