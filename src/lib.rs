// Copyright (c) 2022 Bastiaan Marinus van de Weerd

pub mod input;
pub mod logs;
pub mod ranges;

pub mod day05;


macro_rules! solutions { ( $( $day:literal => $error:ty ),* $(,)? ) => { paste::paste! {

	#[derive(Debug, thiserror::Error)]
	pub enum Error {
		#[error("no solution for day {day} part {part}")]
		NoSolution { day: u8, part: u8 },
		$(
			#[error("day {day}: {0}", day = $day)]
			[<Day $day>](#[source] $error),
		)*
	}

	/// Runs one part of one day on the input's lines.
	pub fn solve<S: AsRef<str>>(day: u8, part: u8, lines: impl IntoIterator<Item = S>)
	-> Result<String, Error> {
		match (day, part) {
			$(
				($day, 1) => [<day $day>]::part1(lines)
					.map(|answer| answer.to_string())
					.map_err(Error::[<Day $day>]),
				($day, 2) => [<day $day>]::part2(lines)
					.map(|answer| answer.to_string())
					.map_err(Error::[<Day $day>]),
			)*
			_ => Err(Error::NoSolution { day, part }),
		}
	}

} } }

solutions! {
	05 => day05::AlmanacError,
}


#[test]
fn tests() {
	let input = indoc::indoc! { "
		seeds: 3 1

		seed-to-soil map:
		10 3 1

		soil-to-fertilizer map:

		fertilizer-to-water map:

		water-to-light map:

		light-to-temperature map:

		temperature-to-humidity map:

		humidity-to-location map:
	" };
	// Part 1 reads `1` as a seed of its own
	assert_eq!(solve(5, 1, input.lines()).unwrap(), "1");
	assert_eq!(solve(5, 2, input.lines()).unwrap(), "10");
	assert!(matches!(solve(5, 3, input.lines()), Err(Error::NoSolution { day: 5, part: 3 })));
	assert!(matches!(solve(6, 1, input.lines()), Err(Error::NoSolution { day: 6, part: 1 })));

	let error = solve(5, 1, ["seeds:"]).unwrap_err();
	assert!(matches!(error, Error::Day05(day05::AlmanacError::SeedsFormat { line: 1, .. })));
	assert_eq!(error.to_string(), r#"day 5: line 1: expected "seeds: …" but got "seeds:""#);
}
