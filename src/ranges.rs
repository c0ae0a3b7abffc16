// Copyright (c) 2022 Bastiaan Marinus van de Weerd

//! Half-open integer ranges, and tables of offset transforms that move
//! (parts of) them around. A table is one stage; stages chain into a
//! pipeline.

use std::{collections::VecDeque, fmt};
use log::trace;


/// The half-open interval `[start, end)`. Never empty, never negative.
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(test, derive(Debug))]
pub struct Range {
	start: i64,
	end: i64,
}

impl Range {
	/// Panics if `[start, end)` would be empty or reach below zero.
	pub fn new(start: i64, end: i64) -> Self {
		assert!(start >= 0 && end > start, "Invalid range [{start}-{end})");
		Range { start, end }
	}

	pub fn try_new(start: i64, end: i64) -> Option<Self> {
		(start >= 0 && end > start).then_some(Range { start, end })
	}

	pub fn start(&self) -> i64 { self.start }
	pub fn end(&self) -> i64 { self.end }

	#[allow(clippy::len_without_is_empty)]
	pub fn len(&self) -> i64 { self.end - self.start }

	pub fn contains(&self, value: i64) -> bool {
		(self.start..self.end).contains(&value)
	}
}

impl std::ops::Add<i64> for Range {
	type Output = Range;
	fn add(self, offset: i64) -> Self::Output {
		Range::new(self.start + offset, self.end + offset)
	}
}

impl fmt::Display for Range {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}-{})", self.start, self.end)
	}
}


/// Moves any value inside `range` by `offset`.
#[derive(PartialEq, Eq, Clone, Copy)]
#[cfg_attr(test, derive(Debug))]
pub struct RangeTransform {
	pub range: Range,
	pub offset: i64,
}

impl RangeTransform {
	pub fn new(range: Range, offset: i64) -> Self {
		RangeTransform { range, offset }
	}
}


/// One stage: an ordered table of transforms. Lookups use the first
/// transform (in table order) that matches; unmatched values pass through.
#[derive(Clone, Default)]
#[cfg_attr(test, derive(Debug))]
pub struct Transforms(Vec<RangeTransform>);

impl Transforms {
	/// Keeps the given order.
	pub fn new(transforms: Vec<RangeTransform>) -> Self {
		Transforms(transforms)
	}

	/// Orders by source range start. Equal starts keep their given order.
	pub fn sorted(mut transforms: Vec<RangeTransform>) -> Self {
		transforms.sort_by_key(|t| t.range.start);
		Transforms(transforms)
	}

	pub fn iter(&self) -> impl Iterator<Item = &RangeTransform> + '_ {
		self.0.iter()
	}

	#[allow(clippy::len_without_is_empty)]
	pub fn len(&self) -> usize { self.0.len() }

	pub fn map_value(&self, value: i64) -> i64 {
		self.0.iter()
			.find(|t| t.range.contains(value))
			.map(|t| value + t.offset)
			.unwrap_or(value)
	}
}

/// A piece of a split range, tagged with whether it overlaps the range it
/// was split against.
#[derive(PartialEq, Eq, Clone, Copy)]
#[cfg_attr(test, derive(Debug))]
pub struct Fragment {
	pub range: Range,
	pub is_overlap: bool,
}

/// Splits `base` into the parts before, inside, and after `other`, in that
/// order, omitting empty parts. Together they cover `base` exactly.
pub fn intersect(base: Range, other: Range) -> impl Iterator<Item = Fragment> {
	// BBBBBBBBBBBBBBBB base
	//      OOOO        other
	// SSSSSIIIIEEEEEEE S: before, I: overlap, E: after
	[
		(base.start, base.end.min(other.start), false),
		(base.start.max(other.start), base.end.min(other.end), true),
		(base.start.max(other.end), base.end, false),
	]
		.into_iter()
		.filter_map(|(start, end, is_overlap)| Range::try_new(start, end)
			.map(|range| Fragment { range, is_overlap }))
}

/// Sends `range` through one stage. Each output range is either a shifted
/// overlap with exactly one transform, or a fragment no transform touches.
pub fn apply_transforms(transforms: &Transforms, range: Range)
-> impl Iterator<Item = Range> + '_ {
	let mut unresolved = VecDeque::from([range]);
	std::iter::from_fn(move || {
		let range = unresolved.pop_front()?;
		for transform in transforms.iter() {
			let (overlaps, rest): (Vec<_>, Vec<_>) = intersect(range, transform.range)
				.partition(|f| f.is_overlap);
			let Some(overlap) = overlaps.first() else { continue };
			unresolved.extend(rest.into_iter().map(|f| f.range));
			trace!("Transforming {} by {}", overlap.range, transform.offset);
			return Some(overlap.range + transform.offset)
		}
		trace!("No transform for {range}");
		Some(range)
	})
}

/// Sends `range` through every stage, in order.
pub fn apply_maps<'t>(maps: impl IntoIterator<Item = &'t Transforms>, range: Range)
-> Vec<Range> {
	maps.into_iter().fold(vec![range], |ranges, transforms| ranges.into_iter()
		.flat_map(|range| apply_transforms(transforms, range))
		.collect())
}

/// Point-wise counterpart of [`apply_maps`].
pub fn map_value_through<'t>(maps: impl IntoIterator<Item = &'t Transforms>, value: i64)
-> i64 {
	maps.into_iter().fold(value, |value, transforms| transforms.map_value(value))
}


#[cfg(test)]
fn r(start: i64, end: i64) -> Range { Range::new(start, end) }

#[cfg(test)]
fn t(start: i64, end: i64, offset: i64) -> RangeTransform {
	RangeTransform::new(r(start, end), offset)
}

#[test]
fn intersect_cases() {
	const CASES: [((i64, i64), (i64, i64), &[((i64, i64), bool)]); 11] = [
		// Disjoint, base first
		((0, 10), (20, 30), &[((0, 10), false)]),
		// Disjoint, other first
		((20, 30), (0, 10), &[((20, 30), false)]),
		// Exact
		((0, 10), (0, 10), &[((0, 10), true)]),
		// Partial, base first
		((0, 10), (5, 15), &[((0, 5), false), ((5, 10), true)]),
		// Partial, other first
		((5, 15), (0, 10), &[((5, 10), true), ((10, 15), false)]),
		// Base contains other
		((0, 20), (5, 15), &[((0, 5), false), ((5, 15), true), ((15, 20), false)]),
		// Other contains base
		((5, 15), (0, 20), &[((5, 15), true)]),
		// Shared end, other wider
		((5, 10), (0, 10), &[((5, 10), true)]),
		// Shared start, other wider
		((5, 10), (5, 15), &[((5, 10), true)]),
		// Shared end, base wider
		((0, 10), (5, 10), &[((0, 5), false), ((5, 10), true)]),
		// Shared start, base wider
		((0, 10), (0, 5), &[((0, 5), true), ((5, 10), false)]),
	];
	for (base, other, expected) in CASES {
		let actual = intersect(r(base.0, base.1), r(other.0, other.1)).collect::<Vec<_>>();
		let expected = expected.iter()
			.map(|&((s, e), is_overlap)| Fragment { range: r(s, e), is_overlap })
			.collect::<Vec<_>>();
		assert_eq!(actual, expected, "base {base:?}, other {other:?}");
	}
}

#[test]
fn intersect_properties() {
	use itertools::Itertools as _;

	let ranges = (0..8).tuple_combinations().map(|(s, e)| r(s, e)).collect::<Vec<_>>();
	for (&base, &other) in ranges.iter().cartesian_product(&ranges) {
		let fragments = intersect(base, other).collect::<Vec<_>>();
		assert!(fragments.len() <= 3);

		// Contiguous, ascending, and covering `base` exactly
		assert_eq!(fragments.first().map(|f| f.range.start), Some(base.start));
		assert_eq!(fragments.last().map(|f| f.range.end), Some(base.end));
		assert!(fragments.iter().tuple_windows().all(|(a, b)| a.range.end == b.range.start));

		let overlaps = fragments.iter().filter(|f| f.is_overlap).collect::<Vec<_>>();
		let expected = Range::try_new(base.start.max(other.start), base.end.min(other.end));
		assert!(overlaps.len() <= 1);
		assert_eq!(overlaps.first().map(|f| f.range), expected);
		for f in fragments.iter().filter(|f| !f.is_overlap) {
			assert!(f.range.end <= other.start || f.range.start >= other.end);
		}
	}
}

#[test]
fn apply_transforms_scenarios() {
	let transforms = Transforms::new(vec![t(98, 100, -48)]);
	assert_eq!(apply_transforms(&transforms, r(79, 93)).collect::<Vec<_>>(), [r(79, 93)]);

	let transforms = Transforms::new(vec![t(50, 98, 2)]);
	assert_eq!(apply_transforms(&transforms, r(79, 93)).collect::<Vec<_>>(), [r(81, 95)]);

	let transforms = Transforms::sorted(vec![t(98, 100, -48), t(50, 98, 2)]);
	assert_eq!(apply_transforms(&transforms, r(40, 100)).collect::<Vec<_>>(),
		[r(52, 100), r(40, 50), r(50, 52)]);

	let empty = Transforms::default();
	assert_eq!(apply_transforms(&empty, r(3, 7)).collect::<Vec<_>>(), [r(3, 7)]);
}

#[test]
fn apply_transforms_first_match() {
	let transforms = Transforms::new(vec![t(0, 10, 100), t(5, 15, 1000)]);
	assert_eq!(apply_transforms(&transforms, r(0, 20)).collect::<Vec<_>>(),
		[r(100, 110), r(1010, 1015), r(15, 20)]);
	assert_eq!(transforms.map_value(7), 107);
	assert_eq!(transforms.map_value(12), 1012);
	assert_eq!(transforms.map_value(17), 17);

	let transforms = Transforms::new(vec![t(5, 15, 1000), t(0, 10, 100)]);
	assert_eq!(transforms.map_value(7), 1007);
}

#[test]
fn apply_transforms_conservation() {
	use itertools::Itertools as _;

	let inputs = (0..10).tuple_combinations().map(|(s, e)| r(s, e)).collect::<Vec<_>>();
	let tables = (0..=8).tuple_combinations()
		.map(|(a, b, c, d)| Transforms::sorted(vec![t(a, b, 10), t(c, d, 20)]))
		.chain([
			Transforms::default(),
			Transforms::new(vec![t(2, 6, 1)]),
			Transforms::new(vec![t(2, 5, 1), t(5, 7, -2)]),
		])
		.collect::<Vec<_>>();

	for (transforms, &input) in tables.iter().cartesian_product(&inputs) {
		let outputs = apply_transforms(transforms, input).collect::<Vec<_>>();
		assert_eq!(outputs.iter().map(Range::len).sum::<i64>(), input.len());

		// Every value ends up where point-wise lookup sends it
		let expected = (input.start..input.end)
			.map(|v| transforms.map_value(v))
			.sorted()
			.collect::<Vec<_>>();
		let actual = outputs.iter()
			.flat_map(|o| o.start..o.end)
			.sorted()
			.collect::<Vec<_>>();
		assert_eq!(actual, expected, "{transforms:?} on {input}");
	}
}

#[test]
fn apply_maps_pipeline() {
	let maps = [Transforms::new(vec![t(0, 10, 5)]), Transforms::new(vec![t(5, 15, 100)])];
	let ranges = apply_maps(&maps, r(0, 10));
	assert_eq!(ranges, [r(105, 115)]);
	assert_eq!(ranges.iter().map(Range::start).min(), Some(105));
	assert_eq!(map_value_through(&maps, 3), 108);

	let maps = [Transforms::new(vec![t(0, 4, 10)]), Transforms::new(vec![t(12, 20, -12)])];
	let mut ranges = apply_maps(&maps, r(0, 8));
	ranges.sort_by_key(Range::start);
	assert_eq!(ranges, [r(0, 2), r(4, 8), r(10, 12)]);
	let no_maps: [Transforms; 0] = [];
	assert_eq!(apply_maps(&no_maps, r(1, 2)), [r(1, 2)]);
}

#[test]
#[should_panic(expected = "Invalid range")]
fn range_new_rejects_empty() {
	Range::new(5, 5);
}

#[test]
fn range_basics() {
	assert_eq!(Range::try_new(3, 3), None);
	assert_eq!(Range::try_new(4, 3), None);
	assert_eq!(Range::try_new(-1, 3), None);
	assert_eq!(r(3, 8).len(), 5);
	assert_eq!(r(3, 8) + 4, r(7, 12));
	assert_eq!(r(3, 8) + -3, r(0, 5));
	assert!(r(3, 8).contains(3) && !r(3, 8).contains(8));
	assert_eq!(r(3, 8).to_string(), "[3-8)");
}
