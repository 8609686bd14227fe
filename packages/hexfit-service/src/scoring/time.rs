use hexfit_config::Scoring;
use hexfit_domain::{Resource, schedule};

use crate::{
	context::MatchContext,
	score::{Dimension, Score, ScoreDetail},
};

/// Zero when the windows share no time or the largest shared block is shorter than the
/// need's `min_atomic_size`; otherwise 1.0.
pub fn score(
	need: &Resource,
	capacity: &Resource,
	context: &MatchContext<'_>,
	_policy: &Scoring,
) -> Score {
	let Some(overlap) = schedule::overlap(
		need.availability_window.as_ref(),
		capacity.availability_window.as_ref(),
		context.reference(),
	) else {
		return Score::unconstrained(
			Dimension::Time,
			"No availability window on one side; time is unconstrained.",
		);
	};
	let blocks = overlap.intervals.blocks();
	let block_count = blocks.len();
	let total_minutes = overlap.intervals.total_minutes();
	let largest = blocks.iter().map(|block| block.minutes).max().unwrap_or(0);
	let detail = ScoreDetail::Time {
		overlaps: block_count > 0,
		block_count,
		total_minutes,
		largest_block_minutes: largest,
		min_atomic_size: need.min_atomic_size,
	};

	if block_count == 0 {
		return Score::new(Dimension::Time, 0.0, "Availability windows do not overlap.", detail);
	}
	if let Some(min_atomic_size) = need.min_atomic_size
		&& largest < min_atomic_size
	{
		return Score::new(
			Dimension::Time,
			0.0,
			format!(
				"Largest common block is {largest} min, shorter than the {min_atomic_size} min minimum."
			),
			detail,
		);
	}

	Score::new(
		Dimension::Time,
		1.0,
		format!(
			"{block_count} common block(s) totalling {total_minutes} min; largest is {largest} min."
		),
		detail,
	)
}
