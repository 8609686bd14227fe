use hexfit_config::Scoring;
use hexfit_domain::{Resource, schedule};

use crate::{
	context::MatchContext,
	score::{Dimension, Score, ScoreDetail},
};

/// Penalizes fragmented overlap: one block scores 1.0, `n` blocks at most `1 / n`, scaled
/// down further when the average block is shorter than the target.
pub fn score(
	need: &Resource,
	capacity: &Resource,
	context: &MatchContext<'_>,
	policy: &Scoring,
) -> Score {
	let Some(overlap) = schedule::overlap(
		need.availability_window.as_ref(),
		capacity.availability_window.as_ref(),
		context.reference(),
	) else {
		return Score::unconstrained(
			Dimension::Continuity,
			"No availability window on one side; continuity is unconstrained.",
		);
	};
	let blocks = overlap.intervals.blocks();
	let block_count = blocks.len();
	let target_minutes = need
		.min_atomic_size
		.filter(|minutes| *minutes > 0)
		.unwrap_or(policy.continuity.default_target_minutes);
	let average_block_minutes = if block_count == 0 {
		0.0
	} else {
		f64::from(overlap.intervals.total_minutes()) / block_count as f64
	};
	let detail = ScoreDetail::Continuity { block_count, average_block_minutes, target_minutes };

	match block_count {
		0 => Score::new(Dimension::Continuity, 0.0, "No common time blocks.", detail),
		1 => Score::new(
			Dimension::Continuity,
			1.0,
			"Common time forms one contiguous block.",
			detail,
		),
		_ => {
			let fill = (average_block_minutes / f64::from(target_minutes.max(1))).min(1.0);
			let value = ((1.0 / block_count as f64) * fill).min(1.0);

			Score::new(
				Dimension::Continuity,
				value,
				format!(
					"Common time is split into {block_count} blocks averaging {average_block_minutes:.0} min (target {target_minutes} min)."
				),
				detail,
			)
		},
	}
}
