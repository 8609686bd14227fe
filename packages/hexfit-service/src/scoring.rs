//! The seven dimension scorers.
//!
//! Each scorer is a pure function of the need, the capacity, the match context and the
//! scoring policy. Scorers never fail: absent inputs score 1.0 with a reason saying so.

pub mod affinity;
pub mod continuity;
pub mod quantity;
pub mod skills;
pub mod space;
pub mod time;
pub mod travel;

use hexfit_config::Scoring;
use hexfit_domain::Resource;

use crate::{
	context::MatchContext,
	score::{Breakdown, Dimension, Score},
};

pub type Scorer = fn(&Resource, &Resource, &MatchContext<'_>, &Scoring) -> Score;

/// Scorers in [`Dimension::ALL`] order.
pub const SCORERS: [(Dimension, Scorer); 7] = [
	(Dimension::Time, time::score),
	(Dimension::Space, space::score),
	(Dimension::Skills, skills::score),
	(Dimension::Travel, travel::score),
	(Dimension::Quantity, quantity::score),
	(Dimension::Affinity, affinity::score),
	(Dimension::Continuity, continuity::score),
];

/// Runs every scorer over one pair.
pub fn breakdown(
	need: &Resource,
	capacity: &Resource,
	context: &MatchContext<'_>,
	policy: &Scoring,
) -> Breakdown {
	Breakdown::from_ordered(SCORERS.map(|(_, scorer)| scorer(need, capacity, context, policy)))
}

#[cfg(test)]
mod tests {
	use crate::{score::Dimension, scoring::SCORERS};

	#[test]
	fn table_follows_dimension_order() {
		let dimensions: Vec<Dimension> = SCORERS.iter().map(|(dimension, _)| *dimension).collect();

		assert_eq!(dimensions, Dimension::ALL.to_vec());
	}
}
