use hexfit_config::Scoring;
use hexfit_domain::Resource;
use hexfit_index::{Locatable, haversine_km};

use crate::{
	context::MatchContext,
	score::{Dimension, Score, ScoreDetail},
};

/// Linear decay from 1.0 at zero distance to 0.0 at the need's search radius (exclusive).
/// Remote on either side scores 1.0.
pub fn score(
	need: &Resource,
	capacity: &Resource,
	_context: &MatchContext<'_>,
	policy: &Scoring,
) -> Score {
	let radius_km = need.radius_or(policy.default_search_radius_km);

	if need.is_remote() || capacity.is_remote() {
		return Score::new(
			Dimension::Space,
			1.0,
			"Remote resource; distance does not apply.",
			ScoreDetail::Space { remote: true, distance_km: None, radius_km },
		);
	}

	let (Some(from), Some(to)) = (need.position(), capacity.position()) else {
		return Score::new(
			Dimension::Space,
			1.0,
			"Location unknown on one side; space is unconstrained.",
			ScoreDetail::Space { remote: false, distance_km: None, radius_km },
		);
	};
	let distance_km = haversine_km(from, to);
	let detail = ScoreDetail::Space { remote: false, distance_km: Some(distance_km), radius_km };

	if distance_km >= radius_km {
		return Score::new(
			Dimension::Space,
			0.0,
			format!("Distance {distance_km:.1} km exceeds the {radius_km:.1} km search radius."),
			detail,
		);
	}

	Score::new(
		Dimension::Space,
		1.0 - distance_km / radius_km,
		format!("Distance {distance_km:.1} km within the {radius_km:.1} km search radius."),
		detail,
	)
}
