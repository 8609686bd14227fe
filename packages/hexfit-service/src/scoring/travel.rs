use hexfit_config::{Scoring, Travel};
use hexfit_domain::Resource;
use hexfit_index::{GeoPoint, Locatable, haversine_km};

use crate::{
	context::MatchContext,
	score::{Dimension, Score, ScoreDetail},
};

/// Whether the seeker can get from the previous commitment to the capacity's start.
///
/// Straight-line distance is inflated by the tortuosity factor. Speeds up to the
/// comfortable limit score 1.0, decaying linearly to `min_score` at the maximum speed;
/// anything faster, or a slot starting before the previous one ends, scores zero.
pub fn score(
	_need: &Resource,
	capacity: &Resource,
	context: &MatchContext<'_>,
	policy: &Scoring,
) -> Score {
	if capacity.is_remote() {
		return Score::unconstrained(Dimension::Travel, "Remote capacity; no travel needed.");
	}

	let Some(previous) = context.previous_commitment else {
		return Score::unconstrained(
			Dimension::Travel,
			"No previous commitment; travel is unconstrained.",
		);
	};
	let (Some(ends_at), Some(starts_at)) = (previous.end_time, capacity.starts_at) else {
		return Score::unconstrained(
			Dimension::Travel,
			"Previous end or capacity start unknown; travel is unconstrained.",
		);
	};
	let from = previous
		.latitude
		.zip(previous.longitude)
		.and_then(|(latitude, longitude)| GeoPoint::new(latitude, longitude));
	let (Some(from), Some(to)) = (from, capacity.position()) else {
		return Score::unconstrained(
			Dimension::Travel,
			"Travel origin or destination unknown; travel is unconstrained.",
		);
	};
	let travel = &policy.travel;
	let distance_km = haversine_km(from, to) * travel.tortuosity;
	let gap_minutes = (starts_at - ends_at).whole_seconds() as f64 / 60.0;

	if starts_at < ends_at {
		return Score::new(
			Dimension::Travel,
			0.0,
			format!("Slot starts {:.0} min before the previous commitment ends.", -gap_minutes),
			ScoreDetail::Travel { distance_km, gap_minutes, speed_kmh: None },
		);
	}
	if gap_minutes == 0.0 {
		let value = if distance_km > 0.0 { 0.0 } else { 1.0 };

		return Score::new(
			Dimension::Travel,
			value,
			format!("No time between commitments to cover {distance_km:.1} km."),
			ScoreDetail::Travel { distance_km, gap_minutes, speed_kmh: None },
		);
	}

	let speed_kmh = distance_km / (gap_minutes / 60.0);
	let value = speed_score(speed_kmh, travel);
	let detail = ScoreDetail::Travel { distance_km, gap_minutes, speed_kmh: Some(speed_kmh) };
	let reason = if value == 0.0 {
		format!(
			"Reaching the slot needs {speed_kmh:.1} km/h over {distance_km:.1} km, above the {:.0} km/h limit.",
			travel.max_speed_kmh
		)
	} else {
		format!(
			"Reaching the slot needs {speed_kmh:.1} km/h over {distance_km:.1} km in {gap_minutes:.0} min."
		)
	};

	Score::new(Dimension::Travel, value, reason, detail)
}

fn speed_score(speed_kmh: f64, travel: &Travel) -> f64 {
	if speed_kmh <= travel.comfortable_speed_kmh {
		return 1.0;
	}
	if speed_kmh > travel.max_speed_kmh {
		return 0.0;
	}

	let span = travel.max_speed_kmh - travel.comfortable_speed_kmh;
	let excess = (speed_kmh - travel.comfortable_speed_kmh) / span;

	1.0 - (1.0 - travel.min_score) * excess
}
