use hexfit_config::Scoring;
use hexfit_domain::Resource;

use crate::{
	context::MatchContext,
	score::{Dimension, Score, ScoreDetail},
};

/// Share of the needed quantity the capacity covers.
pub fn score(
	need: &Resource,
	capacity: &Resource,
	_context: &MatchContext<'_>,
	_policy: &Scoring,
) -> Score {
	let needed = finite_or_zero(need.quantity);
	let offered = finite_or_zero(capacity.quantity);
	let unit = need.unit.as_deref().or(capacity.unit.as_deref()).unwrap_or("units");
	let detail = ScoreDetail::Quantity { needed, offered };

	if offered <= 0.0 {
		return Score::new(Dimension::Quantity, 0.0, "Capacity offers no quantity.", detail);
	}
	if needed <= 0.0 {
		return Score::new(Dimension::Quantity, 1.0, "Need requests no quantity.", detail);
	}

	let value = needed.min(offered) / needed;
	let reason = if offered >= needed {
		format!("Capacity offers {offered} {unit}, covering the {needed} {unit} needed.")
	} else {
		format!("Capacity offers {offered} of {needed} {unit} needed.")
	};

	Score::new(Dimension::Quantity, value, reason, detail)
}

fn finite_or_zero(value: f64) -> f64 {
	if value.is_finite() { value } else { 0.0 }
}
