use hexfit_config::Scoring;
use hexfit_domain::Resource;

use crate::{
	context::{MatchContext, TrustWeights},
	score::{Dimension, Score, ScoreDetail},
};

/// Minimum of the two directional trust weights. An absent weight counts as full trust; a
/// zero weight is an explicit block.
pub fn score(
	need: &Resource,
	capacity: &Resource,
	context: &MatchContext<'_>,
	_policy: &Scoring,
) -> Score {
	let seeker_to_provider = weight(context.seeker_weights, capacity.offerer.as_deref());
	let provider_to_seeker = weight(context.provider_weights, need.offerer.as_deref());
	let value = seeker_to_provider.min(provider_to_seeker);
	let detail = ScoreDetail::Affinity { seeker_to_provider, provider_to_seeker };
	let reason = if value == 0.0 {
		format!(
			"Trust blocked: seeker to provider {seeker_to_provider:.2}, provider to seeker {provider_to_seeker:.2}."
		)
	} else {
		format!(
			"Mutual trust {value:.2} (seeker to provider {seeker_to_provider:.2}, provider to seeker {provider_to_seeker:.2})."
		)
	};

	Score::new(Dimension::Affinity, value, reason, detail)
}

fn weight(weights: Option<&TrustWeights>, agent: Option<&str>) -> f64 {
	weights
		.zip(agent)
		.and_then(|(weights, agent)| weights.get(agent).copied())
		.filter(|weight| weight.is_finite())
		.map(|weight| weight.clamp(0.0, 1.0))
		.unwrap_or(1.0)
}
