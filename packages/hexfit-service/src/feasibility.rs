use std::collections::BTreeMap;

use serde::Serialize;

use hexfit_config::Scoring;
use hexfit_domain::Resource;

use crate::{
	context::MatchContext,
	score::{Breakdown, Dimension},
	scoring,
};

/// Verdict for one need/capacity pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeasibilityStatus {
	/// At least one dimension scored zero; `reasons` holds their explanations.
	Impossible {
		reasons: Vec<String>,
		scores: BTreeMap<Dimension, f64>,
		#[serde(skip_serializing_if = "Option::is_none")]
		breakdown: Option<Breakdown>,
	},
	Possible {
		confidence: f64,
		#[serde(skip_serializing_if = "Option::is_none")]
		risk_factors: Option<Vec<String>>,
		scores: BTreeMap<Dimension, f64>,
		#[serde(skip_serializing_if = "Option::is_none")]
		breakdown: Option<Breakdown>,
	},
}
impl FeasibilityStatus {
	pub fn is_possible(&self) -> bool {
		matches!(self, Self::Possible { .. })
	}

	/// Zero for impossible verdicts.
	pub fn confidence(&self) -> f64 {
		match self {
			Self::Impossible { .. } => 0.0,
			Self::Possible { confidence, .. } => *confidence,
		}
	}

	pub fn scores(&self) -> &BTreeMap<Dimension, f64> {
		match self {
			Self::Impossible { scores, .. } | Self::Possible { scores, .. } => scores,
		}
	}

	pub fn breakdown(&self) -> Option<&Breakdown> {
		match self {
			Self::Impossible { breakdown, .. } | Self::Possible { breakdown, .. } =>
				breakdown.as_ref(),
		}
	}
}

/// Scores pairs under one scoring policy.
#[derive(Clone, Debug)]
pub struct Evaluator {
	policy: Scoring,
}
impl Evaluator {
	pub fn new(policy: Scoring) -> Self {
		Self { policy }
	}

	pub fn policy(&self) -> &Scoring {
		&self.policy
	}

	pub fn breakdown(
		&self,
		need: &Resource,
		capacity: &Resource,
		context: &MatchContext<'_>,
	) -> Breakdown {
		scoring::breakdown(need, capacity, context, &self.policy)
	}

	pub fn evaluate(
		&self,
		need: &Resource,
		capacity: &Resource,
		context: &MatchContext<'_>,
	) -> FeasibilityStatus {
		let breakdown = self.breakdown(need, capacity, context);
		let status = classify(&breakdown, context.include_breakdown);

		tracing::debug!(
			need_id = %need.id,
			capacity_id = %capacity.id,
			possible = status.is_possible(),
			confidence = status.confidence(),
			"Evaluated pair."
		);

		status
	}
}

/// Turns a breakdown into a verdict. Zero scores block; scores strictly between zero and one
/// become risk factors.
pub fn classify(breakdown: &Breakdown, include_breakdown: bool) -> FeasibilityStatus {
	let scores: BTreeMap<Dimension, f64> = breakdown.values().into_iter().collect();
	let attached = include_breakdown.then(|| breakdown.clone());
	let reasons: Vec<String> = breakdown
		.iter()
		.filter(|score| score.is_blocking())
		.map(|score| score.reason.clone())
		.collect();

	if !reasons.is_empty() {
		return FeasibilityStatus::Impossible { reasons, scores, breakdown: attached };
	}

	let risk_factors: Vec<String> =
		breakdown.iter().filter(|score| score.is_risk()).map(|score| score.reason.clone()).collect();

	FeasibilityStatus::Possible {
		confidence: breakdown.confidence(),
		risk_factors: (!risk_factors.is_empty()).then_some(risk_factors),
		scores,
		breakdown: attached,
	}
}
