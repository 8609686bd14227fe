//! End-to-end matching: index capacities, query around a need, score candidates in
//! parallel and rank the verdicts.

use std::cmp::Ordering;

use ahash::AHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use hexfit_config::Config;
use hexfit_domain::{Commitment, Contact, Resource};
use hexfit_index::{HexGrid, HexIndex, HexIndexBuilder, Locatable};

use crate::{
	Error, Result,
	context::{MatchContext, TrustWeights},
	feasibility::{self, Evaluator, FeasibilityStatus},
	record::{self, MatchIds, MatchRecord, RecordExtras},
};

#[derive(Clone, Debug, Deserialize)]
pub struct Candidate {
	pub capacity: Resource,
	#[serde(default)]
	pub provider: Option<Contact>,
	#[serde(default)]
	pub provider_weights: Option<TrustWeights>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MatchRequest {
	pub need: Resource,
	#[serde(default)]
	pub seeker: Option<Contact>,
	#[serde(default)]
	pub seeker_weights: Option<TrustWeights>,
	#[serde(default)]
	pub previous_commitment: Option<Commitment>,
	#[serde(default, with = "hexfit_domain::time_serde::option")]
	pub reference_time: Option<OffsetDateTime>,
	/// Overrides `matching.include_breakdown` when set.
	#[serde(default)]
	pub include_breakdown: Option<bool>,
	#[serde(default)]
	pub candidates: Vec<Candidate>,
}
impl MatchRequest {
	/// Rejects requests whose ids are blank or whose windows are malformed.
	pub fn validate(&self) -> Result<()> {
		let resources = std::iter::once(&self.need)
			.chain(self.candidates.iter().map(|candidate| &candidate.capacity));

		for resource in resources {
			if resource.id.trim().is_empty() {
				return Err(Error::InvalidRequest {
					message: "Resource id must not be empty.".to_string(),
				});
			}
			if let Some(window) = &resource.availability_window
				&& let Err(err) = window.validate()
			{
				return Err(Error::InvalidRequest {
					message: format!("Availability window of {:?} is invalid: {err}", resource.id),
				});
			}
		}

		Ok(())
	}
}

#[derive(Clone, Debug, Serialize)]
pub struct MatchOutcome {
	pub capacity_id: String,
	#[serde(flatten)]
	pub status: FeasibilityStatus,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub record: Option<MatchRecord>,
}

/// Matching pipeline bound to one configuration.
pub struct Matcher {
	cfg: Config,
	grid: HexGrid,
	evaluator: Evaluator,
}
impl Matcher {
	pub fn new(cfg: &Config) -> Result<Self> {
		let grid = HexGrid::new(cfg.index.clone())?;
		let evaluator = Evaluator::new(cfg.scoring.clone());

		Ok(Self { cfg: cfg.clone(), grid, evaluator })
	}

	pub fn grid(&self) -> &HexGrid {
		&self.grid
	}

	pub fn evaluator(&self) -> &Evaluator {
		&self.evaluator
	}

	/// Builds a fresh index over `capacities`. Callers swap it in to replace an older one.
	pub fn build_index<'a, I>(&self, capacities: I) -> HexIndex
	where
		I: IntoIterator<Item = &'a Resource>,
	{
		let mut builder = HexIndexBuilder::new(self.grid.clone());

		builder.extend(capacities);

		builder.build()
	}

	/// Candidates near the need, scored and ranked.
	///
	/// Possible verdicts come first by descending confidence, then impossible ones; ties are
	/// broken by capacity id. Candidates the index does not return are not scored. When
	/// `matching.max_candidates` applies, the candidates nearest the need are kept.
	pub fn find(&self, index: &HexIndex, request: &MatchRequest) -> Vec<MatchOutcome> {
		let radius_km = request.need.radius_or(self.cfg.scoring.default_search_radius_km);
		let mut by_id: AHashMap<&str, &Candidate> = AHashMap::new();

		for candidate in &request.candidates {
			by_id.entry(candidate.capacity.id.as_str()).or_insert(candidate);
		}

		let mut ids = index.query_radius(&request.need, radius_km);

		ids.sort_unstable();
		ids.dedup();

		let mut candidates: Vec<&Candidate> =
			ids.into_iter().filter_map(|id| by_id.get(id).copied()).collect();

		by_proximity(&request.need, &mut candidates);

		let limit = self.cfg.matching.max_candidates as usize;

		if limit > 0 && candidates.len() > limit {
			tracing::debug!(
				need_id = %request.need.id,
				found = candidates.len(),
				limit,
				"Truncating candidate set."
			);

			candidates.truncate(limit);
		}

		let mut outcomes = self.evaluate_candidates(request, &candidates);

		outcomes.sort_by(rank);

		tracing::debug!(
			need_id = %request.need.id,
			radius_km,
			evaluated = outcomes.len(),
			possible = outcomes.iter().filter(|outcome| outcome.status.is_possible()).count(),
			"Matching finished."
		);

		outcomes
	}

	/// Scores every candidate against the request's need, in parallel and without ranking.
	pub fn evaluate_candidates(
		&self,
		request: &MatchRequest,
		candidates: &[&Candidate],
	) -> Vec<MatchOutcome> {
		let include_breakdown =
			request.include_breakdown.unwrap_or(self.cfg.matching.include_breakdown);

		candidates
			.par_iter()
			.map(|candidate| {
				let context = MatchContext {
					provider: candidate.provider.as_ref(),
					seeker: request.seeker.as_ref(),
					provider_weights: candidate.provider_weights.as_ref(),
					seeker_weights: request.seeker_weights.as_ref(),
					previous_commitment: request.previous_commitment.as_ref(),
					include_breakdown,
					reference_time: request.reference_time,
				};

				self.outcome(&request.need, &candidate.capacity, &context)
			})
			.collect()
	}

	fn outcome(
		&self,
		need: &Resource,
		capacity: &Resource,
		context: &MatchContext<'_>,
	) -> MatchOutcome {
		let breakdown = self.evaluator.breakdown(need, capacity, context);
		let status = feasibility::classify(&breakdown, context.include_breakdown);
		let record = status.is_possible().then(|| {
			record::build_match_record(
				MatchIds { need_id: &need.id, capacity_id: &capacity.id },
				breakdown,
				RecordExtras::default(),
			)
		});

		MatchOutcome { capacity_id: capacity.id.clone(), status, record }
	}
}

/// Orders candidates by great-circle distance from the need, ties by capacity id.
///
/// Remote capacities sort first since distance does not constrain them. Capacities without
/// a position sort last. A need without a position keeps the id order.
fn by_proximity(need: &Resource, candidates: &mut [&Candidate]) {
	let origin = if need.is_remote() { None } else { need.position() };
	let Some(origin) = origin else {
		return;
	};
	let distance = |capacity: &Resource| {
		if capacity.is_remote() {
			return 0.0;
		}

		capacity.position().map_or(f64::INFINITY, |point| origin.distance_km(point))
	};

	candidates.sort_by(|a, b| {
		distance(&a.capacity)
			.total_cmp(&distance(&b.capacity))
			.then_with(|| a.capacity.id.cmp(&b.capacity.id))
	});
}

fn rank(a: &MatchOutcome, b: &MatchOutcome) -> Ordering {
	b.status
		.is_possible()
		.cmp(&a.status.is_possible())
		.then_with(|| b.status.confidence().total_cmp(&a.status.confidence()))
		.then_with(|| a.capacity_id.cmp(&b.capacity_id))
}
