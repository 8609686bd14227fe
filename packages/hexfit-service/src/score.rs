use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
	Time,
	Space,
	Skills,
	Travel,
	Quantity,
	Affinity,
	Continuity,
}
impl Dimension {
	/// Evaluation order. Breakdowns and score maps follow it.
	pub const ALL: [Self; 7] = [
		Self::Time,
		Self::Space,
		Self::Skills,
		Self::Travel,
		Self::Quantity,
		Self::Affinity,
		Self::Continuity,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Time => "time",
			Self::Space => "space",
			Self::Skills => "skills",
			Self::Travel => "travel",
			Self::Quantity => "quantity",
			Self::Affinity => "affinity",
			Self::Continuity => "continuity",
		}
	}
}
impl fmt::Display for Dimension {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillSide {
	/// Need requirement checked against the provider contact.
	Provider,
	/// Capacity requirement checked against the seeker contact.
	Seeker,
}
impl fmt::Display for SkillSide {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Provider => f.write_str("provider"),
			Self::Seeker => f.write_str("seeker"),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkillCheck {
	pub skill_id: String,
	pub required: u32,
	pub held: Option<u32>,
	pub side: SkillSide,
	pub met: bool,
}

/// Per-dimension diagnostics attached to a [`Score`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreDetail {
	/// An input the dimension depends on was absent.
	Unconstrained,
	Time {
		overlaps: bool,
		block_count: usize,
		total_minutes: u32,
		largest_block_minutes: u32,
		#[serde(skip_serializing_if = "Option::is_none")]
		min_atomic_size: Option<u32>,
	},
	Continuity {
		block_count: usize,
		average_block_minutes: f64,
		target_minutes: u32,
	},
	Space {
		remote: bool,
		#[serde(skip_serializing_if = "Option::is_none")]
		distance_km: Option<f64>,
		radius_km: f64,
	},
	Skills {
		checks: Vec<SkillCheck>,
		/// Requirements that could not be checked because the contact was absent.
		unverified: usize,
	},
	Travel {
		distance_km: f64,
		gap_minutes: f64,
		#[serde(skip_serializing_if = "Option::is_none")]
		speed_kmh: Option<f64>,
	},
	Quantity {
		needed: f64,
		offered: f64,
	},
	Affinity {
		seeker_to_provider: f64,
		provider_to_seeker: f64,
	},
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Score {
	pub dimension: Dimension,
	pub value: f64,
	pub reason: String,
	pub detail: ScoreDetail,
}
impl Score {
	/// Clamps `value` into `[0, 1]`; NaN becomes zero.
	pub fn new(
		dimension: Dimension,
		value: f64,
		reason: impl Into<String>,
		detail: ScoreDetail,
	) -> Self {
		let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };

		Self { dimension, value, reason: reason.into(), detail }
	}

	pub fn unconstrained(dimension: Dimension, reason: impl Into<String>) -> Self {
		Self::new(dimension, 1.0, reason, ScoreDetail::Unconstrained)
	}

	pub fn is_blocking(&self) -> bool {
		self.value == 0.0
	}

	pub fn is_risk(&self) -> bool {
		self.value > 0.0 && self.value < 1.0
	}
}

/// The seven scores of one need/capacity pair, in [`Dimension::ALL`] order.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakdown {
	scores: [Score; 7],
}
impl Breakdown {
	/// Returns `None` unless `scores` follows [`Dimension::ALL`].
	pub fn new(scores: [Score; 7]) -> Option<Self> {
		scores
			.iter()
			.zip(Dimension::ALL)
			.all(|(score, dimension)| score.dimension == dimension)
			.then_some(Self { scores })
	}

	pub(crate) fn from_ordered(scores: [Score; 7]) -> Self {
		Self { scores }
	}

	pub fn get(&self, dimension: Dimension) -> &Score {
		&self.scores[dimension as usize]
	}

	pub fn iter(&self) -> impl Iterator<Item = &Score> {
		self.scores.iter()
	}

	/// Product of all values.
	pub fn confidence(&self) -> f64 {
		self.scores.iter().map(|score| score.value).product()
	}

	pub fn values(&self) -> Vec<(Dimension, f64)> {
		self.scores.iter().map(|score| (score.dimension, score.value)).collect()
	}
}
impl Serialize for Breakdown {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut map = serializer.serialize_map(Some(self.scores.len()))?;

		for score in &self.scores {
			map.serialize_entry(score.dimension.as_str(), score)?;
		}

		map.end()
	}
}
