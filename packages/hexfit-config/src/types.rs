use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	pub service: Service,
	pub index: Index,
	pub scoring: Scoring,
	pub matching: Matching,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Service {
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { log_level: default_log_level() }
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Index {
	/// H3 resolution used to bucket items, 0 (coarsest) through 15.
	pub default_resolution: u8,
	/// Coarser resolution whose cells act as roll-up parents for indexed cells.
	pub rollup_resolution: u8,
	/// Upper bound on the k-ring size a radius query may expand to.
	pub max_ring_count: u32,
}
impl Default for Index {
	fn default() -> Self {
		Self { default_resolution: 7, rollup_resolution: 5, max_ring_count: 512 }
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Scoring {
	pub default_search_radius_km: f64,
	pub travel: Travel,
	pub continuity: Continuity,
}
impl Default for Scoring {
	fn default() -> Self {
		Self {
			default_search_radius_km: 25.0,
			travel: Travel::default(),
			continuity: Continuity::default(),
		}
	}
}

/// Travel chaining policy. The defaults assume mixed urban road travel.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Travel {
	/// Multiplier from great-circle distance to road distance.
	pub tortuosity: f64,
	pub comfortable_speed_kmh: f64,
	pub max_speed_kmh: f64,
	/// Score reached at exactly `max_speed_kmh`.
	pub min_score: f64,
}
impl Default for Travel {
	fn default() -> Self {
		Self { tortuosity: 1.5, comfortable_speed_kmh: 30.0, max_speed_kmh: 80.0, min_score: 0.1 }
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Continuity {
	/// Block length a need is measured against when it has no `min_atomic_size`.
	pub default_target_minutes: u32,
}
impl Default for Continuity {
	fn default() -> Self {
		Self { default_target_minutes: 60 }
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Matching {
	/// Candidates scored per request; 0 disables the bound.
	pub max_candidates: u32,
	pub include_breakdown: bool,
}
impl Default for Matching {
	fn default() -> Self {
		Self { max_candidates: 500, include_breakdown: false }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}
