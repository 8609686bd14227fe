use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::schedule::AvailabilityWindow;
use hexfit_index::{Indexable, Locatable};

/// A need or a capacity. Both roles share this shape.
///
/// A resource is either located (coordinates or `h3_index`) or remote (`location_type`
/// mentioning remote/online, or a non-empty `online_link`). Remote resources match any
/// geography.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
	pub id: String,
	#[serde(default)]
	pub quantity: f64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub unit: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub availability_window: Option<AvailabilityWindow>,
	/// Smallest usable contiguous block, in minutes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min_atomic_size: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub latitude: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub longitude: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub h3_index: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub h3_resolution: Option<u8>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub location_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub online_link: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub search_radius_km: Option<f64>,
	#[serde(default)]
	pub required_skills: Vec<SkillRequirement>,
	/// Owning agent, used for trust lookups.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub offerer: Option<String>,
	/// Start of a concrete scheduled slot.
	#[serde(
		default,
		with = "crate::time_serde::option",
		skip_serializing_if = "Option::is_none"
	)]
	pub starts_at: Option<OffsetDateTime>,
}
impl Resource {
	/// The configured search radius when it is usable, otherwise `default_km`.
	pub fn radius_or(&self, default_km: f64) -> f64 {
		self.search_radius_km
			.filter(|radius| radius.is_finite() && *radius > 0.0)
			.unwrap_or(default_km)
	}
}
impl Locatable for Resource {
	fn latitude(&self) -> Option<f64> {
		self.latitude
	}

	fn longitude(&self) -> Option<f64> {
		self.longitude
	}

	fn location_type(&self) -> Option<&str> {
		self.location_type.as_deref()
	}

	fn online_link(&self) -> Option<&str> {
		self.online_link.as_deref()
	}

	fn h3_index(&self) -> Option<&str> {
		self.h3_index.as_deref()
	}

	fn h3_resolution(&self) -> Option<u8> {
		self.h3_resolution
	}
}
impl Indexable for Resource {
	fn item_id(&self) -> &str {
		&self.id
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
	pub skill_id: String,
	#[serde(default)]
	pub min_level: u32,
}

/// Where and when the seeker's previous engagement ends.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub latitude: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub longitude: Option<f64>,
	#[serde(
		default,
		with = "crate::time_serde::option",
		skip_serializing_if = "Option::is_none"
	)]
	pub end_time: Option<OffsetDateTime>,
}
