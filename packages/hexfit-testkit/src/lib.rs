//! Fixture builders shared by the workspace tests.

mod error;

pub use error::{Error, Result};

use std::collections::BTreeMap;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use hexfit_domain::{
	AvailabilityWindow, Commitment, Contact, DaySchedule, Resource, Skill, SkillRequirement,
	TimeRange, Weekday,
};

/// Berlin Mitte, used as the default need location.
pub const BERLIN: (f64, f64) = (52.52, 13.40);

/// Builder over [`Resource`] with chainable setters.
#[derive(Clone, Debug, Default)]
pub struct ResourceBuilder {
	resource: Resource,
}
impl ResourceBuilder {
	pub fn new(id: &str) -> Self {
		Self { resource: Resource { id: id.to_string(), ..Default::default() } }
	}

	pub fn quantity(mut self, quantity: f64) -> Self {
		self.resource.quantity = quantity;

		self
	}

	pub fn unit(mut self, unit: &str) -> Self {
		self.resource.unit = Some(unit.to_string());

		self
	}

	pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
		self.resource.latitude = Some(latitude);
		self.resource.longitude = Some(longitude);

		self
	}

	pub fn h3_index(mut self, cell: &str) -> Self {
		self.resource.h3_index = Some(cell.to_string());

		self
	}

	pub fn remote(mut self) -> Self {
		self.resource.location_type = Some("remote".to_string());

		self
	}

	pub fn online_link(mut self, link: &str) -> Self {
		self.resource.online_link = Some(link.to_string());

		self
	}

	pub fn radius_km(mut self, radius_km: f64) -> Self {
		self.resource.search_radius_km = Some(radius_km);

		self
	}

	pub fn window(mut self, window: AvailabilityWindow) -> Self {
		self.resource.availability_window = Some(window);

		self
	}

	pub fn min_atomic_size(mut self, minutes: u32) -> Self {
		self.resource.min_atomic_size = Some(minutes);

		self
	}

	pub fn requires(mut self, skill_id: &str, min_level: u32) -> Self {
		self.resource
			.required_skills
			.push(SkillRequirement { skill_id: skill_id.to_string(), min_level });

		self
	}

	pub fn offerer(mut self, agent: &str) -> Self {
		self.resource.offerer = Some(agent.to_string());

		self
	}

	pub fn starts_at(mut self, at: OffsetDateTime) -> Self {
		self.resource.starts_at = Some(at);

		self
	}

	pub fn build(self) -> Resource {
		self.resource
	}
}

pub fn resource(id: &str) -> ResourceBuilder {
	ResourceBuilder::new(id)
}

/// Window with the same `HH:MM` ranges on each of `days`.
pub fn weekly(
	time_zone: &str,
	days: &[Weekday],
	ranges: &[(&str, &str)],
) -> Result<AvailabilityWindow> {
	let ranges = ranges
		.iter()
		.map(|(start, end)| Ok(TimeRange::new(start.parse()?, end.parse()?)?))
		.collect::<Result<Vec<_>>>()?;
	let window =
		AvailabilityWindow::new(time_zone, vec![DaySchedule { days: days.to_vec(), ranges }]);

	window.validate()?;

	Ok(window)
}

pub fn contact(id: &str, skills: &[(&str, u32)]) -> Contact {
	let skills =
		skills.iter().map(|(skill_id, level)| Skill { id: skill_id.to_string(), level: *level });

	Contact { id: id.to_string(), skills: skills.collect() }
}

pub fn weights(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
	entries.iter().map(|(agent, weight)| (agent.to_string(), *weight)).collect()
}

pub fn commitment(latitude: f64, longitude: f64, end_time: OffsetDateTime) -> Commitment {
	Commitment { latitude: Some(latitude), longitude: Some(longitude), end_time: Some(end_time) }
}

pub fn instant(raw: &str) -> Result<OffsetDateTime> {
	OffsetDateTime::parse(raw, &Rfc3339)
		.map_err(|err| Error::Message(format!("Failed to parse instant {raw:?}: {err}.")))
}

/// Need from the Berlin scenario: 10 hr on Monday 09:00-12:00, blocks of at least 60 min,
/// within 50 km.
pub fn berlin_need() -> Result<Resource> {
	Ok(resource("need-berlin")
		.quantity(10.0)
		.unit("hr")
		.window(weekly("Europe/Berlin", &[Weekday::Monday], &[("09:00", "12:00")])?)
		.min_atomic_size(60)
		.at(BERLIN.0, BERLIN.1)
		.radius_km(50.0)
		.build())
}

/// Capacity matching [`berlin_need`] on Monday 10:00-11:00 at `latitude`/`longitude`.
pub fn berlin_capacity(id: &str, latitude: f64, longitude: f64) -> Result<Resource> {
	Ok(resource(id)
		.quantity(10.0)
		.window(weekly("Europe/Berlin", &[Weekday::Monday], &[("10:00", "11:00")])?)
		.at(latitude, longitude)
		.build())
}
