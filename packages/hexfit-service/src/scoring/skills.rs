use hexfit_config::Scoring;
use hexfit_domain::{Contact, Resource, SkillRequirement};

use crate::{
	context::MatchContext,
	score::{Dimension, Score, ScoreDetail, SkillCheck, SkillSide},
};

/// Checks the need's requirements against the provider and the capacity's requirements
/// against the seeker. Any unmet requirement scores zero. Requirements whose contact is
/// absent are counted as unverified and do not block.
pub fn score(
	need: &Resource,
	capacity: &Resource,
	context: &MatchContext<'_>,
	_policy: &Scoring,
) -> Score {
	if need.required_skills.is_empty() && capacity.required_skills.is_empty() {
		return Score::unconstrained(Dimension::Skills, "No skill requirements.");
	}

	let mut checks = Vec::new();
	let mut unverified = 0;

	for (requirements, contact, side) in [
		(&need.required_skills, context.provider, SkillSide::Provider),
		(&capacity.required_skills, context.seeker, SkillSide::Seeker),
	] {
		match contact {
			Some(contact) => checks.extend(check(requirements, contact, side)),
			None => unverified += requirements.len(),
		}
	}

	let unmet: Vec<String> = checks
		.iter()
		.filter(|check| !check.met)
		.map(|check| match check.held {
			Some(held) => format!(
				"{} holds {} at level {held}, needs {}",
				check.side, check.skill_id, check.required
			),
			None => {
				format!("{} lacks {} (needs level {})", check.side, check.skill_id, check.required)
			},
		})
		.collect();
	let checked = checks.len();
	let detail = ScoreDetail::Skills { checks, unverified };

	if !unmet.is_empty() {
		return Score::new(
			Dimension::Skills,
			0.0,
			format!("Unmet skill requirements: {}.", unmet.join("; ")),
			detail,
		);
	}

	let reason = if unverified == 0 {
		format!("All {checked} skill requirement(s) met.")
	} else {
		format!(
			"{checked} skill requirement(s) met; {unverified} unverified because a contact is unknown."
		)
	};

	Score::new(Dimension::Skills, 1.0, reason, detail)
}

fn check<'a>(
	requirements: &'a [SkillRequirement],
	contact: &'a Contact,
	side: SkillSide,
) -> impl Iterator<Item = SkillCheck> + 'a {
	requirements.iter().map(move |requirement| {
		let held = contact.level_of(&requirement.skill_id);

		SkillCheck {
			skill_id: requirement.skill_id.clone(),
			required: requirement.min_level,
			held,
			side,
			met: held.is_some_and(|level| level >= requirement.min_level),
		}
	})
}
