use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
	pub id: String,
	pub level: u32,
}

/// A person or agent whose held skills are checked against requirements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
	pub id: String,
	#[serde(default)]
	pub skills: Vec<Skill>,
}
impl Contact {
	/// Highest level held for `skill_id`; duplicate entries do not lower it.
	pub fn level_of(&self, skill_id: &str) -> Option<u32> {
		self.skills.iter().filter(|skill| skill.id == skill_id).map(|skill| skill.level).max()
	}
}

#[cfg(test)]
mod tests {
	use crate::contact::{Contact, Skill};

	#[test]
	fn level_of_takes_highest_duplicate() {
		let contact = Contact {
			id: "c".to_string(),
			skills: vec![
				Skill { id: "rust".to_string(), level: 2 },
				Skill { id: "rust".to_string(), level: 4 },
			],
		};

		assert_eq!(contact.level_of("rust"), Some(4));
		assert_eq!(contact.level_of("go"), None);
	}
}
