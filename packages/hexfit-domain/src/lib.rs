//! Resources, contacts and availability windows shared by the index and the scorers.

pub mod contact;
pub mod resource;
pub mod rollup;
pub mod schedule;
pub mod time_serde;

mod error;

pub use contact::{Contact, Skill};
pub use error::{Error, Result};
pub use resource::{Commitment, Resource, SkillRequirement};
pub use schedule::{
	AvailabilityWindow, Block, DaySchedule, TimeOfDay, TimeRange, Weekday, WeeklyIntervals,
};
