pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid time of day {value:?}; expected HH:MM between 00:00 and 24:00.")]
	InvalidTimeOfDay { value: String },
	#[error("Time range {start}-{end} must start before it ends.")]
	InvalidRange { start: String, end: String },
	#[error("Time ranges {first} and {second} overlap.")]
	OverlappingRanges { first: String, second: String },
	#[error("Unknown weekday {value:?}.")]
	UnknownWeekday { value: String },
}
