//! Weekly availability windows and their timezone-aware intersection.
//!
//! Windows are compared as minute-of-week intervals in one reference zone. Zone offsets are
//! taken at a reference instant, so a window crossing a DST change is compared with the
//! offsets in force at that instant.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::OffsetDateTime;

use crate::{Error, Result};

pub const MINUTES_PER_DAY: u32 = 1_440;
pub const MINUTES_PER_WEEK: u32 = 7 * MINUTES_PER_DAY;
pub const DEFAULT_TIME_ZONE: &str = "UTC";

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Weekday {
	Monday,
	Tuesday,
	Wednesday,
	Thursday,
	Friday,
	Saturday,
	Sunday,
}
impl Weekday {
	pub const ALL: [Self; 7] = [
		Self::Monday,
		Self::Tuesday,
		Self::Wednesday,
		Self::Thursday,
		Self::Friday,
		Self::Saturday,
		Self::Sunday,
	];

	/// Days since Monday.
	pub fn index(self) -> u32 {
		self as u32
	}

	pub fn from_index(index: u32) -> Self {
		Self::ALL[(index % 7) as usize]
	}

	pub fn name(self) -> &'static str {
		match self {
			Self::Monday => "monday",
			Self::Tuesday => "tuesday",
			Self::Wednesday => "wednesday",
			Self::Thursday => "thursday",
			Self::Friday => "friday",
			Self::Saturday => "saturday",
			Self::Sunday => "sunday",
		}
	}
}
impl fmt::Display for Weekday {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
impl FromStr for Weekday {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self> {
		let day = match raw.trim().to_ascii_lowercase().as_str() {
			"monday" | "mon" => Self::Monday,
			"tuesday" | "tue" => Self::Tuesday,
			"wednesday" | "wed" => Self::Wednesday,
			"thursday" | "thu" => Self::Thursday,
			"friday" | "fri" => Self::Friday,
			"saturday" | "sat" => Self::Saturday,
			"sunday" | "sun" => Self::Sunday,
			_ => return Err(Error::UnknownWeekday { value: raw.to_string() }),
		};

		Ok(day)
	}
}
impl Serialize for Weekday {
	fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.name())
	}
}
impl<'de> Deserialize<'de> for Weekday {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		String::deserialize(deserializer)?.parse().map_err(serde::de::Error::custom)
	}
}

/// Minutes since midnight. `24:00` is representable so a range can end at midnight.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay(u16);
impl TimeOfDay {
	pub const MIDNIGHT: Self = Self(0);
	pub const END_OF_DAY: Self = Self(MINUTES_PER_DAY as u16);

	pub fn from_minutes(minutes: u32) -> Option<Self> {
		if minutes > MINUTES_PER_DAY {
			return None;
		}

		u16::try_from(minutes).ok().map(Self)
	}

	pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
		if minute >= 60 {
			return None;
		}

		Self::from_minutes(hour.checked_mul(60)?.checked_add(minute)?)
	}

	pub fn minutes(self) -> u32 {
		u32::from(self.0)
	}
}
impl fmt::Display for TimeOfDay {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
	}
}
impl FromStr for TimeOfDay {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self> {
		let invalid = || Error::InvalidTimeOfDay { value: raw.to_string() };
		let (hour, minute) = raw.trim().split_once(':').ok_or_else(invalid)?;

		if !(1..=2).contains(&hour.len()) || minute.len() != 2 {
			return Err(invalid());
		}
		if !hour.bytes().chain(minute.bytes()).all(|byte| byte.is_ascii_digit()) {
			return Err(invalid());
		}

		let hour = hour.parse().map_err(|_| invalid())?;
		let minute = minute.parse().map_err(|_| invalid())?;

		Self::from_hm(hour, minute).ok_or_else(invalid)
	}
}
impl Serialize for TimeOfDay {
	fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}
impl<'de> Deserialize<'de> for TimeOfDay {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		String::deserialize(deserializer)?.parse().map_err(serde::de::Error::custom)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
	pub start_time: TimeOfDay,
	pub end_time: TimeOfDay,
}
impl TimeRange {
	pub fn new(start_time: TimeOfDay, end_time: TimeOfDay) -> Result<Self> {
		let range = Self { start_time, end_time };

		range.validate()?;

		Ok(range)
	}

	pub fn minutes(&self) -> u32 {
		self.end_time.minutes().saturating_sub(self.start_time.minutes())
	}

	pub fn validate(&self) -> Result<()> {
		if self.start_time >= self.end_time {
			return Err(Error::InvalidRange {
				start: self.start_time.to_string(),
				end: self.end_time.to_string(),
			});
		}

		Ok(())
	}
}
impl fmt::Display for TimeRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.start_time, self.end_time)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
	pub days: Vec<Weekday>,
	pub ranges: Vec<TimeRange>,
}
impl DaySchedule {
	/// Every range must be well formed and no two ranges may overlap. Touching ranges are
	/// allowed.
	pub fn validate(&self) -> Result<()> {
		for range in &self.ranges {
			range.validate()?;
		}

		let mut sorted = self.ranges.clone();

		sorted.sort_by_key(|range| range.start_time);

		for pair in sorted.windows(2) {
			if pair[0].end_time > pair[1].start_time {
				return Err(Error::OverlappingRanges {
					first: pair[0].to_string(),
					second: pair[1].to_string(),
				});
			}
		}

		Ok(())
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
	#[serde(default)]
	pub schedules: Vec<DaySchedule>,
	/// IANA zone name; unknown names are treated as UTC.
	#[serde(default = "default_time_zone")]
	pub time_zone: String,
}
impl AvailabilityWindow {
	pub fn new(time_zone: impl Into<String>, schedules: Vec<DaySchedule>) -> Self {
		Self { schedules, time_zone: time_zone.into() }
	}

	pub fn validate(&self) -> Result<()> {
		self.schedules.iter().try_for_each(DaySchedule::validate)
	}

	/// This window expressed in `time_zone`, using both zones' offsets at `reference`.
	pub fn intervals_in(&self, time_zone: &str, reference: OffsetDateTime) -> WeeklyIntervals {
		let at = to_timestamp(reference);
		let shift = utc_offset_minutes(time_zone, at) - utc_offset_minutes(&self.time_zone, at);

		WeeklyIntervals::from_window(self, shift)
	}
}
impl Default for AvailabilityWindow {
	fn default() -> Self {
		Self { schedules: Vec::new(), time_zone: default_time_zone() }
	}
}

/// A maximal contiguous stretch of availability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Block {
	/// Minute of week (Monday 00:00 is zero) where the block starts.
	pub start: u32,
	pub minutes: u32,
}
impl Block {
	pub fn weekday(&self) -> Weekday {
		Weekday::from_index(self.start / MINUTES_PER_DAY)
	}
}

/// Sorted, merged, half-open minute-of-week spans within `[0, MINUTES_PER_WEEK)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeeklyIntervals {
	spans: Vec<(u32, u32)>,
}
impl WeeklyIntervals {
	/// Spans of `window` shifted by `shift_minutes`, wrapping around the week.
	pub fn from_window(window: &AvailabilityWindow, shift_minutes: i32) -> Self {
		let mut spans = Vec::new();

		for schedule in &window.schedules {
			for range in &schedule.ranges {
				if let Err(err) = range.validate() {
					tracing::warn!(error = %err, "Skipping malformed availability range.");

					continue;
				}

				for day in &schedule.days {
					let start = i64::from(day.index() * MINUTES_PER_DAY)
						+ i64::from(range.start_time.minutes())
						+ i64::from(shift_minutes);
					let start = start.rem_euclid(i64::from(MINUTES_PER_WEEK)) as u32;
					let end = start + range.minutes();

					if end <= MINUTES_PER_WEEK {
						spans.push((start, end));
					} else {
						spans.push((start, MINUTES_PER_WEEK));
						spans.push((0, end - MINUTES_PER_WEEK));
					}
				}
			}
		}

		Self::from_spans(spans)
	}

	fn from_spans(mut spans: Vec<(u32, u32)>) -> Self {
		spans.retain(|(start, end)| start < end);
		spans.sort_unstable();

		let mut merged: Vec<(u32, u32)> = Vec::with_capacity(spans.len());

		for (start, end) in spans {
			match merged.last_mut() {
				Some(last) if start <= last.1 => last.1 = last.1.max(end),
				_ => merged.push((start, end)),
			}
		}

		Self { spans: merged }
	}

	pub fn is_empty(&self) -> bool {
		self.spans.is_empty()
	}

	pub fn total_minutes(&self) -> u32 {
		self.spans.iter().map(|(start, end)| end - start).sum()
	}

	pub fn intersect(&self, other: &Self) -> Self {
		let (mut left, mut right) = (0, 0);
		let mut spans = Vec::new();

		while left < self.spans.len() && right < other.spans.len() {
			let (a_start, a_end) = self.spans[left];
			let (b_start, b_end) = other.spans[right];
			let start = a_start.max(b_start);
			let end = a_end.min(b_end);

			if start < end {
				spans.push((start, end));
			}
			if a_end <= b_end {
				left += 1;
			} else {
				right += 1;
			}
		}

		Self::from_spans(spans)
	}

	/// Contiguous blocks. Spans touching at midnight are already merged; a span ending at
	/// Sunday 24:00 is joined with one starting Monday 00:00.
	pub fn blocks(&self) -> Vec<Block> {
		let mut spans = self.spans.as_slice();
		let mut wrapped = None;

		if let (Some(first), Some(last)) = (spans.first(), spans.last())
			&& spans.len() > 1
			&& first.0 == 0
			&& last.1 == MINUTES_PER_WEEK
		{
			wrapped = Some(Block { start: last.0, minutes: (last.1 - last.0) + first.1 });
			spans = &spans[1..spans.len() - 1];
		}

		spans
			.iter()
			.map(|(start, end)| Block { start: *start, minutes: end - start })
			.chain(wrapped)
			.collect()
	}

	/// The spans as a window in `time_zone`, one schedule per weekday. Ranges crossing
	/// midnight are split at `24:00`.
	pub fn to_window(&self, time_zone: &str) -> AvailabilityWindow {
		let mut days: BTreeMap<u32, Vec<TimeRange>> = BTreeMap::new();

		for (start, end) in &self.spans {
			let mut cursor = *start;

			while cursor < *end {
				let day = cursor / MINUTES_PER_DAY;
				let day_start = day * MINUTES_PER_DAY;
				let segment_end = (*end).min(day_start + MINUTES_PER_DAY);
				let range = TimeOfDay::from_minutes(cursor - day_start)
					.zip(TimeOfDay::from_minutes(segment_end - day_start))
					.map(|(start_time, end_time)| TimeRange { start_time, end_time });

				if let Some(range) = range {
					days.entry(day).or_default().push(range);
				}

				cursor = segment_end;
			}
		}

		let schedules = days
			.into_iter()
			.map(|(day, ranges)| DaySchedule { days: vec![Weekday::from_index(day)], ranges })
			.collect();

		AvailabilityWindow::new(time_zone, schedules)
	}
}

/// Common availability of two windows, expressed in the first window's zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlap {
	pub time_zone: String,
	pub intervals: WeeklyIntervals,
}
impl Overlap {
	pub fn to_window(&self) -> AvailabilityWindow {
		self.intervals.to_window(&self.time_zone)
	}
}

/// Overlap of two windows, or `None` when either side is unconstrained.
pub fn overlap(
	a: Option<&AvailabilityWindow>,
	b: Option<&AvailabilityWindow>,
	reference: OffsetDateTime,
) -> Option<Overlap> {
	let (a, b) = (a?, b?);
	let time_zone = a.time_zone.clone();
	let intervals =
		a.intervals_in(&time_zone, reference).intersect(&b.intervals_in(&time_zone, reference));

	Some(Overlap { time_zone, intervals })
}

/// Whether two windows share any time. An absent window matches everything.
pub fn overlaps(
	a: Option<&AvailabilityWindow>,
	b: Option<&AvailabilityWindow>,
	reference: OffsetDateTime,
) -> bool {
	overlap(a, b, reference).is_none_or(|overlap| !overlap.intervals.is_empty())
}

/// Intersection of two windows. An absent window is unconstrained, so intersecting with it
/// returns the other side; two absent windows stay unconstrained.
pub fn intersect(
	a: Option<&AvailabilityWindow>,
	b: Option<&AvailabilityWindow>,
	reference: OffsetDateTime,
) -> Option<AvailabilityWindow> {
	match (a, b) {
		(Some(_), Some(_)) => overlap(a, b, reference).map(|overlap| overlap.to_window()),
		(Some(window), None) | (None, Some(window)) => Some(window.clone()),
		(None, None) => None,
	}
}

fn default_time_zone() -> String {
	DEFAULT_TIME_ZONE.to_string()
}

fn to_timestamp(at: OffsetDateTime) -> jiff::Timestamp {
	jiff::Timestamp::from_second(at.unix_timestamp()).unwrap_or(jiff::Timestamp::UNIX_EPOCH)
}

fn utc_offset_minutes(time_zone: &str, at: jiff::Timestamp) -> i32 {
	let time_zone = time_zone.trim();

	if time_zone.is_empty() {
		return 0;
	}

	match jiff::tz::TimeZone::get(time_zone) {
		Ok(zone) => zone.to_offset(at).seconds() / 60,
		Err(err) => {
			tracing::warn!(time_zone, error = %err, "Unknown time zone; treating it as UTC.");

			0
		},
	}
}
