use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::score::Breakdown;

/// One evaluated pairing. Records are never edited; a correction is a new record.
#[derive(Clone, Debug, Serialize)]
pub struct MatchRecord {
	pub id: Uuid,
	pub need_id: String,
	pub capacity_id: String,
	pub breakdown: Breakdown,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub semantic: Option<Value>,
	#[serde(with = "hexfit_domain::time_serde")]
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Copy, Debug)]
pub struct MatchIds<'a> {
	pub need_id: &'a str,
	pub capacity_id: &'a str,
}

/// Optional record fields. Unset `id` and `created_at` get a fresh v4 id and the current time.
#[derive(Clone, Debug, Default)]
pub struct RecordExtras {
	pub id: Option<Uuid>,
	pub semantic: Option<Value>,
	pub created_at: Option<OffsetDateTime>,
}

pub fn build_match_record(
	ids: MatchIds<'_>,
	breakdown: Breakdown,
	extras: RecordExtras,
) -> MatchRecord {
	MatchRecord {
		id: extras.id.unwrap_or_else(Uuid::new_v4),
		need_id: ids.need_id.to_string(),
		capacity_id: ids.capacity_id.to_string(),
		breakdown,
		semantic: extras.semantic,
		created_at: extras.created_at.unwrap_or_else(OffsetDateTime::now_utc),
	}
}
