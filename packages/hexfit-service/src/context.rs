use std::collections::BTreeMap;

use time::OffsetDateTime;

use hexfit_domain::{Commitment, Contact};

/// Agent id to trust weight in `[0, 1]`. Read-only snapshot supplied by the caller.
pub type TrustWeights = BTreeMap<String, f64>;

/// Per-evaluation inputs beyond the need and the capacity. Every field is optional; an
/// absent input leaves its dimension unconstrained.
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchContext<'a> {
	pub provider: Option<&'a Contact>,
	pub seeker: Option<&'a Contact>,
	pub provider_weights: Option<&'a TrustWeights>,
	pub seeker_weights: Option<&'a TrustWeights>,
	pub previous_commitment: Option<&'a Commitment>,
	pub include_breakdown: bool,
	/// Instant whose UTC offsets are used to compare windows in different zones.
	///
	/// Defaults to the Unix epoch, which pins every zone to its January 1970 (standard time)
	/// offset. Set it to the period being matched when both windows observe daylight saving
	/// time, or summer comparisons are off by the DST hour.
	pub reference_time: Option<OffsetDateTime>,
}
impl MatchContext<'_> {
	/// `reference_time`, or the Unix epoch when unset.
	pub fn reference(&self) -> OffsetDateTime {
		self.reference_time.unwrap_or(OffsetDateTime::UNIX_EPOCH)
	}
}
