//! Great-circle distance and remote-location handling.

use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6_371.0;

const REMOTE_MARKERS: [&str; 2] = ["remote", "online"];

/// A validated WGS84 coordinate in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
	pub latitude: f64,
	pub longitude: f64,
}
impl GeoPoint {
	/// Returns `None` unless both values are finite and inside the WGS84 ranges.
	pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
		if !latitude.is_finite() || !longitude.is_finite() {
			return None;
		}
		if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
			return None;
		}

		Some(Self { latitude, longitude })
	}

	pub fn distance_km(self, other: Self) -> f64 {
		haversine_km(self, other)
	}
}

pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
	let lat1 = from.latitude.to_radians();
	let lat2 = to.latitude.to_radians();
	let dlat = (to.latitude - from.latitude).to_radians();
	let dlng = (to.longitude - from.longitude).to_radians();
	let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
	let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

	EARTH_RADIUS_KM * c
}

/// An item is remote when it carries an online link or its location type mentions
/// "remote" or "online".
pub fn is_remote(location_type: Option<&str>, online_link: Option<&str>) -> bool {
	if online_link.map(|link| !link.trim().is_empty()).unwrap_or(false) {
		return true;
	}

	location_type
		.map(|kind| {
			let kind = kind.to_ascii_lowercase();

			REMOTE_MARKERS.iter().any(|marker| kind.contains(marker))
		})
		.unwrap_or(false)
}
