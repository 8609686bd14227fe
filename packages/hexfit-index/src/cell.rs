use std::{fmt, str::FromStr};

use h3o::{CellIndex, LatLng};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::geo::{self, GeoPoint};

pub const REMOTE_KEY: &str = "remote";

/// Bucket key of the hex index: either a hexagonal cell or the shared remote bucket.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum CellKey {
	Geo(CellIndex),
	Remote,
}
impl CellKey {
	pub fn is_remote(self) -> bool {
		matches!(self, Self::Remote)
	}

	pub fn cell(self) -> Option<CellIndex> {
		match self {
			Self::Geo(cell) => Some(cell),
			Self::Remote => None,
		}
	}

	/// Center of the cell; remote keys have no position.
	pub fn center(self) -> Option<GeoPoint> {
		self.cell().and_then(cell_center)
	}
}
impl fmt::Display for CellKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Geo(cell) => write!(f, "{cell}"),
			Self::Remote => f.write_str(REMOTE_KEY),
		}
	}
}
impl FromStr for CellKey {
	type Err = h3o::error::InvalidCellIndex;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let raw = raw.trim();

		if raw.eq_ignore_ascii_case(REMOTE_KEY) {
			return Ok(Self::Remote);
		}

		CellIndex::from_str(raw).map(Self::Geo)
	}
}
impl Serialize for CellKey {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}
impl<'de> Deserialize<'de> for CellKey {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;

		raw.parse().map_err(serde::de::Error::custom)
	}
}

/// Anything the index can place on the grid.
pub trait Locatable {
	fn latitude(&self) -> Option<f64>;

	fn longitude(&self) -> Option<f64>;

	fn location_type(&self) -> Option<&str> {
		None
	}

	fn online_link(&self) -> Option<&str> {
		None
	}

	fn h3_index(&self) -> Option<&str> {
		None
	}

	fn h3_resolution(&self) -> Option<u8> {
		None
	}

	fn is_remote(&self) -> bool {
		geo::is_remote(self.location_type(), self.online_link())
	}

	/// Coordinates when both are present and valid.
	fn geo_point(&self) -> Option<GeoPoint> {
		GeoPoint::new(self.latitude()?, self.longitude()?)
	}

	/// Coordinates, falling back to the center of `h3_index`.
	fn position(&self) -> Option<GeoPoint> {
		self.geo_point().or_else(|| parse_cell(self.h3_index()?).and_then(cell_center))
	}
}

/// An indexed item; buckets hold its id rather than the item itself.
pub trait Indexable: Locatable {
	fn item_id(&self) -> &str;
}

pub(crate) fn parse_cell(raw: &str) -> Option<CellIndex> {
	CellIndex::from_str(raw.trim()).ok()
}

pub(crate) fn cell_center(cell: CellIndex) -> Option<GeoPoint> {
	let center = LatLng::from(cell);

	GeoPoint::new(center.lat(), center.lng())
}

pub(crate) fn to_latlng(point: GeoPoint) -> Option<LatLng> {
	LatLng::new(point.latitude, point.longitude).ok()
}
