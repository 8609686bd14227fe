use h3o::{CellIndex, Resolution};

use crate::{
	Error, Result,
	cell::{self, CellKey, Locatable},
	geo::haversine_km,
	resolution,
};
use hexfit_config::Index;

/// Stateless grid operations bound to one index configuration.
#[derive(Clone, Debug)]
pub struct HexGrid {
	cfg: Index,
	default_resolution: Resolution,
}
impl HexGrid {
	pub fn new(cfg: Index) -> Result<Self> {
		let default_resolution = resolution::validate(cfg.default_resolution)?;

		resolution::validate(cfg.rollup_resolution)?;

		Ok(Self { cfg, default_resolution })
	}

	pub fn config(&self) -> &Index {
		&self.cfg
	}

	pub fn default_resolution(&self) -> Resolution {
		self.default_resolution
	}

	/// Cell key of `item` at `resolution`.
	///
	/// Remote items map to [`CellKey::Remote`]. Located items use their coordinates first and
	/// their `h3_index` second; an `h3_index` finer than `resolution` is coarsened to it.
	pub fn compute_cell_id<L>(&self, item: &L, resolution: u8) -> Result<CellKey>
	where
		L: Locatable + ?Sized,
	{
		let resolution = resolution::validate(resolution)?;

		if item.is_remote() {
			return Ok(CellKey::Remote);
		}
		if let Some(latlng) = item.geo_point().and_then(cell::to_latlng) {
			return Ok(CellKey::Geo(latlng.to_cell(resolution)));
		}

		let cell = item.h3_index().and_then(cell::parse_cell).ok_or(Error::InvalidLocation)?;

		Ok(CellKey::Geo(coarsen(cell, resolution)))
	}

	/// Non-failing cell assignment at the item's own resolution (or the default).
	///
	/// Failures degrade to the remote bucket: an over-broad candidate set is preferred to
	/// dropping the item.
	pub fn cell_for<L>(&self, item: &L) -> CellKey
	where
		L: Locatable + ?Sized,
	{
		let resolution = item.h3_resolution().unwrap_or(self.cfg.default_resolution);

		self.cell_or_remote(item, resolution)
	}

	pub(crate) fn cell_or_remote<L>(&self, item: &L, resolution: u8) -> CellKey
	where
		L: Locatable + ?Sized,
	{
		match self.compute_cell_id(item, resolution) {
			Ok(key) => key,
			Err(Error::InvalidResolution { resolution }) => {
				tracing::warn!(resolution, "Invalid item resolution; using the default.");

				self.compute_cell_id(item, self.cfg.default_resolution).unwrap_or_else(|err| {
					tracing::warn!(error = %err, "Falling back to the remote bucket.");

					CellKey::Remote
				})
			},
			Err(err) => {
				tracing::warn!(error = %err, "Falling back to the remote bucket.");

				CellKey::Remote
			},
		}
	}

	pub fn ring_count(&self, resolution: Resolution, radius_km: f64) -> u32 {
		resolution::ring_count(resolution, radius_km)
	}

	/// All cells within `radius_km` of `center`, over-covering near ring boundaries.
	///
	/// A remote center yields only the remote key. When the k-ring at the center's resolution
	/// would exceed `index.max_ring_count`, the disk is expanded around the center's ancestor
	/// at the finest coarser resolution that fits, so the returned cells may be coarser than
	/// `center`. Membership of a finer cell is then decided on its ancestor.
	pub fn cells_in_radius(&self, center: CellKey, radius_km: f64) -> Vec<CellKey> {
		let CellKey::Geo(cell) = center else {
			return vec![CellKey::Remote];
		};
		let mut origin = cell;

		loop {
			match self.grid_disk(origin, radius_km) {
				Ok(cells) => {
					if origin != cell {
						tracing::debug!(
							%cell,
							radius_km,
							resolution = u8::from(origin.resolution()),
							"Ring cap exceeded; expanded at a coarser resolution."
						);
					}

					return cells.into_iter().map(CellKey::Geo).collect();
				},
				Err(err) => match coarser(origin.resolution()) {
					Some(resolution) => origin = coarsen(origin, resolution),
					None => {
						tracing::debug!(
							%cell,
							radius_km,
							error = %err,
							"Ring cap exceeded at resolution 0; covering every base cell."
						);

						return CellIndex::base_cells().map(CellKey::Geo).collect();
					},
				},
			}
		}
	}

	pub(crate) fn grid_disk(&self, cell: CellIndex, radius_km: f64) -> Result<Vec<CellIndex>> {
		let rings = self.ring_count(cell.resolution(), radius_km);

		if rings > self.cfg.max_ring_count {
			return Err(Error::IndexOperation {
				message: format!(
					"{rings} rings exceed index.max_ring_count ({}).",
					self.cfg.max_ring_count
				),
			});
		}

		Ok(cell.grid_disk::<Vec<_>>(rings))
	}

	/// Whether two cells can lie within `radius_km` of each other.
	///
	/// Both cells are compared at the coarser of their resolutions. When the grid distance is
	/// undefined (the cells sit on different icosahedron faces or around a pentagon) the
	/// great-circle distance between the original cell centers decides.
	pub fn cells_compatible(&self, a: CellKey, b: CellKey, radius_km: f64) -> bool {
		let (CellKey::Geo(a), CellKey::Geo(b)) = (a, b) else {
			return true;
		};
		let common = a.resolution().min(b.resolution());
		let (ancestor_a, ancestor_b) = (coarsen(a, common), coarsen(b, common));

		if ancestor_a == ancestor_b {
			return true;
		}

		match ancestor_a.grid_distance(ancestor_b) {
			Ok(distance) => {
				let rings = self.ring_count(common, radius_km);

				u32::try_from(distance).map(|distance| distance <= rings).unwrap_or(false)
			},
			Err(err) => {
				tracing::warn!(
					%a,
					%b,
					error = %err,
					"Grid distance undefined; using great-circle distance."
				);

				great_circle_within(a, b, radius_km)
			},
		}
	}
}

pub(crate) fn coarsen(cell: CellIndex, resolution: Resolution) -> CellIndex {
	if cell.resolution() <= resolution {
		return cell;
	}

	cell.parent(resolution).unwrap_or(cell)
}

fn coarser(resolution: Resolution) -> Option<Resolution> {
	u8::from(resolution).checked_sub(1).and_then(|resolution| Resolution::try_from(resolution).ok())
}

fn great_circle_within(a: CellIndex, b: CellIndex, radius_km: f64) -> bool {
	match (cell::cell_center(a), cell::cell_center(b)) {
		(Some(a), Some(b)) => haversine_km(a, b) <= radius_km,
		_ => true,
	}
}
