//! Epoch-scoped hex index.
//!
//! A [`HexIndexBuilder`] accepts items append-only and freezes into a read-only [`HexIndex`].
//! Absorbing new items means building a new index and swapping it in; the built index is
//! never mutated, so concurrent readers need no coordination.

use ahash::{AHashMap, AHashSet};
use h3o::{CellIndex, Resolution};
use serde::Serialize;

use crate::{
	Result,
	cell::{CellKey, Indexable, Locatable},
	grid::{self, HexGrid},
	resolution,
};

/// Counters collected while building an index.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BuildStats {
	pub items_processed: u64,
	pub items_indexed: u64,
	pub remote_items: u64,
	/// Located-looking items that could not be placed and went to the remote bucket.
	pub fallback_items: u64,
	pub duplicate_items: u64,
	pub distinct_cells: u64,
}

pub struct HexIndexBuilder {
	grid: HexGrid,
	resolution: Resolution,
	buckets: AHashMap<CellKey, Vec<String>>,
	seen: AHashSet<String>,
	stats: BuildStats,
}
impl HexIndexBuilder {
	pub fn new(grid: HexGrid) -> Self {
		let resolution = grid.default_resolution();

		Self::with_resolution(grid, resolution)
	}

	pub fn with_resolution(grid: HexGrid, resolution: Resolution) -> Self {
		Self {
			grid,
			resolution,
			buckets: AHashMap::new(),
			seen: AHashSet::new(),
			stats: BuildStats::default(),
		}
	}

	/// Builder at the resolution suited to a point density (items per km²).
	pub fn for_density(grid: HexGrid, items_per_km2: f64) -> Result<Self> {
		let resolution = resolution::validate(resolution::for_density(items_per_km2))?;

		Ok(Self::with_resolution(grid, resolution))
	}

	pub fn stats(&self) -> &BuildStats {
		&self.stats
	}

	/// Adds an item and returns the bucket it landed in, or `None` for a duplicate id.
	pub fn add<T>(&mut self, item: &T) -> Option<CellKey>
	where
		T: Indexable + ?Sized,
	{
		self.stats.items_processed += 1;

		if !self.seen.insert(item.item_id().to_string()) {
			self.stats.duplicate_items += 1;

			tracing::debug!(item_id = item.item_id(), "Skipping duplicate item.");

			return None;
		}

		let key = self.grid.cell_or_remote(item, u8::from(self.resolution));

		if key.is_remote() {
			if item.is_remote() {
				self.stats.remote_items += 1;
			} else {
				self.stats.fallback_items += 1;
			}
		}

		tracing::trace!(item_id = item.item_id(), cell = %key, "Indexed item.");

		self.buckets.entry(key).or_default().push(item.item_id().to_string());
		self.stats.items_indexed += 1;

		Some(key)
	}

	pub fn extend<'a, T, I>(&mut self, items: I)
	where
		T: Indexable + 'a,
		I: IntoIterator<Item = &'a T>,
	{
		for item in items {
			self.add(item);
		}
	}

	pub fn build(self) -> HexIndex {
		let rollup_resolution = Resolution::try_from(self.grid.config().rollup_resolution)
			.unwrap_or(Resolution::Zero)
			.min(self.resolution);
		let mut parents = AHashMap::new();
		let mut children: AHashMap<CellIndex, Vec<CellIndex>> = AHashMap::new();

		for cell in self.buckets.keys().filter_map(|key| key.cell()) {
			let parent = grid::coarsen(cell, rollup_resolution);

			parents.insert(cell, parent);
			children.entry(parent).or_default().push(cell);
		}
		for cells in children.values_mut() {
			cells.sort_unstable();
		}

		let mut stats = self.stats;

		stats.distinct_cells = self.buckets.len() as u64;

		tracing::debug!(
			items = stats.items_indexed,
			cells = stats.distinct_cells,
			remote = stats.remote_items,
			fallback = stats.fallback_items,
			resolution = u8::from(self.resolution),
			"Hex index built."
		);

		HexIndex {
			grid: self.grid,
			resolution: self.resolution,
			rollup_resolution,
			buckets: self.buckets,
			parents,
			children,
			stats,
		}
	}
}

/// Read-only mapping from cell keys to item ids at one resolution, with cached roll-up links.
pub struct HexIndex {
	grid: HexGrid,
	resolution: Resolution,
	rollup_resolution: Resolution,
	buckets: AHashMap<CellKey, Vec<String>>,
	parents: AHashMap<CellIndex, CellIndex>,
	children: AHashMap<CellIndex, Vec<CellIndex>>,
	stats: BuildStats,
}
impl HexIndex {
	pub fn grid(&self) -> &HexGrid {
		&self.grid
	}

	pub fn resolution(&self) -> Resolution {
		self.resolution
	}

	pub fn rollup_resolution(&self) -> Resolution {
		self.rollup_resolution
	}

	pub fn stats(&self) -> &BuildStats {
		&self.stats
	}

	pub fn len(&self) -> usize {
		self.buckets.values().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.buckets.is_empty()
	}

	pub fn bucket(&self, key: CellKey) -> &[String] {
		self.buckets.get(&key).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Cell key a query center maps to at this index's resolution.
	pub fn center_key<L>(&self, center: &L) -> CellKey
	where
		L: Locatable + ?Sized,
	{
		self.grid.cell_or_remote(center, u8::from(self.resolution))
	}

	/// Ids of every item that may lie within `radius_km` of `center`.
	///
	/// Remote items are always included and a remote center returns everything. When the
	/// k-ring would exceed `index.max_ring_count` the query scans buckets with
	/// [`HexGrid::cells_compatible`] instead, so nothing within the radius is dropped.
	pub fn query_radius<L>(&self, center: &L, radius_km: f64) -> Vec<&str>
	where
		L: Locatable + ?Sized,
	{
		let center = self.center_key(center);
		let CellKey::Geo(cell) = center else {
			return self.all_ids();
		};
		let mut ids: Vec<&str> = self.bucket(CellKey::Remote).iter().map(String::as_str).collect();

		match self.grid.grid_disk(cell, radius_km) {
			Ok(cells) => {
				for cell in cells {
					ids.extend(self.bucket(CellKey::Geo(cell)).iter().map(String::as_str));
				}
			},
			Err(err) => {
				tracing::debug!(error = %err, "Ring expansion refused; scanning buckets.");

				for (key, bucket) in &self.buckets {
					if !key.is_remote() && self.grid.cells_compatible(center, *key, radius_km) {
						ids.extend(bucket.iter().map(String::as_str));
					}
				}
			},
		}

		ids
	}

	/// Roll-up parent of an indexed cell.
	pub fn parent_of(&self, cell: CellIndex) -> Option<CellIndex> {
		self.parents.get(&cell).copied()
	}

	/// Indexed cells grouped under a roll-up parent.
	pub fn children_of(&self, parent: CellIndex) -> &[CellIndex] {
		self.children.get(&parent).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Ids of items whose cells roll up into `region`, at any resolution down to the
	/// index resolution.
	pub fn items_in_region(&self, region: CellIndex) -> Vec<&str> {
		let region_resolution = region.resolution();
		let cells: Vec<CellIndex> = if region_resolution == self.rollup_resolution {
			self.children_of(region).to_vec()
		} else if region_resolution < self.rollup_resolution {
			self.children
				.iter()
				.filter(|(parent, _)| grid::coarsen(**parent, region_resolution) == region)
				.flat_map(|(_, cells)| cells.iter().copied())
				.collect()
		} else {
			self.children_of(grid::coarsen(region, self.rollup_resolution))
				.iter()
				.copied()
				.filter(|cell| grid::coarsen(*cell, region_resolution) == region)
				.collect()
		};

		cells
			.into_iter()
			.flat_map(|cell| self.bucket(CellKey::Geo(cell)).iter().map(String::as_str))
			.collect()
	}

	fn all_ids(&self) -> Vec<&str> {
		self.buckets.values().flat_map(|bucket| bucket.iter().map(String::as_str)).collect()
	}
}
