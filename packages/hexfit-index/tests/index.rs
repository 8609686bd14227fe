use h3o::{LatLng, Resolution};

use hexfit_config::Index;
use hexfit_index::{
	CellKey, Error, GeoPoint, HexGrid, HexIndexBuilder, Indexable, Locatable, haversine_km,
};

#[derive(Default)]
struct Site {
	id: &'static str,
	latitude: Option<f64>,
	longitude: Option<f64>,
	location_type: Option<&'static str>,
	online_link: Option<&'static str>,
	h3_index: Option<String>,
}
impl Site {
	fn at(id: &'static str, latitude: f64, longitude: f64) -> Self {
		Self { id, latitude: Some(latitude), longitude: Some(longitude), ..Default::default() }
	}

	fn remote(id: &'static str) -> Self {
		Self { id, location_type: Some("remote"), ..Default::default() }
	}
}
impl Locatable for Site {
	fn latitude(&self) -> Option<f64> {
		self.latitude
	}

	fn longitude(&self) -> Option<f64> {
		self.longitude
	}

	fn location_type(&self) -> Option<&str> {
		self.location_type
	}

	fn online_link(&self) -> Option<&str> {
		self.online_link
	}

	fn h3_index(&self) -> Option<&str> {
		self.h3_index.as_deref()
	}
}
impl Indexable for Site {
	fn item_id(&self) -> &str {
		self.id
	}
}

fn grid() -> HexGrid {
	HexGrid::new(Index::default()).expect("default index config is valid")
}

fn grid_with_ring_cap(max_ring_count: u32) -> HexGrid {
	HexGrid::new(Index { max_ring_count, ..Index::default() }).expect("index config is valid")
}

fn key_at(latitude: f64, longitude: f64, resolution: Resolution) -> CellKey {
	CellKey::Geo(LatLng::new(latitude, longitude).expect("valid coordinate").to_cell(resolution))
}

fn sites() -> Vec<Site> {
	vec![
		Site::at("berlin", 52.52, 13.40),
		Site::at("potsdam", 52.39, 13.06),
		Site::at("munich", 48.137, 11.575),
		Site::remote("tutor"),
		Site { id: "unplaced", location_type: Some("on_site"), ..Default::default() },
	]
}

#[test]
fn compute_cell_id_validates_inputs() {
	let grid = grid();
	let located = Site::at("a", 52.52, 13.40);

	assert!(matches!(
		grid.compute_cell_id(&located, 16),
		Err(Error::InvalidResolution { resolution: 16 })
	));
	assert!(matches!(
		grid.compute_cell_id(&Site { id: "b", ..Default::default() }, 7),
		Err(Error::InvalidLocation)
	));
	let out_of_range =
		Site { id: "c", latitude: Some(95.0), longitude: Some(0.0), ..Default::default() };

	assert!(matches!(grid.compute_cell_id(&out_of_range, 7), Err(Error::InvalidLocation)));

	let key = grid.compute_cell_id(&located, 7).expect("located item has a cell");

	assert_eq!(key.cell().map(|cell| cell.resolution()), Some(Resolution::Seven));
}

#[test]
fn remote_items_map_to_remote_key() {
	let grid = grid();
	let linked =
		Site { online_link: Some("https://call.example.org"), ..Site::at("l", 1.0, 1.0) };

	assert_eq!(grid.compute_cell_id(&Site::remote("r"), 7).expect("remote"), CellKey::Remote);
	assert_eq!(grid.compute_cell_id(&linked, 7).expect("remote"), CellKey::Remote);
}

#[test]
fn h3_index_only_items_are_coarsened() {
	let grid = grid();
	let fine = key_at(52.52, 13.40, Resolution::Ten);
	let site = Site { id: "h", h3_index: Some(fine.to_string()), ..Default::default() };
	let key = grid.compute_cell_id(&site, 7).expect("h3 item has a cell");
	let expected = fine.cell().and_then(|cell| cell.parent(Resolution::Seven)).map(CellKey::Geo);

	assert_eq!(Some(key), expected);
	assert!(site.position().is_some());
}

#[test]
fn cell_for_degrades_to_remote() {
	let grid = grid();

	assert_eq!(grid.cell_for(&Site { id: "x", ..Default::default() }), CellKey::Remote);
}

#[test]
fn remote_center_radius_is_remote_only() {
	assert_eq!(grid().cells_in_radius(CellKey::Remote, 10.0), vec![CellKey::Remote]);
}

#[test]
fn radius_covers_every_cell_center_within_range() {
	let grid = grid();
	let center = key_at(52.52, 13.40, Resolution::Seven);
	let center_cell = center.cell().expect("geo key");
	let center_point = center.center().expect("cell center");
	let radius_km = 12.0;
	let covered = grid.cells_in_radius(center, radius_km);

	for cell in center_cell.grid_disk::<Vec<_>>(20) {
		let point = CellKey::Geo(cell).center().expect("cell center");

		if haversine_km(center_point, point) <= radius_km {
			assert!(covered.contains(&CellKey::Geo(cell)), "cell {cell} missing from radius");
		}
	}
}

fn covers(cells: &[CellKey], key: CellKey) -> bool {
	let Some(target) = key.cell() else {
		return cells.contains(&CellKey::Remote);
	};

	cells.iter().filter_map(|cell| cell.cell()).any(|cell| {
		cell.resolution() <= target.resolution() && target.parent(cell.resolution()) == Some(cell)
	})
}

#[test]
fn radius_beyond_ring_cap_expands_at_a_coarser_resolution() {
	let grid = grid_with_ring_cap(3);
	let center = key_at(52.52, 13.40, Resolution::Seven);
	let potsdam = key_at(52.39, 13.06, Resolution::Seven);
	let covered = grid.cells_in_radius(center, 50.0);

	assert!(covered.len() > 1);
	assert!(
		covered
			.iter()
			.all(|key| key.cell().is_some_and(|cell| cell.resolution() == Resolution::Four))
	);
	assert!(covers(&covered, center));
	assert!(covers(&covered, potsdam));
}

#[test]
fn continental_radius_with_default_cap_keeps_nearby_cells() {
	let grid = grid();
	let center = key_at(52.52, 13.40, Resolution::Seven);
	let covered = grid.cells_in_radius(center, 800.0);

	assert!(covers(&covered, key_at(52.39, 13.06, Resolution::Seven)));
	assert!(covers(&covered, key_at(48.137, 11.575, Resolution::Seven)));
	assert!(!covers(&covered, key_at(-33.87, 151.21, Resolution::Seven)));
}

#[test]
fn ring_cap_at_the_coarsest_resolution_covers_the_globe() {
	let grid = grid_with_ring_cap(1);
	let covered = grid.cells_in_radius(key_at(52.52, 13.40, Resolution::Seven), 5_000.0);

	assert_eq!(covered.len(), 122);
	assert!(covers(&covered, key_at(-33.87, 151.21, Resolution::Seven)));
}

#[test]
fn compatibility_uses_coarser_ancestor() {
	let grid = grid();
	let berlin_fine = key_at(52.52, 13.40, Resolution::Nine);
	let berlin_coarse = key_at(52.52, 13.40, Resolution::Five);
	let potsdam = key_at(52.39, 13.06, Resolution::Seven);
	let munich = key_at(48.137, 11.575, Resolution::Seven);

	assert!(grid.cells_compatible(berlin_fine, berlin_coarse, 0.0));
	assert!(grid.cells_compatible(berlin_fine, potsdam, 40.0));
	assert!(!grid.cells_compatible(berlin_fine, munich, 40.0));
	assert!(grid.cells_compatible(CellKey::Remote, munich, 0.0));
}

#[test]
fn compatibility_across_the_globe_is_decided_by_distance() {
	let grid = grid();
	let berlin = key_at(52.52, 13.40, Resolution::Seven);
	let sydney = key_at(-33.87, 151.21, Resolution::Seven);

	assert!(!grid.cells_compatible(berlin, sydney, 100.0));
	assert!(grid.cells_compatible(berlin, sydney, 20_000.0));
}

#[test]
fn builder_buckets_and_counts_items() {
	let sites = sites();
	let mut builder = HexIndexBuilder::new(grid());

	builder.extend(&sites);

	assert_eq!(builder.add(&Site::at("berlin", 0.0, 0.0)), None);

	let index = builder.build();
	let stats = index.stats();

	assert_eq!(stats.items_processed, 6);
	assert_eq!(stats.items_indexed, 5);
	assert_eq!(stats.remote_items, 1);
	assert_eq!(stats.fallback_items, 1);
	assert_eq!(stats.duplicate_items, 1);
	assert_eq!(stats.distinct_cells, 4);
	assert_eq!(index.len(), 5);
	assert_eq!(index.bucket(CellKey::Remote).len(), 2);
}

#[test]
fn radius_query_returns_nearby_and_remote_items() {
	let sites = sites();
	let mut builder = HexIndexBuilder::new(grid());

	builder.extend(&sites);

	let index = builder.build();
	let mut ids = index.query_radius(&Site::at("q", 52.50, 13.38), 50.0);

	ids.sort_unstable();

	assert_eq!(ids, vec!["berlin", "potsdam", "tutor", "unplaced"]);
}

#[test]
fn remote_query_center_returns_everything() {
	let sites = sites();
	let mut builder = HexIndexBuilder::new(grid());

	builder.extend(&sites);

	let index = builder.build();

	assert_eq!(index.query_radius(&Site::remote("q"), 1.0).len(), 5);
}

#[test]
fn ring_cap_switches_query_to_bucket_scan() {
	let sites = sites();
	let mut builder = HexIndexBuilder::new(grid_with_ring_cap(2));

	builder.extend(&sites);

	let index = builder.build();
	let ids = index.query_radius(&Site::at("q", 52.50, 13.38), 50.0);

	assert!(ids.contains(&"berlin"));
	assert!(ids.contains(&"potsdam"));
	assert!(!ids.contains(&"munich"));
}

#[test]
fn region_rollup_uses_parent_links() {
	let sites = sites();
	let mut builder = HexIndexBuilder::new(grid());

	builder.extend(&sites);

	let index = builder.build();
	let berlin = key_at(52.52, 13.40, Resolution::Seven).cell().expect("geo key");
	let parent = index.parent_of(berlin).expect("indexed cell has a parent");

	assert_eq!(parent.resolution(), Resolution::Five);
	assert!(index.children_of(parent).contains(&berlin));
	assert!(index.items_in_region(parent).contains(&"berlin"));

	let province = berlin.parent(Resolution::Three).expect("coarser parent");
	let in_province = index.items_in_region(province);

	assert!(in_province.contains(&"berlin"));
	assert!(!in_province.contains(&"munich"));
	assert_eq!(index.items_in_region(berlin), vec!["berlin"]);
}

#[test]
fn density_builder_picks_finer_cells_for_dense_data() {
	let index = HexIndexBuilder::for_density(grid(), 50.0).expect("valid density").build();

	assert_eq!(index.resolution(), Resolution::Eight);
}

#[test]
fn cell_key_serializes_as_string() {
	let key = key_at(52.52, 13.40, Resolution::Seven);
	let json = serde_json::to_string(&key).expect("serialize key");
	let parsed: CellKey = serde_json::from_str(&json).expect("parse key");

	assert_eq!(parsed, key);
	assert_eq!(serde_json::to_string(&CellKey::Remote).expect("serialize"), "\"remote\"");
	assert!(GeoPoint::new(52.52, 13.40).is_some());
}
