//! Resolution tables and resolution selection.
//!
//! Edge lengths and areas are the published H3 averages per resolution. They are
//! averages, so ring counts derived from them carry a safety margin elsewhere.

use h3o::Resolution;

use crate::{Error, Result};

/// Average hexagon edge length in kilometres, indexed by resolution.
pub const EDGE_LENGTH_KM: [f64; 16] = [
	1_281.256_011,
	483.056_839_1,
	182.512_956_5,
	68.979_221_79,
	26.071_759_68,
	9.854_090_990,
	3.724_532_667,
	1.406_475_763,
	0.531_414_010,
	0.200_786_148,
	0.075_863_783,
	0.028_663_897,
	0.010_830_188,
	0.004_092_010,
	0.001_546_100,
	0.000_584_169,
];

/// Average hexagon area in square kilometres, indexed by resolution.
pub const AREA_KM2: [f64; 16] = [
	4_357_449.416_078,
	609_788.441_794_1,
	86_801.780_398_99,
	12_393.434_655_08,
	1_770.347_654_491,
	252.903_858_182_3,
	36.129_062_164_41,
	5.161_293_359_717,
	0.737_327_598_131,
	0.105_332_513_441,
	0.015_047_502_011,
	0.002_149_643_146,
	0.000_307_092_257,
	0.000_043_870_424,
	0.000_006_267_203,
	0.000_000_895_314,
];

/// Upper zoom bound (inclusive) and the resolution used up to it.
const ZOOM_BANDS: [(u8, u8); 7] = [(3, 2), (5, 3), (7, 4), (9, 5), (11, 6), (13, 7), (15, 8)];
const FINEST_ZOOM_RESOLUTION: u8 = 9;

/// Upper density bound (exclusive, items per km²) and the resolution used below it.
const DENSITY_BANDS: [(f64, u8); 6] =
	[(0.01, 4), (0.1, 5), (1.0, 6), (10.0, 7), (100.0, 8), (1_000.0, 9)];
const DENSEST_RESOLUTION: u8 = 10;

pub fn validate(resolution: u8) -> Result<Resolution> {
	Resolution::try_from(resolution).map_err(|_| Error::InvalidResolution { resolution })
}

pub fn edge_length_km(resolution: Resolution) -> f64 {
	EDGE_LENGTH_KM[usize::from(u8::from(resolution))]
}

pub fn area_km2(resolution: Resolution) -> f64 {
	AREA_KM2[usize::from(u8::from(resolution))]
}

/// Number of k-rings needed to cover `radius_km` around a cell at `resolution`.
///
/// Non-finite or negative radii are treated as zero, which still yields one ring.
pub fn ring_count(resolution: Resolution, radius_km: f64) -> u32 {
	let radius_km = if radius_km.is_finite() { radius_km.max(0.0) } else { 0.0 };
	let rings = (radius_km / edge_length_km(resolution)).ceil();

	if rings >= f64::from(u32::MAX - 1) { u32::MAX } else { rings as u32 + 1 }
}

/// Resolution for a map zoom level. Higher zoom selects smaller hexagons.
pub fn for_zoom(zoom: u8) -> u8 {
	ZOOM_BANDS
		.iter()
		.find(|(max_zoom, _)| zoom <= *max_zoom)
		.map(|(_, resolution)| *resolution)
		.unwrap_or(FINEST_ZOOM_RESOLUTION)
}

/// Resolution for a point density in items per km². Denser areas select smaller hexagons so
/// candidate sets stay bounded.
pub fn for_density(items_per_km2: f64) -> u8 {
	if !items_per_km2.is_finite() {
		return if items_per_km2 > 0.0 { DENSEST_RESOLUTION } else { DENSITY_BANDS[0].1 };
	}

	DENSITY_BANDS
		.iter()
		.find(|(max_density, _)| items_per_km2 < *max_density)
		.map(|(_, resolution)| *resolution)
		.unwrap_or(DENSEST_RESOLUTION)
}

#[cfg(test)]
mod tests {
	use h3o::Resolution;

	use crate::resolution::{
		AREA_KM2, EDGE_LENGTH_KM, for_density, for_zoom, ring_count, validate,
	};

	#[test]
	fn tables_shrink_with_resolution() {
		for pair in EDGE_LENGTH_KM.windows(2) {
			assert!(pair[0] > pair[1]);
		}
		for pair in AREA_KM2.windows(2) {
			assert!(pair[0] > pair[1]);
		}
	}

	#[test]
	fn validate_rejects_sixteen() {
		assert!(validate(15).is_ok());
		assert!(validate(16).is_err());
	}

	#[test]
	fn ring_count_adds_safety_margin() {
		assert_eq!(ring_count(Resolution::Seven, 0.0), 1);
		// 10 km / 1.406 km = 7.11 -> 8 rings, plus one.
		assert_eq!(ring_count(Resolution::Seven, 10.0), 9);
		assert_eq!(ring_count(Resolution::Seven, -3.0), 1);
		assert_eq!(ring_count(Resolution::Seven, f64::NAN), 1);
	}

	#[test]
	fn zoom_and_density_are_monotonic() {
		let mut previous = 0;

		for zoom in 0..=22 {
			let resolution = for_zoom(zoom);

			assert!(resolution >= previous, "zoom {zoom} went coarser");

			previous = resolution;
		}

		assert_eq!(for_zoom(0), 2);
		assert_eq!(for_zoom(13), 7);
		assert_eq!(for_zoom(20), 9);

		let densities = [0.0, 0.005, 0.05, 0.5, 5.0, 50.0, 500.0, 5_000.0];
		let resolutions: Vec<u8> = densities.iter().map(|density| for_density(*density)).collect();

		assert_eq!(resolutions, vec![4, 4, 5, 6, 7, 8, 9, 10]);
		assert_eq!(for_density(f64::INFINITY), 10);
	}
}
