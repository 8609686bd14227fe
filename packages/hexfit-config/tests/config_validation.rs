use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use hexfit_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_with(section: &[&str], key: &str, value: Value) -> String {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let mut table = root.as_table_mut().expect("Sample config must be a table.");

	for name in section {
		table = table
			.get_mut(*name)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Sample config must include [{name}]."));
	}

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("hexfit_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn validation_message(payload: String) -> String {
	let err = hexfit_config::from_toml_str(&payload).expect_err("Expected validation error.");

	match err {
		Error::Validation { message } => message,
		other => panic!("Unexpected error: {other}"),
	}
}

#[test]
fn loads_sample_config_from_disk() {
	let path = write_temp_config(SAMPLE_CONFIG_TOML.to_string());
	let result = hexfit_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Sample config must load.");

	assert_eq!(cfg.service.log_level, "debug");
	assert_eq!(cfg.index.default_resolution, 8);
	assert_eq!(cfg.index.max_ring_count, 256);
	assert_eq!(cfg.scoring.default_search_radius_km, 40.0);
	assert_eq!(cfg.scoring.travel.tortuosity, 1.4);
	assert_eq!(cfg.scoring.continuity.default_target_minutes, 45);
	assert_eq!(cfg.matching.max_candidates, 100);
	assert!(cfg.matching.include_breakdown);
}

#[test]
fn empty_config_uses_defaults() {
	let cfg = hexfit_config::from_toml_str("").expect("Empty config must be valid.");

	assert_eq!(cfg.service.log_level, "info");
	assert_eq!(cfg.index.default_resolution, 7);
	assert_eq!(cfg.index.rollup_resolution, 5);
	assert_eq!(cfg.scoring.default_search_radius_km, 25.0);
	assert_eq!(cfg.scoring.travel.tortuosity, 1.5);
	assert_eq!(cfg.scoring.travel.comfortable_speed_kmh, 30.0);
	assert_eq!(cfg.scoring.travel.max_speed_kmh, 80.0);
	assert_eq!(cfg.scoring.travel.min_score, 0.1);
	assert_eq!(cfg.scoring.continuity.default_target_minutes, 60);
}

#[test]
fn blank_log_level_normalizes_to_info() {
	let payload = sample_with(&["service"], "log_level", Value::String("   ".to_string()));
	let cfg = hexfit_config::from_toml_str(&payload).expect("Blank log level must normalize.");

	assert_eq!(cfg.service.log_level, "info");
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("hexfit_config_test_missing.toml");
	let err = hexfit_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err}");
}

#[test]
fn malformed_toml_reports_parse_error() {
	let path = write_temp_config("[index\ndefault_resolution = ".to_string());
	let result = hexfit_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	assert!(matches!(result, Err(Error::ParseConfig { .. })));
}

#[test]
fn resolution_above_fifteen_is_rejected() {
	let message =
		validation_message(sample_with(&["index"], "default_resolution", Value::Integer(16)));

	assert!(
		message.contains("index.default_resolution must be in the range 0-15."),
		"Unexpected error message: {message}"
	);
}

#[test]
fn rollup_finer_than_default_is_rejected() {
	let message =
		validation_message(sample_with(&["index"], "rollup_resolution", Value::Integer(9)));

	assert!(
		message.contains("index.rollup_resolution must not be finer"),
		"Unexpected error message: {message}"
	);
}

#[test]
fn non_positive_radius_is_rejected() {
	let message = validation_message(sample_with(
		&["scoring"],
		"default_search_radius_km",
		Value::Float(0.0),
	));

	assert!(
		message.contains("scoring.default_search_radius_km must be greater than zero."),
		"Unexpected error message: {message}"
	);
}

#[test]
fn tortuosity_below_one_is_rejected() {
	let message =
		validation_message(sample_with(&["scoring", "travel"], "tortuosity", Value::Float(0.8)));

	assert!(
		message.contains("scoring.travel.tortuosity must be 1.0 or greater."),
		"Unexpected error message: {message}"
	);
}

#[test]
fn max_speed_must_exceed_comfortable_speed() {
	let message =
		validation_message(sample_with(&["scoring", "travel"], "max_speed_kmh", Value::Float(20.0)));

	assert!(
		message.contains("scoring.travel.max_speed_kmh must be greater than"),
		"Unexpected error message: {message}"
	);
}

#[test]
fn travel_min_score_must_be_a_fraction() {
	let message =
		validation_message(sample_with(&["scoring", "travel"], "min_score", Value::Float(1.5)));

	assert!(
		message.contains("scoring.travel.min_score must be in the range 0.0-1.0."),
		"Unexpected error message: {message}"
	);
}

#[test]
fn programmatic_config_is_validated() {
	let mut cfg = Config::default();

	cfg.scoring.continuity.default_target_minutes = 0;

	let err = hexfit_config::validate(&cfg).expect_err("Expected validation error.");

	assert!(err.to_string().contains("scoring.continuity.default_target_minutes"));
}
