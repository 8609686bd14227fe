use std::path::PathBuf;

use clap::Parser;

use hexfit_config::Config;
use hexfit_match::{Args, load_request, run_request};

fn fixture(name: &str) -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

#[test]
fn args_require_config_and_request() {
	let args = Args::try_parse_from(["hexfit-match", "-c", "hexfit.toml", "--request", "r.json"])
		.expect("valid arguments");

	assert_eq!(args.config, PathBuf::from("hexfit.toml"));
	assert!(!args.output.pretty);
	assert!(Args::try_parse_from(["hexfit-match", "--config", "hexfit.toml"]).is_err());
}

#[test]
fn berlin_request_ranks_and_explains_candidates() {
	let request = load_request(&fixture("berlin_request.json")).expect("fixture request");
	let report = run_request(&Config::default(), &request).expect("request runs");
	let ids: Vec<&str> =
		report.outcomes.iter().map(|outcome| outcome.capacity_id.as_str()).collect();

	assert_eq!(report.need_id, "need-berlin");
	assert_eq!(report.radius_km, 50.0);
	assert_eq!(report.index.items_indexed, 3);
	assert_eq!(report.index.remote_items, 1);
	// The distant capacity never leaves the index; the online one fails the skill check.
	assert_eq!(ids, vec!["cap-near", "cap-online"]);
	assert!(report.outcomes[0].status.is_possible());
	assert!(report.outcomes[0].record.is_some());
	assert!(!report.outcomes[1].status.is_possible());

	let json = serde_json::to_value(&report).expect("serialize report");

	assert_eq!(json["outcomes"][0]["status"], "possible");
	assert_eq!(json["outcomes"][1]["status"], "impossible");
	assert!(
		json["outcomes"][1]["reasons"][0]
			.as_str()
			.is_some_and(|reason| reason.contains("tutoring"))
	);
}

#[test]
fn missing_request_file_is_reported() {
	let err = load_request(&fixture("absent.json")).expect_err("missing file");

	assert!(err.to_string().contains("Failed to read match request"));
}
