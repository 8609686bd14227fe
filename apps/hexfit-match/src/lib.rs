use std::{
	fs,
	path::{Path, PathBuf},
};

use clap::Parser;
use color_eyre::eyre;
use serde::Serialize;

use hexfit_config::Config;
use hexfit_index::BuildStats;
use hexfit_service::{MatchOutcome, MatchRequest, Matcher};

#[derive(Debug, Parser)]
#[command(
	version = hexfit_cli::VERSION,
	rename_all = "kebab",
	styles = hexfit_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// JSON match request: a need plus its candidate capacities.
	#[arg(long, short = 'r', value_name = "FILE")]
	pub request: PathBuf,
	#[command(flatten)]
	pub output: hexfit_cli::Output,
}

#[derive(Debug, Serialize)]
pub struct MatchReport {
	pub need_id: String,
	pub radius_km: f64,
	pub index: BuildStats,
	pub outcomes: Vec<MatchOutcome>,
}

pub fn run(args: Args) -> color_eyre::Result<()> {
	let config = hexfit_config::load(&args.config)?;

	hexfit_cli::init_tracing(&config.service.log_level);

	let request = load_request(&args.request)?;
	let report = run_request(&config, &request)?;

	println!("{}", args.output.render(&report)?);

	Ok(())
}

/// Indexes the request's candidates and matches the need against them.
pub fn run_request(config: &Config, request: &MatchRequest) -> color_eyre::Result<MatchReport> {
	request.validate()?;

	let matcher = Matcher::new(config)?;
	let index = matcher.build_index(request.candidates.iter().map(|candidate| &candidate.capacity));
	let radius_km = request.need.radius_or(config.scoring.default_search_radius_km);
	let outcomes = matcher.find(&index, request);

	tracing::info!(
		need_id = %request.need.id,
		candidates = request.candidates.len(),
		indexed = index.stats().items_indexed,
		outcomes = outcomes.len(),
		"Match request processed."
	);

	Ok(MatchReport {
		need_id: request.need.id.clone(),
		radius_km,
		index: index.stats().clone(),
		outcomes,
	})
}

pub fn load_request(path: &Path) -> color_eyre::Result<MatchRequest> {
	let raw = fs::read_to_string(path)
		.map_err(|err| eyre::eyre!("Failed to read match request at {path:?}: {err}."))?;

	serde_json::from_str(&raw)
		.map_err(|err| eyre::eyre!("Failed to parse match request at {path:?}: {err}."))
}
