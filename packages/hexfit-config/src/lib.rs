mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Continuity, Index, Matching, Scoring, Service, Travel};

use std::{fs, path::Path};

pub const MAX_RESOLUTION: u8 = 15;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(&raw).map_err(|err| match err {
		ParseFailure::Toml(source) => Error::ParseConfig { path: path.to_path_buf(), source },
		ParseFailure::Invalid(err) => err,
	})
}

/// Parses and validates a config held in memory.
pub fn from_toml_str(raw: &str) -> Result<Config> {
	parse(raw).map_err(|err| match err {
		ParseFailure::Toml(source) => Error::ParseConfig { path: "<inline>".into(), source },
		ParseFailure::Invalid(err) => err,
	})
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.index.default_resolution > MAX_RESOLUTION {
		return Err(Error::Validation {
			message: format!("index.default_resolution must be in the range 0-{MAX_RESOLUTION}."),
		});
	}
	if cfg.index.rollup_resolution > cfg.index.default_resolution {
		return Err(Error::Validation {
			message: "index.rollup_resolution must not be finer than index.default_resolution."
				.to_string(),
		});
	}
	if cfg.index.max_ring_count == 0 {
		return Err(Error::Validation {
			message: "index.max_ring_count must be greater than zero.".to_string(),
		});
	}
	if !cfg.scoring.default_search_radius_km.is_finite() {
		return Err(Error::Validation {
			message: "scoring.default_search_radius_km must be a finite number.".to_string(),
		});
	}
	if cfg.scoring.default_search_radius_km <= 0.0 {
		return Err(Error::Validation {
			message: "scoring.default_search_radius_km must be greater than zero.".to_string(),
		});
	}

	let travel = &cfg.scoring.travel;

	for (label, value) in [
		("scoring.travel.tortuosity", travel.tortuosity),
		("scoring.travel.comfortable_speed_kmh", travel.comfortable_speed_kmh),
		("scoring.travel.max_speed_kmh", travel.max_speed_kmh),
		("scoring.travel.min_score", travel.min_score),
	] {
		if !value.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
	}

	if travel.tortuosity < 1.0 {
		return Err(Error::Validation {
			message: "scoring.travel.tortuosity must be 1.0 or greater.".to_string(),
		});
	}
	if travel.comfortable_speed_kmh <= 0.0 {
		return Err(Error::Validation {
			message: "scoring.travel.comfortable_speed_kmh must be greater than zero.".to_string(),
		});
	}
	if travel.max_speed_kmh <= travel.comfortable_speed_kmh {
		return Err(Error::Validation {
			message:
				"scoring.travel.max_speed_kmh must be greater than scoring.travel.comfortable_speed_kmh."
					.to_string(),
		});
	}
	if !(0.0..=1.0).contains(&travel.min_score) {
		return Err(Error::Validation {
			message: "scoring.travel.min_score must be in the range 0.0-1.0.".to_string(),
		});
	}
	if cfg.scoring.continuity.default_target_minutes == 0 {
		return Err(Error::Validation {
			message: "scoring.continuity.default_target_minutes must be greater than zero."
				.to_string(),
		});
	}

	Ok(())
}

enum ParseFailure {
	Toml(toml::de::Error),
	Invalid(Error),
}

fn parse(raw: &str) -> std::result::Result<Config, ParseFailure> {
	let mut cfg: Config = toml::from_str(raw).map_err(ParseFailure::Toml)?;

	normalize(&mut cfg);

	validate(&cfg).map_err(ParseFailure::Invalid)?;

	Ok(cfg)
}

fn normalize(cfg: &mut Config) {
	let log_level = cfg.service.log_level.trim();

	if log_level.is_empty() {
		cfg.service.log_level = Service::default().log_level;
	} else if log_level.len() != cfg.service.log_level.len() {
		cfg.service.log_level = log_level.to_string();
	}
}
