//! Command-line plumbing shared by hexfit binaries.

use clap::{
	Args,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when the configured log level does not parse.
pub const FALLBACK_LOG_FILTER: &str = "info";

/// How a report is written to stdout.
#[derive(Clone, Copy, Debug, Default, Args)]
pub struct Output {
	/// Pretty-print the JSON report.
	#[arg(long)]
	pub pretty: bool,
}
impl Output {
	pub fn render<T>(&self, report: &T) -> serde_json::Result<String>
	where
		T: Serialize + ?Sized,
	{
		if self.pretty { serde_json::to_string_pretty(report) } else { serde_json::to_string(report) }
	}
}

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.literal(AnsiColor::Blue.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
}

/// Installs the global subscriber on stderr; stdout carries only the report.
pub fn init_tracing(log_level: &str) {
	tracing_subscriber::fmt()
		.with_env_filter(log_filter(log_level))
		.with_writer(std::io::stderr)
		.init();
}

fn log_filter(log_level: &str) -> EnvFilter {
	EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new(FALLBACK_LOG_FILTER))
}
