// crates.io
use clap::Parser;
// self
use hexfit_match::Args;

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = Args::parse();

	hexfit_match::run(args)
}
