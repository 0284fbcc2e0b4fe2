mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};
use geotiler::config::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// YAML configuration file
	#[arg(long, short, global = true, value_name = "FILE")]
	config: Option<PathBuf>,

	/// tile zoom level, overrides the configuration
	#[arg(long, short, global = true)]
	level: Option<u8>,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Fetch the tiles around a position and list them
	Tiles(tools::tiles::Subcommand),

	/// Print the elevation at a position
	Elevation(tools::elevation::Subcommand),

	/// Print the data tiles around a position with elevations added
	Inject(tools::inject::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	let config = load_config(&cli)?;
	match &cli.command {
		Commands::Tiles(arguments) => tools::tiles::run(arguments, &config),
		Commands::Elevation(arguments) => tools::elevation::run(arguments, &config),
		Commands::Inject(arguments) => tools::inject::run(arguments, &config),
	}
}

fn load_config(cli: &Cli) -> Result<Config> {
	let mut config = match &cli.config {
		Some(path) => Config::from_path(path)?,
		None => Config::default(),
	};
	if let Some(level) = cli.level {
		config.level = level;
	}
	config.validate()?;
	log::debug!("{config:?}");
	Ok(config)
}
