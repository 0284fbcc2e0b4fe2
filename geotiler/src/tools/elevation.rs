use anyhow::{Result, bail};
use clap::Args;
use geotiler::{ElevationFormat, ElevationLookup, config::Config};
use geotiler_core::{HttpFetcher, LonLat};
use std::sync::Arc;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, allow_negative_numbers = true)]
pub struct Subcommand {
	/// longitude in degrees
	lon: f64,

	/// latitude in degrees
	lat: f64,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand, config: &Config) -> Result<()> {
	let lon_lat = LonLat::new(arguments.lon, arguments.lat);
	let fetcher = Arc::new(HttpFetcher::with_timeout(config.timeout())?);
	let mut source = ElevationFormat::tile_source(config.elevation.url_template()?, fetcher);
	source.set_level(config.level)?;

	source.update_at_lon_lat(&lon_lat).await?;
	match source.elevation_at_lon_lat(&lon_lat) {
		Some(elevation) => println!("{elevation:.1}"),
		None => bail!("no elevation available at {lon_lat:?}"),
	}
	Ok(())
}
