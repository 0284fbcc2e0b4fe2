use anyhow::Result;
use clap::{Args, ValueEnum};
use geotiler::{ElevationFormat, JsonFormat, JsonTileSource, config::Config};
use geotiler_core::{HttpFetcher, LonLat};
use std::sync::Arc;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, allow_negative_numbers = true)]
pub struct Subcommand {
	/// longitude in degrees
	lon: f64,

	/// latitude in degrees
	lat: f64,

	/// which tiles to fetch
	#[arg(long, value_enum, default_value_t = Kind::Elevation)]
	kind: Kind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
	Elevation,
	Data,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand, config: &Config) -> Result<()> {
	let lon_lat = LonLat::new(arguments.lon, arguments.lat);
	let fetcher = Arc::new(HttpFetcher::with_timeout(config.timeout())?);
	log::info!("fetching {:?} tiles around {lon_lat:?} at level {}", arguments.kind, config.level);

	match arguments.kind {
		Kind::Elevation => {
			let mut source = ElevationFormat::tile_source(config.elevation.url_template()?, fetcher);
			source.set_level(config.level)?;
			source.update_at_lon_lat(&lon_lat).await?;
			for tile in source.current_tiles() {
				let (width, height) = tile.payload.dimensions();
				let (min, max) = tile.payload.min_max();
				println!("{}\t{width}x{height} samples, {min} to {max} m", tile.coord);
			}
		}
		Kind::Data => {
			let mut source: JsonTileSource<geotiler_geometry::FeatureCollection> =
				JsonFormat::tile_source(config.data.url_template()?, fetcher);
			source.set_level(config.level)?;
			source.update_at_lon_lat(&lon_lat).await?;
			for tile in source.current_tiles() {
				println!("{}\t{} features", tile.coord, tile.payload.len());
			}
		}
	}

	Ok(())
}
