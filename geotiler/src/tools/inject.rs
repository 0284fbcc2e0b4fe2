use anyhow::Result;
use clap::Args;
use geotiler::config::Config;
use geotiler_core::LonLat;
use serde_json::json;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, allow_negative_numbers = true)]
pub struct Subcommand {
	/// longitude in degrees
	lon: f64,

	/// latitude in degrees
	lat: f64,
}

/// Prints one JSON object per data tile: `{"tile": "z/x/y", "data": <FeatureCollection>}`.
#[tokio::main]
pub async fn run(arguments: &Subcommand, config: &Config) -> Result<()> {
	let lon_lat = LonLat::new(arguments.lon, arguments.lat);
	let mut injector = config.injector()?;

	let tiles = injector.update_at_lon_lat(&lon_lat).await?;
	log::info!("annotated {} data tiles around {lon_lat:?}", tiles.len());
	for tile in tiles {
		println!("{}", json!({ "tile": tile.coord.key(), "data": tile.payload }));
	}
	Ok(())
}
