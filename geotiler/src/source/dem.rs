use anyhow::Result;
use geotiler_core::{
	Blob, EastNorth, ElevationRaster, LonLat, RawRaster, SphericalMercator, TileCoord, TileFetcher, TileFormat,
	TileSource, UrlTemplate,
};
use geotiler_derive::context;
use geotiler_image::decode_terrarium_png;
use std::sync::Arc;

/// Terrarium-coded PNG tiles, cached as [`ElevationRaster`]s covering their
/// tile footprint.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElevationFormat;

impl TileFormat for ElevationFormat {
	type Raw = RawRaster;
	type Payload = ElevationRaster;

	fn decode_raw(&self, blob: Blob) -> Result<RawRaster> {
		decode_terrarium_png(&blob)
	}

	#[context("placing elevation tile {coord}")]
	fn decode_and_store(&self, coord: &TileCoord, raw: RawRaster) -> Result<ElevationRaster> {
		raw.anchor(coord)
	}
}

pub type ElevationTileSource = TileSource<ElevationFormat>;

impl ElevationFormat {
	pub fn tile_source(url_template: UrlTemplate, fetcher: Arc<dyn TileFetcher>) -> ElevationTileSource {
		TileSource::new(ElevationFormat, url_template, fetcher)
	}
}

/// Elevation queries against the cached rasters of an [`ElevationTileSource`].
pub trait ElevationLookup {
	/// Elevation in metres at a projected position, if a cached raster covers it.
	fn elevation_at(&self, pos: &EastNorth) -> Option<f64>;

	fn elevation_at_lon_lat(&self, lon_lat: &LonLat) -> Option<f64> {
		self.elevation_at(&SphericalMercator.project(lon_lat))
	}
}

impl ElevationLookup for ElevationTileSource {
	fn elevation_at(&self, pos: &EastNorth) -> Option<f64> {
		// Points on a tile's north or east edge fall outside its raster but
		// inside the neighbor's.
		self.tile_at_position(pos)
			.and_then(|tile| tile.payload.sample_at(pos))
			.or_else(|| {
				self.current_tiles()
					.into_iter()
					.find_map(|tile| tile.payload.sample_at(pos))
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{DEM_TEMPLATE, dem_url, terrarium_png};
	use approx::assert_relative_eq;
	use geotiler_core::{MockFetcher, TileError};

	/// Level 2 tiles whose elevation is `100 * x + 10 * y` everywhere.
	fn fetcher() -> Arc<MockFetcher> {
		let fetcher = MockFetcher::new();
		for x in 0..4 {
			for y in 0..4 {
				fetcher.insert(&dem_url(2, x, y), terrarium_png(3, 3, f64::from(100 * x + 10 * y)));
			}
		}
		Arc::new(fetcher)
	}

	fn source(fetcher: &Arc<MockFetcher>) -> ElevationTileSource {
		let mut source = ElevationFormat::tile_source(UrlTemplate::new(DEM_TEMPLATE).unwrap(), fetcher.clone());
		source.set_level(2).unwrap();
		source
	}

	#[tokio::test]
	async fn rasters_cover_their_tiles() {
		let fetcher = fetcher();
		let mut source = source(&fetcher);
		let tiles = source.update_at_position(&EastNorth::new(-1.0, 1.0)).await.unwrap();
		assert_eq!(tiles.len(), 9);

		let tile = tiles[0];
		assert_eq!(tile.coord, TileCoord::new(2, 1, 1).unwrap());
		let (bl, _) = tile.coord.bbox_meters();
		assert_eq!(tile.payload.origin(), bl);
		assert_eq!(tile.payload.dimensions(), (3, 3));
	}

	#[tokio::test]
	async fn elevation_lookup() {
		let fetcher = fetcher();
		let mut source = source(&fetcher);
		assert_eq!(source.elevation_at(&EastNorth::new(-1.0, 1.0)), None);

		source.update_at_lon_lat(&LonLat::new(-0.72, 51.05)).await.unwrap();
		assert_relative_eq!(source.elevation_at_lon_lat(&LonLat::new(-0.72, 51.05)).unwrap(), 110.0);
		assert_relative_eq!(source.elevation_at_lon_lat(&LonLat::new(10.0, 51.05)).unwrap(), 210.0);
		// tile 2/3/3 is not part of the neighborhood of 2/1/1
		assert_eq!(source.elevation_at_lon_lat(&LonLat::new(170.0, -80.0)), None);
	}

	#[tokio::test]
	async fn tile_edges_use_the_neighbor() {
		let fetcher = fetcher();
		let mut source = source(&fetcher);
		source.update_at_position(&EastNorth::new(-1.0, 1.0)).await.unwrap();

		// northern edge of tile 2/1/1 is the southern edge of 2/1/0
		let (_, tr) = TileCoord::new(2, 1, 1).unwrap().bbox_meters();
		let edge = EastNorth::new(tr.e - 1000.0, tr.n);
		assert_relative_eq!(source.elevation_at(&edge).unwrap(), 100.0);
	}

	#[tokio::test]
	async fn broken_png_is_decode_error() {
		let fetcher = fetcher();
		fetcher.insert(&dem_url(2, 0, 0), "not a png");
		let mut source = source(&fetcher);
		let err = source.update_at_position(&EastNorth::new(-1.0, 1.0)).await.unwrap_err();
		assert!(matches!(TileError::find(&err), Some(TileError::Decode { .. })));
		assert_eq!(source.cached_count(), 8);
	}
}
