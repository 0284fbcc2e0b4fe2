//! Writes elevations from DEM tiles into the coordinates of GeoJSON data tiles.
//!
//! Both tile sources are updated with the same position. Every data tile
//! fetched by an update is paired with an elevation raster, and each
//! qualifying coordinate gets the sampled elevation as its third value.

use crate::{ElevationFormat, ElevationTileSource, JsonFormat, JsonTileSource};
use anyhow::Result;
use geotiler_core::{
	CachedTile, EastNorth, ElevationRaster, LonLat, SphericalMercator, TileCoord, TileError, TileFetcher, UrlTemplate,
};
use geotiler_geometry::{FeatureCollection, Geometry, Position};
use geotiler_derive::context;
use serde::Deserialize;
use std::sync::Arc;

/// How new data tiles find their elevation raster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingMode {
	/// Use the cached raster with the same tile address. A data tile without
	/// one is an error.
	#[default]
	ByCoord,
	/// Pair the n-th newly fetched raster with the n-th newly fetched data
	/// tile. Data tiles left over are returned without elevations.
	ByIndex,
}

pub struct ElevationInjector {
	elevation: ElevationTileSource,
	data: JsonTileSource<FeatureCollection>,
	pairing: PairingMode,
}

impl ElevationInjector {
	pub fn new(elevation: ElevationTileSource, data: JsonTileSource<FeatureCollection>) -> Self {
		Self {
			elevation,
			data,
			pairing: PairingMode::default(),
		}
	}

	/// Both sources sharing one fetcher.
	pub fn from_templates(elevation: UrlTemplate, data: UrlTemplate, fetcher: Arc<dyn TileFetcher>) -> Self {
		Self::new(
			ElevationFormat::tile_source(elevation, fetcher.clone()),
			JsonFormat::tile_source(data, fetcher),
		)
	}

	#[must_use]
	pub fn with_pairing(mut self, pairing: PairingMode) -> Self {
		self.pairing = pairing;
		self
	}

	/// Update both sources at `lon_lat` and return the newly fetched data
	/// tiles with elevations applied.
	///
	/// The annotated collections also stay in the data source's cache.
	#[context("updating elevations at {lon_lat:?}")]
	pub async fn update_at_lon_lat(&mut self, lon_lat: &LonLat) -> Result<Vec<CachedTile<FeatureCollection>>> {
		let pos = SphericalMercator.project(lon_lat);
		self.update_at_position(&pos).await
	}

	pub async fn update_at_position(&mut self, pos: &EastNorth) -> Result<Vec<CachedTile<FeatureCollection>>> {
		let new_rasters: Vec<TileCoord> = self
			.elevation
			.update_at_position(pos)
			.await?
			.iter()
			.map(|tile| tile.coord)
			.collect();
		let new_data: Vec<TileCoord> = self
			.data
			.update_at_position(pos)
			.await?
			.iter()
			.map(|tile| tile.coord)
			.collect();

		let pairs: Vec<(TileCoord, TileCoord)> = match self.pairing {
			PairingMode::ByCoord => new_data
				.iter()
				.map(|coord| match self.elevation.tile(coord) {
					Some(_) => Ok((*coord, *coord)),
					None => Err(TileError::Inconsistent { coord: *coord }),
				})
				.collect::<Result<_, _>>()?,
			PairingMode::ByIndex => {
				if new_rasters.len() != new_data.len() {
					log::warn!(
						"{} new elevation tiles but {} new data tiles, leaving {} data tiles without elevation",
						new_rasters.len(),
						new_data.len(),
						new_data.len().saturating_sub(new_rasters.len())
					);
				}
				new_rasters.iter().copied().zip(new_data.iter().copied()).collect()
			}
		};

		for (raster_coord, data_coord) in pairs {
			let (Some(raster), Some(data)) = (self.elevation.tile(&raster_coord), self.data.tile_mut(&data_coord)) else {
				continue;
			};
			let count = Self::inject(&raster.payload, &mut data.payload);
			log::debug!("added {count} elevations to data tile {data_coord:?} from {raster_coord:?}");
		}

		Ok(new_data
			.iter()
			.filter_map(|coord| self.data.tile(coord))
			.cloned()
			.collect())
	}

	/// Set index 2 of every position of LineStrings (with at least two
	/// positions) and Points that the raster covers. Other geometries are left
	/// alone. Returns the number of positions written.
	pub fn inject(raster: &ElevationRaster, collection: &mut FeatureCollection) -> usize {
		let mut count = 0;
		for feature in &mut collection.features {
			match &mut feature.geometry {
				Some(Geometry::LineString { coordinates }) if coordinates.len() >= 2 => {
					for position in coordinates {
						count += usize::from(apply(raster, position));
					}
				}
				Some(Geometry::Point { coordinates }) => {
					count += usize::from(apply(raster, coordinates));
				}
				_ => {}
			}
		}
		count
	}

	/// Change the level of both sources.
	pub fn set_level(&mut self, level: u8) -> Result<()> {
		self.elevation.set_level(level)?;
		self.data.set_level(level)
	}

	#[must_use]
	pub fn elevation_source(&self) -> &ElevationTileSource {
		&self.elevation
	}

	#[must_use]
	pub fn data_source(&self) -> &JsonTileSource<FeatureCollection> {
		&self.data
	}

	pub fn elevation_source_mut(&mut self) -> &mut ElevationTileSource {
		&mut self.elevation
	}

	pub fn data_source_mut(&mut self) -> &mut JsonTileSource<FeatureCollection> {
		&mut self.data
	}

	#[must_use]
	pub fn pairing(&self) -> PairingMode {
		self.pairing
	}
}

fn apply(raster: &ElevationRaster, position: &mut Position) -> bool {
	let pos = SphericalMercator.project(&LonLat::new(position.lon(), position.lat()));
	match raster.sample_at(&pos) {
		Some(elevation) => {
			position.set_elevation(elevation);
			true
		}
		None => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{DATA_TEMPLATE, DEM_TEMPLATE, data_url, dem_url, feature_collection, terrarium_png};
	use geotiler_core::{MockFetcher, RawRaster};
	use pretty_assertions::assert_eq;

	const HERE: LonLat = LonLat::new(-0.72, 51.05);

	/// Level 2 tile pyramid: DEM tiles are flat at `100 * x + 10 * y`, every
	/// data tile holds a LineString and a Point in the middle of its tile
	/// plus a Polygon.
	fn fetcher() -> Arc<MockFetcher> {
		let fetcher = MockFetcher::new();
		for x in 0..4u32 {
			for y in 0..4u32 {
				fetcher.insert(&dem_url(2, x, y), terrarium_png(3, 3, f64::from(100 * x + 10 * y)));
				fetcher.insert(&data_url(2, x, y), data_tile(x, y));
			}
		}
		Arc::new(fetcher)
	}

	fn tile_center(x: u32, y: u32) -> LonLat {
		let (bl, tr) = TileCoord::new(2, x, y).unwrap().bbox_meters();
		SphericalMercator.unproject(&EastNorth::new((bl.e + tr.e) / 2.0, (bl.n + tr.n) / 2.0))
	}

	fn data_tile(x: u32, y: u32) -> geotiler_core::Blob {
		let c = tile_center(x, y);
		let (lon, lat) = (c.lon, c.lat);
		feature_collection(&[
			&format!(r#"{{"type":"LineString","coordinates":[[{lon},{lat}],[{},{lat}]]}}"#, lon + 1.0),
			&format!(r#"{{"type":"Point","coordinates":[{lon},{lat}]}}"#),
			&format!(
				r#"{{"type":"Polygon","coordinates":[[[{lon},{lat}],[{},{lat}],[{lon},{}],[{lon},{lat}]]]}}"#,
				lon + 1.0,
				lat + 1.0
			),
		])
	}

	fn injector(fetcher: &Arc<MockFetcher>) -> ElevationInjector {
		let mut injector = ElevationInjector::from_templates(
			UrlTemplate::new(DEM_TEMPLATE).unwrap(),
			UrlTemplate::new(DATA_TEMPLATE).unwrap(),
			fetcher.clone(),
		);
		injector.set_level(2).unwrap();
		injector
	}

	/// Elevations per feature, rounded to whole metres.
	fn elevations(collection: &FeatureCollection) -> Vec<Vec<Option<f64>>> {
		let rounded = |p: &Position| p.elevation().map(f64::round);
		collection
			.features
			.iter()
			.map(|f| match &f.geometry {
				Some(Geometry::LineString { coordinates }) => coordinates.iter().map(rounded).collect(),
				Some(Geometry::Point { coordinates }) => vec![rounded(coordinates)],
				Some(Geometry::Polygon { coordinates }) => coordinates[0].iter().map(rounded).collect(),
				_ => vec![],
			})
			.collect()
	}

	#[tokio::test]
	async fn annotates_new_data_tiles() {
		let fetcher = fetcher();
		let mut injector = injector(&fetcher);

		let tiles = injector.update_at_lon_lat(&HERE).await.unwrap();
		assert_eq!(tiles.len(), 9);
		assert_eq!(tiles[0].coord, TileCoord::new(2, 1, 1).unwrap());
		for tile in &tiles {
			let h = f64::from(100 * tile.coord.x + 10 * tile.coord.y);
			assert_eq!(
				elevations(&tile.payload),
				vec![vec![Some(h), Some(h)], vec![Some(h)], vec![None; 4]],
				"tile {:?}",
				tile.coord
			);
		}

		// the cached copies carry the elevations too
		let cached = injector.data_source().tile(&tiles[0].coord).unwrap();
		assert_eq!(cached.payload, tiles[0].payload);
	}

	#[tokio::test]
	async fn failed_update_names_the_position() {
		let mut injector = injector(&Arc::new(MockFetcher::new()));

		let err = injector.update_at_lon_lat(&HERE).await.unwrap_err();
		assert!(
			format!("{err:#}").starts_with("updating elevations at LonLat(-0.72, 51.05): loading tile 2/1/1"),
			"unexpected error: {err:#}"
		);
		assert!(matches!(TileError::find(&err), Some(TileError::Fetch { .. })));
		assert_eq!(injector.elevation_source().center(), None);
	}

	#[tokio::test]
	async fn same_tile_returns_nothing() {
		let fetcher = fetcher();
		let mut injector = injector(&fetcher);
		injector.update_at_lon_lat(&HERE).await.unwrap();
		assert!(injector.update_at_lon_lat(&HERE).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn by_coord_survives_diverging_caches() {
		let fetcher = fetcher();
		fetcher.remove(&data_url(2, 0, 0));
		let mut injector = injector(&fetcher);

		assert!(injector.update_at_lon_lat(&HERE).await.is_err());
		assert_eq!(injector.elevation_source().cached_count(), 9);
		assert_eq!(injector.data_source().cached_count(), 8);

		fetcher.insert(&data_url(2, 0, 0), data_tile(0, 0));
		let tiles = injector.update_at_lon_lat(&HERE).await.unwrap();
		assert_eq!(tiles.len(), 1);
		assert_eq!(tiles[0].coord, TileCoord::new(2, 0, 0).unwrap());
		assert_eq!(elevations(&tiles[0].payload)[1], vec![Some(0.0)]);
	}

	#[tokio::test]
	async fn by_index_pairs_positionally() {
		let fetcher = fetcher();
		fetcher.remove(&data_url(2, 0, 0));
		let mut injector = injector(&fetcher).with_pairing(PairingMode::ByIndex);
		assert!(injector.update_at_lon_lat(&HERE).await.is_err());

		// no new elevation tiles, so the late data tile stays bare
		fetcher.insert(&data_url(2, 0, 0), data_tile(0, 0));
		let tiles = injector.update_at_lon_lat(&HERE).await.unwrap();
		assert_eq!(tiles.len(), 1);
		assert_eq!(elevations(&tiles[0].payload)[1], vec![None]);
	}

	#[tokio::test]
	async fn missing_raster_is_inconsistent() {
		let fetcher = fetcher();
		let mut injector = injector(&fetcher);
		injector.data_source_mut().set_level(3).unwrap();
		for x in 0..8u32 {
			for y in 0..8u32 {
				fetcher.insert(&data_url(3, x, y), feature_collection(&[]));
			}
		}

		let err = injector.update_at_lon_lat(&HERE).await.unwrap_err();
		assert!(matches!(TileError::find(&err), Some(TileError::Inconsistent { .. })));
	}

	#[test]
	fn inject_is_idempotent_and_selective() {
		let raster = RawRaster::new(2, 2, vec![10.0, 20.0, 30.0, 40.0])
			.unwrap()
			.anchor(&TileCoord::new(0, 0, 0).unwrap())
			.unwrap();
		let json = feature_collection(&[
			r#"{"type":"LineString","coordinates":[[0,0],[10,10,999]]}"#,
			r#"{"type":"LineString","coordinates":[[0,0]]}"#,
			r#"{"type":"Point","coordinates":[0,0]}"#,
			r#"{"type":"MultiPoint","coordinates":[[0,0]]}"#,
			r#"{"type":"Point","coordinates":[180,0]}"#,
		]);
		let mut collection = FeatureCollection::from_slice(json.as_slice()).unwrap();

		assert_eq!(ElevationInjector::inject(&raster, &mut collection), 3);
		let first = collection.clone();
		assert_eq!(ElevationInjector::inject(&raster, &mut collection), 3);
		assert_eq!(collection, first);

		let ele = |i: usize| match &collection.features[i].geometry {
			Some(Geometry::LineString { coordinates }) => coordinates.iter().map(Position::elevation).collect(),
			Some(Geometry::Point { coordinates }) => vec![coordinates.elevation()],
			Some(Geometry::MultiPoint { coordinates }) => coordinates.iter().map(Position::elevation).collect(),
			_ => vec![],
		};
		assert_eq!(ele(0).len(), 2);
		assert!(ele(0).iter().all(|e| e.is_some_and(|h| (10.0..=40.0).contains(&h))));
		assert_ne!(ele(0)[1], Some(999.0));
		assert_eq!(ele(1), vec![None]);
		assert_eq!(ele(2), vec![Some(25.0)]);
		assert_eq!(ele(3), vec![None]);
		assert_eq!(ele(4), vec![None]);
	}
}
