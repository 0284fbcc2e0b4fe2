use super::{CachedTile, TileFormat};
use crate::{DEFAULT_LEVEL, EastNorth, LonLat, MAX_LEVEL, SphericalMercator, TileCoord, UrlTemplate, io::TileFetcher};
use anyhow::{Context, Result, ensure};
use futures::future::join_all;
use std::{collections::HashMap, fmt, sync::Arc};

/// Keeps the tiles around the last queried position cached.
///
/// Each update computes the tile containing the query position at the current
/// level and makes sure that tile and its eight neighbors are cached. Cached
/// tiles are never evicted, and changing the level keeps them.
pub struct TileSource<F: TileFormat> {
	format: F,
	url_template: UrlTemplate,
	fetcher: Arc<dyn TileFetcher>,
	level: u8,
	center: Option<TileCoord>,
	cache: HashMap<TileCoord, CachedTile<F::Payload>>,
}

impl<F: TileFormat> TileSource<F> {
	pub fn new(format: F, url_template: UrlTemplate, fetcher: Arc<dyn TileFetcher>) -> Self {
		Self {
			format,
			url_template,
			fetcher,
			level: DEFAULT_LEVEL,
			center: None,
			cache: HashMap::new(),
		}
	}

	/// Bring the neighborhood of `pos` into the cache.
	///
	/// Returns the tiles cached by this call in neighborhood order. If the
	/// position lies in the same tile as the previous successful update,
	/// nothing is fetched and the result is empty.
	///
	/// Tiles are fetched concurrently. When any of them fails, the others are
	/// still cached, the first error is returned and the center is left
	/// unchanged, so the next update at the same position retries the
	/// missing tiles.
	pub async fn update_at_position(&mut self, pos: &EastNorth) -> Result<Vec<&CachedTile<F::Payload>>> {
		let center = SphericalMercator.tile_at(pos, self.level)?;
		if self.center == Some(center) {
			log::trace!("{pos:?} is still in tile {center:?}");
			return Ok(Vec::new());
		}

		let missing: Vec<TileCoord> = center
			.neighborhood()
			.into_iter()
			.filter(|coord| !self.cache.contains_key(coord))
			.collect();
		log::debug!("moving to tile {center:?}, fetching {} tiles", missing.len());

		let format = &self.format;
		let fetcher = self.fetcher.as_ref();
		let template = &self.url_template;
		let results = join_all(missing.iter().map(|coord| async move {
			let url = template.resolve(coord);
			log::debug!("fetching tile {coord:?} from '{url}'");
			let raw = format.fetch_and_decode(fetcher, &url).await?;
			format.decode_and_store(coord, raw)
		}))
		.await;

		let mut added = Vec::with_capacity(missing.len());
		let mut first_error = None;
		for (coord, result) in missing.into_iter().zip(results) {
			match result {
				Ok(payload) => {
					self.cache.insert(coord, CachedTile::new(coord, payload));
					added.push(coord);
				}
				Err(err) => {
					log::debug!("tile {coord:?} failed: {err:#}");
					if first_error.is_none() {
						first_error = Some(err.context(format!("loading tile {coord}")));
					}
				}
			}
		}

		if let Some(err) = first_error {
			return Err(err);
		}

		self.center = Some(center);
		Ok(added.iter().filter_map(|coord| self.cache.get(coord)).collect())
	}

	/// Project `lon_lat` and call [`update_at_position`](Self::update_at_position).
	pub async fn update_at_lon_lat(&mut self, lon_lat: &LonLat) -> Result<Vec<&CachedTile<F::Payload>>> {
		let pos = SphericalMercator.project(lon_lat);
		self.update_at_position(&pos)
			.await
			.with_context(|| format!("updating tiles at {lon_lat:?}"))
	}

	/// Update at `pos` and return the tile containing it.
	pub async fn data_at_position(&mut self, pos: &EastNorth) -> Result<&CachedTile<F::Payload>> {
		self.update_at_position(pos).await?;
		self.tile_at_position(pos)
			.with_context(|| format!("no cached tile at {pos:?}"))
	}

	pub async fn data_at_lon_lat(&mut self, lon_lat: &LonLat) -> Result<&CachedTile<F::Payload>> {
		let pos = SphericalMercator.project(lon_lat);
		self.data_at_position(&pos).await
	}

	/// Cached tiles of the current center's neighborhood, in neighborhood order.
	#[must_use]
	pub fn current_tiles(&self) -> Vec<&CachedTile<F::Payload>> {
		self.center.map_or_else(Vec::new, |center| {
			center
				.neighborhood()
				.iter()
				.filter_map(|coord| self.cache.get(coord))
				.collect()
		})
	}

	/// Change the level used by subsequent updates. The cache is kept.
	pub fn set_level(&mut self, level: u8) -> Result<()> {
		ensure!(level <= MAX_LEVEL, "level ({level}) must be <= {MAX_LEVEL}");
		self.level = level;
		Ok(())
	}

	#[must_use]
	pub fn tile(&self, coord: &TileCoord) -> Option<&CachedTile<F::Payload>> {
		self.cache.get(coord)
	}

	pub fn tile_mut(&mut self, coord: &TileCoord) -> Option<&mut CachedTile<F::Payload>> {
		self.cache.get_mut(coord)
	}

	/// The cached tile containing `pos` at the current level, if any.
	#[must_use]
	pub fn tile_at_position(&self, pos: &EastNorth) -> Option<&CachedTile<F::Payload>> {
		let coord = SphericalMercator.tile_at(pos, self.level).ok()?;
		self.cache.get(&coord)
	}

	#[must_use]
	pub fn cached_count(&self) -> usize {
		self.cache.len()
	}

	/// Tile of the last successful update.
	#[must_use]
	pub fn center(&self) -> Option<TileCoord> {
		self.center
	}

	#[must_use]
	pub fn level(&self) -> u8 {
		self.level
	}

	#[must_use]
	pub fn url_template(&self) -> &UrlTemplate {
		&self.url_template
	}

	#[must_use]
	pub fn format(&self) -> &F {
		&self.format
	}
}

impl<F: TileFormat> fmt::Debug for TileSource<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TileSource")
			.field("url_template", &self.url_template.as_str())
			.field("level", &self.level)
			.field("center", &self.center)
			.field("cached", &self.cache.len())
			.finish()
	}
}
