//! Spherical Mercator (EPSG:3857) forward and inverse projection, and
//! mapping of projected positions to XYZ tiles.
//!
//! ```
//! use geotiler_core::{LonLat, SphericalMercator};
//!
//! let merc = SphericalMercator;
//! let p = merc.project(&LonLat::new(-0.72, 51.05));
//! let back = merc.unproject(&p);
//! assert!((back.lat - 51.05).abs() < 1e-9);
//!
//! let tile = merc.tile_at(&p, 13).unwrap();
//! assert_eq!(tile.key(), "13/4079/2740");
//! ```

use crate::{EastNorth, HALF_WORLD_SIZE, LonLat, MAX_LEVEL, TileCoord, WORLD_SIZE};
use anyhow::{Result, ensure};
use geotiler_derive::context;
use std::f64::consts::PI;

/// The Spherical Mercator projection. Stateless.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SphericalMercator;

impl SphericalMercator {
	/// Projection identifier.
	#[must_use]
	pub fn id(&self) -> &'static str {
		"EPSG:3857"
	}

	/// Project longitude/latitude in degrees to projected meters.
	#[must_use]
	pub fn project(&self, lon_lat: &LonLat) -> EastNorth {
		let e = lon_lat.lon / 180.0 * HALF_WORLD_SIZE;
		let n = ((90.0 + lon_lat.lat) * PI / 360.0).tan().ln() / (PI / 180.0);
		EastNorth::new(e, n * HALF_WORLD_SIZE / 180.0)
	}

	/// Inverse of [`project`](Self::project). Exact up to floating point error
	/// for latitudes strictly between the poles.
	#[must_use]
	pub fn unproject(&self, pos: &EastNorth) -> LonLat {
		let lon = pos.e / HALF_WORLD_SIZE * 180.0;
		let lat = pos.n / HALF_WORLD_SIZE * 180.0;
		let lat = 180.0 / PI * (2.0 * (lat * PI / 180.0).exp().atan() - PI / 2.0);
		LonLat::new(lon, lat)
	}

	/// The tile containing `pos` at zoom `level`.
	///
	/// Positions beyond the edge of the projected world are clamped into the
	/// outermost row or column.
	#[context("locating the tile of {pos:?} at level {level}")]
	pub fn tile_at(&self, pos: &EastNorth, level: u8) -> Result<TileCoord> {
		ensure!(level <= MAX_LEVEL, "level ({level}) must be <= {MAX_LEVEL}");
		ensure!(pos.is_finite(), "position is not finite");

		let tiles = 2f64.powi(i32::from(level));
		let tile_size = WORLD_SIZE / tiles;
		let x = ((HALF_WORLD_SIZE + pos.e) / tile_size).floor().clamp(0.0, tiles - 1.0);
		let y = ((HALF_WORLD_SIZE - pos.n) / tile_size).floor().clamp(0.0, tiles - 1.0);

		TileCoord::new(level, x as u32, y as u32)
	}

	/// Shorthand for `tile_at(&project(lon_lat), level)`.
	pub fn tile_at_lon_lat(&self, lon_lat: &LonLat, level: u8) -> Result<TileCoord> {
		self.tile_at(&self.project(lon_lat), level)
	}
}
