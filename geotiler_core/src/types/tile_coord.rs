//! XYZ tile coordinates in the Spherical Mercator tile pyramid.
//!
//! A [`TileCoord`] addresses one tile by zoom `level`, column `x` (growing
//! eastward) and row `y` (growing southward). Its canonical key is
//! `"{z}/{x}/{y}"`, the same path used by slippy-map tile servers.
//!
//! ```
//! use geotiler_core::TileCoord;
//!
//! let coord = TileCoord::new(13, 5, 7).unwrap();
//! assert_eq!(coord.key(), "13/5/7");
//!
//! let (bottom_left, top_right) = coord.bbox_meters();
//! assert!(bottom_left.e < top_right.e && bottom_left.n < top_right.n);
//! ```

use crate::{EastNorth, HALF_WORLD_SIZE, MAX_LEVEL, WORLD_SIZE};
use anyhow::{Result, ensure};
use std::fmt::{self, Debug, Display};

/// A tile address: zoom level plus column and row indices.
#[derive(Eq, PartialEq, Clone, Copy, Hash)]
pub struct TileCoord {
	/// Zoom level (`z`).
	pub level: u8,
	/// Column, `0` at 180°W.
	pub x: u32,
	/// Row, `0` at the northern edge of the projection.
	pub y: u32,
}

impl TileCoord {
	/// Create a tile coordinate, checking `level <= 31` and `x, y < 2^level`.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(level <= MAX_LEVEL, "level ({level}) must be <= {MAX_LEVEL}");
		let max = 1u64 << level;
		ensure!(u64::from(x) < max, "x ({x}) out of bounds for level {level}");
		ensure!(u64::from(y) < max, "y ({y}) out of bounds for level {level}");
		Ok(TileCoord { level, x, y })
	}

	/// Largest valid x or y index at this level, `2^level - 1`.
	#[must_use]
	pub fn max_value(&self) -> u32 {
		((1u64 << self.level) - 1) as u32
	}

	/// Edge length of a tile at this level in projected meters.
	#[must_use]
	pub fn tile_size_meters(&self) -> f64 {
		WORLD_SIZE / 2f64.powi(i32::from(self.level))
	}

	/// Spherical Mercator footprint of the tile as `(bottom_left, top_right)`.
	#[must_use]
	pub fn bbox_meters(&self) -> (EastNorth, EastNorth) {
		let size = self.tile_size_meters();
		let bottom_left = EastNorth::new(
			f64::from(self.x) * size - HALF_WORLD_SIZE,
			HALF_WORLD_SIZE - (f64::from(self.y) + 1.0) * size,
		);
		(bottom_left, bottom_left + EastNorth::new(size, size))
	}

	/// Cache key and URL path of the tile: `"{z}/{x}/{y}"`.
	#[must_use]
	pub fn key(&self) -> String {
		self.to_string()
	}

	/// The 3×3 block of tiles centered on this one.
	///
	/// Columns are visited in the order `x, x-1, x+1` and, within each column,
	/// rows in the order `y, y-1, y+1`, so the center tile always comes first.
	/// Neighbors falling outside the tile grid of this level are left out.
	#[must_use]
	pub fn neighborhood(&self) -> Vec<TileCoord> {
		let max = i64::from(self.max_value());
		let (x, y) = (i64::from(self.x), i64::from(self.y));

		let mut coords = Vec::with_capacity(9);
		for nx in [x, x - 1, x + 1] {
			for ny in [y, y - 1, y + 1] {
				if (0..=max).contains(&nx) && (0..=max).contains(&ny) {
					coords.push(TileCoord {
						level: self.level,
						x: nx as u32,
						y: ny as u32,
					});
				}
			}
		}
		coords
	}
}

impl Display for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}/{}", self.level, self.x, self.y)
	}
}

/// Debug format `TileCoord(z, [x, y])`.
impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileCoord({}, [{}, {}])", self.level, self.x, self.y)
	}
}
