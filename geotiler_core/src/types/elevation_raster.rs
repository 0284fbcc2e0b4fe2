//! A regular grid of elevation samples anchored in Spherical Mercator space,
//! sampled with bilinear interpolation.
//!
//! Samples are stored row-major with the northernmost row first. Grid points
//! lie exactly on the raster edges, so a tile footprint of width `w` with `W`
//! samples per row has a spacing of `w / (W - 1)`.

use crate::{EastNorth, LonLat, SphericalMercator, TileCoord, TileError};
use anyhow::Result;
use std::fmt::{self, Debug};

/// Elevation samples as decoded from an image, not yet placed on the map.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRaster {
	pub width: usize,
	pub height: usize,
	/// Row-major, top row first.
	pub elevations: Vec<f64>,
}

impl RawRaster {
	pub fn new(width: usize, height: usize, elevations: Vec<f64>) -> Result<RawRaster> {
		invariant(elevations.len() == width * height, || {
			format!(
				"{width}x{height} raster needs {} elevations, got {}",
				width * height,
				elevations.len()
			)
		})?;
		Ok(RawRaster {
			width,
			height,
			elevations,
		})
	}

	/// Stretch the samples over the footprint of `coord`.
	pub fn anchor(self, coord: &TileCoord) -> Result<ElevationRaster> {
		let (bottom_left, top_right) = coord.bbox_meters();
		ElevationRaster::from_footprint(self.elevations, self.width, self.height, bottom_left, top_right)
	}
}

/// Elevation grid of one DEM tile. Immutable once built.
#[derive(Clone, PartialEq)]
pub struct ElevationRaster {
	origin: EastNorth,
	samples_wide: usize,
	samples_high: usize,
	x_spacing: f64,
	y_spacing: f64,
	elevations: Vec<f64>,
}

fn invariant(ok: bool, reason: impl FnOnce() -> String) -> Result<()> {
	if ok {
		Ok(())
	} else {
		Err(TileError::decode(reason()).into())
	}
}

impl ElevationRaster {
	/// Build a raster from its samples (top row first), bottom-left `origin`
	/// and grid spacing in projected meters.
	pub fn new(
		elevations: Vec<f64>,
		origin: EastNorth,
		samples_wide: usize,
		samples_high: usize,
		x_spacing: f64,
		y_spacing: f64,
	) -> Result<ElevationRaster> {
		invariant(samples_wide >= 2 && samples_high >= 2, || {
			format!("raster needs at least 2x2 samples, got {samples_wide}x{samples_high}")
		})?;
		invariant(elevations.len() == samples_wide * samples_high, || {
			format!(
				"raster of {samples_wide}x{samples_high} samples needs {} elevations, got {}",
				samples_wide * samples_high,
				elevations.len()
			)
		})?;
		invariant(
			x_spacing.is_finite() && x_spacing > 0.0 && y_spacing.is_finite() && y_spacing > 0.0,
			|| format!("raster spacing must be positive, got ({x_spacing}, {y_spacing})"),
		)?;
		invariant(origin.is_finite(), || format!("raster origin {origin:?} is not finite"))?;

		Ok(ElevationRaster {
			origin,
			samples_wide,
			samples_high,
			x_spacing,
			y_spacing,
			elevations,
		})
	}

	/// Build a raster whose samples span the footprint `bottom_left..top_right`
	/// edge to edge.
	pub fn from_footprint(
		elevations: Vec<f64>,
		samples_wide: usize,
		samples_high: usize,
		bottom_left: EastNorth,
		top_right: EastNorth,
	) -> Result<ElevationRaster> {
		invariant(samples_wide >= 2 && samples_high >= 2, || {
			format!("raster needs at least 2x2 samples, got {samples_wide}x{samples_high}")
		})?;
		let x_spacing = (top_right.e - bottom_left.e) / (samples_wide - 1) as f64;
		let y_spacing = (top_right.n - bottom_left.n) / (samples_high - 1) as f64;
		ElevationRaster::new(elevations, bottom_left, samples_wide, samples_high, x_spacing, y_spacing)
	}

	/// Bilinearly interpolated elevation at the projected position `(e, n)`.
	///
	/// Returns `None` outside the raster. The valid area is half-open: the
	/// western and southern edges are inside, the eastern and northern edges
	/// are not. Points outside are never extrapolated from the nearest edge.
	#[must_use]
	pub fn sample(&self, e: f64, n: f64) -> Option<f64> {
		if !(e.is_finite() && n.is_finite()) {
			return None;
		}

		// Cell column from the west edge and cell row from the south edge.
		let col = ((e - self.origin.e) / self.x_spacing).floor();
		let row_from_bottom = ((n - self.origin.n) / self.y_spacing).floor();
		if col < 0.0
			|| row_from_bottom < 0.0
			|| col >= (self.samples_wide - 1) as f64
			|| row_from_bottom >= (self.samples_high - 1) as f64
		{
			return None;
		}

		let w = self.samples_wide;
		let x_idx = col as usize;
		// Storage is top row first: the cell's upper row.
		let y_idx = self.samples_high - 2 - row_from_bottom as usize;

		let i = y_idx * w + x_idx;
		let h1 = self.elevations[i];
		let h2 = self.elevations[i + 1];
		let h3 = self.elevations[i + w];
		let h4 = self.elevations[i + w + 1];

		let x1 = self.origin.e + col * self.x_spacing;
		let y2 = self.origin.n + row_from_bottom * self.y_spacing;

		let prop_x = (e - x1) / self.x_spacing;
		let top = h1 * (1.0 - prop_x) + h2 * prop_x;
		let bottom = h3 * (1.0 - prop_x) + h4 * prop_x;

		let prop_y = (n - y2) / self.y_spacing;
		Some(bottom * (1.0 - prop_y) + top * prop_y)
	}

	#[must_use]
	pub fn sample_at(&self, pos: &EastNorth) -> Option<f64> {
		self.sample(pos.e, pos.n)
	}

	#[must_use]
	pub fn sample_lon_lat(&self, lon_lat: &LonLat) -> Option<f64> {
		self.sample_at(&SphericalMercator.project(lon_lat))
	}

	/// Bottom-left corner.
	#[must_use]
	pub fn origin(&self) -> EastNorth {
		self.origin
	}

	/// Top-right corner, the position of the last sample of the first row.
	#[must_use]
	pub fn top_right(&self) -> EastNorth {
		self.origin
			+ EastNorth::new(
				self.x_spacing * (self.samples_wide - 1) as f64,
				self.y_spacing * (self.samples_high - 1) as f64,
			)
	}

	/// `(samples_wide, samples_high)`
	#[must_use]
	pub fn dimensions(&self) -> (usize, usize) {
		(self.samples_wide, self.samples_high)
	}

	/// `(x_spacing, y_spacing)` in projected meters.
	#[must_use]
	pub fn spacing(&self) -> (f64, f64) {
		(self.x_spacing, self.y_spacing)
	}

	#[must_use]
	pub fn elevations(&self) -> &[f64] {
		&self.elevations
	}

	/// Smallest and largest stored elevation.
	#[must_use]
	pub fn min_max(&self) -> (f64, f64) {
		self.elevations
			.iter()
			.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
	}
}

impl Debug for ElevationRaster {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ElevationRaster")
			.field("origin", &self.origin)
			.field("samples", &(self.samples_wide, self.samples_high))
			.field("spacing", &(self.x_spacing, self.y_spacing))
			.finish()
	}
}
