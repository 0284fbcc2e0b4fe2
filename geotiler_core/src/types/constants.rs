//! Spherical Mercator (EPSG:3857) constants.

use std::f64::consts::PI;

/// WGS84 semi-major axis (equatorial radius) in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Width of the projected world in Spherical Mercator meters (`2 * PI * EARTH_RADIUS`).
pub const WORLD_SIZE: f64 = 2.0 * PI * EARTH_RADIUS;

/// Half of [`WORLD_SIZE`]. Projected coordinates lie within `±HALF_WORLD_SIZE`.
pub const HALF_WORLD_SIZE: f64 = PI * EARTH_RADIUS;

/// Largest latitude representable in Spherical Mercator, `atan(sinh(PI))` in degrees.
pub const MAX_LAT: f64 = 85.051_128_779_806_59;

/// Highest zoom level a [`TileCoord`](crate::TileCoord) can address.
pub const MAX_LEVEL: u8 = 31;

/// Zoom level a tile source starts with.
pub const DEFAULT_LEVEL: u8 = 13;
