//! Plain coordinate values: geographic [`LonLat`] and projected [`EastNorth`].

use std::{
	fmt::{self, Debug, Display},
	ops::{Add, Sub},
};

/// A WGS84 longitude/latitude pair in degrees.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct LonLat {
	pub lon: f64,
	pub lat: f64,
}

impl LonLat {
	#[must_use]
	pub const fn new(lon: f64, lat: f64) -> Self {
		Self { lon, lat }
	}
}

impl From<[f64; 2]> for LonLat {
	fn from([lon, lat]: [f64; 2]) -> Self {
		Self { lon, lat }
	}
}

impl Debug for LonLat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "LonLat({}, {})", self.lon, self.lat)
	}
}

impl Display for LonLat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}, {}", self.lon, self.lat)
	}
}

/// A Spherical Mercator position: easting and northing in projected meters.
///
/// Valid positions lie within `±HALF_WORLD_SIZE` on both axes.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct EastNorth {
	pub e: f64,
	pub n: f64,
}

impl EastNorth {
	#[must_use]
	pub const fn new(e: f64, n: f64) -> Self {
		Self { e, n }
	}

	#[must_use]
	pub fn is_finite(&self) -> bool {
		self.e.is_finite() && self.n.is_finite()
	}
}

impl Add for EastNorth {
	type Output = EastNorth;
	fn add(self, rhs: EastNorth) -> EastNorth {
		EastNorth::new(self.e + rhs.e, self.n + rhs.n)
	}
}

impl Sub for EastNorth {
	type Output = EastNorth;
	fn sub(self, rhs: EastNorth) -> EastNorth {
		EastNorth::new(self.e - rhs.e, self.n - rhs.n)
	}
}

impl Debug for EastNorth {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "EastNorth({}, {})", self.e, self.n)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn arithmetic() {
		let a = EastNorth::new(10.0, 20.0);
		let b = EastNorth::new(1.5, -2.0);
		assert_eq!(a + b, EastNorth::new(11.5, 18.0));
		assert_eq!(a - b, EastNorth::new(8.5, 22.0));
	}

	#[test]
	fn formatting() {
		assert_eq!(format!("{:?}", LonLat::new(-0.72, 51.05)), "LonLat(-0.72, 51.05)");
		assert_eq!(format!("{}", LonLat::from([1.0, 2.5])), "1, 2.5");
		assert_eq!(format!("{:?}", EastNorth::new(3.0, 4.0)), "EastNorth(3, 4)");
	}

	#[test]
	fn finiteness() {
		assert!(EastNorth::new(0.0, 0.0).is_finite());
		assert!(!EastNorth::new(f64::NAN, 0.0).is_finite());
		assert!(!EastNorth::new(0.0, f64::INFINITY).is_finite());
	}
}
