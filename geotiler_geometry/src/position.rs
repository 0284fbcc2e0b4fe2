use anyhow::{Error, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// A GeoJSON position: longitude, latitude and an optional elevation,
/// followed by any further values the source provided.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Position(Vec<f64>);

impl Position {
	#[must_use]
	pub fn new(lon: f64, lat: f64) -> Self {
		Self(vec![lon, lat])
	}

	#[must_use]
	pub fn lon(&self) -> f64 {
		self.0[0]
	}

	#[must_use]
	pub fn lat(&self) -> f64 {
		self.0[1]
	}

	#[must_use]
	pub fn elevation(&self) -> Option<f64> {
		self.0.get(2).copied()
	}

	/// Store `elevation` as the third value, replacing an existing one.
	pub fn set_elevation(&mut self, elevation: f64) {
		if self.0.len() > 2 {
			self.0[2] = elevation;
		} else {
			self.0.push(elevation);
		}
	}

	#[must_use]
	pub fn as_slice(&self) -> &[f64] {
		&self.0
	}
}

impl TryFrom<Vec<f64>> for Position {
	type Error = Error;

	fn try_from(values: Vec<f64>) -> Result<Self> {
		ensure!(
			values.len() >= 2,
			"a position needs at least longitude and latitude, got {values:?}"
		);
		Ok(Self(values))
	}
}

impl From<Position> for Vec<f64> {
	fn from(position: Position) -> Self {
		position.0
	}
}

impl From<[f64; 2]> for Position {
	fn from([lon, lat]: [f64; 2]) -> Self {
		Self::new(lon, lat)
	}
}

impl From<[f64; 3]> for Position {
	fn from(values: [f64; 3]) -> Self {
		Self(values.to_vec())
	}
}

impl Debug for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn elevation_is_appended_then_overwritten() {
		let mut p = Position::new(1.0, 2.0);
		assert_eq!(p.elevation(), None);
		p.set_elevation(10.0);
		assert_eq!(p.as_slice(), &[1.0, 2.0, 10.0]);
		p.set_elevation(20.0);
		assert_eq!(p.as_slice(), &[1.0, 2.0, 20.0]);
	}

	#[test]
	fn extra_values_survive() {
		let mut p = Position::try_from(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
		p.set_elevation(5.0);
		assert_eq!(p.as_slice(), &[1.0, 2.0, 5.0, 4.0]);
	}

	#[test]
	fn serde() {
		let p: Position = serde_json::from_str("[7, 8.5]").unwrap();
		assert_eq!((p.lon(), p.lat()), (7.0, 8.5));
		assert_eq!(serde_json::to_string(&p).unwrap(), "[7.0,8.5]");
		assert!(serde_json::from_str::<Position>("[7]").is_err());
	}
}
