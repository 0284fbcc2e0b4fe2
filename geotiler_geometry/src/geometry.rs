use crate::Position;
use serde::{Deserialize, Serialize};

/// A GeoJSON geometry object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
	Point { coordinates: Position },
	MultiPoint { coordinates: Vec<Position> },
	LineString { coordinates: Vec<Position> },
	MultiLineString { coordinates: Vec<Vec<Position>> },
	Polygon { coordinates: Vec<Vec<Position>> },
	MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
	GeometryCollection { geometries: Vec<Geometry> },
}

impl Geometry {
	pub fn new_point(position: impl Into<Position>) -> Self {
		Self::Point {
			coordinates: position.into(),
		}
	}

	pub fn new_line_string<P: Into<Position>>(positions: Vec<P>) -> Self {
		Self::LineString {
			coordinates: positions.into_iter().map(Into::into).collect(),
		}
	}

	pub fn new_polygon<P: Into<Position>>(rings: Vec<Vec<P>>) -> Self {
		Self::Polygon {
			coordinates: rings
				.into_iter()
				.map(|ring| ring.into_iter().map(Into::into).collect())
				.collect(),
		}
	}

	#[must_use]
	pub fn type_name(&self) -> &'static str {
		match self {
			Geometry::Point { .. } => "Point",
			Geometry::MultiPoint { .. } => "MultiPoint",
			Geometry::LineString { .. } => "LineString",
			Geometry::MultiLineString { .. } => "MultiLineString",
			Geometry::Polygon { .. } => "Polygon",
			Geometry::MultiPolygon { .. } => "MultiPolygon",
			Geometry::GeometryCollection { .. } => "GeometryCollection",
		}
	}
}
