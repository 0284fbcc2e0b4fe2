use crate::Geometry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
	#[default]
	Feature,
}

/// A GeoJSON feature. Members other than `geometry` are kept as JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
	#[serde(rename = "type")]
	pub kind: FeatureType,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<Value>,
	pub geometry: Option<Geometry>,
	#[serde(default)]
	pub properties: Option<Map<String, Value>>,
	/// Foreign members.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Feature {
	#[must_use]
	pub fn new(geometry: Geometry) -> Self {
		Self {
			geometry: Some(geometry),
			..Self::default()
		}
	}

	pub fn set_property(&mut self, key: &str, value: impl Into<Value>) {
		self.properties
			.get_or_insert_with(Map::new)
			.insert(key.to_string(), value.into());
	}

	#[must_use]
	pub fn property(&self, key: &str) -> Option<&Value> {
		self.properties.as_ref()?.get(key)
	}
}
