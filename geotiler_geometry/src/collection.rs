use crate::Feature;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureCollectionType {
	#[default]
	FeatureCollection,
}

/// A GeoJSON feature collection, the payload of a data tile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
	#[serde(rename = "type")]
	pub kind: FeatureCollectionType,
	pub features: Vec<Feature>,
	/// Foreign members.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl FeatureCollection {
	#[must_use]
	pub fn new(features: Vec<Feature>) -> Self {
		Self {
			features,
			..Self::default()
		}
	}

	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn from_slice(json: &[u8]) -> Result<Self> {
		Ok(serde_json::from_slice(json)?)
	}

	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string(self)?)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.features.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}
}
