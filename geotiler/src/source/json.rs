use anyhow::Result;
use geotiler_core::{Blob, TileCoord, TileError, TileFetcher, TileFormat, TileSource, UrlTemplate};
use serde::de::DeserializeOwned;
use std::{fmt, marker::PhantomData, sync::Arc};

/// JSON tiles deserialized into `T`. The decoded value is cached as is.
pub struct JsonFormat<T> {
	_payload: PhantomData<fn() -> T>,
}

impl<T> JsonFormat<T> {
	#[must_use]
	pub fn new() -> Self {
		Self { _payload: PhantomData }
	}
}

impl<T> Default for JsonFormat<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> fmt::Debug for JsonFormat<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "JsonFormat<{}>", std::any::type_name::<T>())
	}
}

impl<T: DeserializeOwned + Send + Sync> TileFormat for JsonFormat<T> {
	type Raw = T;
	type Payload = T;

	fn decode_raw(&self, blob: Blob) -> Result<T> {
		serde_json::from_slice(blob.as_slice())
			.map_err(|e| TileError::decode(format!("invalid JSON tile: {e}")).into())
	}

	fn decode_and_store(&self, _coord: &TileCoord, raw: T) -> Result<T> {
		Ok(raw)
	}
}

pub type JsonTileSource<T = serde_json::Value> = TileSource<JsonFormat<T>>;

impl<T: DeserializeOwned + Send + Sync> JsonFormat<T> {
	pub fn tile_source(url_template: UrlTemplate, fetcher: Arc<dyn TileFetcher>) -> JsonTileSource<T> {
		TileSource::new(JsonFormat::new(), url_template, fetcher)
	}
}
