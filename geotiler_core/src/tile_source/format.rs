//! The `TileFormat` capability trait.

use crate::{Blob, TileCoord, io::TileFetcher};
use anyhow::Result;
use async_trait::async_trait;

/// Decodes fetched tile bytes into the payload a [`TileSource`](super::TileSource) caches.
///
/// Decoding happens in two steps: [`decode_raw`](TileFormat::decode_raw)
/// parses the bytes without knowing where the tile is, and
/// [`decode_and_store`](TileFormat::decode_and_store) turns the result into
/// the cached payload once the tile address is known. Formats that need no
/// second step use `Payload = Raw` and return `raw` unchanged.
#[async_trait]
pub trait TileFormat: Send + Sync {
	type Raw: Send;
	type Payload: Send + Sync;

	/// Fetch `url` and decode the response.
	async fn fetch_and_decode(&self, fetcher: &dyn TileFetcher, url: &str) -> Result<Self::Raw> {
		let blob = fetcher.fetch(url).await?;
		self.decode_raw(blob)
	}

	fn decode_raw(&self, blob: Blob) -> Result<Self::Raw>;

	fn decode_and_store(&self, coord: &TileCoord, raw: Self::Raw) -> Result<Self::Payload>;
}
