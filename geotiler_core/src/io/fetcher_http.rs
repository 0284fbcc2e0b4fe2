//! Fetching tiles over HTTP(S) with `reqwest`.

use super::TileFetcher;
use crate::{Blob, TileError};
use anyhow::{Result, bail};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

/// Timeout applied to every request unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A [`TileFetcher`] that issues one GET request per tile.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
	client: Client,
	timeout: Duration,
}

impl HttpFetcher {
	/// Creates a fetcher with the default 30 second timeout.
	pub fn new() -> Result<HttpFetcher> {
		HttpFetcher::with_timeout(DEFAULT_TIMEOUT)
	}

	pub fn with_timeout(timeout: Duration) -> Result<HttpFetcher> {
		let client = Client::builder()
			.timeout(timeout)
			.tcp_keepalive(Duration::from_secs(600))
			.build()?;
		Ok(HttpFetcher { client, timeout })
	}

	#[must_use]
	pub fn timeout(&self) -> Duration {
		self.timeout
	}
}

#[async_trait]
impl TileFetcher for HttpFetcher {
	async fn fetch(&self, url: &str) -> Result<Blob> {
		let parsed = Url::parse(url).map_err(|e| TileError::fetch(url, e))?;
		match parsed.scheme() {
			"http" | "https" => (),
			other => bail!(TileError::fetch(
				url,
				format!("unsupported URL scheme '{other}', expected 'http' or 'https'")
			)),
		}

		log::debug!("GET {url}");
		let response = self
			.client
			.get(parsed)
			.send()
			.await
			.map_err(|e| TileError::fetch(url, e))?;

		let status = response.status();
		if !status.is_success() {
			bail!(TileError::fetch(url, format!("HTTP {status}")));
		}

		let bytes = response.bytes().await.map_err(|e| TileError::fetch(url, e))?;
		log::debug!("received {} bytes from {url}", bytes.len());
		Ok(Blob::from(bytes.to_vec()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn default_timeout() {
		let fetcher = HttpFetcher::new().unwrap();
		assert_eq!(fetcher.timeout(), Duration::from_secs(30));
	}

	#[rstest]
	#[case::bad_scheme("ftp://example.org/1/2/3.png")]
	#[case::file_scheme("file:///tmp/1/2/3.png")]
	#[case::not_a_url("13/1/2.png")]
	#[tokio::test]
	async fn rejects_unusable_urls(#[case] url: &str) {
		let fetcher = HttpFetcher::new().unwrap();
		let err = fetcher.fetch(url).await.unwrap_err();
		match TileError::find(&err) {
			Some(TileError::Fetch { url: failed, .. }) => assert_eq!(failed, url),
			other => panic!("expected a fetch error, got {other:?}"),
		}
	}
}
