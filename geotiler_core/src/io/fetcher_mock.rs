//! An in-memory [`TileFetcher`] for tests and offline use.

use super::TileFetcher;
use crate::{Blob, TileError};
use anyhow::Result;
use async_trait::async_trait;
use std::{collections::HashMap, sync::Mutex};

/// Serves registered URLs from memory and records every request.
///
/// Unknown URLs fail like an HTTP 404.
///
/// ```rust
/// use geotiler_core::io::{MockFetcher, TileFetcher};
///
/// # #[tokio::main]
/// # async fn main() {
/// let fetcher = MockFetcher::new().with("https://x/1/0/0.json", "{}");
/// assert!(fetcher.fetch("https://x/1/0/0.json").await.is_ok());
/// assert!(fetcher.fetch("https://x/1/1/0.json").await.is_err());
/// assert_eq!(fetcher.requests().len(), 2);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockFetcher {
	responses: Mutex<HashMap<String, Blob>>,
	requests: Mutex<Vec<String>>,
}

impl MockFetcher {
	#[must_use]
	pub fn new() -> MockFetcher {
		MockFetcher::default()
	}

	#[must_use]
	pub fn with(self, url: &str, body: impl Into<Blob>) -> MockFetcher {
		self.insert(url, body);
		self
	}

	pub fn insert(&self, url: &str, body: impl Into<Blob>) {
		self.responses.lock().unwrap().insert(url.to_string(), body.into());
	}

	/// Makes `url` fail from now on.
	pub fn remove(&self, url: &str) {
		self.responses.lock().unwrap().remove(url);
	}

	/// All requested URLs in request order.
	#[must_use]
	pub fn requests(&self) -> Vec<String> {
		self.requests.lock().unwrap().clone()
	}

	#[must_use]
	pub fn request_count(&self, url: &str) -> usize {
		self.requests.lock().unwrap().iter().filter(|u| *u == url).count()
	}

	pub fn clear_requests(&self) {
		self.requests.lock().unwrap().clear();
	}
}

#[async_trait]
impl TileFetcher for MockFetcher {
	async fn fetch(&self, url: &str) -> Result<Blob> {
		self.requests.lock().unwrap().push(url.to_string());
		let body = self.responses.lock().unwrap().get(url).cloned();
		body.ok_or_else(|| TileError::fetch(url, "HTTP 404 Not Found").into())
	}
}
