//! The `TileFetcher` trait.
//!
//! ```rust
//! use geotiler_core::{Blob, io::TileFetcher};
//! use anyhow::Result;
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! struct EchoFetcher;
//!
//! #[async_trait]
//! impl TileFetcher for EchoFetcher {
//!     async fn fetch(&self, url: &str) -> Result<Blob> {
//!         Ok(Blob::from(url))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let blob = EchoFetcher.fetch("13/1/2").await?;
//!     assert_eq!(blob.as_str(), "13/1/2");
//!     Ok(())
//! }
//! ```

use crate::Blob;
use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

/// Retrieves the raw bytes behind a resolved tile URL.
///
/// Implementations report transport failures and non-success responses as
/// [`TileError::Fetch`](crate::TileError::Fetch).
#[async_trait]
pub trait TileFetcher: Debug + Send + Sync {
	async fn fetch(&self, url: &str) -> Result<Blob>;
}
