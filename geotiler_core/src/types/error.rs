//! Typed root causes of tile failures.
//!
//! Errors travel as `anyhow::Error` with context attached along the way; the
//! original cause can be recovered with
//! `err.chain().find_map(|e| e.downcast_ref::<TileError>())`.

use crate::TileCoord;
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq)]
pub enum TileError {
	/// The transport failed or the server answered with a non-success status.
	Fetch { url: String, reason: String },
	/// The payload could not be decoded into the expected tile data.
	Decode { reason: String },
	/// Elevation and data tiles could not be paired.
	Inconsistent { coord: TileCoord },
}

impl TileError {
	pub fn fetch(url: &str, reason: impl Display) -> Self {
		TileError::Fetch {
			url: url.to_string(),
			reason: reason.to_string(),
		}
	}

	pub fn decode(reason: impl Display) -> Self {
		TileError::Decode {
			reason: reason.to_string(),
		}
	}

	/// Find the first `TileError` in the cause chain of `err`.
	#[must_use]
	pub fn find(err: &anyhow::Error) -> Option<&TileError> {
		err.chain().find_map(|e| e.downcast_ref::<TileError>())
	}
}

impl Display for TileError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TileError::Fetch { url, reason } => write!(f, "failed to fetch '{url}': {reason}"),
			TileError::Decode { reason } => write!(f, "failed to decode tile: {reason}"),
			TileError::Inconsistent { coord } => write!(f, "no elevation tile cached for data tile {coord}"),
		}
	}
}

impl std::error::Error for TileError {}
