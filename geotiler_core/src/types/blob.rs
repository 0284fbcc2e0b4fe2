//! [`Blob`]: the raw bytes of a downloaded tile.

use std::fmt::{self, Debug};

/// Owned bytes as returned by a [`TileFetcher`](crate::TileFetcher).
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Blob(Vec<u8>);

impl Blob {
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// The bytes as UTF-8 text, with invalid sequences replaced.
	#[must_use]
	pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
		String::from_utf8_lossy(&self.0)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Blob {
	fn from(value: Vec<u8>) -> Self {
		Blob(value)
	}
}

impl From<&[u8]> for Blob {
	fn from(value: &[u8]) -> Self {
		Blob(value.to_vec())
	}
}

impl From<&str> for Blob {
	fn from(value: &str) -> Self {
		Blob(value.as_bytes().to_vec())
	}
}

impl From<String> for Blob {
	fn from(value: String) -> Self {
		Blob(value.into_bytes())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Blob({} bytes)", self.0.len())
	}
}
