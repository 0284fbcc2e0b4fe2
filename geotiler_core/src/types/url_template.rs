//! Tile URL templates with `{x}`, `{y}` and `{z}` placeholders.

use crate::TileCoord;
use anyhow::{Result, ensure};
use regex::{Captures, Regex};
use std::{
	fmt::{self, Display},
	str::FromStr,
	sync::LazyLock,
};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([xyz])\}").unwrap());

/// A tile server URL such as `https://example.org/{z}/{x}/{y}.png`.
///
/// ```
/// use geotiler_core::{TileCoord, UrlTemplate};
///
/// let template = UrlTemplate::new("https://x/{z}/{x}/{y}.json").unwrap();
/// let coord = TileCoord::new(13, 5, 7).unwrap();
/// assert_eq!(template.resolve(&coord), "https://x/13/5/7.json");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlTemplate(String);

impl UrlTemplate {
	/// Parse a template. Each of `{x}`, `{y}` and `{z}` must occur at least once.
	pub fn new(template: &str) -> Result<UrlTemplate> {
		for name in ["x", "y", "z"] {
			let token = format!("{{{name}}}");
			ensure!(
				template.contains(&token),
				"URL template '{template}' is missing the {token} placeholder"
			);
		}
		Ok(UrlTemplate(template.to_string()))
	}

	/// Substitute every placeholder with the decimal value of the tile's index.
	#[must_use]
	pub fn resolve(&self, coord: &TileCoord) -> String {
		PLACEHOLDER
			.replace_all(&self.0, |caps: &Captures| match &caps[1] {
				"x" => coord.x.to_string(),
				"y" => coord.y.to_string(),
				_ => coord.level.to_string(),
			})
			.into_owned()
	}

	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl FromStr for UrlTemplate {
	type Err = anyhow::Error;
	fn from_str(s: &str) -> Result<Self> {
		UrlTemplate::new(s)
	}
}

impl Display for UrlTemplate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
