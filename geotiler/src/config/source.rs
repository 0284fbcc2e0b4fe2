use anyhow::{Context, Result};
use geotiler_core::UrlTemplate;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
	/// URL template with `{z}`, `{x}` and `{y}` placeholders
	pub url: String,
}

impl SourceConfig {
	pub fn url_template(&self) -> Result<UrlTemplate> {
		UrlTemplate::new(&self.url).with_context(|| format!("invalid tile URL '{}'", self.url))
	}
}

impl From<&str> for SourceConfig {
	fn from(url: &str) -> Self {
		SourceConfig { url: url.to_string() }
	}
}
