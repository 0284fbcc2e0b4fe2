use super::SourceConfig;
use crate::{ElevationInjector, PairingMode};
use anyhow::{Context, Result, ensure};
use geotiler_core::{DEFAULT_LEVEL, HttpFetcher, MAX_LEVEL};
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::Path,
	sync::Arc,
	time::Duration,
};

pub const DEFAULT_ELEVATION_URL: &str = "https://hikar.org/webapp/dem/{z}/{x}/{y}.png";
pub const DEFAULT_DATA_URL: &str = "https://hikar.org/webapp/map/{z}/{x}/{y}.json?outProj=4326";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
	/// Zoom level used by both tile sources
	pub level: u8,

	/// HTTP request timeout
	pub timeout_seconds: u64,

	/// How data tiles are matched with elevation tiles
	pub pairing: PairingMode,

	/// Terrarium PNG elevation tiles
	pub elevation: SourceConfig,

	/// GeoJSON data tiles in EPSG:4326
	pub data: SourceConfig,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			level: DEFAULT_LEVEL,
			timeout_seconds: 30,
			pairing: PairingMode::default(),
			elevation: SourceConfig::from(DEFAULT_ELEVATION_URL),
			data: SourceConfig::from(DEFAULT_DATA_URL),
		}
	}
}

impl Config {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening config file {path:?}"))?;
		Config::from_reader(BufReader::new(file)).with_context(|| format!("parsing config file {path:?}"))
	}

	pub fn validate(&self) -> Result<()> {
		ensure!(self.level <= MAX_LEVEL, "level ({}) must be <= {MAX_LEVEL}", self.level);
		ensure!(self.timeout_seconds > 0, "timeout_seconds must be positive");
		self.elevation.url_template()?;
		self.data.url_template()?;
		Ok(())
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_seconds)
	}

	/// An injector fetching both tile kinds over HTTP.
	pub fn injector(&self) -> Result<ElevationInjector> {
		self.validate()?;
		let fetcher = Arc::new(HttpFetcher::with_timeout(self.timeout())?);
		let mut injector =
			ElevationInjector::from_templates(self.elevation.url_template()?, self.data.url_template()?, fetcher)
				.with_pairing(self.pairing);
		injector.set_level(self.level)?;
		Ok(injector)
	}
}
