//! YAML configuration of the geotiler command line tool.
//!
//! - [`Config`]: top-level settings and the YAML loader
//! - [`SourceConfig`]: where one kind of tile comes from

mod main;
mod source;

pub use main::Config;
pub use source::SourceConfig;
