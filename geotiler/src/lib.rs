//! geotiler keeps the tiles around a moving position cached and combines
//! elevation tiles with GeoJSON data tiles.
//!
//! - [`ElevationTileSource`]: Terrarium PNG tiles decoded into elevation rasters
//! - [`JsonTileSource`]: JSON tiles decoded with serde
//! - [`ElevationInjector`]: writes elevations into GeoJSON coordinates
//! - [`config::Config`]: YAML configuration of the command line tool

pub mod config;
pub use config::Config;

mod injector;
pub use injector::*;

mod source;
pub use source::*;

#[cfg(test)]
mod testing;
