//! Value types: coordinates, tile addresses, elevation rasters, blobs and errors.

mod blob;
pub use blob::*;

mod constants;
pub use constants::*;

mod elevation_raster;
pub use elevation_raster::*;

mod error;
pub use error::*;

mod point;
pub use point::*;

mod tile_coord;
pub use tile_coord::*;

mod url_template;
pub use url_template::*;
