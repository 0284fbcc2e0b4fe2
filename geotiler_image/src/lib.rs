//! Image side of geotiler: PNG blobs and Terrarium-coded elevation rasters.

pub mod dem;
pub use dem::*;

pub mod format;
pub use format::png::{blob2image, image2blob};

mod traits;
pub use traits::*;
