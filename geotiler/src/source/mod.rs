//! Concrete tile formats: Terrarium elevation tiles and JSON data tiles.

mod dem;
mod json;

pub use dem::*;
pub use json::*;
