pub mod elevation;
pub mod inject;
pub mod tiles;
