use crate::TileCoord;

/// A decoded tile payload together with its address.
#[derive(Clone, Debug, PartialEq)]
pub struct CachedTile<T> {
	pub coord: TileCoord,
	pub payload: T,
}

impl<T> CachedTile<T> {
	pub fn new(coord: TileCoord, payload: T) -> Self {
		Self { coord, payload }
	}
}
