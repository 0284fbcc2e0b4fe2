//! A serde model of GeoJSON feature collections.
//!
//! Only what geotiler needs is typed: the geometry of each feature. All other
//! members (properties, ids, foreign members) are carried as JSON values and
//! written back unchanged.
//!
//! ```
//! use geotiler_geometry::{FeatureCollection, Geometry};
//!
//! let json = r#"{"type":"FeatureCollection","features":[
//!   {"type":"Feature","geometry":{"type":"Point","coordinates":[-0.72,51.05]},"properties":{"name":"x"}}
//! ]}"#;
//! let mut collection = FeatureCollection::from_json(json).unwrap();
//! if let Some(Geometry::Point { coordinates }) = &mut collection.features[0].geometry {
//!     coordinates.set_elevation(42.0);
//! }
//! assert!(collection.to_json().unwrap().contains("[-0.72,51.05,42.0]"));
//! ```

mod collection;
mod feature;
mod geometry;
mod position;

pub use collection::*;
pub use feature::*;
pub use geometry::*;
pub use position::*;
