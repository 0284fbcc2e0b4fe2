//! Fixtures shared by the unit tests of this crate.

use geotiler_core::Blob;
use geotiler_image::{encode_terrarium, image2blob};

pub const DEM_TEMPLATE: &str = "https://dem.test/{z}/{x}/{y}.png";
pub const DATA_TEMPLATE: &str = "https://data.test/{z}/{x}/{y}.json";

pub fn dem_url(level: u8, x: u32, y: u32) -> String {
	format!("https://dem.test/{level}/{x}/{y}.png")
}

pub fn data_url(level: u8, x: u32, y: u32) -> String {
	format!("https://data.test/{level}/{x}/{y}.json")
}

/// A flat Terrarium PNG.
pub fn terrarium_png(width: u32, height: u32, elevation: f64) -> Blob {
	let elevations = vec![elevation; (width * height) as usize];
	image2blob(&encode_terrarium(width, height, &elevations).unwrap()).unwrap()
}

/// A feature collection holding the given geometries as JSON text.
pub fn feature_collection(geometries: &[&str]) -> Blob {
	let features: Vec<String> = geometries
		.iter()
		.map(|g| format!(r#"{{"type":"Feature","geometry":{g},"properties":{{}}}}"#))
		.collect();
	Blob::from(format!(
		r#"{{"type":"FeatureCollection","features":[{}]}}"#,
		features.join(",")
	))
}
