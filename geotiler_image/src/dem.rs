//! Terrarium elevation coding.
//!
//! Terrarium tiles store an elevation in the first three channels of each
//! pixel as `R·256 + G + B/256 − 32768` metres.
//!
//! ```
//! use geotiler_image::{decode_terrarium, encode_terrarium};
//!
//! let image = encode_terrarium(2, 1, &[-12.0, 8848.0]).unwrap();
//! let raster = decode_terrarium(&image).unwrap();
//! assert_eq!(raster.elevations, vec![-12.0, 8848.0]);
//! ```

use crate::{DynamicImageTraitInfo, blob2image};
use anyhow::Result;
use geotiler_core::{Blob, RawRaster, TileError};
use geotiler_derive::context;
use image::{DynamicImage, Rgb, RgbImage};

const OFFSET: f64 = 32768.0;

/// Elevation of one Terrarium pixel, rounded to whole metres.
///
/// Halves round towards positive infinity, so `-0.5` becomes `0`.
#[must_use]
pub fn terrarium_elevation(r: u8, g: u8, b: u8) -> f64 {
	(f64::from(r) * 256.0 + f64::from(g) + f64::from(b) / 256.0 - OFFSET + 0.5).floor()
}

/// Terrarium pixel for `elevation`, clamped to the representable range.
#[must_use]
pub fn terrarium_pixel(elevation: f64) -> [u8; 3] {
	let raw = ((elevation + OFFSET) * 256.0).round();
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	let raw = (raw as i64).clamp(0, 0x00FF_FFFF) as u32;
	[
		((raw >> 16) & 0xFF) as u8,
		((raw >> 8) & 0xFF) as u8,
		(raw & 0xFF) as u8,
	]
}

/// Decode a Terrarium image into elevations, top row first.
///
/// The image needs 8-bit samples and at least three channels; an alpha
/// channel is ignored.
pub fn decode_terrarium(image: &DynamicImage) -> Result<RawRaster> {
	if image.bits_per_value() != 8 || image.channel_count() < 3 {
		return Err(TileError::decode(format!(
			"elevation image must have 8-bit samples and at least 3 channels, got {} bits and {} channels",
			image.bits_per_value(),
			image.channel_count()
		))
		.into());
	}

	let channels = usize::from(image.channel_count());
	let elevations = image
		.as_bytes()
		.chunks_exact(channels)
		.map(|p| terrarium_elevation(p[0], p[1], p[2]))
		.collect();

	RawRaster::new(image.width() as usize, image.height() as usize, elevations)
}

/// Decode a Terrarium PNG.
#[context("decoding terrarium PNG of {} bytes", blob.len())]
pub fn decode_terrarium_png(blob: &Blob) -> Result<RawRaster> {
	decode_terrarium(&blob2image(blob)?)
}

/// Build an RGB Terrarium image from elevations given top row first.
pub fn encode_terrarium(width: u32, height: u32, elevations: &[f64]) -> Result<DynamicImage> {
	let expected = width as usize * height as usize;
	if elevations.len() != expected {
		anyhow::bail!(
			"{width}x{height} image needs {expected} elevations, got {}",
			elevations.len()
		);
	}
	let image = RgbImage::from_fn(width, height, |x, y| {
		Rgb(terrarium_pixel(elevations[(y * width + x) as usize]))
	});
	Ok(DynamicImage::ImageRgb8(image))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::image2blob;
	use image::{Rgba, RgbaImage};
	use rstest::rstest;

	#[rstest]
	#[case::sea_level([128, 0, 0], 0.0)]
	#[case::one_metre([128, 1, 0], 1.0)]
	#[case::below([127, 255, 0], -1.0)]
	#[case::rounds_up([128, 10, 200], 11.0)]
	#[case::rounds_down([128, 10, 100], 10.0)]
	#[case::lowest([0, 0, 0], -32768.0)]
	#[case::half_above([128, 0, 128], 1.0)]
	#[case::half_below_sea_level([127, 255, 128], 0.0)]
	#[case::half_below_minus_one([127, 254, 128], -1.0)]
	fn pixel_to_elevation(#[case] rgb: [u8; 3], #[case] elevation: f64) {
		assert_eq!(terrarium_elevation(rgb[0], rgb[1], rgb[2]), elevation);
	}

	#[rstest]
	#[case(0.0)]
	#[case(123.0)]
	#[case(-430.0)]
	#[case(8848.0)]
	fn pixel_encoding_is_reversible(#[case] elevation: f64) {
		let [r, g, b] = terrarium_pixel(elevation);
		assert_eq!(terrarium_elevation(r, g, b), elevation);
	}

	#[test]
	fn png_fixture_decodes_to_its_elevations() -> Result<()> {
		let elevations: Vec<f64> = (0..12).map(|i| f64::from(i * 25 - 50)).collect();
		let blob = image2blob(&encode_terrarium(4, 3, &elevations)?)?;
		let raster = decode_terrarium_png(&blob)?;
		assert_eq!(raster.width, 4);
		assert_eq!(raster.height, 3);
		assert_eq!(raster.elevations, elevations);
		Ok(())
	}

	#[test]
	fn alpha_is_ignored() -> Result<()> {
		let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([128, 100, 0, 17])));
		assert_eq!(decode_terrarium(&image)?.elevations, vec![100.0; 4]);
		Ok(())
	}

	#[rstest]
	#[case::grey(DynamicImage::new_luma8(2, 2))]
	#[case::grey_alpha(DynamicImage::new_luma_a8(2, 2))]
	#[case::sixteen_bit(DynamicImage::new_rgb16(2, 2))]
	fn unsupported_layouts(#[case] image: DynamicImage) {
		let err = decode_terrarium(&image).unwrap_err();
		assert!(matches!(TileError::find(&err), Some(TileError::Decode { .. })));
	}

	#[test]
	fn garbage_bytes() {
		let err = decode_terrarium_png(&Blob::from("nope")).unwrap_err();
		assert!(matches!(TileError::find(&err), Some(TileError::Decode { .. })));
		assert!(format!("{err:#}").starts_with("decoding terrarium PNG of 4 bytes"));
	}

	#[test]
	fn encode_checks_length() {
		assert!(encode_terrarium(2, 2, &[0.0; 3]).is_err());
	}
}
