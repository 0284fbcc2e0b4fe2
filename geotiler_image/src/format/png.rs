use crate::DynamicImageTraitInfo;
use anyhow::{Result, bail};
use geotiler_core::{Blob, TileError};
use image::{DynamicImage, ImageEncoder, ImageFormat, codecs::png, load_from_memory_with_format};

/// Encode an 8-bit image as PNG.
pub fn image2blob(image: &DynamicImage) -> Result<Blob> {
	if image.bits_per_value() != 8 {
		bail!("png encoding only supports 8-bit images");
	}

	let mut buffer: Vec<u8> = Vec::new();
	png::PngEncoder::new_with_quality(&mut buffer, png::CompressionType::Fast, png::FilterType::Adaptive)
		.write_image(
			image.as_bytes(),
			image.width(),
			image.height(),
			image.extended_color_type(),
		)?;

	Ok(Blob::from(buffer))
}

/// Decode PNG bytes. Failures are [`TileError::Decode`].
pub fn blob2image(blob: &Blob) -> Result<DynamicImage> {
	load_from_memory_with_format(blob.as_slice(), ImageFormat::Png)
		.map_err(|e| TileError::decode(format!("invalid PNG image: {e}")).into())
}
