//! Pixel layout introspection for `DynamicImage`.

use image::{DynamicImage, ExtendedColorType};

pub trait DynamicImageTraitInfo {
	/// Bits of a single channel value, e.g. `8` for `Rgb8` and `16` for `Rgb16`.
	fn bits_per_value(&self) -> u8;

	/// Number of channels: 1 (grey), 2 (grey + alpha), 3 (RGB) or 4 (RGBA).
	fn channel_count(&self) -> u8;

	fn extended_color_type(&self) -> ExtendedColorType;
}

impl DynamicImageTraitInfo for DynamicImage {
	fn bits_per_value(&self) -> u8 {
		(self.color().bits_per_pixel() / u16::from(self.color().channel_count())) as u8
	}

	fn channel_count(&self) -> u8 {
		self.color().channel_count()
	}

	fn extended_color_type(&self) -> ExtendedColorType {
		self.color().into()
	}
}
