//! Decoded pixel grid consumed by the block hash engine.
//!
//! A grid is an immutable, row-major buffer of 8-bit samples. The engine only
//! ever borrows it; the decode boundary owns construction.

use crate::error::HashError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Channel layout of each pixel in a [`PixelGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelLayout {
    /// Single gray channel
    Luma,
    /// Gray plus alpha
    LumaAlpha,
    /// Red, green, blue
    Rgb,
    /// Red, green, blue, alpha
    Rgba,
}

impl PixelLayout {
    /// Number of samples per pixel
    pub fn channels(&self) -> usize {
        match self {
            PixelLayout::Luma => 1,
            PixelLayout::LumaAlpha => 2,
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    /// Whether the last channel is alpha
    pub fn has_alpha(&self) -> bool {
        matches!(self, PixelLayout::LumaAlpha | PixelLayout::Rgba)
    }

    /// Luma assigned to a pixel with no visible colour (pure white)
    pub fn max_luma(&self) -> u32 {
        match self {
            PixelLayout::Luma | PixelLayout::LumaAlpha => 255,
            PixelLayout::Rgb | PixelLayout::Rgba => 255 * 3,
        }
    }
}

/// Raw decoded pixels, row-major, top-to-bottom, left-to-right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    layout: PixelLayout,
    samples: Vec<u8>,
}

impl PixelGrid {
    /// Wrap a sample buffer, checking that it holds exactly
    /// `width * height * channels` samples.
    ///
    /// Zero dimensions are accepted here; the hash engine rejects them.
    pub fn new(
        width: u32,
        height: u32,
        layout: PixelLayout,
        samples: Vec<u8>,
    ) -> Result<Self, HashError> {
        let expected = width as usize * height as usize * layout.channels();
        if samples.len() != expected {
            return Err(HashError::SampleCount {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            layout,
            samples,
        })
    }

    /// Adapt a decoded `image` crate buffer.
    ///
    /// 8-bit gray and RGB(A) buffers are taken as-is; anything wider is
    /// narrowed to 8 bits, keeping alpha only when the source has it.
    pub fn from_dynamic_image(image: &DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let (layout, samples) = match image {
            DynamicImage::ImageLuma8(buffer) => (PixelLayout::Luma, buffer.as_raw().clone()),
            DynamicImage::ImageLumaA8(buffer) => {
                (PixelLayout::LumaAlpha, buffer.as_raw().clone())
            }
            DynamicImage::ImageRgb8(buffer) => (PixelLayout::Rgb, buffer.as_raw().clone()),
            DynamicImage::ImageRgba8(buffer) => (PixelLayout::Rgba, buffer.as_raw().clone()),
            other if other.color().has_alpha() => (PixelLayout::Rgba, other.to_rgba8().into_raw()),
            other => (PixelLayout::Rgb, other.to_rgb8().into_raw()),
        };

        Self {
            width,
            height,
            layout,
            samples,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Brightness of the pixel at `(x, y)`.
    ///
    /// Colour pixels sum their three channels; gray pixels pass through.
    /// Fully transparent pixels read as white.
    pub fn luma(&self, x: u32, y: u32) -> u32 {
        let channels = self.layout.channels();
        let offset = (y as usize * self.width as usize + x as usize) * channels;
        let pixel = &self.samples[offset..offset + channels];

        if self.layout.has_alpha() && pixel[channels - 1] == 0 {
            return self.layout.max_luma();
        }

        match self.layout {
            PixelLayout::Luma | PixelLayout::LumaAlpha => pixel[0] as u32,
            PixelLayout::Rgb | PixelLayout::Rgba => {
                pixel[0] as u32 + pixel[1] as u32 + pixel[2] as u32
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, LumaA, Rgb, Rgba};

    #[test]
    fn new_rejects_wrong_sample_count() {
        let result = PixelGrid::new(2, 2, PixelLayout::Rgb, vec![0; 11]);
        assert_eq!(
            result.unwrap_err(),
            HashError::SampleCount {
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn new_accepts_zero_width() {
        let grid = PixelGrid::new(0, 5, PixelLayout::Rgba, Vec::new()).unwrap();
        assert_eq!(grid.width(), 0);
    }

    #[test]
    fn rgb_luma_sums_channels() {
        let grid = PixelGrid::new(1, 1, PixelLayout::Rgb, vec![10, 20, 30]).unwrap();
        assert_eq!(grid.luma(0, 0), 60);
    }

    #[test]
    fn gray_luma_passes_through() {
        let grid = PixelGrid::new(2, 1, PixelLayout::Luma, vec![7, 200]).unwrap();
        assert_eq!(grid.luma(0, 0), 7);
        assert_eq!(grid.luma(1, 0), 200);
    }

    #[test]
    fn transparent_pixel_reads_as_white() {
        let grid = PixelGrid::new(
            2,
            1,
            PixelLayout::Rgba,
            vec![0, 0, 0, 0, 0, 0, 0, 255],
        )
        .unwrap();
        assert_eq!(grid.luma(0, 0), 765);
        assert_eq!(grid.luma(1, 0), 0);

        let gray = PixelGrid::new(1, 1, PixelLayout::LumaAlpha, vec![3, 0]).unwrap();
        assert_eq!(gray.luma(0, 0), 255);
    }

    #[test]
    fn partially_transparent_pixel_keeps_colour() {
        let grid = PixelGrid::new(1, 1, PixelLayout::Rgba, vec![1, 2, 3, 1]).unwrap();
        assert_eq!(grid.luma(0, 0), 6);
    }

    #[test]
    fn adapter_keeps_native_layouts() {
        let rgb = DynamicImage::ImageRgb8(ImageBuffer::from_fn(3, 2, |_, _| Rgb([1, 2, 3])));
        let grid = PixelGrid::from_dynamic_image(&rgb);
        assert_eq!(grid.layout(), PixelLayout::Rgb);
        assert_eq!(grid.samples().len(), 3 * 2 * 3);

        let rgba = DynamicImage::ImageRgba8(ImageBuffer::from_fn(2, 2, |_, _| Rgba([1, 2, 3, 4])));
        assert_eq!(PixelGrid::from_dynamic_image(&rgba).layout(), PixelLayout::Rgba);

        let gray = DynamicImage::ImageLuma8(ImageBuffer::from_fn(2, 2, |_, _| Luma([9])));
        assert_eq!(PixelGrid::from_dynamic_image(&gray).layout(), PixelLayout::Luma);

        let gray_alpha =
            DynamicImage::ImageLumaA8(ImageBuffer::from_fn(2, 2, |_, _| LumaA([9, 255])));
        assert_eq!(
            PixelGrid::from_dynamic_image(&gray_alpha).layout(),
            PixelLayout::LumaAlpha
        );
    }

    #[test]
    fn adapter_narrows_wide_samples() {
        let wide = DynamicImage::ImageRgb16(ImageBuffer::from_fn(2, 2, |_, _| {
            Rgb([u16::MAX, 0, u16::MAX])
        }));
        let grid = PixelGrid::from_dynamic_image(&wide);
        assert_eq!(grid.layout(), PixelLayout::Rgb);
        assert_eq!(grid.luma(0, 0), 510);
    }
}
