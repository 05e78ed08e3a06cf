use anyhow::{bail, Context, Result};
use image::io::Reader as ImageReader;
use image::{
    ColorType, DynamicImage, GenericImageView, GrayAlphaImage, GrayImage, RgbImage, RgbaImage,
};
use std::path::Path;

/// Row-major interleaved 8-bit pixel buffer shared with the worker pool.
///
/// The buffer itself carries no lock: workers only ever see disjoint row
/// slices handed out by `rows_mut`, so concurrent mutation cannot alias.
pub struct RasterImage {
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
}

impl RasterImage {
    pub fn load(path: &Path) -> Result<Self> {
        let dyn_img = ImageReader::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?
            .decode()
            .with_context(|| format!("failed to decode {}", path.display()))?;
        Ok(Self::from_dynamic(dyn_img))
    }

    /// 8-bit L/LA/RGB/RGBA layouts are kept as decoded; anything deeper
    /// or more exotic is flattened to RGB8.
    pub fn from_dynamic(dyn_img: DynamicImage) -> Self {
        let (width, height) = dyn_img.dimensions();
        let (pixels, channels) = match dyn_img {
            DynamicImage::ImageLuma8(buf) => (buf.into_raw(), 1),
            DynamicImage::ImageLumaA8(buf) => (buf.into_raw(), 2),
            DynamicImage::ImageRgb8(buf) => (buf.into_raw(), 3),
            DynamicImage::ImageRgba8(buf) => (buf.into_raw(), 4),
            other => (other.to_rgb8().into_raw(), 3),
        };
        Self { width, height, channels, pixels }
    }

    pub fn from_raw(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 || channels == 0 {
            bail!("raster dimensions must be non-zero, got {}x{}x{}", width, height, channels);
        }
        let expected = width as usize * height as usize * channels as usize;
        if pixels.len() != expected {
            bail!(
                "raster of {}x{}x{} needs {} bytes, got {}",
                width,
                height,
                channels,
                expected,
                pixels.len()
            );
        }
        Ok(Self { width, height, channels, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn rows(&self) -> usize {
        self.height as usize
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    fn row_len(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Disjoint mutable row slices, top to bottom. `chunks_exact_mut`
    /// partitions the buffer with no overlap and no remainder, which is
    /// what makes handing one slice to each worker task sound.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> + '_ {
        let row_len = self.row_len();
        self.pixels.chunks_exact_mut(row_len)
    }

    fn color_type(&self) -> Result<ColorType> {
        Ok(match self.channels {
            1 => ColorType::L8,
            2 => ColorType::La8,
            3 => ColorType::Rgb8,
            4 => ColorType::Rgba8,
            n => bail!("no image encoding for {} channels", n),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        image::save_buffer(path, &self.pixels, self.width, self.height, self.color_type()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn into_dynamic(self) -> Result<DynamicImage> {
        let Self { width, height, channels, pixels } = self;
        let mismatch = "raster buffer length does not match its dimensions";
        let img = match channels {
            1 => DynamicImage::ImageLuma8(GrayImage::from_raw(width, height, pixels).context(mismatch)?),
            2 => DynamicImage::ImageLumaA8(
                GrayAlphaImage::from_raw(width, height, pixels).context(mismatch)?,
            ),
            3 => DynamicImage::ImageRgb8(RgbImage::from_raw(width, height, pixels).context(mismatch)?),
            4 => DynamicImage::ImageRgba8(RgbaImage::from_raw(width, height, pixels).context(mismatch)?),
            n => bail!("no image encoding for {} channels", n),
        };
        Ok(img)
    }
}
