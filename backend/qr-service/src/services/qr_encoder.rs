//! QR encoder - renders text as a black-on-white PNG
//!
//! The symbol version is the smallest one that fits the data at the
//! configured error-correction level. Each module becomes a `box_size`
//! square of pixels, surrounded by a `border`-module light quiet zone.
//!
//! Rendering is CPU-bound; async callers go through `render_async`, which
//! runs on the blocking thread pool.

use crate::error::{AppError, Result};
use bytes::Bytes;
use image::{DynamicImage, GrayImage, ImageOutputFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;
use std::sync::Arc;
use tracing::debug;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Largest rendered image edge, in pixels
pub const MAX_IMAGE_SIDE: u32 = 8_192;

/// Rendering parameters
#[derive(Clone, Copy, Debug)]
pub struct QrCodeOptions {
    /// Pixels per module edge
    pub box_size: u32,
    /// Quiet-zone width, in modules
    pub border: u32,
    pub ec_level: EcLevel,
}

impl Default for QrCodeOptions {
    fn default() -> Self {
        Self {
            box_size: 10,
            border: 4,
            ec_level: EcLevel::L,
        }
    }
}

/// Encoded QR image
#[derive(Debug)]
pub struct QrImage {
    /// PNG bytes
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
}

pub struct QrEncoder {
    options: QrCodeOptions,
}

impl QrEncoder {
    pub fn new(options: QrCodeOptions) -> Self {
        Self { options }
    }

    pub fn with_defaults() -> Self {
        Self::new(QrCodeOptions::default())
    }

    pub fn options(&self) -> &QrCodeOptions {
        &self.options
    }

    /// Render `data` to PNG (blocking version)
    pub fn render(&self, data: &str) -> Result<QrImage> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), self.options.ec_level)
            .map_err(|e| AppError::Encoding(format!("Failed to generate QR code: {e}")))?;

        let raster = self.rasterize(&code)?;
        let (width, height) = raster.dimensions();

        let mut buf = Vec::new();
        DynamicImage::ImageLuma8(raster)
            .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
            .map_err(|e| AppError::Encoding(format!("Failed to encode PNG: {e}")))?;

        debug!(
            modules = code.width(),
            width,
            size = buf.len(),
            "QR code rendered"
        );

        Ok(QrImage {
            data: Bytes::from(buf),
            width,
            height,
        })
    }

    /// Render on the blocking thread pool
    pub async fn render_async(self: Arc<Self>, data: String) -> Result<QrImage> {
        tokio::task::spawn_blocking(move || self.render(&data)).await?
    }

    fn rasterize(&self, code: &QrCode) -> Result<GrayImage> {
        let modules = code.width() as u32;
        let QrCodeOptions {
            box_size, border, ..
        } = self.options;
        if box_size == 0 {
            return Err(AppError::Encoding("QR box size must be at least 1".into()));
        }

        let side = border
            .checked_mul(2)
            .and_then(|quiet| quiet.checked_add(modules))
            .and_then(|span| span.checked_mul(box_size))
            .filter(|side| *side <= MAX_IMAGE_SIDE)
            .ok_or_else(|| {
                AppError::Encoding(format!(
                    "QR image for {modules} modules with box size {box_size} and border {border} exceeds {MAX_IMAGE_SIDE} px"
                ))
            })?;

        let colors = code.to_colors();
        Ok(GrayImage::from_fn(side, side, |x, y| {
            let (mx, my) = (x / box_size, y / box_size);
            if mx < border || my < border {
                return LIGHT;
            }
            let (mx, my) = (mx - border, my - border);
            if mx >= modules || my >= modules {
                return LIGHT;
            }
            match colors[(my * modules + mx) as usize] {
                Color::Dark => DARK,
                Color::Light => LIGHT,
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_render_produces_png() {
        let image = QrEncoder::with_defaults()
            .render("https://example.com")
            .unwrap();

        assert_eq!(&image.data[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_dimensions_follow_box_size_and_border() {
        let encoder = QrEncoder::with_defaults();
        let image = encoder.render("hello").unwrap();

        // Short input at level L fits version 1 (21 modules)
        let expected = (21 + 2 * 4) * 10;
        assert_eq!(image.width, expected);
        assert_eq!(image.height, expected);

        let decoded = image::load_from_memory(&image.data).unwrap();
        assert_eq!(decoded.dimensions(), (expected, expected));
    }

    #[test]
    fn test_longer_input_grows_version() {
        let encoder = QrEncoder::with_defaults();
        let short = encoder.render("a").unwrap();
        let long = encoder.render(&"https://example.com/".repeat(10)).unwrap();

        assert!(long.width > short.width);
    }

    #[test]
    fn test_quiet_zone_light_and_finder_dark() {
        let options = QrCodeOptions {
            box_size: 3,
            border: 2,
            ec_level: EcLevel::L,
        };
        let image = QrEncoder::new(options).render("hello").unwrap();
        let pixels = image::load_from_memory(&image.data).unwrap().to_luma8();

        assert_eq!(pixels.get_pixel(0, 0), &LIGHT);
        assert_eq!(pixels.get_pixel(5, 5), &LIGHT);
        // Top-left corner of the finder pattern
        assert_eq!(pixels.get_pixel(6, 6), &DARK);
        assert_eq!(pixels.get_pixel(8, 8), &DARK);
    }

    #[test]
    fn test_zero_border() {
        let options = QrCodeOptions {
            box_size: 1,
            border: 0,
            ec_level: EcLevel::L,
        };
        let image = QrEncoder::new(options).render("hello").unwrap();
        assert_eq!(image.width, 21);
    }

    #[test]
    fn test_oversized_input_is_encoding_error() {
        let err = QrEncoder::with_defaults()
            .render(&"x".repeat(8000))
            .unwrap_err();
        assert!(matches!(err, AppError::Encoding(_)));
    }

    #[test]
    fn test_oversized_geometry_is_encoding_error() {
        for (box_size, border) in [(10, u32::MAX), (u32::MAX, 4), (0, 4), (1000, 4)] {
            let options = QrCodeOptions {
                box_size,
                border,
                ec_level: EcLevel::L,
            };
            let err = QrEncoder::new(options).render("hello").unwrap_err();
            assert!(matches!(err, AppError::Encoding(_)), "{box_size}/{border}");
        }
    }

    #[test]
    fn test_largest_version_fits_default_geometry() {
        // Version 40 is 177 modules wide
        let image = QrEncoder::with_defaults().render(&"x".repeat(2900)).unwrap();
        assert_eq!(image.width, (177 + 2 * 4) * 10);
    }

    #[tokio::test]
    async fn test_render_async() {
        let encoder = Arc::new(QrEncoder::with_defaults());
        let image = encoder.render_async("https://example.com".into()).await.unwrap();
        assert_eq!(&image.data[..8], &PNG_SIGNATURE);
    }
}
