//! PNG encoding for rendered landscapes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageEncoder, RgbImage};

use super::ExportError;

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Encodes an RGB image as PNG into any writer.
pub fn write_png_to<W: Write>(
    image: &RgbImage,
    writer: W,
    options: &PngExportOptions,
) -> Result<(), ExportError> {
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(())
}

/// Encodes an RGB image as an in-memory PNG.
pub fn encode_png(image: &RgbImage, options: &PngExportOptions) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    write_png_to(image, &mut buf, options)?;
    Ok(buf)
}

/// Writes an RGB image to `path` as PNG.
pub fn write_png(
    image: &RgbImage,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_png_to(image, BufWriter::new(file), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::tempdir;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn encode_png_produces_png_stream() {
        let img = RgbImage::from_pixel(16, 8, Rgb([30, 120, 40]));
        let bytes = encode_png(&img, &PngExportOptions::default()).unwrap();
        assert_eq!(&bytes[..8], &PNG_MAGIC);

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (16, 8));
        assert_eq!(decoded.get_pixel(3, 3), &Rgb([30, 120, 40]));
    }

    #[test]
    fn write_png_creates_file() {
        let img = RgbImage::from_pixel(4, 4, Rgb([255, 230, 130]));
        let dir = tempdir().unwrap();
        let path = dir.path().join("landscape.png");
        write_png(&img, &path, &PngExportOptions::default()).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn write_png_to_missing_dir_fails() {
        let img = RgbImage::new(2, 2);
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("x.png");
        let err = write_png(&img, &path, &PngExportOptions::default()).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
