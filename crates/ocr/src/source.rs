use image::RgbImage;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Image not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Load an image file as 8-bit RGB.
///
/// A missing file reports as [`SourceError::NotFound`]; everything else the
/// decoder rejects reports as [`SourceError::Decode`].
pub fn load_rgb(path: &Path) -> Result<RgbImage, SourceError> {
    let img = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(ref io_err) if io_err.kind() == io::ErrorKind::NotFound => {
            SourceError::NotFound(path.to_path_buf())
        }
        other => SourceError::Decode(other),
    })?;
    Ok(img.to_rgb8())
}

/// Decode in-memory image bytes (PNG / JPEG / WEBP / …) as 8-bit RGB.
pub fn decode_rgb(data: &[u8]) -> Result<RgbImage, SourceError> {
    Ok(image::load_from_memory(data)?.to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    fn checker(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    #[test]
    fn load_rgb_reads_dimensions_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checker.png");
        checker(6, 4).save(&path).unwrap();

        let loaded = load_rgb(&path).unwrap();
        assert_eq!(loaded.dimensions(), (6, 4));
        assert_eq!(loaded.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(loaded.get_pixel(1, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn load_rgb_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_rgb(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn load_rgb_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = load_rgb(&path).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    #[test]
    fn decode_rgb_roundtrips_png_bytes() {
        let img = checker(5, 5);
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img.clone())
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_rgb(&buf).unwrap();
        assert_eq!(decoded.as_raw(), img.as_raw());
    }

    #[test]
    fn decode_rgb_rejects_garbage() {
        assert!(matches!(
            decode_rgb(b"\x00\x01\x02"),
            Err(SourceError::Decode(_))
        ));
    }
}
