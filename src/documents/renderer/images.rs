//! Raster assets decoded into PDF image XObjects.

use std::io::Write;
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use super::RenderError;

/// Decoded image, with colour and alpha planes already deflated.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    pub width: u32,
    pub height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl EmbeddedImage {
    /// `Ok(None)` when the file does not exist. A file that exists but
    /// cannot be decoded is an error.
    pub fn load(path: &Path) -> Result<Option<Self>, RenderError> {
        if !path.is_file() {
            log::warn!("Asset {} not found, drawing without it", path.display());
            return Ok(None);
        }

        let image = image::open(path)
            .map_err(|source| RenderError::Asset {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = image.dimensions();

        let pixels = width as usize * height as usize;
        let mut rgb = Vec::with_capacity(pixels * 3);
        let mut alpha = Vec::with_capacity(pixels);
        for pixel in image.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }
        let opaque = alpha.iter().all(|a| *a == u8::MAX);

        Ok(Some(Self {
            width,
            height,
            rgb: deflate(&rgb)?,
            alpha: if opaque { None } else { Some(deflate(&alpha)?) },
        }))
    }

    /// Add the image (and its soft mask) to `doc`, returning the XObject id.
    pub fn embed(&self, doc: &mut Document) -> ObjectId {
        let mut dict = self.image_dict("DeviceRGB");
        if let Some(alpha) = &self.alpha {
            let smask_id = doc.add_object(
                Stream::new(self.image_dict("DeviceGray"), alpha.clone()).with_compression(false),
            );
            dict.set("SMask", Object::Reference(smask_id));
        }
        doc.add_object(Stream::new(dict, self.rgb.clone()).with_compression(false))
    }

    fn image_dict(&self, color_space: &str) -> lopdf::Dictionary {
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => self.width as i64,
            "Height" => self.height as i64,
            "ColorSpace" => Object::Name(color_space.as_bytes().to_vec()),
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        }
    }
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = EmbeddedImage::load(&dir.path().join("logo.png")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_undecodable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(matches!(
            EmbeddedImage::load(&path),
            Err(RenderError::Asset { .. })
        ));
    }

    #[test]
    fn test_transparent_png_gets_soft_mask() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signature.png");
        RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 0]))
            .save(&path)
            .unwrap();

        let image = EmbeddedImage::load(&path).unwrap().unwrap();
        assert_eq!((image.width, image.height), (4, 2));

        let mut doc = Document::with_version("1.5");
        let id = image.embed(&mut doc);
        let dict = doc.get_object(id).unwrap().as_stream().unwrap().dict.clone();
        assert!(dict.has(b"SMask"));
    }

    #[test]
    fn test_planes_match_dimensions() {
        use flate2::read::ZlibDecoder;
        use std::io::Read;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signature.png");
        RgbaImage::from_pixel(7, 5, Rgba([1, 2, 3, 128]))
            .save(&path)
            .unwrap();

        let image = EmbeddedImage::load(&path).unwrap().unwrap();
        let inflate = |data: &[u8]| {
            let mut out = Vec::new();
            ZlibDecoder::new(data).read_to_end(&mut out).unwrap();
            out
        };
        assert_eq!(inflate(&image.rgb).len(), 7 * 5 * 3);
        assert_eq!(inflate(image.alpha.as_ref().unwrap()).len(), 7 * 5);
    }

    #[test]
    fn test_opaque_png_has_no_soft_mask() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        RgbaImage::from_pixel(3, 3, Rgba([0, 0, 255, 255]))
            .save(&path)
            .unwrap();

        let image = EmbeddedImage::load(&path).unwrap().unwrap();
        let mut doc = Document::with_version("1.5");
        let id = image.embed(&mut doc);
        let dict = doc.get_object(id).unwrap().as_stream().unwrap().dict.clone();
        assert!(!dict.has(b"SMask"));
    }
}
