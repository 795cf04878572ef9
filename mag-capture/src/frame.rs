//! Owned RGBA frame.

use crate::{CaptureError, CaptureResult};
use image::RgbaImage;
use mag_common::Size;

const BYTES_PER_PIXEL: usize = 4;

/// A captured image in tightly packed RGBA8, row-major, stride equal to the width.
#[derive(Clone, PartialEq, Eq)]
pub struct RgbaFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaFrame {
    /// Wrap existing pixel data.
    ///
    /// # Errors
    ///
    /// [`CaptureError::BufferSize`] when `data.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> CaptureResult<Self> {
        let expected = Self::byte_len(width, height);
        if data.len() != expected {
            return Err(CaptureError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// An opaque black frame.
    pub fn black(width: u32, height: u32) -> Self {
        let data = [0u8, 0, 0, 255].repeat(width as usize * height as usize);
        Self {
            width,
            height,
            data,
        }
    }

    fn byte_len(width: u32, height: u32) -> usize {
        Size::new(width, height).area() as usize * BYTES_PER_PIXEL
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// RGBA value at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = &self.data[offset..offset + BYTES_PER_PIXEL];
        Some([px[0], px[1], px[2], px[3]])
    }
}

impl From<RgbaImage> for RgbaFrame {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }
}

impl From<RgbaFrame> for RgbaImage {
    fn from(frame: RgbaFrame) -> Self {
        // Length is checked on construction, so from_raw cannot fail here
        RgbaImage::from_raw(frame.width, frame.height, frame.data)
            .unwrap_or_else(|| RgbaImage::new(0, 0))
    }
}

impl std::fmt::Debug for RgbaFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RgbaFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_validates_length() {
        assert!(RgbaFrame::new(2, 2, vec![0; 16]).is_ok());

        match RgbaFrame::new(2, 2, vec![0; 15]) {
            Err(CaptureError::BufferSize { expected, actual }) => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 15);
            }
            other => panic!("expected BufferSize error, got {:?}", other),
        }
    }

    #[test]
    fn test_black_frame() {
        let frame = RgbaFrame::black(3, 2);
        assert_eq!(frame.dimensions(), (3, 2));
        assert_eq!(frame.as_bytes().len(), 24);
        assert_eq!(frame.pixel(2, 1), Some([0, 0, 0, 255]));
        assert_eq!(frame.pixel(3, 0), None);
    }

    #[test]
    fn test_image_conversion() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(1, 0, image::Rgba([10, 20, 30, 255]));

        let frame = RgbaFrame::from(image);
        assert_eq!(frame.size(), Size::new(2, 1));
        assert_eq!(frame.pixel(1, 0), Some([10, 20, 30, 255]));

        let back: RgbaImage = frame.into();
        assert_eq!(back.get_pixel(1, 0).0, [10, 20, 30, 255]);
    }
}
