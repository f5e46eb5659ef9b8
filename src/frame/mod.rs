//! Frame extraction from encoded image blobs

mod image_source;

pub use image_source::ImageFrameSource;

use crate::error::{Error, Result};

/// One decoded image frame as packed 8-bit RGB
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    rgb: Vec<u8>,
}

impl Frame {
    /// Wrap a packed RGB buffer, checking that it matches the dimensions
    pub fn new(width: usize, height: usize, rgb: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::ImageDecode(format!(
                "frame has empty dimensions {width}x{height}"
            )));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| Error::ImageDecode(format!("frame {width}x{height} is too large")))?;
        if rgb.len() != expected {
            return Err(Error::ImageDecode(format!(
                "frame {width}x{height} needs {expected} RGB bytes, got {}",
                rgb.len()
            )));
        }
        Ok(Self { width, height, rgb })
    }

    /// Frame width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Packed RGB bytes, row-major, three per pixel
    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }
}

/// Lazily produced frames, in container order
pub type Frames<'a> = Box<dyn Iterator<Item = Result<Frame>> + 'a>;

/// Turns an encoded image blob into frames
pub trait FrameSource {
    /// Start decoding `blob`. Container errors detected up front fail here;
    /// errors in later frames surface from the iterator.
    fn frames<'a>(&self, blob: &'a [u8]) -> Result<Frames<'a>>;
}
