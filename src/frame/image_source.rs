use std::io::Cursor;

use image::codecs::gif::GifDecoder;
use image::codecs::png::PngDecoder;
use image::{AnimationDecoder, DynamicImage, ImageFormat, RgbaImage};
use tracing::debug;

use super::{Frame, FrameSource, Frames};
use crate::error::{Error, Result};

/// Frame source backed by the `image` crate.
///
/// Animated GIF and APNG blobs yield one frame per animation frame, already
/// composited onto the full canvas by the decoder. Every other recognised
/// format yields a single frame. Alpha is flattened onto white.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFrameSource;

impl ImageFrameSource {
    /// Create a frame source
    pub fn new() -> Self {
        Self
    }
}

impl FrameSource for ImageFrameSource {
    fn frames<'a>(&self, blob: &'a [u8]) -> Result<Frames<'a>> {
        if blob.is_empty() {
            return Err(Error::ImageDecode("empty image blob".to_string()));
        }
        let format = image::guess_format(blob)?;
        debug!(?format, bytes = blob.len(), "decoding image container");

        match format {
            ImageFormat::Gif => {
                let decoder = GifDecoder::new(Cursor::new(blob))?;
                Ok(animation_frames(decoder.into_frames()))
            }
            ImageFormat::Png => {
                let decoder = PngDecoder::new(Cursor::new(blob))?;
                if decoder.is_apng() {
                    Ok(animation_frames(decoder.apng().into_frames()))
                } else {
                    let image = DynamicImage::from_decoder(decoder)?;
                    Ok(Box::new(std::iter::once(frame_from_image(image))))
                }
            }
            _ => {
                let image = image::load_from_memory_with_format(blob, format)?;
                Ok(Box::new(std::iter::once(frame_from_image(image))))
            }
        }
    }
}

fn animation_frames(frames: image::Frames<'_>) -> Frames<'_> {
    Box::new(frames.map(|frame| {
        let frame = frame?;
        frame_from_rgba(frame.into_buffer())
    }))
}

fn frame_from_image(image: DynamicImage) -> Result<Frame> {
    if image.color().has_alpha() {
        return frame_from_rgba(image.to_rgba8());
    }
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    Frame::new(width as usize, height as usize, rgb.into_raw())
}

fn frame_from_rgba(rgba: RgbaImage) -> Result<Frame> {
    let (width, height) = rgba.dimensions();
    let mut rgb = Vec::new();
    rgb.try_reserve_exact(width as usize * height as usize * 3)?;
    for px in rgba.pixels() {
        let [r, g, b, a] = px.0;
        rgb.extend_from_slice(&[over_white(r, a), over_white(g, a), over_white(b, a)]);
    }
    Frame::new(width as usize, height as usize, rgb)
}

/// Composite one channel over a white background
#[inline]
fn over_white(channel: u8, alpha: u8) -> u8 {
    let c = channel as u32;
    let a = alpha as u32;
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, Rgba};

    #[test]
    fn test_over_white() {
        assert_eq!(over_white(0, 255), 0);
        assert_eq!(over_white(0, 0), 255);
        assert_eq!(over_white(200, 255), 200);
        assert_eq!(over_white(0, 128), 127);
    }

    #[test]
    fn test_rejects_garbage() {
        let source = ImageFrameSource::new();
        assert!(matches!(source.frames(&[]), Err(Error::ImageDecode(_))));
        assert!(matches!(
            source.frames(b"definitely not an image"),
            Err(Error::ImageDecode(_))
        ));
    }

    #[test]
    fn test_transparent_png_reads_white() {
        let mut img = RgbaImage::from_pixel(4, 3, Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 1, Rgba([0, 0, 0, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();

        let frames: Vec<Frame> = ImageFrameSource::new()
            .frames(&bytes)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(frames.len(), 1);
        let frame = &frames[0];
        assert_eq!((frame.width(), frame.height()), (4, 3));
        assert_eq!(&frame.rgb()[0..3], &[255, 255, 255]);
        let idx = (4 + 1) * 3;
        assert_eq!(&frame.rgb()[idx..idx + 3], &[0, 0, 0]);
    }

    #[test]
    fn test_truncated_png_fails() {
        let img = RgbaImage::from_pixel(16, 16, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        bytes.truncate(bytes.len() / 2);

        let source = ImageFrameSource::new();
        let outcome = source
            .frames(&bytes)
            .and_then(|frames| frames.collect::<Result<Vec<_>>>());
        assert!(matches!(outcome, Err(Error::ImageDecode(_))));
    }
}
