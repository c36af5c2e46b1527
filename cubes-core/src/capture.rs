/// Screenshot naming and PNG encoding
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::raster::{Frame, BYTES_PER_PIXEL};
use crate::surface::PixelSize;

/// `screencapture-<W>x<H>.png` for a drawing buffer of `size`.
pub fn screenshot_file_name(size: PixelSize) -> String {
    format!("screencapture-{size}.png")
}

/// Encode `frame` as an 8-bit RGBA PNG into `writer`.
pub fn write_png<W: Write>(frame: &Frame, writer: W) -> Result<()> {
    let size = frame.size();
    if frame.pixels().len() != size.area() * BYTES_PER_PIXEL {
        return Err(Error::FrameSize {
            size,
            len: frame.pixels().len(),
        });
    }

    let mut encoder = png::Encoder::new(writer, size.width, size.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(frame.pixels())?;
    png_writer.finish()?;
    Ok(())
}

pub fn encode_png(frame: &Frame) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_png(frame, &mut bytes)?;
    Ok(bytes)
}

/// Write `frame` into `dir` under its screenshot name and return the path.
pub fn save_screenshot(frame: &Frame, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(screenshot_file_name(frame.size()));

    let file = File::create(&path)?;
    write_png(frame, BufWriter::new(file))?;

    log::info!("Screenshot saved: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_embeds_buffer_size() {
        assert_eq!(screenshot_file_name(PixelSize::new(300, 150)), "screencapture-300x150.png");
        assert_eq!(screenshot_file_name(PixelSize::new(1, 2048)), "screencapture-1x2048.png");
    }

    #[test]
    fn test_png_signature() {
        let frame = Frame::new(PixelSize::new(4, 3));
        let bytes = encode_png(&frame).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
