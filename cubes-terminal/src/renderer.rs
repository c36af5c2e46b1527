/// Presents RGBA frames in the terminal using half-block cells
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use cubes_core::Frame;
use std::io::Write;

/// Upper half block: foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '▀';

/// Draws a frame into a `columns` x `rows` grid of cells, two frame rows
/// per terminal row.
pub struct HalfBlockRenderer {
    columns: u16,
    rows: u16,
}

impl HalfBlockRenderer {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
    }

    /// Frame pixel sampled for sub-cell `index` out of `cells` along an axis
    /// of `pixels` length.
    fn sample(index: u32, cells: u32, pixels: u32) -> u32 {
        let pos = (index as f64 + 0.5) * pixels as f64 / cells as f64;
        (pos as u32).min(pixels.saturating_sub(1))
    }

    fn color_at(frame: &Frame, x: u32, y: u32) -> Color {
        match frame.pixel(x, y) {
            Some([r, g, b, _]) => Color::Rgb { r, g, b },
            None => Color::Black,
        }
    }

    pub fn draw<W: Write>(&self, frame: &Frame, writer: &mut W) -> std::io::Result<()> {
        let size = frame.size();
        let columns = u32::from(self.columns);
        let half_rows = u32::from(self.rows) * 2;

        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, row))?;
            for column in 0..self.columns {
                let x = Self::sample(u32::from(column), columns, size.width);
                let top = Self::sample(u32::from(row) * 2, half_rows, size.height);
                let bottom = Self::sample(u32::from(row) * 2 + 1, half_rows, size.height);

                writer.queue(SetForegroundColor(Self::color_at(frame, x, top)))?;
                writer.queue(SetBackgroundColor(Self::color_at(frame, x, bottom)))?;
                writer.queue(Print(HALF_BLOCK))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubes_core::PixelSize;

    #[test]
    fn test_sample_identity_when_sizes_match() {
        for i in 0..10 {
            assert_eq!(HalfBlockRenderer::sample(i, 10, 10), i);
        }
    }

    #[test]
    fn test_sample_with_pixel_ratio_two() {
        // Two pixels per cell: centre of cell 3 is pixel 7
        assert_eq!(HalfBlockRenderer::sample(3, 10, 20), 7);
        assert_eq!(HalfBlockRenderer::sample(9, 10, 20), 19);
    }

    #[test]
    fn test_sample_empty_axis() {
        assert_eq!(HalfBlockRenderer::sample(0, 4, 0), 0);
    }

    #[test]
    fn test_draw_emits_one_block_per_cell() {
        let frame = Frame::new(PixelSize::new(4, 4));
        let renderer = HalfBlockRenderer::new(4, 2);
        let mut out = Vec::new();
        renderer.draw(&frame, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 8);
    }
}
