/// Half-block blitter for terminal output
use crossterm::{
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

/// Upper half block: the foreground paints the top pixel, the background
/// paints the bottom one.
const HALF_BLOCK: char = '▀';

/// Blits an RGBA8 buffer as two pixel rows per terminal row.
pub struct HalfBlockRenderer {
    width: usize,
    height: usize,
}

impl HalfBlockRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Terminal rows needed for one frame.
    pub fn rows(&self) -> usize {
        self.height.div_ceil(2)
    }

    pub fn draw<W: Write>(&self, pixels: &[u8], writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows() {
            for x in 0..self.width {
                let upper = self.color_at(pixels, x, row * 2);
                let lower = self.color_at(pixels, x, row * 2 + 1);

                writer.queue(SetForegroundColor(upper))?;
                writer.queue(SetBackgroundColor(lower))?;
                writer.queue(Print(HALF_BLOCK))?;
            }
            writer.queue(ResetColor)?;
            // Raw mode does not translate '\n'
            writer.queue(Print("\r\n"))?;
        }
        Ok(())
    }

    fn color_at(&self, pixels: &[u8], x: usize, y: usize) -> Color {
        if y >= self.height {
            return Color::Black;
        }
        let idx = (y * self.width + x) * 4;
        match pixels.get(idx..idx + 4) {
            Some(rgba) => composite(rgba),
            None => Color::Black,
        }
    }
}

/// Blend an RGBA8 pixel over black.
fn composite(rgba: &[u8]) -> Color {
    let alpha = u16::from(rgba[3]);
    let channel = |c: u8| (u16::from(c) * alpha / 255) as u8;
    Color::Rgb {
        r: channel(rgba[0]),
        g: channel(rgba[1]),
        b: channel(rgba[2]),
    }
}
