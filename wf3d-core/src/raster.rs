/// Width of the render target in pixels.
pub const WIDTH: usize = 128;
/// Height of the render target in pixels.
pub const HEIGHT: usize = 128;

/// Bytes per RGBA8 pixel.
pub const CHANNELS: usize = 4;

/// Opaque white, the only colour lines are drawn in.
pub const WHITE: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// Row-major RGBA8 pixel grid with a top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * CHANNELS],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * CHANNELS;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[idx..idx + CHANNELS]);
        Some(rgba)
    }

    /// Write one pixel; coordinates outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * CHANNELS;
            self.pixels[idx..idx + CHANNELS].copy_from_slice(&color);
        }
    }

    /// Draw a white line, skipping every point outside the buffer.
    pub fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16) {
        bresenham(x0, y0, x1, y1, |x, y| self.set_pixel(x, y, WHITE));
    }

    /// Draw a white line without bounds checks.
    ///
    /// # Safety
    ///
    /// Every point on the line from `(x0, y0)` to `(x1, y1)`, both endpoints
    /// included, must lie inside `[0, width) x [0, height)`. Since the line
    /// stays within the bounding box of its endpoints, it is enough for both
    /// endpoints to be in bounds.
    pub unsafe fn draw_line_unchecked(&mut self, x0: i16, y0: i16, x1: i16, y1: i16) {
        let width = self.width;
        let pixels = &mut self.pixels;
        bresenham(x0, y0, x1, y1, |x, y| {
            let idx = (y as usize * width + x as usize) * CHANNELS;
            // SAFETY: the caller guarantees (x, y) is inside the buffer.
            unsafe {
                pixels
                    .get_unchecked_mut(idx..idx + CHANNELS)
                    .copy_from_slice(&WHITE);
            }
        });
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

/// Walk the integer points from `(x0, y0)` to `(x1, y1)` inclusive.
///
/// Differences are taken in `i32` so the full `i16` range cannot overflow.
fn bresenham(x0: i16, y0: i16, x1: i16, y1: i16, mut plot: impl FnMut(i32, i32)) {
    let (mut x, mut y) = (i32::from(x0), i32::from(y0));
    let (x1, y1) = (i32::from(x1), i32::from(y1));

    let dx = (x1 - x).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let dy = (y1 - y).abs();
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = (if dx > dy { dx } else { -dy }) / 2;

    loop {
        plot(x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = err;
        if e2 > -dx {
            err -= dy;
            x += sx;
        }
        if e2 < dy {
            err += dx;
            y += sy;
        }
    }
}
