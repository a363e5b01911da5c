//! Pixel Surface
//!
//! A CPU-side pixel buffer of packed `0xAARRGGBB` values. Each console
//! owns one surface its glyphs are rasterized into; the screen compositor
//! builds a frame surface and hands it to the display backend.

use super::palette;

/// A width x height buffer of packed pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl Surface {
    /// Create a surface filled with transparent black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![palette::TRANSPARENT; width * height],
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

    /// Fill the whole surface with one pixel value.
    pub fn fill(&mut self, pixel: u32) {
        self.pixels.fill(pixel);
    }

    /// Read one pixel; out-of-bounds reads return transparent.
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            palette::TRANSPARENT
        }
    }

    /// Write one pixel; out-of-bounds writes are dropped.
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: u32) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = pixel;
        }
    }

    /// Fill a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: usize, h: usize, pixel: u32) {
        for dy in 0..h {
            let py = y + dy as i32;
            if py < 0 || py >= self.height as i32 {
                continue;
            }
            for dx in 0..w {
                let px = x + dx as i32;
                if px < 0 || px >= self.width as i32 {
                    continue;
                }
                self.pixels[py as usize * self.width + px as usize] = pixel;
            }
        }
    }

    /// Raw pixel data, row-major.
    pub fn data(&self) -> &[u32] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_starts_transparent() {
        let surface = Surface::new(16, 8);
        assert_eq!(surface.pixel(0, 0), palette::TRANSPARENT);
        assert_eq!(surface.pixel(15, 7), palette::TRANSPARENT);
    }

    #[test]
    fn test_set_and_read_pixel() {
        let mut surface = Surface::new(16, 8);
        surface.set_pixel(3, 2, 0xFF11_2233);
        assert_eq!(surface.pixel(3, 2), 0xFF11_2233);
        // Neighbors untouched.
        assert_eq!(surface.pixel(4, 2), palette::TRANSPARENT);
    }

    #[test]
    fn test_out_of_bounds_access_is_harmless() {
        let mut surface = Surface::new(4, 4);
        surface.set_pixel(100, 100, 0xFFFF_FFFF);
        assert_eq!(surface.pixel(100, 100), palette::TRANSPARENT);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut surface = Surface::new(8, 8);
        surface.fill_rect(-2, -2, 4, 4, 0xFFAA_AAAA);
        assert_eq!(surface.pixel(1, 1), 0xFFAA_AAAA);
        assert_eq!(surface.pixel(2, 2), palette::TRANSPARENT);
    }
}
