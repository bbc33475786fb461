use alloc::{boxed::Box, vec};
use embedded_graphics::{
    Pixel,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Size},
};

use crate::display::{self, XRES, YRES};

pub const WIDTH: usize = XRES as usize;
pub const HEIGHT: usize = YRES as usize;
pub const BUFFER_SIZE: usize = WIDTH * HEIGHT / 8;

/// 1 bit per pixel screen image, MSB first, rows top to bottom.
pub struct Framebuffer {
    buffer: Box<[u8]>,
    written: usize,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self {
            buffer: vec![0u8; BUFFER_SIZE].into_boxed_slice(),
            written: 0,
        }
    }
}

impl Framebuffer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Pixels written since creation, including repeats and `Off` writes.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        if !display::in_bounds(x, y) {
            return;
        }
        let index = y as usize * WIDTH + x as usize;
        let byte_index = index / 8;
        let bit_index = 7 - (index % 8);
        match color {
            BinaryColor::On => {
                self.buffer[byte_index] |= 1 << bit_index;
            }
            BinaryColor::Off => {
                self.buffer[byte_index] &= !(1 << bit_index);
            }
        }
        self.written += 1;
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<BinaryColor> {
        if !display::in_bounds(x, y) {
            return None;
        }
        let index = y as usize * WIDTH + x as usize;
        let bit = (self.buffer[index / 8] >> (7 - (index % 8))) & 1;
        Some(BinaryColor::from(bit == 1))
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        display::SIZE
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set_pixel(coord.x, coord.y, color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut fb = Framebuffer::default();
        fb.set_pixel(9, 0, BinaryColor::On);
        assert_eq!(fb.as_bytes()[1], 0b0100_0000);
        assert_eq!(fb.get_pixel(9, 0), Some(BinaryColor::On));
        assert_eq!(fb.get_pixel(8, 0), Some(BinaryColor::Off));

        fb.set_pixel(9, 0, BinaryColor::Off);
        assert_eq!(fb.as_bytes()[1], 0);
        assert_eq!(fb.written(), 2);
    }

    #[test]
    fn test_clipping() {
        let mut fb = Framebuffer::default();
        fb.set_pixel(XRES - 1, YRES - 1, BinaryColor::On);
        fb.set_pixel(XRES, 0, BinaryColor::On);
        fb.set_pixel(0, YRES, BinaryColor::On);
        fb.set_pixel(-1, -1, BinaryColor::On);
        assert_eq!(fb.written(), 1);
        assert_eq!(fb.as_bytes()[BUFFER_SIZE - 1], 0b0000_0001);
        assert_eq!(fb.get_pixel(XRES, 0), None);
    }
}
