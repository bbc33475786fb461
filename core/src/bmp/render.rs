use embedded_graphics::{
    Drawable, Pixel,
    prelude::{DrawTarget, Point, PixelColor},
    primitives::Rectangle,
    geometry::Dimensions,
};

use super::Image;
use crate::display;

impl Image {
    /// Screen coordinates of every set bit that lands on the display, with the
    /// image's top left corner placed at `top_left`.
    ///
    /// Rows are stored bottom-up unless the height is negative. Padding bits at
    /// the end of a row are never reported, and rows past the end of the
    /// buffer are skipped.
    pub fn foreground(&self, top_left: Point) -> impl Iterator<Item = Point> + '_ {
        let data = self.data().unwrap_or(&[]);
        let width = self.header.columns() as usize;
        let height = self.header.rows() as usize;
        let valid = self.header.valid_bytes_per_row() as usize;
        let stride = self.header.stride() as usize;
        let top_down = self.header.is_top_down();

        (0..height)
            .map_while(move |row| {
                let start = row.checked_mul(stride)?;
                let bytes = data.get(start..start.checked_add(valid)?)?;
                Some((row, bytes))
            })
            .flat_map(move |(row, bytes)| {
                let y = (if top_down { row } else { height - 1 - row }) as i32;
                bytes.iter().enumerate().flat_map(move |(byte_index, &byte)| {
                    (0..8).filter_map(move |bit| {
                        let x = byte_index * 8 + bit;
                        if x >= width || (byte & (1 << (7 - bit))) == 0 {
                            return None;
                        }
                        let point = Point::new(
                            (x as i32).checked_add(top_left.x)?,
                            y.checked_add(top_left.y)?,
                        );
                        display::contains(point).then_some(point)
                    })
                })
            })
    }

    pub fn draw<D: DrawTarget>(
        &self,
        top_left: Point,
        color: D::Color,
        target: &mut D,
    ) -> Result<(), D::Error> {
        target.draw_iter(self.foreground(top_left).map(|point| Pixel(point, color)))
    }

    pub fn at<C: PixelColor>(&self, top_left: Point, color: C) -> Positioned<'_, C> {
        Positioned {
            image: self,
            top_left,
            color,
        }
    }
}

/// Calls `write_pixel(x, y, color)` once for every foreground pixel of `image`
/// that falls inside `XRES` x `YRES` once offset by the top left corner.
/// Does nothing for an image without data.
pub fn render<C, W>(top_left_x: i32, top_left_y: i32, color: C, image: &Image, mut write_pixel: W)
where
    C: Copy,
    W: FnMut(i32, i32, C),
{
    if !image.is_loaded() {
        return;
    }
    for point in image.foreground(Point::new(top_left_x, top_left_y)) {
        write_pixel(point.x, point.y, color);
    }
}

/// An [`Image`] placed on screen, usable anywhere `embedded-graphics` takes a [`Drawable`].
#[derive(Debug, Clone, Copy)]
pub struct Positioned<'a, C> {
    image: &'a Image,
    top_left: Point,
    color: C,
}

impl<C: PixelColor> Drawable for Positioned<'_, C> {
    type Color = C;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        self.image.draw(self.top_left, self.color, target)
    }
}

impl<C> Dimensions for Positioned<'_, C> {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(self.top_left, self.image.header.size())
    }
}
