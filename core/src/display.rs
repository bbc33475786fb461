use embedded_graphics::prelude::{Point, Size};

/// Horizontal resolution of the target display.
pub const XRES: i32 = 1280;
/// Vertical resolution of the target display.
pub const YRES: i32 = 720;

pub const SIZE: Size = Size::new(XRES as u32, YRES as u32);

/// Whether `(x, y)` is a drawable screen coordinate.
pub const fn in_bounds(x: i32, y: i32) -> bool {
    x >= 0 && x < XRES && y >= 0 && y < YRES
}

pub const fn contains(point: Point) -> bool {
    in_bounds(point.x, point.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_edges() {
        assert!(in_bounds(0, 0));
        assert!(in_bounds(XRES - 1, YRES - 1));
        assert!(!in_bounds(XRES, 0));
        assert!(!in_bounds(0, YRES));
        assert!(!in_bounds(-1, 0));
        assert!(!in_bounds(0, -1));
    }
}
