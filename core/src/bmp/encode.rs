use alloc::vec;
use embedded_io::Write;

use super::{BitmapHeader, Error, Result};

/// Palette index 0 is black, 1 is white.
const PALETTE: [[u8; 4]; 2] = [[0x00, 0x00, 0x00, 0x00], [0xFF, 0xFF, 0xFF, 0x00]];

/// Writes a 1 bpp BMP. `pixel(x, y)` is asked for every pixel with `y = 0`
/// being the top row; `true` sets the bit.
pub fn write<W, F>(file: &mut W, width: u32, height: u32, mut pixel: F) -> Result<BitmapHeader>
where
    W: Write,
    F: FnMut(u32, u32) -> bool,
{
    let width_signed = i32::try_from(width).map_err(|_| Error::InvalidFormat)?;
    let height_signed = i32::try_from(height).map_err(|_| Error::InvalidFormat)?;
    let header = BitmapHeader::monochrome(width_signed, height_signed);

    file.write_all(&header.to_bytes()).map_err(Error::from_io_error)?;
    for entry in &PALETTE {
        file.write_all(entry).map_err(Error::from_io_error)?;
    }

    let mut row = vec![0u8; header.stride() as usize];
    for y in (0..height).rev() {
        row.fill(0);
        for x in 0..width {
            if pixel(x, y) {
                row[(x / 8) as usize] |= 1 << (7 - x % 8);
            }
        }
        file.write_all(&row).map_err(Error::from_io_error)?;
    }
    file.flush().map_err(Error::from_io_error)?;

    Ok(header)
}
