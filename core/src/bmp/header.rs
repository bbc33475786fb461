use embedded_graphics::prelude::Size;
use embedded_io::{ErrorKind, Read};
use log::{info, warn};
use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
    byteorder::little_endian::{I32, U16, U32},
};

use super::{Error, Result};

pub const MAGIC: [u8; 2] = *b"BM";
/// 14 byte file header followed by the 40 byte BITMAPINFOHEADER.
pub const HEADER_SIZE: usize = 54;
/// Two palette entries follow the header in files written by [`super::write`].
pub const PALETTE_SIZE: usize = 2 * 4;
pub const COMPRESSION_NONE: u32 = 0;

/// On-disk layout. Every field is little-endian and byte aligned,
/// so this never depends on the host's struct layout.
#[repr(C)]
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
struct RawHeader {
    kind: [u8; 2],
    file_size: U32,
    reserved1: U16,
    reserved2: U16,
    offset: U32,
    dib_header_size: U32,
    width: I32,
    height: I32,
    planes: U16,
    bits_per_pixel: U16,
    compression: U32,
    image_size: U32,
    x_pixels_per_meter: I32,
    y_pixels_per_meter: I32,
    palette_colors: U32,
    important_colors: U32,
}

const _: () = assert!(core::mem::size_of::<RawHeader>() == HEADER_SIZE);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BitmapHeader {
    pub kind: [u8; 2],
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Bytes from the start of the file to the pixel data
    pub offset: u32,
    pub dib_header_size: u32,
    pub width: i32,
    /// Positive means the bottom row is stored first
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub palette_colors: u32,
    pub important_colors: u32,
}

/// Bytes holding `width` packed pixels.
pub const fn valid_bytes_per_row(width: u32) -> u32 {
    width.div_ceil(8)
}

/// Rows are padded to a multiple of 4 bytes.
pub const fn stride_bytes_per_row(valid_bytes: u32) -> u32 {
    valid_bytes.next_multiple_of(4)
}

impl BitmapHeader {
    /// Header of an uncompressed 1 bpp image with a two colour palette.
    pub fn monochrome(width: i32, height: i32) -> Self {
        let mut header = BitmapHeader {
            kind: MAGIC,
            offset: (HEADER_SIZE + PALETTE_SIZE) as u32,
            dib_header_size: 40,
            width,
            height,
            planes: 1,
            bits_per_pixel: 1,
            compression: COMPRESSION_NONE,
            x_pixels_per_meter: 2835,
            y_pixels_per_meter: 2835,
            palette_colors: 2,
            important_colors: 2,
            ..Default::default()
        };
        header.image_size = header.stride().saturating_mul(header.rows());
        header.file_size = header.offset.saturating_add(header.image_size);
        header
    }

    pub fn parse(bytes: &[u8; HEADER_SIZE]) -> Result<Self> {
        let raw = RawHeader::read_from_bytes(&bytes[..]).map_err(|_| Error::InvalidFormat)?;
        if raw.kind != MAGIC {
            return Err(Error::InvalidFormat);
        }
        Ok(BitmapHeader {
            kind: raw.kind,
            file_size: raw.file_size.get(),
            reserved1: raw.reserved1.get(),
            reserved2: raw.reserved2.get(),
            offset: raw.offset.get(),
            dib_header_size: raw.dib_header_size.get(),
            width: raw.width.get(),
            height: raw.height.get(),
            planes: raw.planes.get(),
            bits_per_pixel: raw.bits_per_pixel.get(),
            compression: raw.compression.get(),
            image_size: raw.image_size.get(),
            x_pixels_per_meter: raw.x_pixels_per_meter.get(),
            y_pixels_per_meter: raw.y_pixels_per_meter.get(),
            palette_colors: raw.palette_colors.get(),
            important_colors: raw.important_colors.get(),
        })
    }

    /// Reads and validates the header at the current position of `reader`.
    ///
    /// Anything not starting with "BM" is [`Error::InvalidFormat`], even when it
    /// is shorter than a full header. A truncated header behind a valid magic is
    /// an I/O error.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = [0u8; HEADER_SIZE];
        let mut filled = 0;
        while filled < HEADER_SIZE {
            match reader.read(&mut bytes[filled..]).map_err(Error::from_io_error)? {
                0 => break,
                n => filled += n,
            }
        }
        if filled < MAGIC.len() || bytes[..MAGIC.len()] != MAGIC {
            return Err(Error::InvalidFormat);
        }
        if filled < HEADER_SIZE {
            return Err(Error::IoError(ErrorKind::InvalidData));
        }

        let header = Self::parse(&bytes)?;
        info!(
            "Parsed BMP header: width={}, height={}, bpp={}",
            header.width, header.height, header.bits_per_pixel
        );
        if header.bits_per_pixel != 1 {
            warn!("BMP has {} bits per pixel, decoding as 1 bpp", header.bits_per_pixel);
        }
        if header.compression != COMPRESSION_NONE {
            warn!("BMP uses compression {}, decoding as uncompressed", header.compression);
        }
        Ok(header)
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let raw = RawHeader {
            kind: self.kind,
            file_size: self.file_size.into(),
            reserved1: self.reserved1.into(),
            reserved2: self.reserved2.into(),
            offset: self.offset.into(),
            dib_header_size: self.dib_header_size.into(),
            width: self.width.into(),
            height: self.height.into(),
            planes: self.planes.into(),
            bits_per_pixel: self.bits_per_pixel.into(),
            compression: self.compression.into(),
            image_size: self.image_size.into(),
            x_pixels_per_meter: self.x_pixels_per_meter.into(),
            y_pixels_per_meter: self.y_pixels_per_meter.into(),
            palette_colors: self.palette_colors.into(),
            important_colors: self.important_colors.into(),
        };
        let mut bytes = [0u8; HEADER_SIZE];
        bytes.copy_from_slice(raw.as_bytes());
        bytes
    }

    /// Pixel columns. A negative width is treated as empty.
    pub fn columns(&self) -> u32 {
        u32::try_from(self.width).unwrap_or(0)
    }

    pub fn rows(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// Rows stored top row first, signalled by a negative height.
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    pub fn valid_bytes_per_row(&self) -> u32 {
        valid_bytes_per_row(self.columns())
    }

    pub fn stride(&self) -> u32 {
        stride_bytes_per_row(self.valid_bytes_per_row())
    }

    pub fn size(&self) -> Size {
        Size::new(self.columns(), self.rows())
    }

    /// Uncompressed files may leave `image_size` at zero; derive it from the geometry.
    pub(crate) fn resolve_image_size(&mut self) -> Result<()> {
        if self.image_size == 0 && self.compression == COMPRESSION_NONE {
            self.image_size = self
                .stride()
                .checked_mul(self.rows())
                .ok_or(Error::OutOfMemory)?;
        }
        Ok(())
    }
}
