//! Decoding and drawing of uncompressed 1 bpp BMP files.
//!
//! ```
//! # use monobmp_core::{bmp, fs::MemFile};
//! let mut file: Vec<u8> = Vec::new();
//! bmp::write(&mut file, 2, 2, |x, y| x == y).unwrap();
//!
//! let mut image = bmp::Image::read(&mut MemFile::new(&file)).unwrap();
//! let mut drawn = Vec::new();
//! bmp::render(10, 20, 1u8, &image, |x, y, _| drawn.push((x, y)));
//! assert_eq!(drawn, [(11, 21), (10, 20)]);
//! assert!(image.release());
//! ```

mod encode;
mod error;
mod header;
mod image;
mod render;


pub use encode::write;
pub use error::{Error, Result};
pub use header::{
    BitmapHeader, COMPRESSION_NONE, HEADER_SIZE, MAGIC, PALETTE_SIZE, stride_bytes_per_row,
    valid_bytes_per_row,
};
pub use image::Image;
pub use render::{Positioned, render};
