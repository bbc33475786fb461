use alloc::{boxed::Box, vec::Vec};
use embedded_io::{ErrorKind, Read, Seek, SeekFrom};
use log::debug;

use super::{BitmapHeader, Error, Result};
use crate::fs::{self, Filesystem};

/// A decoded header together with the raw, still packed pixel rows.
///
/// `data` is either `None` (never loaded or released) or exactly
/// `header.image_size` bytes owned by this image.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Image {
    pub header: BitmapHeader,
    data: Option<Box<[u8]>>,
}

impl Image {
    pub fn load<Fs: Filesystem>(fs: &Fs, path: &str) -> Result<Self> {
        let mut file = fs.open_file(path, fs::Mode::Read).map_err(Error::from_io_error)?;
        Self::read(&mut file)
    }

    pub fn read<F: Read + Seek>(file: &mut F) -> Result<Self> {
        let mut header = BitmapHeader::read(file)?;
        header.resolve_image_size()?;

        // Reject a pixel section the file cannot hold before allocating for it.
        let file_len = file.seek(SeekFrom::End(0)).map_err(Error::from_io_error)?;
        if header.offset as u64 + header.image_size as u64 > file_len {
            return Err(Error::IoError(ErrorKind::InvalidData));
        }

        let len = header.image_size as usize;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| Error::OutOfMemory)?;
        data.resize(len, 0u8);
        debug!("Allocated {} bytes of pixel data", len);

        file.seek(SeekFrom::Start(header.offset as u64))
            .map_err(Error::from_io_error)?;
        file.read_exact(&mut data)
            .map_err(Error::from_read_exact_error)?;

        Ok(Image {
            header,
            data: Some(data.into_boxed_slice()),
        })
    }

    /// Builds an image from pixel rows already in memory.
    pub fn from_parts(header: BitmapHeader, data: Box<[u8]>) -> Result<Self> {
        if header.kind != super::MAGIC || data.len() != header.image_size as usize {
            return Err(Error::InvalidFormat);
        }
        Ok(Image {
            header,
            data: Some(data),
        })
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// Frees the pixel data. Returns `false` if there was nothing to free.
    pub fn release(&mut self) -> bool {
        match self.data.take() {
            Some(data) => {
                debug!("Released {} bytes of pixel data", data.len());
                true
            }
            None => false,
        }
    }
}
