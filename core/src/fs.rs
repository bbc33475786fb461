use embedded_io::{ErrorKind, ErrorType, Read, Seek, SeekFrom};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Read,
    Write,
}

pub trait File: Read + Seek {
    fn size(&self) -> usize;
}

pub trait Filesystem: ErrorType {
    type File: File;

    fn open_file(&self, path: &str, mode: Mode) -> Result<Self::File, Self::Error>;
    fn exists(&self, path: &str) -> Result<bool, Self::Error>;
}

/// Read-only seekable view over bytes already in memory,
/// e.g. an image linked into flash with `include_bytes!`.
#[derive(Debug, Clone)]
pub struct MemFile<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> MemFile<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        MemFile { bytes, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl ErrorType for MemFile<'_> {
    type Error = ErrorKind;
}

impl Read for MemFile<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        let remaining = self.bytes.get(self.pos..).unwrap_or(&[]);
        let len = remaining.len().min(buf.len());
        buf[..len].copy_from_slice(&remaining[..len]);
        self.pos += len;
        Ok(len)
    }
}

impl Seek for MemFile<'_> {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, ErrorKind> {
        let target = match pos {
            SeekFrom::Start(offset) => offset as i128,
            SeekFrom::End(offset) => self.bytes.len() as i128 + offset as i128,
            SeekFrom::Current(offset) => self.pos as i128 + offset as i128,
        };
        // Seeking past the end is allowed, reads there just return 0.
        self.pos = usize::try_from(target).map_err(|_| ErrorKind::InvalidInput)?;
        Ok(self.pos as u64)
    }
}

impl File for MemFile<'_> {
    fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_and_seek() {
        let mut file = MemFile::new(&[1, 2, 3, 4, 5]);
        let mut buf = [0u8; 2];
        assert_eq!(file.read(&mut buf), Ok(2));
        assert_eq!(buf, [1, 2]);

        assert_eq!(file.seek(SeekFrom::End(-1)), Ok(4));
        assert_eq!(file.read(&mut buf), Ok(1));
        assert_eq!(buf[0], 5);
        assert_eq!(file.read(&mut buf), Ok(0));

        assert_eq!(file.seek(SeekFrom::Current(-10)), Err(ErrorKind::InvalidInput));
        assert_eq!(file.seek(SeekFrom::Start(100)), Ok(100));
        assert_eq!(file.read(&mut buf), Ok(0));
        assert_eq!(file.size(), 5);
    }
}
