use core::fmt;

use embedded_io::ErrorKind;

/// Error type for loading and writing BMP files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    FileNotFound,
    IoError(ErrorKind),
    InvalidFormat,
    OutOfMemory,
}

impl Error {
    pub fn from_io_error(error: impl embedded_io::Error) -> Self {
        match error.kind() {
            ErrorKind::NotFound => Error::FileNotFound,
            kind => Error::IoError(kind),
        }
    }

    pub fn from_read_exact_error<E: embedded_io::Error>(error: embedded_io::ReadExactError<E>) -> Self {
        match error {
            // A short read never leaves a partially filled image behind.
            embedded_io::ReadExactError::UnexpectedEof => Error::IoError(ErrorKind::InvalidData),
            embedded_io::ReadExactError::Other(e) => Error::from_io_error(e),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileNotFound => f.write_str("file not found"),
            Error::IoError(kind) => write!(f, "i/o error: {kind:?}"),
            Error::InvalidFormat => f.write_str("not a BMP file"),
            Error::OutOfMemory => f.write_str("out of memory for pixel data"),
        }
    }
}

impl core::error::Error for Error {}

impl embedded_io::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::FileNotFound => ErrorKind::NotFound,
            Error::IoError(kind) => *kind,
            Error::InvalidFormat => ErrorKind::InvalidData,
            Error::OutOfMemory => ErrorKind::OutOfMemory,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
