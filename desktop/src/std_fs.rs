use std::{fs, io::Seek};

use embedded_io::{ErrorType, SeekFrom};
use log::info;
use monobmp_core::fs::Mode;

pub struct StdFilesystem {
    base_path: std::path::PathBuf,
}

impl StdFilesystem {
    pub fn new_with_base_path(base_path: std::path::PathBuf) -> Self {
        info!("Using StdFilesystem with base path: {:?}", base_path);
        StdFilesystem { base_path }
    }
}

impl ErrorType for StdFilesystem {
    type Error = embedded_io::ErrorKind;
}

type Result<T> = core::result::Result<T, embedded_io::ErrorKind>;

impl monobmp_core::fs::Filesystem for StdFilesystem {
    type File = StdFile;

    fn open_file(&self, path: &str, mode: Mode) -> Result<StdFile> {
        let path = self.base_path.join(path);
        let options = match mode {
            Mode::Read => fs::OpenOptions::new().read(true).clone(),
            Mode::Write => fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .clone(),
        };
        let file = options
            .open(path)
            .map_err(|err| embedded_io::Error::kind(&err))?;
        StdFile::new(file).map_err(|err| embedded_io::Error::kind(&err))
    }

    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.base_path.join(path).exists())
    }
}

pub struct StdFile {
    file: std::io::BufReader<std::fs::File>,
    size: usize,
}

impl StdFile {
    pub fn new(mut file: std::fs::File) -> std::io::Result<Self> {
        let size = file.seek(std::io::SeekFrom::End(0))? as usize;
        file.seek(std::io::SeekFrom::Start(0))?;
        Ok(StdFile {
            file: std::io::BufReader::new(file),
            size,
        })
    }
}

impl monobmp_core::fs::File for StdFile {
    fn size(&self) -> usize {
        self.size
    }
}

impl ErrorType for StdFile {
    type Error = std::io::Error;
}

impl embedded_io::Seek for StdFile {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.file.seek(pos.into())
    }
}

impl embedded_io::Read for StdFile {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        use std::io::Read;
        self.file.read(buf)
    }
}

impl embedded_io::Write for StdFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        use std::io::Write;
        // Move the OS cursor to the logical position and drop read-ahead first.
        self.file.seek(std::io::SeekFrom::Current(0))?;
        self.file.get_mut().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        use std::io::Write;
        self.file.get_mut().flush()
    }
}

#[cfg(test)]
mod tests {
    use monobmp_core::{
        bmp::{self, Error, Image},
        fs::{File, Filesystem, Mode},
    };

    use super::StdFilesystem;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("monobmp-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_write_then_load() {
        let dir = scratch_dir("roundtrip");
        let fs = StdFilesystem::new_with_base_path(dir.clone());

        let mut out = fs.open_file("cross.bmp", Mode::Write).unwrap();
        bmp::write(&mut out, 5, 5, |x, y| x == 2 || y == 2).unwrap();
        drop(out);

        assert!(fs.exists("cross.bmp").unwrap());
        let file = fs.open_file("cross.bmp", Mode::Read).unwrap();
        assert_eq!(file.size(), 62 + 20);
        drop(file);

        let mut image = Image::load(&fs, "cross.bmp").unwrap();
        let mut count = 0;
        bmp::render(0, 0, (), &image, |x, y, _| {
            assert!(x == 2 || y == 2);
            count += 1;
        });
        assert_eq!(count, 9);
        assert!(image.release());

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_write_after_seek() {
        use embedded_io::{Seek, SeekFrom, Write};

        let dir = scratch_dir("seek");
        let fs = StdFilesystem::new_with_base_path(dir.clone());

        let mut out = fs.open_file("patched.bin", Mode::Write).unwrap();
        out.write_all(b"BMxx").unwrap();
        out.seek(SeekFrom::Start(2)).unwrap();
        out.write_all(b"yy").unwrap();
        out.flush().unwrap();
        drop(out);

        assert_eq!(std::fs::read(dir.join("patched.bin")).unwrap(), b"BMyy");
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_file() {
        let fs = StdFilesystem::new_with_base_path(scratch_dir("missing"));
        assert_eq!(Image::load(&fs, "nope.bmp"), Err(Error::FileNotFound));
    }
}
