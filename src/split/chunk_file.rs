use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SplitError};

/// One output chunk being written. Dropping it closes the file.
pub(crate) struct ChunkFile {
    path: PathBuf,
    writer: BufWriter<File>,
    written: u64,
}

impl ChunkFile {
    pub fn create(path: PathBuf) -> Result<Self> {
        let file = File::create(&path).map_err(|e| SplitError::io("create", &path, e))?;
        Ok(Self { path, writer: BufWriter::new(file), written: 0 })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `line` followed by a single `\n`.
    pub fn write_line(&mut self, line: &[u8]) -> Result<()> {
        self.writer
            .write_all(line)
            .and_then(|_| self.writer.write_all(b"\n"))
            .map_err(|e| SplitError::io("write", &self.path, e))?;
        self.written += line.len() as u64 + 1;
        Ok(())
    }

    /// Copies up to `limit` bytes (everything when `None`) and returns the count.
    /// Hitting end of input is not an error; read and write failures are.
    pub fn copy_from<R: Read + ?Sized>(&mut self, r: &mut R, limit: Option<u64>) -> Result<u64> {
        let copied = match limit {
            Some(n) => io::copy(&mut (&mut *r).take(n), &mut self.writer),
            None => io::copy(r, &mut self.writer),
        }
        .map_err(|e| SplitError::io("copy into", &self.path, e))?;
        self.written += copied;
        Ok(copied)
    }

    /// Flushes and closes the file, returning its path and length.
    pub fn close(self) -> Result<(PathBuf, u64)> {
        let ChunkFile { path, writer, written } = self;
        let file = writer
            .into_inner()
            .map_err(|e| SplitError::io("write", &path, e.into_error()))?;
        drop(file);
        Ok((path, written))
    }
}

pub(crate) fn remove_chunk(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| SplitError::io("remove", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn close_reports_bytes_on_disk() {
        let dir = TempDir::new().unwrap();
        let mut chunk = ChunkFile::create(dir.path().join("xaa")).unwrap();
        chunk.write_line(b"abc").unwrap();
        chunk.write_line(b"").unwrap();
        let (path, bytes) = chunk.close().unwrap();
        assert_eq!(bytes, 5);
        assert_eq!(fs::read(&path).unwrap(), b"abc\n\n");
    }

    #[test]
    fn copy_respects_limit() {
        let dir = TempDir::new().unwrap();
        let mut r = Cursor::new(b"0123456789".to_vec());
        let mut chunk = ChunkFile::create(dir.path().join("xaa")).unwrap();
        assert_eq!(chunk.copy_from(&mut r, Some(4)).unwrap(), 4);
        assert_eq!(chunk.copy_from(&mut r, None).unwrap(), 6);
        assert_eq!(chunk.copy_from(&mut r, Some(4)).unwrap(), 0);
        let (path, bytes) = chunk.close().unwrap();
        assert_eq!(bytes, 10);
        assert_eq!(fs::read(path).unwrap(), b"0123456789");
    }

    #[test]
    fn create_in_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let err = ChunkFile::create(dir.path().join("nope").join("xaa")).err().unwrap();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
        assert!(remove_chunk(&dir.path().join("gone")).is_err());
    }
}
