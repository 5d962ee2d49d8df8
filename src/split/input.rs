use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{ErrorKind, Result, SplitError};

pub const STDIN_SENTINEL: &str = "-";

/// An opened input stream. `size` is known only for regular files.
pub(crate) struct Input {
    pub reader: Box<dyn BufRead>,
    pub size: Option<u64>,
}

impl Input {
    pub fn open(path: &Path) -> Result<Self> {
        if path == Path::new(STDIN_SENTINEL) {
            return Ok(Input { reader: Box::new(io::stdin().lock()), size: None });
        }

        let file = File::open(path).map_err(|e| SplitError::io("open", path, e))?;
        let meta = file.metadata().map_err(|e| SplitError::io("stat", path, e))?;
        if meta.is_dir() {
            return Err(SplitError::new(
                ErrorKind::IsDirectory,
                format!("{}: is a directory", path.display()),
            ));
        }
        let size = meta.is_file().then(|| meta.len());
        Ok(Input { reader: Box::new(BufReader::new(file)), size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn regular_file_is_sized() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"hello\n").unwrap();
        let input = Input::open(f.path()).unwrap();
        assert_eq!(input.size, Some(6));
    }

    #[test]
    fn directory_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Input::open(dir.path()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::IsDirectory);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Input::open(&dir.path().join("missing")).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn stdin_is_unsized() {
        let input = Input::open(Path::new("-")).unwrap();
        assert_eq!(input.size, None);
    }
}
