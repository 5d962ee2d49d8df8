use std::path::{Path, PathBuf};

use crate::error::{ErrorKind, Result, SplitError};

const ALPHABETIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const NUMERIC: &[u8] = b"0123456789";

/// Alphabet used for the two-character chunk suffix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SuffixMode {
    #[default]
    Alphabetic,
    Numeric,
}

impl SuffixMode {
    pub fn alphabet(&self) -> &'static [u8] {
        match self {
            SuffixMode::Alphabetic => ALPHABETIC,
            SuffixMode::Numeric => NUMERIC,
        }
    }

    /// Number of distinct suffixes: `aa..zz` or `00..99`.
    pub fn capacity(&self) -> usize {
        let l = self.alphabet().len();
        l * l
    }
}

/// Two-character suffix for the `index`-th chunk, most significant symbol first.
pub fn suffix_for(index: usize, mode: SuffixMode) -> Result<String> {
    let table = mode.alphabet();
    let l = table.len();
    if index >= mode.capacity() {
        return Err(SplitError::new(
            ErrorKind::SuffixExhausted,
            "output file suffixes exhausted",
        ));
    }
    let s1 = table[(index / l) % l] as char;
    let s0 = table[index % l] as char;
    Ok([s1, s0].iter().collect())
}

/// Path of the `index`-th chunk: `<out_dir>/<prefix><suffix>`.
pub fn generate_out_path(out_dir: &Path, prefix: &str, index: usize, mode: SuffixMode) -> Result<PathBuf> {
    let suffix = suffix_for(index, mode)?;
    Ok(out_dir.join(format!("{}{}", prefix, suffix)))
}
