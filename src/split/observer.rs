use std::io::Write;
use std::path::Path;

/// Notified once per chunk, right before its file is created.
pub trait ChunkObserver {
    fn on_chunk_created(&mut self, path: &Path);
}

#[derive(Default)]
pub struct NoopObserver;

impl ChunkObserver for NoopObserver {
    fn on_chunk_created(&mut self, _path: &Path) {}
}

/// Writes `creating file "<path>"` lines, as `--verbose` does.
pub struct WriterObserver<W: Write> {
    w: W,
}

impl<W: Write> WriterObserver<W> {
    pub fn new(w: W) -> Self {
        Self { w }
    }

    pub fn into_inner(self) -> W {
        self.w
    }
}

impl<W: Write> ChunkObserver for WriterObserver<W> {
    fn on_chunk_created(&mut self, path: &Path) {
        // informational only; a broken verbose stream must not fail the split
        let _ = writeln!(self.w, "creating file {:?}", path.display().to_string());
    }
}

impl<F: FnMut(&Path)> ChunkObserver for F {
    fn on_chunk_created(&mut self, path: &Path) {
        self(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_observer_quotes_path() {
        let mut obs = WriterObserver::new(Vec::new());
        obs.on_chunk_created(Path::new("out/xaa"));
        obs.on_chunk_created(Path::new("out/xab"));
        let got = String::from_utf8(obs.into_inner()).unwrap();
        assert_eq!(got, "creating file \"out/xaa\"\ncreating file \"out/xab\"\n");
    }

    #[test]
    fn closure_observer_collects() {
        let mut seen = Vec::new();
        {
            let mut obs = |p: &Path| seen.push(p.to_path_buf());
            obs.on_chunk_created(Path::new("xaa"));
        }
        assert_eq!(seen, vec![Path::new("xaa").to_path_buf()]);
    }
}
