use std::io::{self, Write};

use super::config::{OutputConfig, OutputFormat};
use super::types::Envelope;

pub trait Presenter: Send + Sync {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()>;
}

pub struct JsonPresenter { pub pretty: bool }
impl Presenter for JsonPresenter {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        if self.pretty { serde_json::to_writer_pretty(&mut *w, env).map_err(to_io)? } else { serde_json::to_writer(&mut *w, env).map_err(to_io)? }
        writeln!(w)
    }
}

/// One `<path>\t<bytes>` line per chunk; the full result as JSON when pretty.
pub struct TextPresenter { pub pretty: bool }
impl Presenter for TextPresenter {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        let chunks = env.result.get("chunks").and_then(|c| c.as_array());
        for chunk in chunks.into_iter().flatten() {
            let path = chunk.get("path").and_then(|p| p.as_str()).unwrap_or("?");
            let bytes = chunk.get("bytes").and_then(|b| b.as_u64()).unwrap_or(0);
            writeln!(w, "{}\t{}", path, bytes)?;
        }
        if self.pretty {
            serde_json::to_writer_pretty(&mut *w, &env.result).map_err(to_io)?;
            writeln!(w)?;
        }
        Ok(())
    }
}

pub struct Emitter {
    presenter: Box<dyn Presenter>,
}

impl Emitter {
    pub fn from_env(cfg: OutputConfig) -> Self {
        let presenter: Box<dyn Presenter> = match cfg.format {
            OutputFormat::Json => Box::new(JsonPresenter { pretty: cfg.pretty }),
            OutputFormat::Text => Box::new(TextPresenter { pretty: cfg.pretty }),
        };
        Emitter { presenter }
    }

    pub fn emit(&self, env: &Envelope) -> io::Result<()> {
        let mut out = io::stdout().lock();
        self.presenter.emit(env, &mut out)?;
        out.flush()
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Envelope {
        let result = json!({
            "chunks": [
                {"path": "out/xaa", "bytes": 10},
                {"path": "out/xab", "bytes": 4}
            ]
        });
        Envelope::result("split", &result, None).unwrap()
    }

    #[test]
    fn text_lists_chunks() {
        let mut buf = Vec::new();
        TextPresenter { pretty: false }.emit(&sample(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "out/xaa\t10\nout/xab\t4\n");
    }

    #[test]
    fn json_is_single_line() {
        let mut buf = Vec::new();
        JsonPresenter { pretty: false }.emit(&sample(), &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s.lines().count(), 1);
        let v: serde_json::Value = serde_json::from_str(&s).unwrap();
        assert_eq!(v["result"]["chunks"][1]["bytes"], 4);
    }
}
