use std::path::Path;
use std::marker::PhantomData;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, debug, warn, Span};

use crate::output::config::OutputConfig;
use crate::output::types::{Envelope, Meta};
use crate::output::Emitter;

pub trait PhaseSpan {
    fn span(&self) -> Span;
}

pub trait OpMarker {
    const NAME: &'static str;
    type Phase: PhaseSpan;
    fn root_span() -> Span;
}

pub struct LogCtx<O: OpMarker> {
    pub(crate) json: bool,
    pub(crate) _marker: PhantomData<O>,
}

impl<O: OpMarker> LogCtx<O> {
    fn op_name(&self) -> &'static str { O::NAME }

    pub fn root_span(&self) -> Span { O::root_span() }

    pub fn root_span_kv<'a, T>(&self, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.root_span();
        let details = kv_to_string(fields);
        if details.is_empty() {
            debug!(op = %self.op_name(), "start");
        } else {
            debug!(op = %self.op_name(), details = %details, "start");
        }
        span
    }

    pub fn span(&self, ph: &O::Phase) -> Span { ph.span() }

    pub fn warn(&self, msg: impl AsRef<str>) { if self.json { warn!(op = %self.op_name(), "{}", msg.as_ref()); } else { warn!("{}", msg.as_ref()); } }

    pub fn result<T: Serialize>(&self, result: &T, duration_ms: Option<u128>) -> Result<()> {
        let meta = duration_ms.map(|d| Meta { duration_ms: Some(d) });
        let env = Envelope::result(self.op_name(), result, meta)?;
        Emitter::from_env(OutputConfig::from_env()).emit(&env)?;
        Ok(())
    }
}

// Split-specific helpers
impl LogCtx<crate::telemetry::ops::split::Split> {
    pub fn chunk_created(&self, index: usize, path: &Path) {
        if self.json { debug!(op = %self.op_name(), index, path = %path.display(), "chunk_created"); }
        else { debug!("creating chunk #{} {}", index, path.display()); }
    }

    pub fn chunk_removed(&self, path: &Path) {
        if self.json { debug!(op = %self.op_name(), path = %path.display(), "chunk_removed"); }
        else { debug!("removed empty chunk {}", path.display()); }
    }

    pub fn totals(&self, chunks: usize, bytes: u64) {
        if self.json { info!(op = %self.op_name(), chunks, bytes, "split_totals"); }
        else { info!("split totals: chunks={} bytes={}", chunks, bytes); }
    }
}

fn kv_to_string<'a, T>(kv: T) -> String
where
    T: IntoIterator<Item = (&'a str, String)>,
{
    let mut parts: Vec<String> = Vec::new();
    for (k, v) in kv { parts.push(format!("{}={}", k, v)); }
    parts.join(" ")
}
