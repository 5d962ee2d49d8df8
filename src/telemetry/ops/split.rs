use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Split;

#[derive(Copy, Clone, Debug)]
pub enum Phase { OpenInput, Preflight, WriteChunk, Cleanup }

impl PhaseSpan for Phase {
    fn span(&self) -> Span { match self {
        Phase::OpenInput => info_span!("open_input"),
        Phase::Preflight => info_span!("preflight"),
        Phase::WriteChunk => info_span!("write_chunk"),
        Phase::Cleanup => info_span!("cleanup"),
    }}
}

impl OpMarker for Split {
    const NAME: &'static str = "split";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("split") }
}
