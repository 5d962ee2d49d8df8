pub mod config;
pub mod ctx;
pub mod ops;

use ctx::LogCtx;

pub fn split() -> LogCtx<ops::split::Split> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
