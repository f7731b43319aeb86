//! Structured logging helpers shared across the ranking pipeline.

use slog::Drain;

/// Wrapper around [`std::time::Instant`] that serializes itself as an
/// elapsed-time key (`Δ`) when logged via slog.
#[derive(Copy, Clone)]
pub struct PerfTimer {
	t0: std::time::Instant,
}

impl PerfTimer {
	#[inline]
	pub fn now() -> PerfTimer {
		PerfTimer { t0: std::time::Instant::now() }
	}

	#[inline]
	pub fn elapsed(&self) -> std::time::Duration {
		self.t0.elapsed()
	}
}

impl std::fmt::Display for PerfTimer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:.3?}", self.elapsed())
	}
}

impl slog::KV for PerfTimer {
	fn serialize(&self, _record: &slog::Record, serializer: &mut dyn slog::Serializer) -> slog::Result {
		serializer.emit_arguments("Δ", &format_args!("{}", self))
	}
}

/// Instantiates a [`PerfTimer`] bound to `$id`, for use as a trailing
/// `slog` key-value pair (`trace!(log, "..."; t_query)`).
macro_rules! time {
	($id:ident) => {
		let $id = $crate::logging::PerfTimer::now();
	};
}

pub(crate) use time;

/// A terminal-backed root logger, suitable for tests, doc examples, and
/// callers that do not want to wire up their own `slog::Logger`.
pub fn root_logger() -> slog::Logger {
	let drain = slog_term::term_compact().fuse();
	slog::Logger::root(drain, slog::o!())
}

/// A logger that discards everything, for latency-sensitive callers or
/// tests that don't want log noise.
pub fn discard_logger() -> slog::Logger {
	slog::Logger::root(slog::Discard, slog::o!())
}
