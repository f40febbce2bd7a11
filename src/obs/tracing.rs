// self
use crate::{_prelude::*, error::ErrorKind, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// Span wrapped around a single provider call.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("clef_api.call", call = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event for a response classified as success.
pub fn trace_call_success(kind: CallKind) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(call = kind.as_str(), "Clef call succeeded.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = kind;
	}
}

/// Emits a warning event for a failed call; never includes request parameters.
pub fn trace_call_failure(kind: CallKind, error: ErrorKind, status: Option<u16>) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(call = kind.as_str(), error = error.as_str(), status, "Clef call failed.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, error, status);
	}
}
