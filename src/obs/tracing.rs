// self
use crate::_prelude::*;

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// A span wrapping one token request.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the requested resource audience.
	pub fn new(resource: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("aztoken.request", resource);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = resource;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
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

/// Logs that a token endpoint body was discarded by lenient decoding.
pub fn record_decode_fallback(status: u16, reason: &impl Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(status, %reason, "token endpoint body is not a token response; using defaults");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (status, reason);
	}
}

/// Logs that lenient decoding left one mistyped field at its default.
pub fn record_skipped_field(status: u16, field: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(status, field, "token endpoint field has an unexpected type; skipped");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (status, field);
	}
}
