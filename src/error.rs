//! Crate-level error types shared by requesters, transports, and resource clients.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// An empty access token is not an error; see [`TokenResponse::has_access_token`].
///
/// [`TokenResponse::has_access_token`]: crate::token::TokenResponse::has_access_token
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem (authority URL, request or client construction).
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token endpoint body could not be decoded (strict decode mode only).
	#[error(transparent)]
	Decode(#[from] DecodeError),
}
impl Error {
	/// Returns `true` when the request exceeded its timeout.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Transport(TransportError::Timeout { .. }))
	}
}

/// Configuration and construction failures raised before any bytes hit the wire.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Authority base URL cannot be parsed.
	#[error("Authority URL is invalid.")]
	InvalidAuthority {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Authority URL cannot carry path segments (e.g. `mailto:` or `data:` URLs).
	#[error("Authority URL `{authority}` cannot be used as a base for the token endpoint.")]
	AuthorityCannotBeABase {
		/// Offending authority.
		authority: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error("HTTP request could not be constructed.")]
	HttpRequest {
		/// Underlying request builder failure.
		#[source]
		source: BoxError,
	},
	/// Required environment variable is not set.
	#[error("Environment variable `{name}` is not set.")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	/// Wraps a request builder failure inside [`ConfigError`].
	pub fn http_request(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpRequest { source: Box::new(src) }
	}
}

/// Transport-level failures (network, timeout).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Token endpoint did not answer within the configured timeout.
	#[error("Token endpoint did not respond within {}ms.", .timeout.as_millis())]
	Timeout {
		/// Timeout that was exceeded.
		timeout: Duration,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}

/// Token endpoint body decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Token endpoint responded with a body that is not a token response object.
	#[error("Token endpoint returned malformed JSON (HTTP status {status}).")]
	TokenResponseParse {
		/// Structured parsing failure, including the JSON path that failed.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Token endpoint appended data after the JSON object.
	#[error("Token endpoint returned trailing data after the JSON body (HTTP status {status}).")]
	TrailingData {
		/// Underlying parser failure.
		#[source]
		source: serde_json::Error,
		/// HTTP status code of the response.
		status: u16,
	},
}
