//! Transport primitives for token requests.
//!
//! [`TokenHttpClient`] is the crate's only dependency on an HTTP stack. The default
//! [`ReqwestHttpClient`] (behind the `reqwest` feature) covers production use; tests and
//! embedders can supply their own implementation, e.g. to route through a proxy layer.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::CONTENT_TYPE;
// self
use crate::{_prelude::*, request::TokenRequest};
#[cfg(feature = "reqwest")]
use crate::{
	error::{ConfigError, TransportError},
	request::FORM_CONTENT_TYPE,
};

/// Boxed future returned by [`TokenHttpClient::post_form`].
pub type HttpFuture<'a> = Pin<Box<dyn Future<Output = Result<HttpResponse>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of shipping a [`TokenRequest`].
///
/// Implementations POST [`TokenRequest::body`] to [`TokenRequest::endpoint`] with a
/// `Content-Type: application/x-www-form-urlencoded` header, abort once `timeout` elapses
/// with [`TransportError::Timeout`](crate::error::TransportError::Timeout), and return the
/// raw status plus body for any HTTP status. Status codes are not errors at this layer.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and collects the full response body.
	fn post_form<'a>(&'a self, request: &'a TokenRequest, timeout: Duration) -> HttpFuture<'a>;
}

/// Raw response captured by a transport.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code returned by the token endpoint.
	pub status: u16,
	/// Undecoded response body.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Creates a response from its status and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Token endpoints answer directly; configure any custom [`ReqwestClient`] without redirect
/// following if the authority is not trusted to do the same.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client that never follows redirects.
	pub fn without_redirects() -> Result<Self> {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	fn post_form<'a>(&'a self, request: &'a TokenRequest, timeout: Duration) -> HttpFuture<'a> {
		Box::pin(async move {
			let response = self
				.0
				.post(request.endpoint().clone())
				.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
				.body(request.body())
				.timeout(timeout)
				.send()
				.await
				.map_err(|e| map_reqwest_error(e, timeout))?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(|e| map_reqwest_error(e, timeout))?;

			Ok(HttpResponse::new(status, body.to_vec()))
		})
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError, timeout: Duration) -> Error {
	if err.is_builder() {
		return ConfigError::http_request(err).into();
	}
	if err.is_timeout() {
		return TransportError::Timeout { timeout }.into();
	}

	TransportError::network(err).into()
}
