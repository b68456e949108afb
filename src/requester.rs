//! Client-credentials token requester.
//!
//! [`TokenRequester`] owns one [`Credential`] and an HTTP transport and turns a resource
//! audience into a [`TokenResponse`]: one POST per call, no caching, no retries.

// self
use crate::{
	_prelude::*,
	auth::Credential,
	http::TokenHttpClient,
	obs::{self, RequestOutcome, RequestSpan},
	request::{AUTHORITY, TokenRequest},
	token::{self, DecodeMode, TokenResponse},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Timeout applied to every token request unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[cfg(feature = "reqwest")]
/// Requester specialized for the crate's default reqwest transport.
pub type ReqwestTokenRequester = TokenRequester<ReqwestHttpClient>;

/// Issues client-credentials token requests for a fixed [`Credential`].
///
/// The credential is set at construction and cannot be replaced afterwards, so every
/// request made through one requester (or the resource clients built on it) authenticates
/// as the same application.
pub struct TokenRequester<C>
where
	C: ?Sized + TokenHttpClient,
{
	credential: Credential,
	authority: String,
	timeout: Duration,
	decode_mode: DecodeMode,
	http_client: Arc<C>,
}
impl<C> TokenRequester<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates a requester that ships requests through the provided transport.
	pub fn with_http_client(credential: Credential, http_client: impl Into<Arc<C>>) -> Self {
		Self {
			credential,
			authority: AUTHORITY.to_owned(),
			timeout: DEFAULT_TIMEOUT,
			decode_mode: DecodeMode::default(),
			http_client: http_client.into(),
		}
	}

	/// Overrides the authority base URL (defaults to [`AUTHORITY`]).
	pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
		self.authority = authority.into();

		self
	}

	/// Overrides the request timeout (defaults to [`DEFAULT_TIMEOUT`]).
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Selects how undecodable response bodies are handled.
	pub fn with_decode_mode(mut self, mode: DecodeMode) -> Self {
		self.decode_mode = mode;

		self
	}

	/// Credential presented on every request.
	pub fn credential(&self) -> &Credential {
		&self.credential
	}

	/// Authority base URL.
	pub fn authority(&self) -> &str {
		&self.authority
	}

	/// Request timeout.
	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	/// Decode policy for response bodies.
	pub fn decode_mode(&self) -> DecodeMode {
		self.decode_mode
	}

	/// Shared transport handle.
	pub fn http_client(&self) -> &Arc<C> {
		&self.http_client
	}

	/// Builds, without sending, the request for `resource`.
	pub fn build_request(&self, resource: &str) -> Result<TokenRequest> {
		TokenRequest::with_authority(&self.authority, &self.credential, resource)
	}

	/// Requests a token for `resource` and decodes the endpoint's answer.
	///
	/// The body is decoded whatever the HTTP status, so a rejected request usually comes
	/// back as a [`TokenResponse`] with an empty access token and the provider's `error`
	/// fields populated.
	pub async fn request_token(&self, resource: &str) -> Result<TokenResponse> {
		let span = RequestSpan::new(resource);

		obs::record_request_outcome(resource, RequestOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = self.build_request(resource)?;
				let response = self.http_client.post_form(&request, self.timeout).await?;

				token::decode(&response.body, response.status, self.decode_mode)
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(resource, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(resource, RequestOutcome::Failure),
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl TokenRequester<ReqwestHttpClient> {
	/// Creates a requester backed by a fresh reqwest transport.
	pub fn new(credential: Credential) -> Self {
		Self::with_http_client(credential, ReqwestHttpClient::default())
	}
}
impl<C> Clone for TokenRequester<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			credential: self.credential.clone(),
			authority: self.authority.clone(),
			timeout: self.timeout,
			decode_mode: self.decode_mode,
			http_client: Arc::clone(&self.http_client),
		}
	}
}
impl<C> Debug for TokenRequester<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRequester")
			.field("tenant_id", &self.credential.tenant_id)
			.field("application_id", &self.credential.application_id)
			.field("authority", &self.authority)
			.field("timeout", &self.timeout)
			.field("decode_mode", &self.decode_mode)
			.finish()
	}
}
