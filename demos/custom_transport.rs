//! Demonstrates plugging a custom [`TokenHttpClient`] into the resource clients.
//!
//! 1. Implement [`TokenHttpClient::post_form`] and return the raw status + body.
//! 2. Report transport failures with the crate's [`TransportError`] variants.
//! 3. Wrap the transport in a [`TokenRequester`] and hand it to the resource clients.

// std
use std::time::Duration;
// crates.io
use color_eyre::Result;
// self
use aztoken::{
	auth::Credential,
	error::TransportError,
	http::{HttpFuture, HttpResponse, TokenHttpClient},
	request::TokenRequest,
	requester::TokenRequester,
	resource::{GraphClient, ResourceManagerClient},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let credential = Credential::new("tenant-acme", "demo-app", "demo-secret");
	let requester =
		<TokenRequester<MockHttpClient>>::with_http_client(credential, MockHttpClient::Success);
	let response = ResourceManagerClient::new(requester.clone()).get_token().await?;

	println!(
		"Token issued by the mock transport for {}: {}.",
		response.resource,
		response.access_token.expose()
	);

	let failing = <TokenRequester<MockHttpClient>>::with_http_client(
		requester.credential().clone(),
		MockHttpClient::Unreachable,
	);

	match GraphClient::new(failing).get_token().await {
		Ok(_) => println!("Mock transport unexpectedly succeeded."),
		Err(e) => println!("Transport error surfaced to the caller: {e}."),
	}

	Ok(())
}

enum MockHttpClient {
	Success,
	Unreachable,
}
impl TokenHttpClient for MockHttpClient {
	fn post_form<'a>(&'a self, request: &'a TokenRequest, timeout: Duration) -> HttpFuture<'a> {
		Box::pin(async move {
			println!("POST {} (timeout {}s)", request.endpoint(), timeout.as_secs());

			match self {
				Self::Success => {
					let body = format!(
						r#"{{"token_type":"Bearer","expires_in":"3599","resource":"{}","access_token":"mock-access"}}"#,
						request.resource()
					);

					Ok(HttpResponse::new(200, body))
				},
				Self::Unreachable => Err(TransportError::network(std::io::Error::new(
					std::io::ErrorKind::ConnectionRefused,
					"login.microsoftonline.com refused the connection",
				))
				.into()),
			}
		})
	}
}
