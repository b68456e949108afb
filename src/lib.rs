//! Client-credentials access tokens for Azure Resource Manager and Microsoft Graph, with typed
//! responses, one request per call, and a transport seam for tests and custom stacks.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod http;
pub mod obs;
pub mod request;
pub mod requester;
pub mod resource;
pub mod token;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;
	pub use parking_lot::Mutex;

	// self
	use crate::{auth::Credential, http::ReqwestHttpClient, requester::ReqwestTokenRequester};

	/// Credential used by tests that only care about request shape.
	pub fn test_credential() -> Credential {
		Credential::new("tenant-test", "app-test", "secret-test")
	}

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a reqwest-backed requester whose authority is the given mock server base URL.
	pub fn build_reqwest_test_requester(
		authority: &str,
		credential: Credential,
	) -> ReqwestTokenRequester {
		ReqwestTokenRequester::with_http_client(credential, test_reqwest_http_client())
			.with_authority(authority)
	}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(any(test, feature = "test"))] use parking_lot as _;
#[cfg(test)] use {color_eyre as _, httpmock as _};
