//! Pure construction of client-credentials token requests.
//!
//! A [`TokenRequest`] is fully determined by the authority, the [`Credential`], and the
//! resource audience; transports only ship it.

// crates.io
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::form_urlencoded::Serializer;
// self
use crate::{_prelude::*, auth::Credential, error::ConfigError};

/// Microsoft identity platform authority that issues every token.
pub const AUTHORITY: &str = "https://login.microsoftonline.com";
/// Content type of the token request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// Grant type sent with every request.
pub const GRANT_TYPE: &str = "client_credentials";

// Escaped inside one path segment, `/` and `%` included.
const SEGMENT: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b'#')
	.add(b'%')
	.add(b'/')
	.add(b'<')
	.add(b'>')
	.add(b'?')
	.add(b'`')
	.add(b'{')
	.add(b'}');

/// Fully built token request: endpoint plus ordered form fields.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenRequest {
	endpoint: Url,
	form: Vec<(&'static str, String)>,
}
impl TokenRequest {
	/// Builds the request against the default [`AUTHORITY`].
	pub fn new(credential: &Credential, resource: &str) -> Result<Self> {
		Self::with_authority(AUTHORITY, credential, resource)
	}

	/// Builds the request against a custom authority base URL.
	pub fn with_authority(
		authority: &str,
		credential: &Credential,
		resource: &str,
	) -> Result<Self> {
		let endpoint = token_endpoint(authority, &credential.tenant_id)?;
		let form = vec![
			("grant_type", GRANT_TYPE.to_owned()),
			("client_id", credential.application_id.clone()),
			("client_secret", credential.client_secret.expose().to_owned()),
			("resource", resource.to_owned()),
		];

		Ok(Self { endpoint, form })
	}

	/// Token endpoint the request is sent to.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// Form fields in wire order.
	pub fn form(&self) -> &[(&'static str, String)] {
		&self.form
	}

	/// Looks up a single form field.
	pub fn form_value(&self, key: &str) -> Option<&str> {
		self.form.iter().find(|(name, _)| *name == key).map(|(_, value)| value.as_str())
	}

	/// Audience the request asks a token for.
	pub fn resource(&self) -> &str {
		self.form_value("resource").unwrap_or_default()
	}

	/// Encodes the form as an `application/x-www-form-urlencoded` body.
	pub fn body(&self) -> String {
		let mut serializer = Serializer::new(String::new());

		for (key, value) in &self.form {
			serializer.append_pair(key, value);
		}

		serializer.finish()
	}
}
impl Debug for TokenRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRequest")
			.field("endpoint", &self.endpoint.as_str())
			.field("resource", &self.resource())
			.field("form", &"<redacted>")
			.finish()
	}
}

/// Appends `/{tenant_id}/oauth2/token` to the authority.
///
/// The tenant always occupies exactly one segment, so an empty tenant yields `//oauth2/token`.
pub fn token_endpoint(authority: &str, tenant_id: &str) -> Result<Url> {
	let mut endpoint =
		Url::parse(authority).map_err(|source| ConfigError::InvalidAuthority { source })?;

	if endpoint.cannot_be_a_base() {
		return Err(ConfigError::AuthorityCannotBeABase { authority: authority.to_owned() }.into());
	}

	let path = format!(
		"{}/{}/oauth2/token",
		endpoint.path().trim_end_matches('/'),
		utf8_percent_encode(tenant_id, SEGMENT)
	);

	endpoint.set_path(&path);

	Ok(endpoint)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn credential() -> Credential {
		Credential::new("contoso-tenant", "app-id", "s3cr3t&=+")
	}

	#[test]
	fn endpoint_matches_authority_layout() {
		let request = TokenRequest::new(&credential(), "https://management.azure.com")
			.expect("Request should build against the default authority.");

		assert_eq!(
			request.endpoint().as_str(),
			"https://login.microsoftonline.com/contoso-tenant/oauth2/token"
		);
	}

	#[test]
	fn form_holds_exactly_four_fields() {
		let request = TokenRequest::new(&credential(), "https://graph.microsoft.com")
			.expect("Request should build against the default authority.");
		let keys = request.form().iter().map(|(key, _)| *key).collect::<Vec<_>>();

		assert_eq!(keys, ["grant_type", "client_id", "client_secret", "resource"]);
		assert_eq!(request.form_value("grant_type"), Some("client_credentials"));
		assert_eq!(request.form_value("client_id"), Some("app-id"));
		assert_eq!(request.form_value("client_secret"), Some("s3cr3t&=+"));
		assert_eq!(request.resource(), "https://graph.microsoft.com");
	}

	#[test]
	fn body_is_url_encoded() {
		let request = TokenRequest::new(&credential(), "https://graph.microsoft.com")
			.expect("Request should build against the default authority.");

		assert_eq!(
			request.body(),
			"grant_type=client_credentials&client_id=app-id&client_secret=s3cr3t%26%3D%2B\
			 &resource=https%3A%2F%2Fgraph.microsoft.com"
		);
	}

	#[test]
	fn empty_credential_passes_through() {
		let request = TokenRequest::new(&Credential::default(), "")
			.expect("Empty credentials are not validated locally.");

		assert_eq!(request.endpoint().as_str(), "https://login.microsoftonline.com//oauth2/token");
		assert_eq!(request.form_value("client_id"), Some(""));
		assert_eq!(request.resource(), "");
	}

	#[test]
	fn custom_authority_keeps_base_path() {
		let request =
			TokenRequest::with_authority("http://127.0.0.1:8080/mock/", &credential(), "r")
				.expect("Request should build against a custom authority.");

		assert_eq!(
			request.endpoint().as_str(),
			"http://127.0.0.1:8080/mock/contoso-tenant/oauth2/token"
		);
	}

	#[test]
	fn tenant_stays_a_single_segment() {
		let credential = Credential::new("contoso/../other tenant", "app-id", "secret");
		let request = TokenRequest::new(&credential, "r")
			.expect("Request should build against the default authority.");

		assert_eq!(
			request.endpoint().as_str(),
			"https://login.microsoftonline.com/contoso%2F..%2Fother%20tenant/oauth2/token"
		);

		let request =
			TokenRequest::with_authority("http://127.0.0.1:8080", &Credential::default(), "r")
				.expect("Request should build against a custom authority.");

		assert_eq!(request.endpoint().path(), "//oauth2/token");
	}

	#[test]
	fn invalid_authorities_are_rejected() {
		let err = TokenRequest::with_authority("login.microsoftonline.com", &credential(), "r")
			.expect_err("Relative authorities should be rejected.");

		assert!(matches!(err, Error::Config(ConfigError::InvalidAuthority { .. })));

		let err = TokenRequest::with_authority("mailto:identity@example.com", &credential(), "r")
			.expect_err("Cannot-be-a-base authorities should be rejected.");

		assert!(matches!(err, Error::Config(ConfigError::AuthorityCannotBeABase { .. })));
	}

	#[test]
	fn debug_redacts_form() {
		let request = TokenRequest::new(&credential(), "https://graph.microsoft.com")
			.expect("Request should build against the default authority.");

		assert!(!format!("{request:?}").contains("s3cr3t"));
	}
}
