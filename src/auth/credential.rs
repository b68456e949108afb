//! Application credential used for the client-credentials grant.

// self
use crate::{_prelude::*, auth::ClientSecret, error::ConfigError};

/// Environment variable holding the application (client) identifier.
pub const ENV_CLIENT_ID: &str = "AZURE_CLIENT_ID";
/// Environment variable holding the tenant identifier.
pub const ENV_TENANT_ID: &str = "AZURE_TENANT_ID";
/// Environment variable holding the client secret.
pub const ENV_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";

/// Tenant, application, and secret triple identifying a confidential client.
///
/// Values are opaque and never validated locally; empty strings are forwarded to the
/// token endpoint, which rejects them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credential {
	/// Azure AD tenant identifier; forms part of the token endpoint path.
	pub tenant_id: String,
	/// Application (client) identifier.
	pub application_id: String,
	/// Application client secret.
	pub client_secret: ClientSecret,
}
impl Credential {
	/// Creates a credential from its three parts.
	pub fn new(
		tenant_id: impl Into<String>,
		application_id: impl Into<String>,
		client_secret: impl Into<ClientSecret>,
	) -> Self {
		Self {
			tenant_id: tenant_id.into(),
			application_id: application_id.into(),
			client_secret: client_secret.into(),
		}
	}

	/// Reads `AZURE_TENANT_ID`, `AZURE_CLIENT_ID`, and `AZURE_CLIENT_SECRET`.
	///
	/// Unset variables become empty strings.
	pub fn from_env() -> Self {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Like [`Credential::from_env`], but fails on the first unset variable.
	pub fn try_from_env() -> Result<Self> {
		Self::try_from_lookup(|name| std::env::var(name).ok())
	}

	fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Self {
		Self::new(
			lookup(ENV_TENANT_ID).unwrap_or_default(),
			lookup(ENV_CLIENT_ID).unwrap_or_default(),
			lookup(ENV_CLIENT_SECRET).unwrap_or_default(),
		)
	}

	fn try_from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self> {
		let require = |name: &'static str| lookup(name).ok_or(ConfigError::MissingEnv { name });

		Ok(Self::new(
			require(ENV_TENANT_ID)?,
			require(ENV_CLIENT_ID)?,
			require(ENV_CLIENT_SECRET)?,
		))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn lookup(name: &str) -> Option<String> {
		match name {
			ENV_TENANT_ID => Some("tenant-1".into()),
			ENV_CLIENT_ID => Some("app-1".into()),
			_ => None,
		}
	}

	#[test]
	fn lenient_lookup_defaults_missing_values() {
		let credential = Credential::from_lookup(lookup);

		assert_eq!(credential.tenant_id, "tenant-1");
		assert_eq!(credential.application_id, "app-1");
		assert!(credential.client_secret.is_empty());
	}

	#[test]
	fn strict_lookup_names_missing_variable() {
		let err = Credential::try_from_lookup(lookup)
			.expect_err("Missing client secret should fail strict loading.");

		assert!(matches!(
			err,
			Error::Config(ConfigError::MissingEnv { name: ENV_CLIENT_SECRET })
		));
	}

	#[test]
	fn debug_redacts_secret() {
		let credential = Credential::new("tenant", "app", "hunter2");

		assert!(!format!("{credential:?}").contains("hunter2"));
	}
}
