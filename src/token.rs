//! Token endpoint response model and body decoding.

// crates.io
use serde::{Deserializer, de::Error as _};
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, auth::AccessToken, error::DecodeError, obs};

/// Controls how a token endpoint body that fails to decode is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodeMode {
	/// Undecodable bodies yield an empty [`TokenResponse`]; callers detect failure through
	/// [`TokenResponse::has_access_token`].
	#[default]
	Lenient,
	/// Undecodable bodies surface as [`Error::Decode`].
	Strict,
}

/// Token endpoint response as returned by the Microsoft identity platform (v1 endpoint).
///
/// Every field is kept as the provider's string, including the numeric-looking ones.
/// Missing fields decode to empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
	/// Token type, normally `Bearer`.
	#[serde(deserialize_with = "lenient_string")]
	pub token_type: String,
	/// Lifetime in seconds.
	#[serde(deserialize_with = "lenient_string")]
	pub expires_in: String,
	/// Extended lifetime in seconds.
	#[serde(deserialize_with = "lenient_string")]
	pub ext_expires_in: String,
	/// Expiry instant in unix seconds.
	#[serde(deserialize_with = "lenient_string")]
	pub expires_on: String,
	/// Start of validity in unix seconds.
	#[serde(deserialize_with = "lenient_string")]
	pub not_before: String,
	/// Audience the token was issued for.
	#[serde(deserialize_with = "lenient_string")]
	pub resource: String,
	/// Issued access token; empty when the provider returned none.
	#[serde(deserialize_with = "lenient_access_token")]
	pub access_token: AccessToken,
	/// OAuth `error` code when the provider rejected the request.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	/// Human-readable `error_description` accompanying [`TokenResponse::error`].
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error_description: Option<String>,
}
impl TokenResponse {
	/// Returns `true` when the provider issued a non-empty access token.
	pub fn has_access_token(&self) -> bool {
		!self.access_token.is_empty()
	}

	/// Parses [`TokenResponse::expires_on`] into an instant.
	pub fn expires_on_at(&self) -> Option<OffsetDateTime> {
		parse_unix_seconds(&self.expires_on)
	}

	/// Parses [`TokenResponse::not_before`] into an instant.
	pub fn not_before_at(&self) -> Option<OffsetDateTime> {
		parse_unix_seconds(&self.not_before)
	}

	/// Parses [`TokenResponse::expires_in`] into a duration.
	pub fn expires_in_duration(&self) -> Option<Duration> {
		self.expires_in.trim().parse::<u64>().ok().map(Duration::from_secs)
	}

	/// Returns `true` if `expires_on` is known and not after `instant`.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_on_at().is_some_and(|expires_on| instant >= expires_on)
	}

	fn from_fields(fields: &Map<String, Value>, status: u16) -> Self {
		let field = |name: &str| match fields.get(name) {
			None | Some(Value::Null) => None,
			Some(Value::String(s)) => Some(s.clone()),
			Some(Value::Number(n)) => Some(n.to_string()),
			Some(_) => {
				obs::record_skipped_field(status, name);

				None
			},
		};

		Self {
			token_type: field("token_type").unwrap_or_default(),
			expires_in: field("expires_in").unwrap_or_default(),
			ext_expires_in: field("ext_expires_in").unwrap_or_default(),
			expires_on: field("expires_on").unwrap_or_default(),
			not_before: field("not_before").unwrap_or_default(),
			resource: field("resource").unwrap_or_default(),
			access_token: AccessToken::new(field("access_token").unwrap_or_default()),
			error: field("error"),
			error_description: field("error_description"),
		}
	}
}

/// Decodes a token endpoint body according to `mode`.
///
/// Lenient decoding keeps every field that has a usable value and leaves the rest at their
/// defaults; only a body that is not a JSON object yields [`TokenResponse::default`].
pub(crate) fn decode(body: &[u8], status: u16, mode: DecodeMode) -> Result<TokenResponse> {
	match mode {
		DecodeMode::Lenient => match serde_json::from_slice::<Value>(body) {
			Ok(Value::Object(fields)) => Ok(TokenResponse::from_fields(&fields, status)),
			Ok(other) => {
				let reason = format!("expected an object, found `{other}`");

				obs::record_decode_fallback(status, &reason);

				Ok(TokenResponse::default())
			},
			Err(e) => {
				obs::record_decode_fallback(status, &e);

				Ok(TokenResponse::default())
			},
		},
		DecodeMode::Strict => {
			let mut de = serde_json::Deserializer::from_slice(body);
			let response = serde_path_to_error::deserialize(&mut de)
				.map_err(|source| DecodeError::TokenResponseParse { source, status })?;

			de.end().map_err(|source| DecodeError::TrailingData { source, status })?;

			Ok(response)
		},
	}
}

fn parse_unix_seconds(raw: &str) -> Option<OffsetDateTime> {
	let secs = raw.trim().parse::<i64>().ok()?;

	OffsetDateTime::from_unix_timestamp(secs).ok()
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<Value>::deserialize(deserializer)? {
		None | Some(Value::Null) => Ok(String::new()),
		Some(Value::String(s)) => Ok(s),
		Some(Value::Number(n)) => Ok(n.to_string()),
		Some(other) => Err(D::Error::custom(format!("expected a string, found `{other}`"))),
	}
}

fn lenient_access_token<'de, D>(deserializer: D) -> Result<AccessToken, D::Error>
where
	D: Deserializer<'de>,
{
	lenient_string(deserializer).map(AccessToken::new)
}
