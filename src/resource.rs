//! Resource clients bound to a fixed audience.
//!
//! [`ResourceManagerClient`] and [`GraphClient`] differ only in the audience they pass to
//! their [`TokenRequester`]; both implement [`ResourceClient`] so callers can treat them
//! uniformly (e.g. `&dyn ResourceClient`).

// self
use crate::{_prelude::*, http::TokenHttpClient, requester::TokenRequester, token::TokenResponse};
#[cfg(feature = "reqwest")] use crate::{auth::Credential, http::ReqwestHttpClient};

/// Boxed future returned by [`ResourceClient::get_token`].
pub type TokenFuture<'a> = Pin<Box<dyn Future<Output = Result<TokenResponse>> + 'a + Send>>;

/// Azure Resource Manager audience.
pub const RESOURCE_MANAGER_AUDIENCE: &str = "https://management.azure.com";
/// Microsoft Graph audience.
pub const GRAPH_AUDIENCE: &str = "https://graph.microsoft.com";

/// APIs a token can be requested for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Audience {
	/// Azure Resource Manager (management plane).
	ResourceManager,
	/// Microsoft Graph.
	Graph,
}
impl Audience {
	/// Returns the audience URL sent as the `resource` form field.
	pub const fn as_str(self) -> &'static str {
		match self {
			Audience::ResourceManager => RESOURCE_MANAGER_AUDIENCE,
			Audience::Graph => GRAPH_AUDIENCE,
		}
	}
}
impl Display for Audience {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Anything that can fetch a token for its own audience.
pub trait ResourceClient: Send + Sync {
	/// Audience this client requests tokens for.
	fn audience(&self) -> Audience;

	/// Requests a fresh token; every call hits the token endpoint.
	fn get_token(&self) -> TokenFuture<'_>;
}

macro_rules! def_resource_client {
	($name:ident, $audience:expr, $doc:literal) => {
		#[doc = $doc]
		pub struct $name<C>
		where
			C: ?Sized + TokenHttpClient,
		{
			requester: TokenRequester<C>,
		}
		impl<C> $name<C>
		where
			C: ?Sized + TokenHttpClient,
		{
			/// Audience bound to this client.
			pub const AUDIENCE: Audience = $audience;

			/// Wraps a requester; the client only ever asks it for [`Self::AUDIENCE`].
			pub fn new(requester: TokenRequester<C>) -> Self {
				Self { requester }
			}

			/// Underlying requester.
			pub fn requester(&self) -> &TokenRequester<C> {
				&self.requester
			}

			/// Requests a fresh token for [`Self::AUDIENCE`].
			pub async fn get_token(&self) -> Result<TokenResponse> {
				self.requester.request_token(Self::AUDIENCE.as_str()).await
			}
		}
		#[cfg(feature = "reqwest")]
		impl $name<ReqwestHttpClient> {
			/// Creates a client backed by a fresh reqwest transport.
			pub fn from_credential(credential: Credential) -> Self {
				Self::new(TokenRequester::new(credential))
			}
		}
		impl<C> ResourceClient for $name<C>
		where
			C: ?Sized + TokenHttpClient,
		{
			fn audience(&self) -> Audience {
				Self::AUDIENCE
			}

			fn get_token(&self) -> TokenFuture<'_> {
				Box::pin($name::get_token(self))
			}
		}
		impl<C> Clone for $name<C>
		where
			C: ?Sized + TokenHttpClient,
		{
			fn clone(&self) -> Self {
				Self { requester: self.requester.clone() }
			}
		}
		impl<C> Debug for $name<C>
		where
			C: ?Sized + TokenHttpClient,
		{
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_struct(stringify!($name))
					.field("audience", &Self::AUDIENCE.as_str())
					.field("requester", &self.requester)
					.finish()
			}
		}
	};
}

def_resource_client! {
	ResourceManagerClient,
	Audience::ResourceManager,
	"Requests tokens for Azure Resource Manager (`https://management.azure.com`)."
}
def_resource_client! {
	GraphClient,
	Audience::Graph,
	"Requests tokens for Microsoft Graph (`https://graph.microsoft.com`)."
}
