//! Reads `AZURE_TENANT_ID`, `AZURE_CLIENT_ID`, and `AZURE_CLIENT_SECRET`, then prints an Azure
//! Resource Manager token followed by a Microsoft Graph token.
//!
//! Failures are reported and the next audience is still tried.

// crates.io
use color_eyre::Result;
// self
use aztoken::{
	auth::Credential,
	requester::TokenRequester,
	resource::{GraphClient, ResourceClient, ResourceManagerClient},
};

async fn print_access_token(client: &dyn ResourceClient) {
	println!();

	match client.get_token().await {
		Ok(response) if response.has_access_token() => {
			println!("{}", response.access_token.expose())
		},
		Ok(response) => match response.error_description.or(response.error) {
			Some(reason) => println!("No Token received ({}): {reason}", client.audience()),
			None => println!("No Token received ({}).", client.audience()),
		},
		Err(e) => eprintln!("Token request for {} failed: {e}.", client.audience()),
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let requester = TokenRequester::new(Credential::from_env());
	let manager = ResourceManagerClient::new(requester.clone());
	let graph = GraphClient::new(requester);

	print_access_token(&manager).await;
	print_access_token(&graph).await;

	Ok(())
}
