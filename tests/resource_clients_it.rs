// crates.io
use httpmock::prelude::*;
// self
use aztoken::{
	_preludet::*,
	auth::Credential,
	http::{HttpFuture, HttpResponse, TokenHttpClient},
	request::TokenRequest,
	requester::TokenRequester,
	resource::{Audience, GraphClient, ResourceClient, ResourceManagerClient},
};

#[derive(Default)]
struct RecordingHttpClient {
	requests: Mutex<Vec<TokenRequest>>,
}
impl RecordingHttpClient {
	fn recorded(&self) -> Vec<TokenRequest> {
		self.requests.lock().clone()
	}
}
impl TokenHttpClient for RecordingHttpClient {
	fn post_form<'a>(
		&'a self,
		request: &'a TokenRequest,
		_timeout: Duration,
	) -> HttpFuture<'a> {
		self.requests.lock().push(request.clone());

		Box::pin(async { Ok(HttpResponse::new(200, r#"{"access_token":"recorded"}"#)) })
	}
}

fn credential() -> Credential {
	Credential::new("tenant-rc", "app-rc", "secret-rc")
}

#[tokio::test]
async fn audiences_differ_only_in_resource_field() {
	let transport = Arc::new(RecordingHttpClient::default());
	let requester =
		<TokenRequester<RecordingHttpClient>>::with_http_client(credential(), transport.clone());
	let manager = ResourceManagerClient::new(requester.clone());
	let graph = GraphClient::new(requester);

	manager.get_token().await.expect("Resource Manager token should be issued.");
	graph.get_token().await.expect("Graph token should be issued.");

	let recorded = transport.recorded();

	assert_eq!(recorded.len(), 2);

	let (manager_request, graph_request) = (&recorded[0], &recorded[1]);

	assert_eq!(manager_request.endpoint(), graph_request.endpoint());
	assert_eq!(manager_request.resource(), "https://management.azure.com");
	assert_eq!(graph_request.resource(), "https://graph.microsoft.com");

	for ((manager_key, manager_value), (graph_key, graph_value)) in
		manager_request.form().iter().zip(graph_request.form())
	{
		assert_eq!(manager_key, graph_key);

		if *manager_key != "resource" {
			assert_eq!(manager_value, graph_value);
		}
	}
}

#[tokio::test]
async fn each_call_hits_the_endpoint() {
	let server = MockServer::start_async().await;
	let requester = build_reqwest_test_requester(&server.base_url(), credential());
	let body_for = |audience: Audience| {
		requester
			.build_request(audience.as_str())
			.expect("Request should build against the mock authority.")
			.body()
	};
	let manager_body = body_for(Audience::ResourceManager);
	let graph_body = body_for(Audience::Graph);
	let manager_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/tenant-rc/oauth2/token")
				.body(manager_body.as_str());
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"resource":"https://management.azure.com","access_token":"arm"}"#);
		})
		.await;
	let graph_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/tenant-rc/oauth2/token")
				.body(graph_body.as_str());
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"resource":"https://graph.microsoft.com","access_token":"graph"}"#);
		})
		.await;
	let clients: Vec<Box<dyn ResourceClient>> = vec![
		Box::new(ResourceManagerClient::new(requester.clone())),
		Box::new(GraphClient::new(requester)),
	];

	for _ in 0..2 {
		for client in &clients {
			let response = client.get_token().await.expect("Mock endpoint should issue tokens.");

			match client.audience() {
				Audience::ResourceManager => assert_eq!(response.access_token.expose(), "arm"),
				Audience::Graph => assert_eq!(response.access_token.expose(), "graph"),
			}

			assert_eq!(response.resource, client.audience().as_str());
		}
	}

	manager_mock.assert_calls_async(2).await;
	graph_mock.assert_calls_async(2).await;
}
