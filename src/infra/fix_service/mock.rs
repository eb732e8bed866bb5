//! wiremock-based fix service mock for testing.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use super::client::FixServiceClient;

const FIX_PATH: &str = "/api/fix/";

pub struct FixServiceMockServer {
    server: MockServer,
}

impl FixServiceMockServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{FIX_PATH}", self.server.uri())
    }

    /// Client pointed at this server with a generous timeout.
    pub fn client(&self) -> FixServiceClient {
        FixServiceClient::with_endpoint(&self.endpoint(), Duration::from_secs(30)).unwrap()
    }

    /// Answer every POST with `status` and a raw body.
    pub async fn respond_raw(&self, status: u16, body: &str) {
        self.mount(ResponseTemplate::new(status).set_body_string(body))
            .await;
    }

    /// Answer with a JSON body.
    pub async fn respond_json(&self, body: serde_json::Value) {
        self.mount(ResponseTemplate::new(200).set_body_json(body))
            .await;
    }

    /// Answer with 200 after `delay`.
    pub async fn respond_delayed(&self, body: &str, delay: Duration) {
        self.mount(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .set_delay(delay),
        )
        .await;
    }

    async fn mount(&self, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(FIX_PATH))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    pub async fn received_request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }

    /// The one request the server received; fails the test otherwise.
    pub async fn single_request(&self) -> Request {
        let mut requests = self.server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.remove(0)
    }
}
