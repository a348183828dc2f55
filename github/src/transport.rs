use serde_json::Value;
use std::time::Duration;

use crate::error::FetchError;
use crate::query::GraphQlRequest;

pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Sends one GraphQL request on behalf of a token
pub trait Transport {
    fn execute(&self, token: &str, request: &GraphQlRequest) -> Result<Value, FetchError>;
}

/// Blocking HTTPS transport
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    endpoint: String,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(GITHUB_GRAPHQL_URL)
    }
}

impl UreqTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("commitgraph/", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            agent,
            endpoint: endpoint.into(),
        }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, token: &str, request: &GraphQlRequest) -> Result<Value, FetchError> {
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("Bearer {token}"))
            .set("Accept", "application/json")
            .send_json(request);

        match response {
            Ok(response) => response
                .into_json::<Value>()
                .map_err(|err| FetchError::Transport(format!("unreadable response body: {err}"))),
            Err(ureq::Error::Status(401, _)) => Err(FetchError::Unauthorized),
            Err(ureq::Error::Status(status, response)) => Err(FetchError::Http {
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(err)) => Err(FetchError::Transport(err.to_string())),
        }
    }
}
