//! Blocking transport built on `ureq`.

use cardcast_core::{Cardcast, CardcastClient, ClientConfig, HttpRequest, HttpResponse, Transport, TransportError};

/// Executes requests on the calling thread with a shared `ureq::Agent`.
///
/// The agent is configured to hand back 4xx/5xx responses as data so the
/// client can map them itself. No timeout is set beyond ureq's defaults.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.get(&request.url);
        for (key, value) in &request.query {
            builder = builder.query(key, value);
        }
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let mut response = builder.call().map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}

/// Blocking client over ureq.
pub type BlockingClient = Cardcast<UreqTransport>;

pub fn blocking_client(config: ClientConfig) -> BlockingClient {
    Cardcast::new(CardcastClient::with_config(config), UreqTransport::new())
}
