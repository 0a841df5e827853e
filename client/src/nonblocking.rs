//! Non-blocking transport built on `reqwest`.

use cardcast_core::{
    AsyncCardcast, AsyncTransport, CardcastClient, ClientConfig, HttpRequest, HttpResponse, TransportError,
};

/// Executes requests on whatever tokio runtime polls the returned futures.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl AsyncTransport for ReqwestTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.http.get(&request.url).query(&request.query);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response.text().await.map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}

/// Non-blocking client over reqwest.
pub type AsyncClient = AsyncCardcast<ReqwestTransport>;

pub fn async_client(config: ClientConfig) -> AsyncClient {
    AsyncCardcast::new(CardcastClient::with_config(config), ReqwestTransport::new())
}
