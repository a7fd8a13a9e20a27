use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;
use workwx_domain::{ApiError, ApiResult};

use crate::errors::conversions::to_api_error;

/// HTTP client with a fixed per-request deadline.
///
/// Failed exchanges are never retried here; callers decide on their own
/// retry policy.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    timeout: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] if the TLS backend cannot be initialised.
    pub fn new() -> ApiResult<Self> {
        Self::builder().build()
    }

    /// Deadline applied to every exchange
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder once.
    ///
    /// # Errors
    /// [`ApiError::Timeout`] when the deadline passes, [`ApiError::Network`]
    /// for connection failures.
    pub async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let request = builder.build().map_err(to_api_error)?;

        let method = request.method().clone();
        let path = request.url().path().to_string();
        debug!(%method, %path, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %path, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %path, error = %err, "HTTP request failed");
                Err(self.map_error(err))
            }
        }
    }

    /// Execute the request and read the whole body.
    ///
    /// The platform reports business failures inside a 200 response, so any
    /// other HTTP status is a transport failure.
    ///
    /// # Errors
    /// Same as [`HttpClient::send`], plus [`ApiError::Network`] for non-2xx
    /// statuses and truncated bodies.
    pub async fn fetch(&self, builder: RequestBuilder) -> ApiResult<Bytes> {
        let exchange = async {
            let response = self.send(builder).await?;

            let status = response.status();
            if !status.is_success() {
                let path = response.url().path().to_string();
                return Err(ApiError::Network(format!("{path} returned HTTP status {status}")));
            }

            response.bytes().await.map_err(|err| self.map_error(err))
        };

        tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| ApiError::Timeout(self.timeout))?
    }

    fn map_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.timeout)
        } else {
            to_api_error(err)
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30), user_agent: None, default_headers: None }
    }
}

impl HttpClientBuilder {
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    #[must_use]
    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// # Errors
    /// Returns [`ApiError::Config`] if reqwest rejects the configuration.
    pub fn build(self) -> ApiResult<HttpClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(HttpClient { client, timeout: self.timeout })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::{Method, StatusCode};
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_with_timeout(timeout: Duration) -> HttpClient {
        HttpClient::builder().timeout(timeout).user_agent("workwx-test").build().unwrap()
    }

    #[tokio::test]
    async fn returns_response_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "workwx-test"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_timeout(Duration::from_secs(5));
        let response = client.send(client.request(Method::GET, server.uri())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn does_not_retry_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_timeout(Duration::from_secs(5));
        let result = client.fetch(client.request(Method::GET, server.uri())).await;

        match result {
            Err(ApiError::Network(message)) => assert!(message.contains("502")),
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_returns_body_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"errcode":0}"#))
            .mount(&server)
            .await;

        let client = client_with_timeout(Duration::from_secs(5));
        let body = client.fetch(client.request(Method::POST, server.uri())).await.unwrap();

        assert_eq!(body.as_ref(), br#"{"errcode":0}"#);
    }

    #[tokio::test]
    async fn slow_response_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let timeout = Duration::from_millis(50);
        let client = client_with_timeout(timeout);
        let result = client.fetch(client.request(Method::GET, server.uri())).await;

        assert_eq!(result.unwrap_err(), ApiError::Timeout(timeout));
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_with_timeout(Duration::from_secs(5));
        let result = client.send(client.request(Method::GET, format!("http://{addr}"))).await;

        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
