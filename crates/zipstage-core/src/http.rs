//! HTTP capability used by the fetcher.

use std::io::Read;

use crate::FetchConfig;
use crate::Result;
use crate::ZipstageError;

/// Status and body of an HTTP GET.
pub struct HttpResponse {
    status: u16,
    body: Box<dyn Read + Send>,
}

impl HttpResponse {
    /// Creates a response from a status code and a body stream.
    pub fn new(status: u16, body: impl Read + Send + 'static) -> Self {
        Self {
            status,
            body: Box::new(body),
        }
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Consumes the response, returning its body.
    pub fn into_body(self) -> Box<dyn Read + Send> {
        self.body
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Performs HTTP GET requests.
///
/// Redirects, TLS and connection handling belong to the implementation. A
/// request that cannot be performed fails with
/// [`ZipstageError::Transport`].
pub trait HttpClient {
    /// Issues a GET request for `url`.
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Builds a client using the timeout and user agent from `config`.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ZipstageError::transport("", e))?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ZipstageError::transport(url, e))?;
        Ok(HttpResponse::new(response.status().as_u16(), response))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_response_accessors() {
        let response = HttpResponse::new(200, Cursor::new(b"body".to_vec()));
        assert_eq!(response.status(), 200);
        assert!(format!("{response:?}").contains("200"));

        let mut body = Vec::new();
        response.into_body().read_to_end(&mut body).unwrap();
        assert_eq!(body, b"body");
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(ReqwestClient::new(&FetchConfig::default()).is_ok());
    }

    #[test]
    fn test_unreachable_host_is_transport_error() {
        let client = ReqwestClient::new(&FetchConfig::default()).unwrap();
        // Port 9 (discard) on loopback is closed on test machines.
        let result = client.get("http://127.0.0.1:9/archive.zip");
        assert!(matches!(result, Err(ZipstageError::Transport { .. })));
    }
}
