//! HTTP client abstraction for testability

use async_trait::async_trait;

use crate::error::NetworkFailureKind;

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request with query parameters and extra headers
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> crate::Result<HttpResponse>;

    /// Send a POST request with form-encoded body
    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
#[derive(Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

/// Host part of a URL, safe to log when the path carries a token
fn host_of(url: &reqwest::Url) -> &str {
    url.host_str().unwrap_or("<no host>")
}

fn parse_url(url: &str, query: &[(&str, &str)]) -> crate::Result<reqwest::Url> {
    reqwest::Url::parse_with_params(url, query)
        .map_err(|e| crate::BotError::Config(format!("Invalid URL: {}", e)))
}

fn network_error(method: &str, host: &str, err: reqwest::Error) -> crate::BotError {
    let kind = if err.is_timeout() {
        NetworkFailureKind::Timeout
    } else if err.is_redirect() {
        NetworkFailureKind::TooManyRedirects
    } else {
        NetworkFailureKind::Connection
    };
    crate::BotError::Network {
        kind,
        message: format!("{} {}: {}", method, host, err.without_url()),
    }
}

impl ReqwestHttpClient {
    async fn read(
        method: &str,
        host: &str,
        response: reqwest::Response,
    ) -> crate::Result<HttpResponse> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| network_error(method, host, e))?;

        tracing::debug!("{} {} -> {} ({} bytes)", method, host, status, body.len());
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> crate::Result<HttpResponse> {
        let url = parse_url(url, query)?;
        let host = host_of(&url).to_string();
        tracing::debug!("GET {}{}", host, url.path());

        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .send()
            .await
            .map_err(|e| network_error("GET", &host, e))?;

        Self::read("GET", &host, response).await
    }

    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> crate::Result<HttpResponse> {
        let url = parse_url(url, &[])?;
        let host = host_of(&url).to_string();
        tracing::debug!("POST {}", host);

        let response = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(|e| network_error("POST", &host, e))?;

        Self::read("POST", &host, response).await
    }
}
