//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! One instance is shared by every request of a suite run.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use crudcheck_application::ports::{HttpClient, HttpClientError};
use crudcheck_domain::{
    request::{HttpMethod, RequestBody, RequestSpec},
    response::ResponseSpec,
};
use reqwest::{Client, Method};

use crate::serialization::validate_json;

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client.
    ///
    /// Configuration:
    /// - No request timeout beyond the transport default
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(user_agent: &str) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a new HTTP client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Attaches the body, rejecting JSON that does not parse.
    fn build_body(
        builder: reqwest::RequestBuilder,
        body: &RequestBody,
    ) -> Result<reqwest::RequestBuilder, HttpClientError> {
        if body.is_empty() {
            return Ok(builder);
        }

        if body
            .content_type()
            .is_some_and(|ct| ct.contains("application/json"))
        {
            validate_json(&body.content)
                .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}")))?;
        }

        Ok(builder.body(body.content.clone()))
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(error: &reqwest::Error) -> HttpClientError {
        let host = || {
            error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms: 0 };
        }

        if error.is_connect() {
            let message = error.to_string();
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(error.to_string())
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>> {
        let request = request.clone();

        Box::pin(async move {
            let url = request
                .parsed_url()
                .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;

            let start = Instant::now();

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(request.method), url);

            for header in &request.headers {
                builder = builder.header(&header.name, &header.value);
            }

            if let Some(content_type) = request.body.content_type()
                && !request.has_header("content-type")
            {
                builder = builder.header("Content-Type", content_type);
            }

            builder = Self::build_body(builder, &request.body)?;

            let response = builder.send().await.map_err(|e| {
                let error = Self::map_error(&e);
                tracing::warn!(
                    method = %request.method,
                    url = %request.url,
                    error = %error,
                    "transport failure"
                );
                error
            })?;

            let status = response.status().as_u16();
            tracing::debug!(
                method = %request.method,
                url = %request.url,
                status,
                elapsed_ms = start.elapsed().as_millis(),
                "response received"
            );

            let headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
                .collect();

            let body = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?
                .to_vec();

            Ok(ResponseSpec::new(status, headers, body, start.elapsed()))
        })
    }
}
