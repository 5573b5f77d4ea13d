//! Shared HTTP transport for provider adapters.

use council_application::GatewayError;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest upstream error body kept in a [`GatewayError::HttpStatus`].
const MAX_ERROR_BODY: usize = 500;

/// Connect timeout for upstream APIs. The per-query timeout is enforced
/// by the application layer.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A `reqwest` client plus the transport-level retry budget.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    max_retries: u32,
}

impl HttpTransport {
    pub fn new(max_retries: u32) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("model-council/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            max_retries,
        })
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// POST a JSON body and return the JSON response, re-sending on
    /// transient failures.
    pub async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &Value,
    ) -> Result<Value, GatewayError> {
        with_retries(self.max_retries, || self.send_once(url, headers, body)).await
    }

    async fn send_once(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &Value,
    ) -> Result<Value, GatewayError> {
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

/// Run `op`, re-running it immediately up to `max_retries` more times
/// while it fails with a transient error.
pub async fn with_retries<F, Fut, T>(max_retries: u32, mut op: F) -> Result<T, GatewayError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GatewayError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < max_retries => {
                attempt += 1;
                warn!("Transient error ({}), retry {}/{}", e, attempt, max_retries);
            }
            Err(e) => {
                if attempt > 0 {
                    debug!("Giving up after {} retries", attempt);
                }
                return Err(e);
            }
        }
    }
}

fn map_reqwest_error(e: reqwest::Error) -> GatewayError {
    if e.is_connect() || e.is_timeout() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

fn truncate_body(body: &str) -> String {
    council_domain::core::string::truncate(body.trim(), MAX_ERROR_BODY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_retries_transient_errors() {
        let attempts = AtomicU32::new(0);
        let result = with_retries(2, || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(GatewayError::HttpStatus {
                        status: 503,
                        body: String::new(),
                    })
                } else {
                    Ok("ok")
                }
            }
        })
        .await;

        assert_eq!(result, Ok("ok"));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_budget() {
        let attempts = AtomicU32::new(0);
        let result: Result<(), _> = with_retries(2, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(GatewayError::ConnectionError("reset".into())) }
        })
        .await;

        assert!(matches!(result, Err(GatewayError::ConnectionError(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_errors_not_retried() {
        let attempts = AtomicU32::new(0);
        let result: Result<(), _> = with_retries(2, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async {
                Err(GatewayError::HttpStatus {
                    status: 401,
                    body: "bad key".into(),
                })
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(2000);
        assert!(truncate_body(&long).len() <= MAX_ERROR_BODY + 3);
    }
}
