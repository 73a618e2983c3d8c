//! Shared JSON-over-HTTP client for the remote adapters.
//!
//! Each adapter owns one [`HttpClient`]. Requests carry a fixed timeout and
//! are retried a fixed number of times with linear backoff when the failure
//! is classified as transient (see [`RetryClass`]).

use std::future::Future;
use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::errors::{ProviderError, RetryClass};

/// Default HTTP request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Bounded retry policy with linear backoff.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay unit; attempt `n` (1-based) waits `n * backoff_step` before retrying.
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_step * attempt
    }
}

/// Runs `operation` until it succeeds, fails terminally, or the policy's
/// attempts are exhausted. The last error is returned.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    provider: &str,
    mut operation: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.retry_class() == RetryClass::WithBackoff && attempt < policy.max_attempts => {
                let delay = policy.delay_after(attempt);
                warn!(
                    "{} attempt {}/{} failed: {}, retrying in {:?}",
                    provider, attempt, policy.max_attempts, e, delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// JSON GET client bound to one provider.
pub struct HttpClient {
    client: Client,
    provider: &'static str,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn new(provider: &'static str) -> Self {
        Self::with_policy(provider, RetryPolicy::default())
    }

    pub fn with_policy(provider: &'static str, retry: RetryPolicy) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            provider,
            retry,
        }
    }

    /// GET `url` and deserialize the JSON body, retrying transient failures.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        with_retry(&self.retry, self.provider, || self.get_once(url, query, headers)).await
    }

    async fn get_once<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let mut request = self.client.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        debug!("{} request: {} with {} params", self.provider, url, query.len());

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: self.provider.to_string(),
                }
            } else {
                ProviderError::Unavailable {
                    provider: self.provider.to_string(),
                    message: format!("Request failed: {}", e),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.status_error(status, url, body));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Unavailable {
                provider: self.provider.to_string(),
                message: format!("Failed to read body: {}", e),
            })?;

        serde_json::from_str(&text).map_err(|e| ProviderError::InvalidResponse {
            provider: self.provider.to_string(),
            message: e.to_string(),
        })
    }

    fn status_error(&self, status: StatusCode, url: &str, body: String) -> ProviderError {
        let provider = self.provider.to_string();
        match status {
            StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited { provider },
            StatusCode::NOT_FOUND => ProviderError::NotFound {
                provider,
                subject: url.to_string(),
            },
            s if s.is_server_error() => ProviderError::Unavailable {
                provider,
                message: format!("HTTP {}", s.as_u16()),
            },
            s => ProviderError::Rejected {
                provider,
                status: s.as_u16(),
                message: body,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            backoff_step: Duration::ZERO,
        }
    }

    #[test]
    fn test_backoff_is_linear() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_millis(500));
        assert_eq!(policy.delay_after(2), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(3), Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_retries_transient_failures_until_success() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;

        let result = with_retry(&fast_policy(), "test", || async move {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Err(ProviderError::Timeout {
                    provider: "test".to_string(),
                })
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;

        let result: Result<(), _> = with_retry(&fast_policy(), "test", || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(ProviderError::Unavailable {
                provider: "test".to_string(),
                message: "HTTP 503".to_string(),
            })
        })
        .await;

        assert!(matches!(result, Err(ProviderError::Unavailable { .. })));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_terminal_error_is_not_retried() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;

        let result: Result<(), _> = with_retry(&fast_policy(), "test", || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(ProviderError::NotFound {
                provider: "test".to_string(),
                subject: "AB-123-CD".to_string(),
            })
        })
        .await;

        assert!(matches!(result, Err(ProviderError::NotFound { .. })));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
