//! HTTP transport

use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{Result, WikiError};
use crate::params::QueryParams;

/// Issues one GET and hands back the body of a successful response.
///
/// Non-success statuses and transport failures are reported as
/// [`WikiError::RemoteApi`]; nothing is retried at this layer.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, params: &QueryParams) -> Result<String>;
}

/// Blocking reqwest transport
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a transport with the timeout and User-Agent from `config`
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, params: &QueryParams) -> Result<String> {
        tracing::debug!("GET {} {:?}", url, params.as_pairs());

        let response = self.client.get(url).query(params.as_pairs()).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            tracing::warn!("Wikipedia API returned {} for {}", status, url);
            return Err(WikiError::RemoteApi {
                status: Some(status.as_u16()),
                body,
            });
        }

        Ok(body)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Canned transport for client tests

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use serde_json::Value;

    use super::*;

    /// One recorded request
    #[derive(Debug, Clone)]
    pub struct Call {
        pub url: String,
        pub params: QueryParams,
    }

    impl Call {
        pub fn param(&self, key: &str) -> Option<&str> {
            self.params.get(key)
        }
    }

    /// Replays queued responses in order and records every request
    #[derive(Default)]
    pub struct CannedTransport {
        responses: Mutex<VecDeque<Result<String>>>,
        calls: Mutex<Vec<Call>>,
    }

    impl CannedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, body: Value) -> Self {
            self.responses.lock().unwrap().push_back(Ok(body.to_string()));
            self
        }

        pub fn respond_raw(self, body: &str) -> Self {
            self.responses.lock().unwrap().push_back(Ok(body.to_string()));
            self
        }

        pub fn fail(self, status: u16, body: &str) -> Self {
            self.responses.lock().unwrap().push_back(Err(WikiError::RemoteApi {
                status: Some(status),
                body: body.to_string(),
            }));
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Transport for CannedTransport {
        fn get(&self, url: &str, params: &QueryParams) -> Result<String> {
            self.calls.lock().unwrap().push(Call {
                url: url.to_string(),
                params: params.clone(),
            });
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected request to {} with {:?}", url, params))
        }
    }
}
