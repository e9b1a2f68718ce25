use async_trait::async_trait;
use serde_json::Value;
use super::{MarketDataProvider, ProviderError};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Scripted provider: replays queued results in order, then repeats the
/// default (if any). Every call is recorded.
pub struct MockProvider {
    pub name: String,
    responses: Mutex<VecDeque<Result<Value, ProviderError>>>,
    default: Option<Result<Value, ProviderError>>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            responses: Mutex::new(VecDeque::new()),
            default: None,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_json(self, body: Value) -> Self {
        self.with_result(Ok(body))
    }

    pub fn with_error(self, error: ProviderError) -> Self {
        self.with_result(Err(error))
    }

    pub fn with_result(self, result: Result<Value, ProviderError>) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(result);
        self
    }

    /// Result returned once the queue is drained.
    pub fn always(mut self, result: Result<Value, ProviderError>) -> Self {
        self.default = Some(result);
        self
    }

    /// Suspend each call for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    fn provider_name(&self) -> &str {
        &self.name
    }

    async fn get_json(&self, url: &str) -> Result<Value, ProviderError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self
            .responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        next.or_else(|| self.default.clone()).unwrap_or_else(|| {
            Err(ProviderError::NetworkError("no scripted response".to_string()))
        })
    }
}
