//! In-memory transport used by the unit tests.

use std::time::Duration;

use parking_lot::Mutex;
use restkit_domain::{ApiRequest, ApiResponse};

use crate::ports::{HttpClient, HttpClientError, HttpFuture};

type Responder = Box<dyn Fn(&ApiRequest) -> Result<ApiResponse, HttpClientError> + Send + Sync>;
type Delay = Box<dyn Fn(&ApiRequest) -> Duration + Send + Sync>;

/// Records every request and answers from a closure.
pub struct RecordingClient {
    requests: Mutex<Vec<ApiRequest>>,
    respond: Responder,
    delay: Option<Delay>,
}

impl RecordingClient {
    pub fn new(
        respond: impl Fn(&ApiRequest) -> Result<ApiResponse, HttpClientError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            respond: Box::new(respond),
            delay: None,
        }
    }

    /// Always answers 200 with `data`.
    pub fn returning(data: serde_json::Value) -> Self {
        Self::new(move |_| Ok(ApiResponse::ok(data.clone())))
    }

    /// Always fails with `error`.
    pub fn failing(error: HttpClientError) -> Self {
        Self::new(move |_| Err(error.clone()))
    }

    pub fn with_delay(
        mut self,
        delay: impl Fn(&ApiRequest) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.delay = Some(Box::new(delay));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().last().cloned()
    }
}

impl HttpClient for RecordingClient {
    fn send(&self, request: ApiRequest) -> HttpFuture<'_> {
        let result = (self.respond)(&request);
        let delay = self.delay.as_ref().map(|delay| delay(&request));
        self.requests.lock().push(request);

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        })
    }
}
