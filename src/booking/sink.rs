use crate::booking::model::BookingRequest;
use crate::config::{BookingConfig, SinkKind};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkReceipt {
    pub reference: String,
    pub sink: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionError {
    /// A submission for the same wizard has not finished yet.
    InFlight,
    Timeout,
    Transport(String),
    Rejected { status: u16 },
}

impl SubmissionError {
    pub fn is_retryable(&self) -> bool {
        match self {
            SubmissionError::InFlight => false,
            SubmissionError::Timeout | SubmissionError::Transport(_) => true,
            SubmissionError::Rejected { status } => *status >= 500 || *status == 429,
        }
    }
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::InFlight => write!(f, "your booking is already being sent, please wait a moment"),
            SubmissionError::Timeout => write!(f, "the booking service took too long to answer"),
            SubmissionError::Transport(detail) => write!(f, "could not reach the booking service: {}", detail),
            SubmissionError::Rejected { status } => write!(f, "the booking service refused the request (HTTP {})", status),
        }
    }
}

impl std::error::Error for SubmissionError {}

/// Receives finished bookings.
#[async_trait]
pub trait BookingSink: Send + Sync {
    fn name(&self) -> &'static str;

    async fn deliver(&self, request: &BookingRequest) -> Result<SinkReceipt, SubmissionError>;
}

fn short_reference() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("RL-{}", id[..8].to_uppercase())
}

/// Writes the booking to the log and nothing else.
pub struct LogSink;

#[async_trait]
impl BookingSink for LogSink {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn deliver(&self, request: &BookingRequest) -> Result<SinkReceipt, SubmissionError> {
        let payload = serde_json::to_string(request).map_err(|e| SubmissionError::Transport(e.to_string()))?;
        let reference = short_reference();
        log::info!("Booking {} received: {}", reference, payload);
        Ok(SinkReceipt {
            reference,
            sink: self.name().to_string(),
        })
    }
}

#[derive(Deserialize)]
struct IntakeResponse {
    reference: Option<String>,
}

/// POSTs the booking as JSON to an intake endpoint. Any 2xx counts as accepted.
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpSink {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }
}

#[async_trait]
impl BookingSink for HttpSink {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn deliver(&self, request: &BookingRequest) -> Result<SinkReceipt, SubmissionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SubmissionError::Timeout
                } else {
                    SubmissionError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Booking endpoint {} answered with {}", self.endpoint, status);
            return Err(SubmissionError::Rejected { status: status.as_u16() });
        }

        // The body is optional; a missing or malformed reference is not an error.
        let reference = response
            .json::<IntakeResponse>()
            .await
            .ok()
            .and_then(|r| r.reference)
            .unwrap_or_else(short_reference);

        Ok(SinkReceipt {
            reference,
            sink: self.name().to_string(),
        })
    }
}

pub fn sink_from_config(config: &BookingConfig) -> anyhow::Result<Arc<dyn BookingSink>> {
    match config.sink {
        SinkKind::Log => Ok(Arc::new(LogSink)),
        SinkKind::Http => {
            let endpoint = config
                .endpoint
                .clone()
                .ok_or_else(|| anyhow::anyhow!("`booking.endpoint` is required when `booking.sink` is `http`"))?;
            let sink = HttpSink::new(endpoint, Duration::from_secs(config.timeout_secs))?;
            Ok(Arc::new(sink))
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Keeps every delivered booking, or fails every delivery with the given error.
    #[derive(Default)]
    pub struct RecordingSink {
        pub delivered: Mutex<Vec<BookingRequest>>,
        pub fail_with: Option<SubmissionError>,
    }

    impl RecordingSink {
        pub fn failing(error: SubmissionError) -> Self {
            Self {
                delivered: Mutex::new(Vec::new()),
                fail_with: Some(error),
            }
        }

        pub fn delivered(&self) -> Vec<BookingRequest> {
            self.delivered.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BookingSink for RecordingSink {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn deliver(&self, request: &BookingRequest) -> Result<SinkReceipt, SubmissionError> {
            if let Some(error) = &self.fail_with {
                return Err(error.clone());
            }
            self.delivered.lock().unwrap().push(request.clone());
            Ok(SinkReceipt {
                reference: format!("TEST-{}", self.delivered.lock().unwrap().len()),
                sink: self.name().to_string(),
            })
        }
    }

    /// Holds every delivery until `release` is notified.
    #[derive(Default)]
    pub struct GatedSink {
        pub release: Notify,
        pub deliveries: AtomicUsize,
    }

    impl GatedSink {
        pub fn deliveries(&self) -> usize {
            self.deliveries.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BookingSink for GatedSink {
        fn name(&self) -> &'static str {
            "gated"
        }

        async fn deliver(&self, _request: &BookingRequest) -> Result<SinkReceipt, SubmissionError> {
            self.release.notified().await;
            let count = self.deliveries.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(SinkReceipt {
                reference: format!("GATED-{}", count),
                sink: self.name().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn test_log_sink_accepts_any_request() {
        let receipt = LogSink.deliver(&BookingRequest::default()).await.unwrap();
        assert_eq!(receipt.sink, "log");
        assert!(receipt.reference.starts_with("RL-"));
        assert_eq!(receipt.reference.len(), 11);
    }

    #[test]
    fn test_retryable_classification() {
        assert!(SubmissionError::Timeout.is_retryable());
        assert!(!SubmissionError::InFlight.is_retryable());
        assert!(SubmissionError::Transport("refused".into()).is_retryable());
        assert!(SubmissionError::Rejected { status: 503 }.is_retryable());
        assert!(!SubmissionError::Rejected { status: 422 }.is_retryable());
    }

    #[test]
    fn test_http_sink_requires_endpoint() {
        let config = BookingConfig {
            sink: SinkKind::Http,
            endpoint: None,
            ..BookingConfig::default()
        };
        let err = sink_from_config(&config).err().unwrap();
        assert!(err.to_string().contains("booking.endpoint"));
    }

    #[test]
    fn test_log_sink_is_the_default() {
        let sink = sink_from_config(&BookingConfig::default()).unwrap();
        assert_eq!(sink.name(), "log");
    }

    #[actix_rt::test]
    async fn test_http_sink_reports_unreachable_endpoint() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let sink = HttpSink::new("http://127.0.0.1:9/bookings", Duration::from_secs(2)).unwrap();
        let err = sink.deliver(&BookingRequest::default()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Transport(_) | SubmissionError::Timeout));
        assert!(err.is_retryable());
    }
}
