use actix::prelude::*;
use serde::Serialize;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Samples older than the widest window are dropped on every report.
const RETENTION: Duration = Duration::from_secs(300);

// --- Messages ---

#[derive(Message)]
#[rtype(result = "()")]
pub struct ReportRenderLatency(pub f64);

#[derive(Message)]
#[rtype(result = "()")]
pub struct ReportSubmissionLatency(pub f64);

#[derive(Message)]
#[rtype(result = "()")]
pub struct ReportSubmissionOutcome {
    pub delivered: bool,
}

#[derive(Message)]
#[rtype(result = "SystemHealth")]
pub struct GetSystemHealth;

// --- Data Structures ---

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct LatencyMetrics {
    pub samples: usize,
    pub p95_ms: f64,
    pub mean_ms: f64,
}

#[derive(Serialize, Clone, Debug)]
pub struct TimeWindowMetrics {
    pub page_renderer: LatencyMetrics,
    pub booking_sink: LatencyMetrics,
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct SubmissionCounters {
    pub delivered: u64,
    pub failed: u64,
}

#[derive(Serialize, Clone, Debug)]
pub struct SystemHealth {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub submissions: SubmissionCounters,
    pub thirty_seconds: TimeWindowMetrics,
    pub one_minute: TimeWindowMetrics,
    pub five_minutes: TimeWindowMetrics,
}

struct MetricDataPoint {
    timestamp: Instant,
    value: f64,
}

fn push_sample(data: &mut VecDeque<MetricDataPoint>, value: f64) {
    let now = Instant::now();
    while data.front().is_some_and(|dp| now.duration_since(dp.timestamp) >= RETENTION) {
        data.pop_front();
    }
    data.push_back(MetricDataPoint { timestamp: now, value });
}

fn latency_metrics(data: &VecDeque<MetricDataPoint>, now: Instant, window: Duration) -> LatencyMetrics {
    let mut values: Vec<f64> = data
        .iter()
        .filter(|dp| now.duration_since(dp.timestamp) < window)
        .map(|dp| dp.value)
        .collect();

    if values.is_empty() {
        return LatencyMetrics {
            samples: 0,
            p95_ms: 0.0,
            mean_ms: 0.0,
        };
    }

    values.sort_by(|a, b| a.total_cmp(b));
    let p95_index = (values.len() as f64 * 0.95).floor() as usize;
    let p95 = values[p95_index.min(values.len() - 1)];
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    LatencyMetrics {
        samples: values.len(),
        p95_ms: p95,
        mean_ms: mean,
    }
}

// --- Actor ---

pub struct HealthActor {
    started_at: Instant,
    render_latency_data: VecDeque<MetricDataPoint>,
    submission_latency_data: VecDeque<MetricDataPoint>,
    submissions: SubmissionCounters,
}

impl HealthActor {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            render_latency_data: VecDeque::new(),
            submission_latency_data: VecDeque::new(),
            submissions: SubmissionCounters::default(),
        }
    }

    fn window_metrics(&self, now: Instant, window: Duration) -> TimeWindowMetrics {
        TimeWindowMetrics {
            page_renderer: latency_metrics(&self.render_latency_data, now, window),
            booking_sink: latency_metrics(&self.submission_latency_data, now, window),
        }
    }
}

impl Default for HealthActor {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor for HealthActor {
    type Context = Context<Self>;
}

// --- Handlers ---

impl Handler<ReportRenderLatency> for HealthActor {
    type Result = ();
    fn handle(&mut self, msg: ReportRenderLatency, _ctx: &mut Context<Self>) {
        push_sample(&mut self.render_latency_data, msg.0);
    }
}

impl Handler<ReportSubmissionLatency> for HealthActor {
    type Result = ();
    fn handle(&mut self, msg: ReportSubmissionLatency, _ctx: &mut Context<Self>) {
        push_sample(&mut self.submission_latency_data, msg.0);
    }
}

impl Handler<ReportSubmissionOutcome> for HealthActor {
    type Result = ();
    fn handle(&mut self, msg: ReportSubmissionOutcome, _ctx: &mut Context<Self>) {
        if msg.delivered {
            self.submissions.delivered += 1;
        } else {
            self.submissions.failed += 1;
        }
    }
}

impl Handler<GetSystemHealth> for HealthActor {
    type Result = MessageResult<GetSystemHealth>;

    fn handle(&mut self, _msg: GetSystemHealth, _ctx: &mut Context<Self>) -> Self::Result {
        let now = Instant::now();
        MessageResult(SystemHealth {
            status: "ok",
            uptime_secs: now.duration_since(self.started_at).as_secs(),
            submissions: self.submissions.clone(),
            thirty_seconds: self.window_metrics(now, Duration::from_secs(30)),
            one_minute: self.window_metrics(now, Duration::from_secs(60)),
            five_minutes: self.window_metrics(now, RETENTION),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix::Actor;

    #[actix_rt::test]
    async fn test_health_actor_metrics() {
        let addr = HealthActor::new().start();

        addr.do_send(ReportRenderLatency(10.0));
        addr.do_send(ReportRenderLatency(20.0));
        addr.do_send(ReportSubmissionLatency(5.0));
        addr.do_send(ReportSubmissionOutcome { delivered: true });
        addr.do_send(ReportSubmissionOutcome { delivered: false });

        // Mailbox order guarantees the reports above are handled first.
        let health = addr.send(GetSystemHealth).await.unwrap();

        let metrics = health.thirty_seconds;
        assert_eq!(metrics.page_renderer.samples, 2);
        assert_eq!(metrics.page_renderer.mean_ms, 15.0);
        assert_eq!(metrics.page_renderer.p95_ms, 20.0);
        assert_eq!(metrics.booking_sink.mean_ms, 5.0);
        assert_eq!(health.five_minutes.page_renderer.samples, 2);
        assert_eq!(health.submissions, SubmissionCounters { delivered: 1, failed: 1 });
        assert_eq!(health.status, "ok");
    }

    #[test]
    fn test_windows_exclude_old_samples() {
        let now = Instant::now();
        let mut data = VecDeque::new();
        data.push_back(MetricDataPoint {
            timestamp: now - Duration::from_secs(45),
            value: 100.0,
        });
        data.push_back(MetricDataPoint {
            timestamp: now,
            value: 2.0,
        });

        let thirty = latency_metrics(&data, now, Duration::from_secs(30));
        assert_eq!(thirty.samples, 1);
        assert_eq!(thirty.mean_ms, 2.0);

        let minute = latency_metrics(&data, now, Duration::from_secs(60));
        assert_eq!(minute.samples, 2);
        assert_eq!(minute.mean_ms, 51.0);
    }

    #[test]
    fn test_empty_window_reports_zero() {
        let metrics = latency_metrics(&VecDeque::new(), Instant::now(), Duration::from_secs(30));
        assert_eq!(
            metrics,
            LatencyMetrics {
                samples: 0,
                p95_ms: 0.0,
                mean_ms: 0.0
            }
        );
    }
}
