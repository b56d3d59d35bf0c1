use crate::actors::health::{HealthActor, ReportSubmissionLatency, ReportSubmissionOutcome};
use crate::booking::{BookingRequest, BookingSink, SinkReceipt, SubmissionError};
use actix::prelude::*;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How long a delivered wizard keeps answering resubmits with its receipt.
pub const COMPLETED_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Hands finished bookings to the configured sink, one at a time per wizard.
/// Each wizard is delivered at most once: a resubmit after success gets the
/// original receipt back.
pub struct BookingIntakeActor {
    sink: Arc<dyn BookingSink>,
    health_actor: Addr<HealthActor>,
    in_flight: Arc<DashMap<Uuid, Instant>>,
    completed: Arc<DashMap<Uuid, (SinkReceipt, Instant)>>,
    completed_ttl: Duration,
}

impl BookingIntakeActor {
    pub fn new(sink: Arc<dyn BookingSink>, health_actor: Addr<HealthActor>) -> Self {
        Self {
            sink,
            health_actor,
            in_flight: Arc::new(DashMap::new()),
            completed: Arc::new(DashMap::new()),
            completed_ttl: COMPLETED_TTL,
        }
    }

    pub fn with_completed_ttl(mut self, ttl: Duration) -> Self {
        self.completed_ttl = ttl;
        self
    }

    fn completed_receipt(&self, wizard_id: &Uuid) -> Option<SinkReceipt> {
        let ttl = self.completed_ttl;
        self.completed.retain(|_, (_, delivered_at)| delivered_at.elapsed() < ttl);
        self.completed.get(wizard_id).map(|entry| entry.0.clone())
    }
}

impl Actor for BookingIntakeActor {
    type Context = Context<Self>;
}

#[derive(Message)]
#[rtype(result = "Result<SinkReceipt, SubmissionError>")]
pub struct SubmitBooking {
    pub wizard_id: Uuid,
    pub request: BookingRequest,
}

/// Clears the in-flight marker however the delivery ends.
struct InFlightGuard {
    in_flight: Arc<DashMap<Uuid, Instant>>,
    wizard_id: Uuid,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.remove(&self.wizard_id);
    }
}

impl Handler<SubmitBooking> for BookingIntakeActor {
    type Result = ResponseFuture<Result<SinkReceipt, SubmissionError>>;

    fn handle(&mut self, msg: SubmitBooking, _ctx: &mut Context<Self>) -> Self::Result {
        if let Some(receipt) = self.completed_receipt(&msg.wizard_id) {
            log::info!(
                "Booking wizard {} was already delivered as {}, not sending it again",
                msg.wizard_id,
                receipt.reference
            );
            return Box::pin(async { Ok(receipt) });
        }

        let claimed = match self.in_flight.entry(msg.wizard_id) {
            dashmap::mapref::entry::Entry::Occupied(_) => false,
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(Instant::now());
                true
            }
        };
        if !claimed {
            log::warn!("Ignoring duplicate submit for booking wizard {}", msg.wizard_id);
            return Box::pin(async { Err(SubmissionError::InFlight) });
        }

        let guard = InFlightGuard {
            in_flight: self.in_flight.clone(),
            wizard_id: msg.wizard_id,
        };
        let sink = self.sink.clone();
        let health_actor = self.health_actor.clone();
        let completed = self.completed.clone();

        Box::pin(async move {
            let _guard = guard;
            let start_time = Instant::now();
            let result = sink.deliver(&msg.request).await;
            health_actor.do_send(ReportSubmissionLatency(start_time.elapsed().as_secs_f64() * 1000.0));
            health_actor.do_send(ReportSubmissionOutcome {
                delivered: result.is_ok(),
            });

            match &result {
                Ok(receipt) => {
                    log::info!(
                        "Booking {} for {} {} delivered via {}",
                        receipt.reference,
                        msg.request.first_name,
                        msg.request.last_name,
                        receipt.sink
                    );
                    // Recorded before the in-flight claim is released.
                    completed.insert(msg.wizard_id, (receipt.clone(), Instant::now()));
                }
                Err(e) => log::error!("Booking delivery via {} failed: {}", sink.name(), e),
            }
            result
        })
    }
}
