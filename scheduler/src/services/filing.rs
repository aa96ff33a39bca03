//! Simulated filing client
//!
//! Stands in for the destination authority's submission API: waits out a
//! configurable latency, then returns a unique confirmation token. The
//! failing variant rejects every filing, for failure-path drills.

use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use shared::Itinerary;
use tokio::time::sleep;
use tracing::info;

use crate::error::{SchedulerError, SchedulerResult};
use crate::traits::{FilingClient, FilingReceipt};

pub struct SimulatedFilingClient {
    latency: Duration,
    fail: bool,
}

impl SimulatedFilingClient {
    pub fn new(latency: Duration) -> Self {
        Self { latency, fail: false }
    }

    /// Client that rejects every filing
    pub fn failing(latency: Duration) -> Self {
        Self { latency, fail: true }
    }

    /// Unique token per successful filing: millisecond tail plus a random suffix
    fn confirmation_token() -> String {
        let millis = Utc::now().timestamp_millis().to_string();
        let tail_start = millis.len().saturating_sub(8);
        let suffix: u16 = rand::thread_rng().gen_range(0..1000);
        format!("ARR-{}-{:03}", &millis[tail_start..], suffix)
    }
}

#[async_trait::async_trait]
impl FilingClient for SimulatedFilingClient {
    async fn submit(&self, itinerary: &Itinerary) -> SchedulerResult<FilingReceipt> {
        sleep(self.latency).await;

        if self.fail {
            return Err(SchedulerError::Filing {
                message: format!("destination authority rejected itinerary {}", itinerary.id),
            });
        }

        let receipt = FilingReceipt {
            confirmation_token: Self::confirmation_token(),
        };
        info!(
            "🛂 Filed arrival card for {} (itinerary {})",
            itinerary.destination_country, itinerary.id
        );
        Ok(receipt)
    }
}
