//! Test helpers wiring the engine over the in-memory store
//!
//! External actions (filing, notification transport) are mockall mocks so
//! each test pins down exactly how often they may be hit; persistence and
//! user lookup go through a real `MemoryStore`.

use std::sync::Arc;
use std::time::Duration;

use scheduler::services::MemoryStore;
use scheduler::traits::{MockFilingClient, MockNotificationGateway};
use scheduler::{
    FilingClient, FilingReceipt, Notifier, SchedulerError, SubmissionProcessor, SweepRunner,
};
use shared::{Itinerary, Submission, User};

/// Engine assembled for one test
pub struct TestEngine<F>
where
    F: FilingClient + Send + Sync + 'static,
{
    pub store: Arc<MemoryStore>,
    pub runner: SweepRunner<MemoryStore, MemoryStore, MockNotificationGateway, F>,
    pub notifier: Notifier<MemoryStore, MemoryStore, MockNotificationGateway>,
}

impl<F> TestEngine<F>
where
    F: FilingClient + Send + Sync + 'static,
{
    pub fn new(filing: F, gateway: MockNotificationGateway) -> Self {
        Self::with_filing_timeout(filing, gateway, Duration::from_secs(5))
    }

    pub fn with_filing_timeout(filing: F, gateway: MockNotificationGateway, timeout: Duration) -> Self {
        let store = Arc::new(MemoryStore::new());
        let gateway = Arc::new(gateway);

        let notifier = Notifier::new(Arc::clone(&store), Arc::clone(&store), gateway);
        let processor = SubmissionProcessor::new(Arc::clone(&store), Arc::new(filing), notifier.clone(), timeout);
        let runner = SweepRunner::new(Arc::clone(&store), processor, notifier.clone());

        Self {
            store,
            runner,
            notifier,
        }
    }

    /// Seed one user plus an (itinerary, submission) pair
    pub async fn seed(&self, user: User, itinerary: Itinerary, submission: Submission) {
        self.store.insert_user(user).await;
        self.store.insert_itinerary(itinerary).await;
        self.store.insert_submission(submission).await;
    }
}

/// Filing mock that accepts every submission with a fixed token
pub fn filing_returning(token: &str) -> MockFilingClient {
    let token = token.to_string();
    let mut filing = MockFilingClient::new();
    filing.expect_submit().returning(move |_| {
        Ok(FilingReceipt {
            confirmation_token: token.clone(),
        })
    });
    filing
}

/// Filing mock that rejects every submission
pub fn filing_failing() -> MockFilingClient {
    let mut filing = MockFilingClient::new();
    filing.expect_submit().returning(|_| {
        Err(SchedulerError::Filing {
            message: "destination authority unavailable".to_string(),
        })
    });
    filing
}

/// Filing mock that must never be invoked
pub fn filing_never_called() -> MockFilingClient {
    let mut filing = MockFilingClient::new();
    filing.expect_submit().times(0);
    filing
}

/// Gateway mock accepting exactly `times` sends
pub fn gateway_expecting(times: usize) -> MockNotificationGateway {
    let mut gateway = MockNotificationGateway::new();
    gateway.expect_send().times(times).returning(|_, _, _| Ok(()));
    gateway
}

/// Gateway mock that must never be invoked
pub fn gateway_never_called() -> MockNotificationGateway {
    let mut gateway = MockNotificationGateway::new();
    gateway.expect_send().times(0);
    gateway
}

/// Gateway mock whose every send fails
pub fn gateway_failing() -> MockNotificationGateway {
    let mut gateway = MockNotificationGateway::new();
    gateway.expect_send().returning(|channel, _, _| {
        Err(SchedulerError::Notification {
            channel: channel.to_string(),
            message: "connection reset".to_string(),
        })
    });
    gateway
}
