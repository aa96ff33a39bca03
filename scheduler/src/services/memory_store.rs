//! In-memory state store
//!
//! Reference persistence backend: `RwLock` maps behind the store and
//! directory contracts, with optional JSON seed and snapshot files for a
//! runnable setup without a database. Updates replace one whole record at
//! a time, which is exactly the atomicity the sweep relies on.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    Itinerary, ItineraryId, ItineraryStatus, PaymentStatus, Submission, SubmissionId, User, UserId,
};
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{SchedulerError, SchedulerResult};
use crate::traits::{StateStore, UserDirectory};
use crate::window::ensure_window;

/// On-disk layout of seed and snapshot files
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSnapshot {
    pub users: Vec<User>,
    pub itineraries: Vec<Itinerary>,
    pub submissions: Vec<Submission>,
}

/// In-memory implementation of `StateStore` and `UserDirectory`
pub struct MemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    itineraries: RwLock<HashMap<ItineraryId, Itinerary>>,
    submissions: RwLock<HashMap<SubmissionId, Submission>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            itineraries: RwLock::new(HashMap::new()),
            submissions: RwLock::new(HashMap::new()),
        }
    }

    /// Build a store from a JSON seed file
    pub async fn from_seed_file(path: &Path) -> SchedulerResult<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let snapshot: StoreSnapshot = serde_json::from_str(&raw)?;

        let store = Self::new();
        store.load(snapshot).await;
        Ok(store)
    }

    /// Load a snapshot, deriving windows for itineraries that lack them
    pub async fn load(&self, snapshot: StoreSnapshot) {
        let mut users = self.users.write().await;
        for user in snapshot.users {
            users.insert(user.id, user);
        }

        let mut itineraries = self.itineraries.write().await;
        for mut itinerary in snapshot.itineraries {
            ensure_window(&mut itinerary);
            itineraries.insert(itinerary.id, itinerary);
        }

        let mut submissions = self.submissions.write().await;
        for submission in snapshot.submissions {
            submissions.insert(submission.id, submission);
        }

        info!(
            "💾 Loaded {} users, {} itineraries, {} submissions",
            users.len(),
            itineraries.len(),
            submissions.len()
        );
    }

    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Insert an itinerary, deriving its window if unset
    pub async fn insert_itinerary(&self, mut itinerary: Itinerary) {
        ensure_window(&mut itinerary);
        self.itineraries.write().await.insert(itinerary.id, itinerary);
    }

    pub async fn insert_submission(&self, submission: Submission) {
        self.submissions.write().await.insert(submission.id, submission);
    }

    pub async fn get_itinerary(&self, id: ItineraryId) -> Option<Itinerary> {
        self.itineraries.read().await.get(&id).cloned()
    }

    pub async fn get_submission(&self, id: SubmissionId) -> Option<Submission> {
        self.submissions.read().await.get(&id).cloned()
    }

    /// Snapshot every record for inspection or persistence
    pub async fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            users: self.users.read().await.values().cloned().collect(),
            itineraries: self.itineraries.read().await.values().cloned().collect(),
            submissions: self.submissions.read().await.values().cloned().collect(),
        }
    }

    /// Write a pretty-printed JSON snapshot of the store
    pub async fn write_snapshot(&self, path: &Path) -> SchedulerResult<()> {
        let snapshot = self.snapshot().await;
        let raw = serde_json::to_string_pretty(&snapshot)?;
        tokio::fs::write(path, raw).await?;
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StateStore for MemoryStore {
    async fn find_due_itineraries(
        &self,
        status: ItineraryStatus,
        scheduled_before: DateTime<Utc>,
    ) -> SchedulerResult<Vec<Itinerary>> {
        let itineraries = self.itineraries.read().await;
        Ok(itineraries
            .values()
            .filter(|itinerary| {
                itinerary.status == status
                    && itinerary
                        .window
                        .map(|window| window.scheduled_at <= scheduled_before)
                        .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn find_paid_submission(&self, itinerary_id: ItineraryId) -> SchedulerResult<Option<Submission>> {
        let submissions = self.submissions.read().await;
        Ok(submissions
            .values()
            .find(|submission| {
                submission.itinerary_id == itinerary_id && submission.payment_status == PaymentStatus::Paid
            })
            .cloned())
    }

    async fn find_submission(&self, itinerary_id: ItineraryId) -> SchedulerResult<Option<Submission>> {
        let submissions = self.submissions.read().await;
        Ok(submissions
            .values()
            .find(|submission| submission.itinerary_id == itinerary_id)
            .cloned())
    }

    async fn find_window_open_itineraries(&self, now: DateTime<Utc>) -> SchedulerResult<Vec<Itinerary>> {
        let itineraries = self.itineraries.read().await;
        Ok(itineraries
            .values()
            .filter(|itinerary| {
                matches!(
                    itinerary.status,
                    ItineraryStatus::Pending | ItineraryStatus::Scheduled
                ) && itinerary
                    .window
                    .map(|window| window.start <= now && now < window.end)
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn update_itinerary(&self, itinerary: &Itinerary) -> SchedulerResult<()> {
        let mut itineraries = self.itineraries.write().await;
        match itineraries.get_mut(&itinerary.id) {
            Some(stored) => {
                *stored = itinerary.clone();
                Ok(())
            }
            None => Err(SchedulerError::Store {
                message: format!("unknown itinerary {}", itinerary.id),
            }),
        }
    }

    async fn update_submission(&self, submission: &Submission) -> SchedulerResult<()> {
        let mut submissions = self.submissions.write().await;
        match submissions.get_mut(&submission.id) {
            Some(stored) => {
                *stored = submission.clone();
                Ok(())
            }
            None => Err(SchedulerError::Store {
                message: format!("unknown submission {}", submission.id),
            }),
        }
    }
}

#[async_trait::async_trait]
impl UserDirectory for MemoryStore {
    async fn get_user(&self, user_id: UserId) -> SchedulerResult<User> {
        let users = self.users.read().await;
        users.get(&user_id).cloned().ok_or(SchedulerError::UserLookup {
            user_id: user_id.to_string(),
        })
    }
}
