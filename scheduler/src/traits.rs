//! Collaborator trait definitions with mockall annotations for testing
//!
//! These are the seams to everything the engine does not own: persistence,
//! the user directory, notification transport, and the filing authority.
//! The traits are used for dependency injection and enable deterministic
//! testing of every sweep path.

use chrono::{DateTime, Utc};
use shared::{Itinerary, ItineraryId, ItineraryStatus, NotificationChannel, Submission, User, UserId};

use crate::error::SchedulerResult;

/// Subject and body of one outbound notification message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub subject: String,
    pub body: String,
}

/// Receipt returned by the filing authority on a successful submission
///
/// The confirmation token is unique per successful filing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingReceipt {
    pub confirmation_token: String,
}

/// Persistence abstraction over itinerary and submission records
///
/// Queries are predicate-shaped; updates replace the whole record and are
/// atomic per entity. No operation spans more than one record, which keeps
/// per-pair failure isolation intact.
#[mockall::automock]
#[async_trait::async_trait]
pub trait StateStore: Send + Sync {
    /// Itineraries in `status` whose scheduled filing instant is at or
    /// before `scheduled_before`
    async fn find_due_itineraries(
        &self,
        status: ItineraryStatus,
        scheduled_before: DateTime<Utc>,
    ) -> SchedulerResult<Vec<Itinerary>>;

    /// The paid submission for an itinerary, if payment has been captured
    async fn find_paid_submission(&self, itinerary_id: ItineraryId) -> SchedulerResult<Option<Submission>>;

    /// The submission for an itinerary regardless of payment state
    async fn find_submission(&self, itinerary_id: ItineraryId) -> SchedulerResult<Option<Submission>>;

    /// Itineraries still awaiting filing whose window contains `now`
    async fn find_window_open_itineraries(&self, now: DateTime<Utc>) -> SchedulerResult<Vec<Itinerary>>;

    /// Replace a stored itinerary; atomic for that record
    async fn update_itinerary(&self, itinerary: &Itinerary) -> SchedulerResult<()>;

    /// Replace a stored submission; atomic for that record
    async fn update_submission(&self, submission: &Submission) -> SchedulerResult<()>;
}

/// Read-only lookup of user contact data for notification routing
#[mockall::automock]
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_user(&self, user_id: UserId) -> SchedulerResult<User>;
}

/// Message transport for one channel
///
/// The transport has no deduplication of its own; the engine supplies it
/// via the persisted notification flags.
#[mockall::automock]
#[async_trait::async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn send(
        &self,
        channel: NotificationChannel,
        recipient: &str,
        message: &NotificationMessage,
    ) -> SchedulerResult<()>;
}

/// The external filing action against the destination authority
///
/// Opaque, slow, and unreliable; callers bound it with a timeout.
#[mockall::automock]
#[async_trait::async_trait]
pub trait FilingClient: Send + Sync {
    async fn submit(&self, itinerary: &Itinerary) -> SchedulerResult<FilingReceipt>;
}
