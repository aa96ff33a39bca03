//! Core domain types and status state machines
//!
//! Every status field is a closed enum with an explicit transition table.
//! Callers go through `advance` (or the record-level `transition_*`
//! helpers), which reject any edge not in the table instead of allowing
//! arbitrary overwrites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::{SharedError, SharedResult};

/// Unique identifier for a user account
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an itinerary record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItineraryId(Uuid);

impl ItineraryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for ItineraryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItineraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a submission record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declared purpose of travel on the arrival card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelPurpose {
    Tourism,
    Business,
    Education,
    Other,
}

impl fmt::Display for TravelPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TravelPurpose::Tourism => "tourism",
            TravelPurpose::Business => "business",
            TravelPurpose::Education => "education",
            TravelPurpose::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// Itinerary lifecycle status
///
/// Forward-only: `pending -> scheduled -> submitted -> completed | failed`.
/// `scheduled -> failed` is not a legal edge; a filing failure is recorded
/// on the submission, not by terminating the itinerary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItineraryStatus {
    Pending,
    Scheduled,
    Submitted,
    Completed,
    Failed,
}

impl ItineraryStatus {
    /// Validate and take a transition, returning the new status
    pub fn advance(self, next: ItineraryStatus) -> SharedResult<ItineraryStatus> {
        use ItineraryStatus::*;
        match (self, next) {
            (Pending, Scheduled) | (Scheduled, Submitted) | (Submitted, Completed) | (Submitted, Failed) => Ok(next),
            _ => Err(SharedError::InvalidTransition {
                entity: "itinerary",
                from: self.to_string(),
                to: next.to_string(),
            }),
        }
    }
}

impl fmt::Display for ItineraryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItineraryStatus::Pending => "pending",
            ItineraryStatus::Scheduled => "scheduled",
            ItineraryStatus::Submitted => "submitted",
            ItineraryStatus::Completed => "completed",
            ItineraryStatus::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// Submission lifecycle status
///
/// `pending -> processing -> completed | failed`. Both end states are
/// terminal; a failed submission needs manual intervention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl SubmissionStatus {
    /// Validate and take a transition, returning the new status
    pub fn advance(self, next: SubmissionStatus) -> SharedResult<SubmissionStatus> {
        use SubmissionStatus::*;
        match (self, next) {
            (Pending, Processing) | (Processing, Completed) | (Processing, Failed) => Ok(next),
            _ => Err(SharedError::InvalidTransition {
                entity: "submission",
                from: self.to_string(),
                to: next.to_string(),
            }),
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Processing => "processing",
            SubmissionStatus::Completed => "completed",
            SubmissionStatus::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// Payment status of a submission
///
/// Captured out-of-band by the payment collaborator. A single-shot capture
/// may go straight from `unpaid` to `paid`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Processing,
    Paid,
    Refunded,
}

impl PaymentStatus {
    /// Validate and take a transition, returning the new status
    pub fn advance(self, next: PaymentStatus) -> SharedResult<PaymentStatus> {
        use PaymentStatus::*;
        match (self, next) {
            (Unpaid, Processing) | (Unpaid, Paid) | (Processing, Paid) | (Paid, Refunded) => Ok(next),
            _ => Err(SharedError::InvalidTransition {
                entity: "payment",
                from: self.to_string(),
                to: next.to_string(),
            }),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Processing => "processing",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        };
        write!(f, "{s}")
    }
}

/// Channel a single notification message travels over
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    Email,
    Messaging,
}

impl fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotificationChannel::Email => "email",
            NotificationChannel::Messaging => "messaging",
        };
        write!(f, "{s}")
    }
}

/// User's preferred delivery channel(s)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPreference {
    Email,
    Messaging,
    Both,
}

impl NotificationPreference {
    /// Channels to fan out to; `both` means two independent messages
    pub fn channels(&self) -> &'static [NotificationChannel] {
        match self {
            NotificationPreference::Email => &[NotificationChannel::Email],
            NotificationPreference::Messaging => &[NotificationChannel::Messaging],
            NotificationPreference::Both => &[NotificationChannel::Email, NotificationChannel::Messaging],
        }
    }
}

/// Per-event delivery flags on a submission
///
/// Each flag is set exactly once, after the corresponding send succeeded,
/// and is never reset. Checked before every send attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationFlags {
    pub confirmation: bool,
    pub reminder: bool,
    pub completion: bool,
}

/// The legal filing window for an itinerary and the instant chosen within it
///
/// Derived once at itinerary creation and never recomputed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub scheduled_at: DateTime<Utc>,
}

/// A traveler's trip record awaiting or having completed an arrival-card filing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: ItineraryId,
    pub user_id: UserId,
    pub destination_country: String,
    pub arrival_date: DateTime<Utc>,
    pub departure_date: DateTime<Utc>,
    pub flight_number: String,
    pub airline: String,
    pub accommodation_address: String,
    pub accommodation_phone: Option<String>,
    pub purpose: TravelPurpose,
    /// Reference to the stored original document
    pub original_file: String,
    pub status: ItineraryStatus,
    #[serde(default)]
    pub window: Option<SubmissionWindow>,
}

impl Itinerary {
    /// Advance the itinerary status, rejecting edges not in the table
    pub fn transition_status(&mut self, next: ItineraryStatus) -> SharedResult<()> {
        self.status = self.status.advance(next)?;
        Ok(())
    }
}

/// The payment-gated unit of work representing one filing attempt
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: SubmissionId,
    pub itinerary_id: ItineraryId,
    pub user_id: UserId,
    pub status: SubmissionStatus,
    pub payment_status: PaymentStatus,
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub payment_id: Option<String>,
    /// Set only on successful filing; unique per successful submission
    #[serde(default)]
    pub confirmation_number: Option<String>,
    #[serde(default)]
    pub submission_date: Option<DateTime<Utc>>,
    /// Human-diagnostic text, set on both success and failure
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub notifications: NotificationFlags,
}

impl Submission {
    /// Advance the submission status, rejecting edges not in the table
    pub fn transition_status(&mut self, next: SubmissionStatus) -> SharedResult<()> {
        self.status = self.status.advance(next)?;
        Ok(())
    }

    /// Advance the payment status, rejecting edges not in the table
    pub fn transition_payment(&mut self, next: PaymentStatus) -> SharedResult<()> {
        self.payment_status = self.payment_status.advance(next)?;
        Ok(())
    }
}

/// User contact record, consumed read-only for notification routing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub preferred_notification: NotificationPreference,
}
