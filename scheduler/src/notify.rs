//! User notification dispatch with per-event idempotency
//!
//! One component owns all three lifecycle notifications — confirmation at
//! submission creation, the pre-deadline reminder, and completion after a
//! successful filing. Each event is guarded by its persisted flag on the
//! submission: checked before any attempt, set and persisted only after
//! every channel send succeeded. A failed channel leaves the flag unset,
//! so the event stays retryable on a later pass.

use std::sync::Arc;

use shared::{Itinerary, NotificationChannel, PaymentStatus, Submission, User};
use tracing::{debug, info};

use crate::error::SchedulerResult;
use crate::traits::{NotificationGateway, NotificationMessage, StateStore, UserDirectory};

/// Lifecycle events that trigger a user notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationEvent {
    /// Submission record created alongside the itinerary
    Confirmation,
    /// Filing window has opened, filing (or payment) is imminent
    Reminder,
    /// Arrival card filed successfully
    Completion,
}

impl NotificationEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationEvent::Confirmation => "confirmation",
            NotificationEvent::Reminder => "reminder",
            NotificationEvent::Completion => "completion",
        }
    }

    fn already_sent(&self, submission: &Submission) -> bool {
        match self {
            NotificationEvent::Confirmation => submission.notifications.confirmation,
            NotificationEvent::Reminder => submission.notifications.reminder,
            NotificationEvent::Completion => submission.notifications.completion,
        }
    }

    fn mark_sent(&self, submission: &mut Submission) {
        match self {
            NotificationEvent::Confirmation => submission.notifications.confirmation = true,
            NotificationEvent::Reminder => submission.notifications.reminder = true,
            NotificationEvent::Completion => submission.notifications.completion = true,
        }
    }
}

/// Routes lifecycle notifications to the user's preferred channel(s)
pub struct Notifier<S, D, G>
where
    S: StateStore + Send + Sync + 'static,
    D: UserDirectory + Send + Sync + 'static,
    G: NotificationGateway + Send + Sync + 'static,
{
    store: Arc<S>,
    users: Arc<D>,
    gateway: Arc<G>,
}

impl<S, D, G> Clone for Notifier<S, D, G>
where
    S: StateStore + Send + Sync + 'static,
    D: UserDirectory + Send + Sync + 'static,
    G: NotificationGateway + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            users: Arc::clone(&self.users),
            gateway: Arc::clone(&self.gateway),
        }
    }
}

impl<S, D, G> Notifier<S, D, G>
where
    S: StateStore + Send + Sync + 'static,
    D: UserDirectory + Send + Sync + 'static,
    G: NotificationGateway + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, users: Arc<D>, gateway: Arc<G>) -> Self {
        Self { store, users, gateway }
    }

    /// Send `event` for this submission at most once
    ///
    /// Returns `Ok(true)` if a send happened, `Ok(false)` if the flag was
    /// already set. `both` fans out to two independent messages behind the
    /// single shared flag.
    pub async fn send_event(
        &self,
        event: NotificationEvent,
        itinerary: &Itinerary,
        submission: &mut Submission,
    ) -> SchedulerResult<bool> {
        if event.already_sent(submission) {
            debug!(
                "🔁 {} notification already sent for submission {}, skipping",
                event.as_str(),
                submission.id
            );
            return Ok(false);
        }

        let user = self.users.get_user(submission.user_id).await?;
        let message = build_message(event, itinerary, submission);

        for channel in user.preferred_notification.channels() {
            let recipient = recipient_for(&user, *channel);
            self.gateway.send(*channel, recipient, &message).await?;
        }

        event.mark_sent(submission);
        self.store.update_submission(submission).await?;

        info!(
            "📨 Sent {} notification for submission {} over {} channel(s)",
            event.as_str(),
            submission.id,
            user.preferred_notification.channels().len()
        );
        Ok(true)
    }
}

fn recipient_for(user: &User, channel: NotificationChannel) -> &str {
    match channel {
        NotificationChannel::Email => user.email.as_str(),
        NotificationChannel::Messaging => user.phone.as_str(),
    }
}

fn build_message(event: NotificationEvent, itinerary: &Itinerary, submission: &Submission) -> NotificationMessage {
    let destination = &itinerary.destination_country;

    match event {
        NotificationEvent::Confirmation => NotificationMessage {
            subject: "Arrival Card Submission Received".to_string(),
            body: format!(
                "We received your itinerary for {} arriving {}. Your arrival card \
                 will be filed automatically once payment is confirmed.",
                destination,
                itinerary.arrival_date.format("%Y-%m-%d")
            ),
        },
        NotificationEvent::Reminder => {
            let body = if submission.payment_status == PaymentStatus::Paid {
                match &itinerary.window {
                    Some(window) => format!(
                        "Your arrival card for {} will be filed automatically at {}.",
                        destination,
                        window.scheduled_at.format("%Y-%m-%d %H:%M UTC")
                    ),
                    None => format!("Your arrival card for {destination} will be filed automatically."),
                }
            } else {
                match &itinerary.window {
                    Some(window) => format!(
                        "The filing window for {} is open. Complete payment before {} \
                         so your arrival card can be filed.",
                        destination,
                        window.end.format("%Y-%m-%d %H:%M UTC")
                    ),
                    None => format!(
                        "The filing window for {destination} is open. Complete payment \
                         so your arrival card can be filed."
                    ),
                }
            };

            NotificationMessage {
                subject: "Arrival Card Filing Reminder".to_string(),
                body,
            }
        }
        NotificationEvent::Completion => NotificationMessage {
            subject: "Arrival Card Submission Completed".to_string(),
            body: format!(
                "Your arrival card for {} has been successfully submitted. Confirmation number: {}",
                destination,
                submission.confirmation_number.as_deref().unwrap_or("unavailable")
            ),
        },
    }
}
