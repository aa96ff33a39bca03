//! Test fixtures and data for scheduler tests
//!
//! Consistent records built around one reference trip: arrival at
//! 2024-06-10T12:00:00Z, which puts the filing window at
//! [2024-06-07T12:00:00Z, 2024-06-10T10:00:00Z] and the scheduled filing
//! instant at 2024-06-08T23:00:00Z.

use chrono::{DateTime, Duration, TimeZone, Utc};
use shared::{
    Itinerary, ItineraryId, ItineraryStatus, NotificationFlags, NotificationPreference, PaymentStatus,
    Submission, SubmissionId, SubmissionStatus, TravelPurpose, User, UserId,
};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Standard test user ID using proper UUID format
    pub const USER_1: &'static str = "550e8400-e29b-41d4-a716-446655440001";

    /// Service fee charged per submission
    pub const SERVICE_FEE: f64 = 19.99;

    pub fn user_id() -> UserId {
        UserId::from_string(Self::USER_1).unwrap()
    }

    /// Reference arrival time
    pub fn arrival() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    /// A sweep instant just past the reference scheduled filing instant
    pub fn sweep_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 8, 23, 5, 0).unwrap()
    }

    /// An instant inside the reference filing window, before the scheduled instant
    pub fn window_open_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 8, 0, 0, 0).unwrap()
    }

    pub fn user(preference: NotificationPreference) -> User {
        User {
            id: Self::user_id(),
            name: "Mia Tan".to_string(),
            email: "mia@example.com".to_string(),
            phone: "+6591234567".to_string(),
            preferred_notification: preference,
        }
    }

    /// Itinerary for the reference trip; the store derives its window on insert
    pub fn itinerary(destination: &str, status: ItineraryStatus) -> Itinerary {
        let arrival = Self::arrival();
        Itinerary {
            id: ItineraryId::new(),
            user_id: Self::user_id(),
            destination_country: destination.to_string(),
            arrival_date: arrival,
            departure_date: arrival + Duration::days(7),
            flight_number: "SQ317".to_string(),
            airline: "Singapore Airlines".to_string(),
            accommodation_address: "10 Bayfront Ave".to_string(),
            accommodation_phone: Some("+6566888868".to_string()),
            purpose: TravelPurpose::Tourism,
            original_file: "itinerary_mia.pdf".to_string(),
            status,
            window: None,
        }
    }

    pub fn submission(itinerary: &Itinerary, payment_status: PaymentStatus) -> Submission {
        Submission {
            id: SubmissionId::new(),
            itinerary_id: itinerary.id,
            user_id: itinerary.user_id,
            status: SubmissionStatus::Pending,
            payment_status,
            amount: Self::SERVICE_FEE,
            currency: "USD".to_string(),
            payment_id: None,
            confirmation_number: None,
            submission_date: None,
            notes: None,
            notifications: NotificationFlags::default(),
        }
    }

    pub fn paid_submission(itinerary: &Itinerary) -> Submission {
        let mut submission = Self::submission(itinerary, PaymentStatus::Paid);
        submission.payment_id = Some("PAY-1717570800000".to_string());
        submission
    }
}
