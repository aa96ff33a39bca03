//! Tests for the production service implementations

mod notifications;

use chrono::{DateTime, Duration, TimeZone, Utc};
use shared::{
    Itinerary, ItineraryId, ItineraryStatus, NotificationFlags, NotificationPreference, PaymentStatus,
    Submission, SubmissionId, SubmissionStatus, TravelPurpose, User, UserId,
};

/// Arrival time used across the service tests
pub fn reference_arrival() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
}

pub fn test_user() -> User {
    User {
        id: UserId::new(),
        name: "Mia Tan".to_string(),
        email: "mia@example.com".to_string(),
        phone: "+6591234567".to_string(),
        preferred_notification: NotificationPreference::Email,
    }
}

pub fn test_itinerary(user_id: UserId, status: ItineraryStatus) -> Itinerary {
    let arrival = reference_arrival();
    Itinerary {
        id: ItineraryId::new(),
        user_id,
        destination_country: "Singapore".to_string(),
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

pub fn test_submission(itinerary: &Itinerary, payment_status: PaymentStatus) -> Submission {
    Submission {
        id: SubmissionId::new(),
        itinerary_id: itinerary.id,
        user_id: itinerary.user_id,
        status: SubmissionStatus::Pending,
        payment_status,
        amount: 19.99,
        currency: "USD".to_string(),
        payment_id: None,
        confirmation_number: None,
        submission_date: None,
        notes: None,
        notifications: NotificationFlags::default(),
    }
}
