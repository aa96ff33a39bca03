//! Submission window calculation
//!
//! Pure arithmetic from the arrival timestamp: the window opens 72 hours
//! before arrival, closes 2 hours before, and the filing instant is the
//! window midpoint. The calculator never rejects an input — an arrival
//! less than 74 hours away (or in the past) still yields a window, and
//! deciding eligibility is the sweep dispatcher's job.

use chrono::{DateTime, Duration, Utc};
use shared::{Itinerary, SubmissionWindow};

/// Hours before arrival at which the filing window opens
const WINDOW_OPEN_HOURS: i64 = 72;

/// Hours before arrival at which the filing window closes
const WINDOW_CLOSE_HOURS: i64 = 2;

/// Compute the legal filing window for an arrival time
pub fn compute_window(arrival: DateTime<Utc>) -> SubmissionWindow {
    let start = arrival - Duration::hours(WINDOW_OPEN_HOURS);
    let end = arrival - Duration::hours(WINDOW_CLOSE_HOURS);
    let scheduled_at = start + (end - start) / 2;

    SubmissionWindow {
        start,
        end,
        scheduled_at,
    }
}

/// Populate the derived window fields once, at itinerary creation
///
/// Idempotent: a record whose window is already set is left untouched.
pub fn ensure_window(itinerary: &mut Itinerary) {
    if itinerary.window.is_none() {
        itinerary.window = Some(compute_window(itinerary.arrival_date));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::{ItineraryId, ItineraryStatus, TravelPurpose, UserId};

    fn itinerary_arriving(arrival: DateTime<Utc>) -> Itinerary {
        Itinerary {
            id: ItineraryId::new(),
            user_id: UserId::new(),
            destination_country: "Japan".to_string(),
            arrival_date: arrival,
            departure_date: arrival + Duration::days(14),
            flight_number: "JL044".to_string(),
            airline: "Japan Airlines".to_string(),
            accommodation_address: "1-1 Chiyoda, Tokyo".to_string(),
            accommodation_phone: None,
            purpose: TravelPurpose::Tourism,
            original_file: "itinerary_test.pdf".to_string(),
            status: ItineraryStatus::Pending,
            window: None,
        }
    }

    #[test]
    fn window_matches_reference_scenario() {
        let arrival = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();

        let window = compute_window(arrival);

        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 6, 7, 12, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2024, 6, 10, 10, 0, 0).unwrap());
        assert_eq!(window.scheduled_at, Utc.with_ymd_and_hms(2024, 6, 8, 23, 0, 0).unwrap());
    }

    #[test]
    fn scheduled_instant_is_exact_midpoint() {
        let arrival = Utc.with_ymd_and_hms(2025, 1, 15, 6, 30, 0).unwrap();

        let window = compute_window(arrival);

        assert_eq!(window.scheduled_at - window.start, window.end - window.scheduled_at);
        assert_eq!(window.end - window.start, Duration::hours(70));
    }

    #[test]
    fn past_arrival_still_yields_a_window() {
        let arrival = Utc.with_ymd_and_hms(1999, 12, 31, 23, 0, 0).unwrap();

        let window = compute_window(arrival);

        assert_eq!(window.start, arrival - Duration::hours(72));
        assert_eq!(window.end, arrival - Duration::hours(2));
        assert!(window.scheduled_at < Utc::now());
    }

    #[test]
    fn ensure_window_sets_fields_exactly_once() {
        let arrival = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let mut itinerary = itinerary_arriving(arrival);

        ensure_window(&mut itinerary);
        let first = itinerary.window.expect("window should be set at creation");

        // A later arrival edit must not silently move an already-derived window
        itinerary.arrival_date = arrival + Duration::days(3);
        ensure_window(&mut itinerary);

        assert_eq!(itinerary.window, Some(first));
    }
}
