//! Table reservations: the persisted record, the form draft and the
//! validation that runs before a draft is submitted.

use std::sync::LazyLock;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ReservationError;

/// Guest count recorded when the whole restaurant is booked.
pub const WHOLE_RESTAURANT_GUESTS: u32 = 100;

const OPENING_HOUR: u32 = 9;
const CLOSING_HOUR: u32 = 23;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]{2,}$").expect("static regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));
static GHANA_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0\d{9}|\+233\d{9})$").expect("static regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// `0XXXXXXXXX` or `+233XXXXXXXXX`.
pub fn is_ghana_phone(phone: &str) -> bool {
    GHANA_PHONE_RE.is_match(phone)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 4] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Cancelled,
        ReservationStatus::Completed,
    ];

    /// Pending and confirmed bookings are still ahead of the customer.
    pub fn is_active(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }

    /// Statuses an admin can move a booking to from this one.
    pub fn admin_transitions(&self) -> &'static [ReservationStatus] {
        match self {
            ReservationStatus::Pending => &[ReservationStatus::Confirmed, ReservationStatus::Cancelled],
            ReservationStatus::Confirmed => &[ReservationStatus::Completed],
            ReservationStatus::Cancelled | ReservationStatus::Completed => &[],
        }
    }
}

/// Status tabs of the admin reservation list; `None` shows everything.
pub const ADMIN_FILTERS: [Option<ReservationStatus>; 4] = [
    None,
    Some(ReservationStatus::Pending),
    Some(ReservationStatus::Confirmed),
    Some(ReservationStatus::Cancelled),
];

pub fn count_with_status(reservations: &[Reservation], status: ReservationStatus) -> usize {
    reservations.iter().filter(|r| r.status == status).count()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(rename = "_id")]
    pub id: String,
    pub number_of_tables: u32,
    pub chairs_per_table: u32,
    pub reservation_date: String,
    pub reservation_time: String,
    #[serde(default)]
    pub whole_restaurant: bool,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[serde(default)]
    pub special_requests: String,
    #[serde(default)]
    pub status: ReservationStatus,
    pub total_guests: u32,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Time slots offered by the booking form.
pub const RESERVATION_TIMES: [&str; 15] = [
    "11:00", "11:30", "12:00", "12:30", "13:00", "13:30", "14:00", "14:30",
    "18:00", "18:30", "19:00", "19:30", "20:00", "20:30", "21:00",
];

impl Reservation {
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(&self.reservation_date, "%Y-%m-%d").ok()?;
        let time = NaiveTime::parse_from_str(&self.reservation_time, "%H:%M").ok()?;
        Some(date.and_time(time))
    }

    /// Customers may cancel up to one hour before the booking. An
    /// unreadable date never blocks a cancellation.
    pub fn can_cancel(&self, now: NaiveDateTime) -> bool {
        self.scheduled_at()
            .is_none_or(|at| now < at - Duration::hours(1))
    }
}

/// Keeps the bookings a customer still cares about.
pub fn active_only(reservations: Vec<Reservation>) -> Vec<Reservation> {
    reservations
        .into_iter()
        .filter(|r| r.status.is_active())
        .collect()
}

/// Form state of the booking page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDraft {
    pub number_of_tables: u32,
    pub chairs_per_table: u32,
    /// `YYYY-MM-DD`, as produced by a date input.
    pub reservation_date: String,
    /// `HH:MM`, as produced by a time input.
    pub reservation_time: String,
    pub whole_restaurant: bool,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub special_requests: String,
}

impl Default for ReservationDraft {
    fn default() -> Self {
        Self {
            number_of_tables: 1,
            chairs_per_table: 2,
            reservation_date: String::new(),
            reservation_time: String::new(),
            whole_restaurant: false,
            customer_name: String::new(),
            customer_email: String::new(),
            customer_phone: String::new(),
            special_requests: String::new(),
        }
    }
}

/// Body of `POST reservation`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    #[serde(flatten)]
    pub draft: ReservationDraft,
    pub total_guests: u32,
    pub user_id: Option<String>,
}

impl ReservationDraft {
    pub fn total_guests(&self) -> u32 {
        if self.whole_restaurant {
            WHOLE_RESTAURANT_GUESTS
        } else {
            self.number_of_tables * self.chairs_per_table
        }
    }

    /// Human summary shown next to the seating picker.
    pub fn seating_summary(&self) -> String {
        if self.whole_restaurant {
            return format!("Whole restaurant (up to {WHOLE_RESTAURANT_GUESTS} guests)");
        }
        let plural = if self.number_of_tables > 1 { "s" } else { "" };
        format!(
            "{} table{} × {} chairs = {} guests",
            self.number_of_tables,
            plural,
            self.chairs_per_table,
            self.total_guests()
        )
    }

    /// Parses the date and time inputs into a wall-clock instant.
    pub fn scheduled_at(&self) -> Result<NaiveDateTime, ReservationError> {
        let date = NaiveDate::parse_from_str(&self.reservation_date, "%Y-%m-%d")
            .map_err(|_| ReservationError::InvalidDateTime)?;
        let time = NaiveTime::parse_from_str(&self.reservation_time, "%H:%M")
            .map_err(|_| ReservationError::InvalidDateTime)?;
        Ok(date.and_time(time))
    }

    /// Runs every form check in the order the booking page reports them.
    /// `now` is the local wall-clock time of the browser.
    pub fn validate(&self, now: NaiveDateTime) -> Result<(), ReservationError> {
        if self.customer_name.is_empty()
            || self.customer_email.is_empty()
            || self.customer_phone.is_empty()
            || self.reservation_date.is_empty()
            || self.reservation_time.is_empty()
        {
            return Err(ReservationError::MissingFields);
        }
        if !NAME_RE.is_match(self.customer_name.trim()) {
            return Err(ReservationError::InvalidName);
        }
        if !is_valid_email(&self.customer_email) {
            return Err(ReservationError::InvalidEmail);
        }
        if !is_ghana_phone(&self.customer_phone) {
            return Err(ReservationError::InvalidPhone);
        }

        let at = self.scheduled_at()?;
        if at <= now {
            return Err(ReservationError::NotInFuture);
        }
        if at < now + Duration::hours(1) {
            return Err(ReservationError::TooSoon);
        }
        if !(OPENING_HOUR..=CLOSING_HOUR).contains(&at.hour()) {
            return Err(ReservationError::OutsideBusinessHours);
        }
        Ok(())
    }

    /// Validates and wraps the draft into the submission body.
    pub fn into_request(
        self,
        user_id: Option<String>,
        now: NaiveDateTime,
    ) -> Result<ReservationRequest, ReservationError> {
        self.validate(now)?;
        let total_guests = self.total_guests();
        Ok(ReservationRequest {
            draft: self,
            total_guests,
            user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn valid_draft() -> ReservationDraft {
        ReservationDraft {
            reservation_date: "2026-03-11".into(),
            reservation_time: "19:30".into(),
            customer_name: "Abena Mensah".into(),
            customer_email: "abena@example.com".into(),
            customer_phone: "0241234567".into(),
            ..ReservationDraft::default()
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert_eq!(valid_draft().validate(now()), Ok(()));
    }

    #[test]
    fn international_phone_format_is_accepted() {
        let draft = ReservationDraft {
            customer_phone: "+233241234567".into(),
            ..valid_draft()
        };
        assert_eq!(draft.validate(now()), Ok(()));
    }

    #[test]
    fn rejects_each_invalid_field() {
        let cases = [
            (ReservationDraft { customer_email: String::new(), ..valid_draft() }, ReservationError::MissingFields),
            (ReservationDraft { customer_name: "A1".into(), ..valid_draft() }, ReservationError::InvalidName),
            (ReservationDraft { customer_email: "abena@example".into(), ..valid_draft() }, ReservationError::InvalidEmail),
            (ReservationDraft { customer_phone: "241234567".into(), ..valid_draft() }, ReservationError::InvalidPhone),
            (ReservationDraft { reservation_time: "7pm".into(), ..valid_draft() }, ReservationError::InvalidDateTime),
        ];
        for (draft, expected) in cases {
            assert_eq!(draft.validate(now()), Err(expected));
        }
    }

    #[test]
    fn time_window_rules() {
        let past = ReservationDraft {
            reservation_date: "2026-03-10".into(),
            reservation_time: "11:00".into(),
            ..valid_draft()
        };
        assert_eq!(past.validate(now()), Err(ReservationError::NotInFuture));

        let too_soon = ReservationDraft {
            reservation_date: "2026-03-10".into(),
            reservation_time: "12:30".into(),
            ..valid_draft()
        };
        assert_eq!(too_soon.validate(now()), Err(ReservationError::TooSoon));

        let early = ReservationDraft {
            reservation_time: "08:59".into(),
            ..valid_draft()
        };
        assert_eq!(early.validate(now()), Err(ReservationError::OutsideBusinessHours));

        let late_but_open = ReservationDraft {
            reservation_time: "23:45".into(),
            ..valid_draft()
        };
        assert_eq!(late_but_open.validate(now()), Ok(()));
    }

    #[test]
    fn guest_count_and_request_body() {
        let draft = ReservationDraft {
            number_of_tables: 3,
            chairs_per_table: 4,
            ..valid_draft()
        };
        assert_eq!(draft.seating_summary(), "3 tables × 4 chairs = 12 guests");

        let request = draft.into_request(Some("u1".into()), now()).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["totalGuests"], 12);
        assert_eq!(body["numberOfTables"], 3);
        assert_eq!(body["userId"], "u1");

        let whole = ReservationDraft {
            whole_restaurant: true,
            ..valid_draft()
        };
        assert_eq!(whole.total_guests(), WHOLE_RESTAURANT_GUESTS);
    }

    #[test]
    fn active_only_drops_finished_bookings() {
        let base: Reservation = serde_json::from_value(serde_json::json!({
            "_id": "r1", "numberOfTables": 1, "chairsPerTable": 2,
            "reservationDate": "2026-03-11", "reservationTime": "19:30",
            "customerName": "A", "customerEmail": "a@x.com", "customerPhone": "0241234567",
            "status": "pending", "totalGuests": 2
        }))
        .unwrap();
        let mut cancelled = base.clone();
        cancelled.id = "r2".into();
        cancelled.status = ReservationStatus::Cancelled;
        let mut confirmed = base.clone();
        confirmed.id = "r3".into();
        confirmed.status = ReservationStatus::Confirmed;

        let kept: Vec<String> = active_only(vec![base, cancelled, confirmed])
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(kept, vec!["r1", "r3"]);
    }

    #[test]
    fn cancellation_closes_an_hour_before() {
        let booking: Reservation = serde_json::from_value(serde_json::json!({
            "_id": "r1", "numberOfTables": 1, "chairsPerTable": 2,
            "reservationDate": "2026-03-10", "reservationTime": "13:30",
            "customerName": "A", "customerEmail": "a@x.com", "customerPhone": "0241234567",
            "totalGuests": 2
        }))
        .unwrap();
        assert!(booking.can_cancel(now()));
        let later = now() + Duration::minutes(30);
        assert!(!booking.can_cancel(later));
    }

    #[test]
    fn admins_only_move_bookings_forward() {
        assert_eq!(
            ReservationStatus::Pending.admin_transitions(),
            &[ReservationStatus::Confirmed, ReservationStatus::Cancelled]
        );
        assert_eq!(
            ReservationStatus::Confirmed.admin_transitions(),
            &[ReservationStatus::Completed]
        );
        assert!(ReservationStatus::Completed.admin_transitions().is_empty());
        assert!(ReservationStatus::Cancelled.admin_transitions().is_empty());
    }
}
