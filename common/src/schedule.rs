//! Scheduled orders: the slot picker and the record sent with the order.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::model::order::ScheduleRecord;

/// A customer's request to have an order prepared for later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSchedule {
    /// `HH:MM` as picked in the schedule popup.
    pub time: String,
    pub date: NaiveDate,
}

impl OrderSchedule {
    /// Returns `None` when `time` is not a valid `HH:MM` value.
    pub fn new(time: &str, date: NaiveDate) -> Option<Self> {
        NaiveTime::parse_from_str(time, "%H:%M").ok()?;
        Some(Self {
            time: time.to_string(),
            date,
        })
    }

    /// E.g. `Friday, Mar 13 at 18:30`.
    pub fn scheduled_for(&self) -> String {
        format!("{} at {}", self.date.format("%A, %b %-d"), self.time)
    }

    pub fn to_record(&self) -> ScheduleRecord {
        ScheduleRecord {
            scheduled_time: self.time.clone(),
            scheduled_date: self.date.format("%Y-%m-%d").to_string(),
            scheduled_for: self.scheduled_for(),
            is_scheduled: true,
        }
    }
}

/// Kitchen hours for scheduled orders, in minutes after midnight.
const KITCHEN_OPENS: u32 = 10 * 60;
const KITCHEN_CLOSES: u32 = 21 * 60;
const SLOT_MINUTES: u32 = 30;

/// What the schedule picker offers at a given moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSlots {
    pub date: NaiveDate,
    /// `HH:MM` start times.
    pub slots: Vec<String>,
    /// Whether the kitchen is open right now.
    pub open_now: bool,
    pub notice: Option<String>,
}

fn slots_between(start: u32, end: u32) -> Vec<String> {
    (start..end)
        .step_by(SLOT_MINUTES as usize)
        .map(|m| format!("{:02}:{:02}", m / 60, m % 60))
        .collect()
}

/// Slots still bookable at `now`: the rest of today rounded up to the next
/// half hour while the kitchen is open, otherwise the next full day.
pub fn available_slots(now: NaiveDateTime) -> ScheduleSlots {
    let today = now.date();
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
    let minute = now.hour() * 60 + now.minute();
    let full_day = slots_between(KITCHEN_OPENS, KITCHEN_CLOSES);

    if minute < KITCHEN_OPENS {
        return ScheduleSlots {
            date: today,
            slots: full_day,
            open_now: false,
            notice: Some(format!(
                "Restaurant opens at {}:00 AM. You can schedule for today or later.",
                KITCHEN_OPENS / 60
            )),
        };
    }
    if minute >= KITCHEN_CLOSES {
        return ScheduleSlots {
            date: tomorrow,
            slots: full_day,
            open_now: false,
            notice: Some(format!(
                "Restaurant is closed. Next available slots are tomorrow from {}:00 AM to {}:00 PM.",
                KITCHEN_OPENS / 60,
                KITCHEN_CLOSES / 60 - 12
            )),
        };
    }

    let next = if now.minute() < SLOT_MINUTES {
        now.hour() * 60 + SLOT_MINUTES
    } else {
        (now.hour() + 1) * 60
    };
    let start = next.max(KITCHEN_OPENS);
    if start >= KITCHEN_CLOSES {
        return ScheduleSlots {
            date: tomorrow,
            slots: full_day,
            open_now: true,
            notice: Some("No more slots available today. Showing tomorrow's availability.".into()),
        };
    }
    ScheduleSlots {
        date: today,
        slots: slots_between(start, KITCHEN_CLOSES),
        open_now: true,
        notice: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 13)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn open_kitchen_rounds_up_to_next_half_hour() {
        let slots = available_slots(at(18, 10));
        assert!(slots.open_now);
        assert_eq!(slots.date, at(0, 0).date());
        assert_eq!(slots.slots, vec!["18:30", "19:00", "19:30", "20:00", "20:30"]);

        let slots = available_slots(at(18, 45));
        assert_eq!(slots.slots.first().map(String::as_str), Some("19:00"));
    }

    #[test]
    fn before_opening_offers_all_of_today() {
        let slots = available_slots(at(7, 0));
        assert!(!slots.open_now);
        assert_eq!(slots.slots.len(), 22);
        assert_eq!(slots.slots[0], "10:00");
        assert_eq!(slots.slots[21], "20:30");
    }

    #[test]
    fn late_evening_moves_to_tomorrow() {
        let closed = available_slots(at(22, 0));
        assert!(!closed.open_now);
        assert_eq!(closed.date, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());

        let last_call = available_slots(at(20, 40));
        assert!(last_call.open_now);
        assert_eq!(last_call.date, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
        assert!(last_call.notice.is_some());
    }

    #[test]
    fn renders_human_schedule() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 13).unwrap();
        let schedule = OrderSchedule::new("18:30", date).unwrap();
        assert_eq!(schedule.scheduled_for(), "Friday, Mar 13 at 18:30");

        let record = schedule.to_record();
        assert_eq!(record.scheduled_date, "2026-03-13");
        assert!(record.is_scheduled);
    }

    #[test]
    fn rejects_bad_time() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 13).unwrap();
        assert!(OrderSchedule::new("6pm", date).is_none());
    }
}
