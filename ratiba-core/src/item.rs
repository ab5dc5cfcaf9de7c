//! Display state for one schedule in the list.

use chrono::{DateTime, TimeZone, Utc};

use crate::schedule::{Schedule, ScheduleId};

/// What the user asked to do with a list item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemIntent {
    Edit(Schedule),
    Delete(ScheduleId),
}

/// Read-only view of a schedule. Flags are computed from the `now` passed in
/// on every call; nothing is cached.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleItem<'a> {
    schedule: &'a Schedule,
}

impl<'a> ScheduleItem<'a> {
    pub fn new(schedule: &'a Schedule) -> Self {
        ScheduleItem { schedule }
    }

    pub fn schedule(&self) -> &'a Schedule {
        self.schedule
    }

    /// Starts on the same calendar day as `now`, in `now`'s zone.
    pub fn is_today<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.schedule.start_time.with_timezone(&now.timezone()).date_naive() == now.date_naive()
    }

    pub fn is_past<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.schedule.end_time < now.with_timezone(&Utc)
    }

    pub fn edit_intent(&self) -> ItemIntent {
        ItemIntent::Edit(self.schedule.clone())
    }

    pub fn delete_intent(&self) -> ItemIntent {
        ItemIntent::Delete(self.schedule.id.clone())
    }

    pub fn delete_confirmation(&self) -> String {
        format!(
            "Are you sure you want to delete \"{}\"? This action cannot be undone.",
            self.schedule.title
        )
    }

    /// Start and end as `HH:MM` in `tz`.
    pub fn time_range<Tz: TimeZone>(&self, tz: &Tz) -> (String, String)
    where
        Tz::Offset: std::fmt::Display,
    {
        (
            self.schedule.start_time.with_timezone(tz).format("%H:%M").to_string(),
            self.schedule.end_time.with_timezone(tz).format("%H:%M").to_string(),
        )
    }

    /// Start date, e.g. "Mon, Jan 6, 2025".
    pub fn date_label<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        self.schedule
            .start_time
            .with_timezone(tz)
            .format("%a, %b %-d, %Y")
            .to_string()
    }
}
