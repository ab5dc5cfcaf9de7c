//! Upcoming / past split of the schedule collection.

use chrono::{DateTime, Utc};

use crate::schedule::Schedule;

/// Which partition the list view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Upcoming,
    Past,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Upcoming => "Upcoming",
            Tab::Past => "Past",
        }
    }

    pub fn other(&self) -> Tab {
        match self {
            Tab::Upcoming => Tab::Past,
            Tab::Past => Tab::Upcoming,
        }
    }
}

/// Borrowed views over a collection split at a reference time.
///
/// Each schedule lands in exactly one side, decided by `end_time` alone, and
/// both sides keep the collection's order.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub upcoming: Vec<&'a Schedule>,
    pub past: Vec<&'a Schedule>,
}

impl<'a> Partition<'a> {
    pub fn split(schedules: &'a [Schedule], now: DateTime<Utc>) -> Self {
        let (past, upcoming): (Vec<&Schedule>, Vec<&Schedule>) = schedules.iter().partition(|s| s.is_past(now));
        Partition { upcoming, past }
    }

    pub fn tab(&self, tab: Tab) -> &[&'a Schedule] {
        match tab {
            Tab::Upcoming => &self.upcoming,
            Tab::Past => &self.past,
        }
    }

    pub fn len(&self) -> usize {
        self.upcoming.len() + self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
