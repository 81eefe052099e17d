//! Calendar projections of tasks and meetings.
//!
//! DESIGN
//! ======
//! A task belongs to the day its due date names and a meeting to the day it
//! starts. Day membership is a prefix match on the `YYYY-MM-DD` portion of
//! the stored string, so no timezone conversion happens here. Within a day
//! events are ordered by time; undated or unparseable times sort first, and
//! meetings precede tasks on ties.

#[cfg(test)]
#[path = "timeline_test.rs"]
mod timeline_test;

use std::collections::BTreeMap;

use serde::Serialize;
use time::{Date, Month};

use super::model::{Meeting, Task};
use crate::net::payloads::parse_timestamp;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "item", rename_all = "camelCase")]
pub enum TimelineEvent<'a> {
    Meeting(&'a Meeting),
    Task(&'a Task),
}

impl TimelineEvent<'_> {
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Meeting(meeting) => &meeting.title,
            Self::Task(task) => &task.title,
        }
    }

    /// The timestamp string that places this event on the calendar.
    #[must_use]
    pub fn when(&self) -> Option<&str> {
        match self {
            Self::Meeting(meeting) => Some(&meeting.start_date),
            Self::Task(task) => task.due_date.as_deref(),
        }
    }

    fn sort_key(&self) -> i128 {
        self.when()
            .and_then(parse_timestamp)
            .map_or(0, time::OffsetDateTime::unix_timestamp_nanos)
    }
}

/// `YYYY-MM-DD` for a calendar day.
#[must_use]
pub fn day_key(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

/// Meetings and tasks falling on `day`, ordered by time.
#[must_use]
pub fn events_for_day<'a>(tasks: &'a [Task], meetings: &'a [Meeting], day: Date) -> Vec<TimelineEvent<'a>> {
    let key = day_key(day);
    let mut events: Vec<TimelineEvent<'a>> = meetings
        .iter()
        .filter(|m| m.start_date.starts_with(&key))
        .map(TimelineEvent::Meeting)
        .chain(
            tasks
                .iter()
                .filter(|t| t.due_date.as_deref().is_some_and(|d| d.starts_with(&key)))
                .map(TimelineEvent::Task),
        )
        .collect();
    events.sort_by_key(TimelineEvent::sort_key);
    events
}

/// The Sunday-to-Saturday week containing `date`.
#[must_use]
pub fn week_days(date: Date) -> Vec<Date> {
    let back = usize::from(date.weekday().number_days_from_sunday());
    let Some(sunday) = std::iter::successors(Some(date), |d| d.previous_day()).nth(back) else {
        return Vec::new();
    };
    std::iter::successors(Some(sunday), |d| d.next_day()).take(7).collect()
}

/// Every day of a calendar month. Empty for an out-of-range year.
#[must_use]
pub fn month_days(year: i32, month: Month) -> Vec<Date> {
    let Ok(first) = Date::from_calendar_date(year, month, 1) else {
        return Vec::new();
    };
    std::iter::successors(Some(first), |d| d.next_day())
        .take_while(|d| d.month() == month)
        .collect()
}

/// Events grouped per day for a range of days. Days with no events are kept.
#[must_use]
pub fn bucket_by_day<'a>(
    tasks: &'a [Task],
    meetings: &'a [Meeting],
    days: &[Date],
) -> BTreeMap<Date, Vec<TimelineEvent<'a>>> {
    days.iter()
        .map(|day| (*day, events_for_day(tasks, meetings, *day)))
        .collect()
}
