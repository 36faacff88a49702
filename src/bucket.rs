use std::fmt::Display;

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::deck::ScheduledItem;

pub const DAY_MS: i64 = 24 * 3600 * 1000;

/// Format of absolute bucket labels, e.g. "Tue Oct 20 2026".
pub const DATE_LABEL_FORMAT: &str = "%a %b %d %Y";

/// Display strings for the fixed branch labels. Translation happens outside
/// this crate; callers pass the strings they want shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketLabels {
    pub new: String,
    pub yesterday: String,
    pub today: String,
    pub tomorrow: String,
}

impl Default for BucketLabels {
    fn default() -> Self {
        Self {
            new: "New".into(),
            yesterday: "Yesterday".into(),
            today: "Today".into(),
            tomorrow: "Tomorrow".into(),
        }
    }
}

/// A maximal run of scheduled items sharing one due timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket<'a> {
    pub label: String,
    pub due: i64,
    pub days_ahead: i64,
    pub items: &'a [ScheduledItem],
}

/// Whole days from `now` to `due`, rounded up.
///
/// Saturates for timestamps near the ends of the `i64` range, so an item
/// due in the far past stays overdue.
pub fn days_ahead(due: i64, now: i64) -> i64 {
    let diff = due.saturating_sub(now);
    let days = diff / DAY_MS;
    if diff % DAY_MS > 0 {
        days + 1
    } else {
        days
    }
}

pub fn bucket_label<Tz>(due: i64, days_ahead: i64, tz: &Tz, labels: &BucketLabels) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match days_ahead {
        -1 => labels.yesterday.clone(),
        0 => labels.today.clone(),
        1 => labels.tomorrow.clone(),
        _ => date_label(due, tz),
    }
}

fn date_label<Tz>(due: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_millis_opt(due).single() {
        Some(at) => at.format(DATE_LABEL_FORMAT).to_string(),
        None => Utc
            .timestamp_millis_opt(due)
            .single()
            .map(|at| at.format(DATE_LABEL_FORMAT).to_string())
            .unwrap_or_else(|| due.to_string()),
    }
}

/// Group `scheduled` into buckets, stopping at the first bucket more than
/// `max_days_ahead` days out.
///
/// `scheduled` must already be sorted by due time. Items past the cutoff are
/// left out silently; overdue items are always kept.
pub fn build_buckets<'a, Tz>(
    scheduled: &'a [ScheduledItem],
    now: i64,
    max_days_ahead: i64,
    tz: &Tz,
    labels: &BucketLabels,
) -> Vec<Bucket<'a>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut buckets = Vec::new();
    let mut start = 0;

    while start < scheduled.len() {
        let due = scheduled[start].due;
        let days = days_ahead(due, now);
        if days > max_days_ahead {
            break;
        }

        let len = scheduled[start..]
            .iter()
            .take_while(|s| s.due == due)
            .count();

        buckets.push(Bucket {
            label: bucket_label(due, days, tz, labels),
            due,
            days_ahead: days,
            items: &scheduled[start..start + len],
        });
        start += len;
    }

    buckets
}
