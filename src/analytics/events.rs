//! Event analytics: events and attendance per month, event-type mix and the
//! best-attended events.

use super::{
    TOP_N,
    category::{CategoryShare, aggregate_counts},
    fetch::{ReportIssue, fetch_rows},
    percent_of,
    period::{Bucket, MonthlyBuckets, ReportWindow},
    ranking::{RankedEntry, top_n},
    round2,
};
use crate::repository::{AttendanceRepository, EventRepository};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

/// Events held and people present in one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventMonth {
    /// Events dated in the month
    pub events: usize,
    /// Present attendance records dated in the month
    pub attendance: usize,
}

/// Event analytics for one window.
#[derive(Debug, Clone, Serialize)]
pub struct EventReport {
    /// Window the report covers
    pub window: ReportWindow,
    /// Per-month activity, oldest first
    pub monthly: Vec<Bucket<EventMonth>>,
    /// Events by type, most frequent first
    pub event_types: Vec<CategoryShare>,
    /// Events with the most people present
    pub top_events: Vec<RankedEntry>,
    /// Number of events in the window
    pub total_events: usize,
    /// Present records linked to an event, divided by the number of events
    pub average_attendance: f64,
    /// Present records as a percentage of all attendance records
    pub attendance_rate: f64,
    /// Sources that failed to load
    pub issues: Vec<ReportIssue>,
}

/// Builds the event report. Events and attendance are fetched concurrently and
/// processed once both have completed.
pub async fn event_report<R>(repo: &R, window: &ReportWindow) -> EventReport
where
    R: EventRepository + AttendanceRepository,
{
    let (start, end) = (window.start(), window.end());
    let (events, attendance) = tokio::join!(
        fetch_rows("events", repo.events_between(start, end)),
        fetch_rows("attendance", repo.attendance_between(start, end)),
    );

    let mut issues = Vec::new();
    let events = events.take(&mut issues);
    let attendance = attendance.take(&mut issues);

    let mut buckets = MonthlyBuckets::<EventMonth>::new(window);
    for event in &events {
        buckets.add(event.event_date, |month| month.events += 1);
    }

    let mut present_by_event: HashMap<i64, usize> = HashMap::new();
    let mut present_total = 0_usize;
    for record in attendance.iter().filter(|record| record.present) {
        present_total += 1;
        buckets.add(record.attendance_date, |month| month.attendance += 1);
        if let Some(event_id) = record.event_id {
            *present_by_event.entry(event_id).or_insert(0) += 1;
        }
    }

    let event_types = aggregate_counts(events.iter().map(|event| event.event_type.as_deref()));

    // Attendance counts are small; the conversions are exact.
    #[allow(clippy::cast_precision_loss)]
    let top_events = top_n(
        events.iter().map(|event| {
            let present = present_by_event.get(&event.id).copied().unwrap_or(0);
            (event.title.clone(), present as f64)
        }),
        TOP_N,
    );

    let linked_present: usize = events
        .iter()
        .filter_map(|event| present_by_event.get(&event.id))
        .sum();

    #[allow(clippy::cast_precision_loss)]
    let average_attendance = if events.is_empty() {
        0.0
    } else {
        round2(linked_present as f64 / events.len() as f64)
    };

    #[allow(clippy::cast_precision_loss)]
    let attendance_rate = percent_of(present_total as f64, attendance.len() as f64);

    info!(
        events = events.len(),
        attendance = attendance.len(),
        issues = issues.len(),
        "event report built"
    );

    EventReport {
        window: *window,
        monthly: buckets.into_series(),
        event_types,
        top_events,
        total_events: events.len(),
        average_attendance,
        attendance_rate,
        issues,
    }
}
