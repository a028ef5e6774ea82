//! Home dashboard: headcounts, upcoming events, this month's giving and recent
//! donations.

use super::{
    fetch::{ReportIssue, fetch_rows},
    financial::top_donors,
    period::ReportWindow,
    ranking::RankedEntry,
    round2,
};
use crate::{
    core::donation::donor_label,
    entities::{event, member::MemberStatus},
    repository::{DonationRepository, EventRepository, MemberRepository},
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

/// Number of upcoming events and recent donations shown.
pub const DASHBOARD_LIST_LIMIT: u64 = 5;

/// A recent donation as displayed on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonationLine {
    /// Donation id
    pub id: i64,
    /// Date received
    pub date: NaiveDate,
    /// Donor label
    pub donor: String,
    /// Amount
    pub amount: f64,
}

/// Dashboard contents.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// Date the dashboard was computed for
    pub today: NaiveDate,
    /// All members regardless of status
    pub total_members: usize,
    /// Members with active status
    pub active_members: usize,
    /// Registered visitors
    pub visitors: usize,
    /// Next events, soonest first
    pub upcoming_events: Vec<event::Model>,
    /// Sum of donations since the first of the month
    pub donations_this_month: f64,
    /// Number of donations since the first of the month
    pub donation_count_this_month: usize,
    /// Latest donations
    pub recent_donations: Vec<DonationLine>,
    /// Top donors over the trailing window
    pub top_donors: Vec<RankedEntry>,
    /// Sources that failed to load
    pub issues: Vec<ReportIssue>,
}

/// Builds the dashboard. `window` controls the top-donor ranking and must end on
/// `today`'s date or later for "this month" to be meaningful.
pub async fn dashboard<R>(repo: &R, window: &ReportWindow) -> Dashboard
where
    R: DonationRepository + EventRepository + MemberRepository,
{
    let today = window.end();
    let month_start = today.with_day(1).unwrap_or(today);

    let (members, upcoming, window_donations, recent) = tokio::join!(
        fetch_rows("members", repo.all_members()),
        fetch_rows("events", repo.upcoming_events(today, DASHBOARD_LIST_LIMIT)),
        fetch_rows("donations", repo.donations_between(window.start(), today)),
        fetch_rows("recent_donations", repo.recent_donations(DASHBOARD_LIST_LIMIT)),
    );

    let mut issues = Vec::new();
    let members = members.take(&mut issues);
    let upcoming_events = upcoming.take(&mut issues);
    let window_donations = window_donations.take(&mut issues);
    let recent = recent.take(&mut issues);

    let count_status = |status: MemberStatus| members.iter().filter(|m| m.status == status).count();

    let this_month: Vec<_> = window_donations
        .iter()
        .filter(|gift| gift.donation_date >= month_start)
        .collect();

    let by_id: HashMap<i64, _> = members.iter().map(|m| (m.id, m)).collect();
    let recent_donations = recent
        .iter()
        .map(|gift| {
            let member = gift.member_id.and_then(|id| by_id.get(&id).copied());
            DonationLine {
                id: gift.id,
                date: gift.donation_date,
                donor: donor_label(gift, member),
                amount: gift.amount,
            }
        })
        .collect();

    let dashboard = Dashboard {
        today,
        total_members: members.len(),
        active_members: count_status(MemberStatus::Active),
        visitors: count_status(MemberStatus::Visitor),
        upcoming_events,
        donations_this_month: round2(this_month.iter().map(|gift| gift.amount).sum()),
        donation_count_this_month: this_month.len(),
        recent_donations,
        top_donors: top_donors(&window_donations, &members),
        issues,
    };

    info!(
        members = dashboard.total_members,
        upcoming = dashboard.upcoming_events.len(),
        issues = dashboard.issues.len(),
        "dashboard built"
    );
    dashboard
}
