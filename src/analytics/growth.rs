//! Membership growth: joins per month with a running total, plus demographic and
//! status breakdowns.

use super::{
    category::{CategoryShare, aggregate_counts, aggregate_counts_or},
    fetch::{ReportIssue, fetch_rows},
    percent_of,
    period::{Bucket, MonthlyBuckets, ReportWindow},
};
use crate::{
    entities::member::{Gender, MemberStatus},
    repository::MemberRepository,
};
use serde::Serialize;
use tracing::info;

/// Members joining in a month and the total at the end of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GrowthMonth {
    /// Members whose join date falls in the month
    pub new_members: usize,
    /// Members who had joined by the end of the month
    pub total_members: usize,
}

/// Member growth for one window.
#[derive(Debug, Clone, Serialize)]
pub struct GrowthReport {
    /// Window the report covers
    pub window: ReportWindow,
    /// Per-month growth, oldest first
    pub monthly: Vec<Bucket<GrowthMonth>>,
    /// Members who joined before the window
    pub starting_members: usize,
    /// Members who joined during the window
    pub new_in_window: usize,
    /// Growth relative to the starting count, in percent
    pub growth_rate: f64,
    /// Members by gender
    pub by_gender: Vec<CategoryShare>,
    /// Members by status
    pub by_status: Vec<CategoryShare>,
    /// Sources that failed to load
    pub issues: Vec<ReportIssue>,
}

const fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "male",
        Gender::Female => "female",
    }
}

const fn status_label(status: MemberStatus) -> &'static str {
    match status {
        MemberStatus::Active => "active",
        MemberStatus::Inactive => "inactive",
        MemberStatus::Visitor => "visitor",
    }
}

/// Builds the growth report. Members who joined after the window end are ignored.
pub async fn growth_report<R>(repo: &R, window: &ReportWindow) -> GrowthReport
where
    R: MemberRepository,
{
    let mut issues = Vec::new();
    let members: Vec<_> = fetch_rows("members", repo.all_members())
        .await
        .take(&mut issues)
        .into_iter()
        .filter(|member| member.join_date <= window.end())
        .collect();

    let starting_members = members
        .iter()
        .filter(|member| member.join_date < window.start())
        .count();

    let mut buckets = MonthlyBuckets::<GrowthMonth>::new(window);
    let mut new_in_window = 0;
    for member in &members {
        if buckets.add(member.join_date, |month| month.new_members += 1) {
            new_in_window += 1;
        }
    }

    let mut running = starting_members;
    for (_, month) in buckets.iter_mut() {
        running += month.new_members;
        month.total_members = running;
    }

    let by_gender = aggregate_counts_or(
        members.iter().map(|member| member.gender.map(gender_label)),
        "Unspecified",
    );
    let by_status = aggregate_counts(
        members
            .iter()
            .map(|member| Some(status_label(member.status))),
    );

    // Member counts are far below f64's exact integer range.
    #[allow(clippy::cast_precision_loss)]
    let growth_rate = percent_of(new_in_window as f64, starting_members as f64);

    info!(
        members = members.len(),
        new_in_window,
        issues = issues.len(),
        "growth report built"
    );

    GrowthReport {
        window: *window,
        monthly: buckets.into_series(),
        starting_members,
        new_in_window,
        growth_rate,
        by_gender,
        by_status,
        issues,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{errors::ErrorKind, test_utils::*};

    #[tokio::test]
    async fn test_growth_report_running_total() {
        let mut repo = FakeRepository::default();
        repo.members.push(fake_member(1, date(2023, 6, 1), Some(Gender::Female), MemberStatus::Active));
        repo.members.push(fake_member(2, date(2023, 12, 15), None, MemberStatus::Active));
        repo.members.push(fake_member(3, date(2024, 2, 1), Some(Gender::Male), MemberStatus::Visitor));
        repo.members.push(fake_member(4, date(2024, 2, 20), Some(Gender::Female), MemberStatus::Inactive));
        repo.members.push(fake_member(5, date(2024, 9, 1), Some(Gender::Male), MemberStatus::Active));

        let window = ReportWindow::new(date(2024, 2, 29), 2).unwrap();
        let report = growth_report(&repo, &window).await;

        assert_eq!(report.starting_members, 1);
        assert_eq!(report.new_in_window, 3);
        assert_eq!(report.growth_rate, 300.0);

        let monthly: Vec<(&str, usize, usize)> = report
            .monthly
            .iter()
            .map(|b| (b.label.as_str(), b.metrics.new_members, b.metrics.total_members))
            .collect();
        assert_eq!(
            monthly,
            vec![("Dec 2023", 1, 2), ("Jan 2024", 0, 2), ("Feb 2024", 2, 4)]
        );

        let genders: Vec<(&str, usize)> = report
            .by_gender
            .iter()
            .map(|s| (s.name.as_str(), s.count))
            .collect();
        assert_eq!(genders, vec![("Female", 2), ("Male", 1), ("Unspecified", 1)]);

        assert_eq!(report.by_status[0].name, "Active");
        assert_eq!(report.by_status[0].percent, 50.0);
    }

    #[tokio::test]
    async fn test_growth_report_without_baseline() {
        let mut repo = FakeRepository::default();
        repo.members.push(fake_member(1, date(2024, 1, 3), None, MemberStatus::Active));

        let window = ReportWindow::new(date(2024, 1, 31), 0).unwrap();
        let report = growth_report(&repo, &window).await;

        assert_eq!(report.starting_members, 0);
        assert_eq!(report.growth_rate, 0.0);
        assert_eq!(report.monthly[0].metrics.total_members, 1);
    }

    #[tokio::test]
    async fn test_growth_report_member_failure() {
        let mut repo = FakeRepository::default();
        repo.fail("members", ErrorKind::NotFound);

        let window = ReportWindow::new(date(2024, 1, 31), 3).unwrap();
        let report = growth_report(&repo, &window).await;

        assert_eq!(report.issues[0].kind, ErrorKind::NotFound);
        assert_eq!(report.monthly.len(), 4);
        assert!(report.monthly.iter().all(|b| b.metrics.total_members == 0));
    }
}
