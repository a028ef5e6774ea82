//! Plain-text renderings of the reports for terminal output.

use crate::{
    analytics::{
        category::CategoryShare, dashboard::Dashboard, events::EventReport, fetch::ReportIssue,
        financial::FinancialReport, growth::GrowthReport, period::ReportWindow,
        ranking::RankedEntry,
    },
    core::receipt::format_currency,
};
use std::fmt::Write;

const BAR_LENGTH: usize = 20;

/// Text bar for a percentage, like `[████████░░░░] 40.0%`.
#[must_use]
pub fn share_bar(percent: f64, bar_length: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);

    // clamped is within [0, 100] and bar_length is small, so the result fits in [0, bar_length]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * bar_length as f64).round() as usize;
    let empty = bar_length.saturating_sub(filled);

    format!("[{}{}] {percent:.1}%", "█".repeat(filled), "░".repeat(empty))
}

fn push_title(out: &mut String, title: &str, window: &ReportWindow) {
    let _ = writeln!(out, "{title} ({} to {})", window.start(), window.end());
    let _ = writeln!(out, "{}", "-".repeat(50));
}

fn push_shares<F>(out: &mut String, heading: &str, shares: &[CategoryShare], value: F)
where
    F: Fn(f64) -> String,
{
    let _ = writeln!(out);
    let _ = writeln!(out, "{heading}");
    if shares.is_empty() {
        let _ = writeln!(out, "  (none)");
        return;
    }
    for share in shares {
        let _ = writeln!(
            out,
            "  {:<24} {:>14}  {}",
            share.name,
            value(share.value),
            share_bar(share.percent, BAR_LENGTH)
        );
    }
}

fn push_ranking<F>(out: &mut String, heading: &str, entries: &[RankedEntry], value: F)
where
    F: Fn(f64) -> String,
{
    let _ = writeln!(out);
    let _ = writeln!(out, "{heading}");
    if entries.is_empty() {
        let _ = writeln!(out, "  (none)");
        return;
    }
    for (rank, entry) in entries.iter().enumerate() {
        let _ = writeln!(out, "  {}. {:<24} {:>14}", rank + 1, entry.name, value(entry.value));
    }
}

fn push_issues(out: &mut String, issues: &[ReportIssue]) {
    if issues.is_empty() {
        return;
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Incomplete data:");
    for issue in issues {
        let _ = writeln!(out, "  {} ({:?}): {}", issue.source, issue.kind, issue.message);
    }
}

/// Renders the financial report.
#[must_use]
pub fn render_financial(report: &FinancialReport, symbol: &str) -> String {
    let money = |amount: f64| format_currency(symbol, amount);
    let mut out = String::new();
    push_title(&mut out, "Financial report", &report.window);

    let _ = writeln!(out, "  {:<10} {:>14} {:>14}", "Month", "Income", "Expenses");
    for bucket in &report.monthly {
        let _ = writeln!(
            out,
            "  {:<10} {:>14} {:>14}",
            bucket.label,
            money(bucket.metrics.income),
            money(bucket.metrics.expenses)
        );
    }

    push_shares(&mut out, "Income by category", &report.income_categories, money);
    push_shares(&mut out, "Expenses by category", &report.expense_categories, money);
    push_ranking(&mut out, "Top donors", &report.top_donors, money);

    let summary = &report.summary;
    let _ = writeln!(out);
    let _ = writeln!(out, "Summary");
    let _ = writeln!(out, "  Total income:        {}", money(summary.total_income));
    let _ = writeln!(out, "  Total expenses:      {}", money(summary.total_expenses));
    let _ = writeln!(out, "  Net balance:         {}", money(summary.net_balance));
    let _ = writeln!(out, "  Avg monthly income:  {}", money(summary.average_monthly_income));
    let _ = writeln!(out, "  Avg monthly expense: {}", money(summary.average_monthly_expenses));
    let _ = writeln!(out, "  Largest income:      {}", summary.largest_income_category);
    let _ = writeln!(out, "  Largest expense:     {}", summary.largest_expense_category);

    push_issues(&mut out, &report.issues);
    out
}

/// Renders the event analytics report.
#[must_use]
pub fn render_events(report: &EventReport) -> String {
    let count = |value: f64| format!("{value:.0}");
    let mut out = String::new();
    push_title(&mut out, "Event report", &report.window);

    let _ = writeln!(out, "  {:<10} {:>8} {:>12}", "Month", "Events", "Attendance");
    for bucket in &report.monthly {
        let _ = writeln!(
            out,
            "  {:<10} {:>8} {:>12}",
            bucket.label, bucket.metrics.events, bucket.metrics.attendance
        );
    }

    push_shares(&mut out, "Event types", &report.event_types, count);
    push_ranking(&mut out, "Best attended", &report.top_events, count);

    let _ = writeln!(out);
    let _ = writeln!(out, "Total events:       {}", report.total_events);
    let _ = writeln!(out, "Average attendance: {:.2}", report.average_attendance);
    let _ = writeln!(out, "Attendance rate:    {:.2}%", report.attendance_rate);

    push_issues(&mut out, &report.issues);
    out
}

/// Renders the membership growth report.
#[must_use]
pub fn render_growth(report: &GrowthReport) -> String {
    let count = |value: f64| format!("{value:.0}");
    let mut out = String::new();
    push_title(&mut out, "Membership growth", &report.window);

    let _ = writeln!(out, "  {:<10} {:>6} {:>8}", "Month", "New", "Total");
    for bucket in &report.monthly {
        let _ = writeln!(
            out,
            "  {:<10} {:>6} {:>8}",
            bucket.label, bucket.metrics.new_members, bucket.metrics.total_members
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Members before window: {}", report.starting_members);
    let _ = writeln!(out, "Joined in window:      {}", report.new_in_window);
    let _ = writeln!(out, "Growth rate:           {:.2}%", report.growth_rate);

    push_shares(&mut out, "By gender", &report.by_gender, count);
    push_shares(&mut out, "By status", &report.by_status, count);

    push_issues(&mut out, &report.issues);
    out
}

/// Renders the dashboard.
#[must_use]
pub fn render_dashboard(board: &Dashboard, symbol: &str) -> String {
    let money = |amount: f64| format_currency(symbol, amount);
    let mut out = String::new();
    let _ = writeln!(out, "Dashboard for {}", board.today);
    let _ = writeln!(out, "{}", "-".repeat(50));
    let _ = writeln!(
        out,
        "Members: {} total, {} active, {} visitors",
        board.total_members, board.active_members, board.visitors
    );
    let _ = writeln!(
        out,
        "Giving this month: {} from {} donations",
        money(board.donations_this_month),
        board.donation_count_this_month
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Upcoming events");
    if board.upcoming_events.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for event in &board.upcoming_events {
        let _ = writeln!(out, "  {}  {}", event.event_date, event.title);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Recent donations");
    if board.recent_donations.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for line in &board.recent_donations {
        let _ = writeln!(out, "  {}  {:<24} {:>14}", line.date, line.donor, money(line.amount));
    }

    push_ranking(&mut out, "Top donors", &board.top_donors, money);
    push_issues(&mut out, &board.issues);
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        analytics::financial::financial_report,
        errors::ErrorKind,
        test_utils::{FakeRepository, date, fake_donation},
    };

    #[test]
    fn test_share_bar_full() {
        assert_eq!(share_bar(100.0, 10), "[██████████] 100.0%");
    }

    #[test]
    fn test_share_bar_half() {
        assert_eq!(share_bar(50.0, 10), "[█████░░░░░] 50.0%");
    }

    #[test]
    fn test_share_bar_zero() {
        assert_eq!(share_bar(0.0, 4), "[░░░░] 0.0%");
    }

    #[tokio::test]
    async fn test_render_financial_lists_months_and_issues() {
        let mut repo = FakeRepository::default();
        repo.donations.push(fake_donation(1, 1250.0, date(2024, 2, 4)));
        repo.fail("expenses", ErrorKind::Network);

        let window = ReportWindow::new(date(2024, 2, 29), 1).unwrap();
        let report = financial_report(&repo, &window).await;
        let text = render_financial(&report, "$");

        assert!(text.contains("Financial report (2024-01-01 to 2024-02-29)"));
        assert!(text.contains("Jan 2024"));
        assert!(text.contains("Feb 2024"));
        assert!(text.contains("$1,250.00"));
        assert!(text.contains("Incomplete data:"));
        assert!(text.contains("expenses (Network)"));
    }
}
