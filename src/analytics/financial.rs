//! Financial report: monthly cash flow, category breakdowns, top donors and the
//! summary cards.

use super::{
    TOP_N,
    category::{CategoryShare, aggregate_labelled_sums, format_category_name},
    fetch::{ReportIssue, fetch_rows},
    period::{Bucket, MonthlyBuckets, ReportWindow},
    ranking::{RankedEntry, rank_totals},
    summary::{CashFlow, FinancialSummary, compose_summary},
};
use crate::{
    core::{categories::CategoryResolver, donation::donor_label},
    entities::{donation, member},
    repository::{
        CategoryRepository, DonationRepository, ExpenseRepository, IncomeRepository,
        MemberRepository,
    },
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

/// Everything the finance dashboard shows for one window.
#[derive(Debug, Clone, Serialize)]
pub struct FinancialReport {
    /// Window the report covers
    pub window: ReportWindow,
    /// Income and expenses per month, oldest first
    pub monthly: Vec<Bucket<CashFlow>>,
    /// Income by category, largest first
    pub income_categories: Vec<CategoryShare>,
    /// Expenses by category, largest first
    pub expense_categories: Vec<CategoryShare>,
    /// Top donors by total given
    pub top_donors: Vec<RankedEntry>,
    /// Summary card values
    pub summary: FinancialSummary,
    /// Sources that failed to load
    pub issues: Vec<ReportIssue>,
}

/// Ranks donors by total given, labelling each with [`donor_label`].
#[must_use]
pub fn top_donors(donations: &[donation::Model], members: &[member::Model]) -> Vec<RankedEntry> {
    let by_id: HashMap<i64, &member::Model> = members.iter().map(|m| (m.id, m)).collect();

    rank_totals(
        donations.iter().map(|gift| {
            let member = gift.member_id.and_then(|id| by_id.get(&id).copied());
            (donor_label(gift, member), gift.amount)
        }),
        TOP_N,
    )
}

/// Builds the financial report. Income combines donations with income rows that
/// are not themselves derived from a donation.
pub async fn financial_report<R>(repo: &R, window: &ReportWindow) -> FinancialReport
where
    R: DonationRepository
        + IncomeRepository
        + ExpenseRepository
        + CategoryRepository
        + MemberRepository,
{
    let (start, end) = (window.start(), window.end());

    let (donations, income, expenses, income_categories, expense_categories, members) = tokio::join!(
        fetch_rows("donations", repo.donations_between(start, end)),
        fetch_rows("income", repo.income_between(start, end)),
        fetch_rows("expenses", repo.expenses_between(start, end)),
        fetch_rows("income_categories", repo.income_categories()),
        fetch_rows("expense_categories", repo.expense_categories()),
        fetch_rows("members", repo.all_members()),
    );

    let mut issues = Vec::new();
    let donations = donations.take(&mut issues);
    let income: Vec<_> = income
        .take(&mut issues)
        .into_iter()
        .filter(|row| row.donation_id.is_none())
        .collect();
    let expenses = expenses.take(&mut issues);
    let income_resolver = CategoryResolver::new(income_categories.take(&mut issues));
    let expense_resolver = CategoryResolver::new(expense_categories.take(&mut issues));
    let members = members.take(&mut issues);

    let mut buckets = MonthlyBuckets::<CashFlow>::new(window);
    for gift in &donations {
        buckets.add(gift.donation_date, |flow| flow.income += gift.amount);
    }
    for row in &income {
        buckets.add(row.income_date, |flow| flow.income += row.amount);
    }
    for row in &expenses {
        buckets.add(row.expense_date, |flow| flow.expenses += row.amount);
    }
    let mut monthly = buckets.into_series();
    for bucket in &mut monthly {
        bucket.metrics.income = super::round2(bucket.metrics.income);
        bucket.metrics.expenses = super::round2(bucket.metrics.expenses);
    }

    let income_categories = aggregate_labelled_sums(
        donations
            .iter()
            .map(|gift| {
                let kind = gift.donation_type.as_deref().map(format_category_name);
                (kind, gift.amount)
            })
            .chain(
                income
                    .iter()
                    .map(|row| (income_resolver.label(row.category_id.as_deref()), row.amount)),
            ),
    );
    let expense_categories = aggregate_labelled_sums(
        expenses
            .iter()
            .map(|row| (expense_resolver.label(row.category_id.as_deref()), row.amount)),
    );

    let summary = compose_summary(&monthly, &income_categories, &expense_categories);
    let top_donors = top_donors(&donations, &members);

    info!(
        months = monthly.len(),
        total_income = summary.total_income,
        total_expenses = summary.total_expenses,
        issues = issues.len(),
        "financial report built"
    );

    FinancialReport {
        window: *window,
        monthly,
        income_categories,
        expense_categories,
        top_donors,
        summary,
        issues,
    }
}
