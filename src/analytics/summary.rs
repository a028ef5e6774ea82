//! Scalar summaries for the financial report's summary cards.

use super::{
    category::{CategoryShare, largest_category},
    period::Bucket,
    round2,
};
use serde::Serialize;

/// Income and expenses for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CashFlow {
    /// Money in
    pub income: f64,
    /// Money out
    pub expenses: f64,
}

/// Summary card values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    /// Total income over the window
    pub total_income: f64,
    /// Total expenses over the window
    pub total_expenses: f64,
    /// `total_income - total_expenses`
    pub net_balance: f64,
    /// Income divided by the number of months that had income
    pub average_monthly_income: f64,
    /// Expenses divided by the number of months that had expenses
    pub average_monthly_expenses: f64,
    /// Largest income category, or `"None"`
    pub largest_income_category: String,
    /// Largest expense category, or `"None"`
    pub largest_expense_category: String,
}

fn average_over_active_months<F>(monthly: &[Bucket<CashFlow>], metric: F) -> f64
where
    F: Fn(&CashFlow) -> f64,
{
    let total: f64 = monthly.iter().map(|bucket| metric(&bucket.metrics)).sum();
    let active = monthly
        .iter()
        .filter(|bucket| metric(&bucket.metrics) != 0.0)
        .count()
        .max(1);

    // Month counts are tiny; the conversion is exact.
    #[allow(clippy::cast_precision_loss)]
    let divisor = active as f64;
    round2(total / divisor)
}

/// Derives the summary from monthly cash flow and the sorted category lists.
/// Never fails, including for an all-zero dataset.
#[must_use]
pub fn compose_summary(
    monthly: &[Bucket<CashFlow>],
    income_categories: &[CategoryShare],
    expense_categories: &[CategoryShare],
) -> FinancialSummary {
    let total_income = round2(monthly.iter().map(|b| b.metrics.income).sum());
    let total_expenses = round2(monthly.iter().map(|b| b.metrics.expenses).sum());

    FinancialSummary {
        total_income,
        total_expenses,
        net_balance: round2(total_income - total_expenses),
        average_monthly_income: average_over_active_months(monthly, |flow| flow.income),
        average_monthly_expenses: average_over_active_months(monthly, |flow| flow.expenses),
        largest_income_category: largest_category(income_categories),
        largest_expense_category: largest_category(expense_categories),
    }
}
