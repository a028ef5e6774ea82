//! Income and expense business logic, plus the category tables behind them.
//!
//! Category ids are UUID text. A row's `category_id` is not enforced as a foreign
//! key; unresolvable ids are handled by [`crate::core::categories`].

use crate::{
    core::{optional_text, require_text, validate_amount},
    entities::{
        Expense, ExpenseCategory, Income, IncomeCategory, expense, expense_category, income,
        income_category,
    },
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// Form data for an income row.
#[derive(Debug, Clone, Deserialize)]
pub struct NewIncome {
    /// Amount received
    pub amount: f64,
    /// Date received
    pub income_date: NaiveDate,
    /// Category id
    #[serde(default)]
    pub category_id: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Donation this income came from
    #[serde(default)]
    pub donation_id: Option<i64>,
}

/// Form data for an expense row.
#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
    /// Amount paid
    pub amount: f64,
    /// Date paid
    pub expense_date: NaiveDate,
    /// Category id
    #[serde(default)]
    pub category_id: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Member reimbursed or responsible
    #[serde(default)]
    pub member_id: Option<i64>,
}

/// Records an income row.
pub async fn create_income(db: &DatabaseConnection, form: NewIncome) -> Result<income::Model> {
    validate_amount(form.amount)?;

    let model = income::ActiveModel {
        amount: Set(form.amount),
        income_date: Set(form.income_date),
        category_id: Set(optional_text(form.category_id)),
        description: Set(optional_text(form.description)),
        donation_id: Set(form.donation_id),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    info!(income_id = created.id, amount = created.amount, "income recorded");
    Ok(created)
}

/// Records an expense row.
pub async fn create_expense(db: &DatabaseConnection, form: NewExpense) -> Result<expense::Model> {
    validate_amount(form.amount)?;

    let model = expense::ActiveModel {
        amount: Set(form.amount),
        expense_date: Set(form.expense_date),
        category_id: Set(optional_text(form.category_id)),
        description: Set(optional_text(form.description)),
        member_id: Set(form.member_id),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    info!(expense_id = created.id, amount = created.amount, "expense recorded");
    Ok(created)
}

/// Income rows dated within `[start, end]`, oldest first.
pub async fn list_income_between(
    db: &DatabaseConnection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<income::Model>> {
    Income::find()
        .filter(income::Column::IncomeDate.between(start, end))
        .order_by_asc(income::Column::IncomeDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Expense rows dated within `[start, end]`, oldest first.
pub async fn list_expenses_between(
    db: &DatabaseConnection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<expense::Model>> {
    Expense::find()
        .filter(expense::Column::ExpenseDate.between(start, end))
        .order_by_asc(expense::Column::ExpenseDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// All income categories ordered by name.
pub async fn list_income_categories(
    db: &DatabaseConnection,
) -> Result<Vec<income_category::Model>> {
    IncomeCategory::find()
        .order_by_asc(income_category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// All expense categories ordered by name.
pub async fn list_expense_categories(
    db: &DatabaseConnection,
) -> Result<Vec<expense_category::Model>> {
    ExpenseCategory::find()
        .order_by_asc(expense_category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds an income category with a fresh UUID.
pub async fn create_income_category(
    db: &DatabaseConnection,
    name: &str,
    description: Option<String>,
) -> Result<income_category::Model> {
    let model = income_category::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(require_text("name", name)?),
        description: Set(optional_text(description)),
    };
    model.insert(db).await.map_err(Into::into)
}

/// Adds an expense category with a fresh UUID.
pub async fn create_expense_category(
    db: &DatabaseConnection,
    name: &str,
    description: Option<String>,
) -> Result<expense_category::Model> {
    let model = expense_category::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(require_text("name", name)?),
        description: Set(optional_text(description)),
    };
    model.insert(db).await.map_err(Into::into)
}

/// Number of rows in each category table, `(income, expense)`.
pub async fn count_categories(db: &DatabaseConnection) -> Result<(u64, u64)> {
    let income = IncomeCategory::find().count(db).await?;
    let expense = ExpenseCategory::find().count(db).await?;
    Ok((income, expense))
}
