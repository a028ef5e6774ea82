//! Shared test utilities.
//!
//! Database helpers create rows through the real `core` functions against an
//! in-memory `SQLite` database. [`FakeRepository`] serves in-memory rows to the
//! report builders and can be told to fail individual sources.

use crate::{
    core::{
        donation::{NewDonation, create_donation},
        event::{NewEvent, create_event},
        finance::{NewExpense, NewIncome, create_expense, create_income},
        member::{NewMember, create_member},
    },
    entities::{
        attendance, donation, event, expense, expense_category, income, income_category,
        member::{self, Gender, MemberStatus},
    },
    errors::{Error, ErrorKind, Result},
    repository::{
        AttendanceRepository, CategoryRepository, DonationRepository, EventRepository,
        ExpenseRepository, IncomeRepository, MemberRepository,
    },
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, DbErr, RuntimeErr};
use std::collections::HashMap;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a date, panicking on an impossible one.
#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Creates an active member who joined on 2023-01-01.
pub async fn create_test_member(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
) -> Result<member::Model> {
    create_member(db, NewMember::new(first_name, last_name, date(2023, 1, 1))).await
}

/// Creates an anonymous donation.
pub async fn create_test_donation(
    db: &DatabaseConnection,
    amount: f64,
    on: NaiveDate,
) -> Result<donation::Model> {
    create_donation(db, NewDonation::new(amount, on)).await
}

/// Creates a donation linked to a member.
pub async fn create_member_donation(
    db: &DatabaseConnection,
    member_id: i64,
    amount: f64,
    on: NaiveDate,
) -> Result<donation::Model> {
    let mut form = NewDonation::new(amount, on);
    form.member_id = Some(member_id);
    create_donation(db, form).await
}

/// Creates an untyped event.
pub async fn create_test_event(
    db: &DatabaseConnection,
    title: &str,
    on: NaiveDate,
) -> Result<event::Model> {
    create_event(db, NewEvent::new(title, on)).await
}

/// Creates an event with an `event_type`.
pub async fn create_typed_event(
    db: &DatabaseConnection,
    title: &str,
    on: NaiveDate,
    event_type: &str,
) -> Result<event::Model> {
    let mut form = NewEvent::new(title, on);
    form.event_type = Some(event_type.to_string());
    create_event(db, form).await
}

/// Creates an expense, optionally categorized.
pub async fn create_test_expense(
    db: &DatabaseConnection,
    amount: f64,
    on: NaiveDate,
    category_id: Option<&str>,
) -> Result<expense::Model> {
    create_expense(
        db,
        NewExpense {
            amount,
            expense_date: on,
            category_id: category_id.map(str::to_string),
            description: None,
            member_id: None,
        },
    )
    .await
}

/// Creates an income row, optionally categorized.
pub async fn create_test_income(
    db: &DatabaseConnection,
    amount: f64,
    on: NaiveDate,
    category_id: Option<&str>,
) -> Result<income::Model> {
    create_income(
        db,
        NewIncome {
            amount,
            income_date: on,
            category_id: category_id.map(str::to_string),
            description: None,
            donation_id: None,
        },
    )
    .await
}

/// Anonymous donation row that never touched a database.
pub fn fake_donation(id: i64, amount: f64, on: NaiveDate) -> donation::Model {
    donation::Model {
        id,
        amount,
        member_id: None,
        donor_name: None,
        donor_email: None,
        donation_date: on,
        donation_type: None,
        payment_method: None,
        notes: None,
    }
}

/// Uncategorized income row not linked to a donation.
pub fn fake_income(id: i64, amount: f64, on: NaiveDate) -> income::Model {
    income::Model {
        id,
        amount,
        income_date: on,
        category_id: None,
        description: None,
        donation_id: None,
    }
}

/// Uncategorized expense row.
pub fn fake_expense(id: i64, amount: f64, on: NaiveDate) -> expense::Model {
    expense::Model {
        id,
        amount,
        expense_date: on,
        category_id: None,
        description: None,
        member_id: None,
    }
}

/// Event row.
pub fn fake_event(id: i64, title: &str, on: NaiveDate, event_type: Option<&str>) -> event::Model {
    event::Model {
        id,
        title: title.to_string(),
        event_date: on,
        event_type: event_type.map(str::to_string),
        location: None,
        capacity: None,
        description: None,
    }
}

/// Member row named `Member <id>`.
pub fn fake_member(
    id: i64,
    join_date: NaiveDate,
    gender: Option<Gender>,
    status: MemberStatus,
) -> member::Model {
    member::Model {
        id,
        first_name: "Member".to_string(),
        last_name: id.to_string(),
        email: None,
        phone: None,
        gender,
        marital_status: None,
        ministry: None,
        department: None,
        group_name: None,
        join_date,
        status,
    }
}

/// In-memory repository. Sources are named `donations`, `recent_donations`,
/// `income`, `expenses`, `income_categories`, `expense_categories`, `events`,
/// `attendance` and `members`.
#[derive(Debug, Default)]
pub struct FakeRepository {
    /// Donation rows
    pub donations: Vec<donation::Model>,
    /// Non-donation income rows
    pub income: Vec<income::Model>,
    /// Expense rows
    pub expenses: Vec<expense::Model>,
    /// Income category table
    pub income_categories: Vec<income_category::Model>,
    /// Expense category table
    pub expense_categories: Vec<expense_category::Model>,
    /// Event rows
    pub events: Vec<event::Model>,
    /// Attendance rows
    pub attendance: Vec<attendance::Model>,
    /// Member rows
    pub members: Vec<member::Model>,
    failures: HashMap<&'static str, ErrorKind>,
}

impl FakeRepository {
    /// Makes every read of `source` fail with an error of the given kind.
    pub fn fail(&mut self, source: &'static str, kind: ErrorKind) {
        self.failures.insert(source, kind);
    }

    fn rows<T: Clone>(&self, source: &'static str, rows: &[T]) -> Result<Vec<T>> {
        match self.failures.get(source) {
            Some(kind) => Err(error_of_kind(source, *kind)),
            None => Ok(rows.to_vec()),
        }
    }
}

fn error_of_kind(source: &'static str, kind: ErrorKind) -> Error {
    match kind {
        ErrorKind::Network => Error::Database(DbErr::Conn(RuntimeErr::Internal(format!(
            "{source}: connection refused"
        )))),
        ErrorKind::NotFound => Error::not_found("table", source),
        ErrorKind::Unauthorized => Error::Unauthorized {
            message: format!("reading {source} violates row-level policy"),
        },
        ErrorKind::Validation => Error::validation("source", source),
        ErrorKind::Unknown => Error::Config {
            message: format!("{source} failed"),
        },
    }
}

fn within(on: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= on && on <= end
}

#[async_trait]
impl DonationRepository for FakeRepository {
    async fn donations_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<donation::Model>> {
        let mut rows = self.rows("donations", &self.donations)?;
        rows.retain(|row| within(row.donation_date, start, end));
        Ok(rows)
    }

    async fn recent_donations(&self, limit: u64) -> Result<Vec<donation::Model>> {
        let mut rows = self.rows("recent_donations", &self.donations)?;
        rows.sort_by(|a, b| b.donation_date.cmp(&a.donation_date).then(b.id.cmp(&a.id)));
        rows.truncate(usize::try_from(limit)?);
        Ok(rows)
    }
}

#[async_trait]
impl IncomeRepository for FakeRepository {
    async fn income_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<income::Model>> {
        let mut rows = self.rows("income", &self.income)?;
        rows.retain(|row| within(row.income_date, start, end));
        Ok(rows)
    }
}

#[async_trait]
impl ExpenseRepository for FakeRepository {
    async fn expenses_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<expense::Model>> {
        let mut rows = self.rows("expenses", &self.expenses)?;
        rows.retain(|row| within(row.expense_date, start, end));
        Ok(rows)
    }
}

#[async_trait]
impl CategoryRepository for FakeRepository {
    async fn income_categories(&self) -> Result<Vec<income_category::Model>> {
        self.rows("income_categories", &self.income_categories)
    }

    async fn expense_categories(&self) -> Result<Vec<expense_category::Model>> {
        self.rows("expense_categories", &self.expense_categories)
    }
}

#[async_trait]
impl EventRepository for FakeRepository {
    async fn events_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<event::Model>> {
        let mut rows = self.rows("events", &self.events)?;
        rows.retain(|row| within(row.event_date, start, end));
        Ok(rows)
    }

    async fn upcoming_events(&self, today: NaiveDate, limit: u64) -> Result<Vec<event::Model>> {
        let mut rows = self.rows("events", &self.events)?;
        rows.retain(|row| row.event_date >= today);
        rows.sort_by(|a, b| a.event_date.cmp(&b.event_date).then(a.id.cmp(&b.id)));
        rows.truncate(usize::try_from(limit)?);
        Ok(rows)
    }
}

#[async_trait]
impl AttendanceRepository for FakeRepository {
    async fn attendance_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<attendance::Model>> {
        let mut rows = self.rows("attendance", &self.attendance)?;
        rows.retain(|row| within(row.attendance_date, start, end));
        Ok(rows)
    }
}

#[async_trait]
impl MemberRepository for FakeRepository {
    async fn all_members(&self) -> Result<Vec<member::Model>> {
        self.rows("members", &self.members)
    }
}
