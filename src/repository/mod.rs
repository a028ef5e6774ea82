//! Capability interfaces over the backend tables.
//!
//! Reports depend on these traits rather than on a connection, so each report
//! states exactly which tables it reads and tests can substitute fakes.
//! [`SeaOrmRepository`] is the production implementation.

mod database;

pub use database::SeaOrmRepository;

use crate::{
    entities::{
        attendance, donation, event, expense, expense_category, income, income_category, member,
    },
    errors::Result,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Read access to donations.
#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Donations dated within `[start, end]`.
    async fn donations_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<donation::Model>>;

    /// The `limit` most recent donations.
    async fn recent_donations(&self, limit: u64) -> Result<Vec<donation::Model>>;
}

/// Read access to income rows.
#[async_trait]
pub trait IncomeRepository: Send + Sync {
    /// Income dated within `[start, end]`.
    async fn income_between(&self, start: NaiveDate, end: NaiveDate)
    -> Result<Vec<income::Model>>;
}

/// Read access to expense rows.
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Expenses dated within `[start, end]`.
    async fn expenses_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<expense::Model>>;
}

/// Read access to the category tables.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All income categories.
    async fn income_categories(&self) -> Result<Vec<income_category::Model>>;

    /// All expense categories.
    async fn expense_categories(&self) -> Result<Vec<expense_category::Model>>;
}

/// Read access to events.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Events dated within `[start, end]`.
    async fn events_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<event::Model>>;

    /// Up to `limit` events on or after `today`, soonest first.
    async fn upcoming_events(&self, today: NaiveDate, limit: u64) -> Result<Vec<event::Model>>;
}

/// Read access to attendance.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Attendance dated within `[start, end]`.
    async fn attendance_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<attendance::Model>>;
}

/// Read access to members.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Every member regardless of status.
    async fn all_members(&self) -> Result<Vec<member::Model>>;
}
