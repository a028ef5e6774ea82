//! `SeaORM`-backed implementation of every repository trait.

use super::{
    AttendanceRepository, CategoryRepository, DonationRepository, EventRepository,
    ExpenseRepository, IncomeRepository, MemberRepository,
};
use crate::{
    core::{attendance as attendance_ops, donation as donation_ops, event as event_ops, finance, member as member_ops},
    entities::{
        attendance, donation, event, expense, expense_category, income, income_category, member,
    },
    errors::Result,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Repository over a live database connection.
#[derive(Debug, Clone)]
pub struct SeaOrmRepository {
    db: DatabaseConnection,
}

impl SeaOrmRepository {
    /// Wraps a connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DonationRepository for SeaOrmRepository {
    async fn donations_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<donation::Model>> {
        donation_ops::list_donations_between(&self.db, start, end).await
    }

    async fn recent_donations(&self, limit: u64) -> Result<Vec<donation::Model>> {
        donation_ops::list_recent_donations(&self.db, limit).await
    }
}

#[async_trait]
impl IncomeRepository for SeaOrmRepository {
    async fn income_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<income::Model>> {
        finance::list_income_between(&self.db, start, end).await
    }
}

#[async_trait]
impl ExpenseRepository for SeaOrmRepository {
    async fn expenses_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<expense::Model>> {
        finance::list_expenses_between(&self.db, start, end).await
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmRepository {
    async fn income_categories(&self) -> Result<Vec<income_category::Model>> {
        finance::list_income_categories(&self.db).await
    }

    async fn expense_categories(&self) -> Result<Vec<expense_category::Model>> {
        finance::list_expense_categories(&self.db).await
    }
}

#[async_trait]
impl EventRepository for SeaOrmRepository {
    async fn events_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<event::Model>> {
        event_ops::list_events_between(&self.db, start, end).await
    }

    async fn upcoming_events(&self, today: NaiveDate, limit: u64) -> Result<Vec<event::Model>> {
        event_ops::list_upcoming_events(&self.db, today, limit).await
    }
}

#[async_trait]
impl AttendanceRepository for SeaOrmRepository {
    async fn attendance_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<attendance::Model>> {
        attendance_ops::list_attendance_between(&self.db, start, end).await
    }
}

#[async_trait]
impl MemberRepository for SeaOrmRepository {
    async fn all_members(&self) -> Result<Vec<member::Model>> {
        member_ops::list_members(&self.db, None).await
    }
}
