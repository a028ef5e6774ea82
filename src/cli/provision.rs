//! Schema probing, table creation and seeding.

use crate::{
    config::{
        database::{check_schema, create_tables},
        settings::Settings,
    },
    core::{
        attendance::record_attendance,
        donation::{NewDonation, create_donation},
        event::{NewEvent, create_event},
        finance::{
            NewExpense, NewIncome, count_categories, create_expense, create_expense_category,
            create_income, create_income_category, list_expense_categories,
            list_income_categories,
        },
        member::{NewMember, create_member},
    },
    entities::{
        Member,
        member::{Gender, MemberStatus},
    },
    errors::{Error, Result},
};
use chrono::{Datelike, Days, Months, NaiveDate, Utc};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde::Serialize;
use tracing::{info, warn};

/// Prints the presence of every table. Fails when any table is missing.
pub async fn check(db: &DatabaseConnection, json: bool) -> Result<()> {
    let statuses = check_schema(db).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
    } else {
        for status in &statuses {
            let mark = if status.present { "ok" } else { "MISSING" };
            println!("{:<22} {mark}", status.table);
        }
    }

    let missing: Vec<&str> = statuses
        .iter()
        .filter(|status| !status.present)
        .map(|status| status.table)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        warn!(?missing, "schema incomplete");
        Err(Error::not_found("table", missing.join(", ")))
    }
}

/// Creates every table that does not exist yet.
pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
    create_tables(db).await?;
    println!("All tables are in place.");
    Ok(())
}

/// Rows inserted by [`seed_database`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    /// Income categories created
    pub income_categories: usize,
    /// Expense categories created
    pub expense_categories: usize,
    /// Sample members created
    pub members: usize,
    /// Sample donations created
    pub donations: usize,
    /// Sample events created
    pub events: usize,
}

/// Prints what [`seed_database`] inserted.
pub async fn seed(db: &DatabaseConnection, settings: &Settings, sample: bool) -> Result<()> {
    let summary = seed_database(db, settings, sample, Utc::now().date_naive()).await?;
    println!(
        "Seeded {} income categories, {} expense categories.",
        summary.income_categories, summary.expense_categories
    );
    if sample {
        println!(
            "Sample data: {} members, {} donations, {} events.",
            summary.members, summary.donations, summary.events
        );
    }
    Ok(())
}

/// Inserts configured categories into empty category tables and, when `sample`
/// is set and there are no members yet, a small congregation dated around `today`.
pub async fn seed_database(
    db: &DatabaseConnection,
    settings: &Settings,
    sample: bool,
    today: NaiveDate,
) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();
    let (income_count, expense_count) = count_categories(db).await?;

    if income_count == 0 {
        for category in &settings.income_categories {
            create_income_category(db, &category.name, category.description.clone()).await?;
            summary.income_categories += 1;
        }
    } else {
        info!(existing = income_count, "income categories present, skipping");
    }

    if expense_count == 0 {
        for category in &settings.expense_categories {
            create_expense_category(db, &category.name, category.description.clone()).await?;
            summary.expense_categories += 1;
        }
    } else {
        info!(existing = expense_count, "expense categories present, skipping");
    }

    if sample {
        if Member::find().count(db).await? == 0 {
            seed_sample_data(db, today, &mut summary).await?;
        } else {
            warn!("members already exist, not inserting sample data");
        }
    }

    info!(?summary, "seeding finished");
    Ok(summary)
}

fn months_ago(today: NaiveDate, months: u32, day: u32) -> NaiveDate {
    today
        .with_day(1)
        .and_then(|first| first.checked_sub_months(Months::new(months)))
        .and_then(|first| first.with_day(day))
        .unwrap_or(today)
}

async fn seed_sample_data(
    db: &DatabaseConnection,
    today: NaiveDate,
    summary: &mut SeedSummary,
) -> Result<()> {
    let people = [
        ("Lydia", "Thyatira", Some(Gender::Female), MemberStatus::Active, 14),
        ("Silas", "Macedon", Some(Gender::Male), MemberStatus::Active, 5),
        ("Priscilla", "Corinth", Some(Gender::Female), MemberStatus::Active, 2),
        ("Apollos", "Alexandria", None, MemberStatus::Visitor, 0),
    ];

    let mut members = Vec::with_capacity(people.len());
    for (first, last, gender, status, joined_months_ago) in people {
        let mut form = NewMember::new(first, last, months_ago(today, joined_months_ago, 1));
        form.gender = gender;
        form.status = status;
        members.push(create_member(db, form).await?);
    }
    summary.members = members.len();

    let mut service = NewEvent::new("Sunday Service", months_ago(today, 1, 7));
    service.event_type = Some("service".to_string());
    let service = create_event(db, service).await?;

    let mut study = NewEvent::new("Bible Study", months_ago(today, 0, 1));
    study.event_type = Some("bible_study".to_string());
    let study = create_event(db, study).await?;

    let mut picnic = NewEvent::new("Church Picnic", today + Days::new(14));
    picnic.event_type = Some("fellowship".to_string());
    create_event(db, picnic).await?;
    summary.events = 3;

    for member in &members {
        record_attendance(db, member.id, service.event_date, true, Some(service.id)).await?;
    }
    record_attendance(db, members[0].id, study.event_date, true, Some(study.id)).await?;
    record_attendance(db, members[1].id, study.event_date, false, Some(study.id)).await?;

    let gifts = [
        (Some(members[0].id), None, 250.0, months_ago(today, 2, 3)),
        (Some(members[1].id), None, 120.0, months_ago(today, 1, 10)),
        (None, Some("Visiting family"), 40.0, months_ago(today, 1, 17)),
        (Some(members[2].id), None, 75.5, months_ago(today, 0, 1)),
    ];
    for (member_id, donor_name, amount, on) in gifts {
        let mut form = NewDonation::new(amount, on);
        form.member_id = member_id;
        form.donor_name = donor_name.map(str::to_string);
        form.donation_type = Some("tithe".to_string());
        form.payment_method = Some("bank_transfer".to_string());
        create_donation(db, form).await?;
        summary.donations += 1;
    }

    let income_category = list_income_categories(db).await?.into_iter().next();
    create_income(
        db,
        NewIncome {
            amount: 300.0,
            income_date: months_ago(today, 1, 20),
            category_id: income_category.map(|c| c.id),
            description: Some("Hall rental".to_string()),
            donation_id: None,
        },
    )
    .await?;

    let expense_category = list_expense_categories(db).await?.into_iter().next();
    create_expense(
        db,
        NewExpense {
            amount: 180.0,
            expense_date: months_ago(today, 1, 12),
            category_id: expense_category.map(|c| c.id),
            description: Some("Electricity".to_string()),
            member_id: None,
        },
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        analytics::{financial::financial_report, period::ReportWindow},
        config::settings::parse_settings,
        repository::SeaOrmRepository,
        test_utils::*,
    };

    const SETTINGS: &str = r#"
        [[income_categories]]
        name = "Rentals"

        [[expense_categories]]
        name = "Utilities"
        description = "Power and water"

        [[expense_categories]]
        name = "Outreach"
    "#;

    #[tokio::test]
    async fn test_seed_categories_once() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = parse_settings(SETTINGS)?;

        let first = seed_database(&db, &settings, false, date(2024, 5, 20)).await?;
        assert_eq!(first.income_categories, 1);
        assert_eq!(first.expense_categories, 2);
        assert_eq!(first.members, 0);

        let second = seed_database(&db, &settings, false, date(2024, 5, 20)).await?;
        assert_eq!(second, SeedSummary::default());
        assert_eq!(count_categories(&db).await?, (1, 2));
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_sample_data_feeds_reports() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = parse_settings(SETTINGS)?;
        let today = date(2024, 5, 20);

        let summary = seed_database(&db, &settings, true, today).await?;
        assert_eq!(summary.members, 4);
        assert_eq!(summary.donations, 4);
        assert_eq!(summary.events, 3);

        let repo = SeaOrmRepository::new(db.clone());
        let window = ReportWindow::new(today, 2)?;
        let report = financial_report(&repo, &window).await;
        assert!(report.issues.is_empty());
        assert_eq!(report.monthly.len(), 3);
        assert_eq!(report.summary.total_income, 785.5);
        assert_eq!(report.summary.total_expenses, 180.0);
        assert_eq!(report.summary.largest_expense_category, "Outreach");

        let again = seed_database(&db, &settings, true, today).await?;
        assert_eq!(again.members, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_check_fails_on_empty_database() -> Result<()> {
        let db = sea_orm::Database::connect("sqlite::memory:").await?;
        let err = check(&db, true).await.unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::NotFound);

        migrate(&db).await?;
        check(&db, false).await
    }
}
