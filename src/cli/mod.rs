//! Command-line definitions and dispatch.
//!
//! Each subcommand runs against one database connection and either prints a
//! human-readable rendering or, with `--json`, the serialized report.

pub mod provision;
pub mod report;
pub mod watch;

use crate::{
    analytics::{
        dashboard::dashboard, events::event_report, financial::financial_report,
        growth::growth_report, period::ReportWindow,
    },
    config::settings::{Settings, load_settings},
    core::{
        donation::{donor_label, get_donation_by_id, list_donations_for_member},
        member::get_member_by_id,
        receipt::{annual_statement, receipt_number, render_donation_receipt, render_statement},
    },
    errors::{Error, Result},
    repository::SeaOrmRepository,
};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Congregation records and reports.
#[derive(Parser, Debug)]
#[command(name = "church-ledger", version, about)]
pub struct Cli {
    /// Database URL; overrides `DATABASE_URL`
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Settings file
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Probe every table and report which are missing
    CheckSchema,
    /// Create all tables that do not exist yet
    Migrate,
    /// Insert configured categories and optional sample data
    Seed(SeedArgs),
    /// Income vs expenses, category breakdowns and top donors
    Financial(WindowArgs),
    /// Event counts, types and attendance
    Events(WindowArgs),
    /// Membership growth and breakdowns
    Growth(WindowArgs),
    /// Headcounts, upcoming events and recent giving
    Dashboard(DashboardArgs),
    /// Print the receipt for one donation
    Receipt {
        /// Donation id
        donation_id: i64,
    },
    /// Print a member's giving statement for a year
    Statement {
        /// Member id
        member_id: i64,
        /// Calendar year
        year: i32,
    },
}

/// Options for `seed`.
#[derive(Args, Debug, Clone, Copy)]
pub struct SeedArgs {
    /// Also insert sample members, donations and events when the tables are empty
    #[arg(long)]
    pub sample: bool,
}

/// Options for `dashboard`.
#[derive(Args, Debug, Clone, Copy)]
pub struct DashboardArgs {
    /// Reporting window
    #[command(flatten)]
    pub window: WindowArgs,

    /// Recompute and print the dashboard every SECONDS until Ctrl-C
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub watch: Option<u64>,
}

/// Reporting window options.
#[derive(Args, Debug, Clone, Copy)]
pub struct WindowArgs {
    /// Whole months to look back before the current month
    #[arg(short, long)]
    pub months: Option<u32>,

    /// Last day covered (defaults to today)
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

impl WindowArgs {
    /// Resolves the window, taking the month count from settings when not given.
    pub fn window(self, settings: &Settings) -> Result<ReportWindow> {
        let months = self.months.unwrap_or(settings.reports.default_window_months);
        let end = self.end.unwrap_or_else(|| Utc::now().date_naive());
        ReportWindow::new(end, months)
    }
}

impl Cli {
    /// Parses arguments from the process command line.
    #[must_use]
    pub fn init() -> Self {
        Self::parse()
    }

    /// Settings from `--config`, or defaults when that file does not exist.
    pub fn settings(&self) -> Result<Settings> {
        if self.config.exists() {
            load_settings(&self.config)
        } else {
            debug!(path = %self.config.display(), "settings file not found, using defaults");
            Ok(Settings::default())
        }
    }

    /// Runs the selected subcommand.
    pub async fn run(self, db: &DatabaseConnection) -> Result<()> {
        let settings = self.settings()?;
        let json = self.json;
        let symbol = settings.church.currency_symbol.as_str();

        match self.command {
            Command::CheckSchema => provision::check(db, json).await,
            Command::Migrate => provision::migrate(db).await,
            Command::Seed(args) => provision::seed(db, &settings, args.sample).await,
            Command::Financial(args) => {
                let repo = SeaOrmRepository::new(db.clone());
                let financial = financial_report(&repo, &args.window(&settings)?).await;
                emit(json, &financial, || report::render_financial(&financial, symbol))
            }
            Command::Events(args) => {
                let repo = SeaOrmRepository::new(db.clone());
                let events = event_report(&repo, &args.window(&settings)?).await;
                emit(json, &events, || report::render_events(&events))
            }
            Command::Growth(args) => {
                let repo = SeaOrmRepository::new(db.clone());
                let growth = growth_report(&repo, &args.window(&settings)?).await;
                emit(json, &growth, || report::render_growth(&growth))
            }
            Command::Dashboard(args) => {
                let repo = SeaOrmRepository::new(db.clone());
                if let Some(seconds) = args.watch {
                    let every = Duration::from_secs(seconds);
                    return watch::watch_dashboard(repo, args.window, settings.clone(), json, every).await;
                }
                let board = dashboard(&repo, &args.window.window(&settings)?).await;
                emit(json, &board, || report::render_dashboard(&board, symbol))
            }
            Command::Receipt { donation_id } => {
                let donation = get_donation_by_id(db, donation_id)
                    .await?
                    .ok_or_else(|| Error::not_found("donation", donation_id))?;
                let member = match donation.member_id {
                    Some(member_id) => get_member_by_id(db, member_id).await?,
                    None => None,
                };
                let donor = donor_label(&donation, member.as_ref());
                let payload = serde_json::json!({
                    "receipt_number": receipt_number(&donation),
                    "donor": donor,
                    "donation": donation,
                });
                emit(json, &payload, || {
                    render_donation_receipt(&settings.church, &donation, &donor)
                })
            }
            Command::Statement { member_id, year } => {
                let member = get_member_by_id(db, member_id)
                    .await?
                    .ok_or_else(|| Error::not_found("member", member_id))?;
                let donations = list_donations_for_member(db, member_id).await?;
                let statement = annual_statement(&member.full_name(), year, &donations);
                emit(json, &statement, || render_statement(&settings.church, &statement))
            }
        }
    }
}

/// Prints `value` as pretty JSON, or the text produced by `render`.
fn emit<T, F>(json: bool, value: &T, render: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", render());
    }
    Ok(())
}
