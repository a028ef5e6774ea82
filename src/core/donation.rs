//! Donation business logic.
//!
//! Donations are entered by an administrator and never edited afterwards. A donor
//! can be identified three ways (linked member, free-text name, email); the
//! helpers here pick the best available label in that order.

use crate::{
    core::{optional_text, validate_amount},
    entities::{Donation, Member, donation, member},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Label used when a donation carries no identity at all.
pub const ANONYMOUS_DONOR: &str = "Anonymous";

/// Form data for recording a donation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDonation {
    /// Amount given, must be positive
    pub amount: f64,
    /// Linked member
    #[serde(default)]
    pub member_id: Option<i64>,
    /// Donor name for non-members
    #[serde(default)]
    pub donor_name: Option<String>,
    /// Donor email
    #[serde(default)]
    pub donor_email: Option<String>,
    /// Date received
    pub donation_date: NaiveDate,
    /// Gift type
    #[serde(default)]
    pub donation_type: Option<String>,
    /// Payment method
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewDonation {
    /// Anonymous donation with only the required fields set.
    #[must_use]
    pub const fn new(amount: f64, donation_date: NaiveDate) -> Self {
        Self {
            amount,
            member_id: None,
            donor_name: None,
            donor_email: None,
            donation_date,
            donation_type: None,
            payment_method: None,
            notes: None,
        }
    }
}

/// Records a donation. A linked member must exist.
pub async fn create_donation(
    db: &DatabaseConnection,
    form: NewDonation,
) -> Result<donation::Model> {
    validate_amount(form.amount)?;

    if let Some(member_id) = form.member_id {
        Member::find_by_id(member_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::not_found("member", member_id))?;
    }

    let model = donation::ActiveModel {
        amount: Set(form.amount),
        member_id: Set(form.member_id),
        donor_name: Set(optional_text(form.donor_name)),
        donor_email: Set(optional_text(form.donor_email)),
        donation_date: Set(form.donation_date),
        donation_type: Set(optional_text(form.donation_type)),
        payment_method: Set(optional_text(form.payment_method)),
        notes: Set(optional_text(form.notes)),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    info!(donation_id = created.id, amount = created.amount, "donation recorded");
    Ok(created)
}

/// Finds a donation by primary key.
pub async fn get_donation_by_id(
    db: &DatabaseConnection,
    donation_id: i64,
) -> Result<Option<donation::Model>> {
    Donation::find_by_id(donation_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Most recent donations first.
pub async fn list_recent_donations(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<donation::Model>> {
    Donation::find()
        .order_by_desc(donation::Column::DonationDate)
        .order_by_desc(donation::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// All donations linked to one member, newest first.
pub async fn list_donations_for_member(
    db: &DatabaseConnection,
    member_id: i64,
) -> Result<Vec<donation::Model>> {
    Donation::find()
        .filter(donation::Column::MemberId.eq(member_id))
        .order_by_desc(donation::Column::DonationDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Donations received within `[start, end]`, oldest first.
pub async fn list_donations_between(
    db: &DatabaseConnection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<donation::Model>> {
    Donation::find()
        .filter(donation::Column::DonationDate.between(start, end))
        .order_by_asc(donation::Column::DonationDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Picks the best label for a donor: linked member name, then donor name,
/// then donor email, then [`ANONYMOUS_DONOR`].
#[must_use]
pub fn donor_label(donation: &donation::Model, member: Option<&member::Model>) -> String {
    if let Some(member) = member.filter(|m| Some(m.id) == donation.member_id) {
        return member.full_name();
    }

    [donation.donor_name.as_deref(), donation.donor_email.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|label| !label.is_empty())
        .map_or_else(|| ANONYMOUS_DONOR.to_string(), ToString::to_string)
}
