//! Donation entity - A gift recorded by an administrator.
//!
//! A donor is identified by `member_id`, `donor_name` or `donor_email`; none is
//! required to be unique. Donations are immutable once inserted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Donation database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "donations")]
pub struct Model {
    /// Unique identifier for the donation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Donated amount
    pub amount: f64,
    /// Linked member, when the donor is a registered member
    pub member_id: Option<i64>,
    /// Free-text donor name
    pub donor_name: Option<String>,
    /// Donor contact email
    pub donor_email: Option<String>,
    /// Date the gift was received
    pub donation_date: Date,
    /// Type of gift, e.g. `"tithe"`, `"offering"`, `"building_fund"`
    pub donation_type: Option<String>,
    /// How the gift was paid, e.g. `"cash"`, `"card"`
    pub payment_method: Option<String>,
    /// Administrator notes
    pub notes: Option<String>,
}

/// Defines relationships between Donation and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A donation optionally belongs to a member
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id",
        on_delete = "SetNull"
    )]
    Member,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
