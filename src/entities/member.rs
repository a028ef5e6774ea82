//! Member entity - The identity record for everyone in the congregation.
//!
//! Members are never hard-deleted: leaving the church flips `status` to
//! `inactive`, keeping donation and attendance history resolvable.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Membership lifecycle state stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Regular, active member
    #[sea_orm(string_value = "active")]
    Active,
    /// Former member, kept for history
    #[sea_orm(string_value = "inactive")]
    Inactive,
    /// Visitor who registered but is not yet a member
    #[sea_orm(string_value = "visitor")]
    Visitor,
}

/// Self-reported gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male
    #[sea_orm(string_value = "male")]
    Male,
    /// Female
    #[sea_orm(string_value = "female")]
    Female,
}

/// Member database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    /// Unique identifier for the member
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Gender, if provided
    pub gender: Option<Gender>,
    /// Marital status (e.g. `"single"`, `"married"`)
    pub marital_status: Option<String>,
    /// Ministry the member serves in
    pub ministry: Option<String>,
    /// Department the member belongs to
    pub department: Option<String>,
    /// Fellowship group classification
    pub group_name: Option<String>,
    /// Date the member joined the church
    pub join_date: Date,
    /// Soft status field
    pub status: MemberStatus,
}

impl Model {
    /// Returns `"First Last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Defines relationships between Member and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A member may have many donations
    #[sea_orm(has_many = "super::donation::Entity")]
    Donations,
    /// A member has many attendance records
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
}

impl Related<super::donation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donations.def()
    }
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
