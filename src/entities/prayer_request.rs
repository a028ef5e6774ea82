//! Prayer request entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether a request is still being prayed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum PrayerStatus {
    /// Still open
    #[sea_orm(string_value = "open")]
    Open,
    /// Marked as answered
    #[sea_orm(string_value = "answered")]
    Answered,
}

/// Prayer request database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prayer_requests")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of whoever asked
    pub requester: String,
    /// The request itself
    pub request: String,
    /// Hidden from the public prayer wall
    pub is_private: bool,
    /// Current status
    pub status: PrayerStatus,
    /// When the request was submitted
    pub created_at: DateTimeUtc,
}

/// `PrayerRequest` has no foreign-key relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
