//! Event entity - Services, meetings and other scheduled gatherings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Event database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    /// Unique identifier for the event
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Event title
    pub title: String,
    /// Date the event takes place
    pub event_date: Date,
    /// Event type, e.g. `"service"`, `"bible_study"`
    pub event_type: Option<String>,
    /// Venue
    pub location: Option<String>,
    /// Maximum number of attendees, if limited
    pub capacity: Option<i32>,
    /// Longer description
    pub description: Option<String>,
}

/// Defines relationships between Event and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One event has many attendance records
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
