//! Sermon entity - Preached messages with optional audio.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sermon database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sermons")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sermon title
    pub title: String,
    /// Who preached
    pub preacher: String,
    /// Date preached
    pub sermon_date: Date,
    /// Scripture reference, e.g. `"John 3:16"`
    pub scripture: Option<String>,
    /// Public URL of the recording
    pub audio_url: Option<String>,
    /// Notes or summary
    pub notes: Option<String>,
}

/// Sermon has no foreign-key relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
