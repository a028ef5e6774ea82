//! Small group entity - Home groups, bible studies and similar.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Small group database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "small_groups")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Group name
    pub name: String,
    /// Member leading the group
    pub leader_member_id: Option<i64>,
    /// Day the group meets, e.g. `"Wednesday"`
    pub meeting_day: Option<String>,
    /// Where the group meets
    pub location: Option<String>,
    /// Description
    pub description: Option<String>,
}

/// Defines relationships between SmallGroup and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One group has many membership rows
    #[sea_orm(has_many = "super::small_group_member::Entity")]
    Memberships,
}

impl Related<super::small_group_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
