//! Small group membership - Join table between groups and members.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Group membership database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "small_group_members")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The group
    pub group_id: i64,
    /// The member
    pub member_id: i64,
    /// Date the member joined the group
    pub joined_at: Date,
}

/// Defines relationships between memberships and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Membership belongs to a group
    #[sea_orm(
        belongs_to = "super::small_group::Entity",
        from = "Column::GroupId",
        to = "super::small_group::Column::Id",
        on_delete = "Cascade"
    )]
    SmallGroup,
    /// Membership belongs to a member
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Member,
}

impl Related<super::small_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SmallGroup.def()
    }
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
