//! Small groups and their membership lists.

use crate::{
    core::{optional_text, require_text},
    entities::{Member, SmallGroup, SmallGroupMember, member, small_group, small_group_member},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Form data for a small group.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSmallGroup {
    /// Group name
    pub name: String,
    /// Leader
    #[serde(default)]
    pub leader_member_id: Option<i64>,
    /// Meeting day
    #[serde(default)]
    pub meeting_day: Option<String>,
    /// Meeting place
    #[serde(default)]
    pub location: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
}

impl NewSmallGroup {
    /// Group with only a name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            leader_member_id: None,
            meeting_day: None,
            location: None,
            description: None,
        }
    }

    fn into_active_model(
        self,
        mut model: small_group::ActiveModel,
    ) -> Result<small_group::ActiveModel> {
        model.name = Set(require_text("name", &self.name)?);
        model.leader_member_id = Set(self.leader_member_id);
        model.meeting_day = Set(optional_text(self.meeting_day));
        model.location = Set(optional_text(self.location));
        model.description = Set(optional_text(self.description));
        Ok(model)
    }
}

/// Creates a group.
pub async fn create_group(
    db: &DatabaseConnection,
    form: NewSmallGroup,
) -> Result<small_group::Model> {
    form.into_active_model(<small_group::ActiveModel as Default>::default())?
        .insert(db)
        .await
        .map_err(Into::into)
}

/// Edits a group.
pub async fn update_group(
    db: &DatabaseConnection,
    group_id: i64,
    form: NewSmallGroup,
) -> Result<small_group::Model> {
    let existing = SmallGroup::find_by_id(group_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("small group", group_id))?;

    form.into_active_model(existing.into())?
        .update(db)
        .await
        .map_err(Into::into)
}

/// Deletes a group and its membership rows.
pub async fn delete_group(db: &DatabaseConnection, group_id: i64) -> Result<()> {
    SmallGroupMember::delete_many()
        .filter(small_group_member::Column::GroupId.eq(group_id))
        .exec(db)
        .await?;

    let result = SmallGroup::delete_by_id(group_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("small group", group_id));
    }
    Ok(())
}

/// Groups ordered by name.
pub async fn list_groups(db: &DatabaseConnection) -> Result<Vec<small_group::Model>> {
    SmallGroup::find()
        .order_by_asc(small_group::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds a member to a group. Adding the same member twice is rejected.
pub async fn add_group_member(
    db: &DatabaseConnection,
    group_id: i64,
    member_id: i64,
    joined_at: NaiveDate,
) -> Result<small_group_member::Model> {
    SmallGroup::find_by_id(group_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("small group", group_id))?;
    Member::find_by_id(member_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("member", member_id))?;

    let already = SmallGroupMember::find()
        .filter(small_group_member::Column::GroupId.eq(group_id))
        .filter(small_group_member::Column::MemberId.eq(member_id))
        .one(db)
        .await?;
    if already.is_some() {
        return Err(Error::validation(
            "member_id",
            format!("member {member_id} is already in group {group_id}"),
        ));
    }

    let model = small_group_member::ActiveModel {
        group_id: Set(group_id),
        member_id: Set(member_id),
        joined_at: Set(joined_at),
        ..Default::default()
    };
    let created = model.insert(db).await?;
    info!(group_id, member_id, "member added to small group");
    Ok(created)
}

/// Removes a member from a group.
pub async fn remove_group_member(
    db: &DatabaseConnection,
    group_id: i64,
    member_id: i64,
) -> Result<()> {
    let result = SmallGroupMember::delete_many()
        .filter(small_group_member::Column::GroupId.eq(group_id))
        .filter(small_group_member::Column::MemberId.eq(member_id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("group membership", format!("{group_id}/{member_id}")));
    }
    Ok(())
}

/// Members of a group, ordered by family name.
pub async fn list_group_members(
    db: &DatabaseConnection,
    group_id: i64,
) -> Result<Vec<member::Model>> {
    let member_ids: Vec<i64> = SmallGroupMember::find()
        .filter(small_group_member::Column::GroupId.eq(group_id))
        .all(db)
        .await?
        .into_iter()
        .map(|row| row.member_id)
        .collect();

    Member::find()
        .filter(member::Column::Id.is_in(member_ids))
        .order_by_asc(member::Column::LastName)
        .order_by_asc(member::Column::FirstName)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_group_membership() -> Result<()> {
        let db = setup_test_db().await?;
        let leader = create_test_member(&db, "Stephen", "Deacon").await?;
        let philip = create_test_member(&db, "Philip", "Evangelist").await?;

        let mut form = NewSmallGroup::new("Tuesday Fellowship");
        form.leader_member_id = Some(leader.id);
        form.meeting_day = Some("Tuesday".to_string());
        let group = create_group(&db, form).await?;

        add_group_member(&db, group.id, leader.id, date(2024, 1, 9)).await?;
        add_group_member(&db, group.id, philip.id, date(2024, 1, 16)).await?;

        let members = list_group_members(&db, group.id).await?;
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].last_name, "Deacon");

        let duplicate = add_group_member(&db, group.id, philip.id, date(2024, 2, 1)).await;
        assert!(matches!(duplicate, Err(Error::Validation { field: "member_id", .. })));

        remove_group_member(&db, group.id, philip.id).await?;
        assert_eq!(list_group_members(&db, group.id).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_group_crud() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Lois", "Grandmother").await?;
        let group = create_group(&db, NewSmallGroup::new("Youth")).await?;
        create_group(&db, NewSmallGroup::new("Elders")).await?;
        add_group_member(&db, group.id, member.id, date(2024, 1, 1)).await?;

        let renamed = update_group(&db, group.id, NewSmallGroup::new("Young Adults")).await?;
        assert_eq!(renamed.name, "Young Adults");

        let names: Vec<String> = list_groups(&db).await?.into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Elders", "Young Adults"]);

        delete_group(&db, group.id).await?;
        assert_eq!(list_groups(&db).await?.len(), 1);
        assert!(matches!(
            remove_group_member(&db, group.id, member.id).await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }
}
