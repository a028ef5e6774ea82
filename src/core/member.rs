//! Member business logic - registration, edits and soft status changes.
//!
//! Members are created through the admin form or self-registration and are never
//! hard-deleted; deactivating a member sets `status = inactive` so donations and
//! attendance keep pointing at a real row.

use crate::{
    core::{optional_text, require_text},
    entities::{
        Member,
        member::{self, Gender, MemberStatus},
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{Condition, PaginatorTrait, QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Form data for creating or editing a member.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMember {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Gender
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Marital status
    #[serde(default)]
    pub marital_status: Option<String>,
    /// Ministry
    #[serde(default)]
    pub ministry: Option<String>,
    /// Department
    #[serde(default)]
    pub department: Option<String>,
    /// Fellowship group
    #[serde(default)]
    pub group_name: Option<String>,
    /// Date joined
    pub join_date: NaiveDate,
    /// Initial status
    #[serde(default = "default_status")]
    pub status: MemberStatus,
}

const fn default_status() -> MemberStatus {
    MemberStatus::Active
}

impl NewMember {
    /// Minimal member with every optional field unset.
    #[must_use]
    pub fn new(first_name: &str, last_name: &str, join_date: NaiveDate) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: None,
            phone: None,
            gender: None,
            marital_status: None,
            ministry: None,
            department: None,
            group_name: None,
            join_date,
            status: MemberStatus::Active,
        }
    }

    fn validate(&self) -> Result<()> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        if let Some(email) = self.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            if !email.contains('@') {
                return Err(Error::validation("email", format!("'{email}' is not an email address")));
            }
        }
        Ok(())
    }

    fn apply(self, model: &mut member::ActiveModel) -> Result<()> {
        model.first_name = Set(require_text("first_name", &self.first_name)?);
        model.last_name = Set(require_text("last_name", &self.last_name)?);
        model.email = Set(optional_text(self.email));
        model.phone = Set(optional_text(self.phone));
        model.gender = Set(self.gender);
        model.marital_status = Set(optional_text(self.marital_status));
        model.ministry = Set(optional_text(self.ministry));
        model.department = Set(optional_text(self.department));
        model.group_name = Set(optional_text(self.group_name));
        model.join_date = Set(self.join_date);
        model.status = Set(self.status);
        Ok(())
    }
}

/// Creates a new member after validating the required fields.
pub async fn create_member(db: &DatabaseConnection, form: NewMember) -> Result<member::Model> {
    form.validate()?;

    let mut model = <member::ActiveModel as Default>::default();
    form.apply(&mut model)?;

    let created = model.insert(db).await?;
    info!(member_id = created.id, "member created");
    Ok(created)
}

/// Overwrites an existing member with the edit form contents.
pub async fn update_member(
    db: &DatabaseConnection,
    member_id: i64,
    form: NewMember,
) -> Result<member::Model> {
    form.validate()?;

    let existing = get_member_by_id(db, member_id)
        .await?
        .ok_or_else(|| Error::not_found("member", member_id))?;

    let mut model: member::ActiveModel = existing.into();
    form.apply(&mut model)?;
    model.update(db).await.map_err(Into::into)
}

/// Finds a member by primary key.
pub async fn get_member_by_id(
    db: &DatabaseConnection,
    member_id: i64,
) -> Result<Option<member::Model>> {
    Member::find_by_id(member_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists members ordered by family then given name, optionally filtered by status.
pub async fn list_members(
    db: &DatabaseConnection,
    status: Option<MemberStatus>,
) -> Result<Vec<member::Model>> {
    let mut query = Member::find();
    if let Some(status) = status {
        query = query.filter(member::Column::Status.eq(status));
    }
    query
        .order_by_asc(member::Column::LastName)
        .order_by_asc(member::Column::FirstName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Case-insensitive search across first name, last name and email.
pub async fn search_members(db: &DatabaseConnection, term: &str) -> Result<Vec<member::Model>> {
    let term = term.trim();
    if term.is_empty() {
        return list_members(db, None).await;
    }

    Member::find()
        .filter(
            Condition::any()
                .add(member::Column::FirstName.contains(term))
                .add(member::Column::LastName.contains(term))
                .add(member::Column::Email.contains(term)),
        )
        .order_by_asc(member::Column::LastName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Changes a member's soft status. This is the only "delete" members have.
pub async fn set_member_status(
    db: &DatabaseConnection,
    member_id: i64,
    status: MemberStatus,
) -> Result<member::Model> {
    let existing = get_member_by_id(db, member_id)
        .await?
        .ok_or_else(|| Error::not_found("member", member_id))?;

    let mut model: member::ActiveModel = existing.into();
    model.status = Set(status);
    let updated = model.update(db).await?;
    info!(member_id, status = ?status, "member status changed");
    Ok(updated)
}

/// Counts members with the given status.
pub async fn count_members_by_status(db: &DatabaseConnection, status: MemberStatus) -> Result<u64> {
    Member::find()
        .filter(member::Column::Status.eq(status))
        .count(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_member_trims_and_defaults() -> Result<()> {
        let db = setup_test_db().await?;

        let mut form = NewMember::new("  Ruth ", "Boaz", date(2023, 4, 2));
        form.email = Some("  ".to_string());
        let created = create_member(&db, form).await?;

        assert_eq!(created.first_name, "Ruth");
        assert_eq!(created.email, None);
        assert_eq!(created.status, MemberStatus::Active);
        assert_eq!(created.full_name(), "Ruth Boaz");
        Ok(())
    }

    #[tokio::test]
    async fn test_create_member_requires_names() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_member(&db, NewMember::new("", "Smith", date(2024, 1, 1))).await;
        assert!(matches!(
            result,
            Err(Error::Validation {
                field: "first_name",
                ..
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_member_rejects_bad_email() -> Result<()> {
        let db = setup_test_db().await?;

        let mut form = NewMember::new("Ann", "Lee", date(2024, 1, 1));
        form.email = Some("not-an-email".to_string());
        let result = create_member(&db, form).await;
        assert!(matches!(result, Err(Error::Validation { field: "email", .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_member() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Peter", "Rock").await?;

        let mut form = NewMember::new("Simon", "Peter", member.join_date);
        form.ministry = Some("Ushering".to_string());
        let updated = update_member(&db, member.id, form).await?;

        assert_eq!(updated.id, member.id);
        assert_eq!(updated.first_name, "Simon");
        assert_eq!(updated.ministry.as_deref(), Some("Ushering"));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_member() -> Result<()> {
        let db = setup_test_db().await?;
        let result = update_member(&db, 404, NewMember::new("A", "B", date(2024, 1, 1))).await;
        assert!(matches!(result, Err(Error::NotFound { entity: "member", .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_soft_delete_keeps_row() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_test_member(&db, "Demas", "Left").await?;

        set_member_status(&db, member.id, MemberStatus::Inactive).await?;

        let stored = get_member_by_id(&db, member.id).await?.unwrap();
        assert_eq!(stored.status, MemberStatus::Inactive);
        assert_eq!(count_members_by_status(&db, MemberStatus::Active).await?, 0);
        assert_eq!(count_members_by_status(&db, MemberStatus::Inactive).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_members_ordering_and_filter() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_member(&db, "Zed", "Adams").await?;
        create_test_member(&db, "Amy", "Brown").await?;
        let visitor = create_test_member(&db, "Al", "Adams").await?;
        set_member_status(&db, visitor.id, MemberStatus::Visitor).await?;

        let all = list_members(&db, None).await?;
        let names: Vec<String> = all.iter().map(member::Model::full_name).collect();
        assert_eq!(names, vec!["Al Adams", "Zed Adams", "Amy Brown"]);

        let visitors = list_members(&db, Some(MemberStatus::Visitor)).await?;
        assert_eq!(visitors.len(), 1);
        assert_eq!(visitors[0].id, visitor.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_search_members() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_member(&db, "Martha", "Bethany").await?;
        create_test_member(&db, "Mary", "Bethany").await?;
        create_test_member(&db, "Lazarus", "Tomb").await?;

        assert_eq!(search_members(&db, "Bethany").await?.len(), 2);
        assert_eq!(search_members(&db, "Laz").await?.len(), 1);
        assert_eq!(search_members(&db, " ").await?.len(), 3);
        Ok(())
    }
}
