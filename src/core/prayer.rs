//! Prayer requests.

use crate::{
    core::require_text,
    entities::{PrayerRequest, prayer_request::{self, PrayerStatus}},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Submits a prayer request.
pub async fn create_prayer_request(
    db: &DatabaseConnection,
    requester: &str,
    request: &str,
    is_private: bool,
) -> Result<prayer_request::Model> {
    let model = prayer_request::ActiveModel {
        requester: Set(require_text("requester", requester)?),
        request: Set(require_text("request", request)?),
        is_private: Set(is_private),
        status: Set(PrayerStatus::Open),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Lists requests newest first. Private requests are included only on request.
pub async fn list_prayer_requests(
    db: &DatabaseConnection,
    include_private: bool,
) -> Result<Vec<prayer_request::Model>> {
    let mut query = PrayerRequest::find();
    if !include_private {
        query = query.filter(prayer_request::Column::IsPrivate.eq(false));
    }
    query
        .order_by_desc(prayer_request::Column::CreatedAt)
        .order_by_desc(prayer_request::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks a request as answered.
pub async fn mark_answered(db: &DatabaseConnection, request_id: i64) -> Result<prayer_request::Model> {
    let existing = PrayerRequest::find_by_id(request_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("prayer request", request_id))?;

    let mut model: prayer_request::ActiveModel = existing.into();
    model.status = Set(PrayerStatus::Answered);
    model.update(db).await.map_err(Into::into)
}

/// Deletes a request.
pub async fn delete_prayer_request(db: &DatabaseConnection, request_id: i64) -> Result<()> {
    let result = PrayerRequest::delete_by_id(request_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("prayer request", request_id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_prayer_request_flow() -> Result<()> {
        let db = setup_test_db().await?;
        let public = create_prayer_request(&db, "Hannah", "For a child", false).await?;
        create_prayer_request(&db, "Anonymous", "Healing", true).await?;

        assert_eq!(list_prayer_requests(&db, false).await?.len(), 1);
        assert_eq!(list_prayer_requests(&db, true).await?.len(), 2);

        let answered = mark_answered(&db, public.id).await?;
        assert_eq!(answered.status, PrayerStatus::Answered);

        delete_prayer_request(&db, public.id).await?;
        assert!(list_prayer_requests(&db, false).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_prayer_request_validation() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(matches!(
            create_prayer_request(&db, "Eli", " ", false).await,
            Err(Error::Validation { field: "request", .. })
        ));
        assert!(matches!(
            mark_answered(&db, 3).await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }
}
