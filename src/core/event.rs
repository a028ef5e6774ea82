//! Event business logic - full create/edit/delete lifecycle.
//!
//! Deleting an event requires an explicit confirmation flag, mirroring the
//! confirmation dialog in the admin console.

use crate::{
    core::{optional_text, require_text},
    entities::{Event, event},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Form data for creating or editing an event.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    /// Title
    pub title: String,
    /// Date of the event
    pub event_date: NaiveDate,
    /// Event type
    #[serde(default)]
    pub event_type: Option<String>,
    /// Venue
    #[serde(default)]
    pub location: Option<String>,
    /// Capacity limit
    #[serde(default)]
    pub capacity: Option<i32>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
}

impl NewEvent {
    /// Event with only title and date set.
    #[must_use]
    pub fn new(title: &str, event_date: NaiveDate) -> Self {
        Self {
            title: title.to_string(),
            event_date,
            event_type: None,
            location: None,
            capacity: None,
            description: None,
        }
    }

    fn into_active_model(self, mut model: event::ActiveModel) -> Result<event::ActiveModel> {
        if let Some(capacity) = self.capacity {
            if capacity < 0 {
                return Err(Error::validation("capacity", "cannot be negative"));
            }
        }
        model.title = Set(require_text("title", &self.title)?);
        model.event_date = Set(self.event_date);
        model.event_type = Set(optional_text(self.event_type));
        model.location = Set(optional_text(self.location));
        model.capacity = Set(self.capacity);
        model.description = Set(optional_text(self.description));
        Ok(model)
    }
}

/// Creates an event.
pub async fn create_event(db: &DatabaseConnection, form: NewEvent) -> Result<event::Model> {
    let model = form.into_active_model(<event::ActiveModel as Default>::default())?;
    let created = model.insert(db).await?;
    info!(event_id = created.id, title = %created.title, "event created");
    Ok(created)
}

/// Replaces an event's fields with the edit form contents.
pub async fn update_event(
    db: &DatabaseConnection,
    event_id: i64,
    form: NewEvent,
) -> Result<event::Model> {
    let existing = get_event_by_id(db, event_id)
        .await?
        .ok_or_else(|| Error::not_found("event", event_id))?;

    let model = form.into_active_model(existing.into())?;
    model.update(db).await.map_err(Into::into)
}

/// Deletes an event. `confirmed` must be true; attendance rows keep their
/// history with the event link cleared.
pub async fn delete_event(db: &DatabaseConnection, event_id: i64, confirmed: bool) -> Result<()> {
    if !confirmed {
        return Err(Error::validation(
            "confirmed",
            "event deletion must be confirmed",
        ));
    }

    let result = Event::delete_by_id(event_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("event", event_id));
    }

    info!(event_id, "event deleted");
    Ok(())
}

/// Finds an event by primary key.
pub async fn get_event_by_id(
    db: &DatabaseConnection,
    event_id: i64,
) -> Result<Option<event::Model>> {
    Event::find_by_id(event_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Events on or after `today`, soonest first.
pub async fn list_upcoming_events(
    db: &DatabaseConnection,
    today: NaiveDate,
    limit: u64,
) -> Result<Vec<event::Model>> {
    Event::find()
        .filter(event::Column::EventDate.gte(today))
        .order_by_asc(event::Column::EventDate)
        .order_by_asc(event::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Events dated within `[start, end]`, oldest first.
pub async fn list_events_between(
    db: &DatabaseConnection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<event::Model>> {
    Event::find()
        .filter(event::Column::EventDate.between(start, end))
        .order_by_asc(event::Column::EventDate)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_event_lifecycle() -> Result<()> {
        let db = setup_test_db().await?;

        let mut form = NewEvent::new("Harvest Service", date(2024, 9, 8));
        form.event_type = Some("service".to_string());
        form.capacity = Some(200);
        let created = create_event(&db, form).await?;
        assert_eq!(created.title, "Harvest Service");

        let mut edit = NewEvent::new("Harvest Thanksgiving", date(2024, 9, 15));
        edit.location = Some("Main hall".to_string());
        let updated = update_event(&db, created.id, edit).await?;
        assert_eq!(updated.title, "Harvest Thanksgiving");
        assert_eq!(updated.capacity, None);
        assert_eq!(updated.location.as_deref(), Some("Main hall"));

        delete_event(&db, created.id, true).await?;
        assert!(get_event_by_id(&db, created.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() -> Result<()> {
        let db = setup_test_db().await?;
        let event = create_test_event(&db, "Choir practice", date(2024, 5, 1)).await?;

        let result = delete_event(&db, event.id, false).await;
        assert!(matches!(result, Err(Error::Validation { field: "confirmed", .. })));
        assert!(get_event_by_id(&db, event.id).await?.is_some());

        let missing = delete_event(&db, 9999, true).await;
        assert!(matches!(missing, Err(Error::NotFound { entity: "event", .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_event_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_event(&db, NewEvent::new("   ", date(2024, 5, 1))).await;
        assert!(matches!(result, Err(Error::Validation { field: "title", .. })));

        let mut form = NewEvent::new("Picnic", date(2024, 5, 1));
        form.capacity = Some(-3);
        let result = create_event(&db, form).await;
        assert!(matches!(result, Err(Error::Validation { field: "capacity", .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_upcoming_events() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_event(&db, "Past", date(2024, 1, 1)).await?;
        create_test_event(&db, "Later", date(2024, 3, 1)).await?;
        create_test_event(&db, "Today", date(2024, 2, 1)).await?;

        let upcoming = list_upcoming_events(&db, date(2024, 2, 1), 5).await?;
        let titles: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Today", "Later"]);

        let window = list_events_between(&db, date(2024, 1, 1), date(2024, 2, 1)).await?;
        assert_eq!(window.len(), 2);
        Ok(())
    }
}
