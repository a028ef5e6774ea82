//! Sermon archive.

use crate::{
    core::{optional_text, require_text},
    entities::{Sermon, sermon},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;

/// Form data for a sermon.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSermon {
    /// Title
    pub title: String,
    /// Preacher
    pub preacher: String,
    /// Date preached
    pub sermon_date: NaiveDate,
    /// Scripture reference
    #[serde(default)]
    pub scripture: Option<String>,
    /// Public URL of an uploaded recording
    #[serde(default)]
    pub audio_url: Option<String>,
    /// Notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewSermon {
    fn into_active_model(self, mut model: sermon::ActiveModel) -> Result<sermon::ActiveModel> {
        model.title = Set(require_text("title", &self.title)?);
        model.preacher = Set(require_text("preacher", &self.preacher)?);
        model.sermon_date = Set(self.sermon_date);
        model.scripture = Set(optional_text(self.scripture));
        model.audio_url = Set(optional_text(self.audio_url));
        model.notes = Set(optional_text(self.notes));
        Ok(model)
    }
}

/// Adds a sermon to the archive.
pub async fn create_sermon(db: &DatabaseConnection, form: NewSermon) -> Result<sermon::Model> {
    form.into_active_model(<sermon::ActiveModel as Default>::default())?
        .insert(db)
        .await
        .map_err(Into::into)
}

/// Edits a sermon.
pub async fn update_sermon(
    db: &DatabaseConnection,
    sermon_id: i64,
    form: NewSermon,
) -> Result<sermon::Model> {
    let existing = Sermon::find_by_id(sermon_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("sermon", sermon_id))?;

    form.into_active_model(existing.into())?
        .update(db)
        .await
        .map_err(Into::into)
}

/// Removes a sermon.
pub async fn delete_sermon(db: &DatabaseConnection, sermon_id: i64) -> Result<()> {
    let result = Sermon::delete_by_id(sermon_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("sermon", sermon_id));
    }
    Ok(())
}

/// Sermons, most recent first.
pub async fn list_sermons(db: &DatabaseConnection) -> Result<Vec<sermon::Model>> {
    Sermon::find()
        .order_by_desc(sermon::Column::SermonDate)
        .all(db)
        .await
        .map_err(Into::into)
}
