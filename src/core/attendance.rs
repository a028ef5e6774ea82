//! Attendance business logic.
//!
//! One row per member, date and (optional) event. Recording the same combination
//! again updates the presence flag instead of inserting a duplicate.

use crate::{
    entities::{Attendance, Event, Member, attendance},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use tracing::debug;

/// Marks a member present or absent for a date, optionally tied to an event.
pub async fn record_attendance(
    db: &DatabaseConnection,
    member_id: i64,
    attendance_date: NaiveDate,
    present: bool,
    event_id: Option<i64>,
) -> Result<attendance::Model> {
    Member::find_by_id(member_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("member", member_id))?;

    if let Some(event_id) = event_id {
        Event::find_by_id(event_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::not_found("event", event_id))?;
    }

    let event_filter = match event_id {
        Some(id) => attendance::Column::EventId.eq(id),
        None => attendance::Column::EventId.is_null(),
    };

    let existing = Attendance::find()
        .filter(attendance::Column::MemberId.eq(member_id))
        .filter(attendance::Column::AttendanceDate.eq(attendance_date))
        .filter(event_filter)
        .one(db)
        .await?;

    if let Some(record) = existing {
        debug!(attendance_id = record.id, present, "updating attendance");
        let mut model: attendance::ActiveModel = record.into();
        model.present = Set(present);
        return model.update(db).await.map_err(Into::into);
    }

    let model = attendance::ActiveModel {
        member_id: Set(member_id),
        attendance_date: Set(attendance_date),
        present: Set(present),
        event_id: Set(event_id),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Pages through attendance, newest first.
pub async fn list_attendance(
    db: &DatabaseConnection,
    limit: u64,
    offset: u64,
) -> Result<Vec<attendance::Model>> {
    Attendance::find()
        .order_by_desc(attendance::Column::AttendanceDate)
        .order_by_desc(attendance::Column::Id)
        .limit(limit)
        .offset(offset)
        .all(db)
        .await
        .map_err(Into::into)
}

/// All attendance rows for an event.
pub async fn list_attendance_for_event(
    db: &DatabaseConnection,
    event_id: i64,
) -> Result<Vec<attendance::Model>> {
    Attendance::find()
        .filter(attendance::Column::EventId.eq(event_id))
        .order_by_asc(attendance::Column::MemberId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Attendance dated within `[start, end]`.
pub async fn list_attendance_between(
    db: &DatabaseConnection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<attendance::Model>> {
    Attendance::find()
        .filter(attendance::Column::AttendanceDate.between(start, end))
        .order_by_asc(attendance::Column::AttendanceDate)
        .all(db)
        .await
        .map_err(Into::into)
}
