use chrono::{DateTime, NaiveDate, Utc};
use diesel::{pg::Pg, prelude::*};
use serde_json::Value as JsonValue;

use crate::db::{
    enums::{AttendanceStatus, SessionStatus},
    schema,
};

/// One concrete meeting on the calendar.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::attendance_session)]
#[diesel(check_for_backend(Pg))]
pub struct AttendanceSession {
    pub id: uuid::Uuid,
    pub tenant_id: uuid::Uuid,
    pub schedule_id: Option<uuid::Uuid>,
    pub schedule_rule_id: Option<uuid::Uuid>,
    pub date: NaiveDate,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub teacher_id: Option<uuid::Uuid>,
    pub room_id: Option<uuid::Uuid>,
    pub csst_id: Option<uuid::Uuid>,
    pub session_type_id: Option<uuid::Uuid>,
    pub session_type_snapshot: Option<JsonValue>,
    pub meeting_number: Option<i32>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub status: SessionStatus,
    pub attendance_status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert struct for generated sessions
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = schema::attendance_session)]
pub struct NewAttendanceSession {
    pub id: uuid::Uuid,
    pub tenant_id: uuid::Uuid,
    pub schedule_id: Option<uuid::Uuid>,
    pub schedule_rule_id: Option<uuid::Uuid>,
    pub date: NaiveDate,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub teacher_id: Option<uuid::Uuid>,
    pub room_id: Option<uuid::Uuid>,
    pub csst_id: Option<uuid::Uuid>,
    pub session_type_id: Option<uuid::Uuid>,
    pub session_type_snapshot: Option<JsonValue>,
    pub meeting_number: Option<i32>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub status: SessionStatus,
    pub attendance_status: AttendanceStatus,
}
