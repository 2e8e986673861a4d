use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::{enums::AttendanceWindowMode, schema};

/// Tenant-level category describing how attendance is taken for a kind of meeting.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::session_type)]
#[diesel(check_for_backend(Pg))]
pub struct SessionType {
    pub id: uuid::Uuid,
    pub tenant_id: uuid::Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub allow_self_attendance: bool,
    pub allow_teacher_attendance: bool,
    /// Attendance states that must be accompanied by a reason.
    pub required_reason_states: Vec<String>,
    pub attendance_window_mode: AttendanceWindowMode,
    pub attendance_open_offset_minutes: i32,
    pub attendance_close_offset_minutes: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl SessionType {
    /// True when the type may be attached to new sessions.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.is_active && self.deleted_at.is_none()
    }
}

/// Insert struct for creating session types
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::session_type)]
pub struct NewSessionType {
    pub id: uuid::Uuid,
    pub tenant_id: uuid::Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub allow_self_attendance: bool,
    pub allow_teacher_attendance: bool,
    pub required_reason_states: Vec<String>,
    pub attendance_window_mode: AttendanceWindowMode,
    pub attendance_open_offset_minutes: i32,
    pub attendance_close_offset_minutes: i32,
    pub is_active: bool,
}

/// Frozen copy of a session type, embedded in every session generated with it.
///
/// Serialized as a flat JSON object; later edits to the type never touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTypeSnapshot {
    pub id: uuid::Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub allow_self_attendance: bool,
    pub allow_teacher_attendance: bool,
    pub required_reason_states: Vec<String>,
    pub attendance_window_mode: AttendanceWindowMode,
    pub attendance_open_offset_minutes: i32,
    pub attendance_close_offset_minutes: i32,
}

impl From<&SessionType> for SessionTypeSnapshot {
    fn from(session_type: &SessionType) -> Self {
        Self {
            id: session_type.id,
            slug: session_type.slug.clone(),
            name: session_type.name.clone(),
            description: session_type.description.clone(),
            color: session_type.color.clone(),
            icon: session_type.icon.clone(),
            allow_self_attendance: session_type.allow_self_attendance,
            allow_teacher_attendance: session_type.allow_teacher_attendance,
            required_reason_states: session_type.required_reason_states.clone(),
            attendance_window_mode: session_type.attendance_window_mode,
            attendance_open_offset_minutes: session_type.attendance_open_offset_minutes,
            attendance_close_offset_minutes: session_type.attendance_close_offset_minutes,
        }
    }
}
