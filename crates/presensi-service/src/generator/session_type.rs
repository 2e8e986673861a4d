//! Session type resolution and snapshotting.

use presensi_core::constants::{
    DEFAULT_ATTENDANCE_CLOSE_OFFSET_MINUTES, DEFAULT_ATTENDANCE_OPEN_OFFSET_MINUTES,
    DEFAULT_REQUIRED_REASON_STATES, DEFAULT_SESSION_TYPE_COLOR, DEFAULT_SESSION_TYPE_DESCRIPTION,
    DEFAULT_SESSION_TYPE_ICON, DEFAULT_SESSION_TYPE_NAME, DEFAULT_SESSION_TYPE_SLUG,
};
use presensi_db::db::enums::AttendanceWindowMode;
use presensi_db::error::DbResult;
use presensi_db::model::session_type::{NewSessionType, SessionType, SessionTypeSnapshot};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::provision::{Provision, get_or_create};
use crate::error::{ServiceError, ServiceResult};
use crate::store::GenerationStore;

/// Session type attached to every session of one run, with its frozen snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSessionType {
    pub id: Uuid,
    pub snapshot: JsonValue,
}

impl ResolvedSessionType {
    /// ## Errors
    /// Returns an error if the snapshot cannot be serialized.
    pub fn from_session_type(session_type: &SessionType) -> ServiceResult<Self> {
        Ok(Self {
            id: session_type.id,
            snapshot: serde_json::to_value(SessionTypeSnapshot::from(session_type))?,
        })
    }
}

/// The tenant's canonical session type, created with fixed defaults when missing.
pub struct DefaultSessionType {
    pub tenant_id: Uuid,
}

impl Provision for DefaultSessionType {
    type Output = SessionType;

    fn key(&self) -> String {
        format!("{}/{DEFAULT_SESSION_TYPE_SLUG}", self.tenant_id)
    }

    async fn lookup<S: GenerationStore>(&self, store: &mut S) -> DbResult<Option<SessionType>> {
        store
            .find_session_type_by_slug(self.tenant_id, DEFAULT_SESSION_TYPE_SLUG)
            .await
    }

    async fn create<S: GenerationStore>(&self, store: &mut S) -> DbResult<SessionType> {
        store
            .insert_session_type(NewSessionType {
                id: Uuid::now_v7(),
                tenant_id: self.tenant_id,
                slug: DEFAULT_SESSION_TYPE_SLUG.to_string(),
                name: DEFAULT_SESSION_TYPE_NAME.to_string(),
                description: Some(DEFAULT_SESSION_TYPE_DESCRIPTION.to_string()),
                color: Some(DEFAULT_SESSION_TYPE_COLOR.to_string()),
                icon: Some(DEFAULT_SESSION_TYPE_ICON.to_string()),
                allow_self_attendance: false,
                allow_teacher_attendance: true,
                required_reason_states: DEFAULT_REQUIRED_REASON_STATES
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                attendance_window_mode: AttendanceWindowMode::Schedule,
                attendance_open_offset_minutes: DEFAULT_ATTENDANCE_OPEN_OFFSET_MINUTES,
                attendance_close_offset_minutes: DEFAULT_ATTENDANCE_CLOSE_OFFSET_MINUTES,
                is_active: true,
            })
            .await
    }
}

/// ## Summary
/// Resolves the session type for a run and freezes it into a snapshot.
///
/// An explicit id must name an active, live type of `tenant_id`. Without one,
/// the tenant's default type is used, created on first use.
///
/// ## Errors
/// Returns `NotFound`, `TenantMismatch` or `ValidationError` for an unusable
/// explicit type, or an error if a store operation fails.
pub async fn resolve_session_type<S: GenerationStore>(
    store: &mut S,
    tenant_id: Uuid,
    explicit_id: Option<Uuid>,
) -> ServiceResult<ResolvedSessionType> {
    let session_type = match explicit_id {
        Some(id) => {
            let session_type = store
                .load_session_type(id)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("session type {id}")))?;
            if session_type.tenant_id != tenant_id {
                return Err(ServiceError::TenantMismatch(format!(
                    "session type {id} belongs to another tenant"
                )));
            }
            if !session_type.is_live() {
                return Err(ServiceError::ValidationError(format!(
                    "session type {id} is inactive or deleted"
                )));
            }
            session_type
        }
        None => get_or_create(store, &DefaultSessionType { tenant_id }).await?,
    };

    tracing::debug!(session_type_id = %session_type.id, slug = %session_type.slug, "Resolved session type");
    ResolvedSessionType::from_session_type(&session_type)
}
