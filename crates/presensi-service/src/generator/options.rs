use presensi_db::db::enums::AttendanceStatus;
use serde::Deserialize;
use uuid::Uuid;

/// Caller-supplied defaults for one generation run.
///
/// Explicit defaults always win over values resolved from a teaching assignment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Tenant the caller acts for; a schedule of another tenant is rejected.
    pub tenant_id: Option<Uuid>,
    /// IANA timezone the rule times are written in.
    pub timezone: Option<String>,
    /// Teaching assignment for rules that do not name one. Falls back to the schedule's own.
    pub default_csst_id: Option<Uuid>,
    pub default_room_id: Option<Uuid>,
    pub default_teacher_id: Option<Uuid>,
    pub default_session_type_id: Option<Uuid>,
    pub default_attendance_status: Option<AttendanceStatus>,
    pub default_title: Option<String>,
    /// Rows per insert statement; zero or absent uses the configured size.
    pub batch_size: Option<usize>,
}

impl GenerateOptions {
    /// Effective batch size given the configured fallback.
    #[must_use]
    pub fn effective_batch_size(&self, configured: usize) -> usize {
        self.batch_size
            .filter(|size| *size > 0)
            .unwrap_or(configured)
            .max(1)
    }
}
