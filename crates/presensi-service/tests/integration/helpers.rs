#![allow(dead_code)]
//! Fixtures shared by the generation tests.

use chrono::{NaiveDate, NaiveTime, Utc};
use presensi_core::config::GenerationConfig;
use presensi_db::db::enums::AttendanceWindowMode;
use presensi_db::model::room::Room;
use presensi_db::model::schedule::{Schedule, ScheduleRule};
use presensi_db::model::session_type::SessionType;
use presensi_db::model::teaching::{Section, TeachingAssignment};
use presensi_service::store::memory::MemoryStore;
use uuid::Uuid;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Default generation settings: Asia/Jakarta, 360 day span, 500 rows per batch.
pub fn config() -> GenerationConfig {
    GenerationConfig::default()
}

/// Weekly rule without constraints; not yet stored.
pub fn weekly_rule(
    schedule: &Schedule,
    day_of_week: i32,
    start: NaiveTime,
    end: NaiveTime,
) -> ScheduleRule {
    ScheduleRule {
        id: Uuid::new_v4(),
        schedule_id: schedule.id,
        day_of_week,
        start_time_of_day: start,
        end_time_of_day: end,
        interval_weeks: 1,
        start_offset_weeks: 0,
        week_parity: None,
        weeks_of_month: vec![],
        last_week_of_month: false,
        csst_id: None,
        created_at: Utc::now(),
    }
}

/// One tenant's data inside a fresh [`MemoryStore`].
pub struct Fixture {
    pub store: MemoryStore,
    pub tenant_id: Uuid,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
            tenant_id: Uuid::new_v4(),
        }
    }

    pub fn seed_schedule(&mut self, start: NaiveDate, end: NaiveDate) -> Schedule {
        let schedule = Schedule {
            id: Uuid::new_v4(),
            tenant_id: self.tenant_id,
            csst_id: None,
            start_date: start,
            end_date: end,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };
        self.store.add_schedule(schedule.clone());
        schedule
    }

    /// Stores a changed copy of an existing schedule.
    pub fn update_schedule(&mut self, schedule: &Schedule) {
        self.store.add_schedule(schedule.clone());
    }

    pub fn seed_rule(&mut self, rule: ScheduleRule) -> ScheduleRule {
        self.store.add_rule(rule.clone());
        rule
    }

    /// The 08:00-09:30 Monday rule used by most tests.
    pub fn seed_monday_rule(&mut self, schedule: &Schedule) -> ScheduleRule {
        self.seed_rule(weekly_rule(schedule, 1, time(8, 0), time(9, 30)))
    }

    pub fn seed_section(&mut self, name: &str, room_id: Option<Uuid>) -> Section {
        let section = Section {
            id: Uuid::new_v4(),
            tenant_id: self.tenant_id,
            name: name.to_string(),
            room_id,
            deleted_at: None,
        };
        self.store.add_section(section.clone());
        section
    }

    pub fn seed_room(&mut self, name: &str) -> Room {
        let room = Room {
            id: Uuid::new_v4(),
            tenant_id: self.tenant_id,
            name: name.to_string(),
            slug: presensi_core::util::slug::generate_slug(name),
            section_id: None,
            created_at: Utc::now(),
            deleted_at: None,
        };
        self.store.add_room(room.clone());
        room
    }

    pub fn seed_assignment(
        &mut self,
        name: &str,
        room_id: Option<Uuid>,
        section_id: Option<Uuid>,
    ) -> TeachingAssignment {
        let assignment = TeachingAssignment {
            id: Uuid::new_v4(),
            tenant_id: self.tenant_id,
            teacher_id: Some(Uuid::new_v4()),
            room_id,
            section_id,
            name: name.to_string(),
            slug: None,
            deleted_at: None,
        };
        self.store.add_teaching_assignment(assignment.clone());
        assignment
    }

    pub fn seed_session_type(&mut self, slug: &str, is_active: bool) -> SessionType {
        let now = Utc::now();
        let session_type = SessionType {
            id: Uuid::new_v4(),
            tenant_id: self.tenant_id,
            slug: slug.to_string(),
            name: "Ujian".to_string(),
            description: Some("Exam sitting".to_string()),
            color: Some("#DC2626".to_string()),
            icon: Some("file-pen".to_string()),
            allow_self_attendance: true,
            allow_teacher_attendance: true,
            required_reason_states: vec!["sick".to_string()],
            attendance_window_mode: AttendanceWindowMode::Manual,
            attendance_open_offset_minutes: 0,
            attendance_close_offset_minutes: 0,
            is_active,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.store.add_session_type(session_type.clone());
        session_type
    }
}
