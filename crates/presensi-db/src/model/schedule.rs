use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::{pg::Pg, prelude::*};

use crate::db::{enums::WeekParity, schema};

/// Date-bounded container of weekly recurrence rules.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::schedule)]
#[diesel(check_for_backend(Pg))]
pub struct Schedule {
    pub id: uuid::Uuid,
    pub tenant_id: uuid::Uuid,
    /// Teaching assignment used by rules that do not name their own.
    pub csst_id: Option<uuid::Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// One weekly recurrence rule of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = schema::schedule_rule)]
#[diesel(check_for_backend(Pg))]
#[diesel(belongs_to(Schedule, foreign_key = schedule_id))]
pub struct ScheduleRule {
    pub id: uuid::Uuid,
    pub schedule_id: uuid::Uuid,
    /// ISO weekday, 1 = Monday .. 7 = Sunday.
    pub day_of_week: i32,
    pub start_time_of_day: NaiveTime,
    pub end_time_of_day: NaiveTime,
    pub interval_weeks: i32,
    pub start_offset_weeks: i32,
    pub week_parity: Option<WeekParity>,
    /// Monday-aligned weeks of the month (1..=5) the rule is limited to; empty means any.
    pub weeks_of_month: Vec<i32>,
    pub last_week_of_month: bool,
    pub csst_id: Option<uuid::Uuid>,
    pub created_at: DateTime<Utc>,
}
