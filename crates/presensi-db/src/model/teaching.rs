use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

/// Binding of a teacher to a class-section-subject combination (CSST).
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::teaching_assignment)]
#[diesel(check_for_backend(Pg))]
pub struct TeachingAssignment {
    pub id: uuid::Uuid,
    pub tenant_id: uuid::Uuid,
    pub teacher_id: Option<uuid::Uuid>,
    pub room_id: Option<uuid::Uuid>,
    pub section_id: Option<uuid::Uuid>,
    pub name: String,
    pub slug: Option<String>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::section)]
#[diesel(check_for_backend(Pg))]
pub struct Section {
    pub id: uuid::Uuid,
    pub tenant_id: uuid::Uuid,
    pub name: String,
    pub room_id: Option<uuid::Uuid>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}
