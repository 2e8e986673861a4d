use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::room)]
#[diesel(check_for_backend(Pg))]
pub struct Room {
    pub id: uuid::Uuid,
    pub tenant_id: uuid::Uuid,
    pub name: String,
    pub slug: String,
    /// Section the room was provisioned for, if any.
    pub section_id: Option<uuid::Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Insert struct for creating rooms
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::room)]
pub struct NewRoom {
    pub id: uuid::Uuid,
    pub tenant_id: uuid::Uuid,
    pub name: String,
    pub slug: String,
    pub section_id: Option<uuid::Uuid>,
}
