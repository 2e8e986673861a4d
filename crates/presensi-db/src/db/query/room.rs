//! Query composition for `room`.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::room;
use crate::model::room::{NewRoom, Room};

/// ## Summary
/// Finds a live room of a tenant by slug.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn by_slug(
    conn: &mut DbConnection<'_>,
    tenant_id: Uuid,
    slug: &str,
) -> QueryResult<Option<Room>> {
    room::table
        .filter(room::tenant_id.eq(tenant_id))
        .filter(room::slug.eq(slug))
        .filter(room::deleted_at.is_null())
        .select(Room::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Inserts a room and returns the stored row.
///
/// ## Errors
/// Returns an error if the database operation fails, including a unique
/// violation when a live room with the same slug already exists.
pub async fn insert(conn: &mut DbConnection<'_>, new_room: &NewRoom) -> QueryResult<Room> {
    diesel::insert_into(room::table)
        .values(new_room)
        .returning(Room::as_returning())
        .get_result(conn)
        .await
}
