//! Query composition for `session_type`.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::session_type;
use crate::model::session_type::{NewSessionType, SessionType};

/// ## Summary
/// Loads a session type by id, including inactive and soft-deleted rows.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn get_session_type(
    conn: &mut DbConnection<'_>,
    id: Uuid,
) -> QueryResult<Option<SessionType>> {
    session_type::table
        .filter(session_type::id.eq(id))
        .select(SessionType::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Finds the live session type of a tenant with the given slug.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn by_slug(
    conn: &mut DbConnection<'_>,
    tenant_id: Uuid,
    slug: &str,
) -> QueryResult<Option<SessionType>> {
    session_type::table
        .filter(session_type::tenant_id.eq(tenant_id))
        .filter(session_type::slug.eq(slug))
        .filter(session_type::deleted_at.is_null())
        .select(SessionType::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Inserts a session type and returns the stored row.
///
/// ## Errors
/// Returns an error if the database operation fails, including a unique
/// violation when a live type with the same slug already exists.
pub async fn insert(
    conn: &mut DbConnection<'_>,
    new_type: &NewSessionType,
) -> QueryResult<SessionType> {
    diesel::insert_into(session_type::table)
        .values(new_type)
        .returning(SessionType::as_returning())
        .get_result(conn)
        .await
}
