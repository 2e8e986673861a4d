//! Read-only lookups of teaching assignments and sections.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::{section, teaching_assignment};
use crate::model::teaching::{Section, TeachingAssignment};

/// ## Summary
/// Loads a live teaching assignment by id, regardless of tenant.
///
/// Tenant checks are left to the caller so it can tell "missing" from "foreign".
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn get_teaching_assignment(
    conn: &mut DbConnection<'_>,
    id: Uuid,
) -> QueryResult<Option<TeachingAssignment>> {
    teaching_assignment::table
        .filter(teaching_assignment::id.eq(id))
        .filter(teaching_assignment::deleted_at.is_null())
        .select(TeachingAssignment::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Loads a live section by id.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn get_section(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<Option<Section>> {
    section::table
        .filter(section::id.eq(id))
        .filter(section::deleted_at.is_null())
        .select(Section::as_select())
        .first(conn)
        .await
        .optional()
}
