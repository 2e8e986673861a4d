//! Room resolution for a teaching assignment.

use presensi_core::util::slug::section_room_slug;
use presensi_db::error::DbResult;
use presensi_db::model::room::{NewRoom, Room};
use presensi_db::model::teaching::TeachingAssignment;
use uuid::Uuid;

use super::provision::{Provision, get_or_create};
use crate::error::ServiceResult;
use crate::store::GenerationStore;

/// The room provisioned for a section that has none.
pub struct SectionRoom {
    pub tenant_id: Uuid,
    pub section_id: Uuid,
    pub section_name: String,
}

impl Provision for SectionRoom {
    type Output = Room;

    fn key(&self) -> String {
        section_room_slug(self.section_id)
    }

    async fn lookup<S: GenerationStore>(&self, store: &mut S) -> DbResult<Option<Room>> {
        store
            .find_room_by_slug(self.tenant_id, &section_room_slug(self.section_id))
            .await
    }

    async fn create<S: GenerationStore>(&self, store: &mut S) -> DbResult<Room> {
        store
            .insert_room(NewRoom {
                id: Uuid::now_v7(),
                tenant_id: self.tenant_id,
                name: format!("{} Room", self.section_name),
                slug: section_room_slug(self.section_id),
                section_id: Some(self.section_id),
            })
            .await
    }
}

/// ## Summary
/// Resolves the room of a teaching assignment: its own room, else its section's
/// room, else a room provisioned for the section.
///
/// Returns `None` when the assignment has no section, or its section no longer
/// exists. Caller-supplied room overrides are applied by the session builder.
///
/// ## Errors
/// Returns an error if a store operation fails.
pub async fn resolve_room<S: GenerationStore>(
    store: &mut S,
    assignment: &TeachingAssignment,
) -> ServiceResult<Option<Uuid>> {
    if let Some(room_id) = assignment.room_id {
        return Ok(Some(room_id));
    }

    let Some(section_id) = assignment.section_id else {
        return Ok(None);
    };
    let Some(section) = store.load_section(section_id).await? else {
        tracing::warn!(%section_id, csst_id = %assignment.id, "Section of teaching assignment not found");
        return Ok(None);
    };
    if let Some(room_id) = section.room_id {
        return Ok(Some(room_id));
    }

    let provision = SectionRoom {
        tenant_id: assignment.tenant_id,
        section_id,
        section_name: section.name,
    };
    let room = get_or_create(store, &provision).await?;
    Ok(Some(room.id))
}
