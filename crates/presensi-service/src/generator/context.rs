//! Per-run state: resolved teaching assignments and their rooms.

use std::collections::HashMap;

use presensi_core::util::slug::generate_slug;
use presensi_db::model::teaching::TeachingAssignment;
use uuid::Uuid;

use super::room::resolve_room;
use crate::error::{ServiceError, ServiceResult};
use crate::store::GenerationStore;

/// What a session takes from its teaching assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAssignment {
    pub id: Uuid,
    pub teacher_id: Option<Uuid>,
    pub room_id: Option<Uuid>,
    pub title: String,
    /// Base of the meeting slugs; derived from the name when the assignment has none.
    pub slug: String,
}

/// Caches assignment resolution for one generation run.
///
/// Every distinct assignment is loaded at most once. A cached `None` records an
/// assignment that could not be resolved.
#[derive(Debug)]
pub struct GenerationContext {
    tenant_id: Uuid,
    resolve_rooms: bool,
    assignments: HashMap<Uuid, Option<ResolvedAssignment>>,
}

impl GenerationContext {
    /// `resolve_rooms` is false when the caller supplied a room for every session,
    /// so no room is looked up or provisioned.
    #[must_use]
    pub fn new(tenant_id: Uuid, resolve_rooms: bool) -> Self {
        Self {
            tenant_id,
            resolve_rooms,
            assignments: HashMap::new(),
        }
    }

    /// ## Summary
    /// Loads an assignment that the run cannot proceed without.
    ///
    /// ## Errors
    /// Returns `NotFound` or `TenantMismatch` if the assignment is unusable, or an
    /// error if loading it fails.
    pub async fn require_assignment<S: GenerationStore>(
        &mut self,
        store: &mut S,
        id: Uuid,
    ) -> ServiceResult<()> {
        let assignment = store
            .load_teaching_assignment(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("teaching assignment {id}")))?;
        if assignment.tenant_id != self.tenant_id {
            return Err(ServiceError::TenantMismatch(format!(
                "teaching assignment {id} belongs to another tenant"
            )));
        }

        let resolved = self.resolve(store, assignment).await;
        self.assignments.insert(id, Some(resolved));
        Ok(())
    }

    /// Loads an assignment referenced by a single rule.
    ///
    /// Failures are logged and cached as unresolved; sessions of that rule are
    /// generated without teacher, room or meeting number.
    pub async fn resolve_assignment<S: GenerationStore>(&mut self, store: &mut S, id: Uuid) {
        if self.assignments.contains_key(&id) {
            return;
        }

        let resolved = match store.load_teaching_assignment(id).await {
            Ok(Some(assignment)) if assignment.tenant_id == self.tenant_id => {
                Some(self.resolve(store, assignment).await)
            }
            Ok(Some(_)) => {
                tracing::warn!(csst_id = %id, "Teaching assignment belongs to another tenant, leaving sessions unassigned");
                None
            }
            Ok(None) => {
                tracing::warn!(csst_id = %id, "Teaching assignment not found, leaving sessions unassigned");
                None
            }
            Err(e) => {
                tracing::warn!(csst_id = %id, error = %e, "Failed to load teaching assignment, leaving sessions unassigned");
                None
            }
        };
        self.assignments.insert(id, resolved);
    }

    #[must_use]
    pub fn assignment(&self, id: Uuid) -> Option<&ResolvedAssignment> {
        self.assignments.get(&id).and_then(Option::as_ref)
    }

    /// Ids of every assignment resolved so far.
    #[must_use]
    pub fn resolved_ids(&self) -> Vec<Uuid> {
        self.assignments
            .values()
            .flatten()
            .map(|assignment| assignment.id)
            .collect()
    }

    async fn resolve<S: GenerationStore>(
        &self,
        store: &mut S,
        assignment: TeachingAssignment,
    ) -> ResolvedAssignment {
        let room_id = if self.resolve_rooms {
            resolve_room(store, &assignment)
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(csst_id = %assignment.id, error = %e, "Failed to resolve room, leaving it unset");
                    None
                })
        } else {
            None
        };

        let slug = assignment
            .slug
            .filter(|slug| !slug.is_empty())
            .unwrap_or_else(|| generate_slug(&assignment.name));

        ResolvedAssignment {
            id: assignment.id,
            teacher_id: assignment.teacher_id,
            room_id,
            title: assignment.name,
            slug,
        }
    }
}
