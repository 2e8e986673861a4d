//! Idempotent get-or-create for master data the generator may need to create.

use std::future::Future;

use presensi_db::error::DbResult;

use crate::error::{ServiceError, ServiceResult};
use crate::store::GenerationStore;

/// A row identified by a natural key that is created on first use.
///
/// `lookup` finds the live row by its key; `create` inserts it and fails with a
/// unique violation when another writer got there first.
pub trait Provision: Sync {
    type Output: Send;

    /// Human readable key, used in logs.
    fn key(&self) -> String;

    fn lookup<S: GenerationStore>(
        &self,
        store: &mut S,
    ) -> impl Future<Output = DbResult<Option<Self::Output>>> + Send;

    fn create<S: GenerationStore>(
        &self,
        store: &mut S,
    ) -> impl Future<Output = DbResult<Self::Output>> + Send;
}

/// ## Summary
/// Returns the row named by `provision`, creating it if it does not exist.
///
/// A unique violation on create means a concurrent run inserted the same row;
/// the lookup is repeated once and its result returned.
///
/// ## Errors
/// Returns an error if a store operation fails, or if the row is still missing
/// after a unique violation.
#[tracing::instrument(skip_all, fields(key = %provision.key()))]
pub async fn get_or_create<S, P>(store: &mut S, provision: &P) -> ServiceResult<P::Output>
where
    S: GenerationStore,
    P: Provision,
{
    if let Some(existing) = provision.lookup(store).await? {
        return Ok(existing);
    }

    match provision.create(store).await {
        Ok(created) => {
            tracing::info!("Provisioned missing row");
            Ok(created)
        }
        Err(err) if err.is_unique_violation() => {
            tracing::debug!(error = %err, "Lost creation race, re-reading");
            provision
                .lookup(store)
                .await?
                .ok_or(ServiceError::InvariantViolation(
                    "row missing after unique violation",
                ))
        }
        Err(err) => Err(err.into()),
    }
}
