//! Batched, conflict-ignoring session writes.

use presensi_db::model::attendance_session::NewAttendanceSession;

use crate::error::ServiceResult;
use crate::store::GenerationStore;

/// ## Summary
/// Inserts `rows` in batches of `batch_size`, skipping rows that already exist.
///
/// Returns the number of rows actually inserted. Batches are independent: when
/// one fails, the earlier ones stay written and the rest are not attempted.
///
/// ## Errors
/// Returns an error if a batch insert fails.
pub async fn persist<S: GenerationStore>(
    store: &mut S,
    rows: &[NewAttendanceSession],
    batch_size: usize,
) -> ServiceResult<usize> {
    let mut inserted = 0;
    for (index, batch) in rows.chunks(batch_size.max(1)).enumerate() {
        let count = store.insert_sessions(batch).await.inspect_err(|e| {
            tracing::error!(batch = index, inserted, error = %e, "Session batch failed, aborting");
        })?;
        tracing::debug!(batch = index, attempted = batch.len(), inserted = count, "Wrote session batch");
        inserted += count;
    }
    Ok(inserted)
}
