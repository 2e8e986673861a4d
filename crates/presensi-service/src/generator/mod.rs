//! Occurrence generation for recurring schedules.
//!
//! ## Summary
//! A run loads a schedule and its rules, resolves the session type once,
//! expands the rules into dated occurrences, drops dates that already hold a
//! session, resolves each teaching assignment once, numbers meetings from the
//! persisted maximum, and writes the rows in conflict-ignoring batches.
//!
//! All per-run state lives in the run itself, so concurrent runs never share
//! caches. Dropping the returned future cancels the run between store calls.

pub mod builder;
pub mod context;
pub mod expander;
pub mod meeting_number;
pub mod options;
pub mod persister;
pub mod provision;
pub mod room;
pub mod rule_matcher;
pub mod session_type;

use std::time::Duration;

use presensi_core::config::GenerationConfig;
use presensi_core::util::calendar::parse_timezone;
use presensi_db::model::attendance_session::NewAttendanceSession;
use uuid::Uuid;

pub use options::GenerateOptions;

use self::builder::build_session;
use self::context::GenerationContext;
use self::expander::{expand, retain_new_dates, validate_range};
use self::meeting_number::MeetingNumberAllocator;
use self::persister::persist;
use self::session_type::resolve_session_type;
use crate::error::{ServiceError, ServiceResult};
use crate::store::GenerationStore;

/// ## Summary
/// Generates and persists the sessions of a schedule.
///
/// Returns the number of sessions newly created. Re-running over the same or an
/// overlapping range creates only the sessions that are missing.
///
/// ## Errors
/// Returns an error if the schedule, timezone, default teaching assignment or
/// session type is invalid, or if a store operation fails. A failing batch
/// leaves earlier batches written.
#[tracing::instrument(skip(store, config, options), fields(tenant_id))]
pub async fn generate_occurrences<S: GenerationStore>(
    store: &mut S,
    config: &GenerationConfig,
    schedule_id: Uuid,
    options: &GenerateOptions,
) -> ServiceResult<usize> {
    let rows = plan(store, config, schedule_id, options).await?;
    let batch_size = options.effective_batch_size(config.batch_size);

    let inserted = persist(store, &rows, batch_size).await?;

    tracing::info!(planned = rows.len(), inserted, "Generated sessions");
    Ok(inserted)
}

/// ## Summary
/// Runs [`generate_occurrences`] with a wall-clock budget.
///
/// ## Errors
/// Returns `ServiceError::Timeout` if the budget runs out, otherwise the errors
/// of [`generate_occurrences`].
pub async fn generate_occurrences_with_timeout<S: GenerationStore>(
    store: &mut S,
    config: &GenerationConfig,
    schedule_id: Uuid,
    options: &GenerateOptions,
    timeout: Duration,
) -> ServiceResult<usize> {
    tokio::time::timeout(
        timeout,
        generate_occurrences(store, config, schedule_id, options),
    )
    .await
    .map_err(|_elapsed| ServiceError::Timeout(timeout))?
}

/// ## Summary
/// Assembles the sessions a run would insert without inserting them.
///
/// Missing master data (default session type, section rooms) is still created.
///
/// ## Errors
/// Same as [`generate_occurrences`], minus batch failures.
#[tracing::instrument(skip(store, config, options), fields(tenant_id))]
pub async fn preview_occurrences<S: GenerationStore>(
    store: &mut S,
    config: &GenerationConfig,
    schedule_id: Uuid,
    options: &GenerateOptions,
) -> ServiceResult<Vec<NewAttendanceSession>> {
    let rows = plan(store, config, schedule_id, options).await?;
    tracing::info!(planned = rows.len(), "Previewed sessions");
    Ok(rows)
}

/// ## Summary
/// Runs [`preview_occurrences`] with a wall-clock budget.
///
/// ## Errors
/// Returns `ServiceError::Timeout` if the budget runs out, otherwise the errors
/// of [`preview_occurrences`].
pub async fn preview_occurrences_with_timeout<S: GenerationStore>(
    store: &mut S,
    config: &GenerationConfig,
    schedule_id: Uuid,
    options: &GenerateOptions,
    timeout: Duration,
) -> ServiceResult<Vec<NewAttendanceSession>> {
    tokio::time::timeout(
        timeout,
        preview_occurrences(store, config, schedule_id, options),
    )
    .await
    .map_err(|_elapsed| ServiceError::Timeout(timeout))?
}

async fn plan<S: GenerationStore>(
    store: &mut S,
    config: &GenerationConfig,
    schedule_id: Uuid,
    options: &GenerateOptions,
) -> ServiceResult<Vec<NewAttendanceSession>> {
    let tz = parse_timezone(
        options
            .timezone
            .as_deref()
            .unwrap_or(&config.default_timezone),
    )?;

    let schedule = store
        .load_schedule(schedule_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("schedule {schedule_id}")))?;
    if options
        .tenant_id
        .is_some_and(|tenant_id| tenant_id != schedule.tenant_id)
    {
        return Err(ServiceError::TenantMismatch(format!(
            "schedule {schedule_id} belongs to another tenant"
        )));
    }
    tracing::Span::current().record("tenant_id", tracing::field::display(schedule.tenant_id));

    validate_range(&schedule, config.max_span_days)?;

    let rules = store.load_rules(schedule.id).await?;
    tracing::debug!(rules = rules.len(), timezone = %tz, "Loaded schedule");

    let default_csst_id = options.default_csst_id.or(schedule.csst_id);
    let mut context = GenerationContext::new(schedule.tenant_id, options.default_room_id.is_none());
    if let Some(csst_id) = default_csst_id {
        context.require_assignment(store, csst_id).await?;
    }

    let session_type =
        resolve_session_type(store, schedule.tenant_id, options.default_session_type_id).await?;

    let occurrences = expand(&schedule, &rules, default_csst_id, tz)?;
    let existing = store
        .existing_session_dates(
            schedule.tenant_id,
            schedule.id,
            schedule.start_date,
            schedule.end_date,
        )
        .await?;
    let expanded = occurrences.len();
    let occurrences = retain_new_dates(occurrences, &existing);
    tracing::debug!(
        expanded,
        existing = existing.len(),
        new = occurrences.len(),
        "Expanded occurrences"
    );

    for csst_id in occurrences.iter().filter_map(|o| o.csst_id) {
        context.resolve_assignment(store, csst_id).await;
    }

    let persisted_max = store
        .max_meeting_numbers(schedule.tenant_id, &context.resolved_ids())
        .await?;
    let mut meeting_numbers = MeetingNumberAllocator::new(persisted_max);

    Ok(occurrences
        .iter()
        .map(|occurrence| {
            let assignment = occurrence.csst_id.and_then(|id| context.assignment(id));
            let meeting_number = assignment.map(|a| meeting_numbers.next(a.id));
            build_session(
                &schedule,
                occurrence,
                assignment,
                meeting_number,
                &session_type,
                options,
            )
        })
        .collect())
}
