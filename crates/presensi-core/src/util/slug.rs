//! Slug generation utilities for human-readable resource identifiers.
//!
//! ## Summary
//! Generates stable, URL-safe slugs from display names, and the derived slugs
//! used for generated sessions and auto-provisioned rooms.

use crate::constants::{MEETING_SLUG_SEPARATOR, SECTION_ROOM_SLUG_PREFIX, SECTION_ROOM_SLUG_SUFFIX};

/// Generate a URL-safe slug from a name.
///
/// Converts to lowercase, replaces spaces and special characters with hyphens,
/// collapses multiple hyphens, and trims edge hyphens.
///
/// Examples:
/// - "Math 7A" -> "math-7a"
/// - "Biology (Lab) / 8B" -> "biology-lab-8b"
#[must_use]
pub fn generate_slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Slug for the n-th meeting of a teaching assignment.
#[must_use]
pub fn meeting_slug(assignment_slug: &str, meeting_number: i32) -> String {
    format!("{assignment_slug}{MEETING_SLUG_SEPARATOR}{meeting_number}")
}

/// Deterministic slug of the room auto-provisioned for a section.
///
/// Repeated generation runs look rooms up by this slug before creating one.
#[must_use]
pub fn section_room_slug(section_id: uuid::Uuid) -> String {
    format!("{SECTION_ROOM_SLUG_PREFIX}-{section_id}-{SECTION_ROOM_SLUG_SUFFIX}")
}
