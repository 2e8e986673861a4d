/// Slug of the tenant-level session type used when the caller names none.
pub const DEFAULT_SESSION_TYPE_SLUG: &str = "regular";
pub const DEFAULT_SESSION_TYPE_NAME: &str = "Regular Session";
pub const DEFAULT_SESSION_TYPE_DESCRIPTION: &str =
    "Default session type for generated class meetings";
pub const DEFAULT_SESSION_TYPE_COLOR: &str = "#2563EB";
pub const DEFAULT_SESSION_TYPE_ICON: &str = "calendar-check";
pub const DEFAULT_REQUIRED_REASON_STATES: [&str; 2] = ["excused", "sick"];
pub const DEFAULT_ATTENDANCE_OPEN_OFFSET_MINUTES: i32 = -15;
pub const DEFAULT_ATTENDANCE_CLOSE_OFFSET_MINUTES: i32 = 30;

/// Joins an assignment slug and a meeting number: `{slug}-pertemuan-{n}`.
pub const MEETING_SLUG_INFIX: &str = "pertemuan";
pub const MEETING_SLUG_SEPARATOR: &str = const_str::concat!("-", MEETING_SLUG_INFIX, "-");

/// Auto-provisioned rooms are named `section-{section_id}-room`.
pub const SECTION_ROOM_SLUG_PREFIX: &str = "section";
pub const SECTION_ROOM_SLUG_SUFFIX: &str = "room";

pub const DEFAULT_TIMEZONE: &str = "Asia/Jakarta";
pub const DEFAULT_MAX_SPAN_DAYS: u32 = 360;
pub const DEFAULT_BATCH_SIZE: usize = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
