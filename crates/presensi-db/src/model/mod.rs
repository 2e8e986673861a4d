pub mod attendance_session;
pub mod room;
pub mod schedule;
pub mod session_type;
pub mod teaching;
