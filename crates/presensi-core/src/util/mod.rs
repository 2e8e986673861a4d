pub mod calendar;
pub mod slug;
