pub mod content;
pub mod schedule;
pub mod users;
