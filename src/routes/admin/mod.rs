pub mod dashboard;
pub mod events;
pub mod users;
