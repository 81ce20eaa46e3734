pub mod attendance;
pub mod batches;
pub mod billing;
pub mod check_ins;
pub mod enrollments;
pub mod families;
pub mod lookup;
pub mod messaging;
pub mod persons;
pub mod profiles;
pub mod students;
pub mod teachers;
pub mod webhooks;
