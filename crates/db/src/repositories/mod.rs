//! Stateless repository structs, one per table (plus the registration
//! orchestrator, which spans several tables in one transaction).

mod attendance_repo;
mod batch_repo;
mod billing_repo;
mod check_in_repo;
mod contact_repo;
mod enrollment_repo;
mod message_log_repo;
mod person_repo;
mod profile_repo;
mod registration_repo;
mod relationship_repo;
mod teacher_repo;

pub use attendance_repo::AttendanceRepo;
pub use batch_repo::BatchRepo;
pub use billing_repo::BillingRepo;
pub use check_in_repo::CheckInRepo;
pub use contact_repo::ContactRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use message_log_repo::MessageLogRepo;
pub use person_repo::PersonRepo;
pub use profile_repo::ProfileRepo;
pub use registration_repo::RegistrationRepo;
pub use relationship_repo::{GuardianRepo, SiblingRepo};
pub use teacher_repo::TeacherRepo;
