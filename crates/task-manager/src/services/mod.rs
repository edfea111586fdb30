//! Service layer for the Task Manager.
//!
//! Services encapsulate business logic and coordinate
//! between handlers and the repository.

pub mod auth;
pub mod label;
pub mod task;
pub mod task_status;
pub mod user;

pub use auth::AuthService;
pub use label::LabelService;
pub use task::TaskService;
pub use task_status::TaskStatusService;
pub use user::UserService;
