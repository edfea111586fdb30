//! Database models for the Task Manager.
//!
//! Row structs are SQLx-compatible; request and response types describe
//! the JSON wire format.

pub mod label;
pub mod task;
pub mod task_status;
pub mod user;

pub use label::*;
pub use task::*;
pub use task_status::*;
pub use user::*;
