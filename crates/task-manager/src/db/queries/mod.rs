//! Database queries for the Task Manager.
//!
//! This module contains database query functions organized by table.

pub mod label;
pub mod task;
pub mod task_status;
pub mod user;
