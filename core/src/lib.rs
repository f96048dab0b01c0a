//! Core library for the taskboard backend
//!
//! This crate contains the task domain:
//! - Task model and status lifecycle
//! - Repository interface and the JSON file store
//! - The task service with ownership checks and list filtering

pub mod error;
pub mod task;

pub use error::{Error, ErrorKind};
pub type Result<T> = std::result::Result<T, Error>;
