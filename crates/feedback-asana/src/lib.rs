//! Minimal client for creating tasks through the Asana REST API.

pub mod client;
pub mod error;
pub mod types;

pub use client::AsanaClient;
pub use error::AsanaError;
pub use types::{TaskData, TaskRequest, TaskResponse, TaskResponseData};
