//! HTTP protocol layer module
//!
//! Base response-building functionality shared by page serving and the API,
//! decoupled from specific business logic.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{build_404_page, build_413_response, build_file_response};
