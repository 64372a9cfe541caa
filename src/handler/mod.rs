//! Request handler module
//!
//! Responsible for request routing dispatch: items API requests, the fixed
//! set of static HTML pages, and the JSON 404 fallback for everything else.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
