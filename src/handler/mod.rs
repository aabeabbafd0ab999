//! Request handler module
//!
//! Responsible for request dispatch and the file-serving business
//! logic: path resolution under the server root, directory listings,
//! and status-code mapping for filesystem errors.

pub mod listing;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
