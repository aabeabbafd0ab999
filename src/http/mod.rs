//! HTTP protocol layer module
//!
//! Content-Type detection and status-code response builders, decoupled
//! from the file-serving business logic.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_403_response, build_404_response, build_500_response, build_file_response,
    build_html_response, build_redirect_response,
};
