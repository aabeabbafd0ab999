// Server module entry point
// Listener construction, accept loop and per-connection handling

pub mod connection;
pub mod listener;

// Rust does not allow `loop` as a module name (keyword), use server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used functions
pub use listener::create_listener;
pub use server_loop::run;
